//! Conversion between the segment list and the single logical value.

use crate::segment::Segment;
use crate::store::SegmentStore;

/// Join segment values in index order.
///
/// Empty segments contribute nothing; a gap does not stop aggregation.
/// Trailing whitespace is trimmed, so the result never exceeds the segment count.
pub fn aggregate(segments: &[Segment]) -> String {
    let mut value: String = segments.iter().filter_map(Segment::value).collect();
    let trimmed = value.trim_end().len();
    value.truncate(trimmed);
    value
}

/// Spread `value` across the store, one character per segment, starting at index 0.
///
/// Segments past the end of `value` are cleared and characters past the end of
/// the store are dropped. Writes go through the silent path, so subscribers
/// are not notified.
pub fn distribute(value: &str, store: &mut SegmentStore) {
    let mut chars = value.chars();
    for index in 0..store.len() {
        store.set_segment_value(index, chars.next());
    }
    if chars.next().is_some() {
        log::trace!(
            target: "otp.store",
            "value truncated to {} segment(s)",
            store.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_of(length: usize) -> SegmentStore {
        let mut store = SegmentStore::new();
        store.build(length);
        store
    }

    fn truncated(value: &str, length: usize) -> String {
        value.chars().take(length).collect()
    }

    #[test]
    fn aggregate_of_fresh_store_is_empty() {
        assert_eq!(aggregate(store_of(6).segments()), "");
        assert_eq!(aggregate(store_of(0).segments()), "");
    }

    #[test]
    fn distribute_then_aggregate_truncates_to_store_length() {
        let values = ["", "4", "42", "123456", "1234567890", "abcXYZ", "€ü7"];
        for length in [0, 1, 4, 6, 8] {
            for value in values {
                let mut store = store_of(length);
                distribute(value, &mut store);
                assert_eq!(
                    aggregate(store.segments()),
                    truncated(value, length),
                    "value={value:?} length={length}"
                );
            }
        }
    }

    #[test]
    fn distribute_clears_segments_past_the_value() {
        let mut store = store_of(6);
        distribute("987654", &mut store);
        distribute("42", &mut store);

        let values: Vec<_> = store.segments().iter().map(Segment::value).collect();
        assert_eq!(values, vec![Some('4'), Some('2'), None, None, None, None]);
    }

    #[test]
    fn round_trip_is_stable_for_same_length_stores() {
        let mut source = store_of(5);
        distribute("ab1c2", &mut source);

        let mut target = store_of(5);
        distribute(&aggregate(source.segments()), &mut target);
        assert_eq!(source.segments(), target.segments());

        distribute(&aggregate(target.segments()), &mut target);
        assert_eq!(source.segments(), target.segments());
    }

    #[test]
    fn round_trip_into_shorter_store_truncates() {
        let mut source = store_of(6);
        distribute("123456", &mut source);

        let mut target = store_of(4);
        distribute(&aggregate(source.segments()), &mut target);
        assert_eq!(aggregate(target.segments()), "1234");
    }

    #[test]
    fn gaps_are_skipped_not_terminating() {
        let mut store = store_of(4);
        store.set_segment_value(1, Some('5'));
        store.set_segment_value(3, Some('9'));
        assert_eq!(aggregate(store.segments()), "59");
    }

    #[test]
    fn trailing_whitespace_is_trimmed() {
        let mut store = store_of(4);
        distribute("12  ", &mut store);
        assert_eq!(aggregate(store.segments()), "12");
    }
}
