use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use otp_core::{Key, OtpConfig, OtpControl, SegmentEvent, SegmentStore, ValueType, aggregate, distribute};

const SHORT_LENGTH: usize = 6;
const LONG_LENGTH: usize = 4_096;

fn digits(len: usize) -> String {
    (0..len)
        .map(|i| char::from(b'0' + (i % 10) as u8))
        .collect()
}

fn ready_control(length: usize) -> OtpControl {
    let mut control = OtpControl::new(
        OtpConfig::default()
            .with_length(length)
            .with_value_type(ValueType::Number),
    );
    control.register_on_change(|v| {
        black_box(v.len());
    });
    control.activate();
    control
}

fn bench_type_full_code(c: &mut Criterion) {
    c.bench_function("bench_type_full_code", |b| {
        b.iter_batched(
            || ready_control(SHORT_LENGTH),
            |mut control| {
                let mut at = 0;
                for ch in "123456".chars() {
                    let reaction = control.handle(at, SegmentEvent::Text(ch.to_string()));
                    if let Some(next) = reaction.focus {
                        at = next;
                    }
                }
                black_box(control.value());
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_backspace_sweep(c: &mut Criterion) {
    let code = digits(SHORT_LENGTH);
    c.bench_function("bench_backspace_sweep", |b| {
        b.iter_batched(
            || {
                let mut control = ready_control(SHORT_LENGTH);
                control.write_value(&code);
                control
            },
            |mut control| {
                let mut at = SHORT_LENGTH - 1;
                for _ in 0..SHORT_LENGTH * 2 {
                    let reaction = control.handle(at, SegmentEvent::key(Key::Backspace));
                    if let Some(prev) = reaction.focus {
                        at = prev;
                    }
                }
                black_box(control.value());
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_paste_long(c: &mut Criterion) {
    let clipboard = digits(LONG_LENGTH);
    c.bench_function("bench_paste_long", |b| {
        b.iter_batched(
            || ready_control(LONG_LENGTH),
            |mut control| {
                let reaction = control.handle(0, SegmentEvent::Paste(clipboard.clone()));
                black_box(reaction);
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_distribute_aggregate_long(c: &mut Criterion) {
    let value = digits(LONG_LENGTH);
    let mut store = SegmentStore::new();
    store.build(LONG_LENGTH);
    c.bench_function("bench_distribute_aggregate_long", |b| {
        b.iter(|| {
            distribute(black_box(&value), &mut store);
            black_box(aggregate(store.segments()));
        });
    });
}

criterion_group!(
    benches,
    bench_type_full_code,
    bench_backspace_sweep,
    bench_paste_long,
    bench_distribute_aggregate_long
);
criterion_main!(benches);
