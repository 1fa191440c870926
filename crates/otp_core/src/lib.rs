//! # otp_core
//!
//! UI-agnostic engine for segmented one-time-password fields.
//!
//! A single logical value is split across N single-character segments. This
//! crate keeps the segments and the aggregated value in sync, decides where
//! focus goes on typing, deletion, arrow keys and paste, and enforces the
//! value-type policy at the point of character entry:
//! - [`SegmentStore`]: ordered segments with a silent and a notifying write path
//! - [`aggregate`] / [`distribute`]: segments ⇄ logical value
//! - [`accepts`] and friends: the text / digits-only policy
//! - [`react`]: stateless focus routing
//! - [`OtpControl`]: the facade hosts talk to
//!
//! ## Design Principles
//!
//! This crate does not depend on any graphics framework. Rendering layers
//! translate their native events into [`SegmentEvent`]s and feed them to an
//! [`OtpControl`] (directly or through [`SegmentEventSink`]); hosts bind to the
//! value through `write_value`, `value` and `register_on_change`.
//!
//! Everything runs on the caller's thread. No operation fails: invalid input
//! degrades to a no-op. The only fallible call is configuration loading.

mod aggregate;
mod config;
mod control;
mod nav;
mod segment;
mod store;
mod subscription;
mod traits;
mod validate;

pub use aggregate::{aggregate, distribute};
pub use config::{ConfigError, DEFAULT_LENGTH, OtpConfig};
pub use control::{Lifecycle, OtpControl};
pub use nav::{Key, Modifiers, Reaction, SegmentEvent, Signal, react};
pub use segment::Segment;
pub use store::SegmentStore;
pub use subscription::Subscription;
pub use traits::SegmentEventSink;
pub use validate::{
    InputType, ValueType, accepts, accepts_paste, is_non_blank_string, is_numeric_string,
};
