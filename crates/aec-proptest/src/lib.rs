//! Property-based test generators for the aec engine.
//!
//! Provides audio frame generators for exercising the echo canceller with
//! arbitrary sample data.
//!
//! # Usage
//!
//! ```ignore
//! use aec_proptest::generators::*;
//! use test_strategy::proptest;
//!
//! #[proptest]
//! fn my_test(#[strategy(audio_frame_i16(256))] frame: Vec<i16>) {
//!     assert_eq!(frame.len(), 256);
//! }
//! ```

pub mod generators;

pub use proptest;
pub use test_strategy;
