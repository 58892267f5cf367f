//! Acoustic echo cancellation.
//!
//! Removes the estimated echo of a known far-end (playback) signal from a
//! near-end (microphone) capture signal using an NLMS adaptive filter, with
//! frame-level double-talk detection gating the adaptation.
//!
//! # Usage
//!
//! ```
//! use aec::{Config, EchoCanceller};
//!
//! let mut config = Config::default();
//! config.filter_length = 512;
//!
//! let mut aec = EchoCanceller::builder().config(config).build().unwrap();
//!
//! let far_end = vec![0i16; 256];
//! let near_end = vec![0i16; 256];
//! let mut output = vec![0i16; 256];
//! aec.process(&far_end, &near_end, &mut output).unwrap();
//! ```
//!
//! Both a Q15 fixed-point and a floating-point processing path are
//! provided, selected by [`Config::use_fixed_point`]. Foreign callers use
//! the C API in [`ffi`] or, behind the `jni` feature, the Android binding
//! in [`jni_interface`].

pub mod audio_util;
pub mod config;
pub mod double_talk_detector;
pub mod echo_canceller;
pub mod ffi;
pub mod fixed_point;
#[cfg(feature = "jni")]
pub mod jni_interface;
pub mod nlms_filter;
pub mod stats;
pub mod stream_adapter;

pub use config::{Config, DoubleTalk, MAX_CHANNELS};
pub use echo_canceller::{EchoCanceller, EchoCancellerBuilder, Error};
pub use stats::AecStats;
pub use stream_adapter::StreamAdapter;
