//! C-compatible type definitions for the echo canceller C API.
//!
//! All types here are `#[repr(C)]` and safe to pass across FFI boundaries.

use crate::EchoCanceller;

// ---------------------------------------------------------------------------
// Error codes
// ---------------------------------------------------------------------------

/// Error codes returned by C API functions.
///
/// `0` = success, negative = error.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AecError {
    /// Operation succeeded.
    None = 0,
    /// Null pointer passed to a function that requires non-null.
    NullPointer = -1,
    /// Internal error (panic caught at the FFI boundary).
    Internal = -2,
    /// The configuration was rejected (bad filter length, channel count,
    /// or step size).
    InvalidConfig = -3,
    /// Buffer lengths differ or are not divisible by the channel count.
    BadBufferLength = -4,
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Flat configuration struct for the echo canceller.
///
/// Obtain a default-initialized instance via `aec_config_default()`.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct AecConfig {
    pub sample_rate_hz: u32,
    pub frame_size: u32,
    pub filter_length: u32,
    pub step_size: f32,
    pub regularization: f32,
    pub use_fixed_point: bool,
    pub num_channels: u32,

    // -- Double-talk detection --
    pub double_talk_enabled: bool,
    pub double_talk_near_to_far_threshold: f32,
    pub double_talk_coherence_threshold: f32,
    pub double_talk_smoothing_alpha: f32,
    pub double_talk_hangover_frames: u32,
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

/// Echo cancellation statistics.
///
/// Each statistic has a `has_*` boolean. When `false`, the corresponding
/// value field is meaningless.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct AecStats {
    pub has_erle_db: bool,
    pub erle_db: f64,

    pub has_latency_ms: bool,
    pub latency_ms: f64,
}

// ---------------------------------------------------------------------------
// Opaque handle
// ---------------------------------------------------------------------------

/// Opaque handle to an echo canceller instance.
///
/// Created via `aec_create()`, `aec_create_with_config()`, or
/// `aec_create_with_filter_length()`. Destroyed via `aec_destroy()`.
///
/// **NOT thread-safe**: all calls on the same handle must be serialized.
pub struct AecEchoCanceller {
    pub(crate) inner: EchoCanceller,
}
