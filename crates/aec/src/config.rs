//! Echo canceller configuration.

/// Maximum number of interleaved channels an engine instance supports.
pub const MAX_CHANNELS: usize = 8;

/// Configuration for an [`EchoCanceller`](crate::EchoCanceller) instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Sampling rate of both streams in Hz.
    pub sample_rate_hz: u32,
    /// Samples per channel in one frame. Advisory: the engine derives the
    /// frame length from the buffers it is given; the stream adapter uses
    /// this to size its render buffer.
    pub frame_size: usize,
    /// Number of adaptive filter taps, bounding the longest echo delay the
    /// filter can model.
    pub filter_length: usize,
    /// NLMS adaptation constant (mu).
    pub step_size: f32,
    /// Power floor (delta) added to the input power before normalizing the
    /// adaptation step.
    pub regularization: f32,
    /// Process in the Q15 fixed-point path instead of floating point.
    pub use_fixed_point: bool,
    /// Number of interleaved channels, `1..=MAX_CHANNELS`.
    pub num_channels: usize,
    /// Double-talk detection settings.
    pub double_talk: DoubleTalk,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sample_rate_hz: 16000,
            frame_size: 256,
            filter_length: 1024,
            step_size: 0.1,
            regularization: 1e-6,
            use_fixed_point: true,
            num_channels: 1,
            double_talk: DoubleTalk::default(),
        }
    }
}

/// Double-talk detection settings.
#[derive(Debug, Clone, PartialEq)]
pub struct DoubleTalk {
    pub enabled: bool,
    /// Smoothed near/far power ratio above which the near end counts as
    /// dominant.
    pub near_to_far_threshold: f32,
    /// Squared normalized cross-coherence below which near and far count as
    /// unrelated; together with a dominant near end this flags double-talk.
    pub coherence_threshold: f32,
    /// Exponential smoothing factor for the running powers, in `(0, 1)`.
    pub smoothing_alpha: f32,
    /// Frames adaptation stays disabled after a detection.
    pub hangover_frames: u32,
}

impl Default for DoubleTalk {
    fn default() -> Self {
        Self {
            enabled: true,
            near_to_far_threshold: 1.5,
            coherence_threshold: 0.3,
            smoothing_alpha: 0.9,
            hangover_frames: 3,
        }
    }
}
