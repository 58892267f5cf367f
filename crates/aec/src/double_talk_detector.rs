//! Frame-level double-talk detection.
//!
//! Filter adaptation must pause while the near end carries speech of its
//! own, otherwise the adaptive filter tries to cancel the near-end talker
//! and diverges. The detector smooths per-frame far, near, and cross powers
//! and declares double-talk when the near end dominates the far end while
//! being incoherent with it. Each detection arms a hangover during which
//! adaptation stays disabled.

/// Near-end energy below this is treated as silence; adaptation stays
/// allowed no matter the power ratio.
const MIN_NEAR_ENERGY: f32 = 1e-8;

/// Power-ratio / coherence double-talk detector with hangover.
#[derive(Debug)]
pub struct DoubleTalkDetector {
    alpha: f32,
    smoothed_far: f32,
    smoothed_near: f32,
    smoothed_cross: f32,
    near_to_far_threshold: f32,
    coherence_threshold: f32,
    hangover_frames: u32,
    hangover_counter: u32,
    adapt_allowed: bool,
}

impl DoubleTalkDetector {
    /// Creates a detector.
    ///
    /// `near_to_far_threshold` is the smoothed near/far power ratio above
    /// which the near end counts as dominant; `coherence_threshold` the
    /// squared normalized cross-coherence below which the signals count as
    /// unrelated; `smoothing_alpha` the exponential smoothing factor in
    /// `(0, 1)`; `hangover_frames` how many frames adaptation stays
    /// disabled after a detection.
    pub fn new(
        near_to_far_threshold: f32,
        coherence_threshold: f32,
        smoothing_alpha: f32,
        hangover_frames: u32,
    ) -> Self {
        Self {
            alpha: smoothing_alpha,
            smoothed_far: 0.0,
            smoothed_near: 0.0,
            smoothed_cross: 0.0,
            near_to_far_threshold,
            coherence_threshold,
            hangover_frames,
            hangover_counter: 0,
            adapt_allowed: true,
        }
    }

    /// Clears the smoothed powers and the hangover.
    pub fn reset(&mut self) {
        self.smoothed_far = 0.0;
        self.smoothed_near = 0.0;
        self.smoothed_cross = 0.0;
        self.hangover_counter = 0;
        self.adapt_allowed = true;
    }

    /// Consumes one frame of raw i16 samples and returns whether filter
    /// adaptation is allowed.
    ///
    /// For interleaved multi-channel audio, pass the buffers offset to the
    /// channel of interest and its channel count as `stride`.
    ///
    /// # Panics
    ///
    /// Panics if `stride` is zero.
    pub fn update(&mut self, far: &[i16], near: &[i16], stride: usize) -> bool {
        assert!(stride >= 1, "stride must be at least 1");

        let mut far_power = 0.0f64;
        let mut near_power = 0.0f64;
        let mut cross = 0.0f64;
        let mut frames = 0usize;
        for (&f, &n) in far.iter().step_by(stride).zip(near.iter().step_by(stride)) {
            let f = f64::from(f) / 32768.0;
            let n = f64::from(n) / 32768.0;
            far_power += f * f;
            near_power += n * n;
            cross += f * n;
            frames += 1;
        }
        if frames == 0 {
            return self.adapt_allowed;
        }
        far_power /= frames as f64;
        near_power /= frames as f64;
        cross /= frames as f64;

        self.smoothed_far = self.alpha * self.smoothed_far + (1.0 - self.alpha) * far_power as f32;
        self.smoothed_near =
            self.alpha * self.smoothed_near + (1.0 - self.alpha) * near_power as f32;
        self.smoothed_cross = self.alpha * self.smoothed_cross + (1.0 - self.alpha) * cross as f32;
        debug_assert!(self.smoothed_far.is_finite());
        debug_assert!(self.smoothed_near.is_finite());

        let double_talk = if self.smoothed_near < MIN_NEAR_ENERGY {
            false
        } else {
            let ratio = self.smoothed_near / (self.smoothed_far + 1e-12);
            let coherence = (self.smoothed_cross * self.smoothed_cross)
                / (self.smoothed_far * self.smoothed_near).max(1e-12);
            ratio > self.near_to_far_threshold && coherence < self.coherence_threshold
        };

        if double_talk {
            self.hangover_counter = self.hangover_frames;
            self.adapt_allowed = false;
        } else if self.hangover_counter > 0 {
            self.hangover_counter -= 1;
            self.adapt_allowed = self.hangover_counter == 0;
        } else {
            self.adapt_allowed = true;
        }

        self.adapt_allowed
    }

    /// Whether the last decision allowed adaptation.
    pub fn is_adapt_allowed(&self) -> bool {
        self.adapt_allowed
    }
}
