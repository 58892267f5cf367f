//! Public echo cancellation API.
//!
//! Provides the user-facing [`EchoCanceller`] and [`EchoCancellerBuilder`]
//! for constructing configured instances.

use std::time::Instant;

use crate::config::{Config, MAX_CHANNELS};
use crate::double_talk_detector::DoubleTalkDetector;
use crate::nlms_filter::NlmsFilter;
use crate::stats::AecStats;

// ─── Error ───────────────────────────────────────────────────────────

/// Errors returned by echo cancellation operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Filter length of zero.
    InvalidFilterLength,
    /// Channel count of zero or above [`MAX_CHANNELS`].
    InvalidChannelCount,
    /// Step size that is zero, negative, or non-finite.
    InvalidStepSize,
    /// Frame size of zero where one is required.
    InvalidFrameSize,
    /// Buffer lengths differ, or are not divisible by the channel count.
    BufferSizeMismatch,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFilterLength => write!(f, "invalid filter length"),
            Self::InvalidChannelCount => write!(f, "invalid channel count"),
            Self::InvalidStepSize => write!(f, "invalid step size"),
            Self::InvalidFrameSize => write!(f, "invalid frame size"),
            Self::BufferSizeMismatch => write!(f, "buffer size mismatch"),
        }
    }
}

impl std::error::Error for Error {}

fn validate_config(config: &Config) -> Result<(), Error> {
    if config.filter_length == 0 {
        return Err(Error::InvalidFilterLength);
    }
    if config.num_channels == 0 || config.num_channels > MAX_CHANNELS {
        return Err(Error::InvalidChannelCount);
    }
    if !(config.step_size.is_finite() && config.step_size > 0.0) {
        return Err(Error::InvalidStepSize);
    }
    Ok(())
}

// ─── EchoCancellerBuilder ────────────────────────────────────────────

/// Builder for constructing an [`EchoCanceller`] instance.
///
/// # Example
/// ```
/// use aec::{Config, EchoCanceller};
///
/// let mut config = Config::default();
/// config.filter_length = 512;
/// config.use_fixed_point = true;
///
/// let aec = EchoCanceller::builder().config(config).build().unwrap();
/// assert_eq!(aec.config().filter_length, 512);
/// ```
pub struct EchoCancellerBuilder {
    config: Config,
}

impl EchoCancellerBuilder {
    fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Sets the configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Validates the configuration and builds the [`EchoCanceller`].
    pub fn build(self) -> Result<EchoCanceller, Error> {
        validate_config(&self.config)?;

        let channels = self.config.num_channels;
        let filters = (0..channels)
            .map(|_| {
                NlmsFilter::new(
                    self.config.filter_length,
                    self.config.step_size,
                    self.config.regularization,
                    self.config.use_fixed_point,
                )
            })
            .collect();
        let detectors = (0..channels)
            .map(|_| {
                DoubleTalkDetector::new(
                    self.config.double_talk.near_to_far_threshold,
                    self.config.double_talk.coherence_threshold,
                    self.config.double_talk.smoothing_alpha,
                    self.config.double_talk.hangover_frames,
                )
            })
            .collect();

        Ok(EchoCanceller {
            config: self.config,
            filters,
            detectors,
            near_power_sum: 0.0,
            error_power_sum: 0.0,
            samples_processed: 0,
            processing_time_ns: 0,
            log_counter: 0,
        })
    }
}

// ─── EchoCanceller ───────────────────────────────────────────────────

/// Acoustic echo canceller.
///
/// Owns one NLMS filter and one double-talk detector per channel. Each call
/// to [`process()`](Self::process) consumes one frame of interleaved i16
/// far-end (reference/playback) and near-end (capture/microphone) audio and
/// writes the echo-cancelled capture frame to `output`.
///
/// The frame length is derived from the buffers: the three slices must have
/// equal lengths divisible by the configured channel count. Instances are
/// independent; nothing is shared process-wide.
pub struct EchoCanceller {
    config: Config,
    filters: Vec<NlmsFilter>,
    detectors: Vec<DoubleTalkDetector>,
    near_power_sum: f64,
    error_power_sum: f64,
    samples_processed: u64,
    processing_time_ns: u128,
    log_counter: u32,
}

impl EchoCanceller {
    /// Returns a builder for constructing an instance.
    pub fn builder() -> EchoCancellerBuilder {
        EchoCancellerBuilder::new()
    }

    /// The configuration this instance was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Processes one frame of interleaved i16 audio.
    ///
    /// Subtracts the estimated echo of `far_end` from `near_end` and writes
    /// the result to `output`. On error the output buffer is untouched.
    pub fn process(
        &mut self,
        far_end: &[i16],
        near_end: &[i16],
        output: &mut [i16],
    ) -> Result<(), Error> {
        if far_end.len() != near_end.len() || far_end.len() != output.len() {
            return Err(Error::BufferSizeMismatch);
        }
        let channels = self.config.num_channels;
        if far_end.len() % channels != 0 {
            return Err(Error::BufferSizeMismatch);
        }
        if far_end.is_empty() {
            return Ok(());
        }

        let start = Instant::now();
        let frame_size = far_end.len() / channels;

        for c in 0..channels {
            let adapt = if self.config.double_talk.enabled {
                self.detectors[c].update(&far_end[c..], &near_end[c..], channels)
            } else {
                true
            };

            for i in 0..frame_size {
                let idx = i * channels + c;
                output[idx] = self.filters[c].process_i16(far_end[idx], near_end[idx], adapt);
            }
        }

        for (&n, &e) in near_end.iter().zip(output.iter()) {
            let n = f64::from(n) / 32768.0;
            let e = f64::from(e) / 32768.0;
            self.near_power_sum += n * n;
            self.error_power_sum += e * e;
        }
        self.samples_processed += far_end.len() as u64;
        self.processing_time_ns += start.elapsed().as_nanos();

        self.check_divergence();
        Ok(())
    }

    fn check_divergence(&mut self) {
        for (channel, filter) in self.filters.iter_mut().enumerate() {
            let norm = filter.coeff_norm();
            if !norm.is_finite() {
                if self.log_counter < 5 {
                    tracing::error!(
                        channel,
                        coeff_norm = norm,
                        "adaptive filter diverged; resetting channel filter"
                    );
                    self.log_counter += 1;
                }
                filter.reset();
            }
        }
    }

    /// Resets all filter and detector state and the statistics.
    pub fn reset(&mut self) {
        for filter in &mut self.filters {
            filter.reset();
        }
        for detector in &mut self.detectors {
            detector.reset();
        }
        self.near_power_sum = 0.0;
        self.error_power_sum = 0.0;
        self.samples_processed = 0;
        self.processing_time_ns = 0;
    }

    /// Current statistics, accumulated since construction or the last
    /// [`reset()`](Self::reset).
    pub fn stats(&self) -> AecStats {
        let erle_db = if self.near_power_sum > 0.0 && self.error_power_sum > 0.0 {
            Some(10.0 * (self.near_power_sum / self.error_power_sum).log10())
        } else {
            None
        };
        let latency_ms = if self.samples_processed > 0 {
            Some(self.processing_time_ns as f64 / self.samples_processed as f64 / 1e6)
        } else {
            None
        };
        AecStats { erle_db, latency_ms }
    }
}
