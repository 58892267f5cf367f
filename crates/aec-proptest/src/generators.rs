//! Audio frame generators.
//!
//! Provides both strategy functions (for use with `#[strategy(...)]`) and
//! `Arbitrary`-deriving structs for common echo cancellation test inputs.

use proptest::prelude::*;
use test_strategy::Arbitrary;

/// A telephony-band sample rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Arbitrary)]
pub enum SampleRate {
    #[weight(1)]
    Hz8000,
    #[weight(1)]
    Hz16000,
    #[weight(1)]
    Hz32000,
    #[weight(1)]
    Hz48000,
}

impl SampleRate {
    pub fn hz(self) -> u32 {
        match self {
            Self::Hz8000 => 8000,
            Self::Hz16000 => 16000,
            Self::Hz32000 => 32000,
            Self::Hz48000 => 48000,
        }
    }

    /// Number of samples in a 10 ms frame at this rate.
    pub fn frame_size(self) -> usize {
        (self.hz() / 100) as usize
    }
}

/// A far-end frame paired with a synthetic echo of itself.
#[derive(Debug, Clone, Arbitrary)]
pub struct EchoFrame {
    #[strategy(audio_frame_i16(256))]
    pub far_end: Vec<i16>,
    /// Echo path gain applied to the far end to produce the near end.
    #[strategy(0.1f32..=0.9f32)]
    pub echo_gain: f32,
}

impl EchoFrame {
    /// The near-end frame: the far end through the echo path.
    pub fn near_end(&self) -> Vec<i16> {
        self.far_end
            .iter()
            .map(|&s| (f32::from(s) * self.echo_gain) as i16)
            .collect()
    }
}

/// Generate a frame of raw i16 samples.
pub fn audio_frame_i16(frame_size: usize) -> impl Strategy<Value = Vec<i16>> {
    proptest::collection::vec(i16::MIN..=i16::MAX, frame_size..=frame_size)
}

/// Generate a frame of float samples in `[-1.0, 1.0]`.
pub fn audio_frame_f32(frame_size: usize) -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(-1.0f32..=1.0f32, frame_size..=frame_size)
}

/// Generate an interleaved multi-channel frame of raw i16 samples.
pub fn interleaved_frame_i16(
    frame_size: usize,
    num_channels: usize,
) -> impl Strategy<Value = Vec<i16>> {
    let total = frame_size * num_channels;
    proptest::collection::vec(i16::MIN..=i16::MAX, total..=total)
}

/// Generate an adaptive filter length (power of two, 16..=1024).
pub fn filter_length() -> impl Strategy<Value = usize> {
    (4u32..=10).prop_map(|exp| 1usize << exp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn frame_i16_correct_length(#[strategy(audio_frame_i16(256))] frame: Vec<i16>) {
        assert_eq!(frame.len(), 256);
    }

    #[proptest]
    fn frame_f32_in_range(#[strategy(audio_frame_f32(128))] frame: Vec<f32>) {
        assert_eq!(frame.len(), 128);
        for &s in &frame {
            assert!((-1.0..=1.0).contains(&s));
        }
    }

    #[proptest]
    fn interleaved_frame_correct_length(
        #[strategy(interleaved_frame_i16(160, 2))] frame: Vec<i16>,
    ) {
        assert_eq!(frame.len(), 320);
    }

    #[proptest]
    fn sample_rate_valid_values(sr: SampleRate) {
        assert!([8000, 16000, 32000, 48000].contains(&sr.hz()));
        assert_eq!(sr.frame_size(), (sr.hz() / 100) as usize);
    }

    #[proptest]
    fn filter_length_is_power_of_two(#[strategy(filter_length())] len: usize) {
        assert!(len.is_power_of_two());
        assert!((16..=1024).contains(&len));
    }

    #[proptest]
    fn echo_frame_near_end_is_scaled(frame: EchoFrame) {
        let near = frame.near_end();
        assert_eq!(near.len(), frame.far_end.len());
        for (&n, &f) in near.iter().zip(&frame.far_end) {
            assert!(i32::from(n).abs() <= i32::from(f).abs());
        }
    }
}
