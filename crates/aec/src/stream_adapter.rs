//! Render/capture stream adapter.
//!
//! Call-engine style front end for the echo canceller: the render (far-end,
//! playback) path hands in its frames as they are sent to the speaker, and
//! the capture (near-end, microphone) path is cancelled in place against the
//! most recent render frame.

use crate::config::Config;
use crate::echo_canceller::{EchoCanceller, Error};
use crate::stats::AecStats;

/// Frame-synchronous render/capture wrapper around [`EchoCanceller`].
pub struct StreamAdapter {
    aec: EchoCanceller,
    far_buffer: Vec<i16>,
    out_buffer: Vec<i16>,
    frame_size: usize,
    enabled: bool,
}

impl StreamAdapter {
    /// Creates an adapter processing frames of `config.frame_size` samples
    /// per channel, or `sample_rate_hz * frame_ms / 1000` when the config
    /// leaves the frame size at zero.
    pub fn new(config: Config, frame_ms: u32) -> Result<Self, Error> {
        let frame_size = if config.frame_size != 0 {
            config.frame_size
        } else {
            (u64::from(config.sample_rate_hz) * u64::from(frame_ms) / 1000) as usize
        };
        if frame_size == 0 {
            return Err(Error::InvalidFrameSize);
        }

        let total_samples = frame_size * config.num_channels;
        let aec = EchoCanceller::builder().config(config).build()?;
        Ok(Self {
            aec,
            far_buffer: vec![0; total_samples],
            out_buffer: vec![0; total_samples],
            frame_size,
            enabled: true,
        })
    }

    /// Samples per channel in one frame.
    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    /// Stores one render (far-end) frame as the reference for the next
    /// capture frame. The frame must hold `frame_size * num_channels`
    /// interleaved samples.
    pub fn process_render(&mut self, far_frame: &[i16]) -> Result<(), Error> {
        if far_frame.len() != self.far_buffer.len() {
            return Err(Error::BufferSizeMismatch);
        }
        self.far_buffer.copy_from_slice(far_frame);
        Ok(())
    }

    /// Cancels echo from one capture frame in place.
    ///
    /// Passthrough when disabled via [`set_enabled(false)`](Self::set_enabled).
    pub fn process_capture(&mut self, frame: &mut [i16]) -> Result<(), Error> {
        if frame.len() != self.far_buffer.len() {
            return Err(Error::BufferSizeMismatch);
        }
        if !self.enabled {
            return Ok(());
        }
        self.aec.process(&self.far_buffer, frame, &mut self.out_buffer)?;
        frame.copy_from_slice(&self.out_buffer);
        Ok(())
    }

    /// Enables or disables cancellation; disabled capture frames pass
    /// through untouched.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Statistics of the underlying engine.
    pub fn stats(&self) -> AecStats {
        self.aec.stats()
    }

    /// Resets the underlying engine.
    pub fn reset(&mut self) {
        self.aec.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            frame_size: 160,
            filter_length: 512,
            ..Config::default()
        }
    }

    #[test]
    fn init_and_process() {
        let mut adapter = StreamAdapter::new(test_config(), 10).unwrap();
        assert_eq!(adapter.frame_size(), 160);

        let far = vec![1000i16; 160];
        let mut near = vec![2000i16; 160];
        for _ in 0..5 {
            adapter.process_render(&far).unwrap();
            adapter.process_capture(&mut near).unwrap();
        }
        assert!(near.iter().any(|&s| s != 2000));
    }

    #[test]
    fn frame_size_derived_from_frame_ms() {
        let config = Config {
            frame_size: 0,
            ..test_config()
        };
        let adapter = StreamAdapter::new(config, 10).unwrap();
        // 16 kHz * 10 ms
        assert_eq!(adapter.frame_size(), 160);
    }

    #[test]
    fn zero_frame_size_is_rejected() {
        let config = Config {
            frame_size: 0,
            ..test_config()
        };
        assert_eq!(
            StreamAdapter::new(config, 0).err(),
            Some(Error::InvalidFrameSize)
        );
    }

    #[test]
    fn disabled_adapter_passes_capture_through() {
        let mut adapter = StreamAdapter::new(test_config(), 10).unwrap();
        let far = vec![1000i16; 160];
        let mut near = vec![2000i16; 160];
        let backup = near.clone();

        adapter.set_enabled(false);
        assert!(!adapter.is_enabled());
        adapter.process_render(&far).unwrap();
        adapter.process_capture(&mut near).unwrap();
        assert_eq!(near, backup);
    }

    #[test]
    fn wrong_frame_length_is_rejected() {
        let mut adapter = StreamAdapter::new(test_config(), 10).unwrap();
        let far = vec![0i16; 80];
        assert_eq!(
            adapter.process_render(&far).err(),
            Some(Error::BufferSizeMismatch)
        );
        let mut near = vec![0i16; 80];
        assert_eq!(
            adapter.process_capture(&mut near).err(),
            Some(Error::BufferSizeMismatch)
        );
    }

    #[test]
    fn stats_pass_through() {
        let mut adapter = StreamAdapter::new(test_config(), 10).unwrap();
        assert!(adapter.stats().erle_db.is_none());

        let far = vec![1000i16; 160];
        let mut near = vec![2000i16; 160];
        for _ in 0..10 {
            adapter.process_render(&far).unwrap();
            adapter.process_capture(&mut near).unwrap();
        }
        assert!(adapter.stats().erle_db.is_some());
        assert!(adapter.stats().latency_ms.is_some());

        adapter.reset();
        assert!(adapter.stats().erle_db.is_none());
    }
}
