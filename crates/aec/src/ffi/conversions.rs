//! Conversions between C API types and their Rust counterparts.

use crate::config::{Config, DoubleTalk};

use super::types::{AecConfig, AecStats};

impl AecConfig {
    pub(crate) fn from_rust(config: &Config) -> Self {
        Self {
            sample_rate_hz: config.sample_rate_hz,
            frame_size: config.frame_size as u32,
            filter_length: config.filter_length as u32,
            step_size: config.step_size,
            regularization: config.regularization,
            use_fixed_point: config.use_fixed_point,
            num_channels: config.num_channels as u32,
            double_talk_enabled: config.double_talk.enabled,
            double_talk_near_to_far_threshold: config.double_talk.near_to_far_threshold,
            double_talk_coherence_threshold: config.double_talk.coherence_threshold,
            double_talk_smoothing_alpha: config.double_talk.smoothing_alpha,
            double_talk_hangover_frames: config.double_talk.hangover_frames,
        }
    }

    pub(crate) fn to_rust(self) -> Config {
        Config {
            sample_rate_hz: self.sample_rate_hz,
            frame_size: self.frame_size as usize,
            filter_length: self.filter_length as usize,
            step_size: self.step_size,
            regularization: self.regularization,
            use_fixed_point: self.use_fixed_point,
            num_channels: self.num_channels as usize,
            double_talk: DoubleTalk {
                enabled: self.double_talk_enabled,
                near_to_far_threshold: self.double_talk_near_to_far_threshold,
                coherence_threshold: self.double_talk_coherence_threshold,
                smoothing_alpha: self.double_talk_smoothing_alpha,
                hangover_frames: self.double_talk_hangover_frames,
            },
        }
    }
}

impl AecStats {
    pub(crate) fn from_rust(stats: &crate::stats::AecStats) -> Self {
        Self {
            has_erle_db: stats.erle_db.is_some(),
            erle_db: stats.erle_db.unwrap_or(0.0),
            has_latency_ms: stats.latency_ms.is_some(),
            latency_ms: stats.latency_ms.unwrap_or(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_roundtrip() {
        let mut config = Config::default();
        config.filter_length = 512;
        config.use_fixed_point = false;
        config.num_channels = 2;
        config.double_talk.enabled = false;
        config.double_talk.hangover_frames = 7;

        let roundtrip = AecConfig::from_rust(&config).to_rust();
        assert_eq!(config, roundtrip);
    }

    #[test]
    fn default_config_roundtrip() {
        let config = Config::default();
        let roundtrip = AecConfig::from_rust(&config).to_rust();
        assert_eq!(config, roundtrip);
    }

    #[test]
    fn stats_conversion() {
        let empty = AecStats::from_rust(&crate::stats::AecStats::default());
        assert!(!empty.has_erle_db);
        assert!(!empty.has_latency_ms);

        let full = AecStats::from_rust(&crate::stats::AecStats {
            erle_db: Some(12.5),
            latency_ms: Some(0.003),
        });
        assert!(full.has_erle_db);
        assert_eq!(full.erle_db, 12.5);
        assert!(full.has_latency_ms);
        assert_eq!(full.latency_ms, 0.003);
    }
}
