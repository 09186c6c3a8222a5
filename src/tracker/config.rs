use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("visibility threshold must be within [0, 1], got {0}")]
    Threshold(f64),
    #[error("sample interval must be greater than zero")]
    ZeroSampleInterval,
    #[error("header offset breakpoint width must be positive, got {0}")]
    Breakpoint(f64),
}

/// Header height to subtract when scrolling to a section, keyed by viewport
/// width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderOffsets {
    pub breakpoints: Vec<Breakpoint>,
    pub default_offset: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakpoint {
    /// Inclusive upper bound of the viewport width this offset applies to.
    pub max_width: f64,
    pub offset: f64,
}

impl Default for HeaderOffsets {
    fn default() -> Self {
        Self {
            breakpoints: vec![
                Breakpoint {
                    max_width: 576.0,
                    offset: 65.0,
                },
                Breakpoint {
                    max_width: 768.0,
                    offset: 70.0,
                },
            ],
            default_offset: 90.0,
        }
    }
}

impl HeaderOffsets {
    /// Breakpoints are checked narrowest first.
    pub fn offset_for(&self, viewport_width: f64) -> f64 {
        self.breakpoints
            .iter()
            .find(|bp| viewport_width <= bp.max_width)
            .map(|bp| bp.offset)
            .unwrap_or(self.default_offset)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrackerConfig {
    pub sample_interval_ms: u64,
    pub debounce_ms: u64,
    pub suppression_ms: u64,
    pub visibility_threshold: f64,
    pub home_section_id: String,
    pub header_offsets: HeaderOffsets,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            sample_interval_ms: 100,
            debounce_ms: 300,
            suppression_ms: 1000,
            visibility_threshold: 0.3,
            home_section_id: "home".to_string(),
            header_offsets: HeaderOffsets::default(),
        }
    }
}

impl TrackerConfig {
    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.sample_interval_ms)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn suppression(&self) -> Duration {
        Duration::from_millis(self.suppression_ms)
    }

    /// Checks the values and puts the breakpoints in ascending width order.
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&self.visibility_threshold) {
            return Err(ConfigError::Threshold(self.visibility_threshold));
        }
        if self.sample_interval_ms == 0 {
            return Err(ConfigError::ZeroSampleInterval);
        }
        if let Some(bp) = self
            .header_offsets
            .breakpoints
            .iter()
            .find(|bp| bp.max_width.is_nan() || bp.max_width <= 0.0)
        {
            return Err(ConfigError::Breakpoint(bp.max_width));
        }
        self.header_offsets
            .breakpoints
            .sort_by(|a, b| a.max_width.total_cmp(&b.max_width));
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_header_offsets() {
        let offsets = HeaderOffsets::default();
        assert_eq!(offsets.offset_for(375.0), 65.0);
        assert_eq!(offsets.offset_for(576.0), 65.0);
        assert_eq!(offsets.offset_for(577.0), 70.0);
        assert_eq!(offsets.offset_for(768.0), 70.0);
        assert_eq!(offsets.offset_for(1440.0), 90.0);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: TrackerConfig =
            serde_json::from_str(r#"{ "debounceMs": 150 }"#).expect("valid config");
        assert_eq!(config.debounce(), Duration::from_millis(150));
        assert_eq!(config.sample_interval(), Duration::from_millis(100));
        assert_eq!(config.suppression(), Duration::from_millis(1000));
        assert_eq!(config.visibility_threshold, 0.3);
        assert_eq!(config.home_section_id, "home");
    }

    #[test]
    fn test_validation_sorts_breakpoints() {
        let config = TrackerConfig {
            header_offsets: HeaderOffsets {
                breakpoints: vec![
                    Breakpoint {
                        max_width: 1024.0,
                        offset: 80.0,
                    },
                    Breakpoint {
                        max_width: 480.0,
                        offset: 60.0,
                    },
                ],
                default_offset: 100.0,
            },
            ..TrackerConfig::default()
        }
        .validated()
        .expect("valid config");
        assert_eq!(config.header_offsets.offset_for(400.0), 60.0);
        assert_eq!(config.header_offsets.offset_for(800.0), 80.0);
        assert_eq!(config.header_offsets.offset_for(2000.0), 100.0);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let bad_threshold = TrackerConfig {
            visibility_threshold: 1.5,
            ..TrackerConfig::default()
        };
        assert_eq!(
            bad_threshold.validated(),
            Err(ConfigError::Threshold(1.5))
        );

        let zero_interval = TrackerConfig {
            sample_interval_ms: 0,
            ..TrackerConfig::default()
        };
        assert_eq!(
            zero_interval.validated(),
            Err(ConfigError::ZeroSampleInterval)
        );
    }
}
