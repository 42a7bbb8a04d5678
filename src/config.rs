use thiserror::Error;

use crate::constants::*;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("lane count must be at least 1")]
    NoLanes,
    #[error("gap width must be at least 1")]
    NoGap,
    #[error("gap width {gap_width} must be smaller than lane count {lanes}")]
    GapTooWide { lanes: usize, gap_width: usize },
}

/// Which control law drives the player craft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlMode {
    /// Held left/right keys accelerate the craft.
    Keys,
    /// The craft eases toward a pointer target while one is active.
    Pointer,
}

#[derive(Debug, Clone, Copy)]
pub struct GameConfig {
    pub lanes: usize,
    pub gap_width: usize,
    pub control: ControlMode,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            lanes: LANES,
            gap_width: GAP_WIDTH,
            control: ControlMode::Keys,
        }
    }
}

impl GameConfig {
    /// Rejects degenerate geometry before any wave is spawned. A gap as wide
    /// as the lane count would leave no lane to place an obstacle in.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lanes == 0 {
            return Err(ConfigError::NoLanes);
        }
        if self.gap_width == 0 {
            return Err(ConfigError::NoGap);
        }
        if self.gap_width >= self.lanes {
            return Err(ConfigError::GapTooWide {
                lanes: self.lanes,
                gap_width: self.gap_width,
            });
        }
        Ok(())
    }

    pub fn lane_width(&self) -> f64 {
        SIM_WIDTH / self.lanes as f64
    }

    /// Highest valid gap-lane index (inclusive).
    pub fn max_gap_lane(&self) -> usize {
        self.lanes - self.gap_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn gap_as_wide_as_field_is_rejected() {
        let cfg = GameConfig {
            lanes: 5,
            gap_width: 5,
            ..GameConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::GapTooWide {
                lanes: 5,
                gap_width: 5
            })
        );
    }

    #[test]
    fn gap_wider_than_field_is_rejected() {
        let cfg = GameConfig {
            lanes: 3,
            gap_width: 7,
            ..GameConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_lanes_rejected() {
        let cfg = GameConfig {
            lanes: 0,
            gap_width: 1,
            ..GameConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::NoLanes));
    }

    #[test]
    fn zero_gap_rejected() {
        let cfg = GameConfig {
            lanes: 5,
            gap_width: 0,
            ..GameConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::NoGap));
    }

    #[test]
    fn lane_geometry() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.lane_width(), SIM_WIDTH / LANES as f64);
        assert_eq!(cfg.max_gap_lane(), LANES - GAP_WIDTH);
    }
}
