use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    SimError,
    terrain::{Triangle, default_peaks},
};

const DEFAULT_LANDER_CONFIG_YAML: &str = include_str!("../config/lander.default.yaml");

/// Rectangle the lander must stay inside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds {
            min_x: -100.0,
            max_x: 900.0,
            min_y: -100.0,
            max_y: 700.0,
        }
    }
}

impl Bounds {
    /// `max_y` is exclusive, the other edges are inclusive.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y < self.max_y
    }
}

/// World geometry, physics constants and landing thresholds.
/// Screen coordinates: y grows downwards, the ground is at `ground_level`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanderConfig {
    pub ground_level: f64,
    pub landing_pad_left: f64,
    pub landing_pad_right: f64,

    /// Horizontal distance from the center to each leg.
    pub half_width: f64,
    /// Distance from the center to the bottom of the legs.
    pub bottom_offset: f64,
    /// Vertical offset of the leg collision points.
    pub leg_offset: f64,

    pub gravity: f64,
    pub main_thrust: f64,
    pub side_thrust: f64,

    pub safe_vertical_speed: f64,
    pub safe_horizontal_speed: f64,
    pub safe_angle: f64,

    pub bounds: Bounds,
    pub terrain: Vec<Triangle>,
}

impl Default for LanderConfig {
    fn default() -> Self {
        LanderConfig {
            ground_level: 500.0,
            landing_pad_left: 300.0,
            landing_pad_right: 500.0,
            half_width: 15.0,
            bottom_offset: 15.0,
            leg_offset: 20.0,
            gravity: 0.05,
            main_thrust: 0.1,
            side_thrust: 0.05,
            safe_vertical_speed: 2.0,
            safe_horizontal_speed: 1.0,
            safe_angle: 0.26,
            bounds: Bounds::default(),
            terrain: default_peaks(),
        }
    }
}

impl LanderConfig {
    /// Parse a lander config from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SimError> {
        let config: LanderConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a lander config from a YAML file path.
    pub fn from_yaml_path(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let yaml = fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Return the default YAML config included with this crate.
    pub fn default_yaml() -> &'static str {
        DEFAULT_LANDER_CONFIG_YAML
    }

    /// Parse the default YAML config included with this crate.
    pub fn from_default_yaml() -> Result<Self, SimError> {
        Self::from_yaml_str(Self::default_yaml())
    }

    /// Center of the pad at resting height, the point rollouts steer towards.
    pub fn landing_target(&self) -> (f64, f64) {
        (
            (self.landing_pad_left + self.landing_pad_right) / 2.0,
            self.resting_y(),
        )
    }

    /// Center height at which the legs touch the ground.
    pub fn resting_y(&self) -> f64 {
        self.ground_level - self.bottom_offset
    }

    pub fn validate(&self) -> Result<(), SimError> {
        let scalars = [
            ("ground_level", self.ground_level),
            ("landing_pad_left", self.landing_pad_left),
            ("landing_pad_right", self.landing_pad_right),
            ("half_width", self.half_width),
            ("bottom_offset", self.bottom_offset),
            ("leg_offset", self.leg_offset),
            ("gravity", self.gravity),
            ("main_thrust", self.main_thrust),
            ("side_thrust", self.side_thrust),
            ("safe_vertical_speed", self.safe_vertical_speed),
            ("safe_horizontal_speed", self.safe_horizontal_speed),
            ("safe_angle", self.safe_angle),
        ];
        for (name, value) in scalars {
            if !value.is_finite() {
                return Err(SimError::InvalidConfig(format!("{name} must be finite")));
            }
        }
        if self.landing_pad_left > self.landing_pad_right {
            return Err(SimError::InvalidConfig(
                "landing_pad_left must not exceed landing_pad_right".to_string(),
            ));
        }
        if self.half_width < 0.0 || self.bottom_offset < 0.0 {
            return Err(SimError::InvalidConfig(
                "lander dimensions must be >= 0".to_string(),
            ));
        }
        if self.safe_vertical_speed < 0.0
            || self.safe_horizontal_speed < 0.0
            || self.safe_angle < 0.0
        {
            return Err(SimError::InvalidConfig(
                "safe landing thresholds must be >= 0".to_string(),
            ));
        }
        let b = &self.bounds;
        if b.min_x >= b.max_x || b.min_y >= b.max_y {
            return Err(SimError::InvalidConfig(
                "bounds must have min < max on both axes".to_string(),
            ));
        }
        Ok(())
    }
}
