//! Authored per-chain settings.
//!
//! [`JiggleConfig`] is plain data: it can be built in code, deserialized from
//! TOML, and is range-checked by [`JiggleConfig::sanitized`] before a chain uses
//! it.

use std::path::Path;

use glam::Vec3;
use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::collision::CollisionMode;
use crate::curve::Curve;

pub const MIN_DAMPING: f32 = 0.0;
pub const MAX_DAMPING: f32 = 5.0;
pub const MIN_COLLISION_ACCURACY: f32 = 1.0;
pub const MAX_COLLISION_ACCURACY: f32 = 1000.0;
pub const MIN_COLLISION_RADIUS: f32 = 0.01;
pub const MAX_COLLISION_RADIUS: f32 = 5.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

const fn default_damping() -> f32 {
    1.0
}
const fn default_gravity_scale() -> f32 {
    9.81
}
const fn default_true() -> bool {
    true
}
const fn default_collision_accuracy() -> f32 {
    1000.0
}
const fn default_collision_radius() -> f32 {
    0.1
}
fn default_radius_distribution() -> Curve {
    Curve::constant(1.0)
}
const fn default_wind_scale() -> f32 {
    1.0
}
const fn default_update_distance() -> f32 {
    10.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JiggleConfig {
    /// 0 falls fastest, 5 never relaxes toward the rest pose.
    #[serde(default = "default_damping")]
    pub damping: f32,

    /// Rate multiplier for pulling the root toward its gravity-biased rotation.
    #[serde(default = "default_gravity_scale")]
    pub gravity_scale: f32,

    /// Sampled at `index / bone_count`; `1 - value` is the rigidity of that bone.
    #[serde(default)]
    pub force_falloff: Curve,

    #[serde(default = "default_true")]
    pub do_collision_checks: bool,

    /// Pushout steps per collision radius.
    #[serde(default = "default_collision_accuracy")]
    pub collision_accuracy: f32,

    #[serde(default = "default_collision_radius")]
    pub collision_radius: f32,

    /// Per-bone multiplier on `collision_radius`, sampled like `force_falloff`.
    #[serde(default = "default_radius_distribution")]
    pub collision_radius_distribution: Curve,

    #[serde(default)]
    pub collision_mode: CollisionMode,

    #[serde(default)]
    pub react_to_wind_zones: bool,

    #[serde(default = "default_wind_scale")]
    pub wind_scale: f32,

    /// When set, the chain settles to rest and stops simulating while its root
    /// is farther than `update_distance` from this point.
    #[serde(default)]
    pub distance_check_target: Option<Vec3>,

    #[serde(default = "default_update_distance")]
    pub update_distance: f32,
}

impl Default for JiggleConfig {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            gravity_scale: default_gravity_scale(),
            force_falloff: Curve::default(),
            do_collision_checks: true,
            collision_accuracy: default_collision_accuracy(),
            collision_radius: default_collision_radius(),
            collision_radius_distribution: default_radius_distribution(),
            collision_mode: CollisionMode::default(),
            react_to_wind_zones: false,
            wind_scale: default_wind_scale(),
            distance_check_target: None,
            update_distance: default_update_distance(),
        }
    }
}

impl JiggleConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Clamps every bounded option into its range, warning about each change.
    pub fn sanitized(mut self) -> Self {
        self.damping = clamp_field("damping", self.damping, MIN_DAMPING, MAX_DAMPING);
        self.collision_accuracy = clamp_field(
            "collision_accuracy",
            self.collision_accuracy,
            MIN_COLLISION_ACCURACY,
            MAX_COLLISION_ACCURACY,
        );
        self.collision_radius = clamp_field(
            "collision_radius",
            self.collision_radius,
            MIN_COLLISION_RADIUS,
            MAX_COLLISION_RADIUS,
        );
        self.update_distance = clamp_field("update_distance", self.update_distance, 0.0, f32::MAX);
        self
    }

    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_gravity_scale(mut self, gravity_scale: f32) -> Self {
        self.gravity_scale = gravity_scale;
        self
    }

    pub fn with_force_falloff(mut self, curve: Curve) -> Self {
        self.force_falloff = curve;
        self
    }

    pub fn with_collisions(mut self, radius: f32, accuracy: f32) -> Self {
        self.do_collision_checks = true;
        self.collision_radius = radius;
        self.collision_accuracy = accuracy;
        self
    }

    pub fn without_collisions(mut self) -> Self {
        self.do_collision_checks = false;
        self
    }

    pub fn with_radius_distribution(mut self, curve: Curve) -> Self {
        self.collision_radius_distribution = curve;
        self
    }

    pub fn with_wind(mut self, wind_scale: f32) -> Self {
        self.react_to_wind_zones = true;
        self.wind_scale = wind_scale;
        self
    }

    pub fn with_distance_gate(mut self, target: Vec3, update_distance: f32) -> Self {
        self.distance_check_target = Some(target);
        self.update_distance = update_distance;
        self
    }
}

fn clamp_field(name: &str, value: f32, min: f32, max: f32) -> f32 {
    let clamped = if value.is_nan() { min } else { value.clamp(min, max) };
    if clamped != value {
        warn!("{} = {} is out of range [{}, {}], using {}", name, value, min, max, clamped);
    }
    clamped
}
