use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindMode {
    /// Affects every chain regardless of position.
    Directional,
    /// Affects chains whose root lies within the source's radius.
    Spherical,
}

/// A wind emitter owned by the host scene.
pub trait WindSource: Debug {
    fn mode(&self) -> WindMode;
    fn position(&self) -> Vec3;
    /// Direction the wind blows toward.
    fn direction(&self) -> Vec3;
    fn strength(&self) -> f32;
    fn turbulence(&self) -> f32;
    /// Gust cycles per second.
    fn pulse_frequency(&self) -> f32;
    fn radius(&self) -> f32;

    fn is_active(&self) -> bool {
        true
    }

    fn affects(&self, point: Vec3) -> bool {
        match self.mode() {
            WindMode::Directional => true,
            WindMode::Spherical => point.distance(self.position()) <= self.radius(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindZone {
    pub mode: WindMode,
    pub position: Vec3,
    pub direction: Vec3,
    pub strength: f32,
    pub turbulence: f32,
    pub pulse_frequency: f32,
    pub radius: f32,
    pub active: bool,
}

impl WindZone {
    pub fn directional(direction: Vec3, strength: f32) -> Self {
        Self {
            mode: WindMode::Directional,
            position: Vec3::ZERO,
            direction,
            strength,
            turbulence: 0.0,
            pulse_frequency: 0.0,
            radius: 0.0,
            active: true,
        }
    }

    pub fn spherical(position: Vec3, radius: f32, direction: Vec3, strength: f32) -> Self {
        Self {
            mode: WindMode::Spherical,
            position,
            radius,
            ..Self::directional(direction, strength)
        }
    }

    pub fn with_turbulence(mut self, turbulence: f32) -> Self {
        self.turbulence = turbulence;
        self
    }

    pub fn with_pulse_frequency(mut self, pulse_frequency: f32) -> Self {
        self.pulse_frequency = pulse_frequency;
        self
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

impl WindSource for WindZone {
    fn mode(&self) -> WindMode {
        self.mode
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn direction(&self) -> Vec3 {
        self.direction
    }

    fn strength(&self) -> f32 {
        self.strength
    }

    fn turbulence(&self) -> f32 {
        self.turbulence
    }

    fn pulse_frequency(&self) -> f32 {
        self.pulse_frequency
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn is_active(&self) -> bool {
        self.active
    }
}
