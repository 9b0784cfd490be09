use glam::Vec3;
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Active,
    Suspended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Simulate,
    /// First out-of-range frame: put the chain back at rest once.
    Settle,
    Hold,
    /// First in-range frame after a suspension: simulate from the current pose.
    Resume,
}

/// Distance cutoff that parks a chain at rest while it is far from a point of
/// interest, typically the camera.
#[derive(Debug, Clone, Default)]
pub struct DistanceGate {
    restored: bool,
}

impl DistanceGate {
    pub fn new() -> Self {
        Self { restored: false }
    }

    pub fn evaluate(&mut self, root_position: Vec3, target: Option<Vec3>, update_distance: f32) -> GateDecision {
        let out_of_range = target.is_some_and(|t| root_position.distance(t) > update_distance);

        if !out_of_range {
            if self.restored {
                debug!("chain back in range, resuming simulation");
                self.restored = false;
                return GateDecision::Resume;
            }
            return GateDecision::Simulate;
        }

        if self.restored {
            GateDecision::Hold
        } else {
            debug!("chain out of range, settling to rest pose");
            self.restored = true;
            GateDecision::Settle
        }
    }

    pub fn state(&self) -> GateState {
        if self.restored {
            GateState::Suspended
        } else {
            GateState::Active
        }
    }
}
