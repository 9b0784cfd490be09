use glam::{Quat, Vec3};
use log::trace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

use super::source::WindSource;
use crate::hierarchy::TransformTree;

/// Tilts a chain's root in response to wind sources.
///
/// Turbulence jitter comes from an owned, seeded RNG, so two contributors with
/// the same seed fed the same frames produce the same motion.
#[derive(Debug, Clone)]
pub struct WindContributor {
    rng: StdRng,
}

impl WindContributor {
    pub const DEFAULT_SEED: u64 = 0x6a69_6767_6c65;

    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Gust factor at `time`: a sine pulse in `[0, 1]` plus turbulence jitter.
    pub fn pulse(&mut self, source: &dyn WindSource, time: f32) -> f32 {
        let wave = 0.5 + 0.5 * (time * TAU * source.pulse_frequency()).sin();
        let turbulence = source.turbulence();
        if turbulence == 0.0 {
            return wave;
        }
        wave + turbulence * self.rng.gen_range(-1.0f32..=1.0)
    }

    /// Rotates `root` about `chain_axis × wind_direction`, tipping the chain
    /// downwind. `chain_axis` is the direction from the root to its first child
    /// in the root's local space. Returns how many sources were applied.
    pub fn apply<T: TransformTree>(
        &mut self,
        tree: &mut T,
        root: T::Node,
        chain_axis: Vec3,
        sources: &[&dyn WindSource],
        time: f32,
        delta_time: f32,
        wind_scale: f32,
    ) -> usize {
        if delta_time <= 0.0 || wind_scale == 0.0 {
            return 0;
        }

        let mut applied = 0;
        for source in sources {
            if !source.is_active() {
                continue;
            }
            let root_world = tree.world_transform(root);
            if !source.affects(root_world.position) {
                continue;
            }
            let Some(wind) = source.direction().try_normalize() else {
                continue;
            };
            let chain_direction = root_world
                .transform_direction(chain_axis)
                .try_normalize()
                .unwrap_or(Vec3::NEG_Y);
            let Some(axis) = chain_direction.cross(wind).try_normalize() else {
                continue;
            };

            let angle = source.strength() * self.pulse(*source, time) * wind_scale * delta_time;
            if angle == 0.0 || !angle.is_finite() {
                continue;
            }
            let rotation = Quat::from_axis_angle(axis, angle) * root_world.rotation;
            tree.set_world_rotation(root, rotation.normalize());
            applied += 1;
        }

        if applied > 0 {
            trace!("wind applied from {} sources", applied);
        }
        applied
    }
}

impl Default for WindContributor {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::Hierarchy;
    use crate::math::Transform;
    use crate::wind::WindZone;

    fn hanging_chain() -> (Hierarchy, crate::hierarchy::NodeId) {
        Hierarchy::chain(Transform::IDENTITY, &[Vec3::NEG_Y, Vec3::NEG_Y])
    }

    #[test]
    fn pulse_without_turbulence_is_a_plain_wave() {
        let mut wind = WindContributor::default();
        let zone = WindZone::directional(Vec3::X, 1.0).with_pulse_frequency(1.0);
        assert!((wind.pulse(&zone, 0.0) - 0.5).abs() < 1e-6);
        assert!((wind.pulse(&zone, 0.25) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn same_seed_same_gusts() {
        let zone = WindZone::directional(Vec3::X, 1.0).with_turbulence(0.4);
        let mut a = WindContributor::new(7);
        let mut b = WindContributor::new(7);
        for frame in 0..10 {
            let t = frame as f32 * 0.016;
            assert_eq!(a.pulse(&zone, t), b.pulse(&zone, t));
        }
    }

    #[test]
    fn directional_wind_tips_chain_downwind() {
        let (mut tree, root) = hanging_chain();
        let zone = WindZone::directional(Vec3::X, 2.0);
        let sources: [&dyn WindSource; 1] = [&zone];
        let mut wind = WindContributor::default();

        let applied = wind.apply(&mut tree, root, Vec3::NEG_Y, &sources, 0.0, 0.1, 1.0);
        assert_eq!(applied, 1);
        let tip = tree.descendants(root)[2];
        assert!(tree.world_position(tip).x > 0.0);
    }

    #[test]
    fn spherical_wind_respects_radius() {
        let (mut tree, root) = hanging_chain();
        let far = WindZone::spherical(Vec3::new(10.0, 0.0, 0.0), 2.0, Vec3::X, 1.0);
        let near = WindZone::spherical(Vec3::new(1.0, 0.0, 0.0), 2.0, Vec3::X, 1.0);
        let mut inactive = WindZone::directional(Vec3::X, 1.0);
        inactive.set_active(false);
        let mut wind = WindContributor::default();

        let sources: [&dyn WindSource; 2] = [&far, &inactive];
        assert_eq!(wind.apply(&mut tree, root, Vec3::NEG_Y, &sources, 0.0, 0.1, 1.0), 0);
        assert_eq!(tree.world_rotation(root), Quat::IDENTITY);

        let sources: [&dyn WindSource; 1] = [&near];
        assert_eq!(wind.apply(&mut tree, root, Vec3::NEG_Y, &sources, 0.0, 0.1, 1.0), 1);
    }
}
