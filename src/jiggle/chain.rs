use std::fmt;

use glam::Vec3;
use log::debug;

use super::bone::Bone;
use super::gate::{DistanceGate, GateDecision, GateState};
use super::snapshot::ChainSnapshot;
use super::solver::JiggleSolver;
use crate::collision::{CollisionQuery, CollisionResolver};
use crate::config::JiggleConfig;
use crate::debug::{DebugDraw, BONE_COLOR, COLLISION_COLOR};
use crate::hierarchy::TransformTree;
use crate::wind::{WindContributor, WindSource};

/// Per-frame inputs supplied by the host.
#[derive(Clone, Copy)]
pub struct FrameContext<'a> {
    pub delta_time: f32,
    /// Seconds since start, drives wind pulses.
    pub time: f32,
    pub colliders: Option<&'a dyn CollisionQuery>,
    pub wind_sources: &'a [&'a dyn WindSource],
}

impl<'a> FrameContext<'a> {
    pub fn new(delta_time: f32, time: f32) -> Self {
        Self {
            delta_time,
            time,
            colliders: None,
            wind_sources: &[],
        }
    }

    pub fn with_colliders(mut self, colliders: &'a dyn CollisionQuery) -> Self {
        self.colliders = Some(colliders);
        self
    }

    pub fn with_wind(mut self, sources: &'a [&'a dyn WindSource]) -> Self {
        self.wind_sources = sources;
        self
    }
}

impl fmt::Debug for FrameContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameContext")
            .field("delta_time", &self.delta_time)
            .field("time", &self.time)
            .field("has_colliders", &self.colliders.is_some())
            .field("wind_sources", &self.wind_sources.len())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Simulated,
    /// The chain went out of range this frame and was put back at rest.
    Settled,
    Suspended,
}

/// One simulated bone chain rooted at a host node.
#[derive(Debug, Clone)]
pub struct JiggleChain<N> {
    snapshot: ChainSnapshot<N>,
    last_frame_positions: Vec<Vec3>,
    config: JiggleConfig,
    gate: DistanceGate,
    wind: WindContributor,
}

impl<N: Copy + Eq> JiggleChain<N> {
    /// Captures `root` and its descendants in their current pose as the rest
    /// pose.
    pub fn new<T: TransformTree<Node = N>>(tree: &T, root: N, config: JiggleConfig) -> Self {
        Self::builder(root).config(config).build(tree)
    }

    pub fn builder(root: N) -> JiggleChainBuilder<N> {
        JiggleChainBuilder::new(root)
    }

    pub fn update<T: TransformTree<Node = N>>(&mut self, tree: &mut T, frame: &FrameContext<'_>) -> StepOutcome {
        let root = self.snapshot.root().node;
        let decision = self.gate.evaluate(
            tree.world_position(root),
            self.config.distance_check_target,
            self.config.update_distance,
        );
        match decision {
            GateDecision::Hold => return StepOutcome::Suspended,
            GateDecision::Settle => {
                self.restore_rest_pose(tree);
                return StepOutcome::Settled;
            }
            // the host may have moved the chain while it was parked
            GateDecision::Resume => self.capture_last_frame(tree),
            GateDecision::Simulate => {}
        }

        let dt = frame.delta_time;
        if self.config.react_to_wind_zones {
            self.wind.apply(
                tree,
                root,
                self.snapshot.chain_axis(),
                frame.wind_sources,
                frame.time,
                dt,
                self.config.wind_scale,
            );
        }
        JiggleSolver::apply_gravity(
            tree,
            &self.snapshot,
            self.config.gravity_scale,
            self.config.damping,
            dt,
        );

        let count = self.snapshot.len();
        for i in 0..count {
            let bone = self.snapshot.bones()[i];
            tree.set_world_position(bone.node, self.last_frame_positions[i]);
            if bone.is_root() {
                let mut local = tree.local_transform(bone.node);
                local.position = bone.rest_local_position;
                tree.set_local_transform(bone.node, local);
                continue;
            }

            let percentage = i as f32 / count as f32;
            let falloff = self.config.force_falloff.evaluate(percentage);
            let rate = JiggleSolver::blend_rate(falloff, self.config.damping, dt);
            JiggleSolver::blend_toward_rest(tree, &self.snapshot, i, rate);
            JiggleSolver::enforce_rest_length(tree, &self.snapshot, i);

            if let Some(colliders) = frame.colliders {
                self.resolve_collisions(tree, &bone, percentage, colliders);
            }
        }

        self.capture_last_frame(tree);
        StepOutcome::Simulated
    }

    fn resolve_collisions<T: TransformTree<Node = N>>(
        &self,
        tree: &mut T,
        bone: &Bone<N>,
        percentage: f32,
        colliders: &dyn CollisionQuery,
    ) {
        if !self.config.do_collision_checks {
            return;
        }
        let radius = self.collision_radius_at(percentage);
        let result = CollisionResolver::resolve_point(
            tree.world_position(bone.node),
            radius,
            colliders,
            self.config.collision_accuracy,
            self.config.collision_mode,
        );
        if result.steps > 0 {
            tree.set_world_position(bone.node, result.position);
        }
    }

    /// Puts every bone back at its captured local pose and restarts the
    /// implicit velocity from there.
    pub fn restore_rest_pose<T: TransformTree<Node = N>>(&mut self, tree: &mut T) {
        for bone in self.snapshot.bones() {
            let mut local = tree.local_transform(bone.node);
            local.position = bone.rest_local_position;
            local.rotation = bone.rest_local_rotation;
            tree.set_local_transform(bone.node, local);
        }
        self.capture_last_frame(tree);
    }

    /// Rest pose plus a fresh distance gate.
    pub fn reset<T: TransformTree<Node = N>>(&mut self, tree: &mut T) {
        self.gate = DistanceGate::new();
        self.restore_rest_pose(tree);
    }

    fn capture_last_frame<T: TransformTree<Node = N>>(&mut self, tree: &T) {
        self.last_frame_positions.clear();
        self.last_frame_positions
            .extend(self.snapshot.bones().iter().map(|b| tree.world_position(b.node)));
    }

    pub fn draw_gizmos<T: TransformTree<Node = N>>(&self, tree: &T, draw: &mut impl DebugDraw) {
        let count = self.snapshot.len();
        let bones = self.snapshot.bones();
        for (i, bone) in bones.iter().enumerate() {
            let position = tree.world_position(bone.node);
            if let Some(parent) = bone.parent {
                draw.line(tree.world_position(bones[parent].node), position, BONE_COLOR);
            }
            if self.config.do_collision_checks {
                let radius = self.collision_radius_at(i as f32 / count as f32);
                draw.wire_sphere(position, radius, COLLISION_COLOR);
            }
        }
    }
}

impl<N> JiggleChain<N> {
    /// Offsets the remembered position of bone `index`, which the next update
    /// starts from. Returns false when `index` is out of range.
    pub fn nudge(&mut self, index: usize, offset: Vec3) -> bool {
        match self.last_frame_positions.get_mut(index) {
            Some(position) => {
                *position += offset;
                true
            }
            None => false,
        }
    }

    pub fn collision_radius_at(&self, percentage: f32) -> f32 {
        self.config.collision_radius * self.config.collision_radius_distribution.evaluate(percentage)
    }

    pub fn config(&self) -> &JiggleConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: JiggleConfig) {
        self.config = config.sanitized();
    }

    pub fn set_distance_check_target(&mut self, target: Option<Vec3>) {
        self.config.distance_check_target = target;
    }

    pub fn gate_state(&self) -> GateState {
        self.gate.state()
    }

    pub fn snapshot(&self) -> &ChainSnapshot<N> {
        &self.snapshot
    }

    pub fn bones(&self) -> &[Bone<N>] {
        self.snapshot.bones()
    }

    pub fn last_frame_positions(&self) -> &[Vec3] {
        &self.last_frame_positions
    }

    pub fn len(&self) -> usize {
        self.snapshot.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }
}

pub struct JiggleChainBuilder<N> {
    root: N,
    config: JiggleConfig,
    wind_seed: u64,
}

impl<N: Copy + Eq> JiggleChainBuilder<N> {
    pub fn new(root: N) -> Self {
        Self {
            root,
            config: JiggleConfig::default(),
            wind_seed: WindContributor::DEFAULT_SEED,
        }
    }

    pub fn config(mut self, config: JiggleConfig) -> Self {
        self.config = config;
        self
    }

    pub fn wind_seed(mut self, seed: u64) -> Self {
        self.wind_seed = seed;
        self
    }

    pub fn build<T: TransformTree<Node = N>>(self, tree: &T) -> JiggleChain<N> {
        let snapshot = ChainSnapshot::capture(tree, self.root);
        debug!("jiggle chain captured with {} bones", snapshot.len());

        let mut chain = JiggleChain {
            last_frame_positions: Vec::with_capacity(snapshot.len()),
            snapshot,
            config: self.config.sanitized(),
            gate: DistanceGate::new(),
            wind: WindContributor::new(self.wind_seed),
        };
        chain.capture_last_frame(tree);
        chain
    }
}
