use glam::Vec3;
use jiggle_bone::{
    ColliderWorld, ConfigError, FrameContext, GizmoLines, Hierarchy, JiggleChain, JiggleConfig,
    Transform, TransformTree, WindSource, WindZone,
};
use log::info;

const FRAME_TIME: f32 = 1.0 / 60.0;
const FRAMES: u32 = 240;

fn load_config() -> Result<JiggleConfig, ConfigError> {
    match std::env::args().nth(1) {
        Some(path) => {
            info!("loading config from {}", path);
            JiggleConfig::load(path)
        }
        None => Ok(JiggleConfig::default().with_wind(1.0)),
    }
}

fn main() -> Result<(), ConfigError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = load_config()?;
    // The chain root is pinned to its parent, so the script moves the parent.
    let mut tree = Hierarchy::new();
    let anchor = tree.add_root("anchor", Transform::from_position(Vec3::new(0.0, 4.0, 0.0)));
    let mut parent = tree.add_child(anchor, "tail_0", Transform::IDENTITY);
    let root = parent;
    for i in 1..=6 {
        parent = tree.add_child(parent, format!("tail_{}", i), Transform::from_position(Vec3::NEG_Y * 0.5));
    }
    let mut chain = JiggleChain::new(&tree, root, config);

    let mut colliders = ColliderWorld::new();
    colliders.add_sphere(Vec3::new(0.6, 1.5, 0.0), 0.4);
    let breeze = WindZone::directional(Vec3::Z, 1.5)
        .with_turbulence(0.3)
        .with_pulse_frequency(0.5);
    let wind: [&dyn WindSource; 1] = [&breeze];

    let tip = chain.bones()[chain.len() - 1].node;
    for frame in 0..FRAMES {
        let time = frame as f32 * FRAME_TIME;

        let mut swing = tree.local_transform(anchor);
        swing.position.x = (time * 2.0).sin() * 1.5;
        tree.set_local_transform(anchor, swing);

        let context = FrameContext::new(FRAME_TIME, time)
            .with_colliders(&colliders)
            .with_wind(&wind);
        let outcome = chain.update(&mut tree, &context);

        if frame % 60 == 0 {
            info!(
                "frame {:>3} {:?}: tip at {:?}",
                frame,
                outcome,
                tree.world_position(tip)
            );
        }
    }

    let mut gizmos = GizmoLines::new();
    chain.draw_gizmos(&tree, &mut gizmos);
    info!(
        "final pose: {} gizmo segments, {} bytes of line vertices",
        gizmos.segment_count(),
        gizmos.as_bytes().len()
    );
    println!("tip resting at {:?}", tree.world_position(tip));

    Ok(())
}
