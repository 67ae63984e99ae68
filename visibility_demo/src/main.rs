//! Headless culling demo.
//!
//! Scatters renderables along a corridor, walks a viewer down it and prints
//! what each tick of the culling controller did.

use glam::{Mat4, Vec3};
use std::sync::Arc;
use std::time::Duration;
use visibility_engine::engine_info;
use visibility_engine::visibility::camera::DEFAULT_FOV_Y;
use visibility_engine::visibility::log::{DefaultLogger, LogSeverity};
use visibility_engine::visibility::scene::{ObjectCategory, AABB};
use visibility_engine::visibility::{
    CullingController, CullingSettings, Engine, RenderFlag, Result, TrackedObjectDesc,
    ViewerState,
};

const OBJECT_COUNT: usize = 64;
const FRAME_COUNT: usize = 40;
const CORRIDOR_LENGTH: f32 = 400.0;

fn main() -> Result<()> {
    Engine::set_logger(DefaultLogger::with_min_severity(LogSeverity::Debug));

    let settings = CullingSettings {
        max_time_budget: Duration::from_micros(200),
        frames_between_updates: 1,
        ..CullingSettings::default()
    };
    let mut controller = CullingController::new(settings)?;

    let flags = populate(&mut controller)?;
    controller.start();

    let projection = Mat4::perspective_rh(DEFAULT_FOV_Y, 16.0 / 9.0, 0.1, 1000.0);

    for frame in 0..FRAME_COUNT {
        let z = -(frame as f32) * CORRIDOR_LENGTH / FRAME_COUNT as f32;
        let position = Vec3::new(0.0, 1.7, z);
        let view = Mat4::look_to_rh(position, Vec3::NEG_Z, Vec3::Y);
        let viewer = ViewerState::from_view_projection(
            position,
            &(projection * view),
            DEFAULT_FOV_Y,
        );

        let report = controller.tick(&viewer);
        let visible = flags.iter().filter(|flag| flag.is_visible()).count();
        println!(
            "frame {:>3}  z {:>7.1}  evaluated {:>3}  shown {:>3}  hidden {:>3}  deferred {:>3}{}  visible {:>3}/{}",
            frame,
            z,
            report.evaluated,
            report.shown,
            report.hidden,
            report.deferred,
            if report.budget_exceeded { "*" } else { " " },
            visible,
            flags.len(),
        );
    }

    // Switch culling off: every hidden object comes back on the next tick
    let mut settings = controller.settings_copy();
    settings.enable_object_culling = false;
    controller.set_settings(settings)?;
    let report = controller.tick(&ViewerState::default());
    engine_info!("visibility_demo", "Culling disabled, {} objects restored", report.restored);

    controller.stop();
    let visible = flags.iter().filter(|flag| flag.is_visible()).count();
    engine_info!("visibility_demo", "Stopped with {}/{} objects visible", visible, flags.len());

    Ok(())
}

/// Register a mix of small props, lamps and large walls along the corridor.
fn populate(controller: &mut CullingController) -> Result<Vec<Arc<RenderFlag>>> {
    let mut flags = Vec::with_capacity(OBJECT_COUNT);

    for i in 0..OBJECT_COUNT {
        let z = -(i as f32) * CORRIDOR_LENGTH / OBJECT_COUNT as f32;
        let side = if i % 2 == 0 { -4.0 } else { 4.0 };
        let flag = RenderFlag::shared();

        let desc = match i % 8 {
            0 => TrackedObjectDesc::new(&flag, AABB::from_center_size(Vec3::ZERO, Vec3::new(1.0, 12.0, 20.0)))
                .with_category(ObjectCategory::OPAQUE),
            3 => TrackedObjectDesc::new(&flag, AABB::from_center_size(Vec3::ZERO, Vec3::splat(0.5)))
                .with_category(ObjectCategory::EMISSIVE),
            5 => TrackedObjectDesc::new(&flag, AABB::unit())
                .with_category(ObjectCategory::OPAQUE | ObjectCategory::ANIMATED),
            _ => TrackedObjectDesc::new(&flag, AABB::unit()),
        };

        controller
            .tracker_mut()
            .add(desc.with_world_matrix(Mat4::from_translation(Vec3::new(side, 0.5, z))))?;
        flags.push(flag);
    }

    engine_info!("visibility_demo", "Registered {} objects", flags.len());
    Ok(flags)
}
