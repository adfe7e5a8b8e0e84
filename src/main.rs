//! Demo binary: orbit a pair of boxes in a plain window.
//!
//! Usage: `vantage [PRESET.toml]`. Camera state is logged at debug level
//! (`RUST_LOG=vantage=debug`).

use glam::{Mat4, Vec3};
use vantage::{
    options::Options, ActiveCamera, Aabb, Renderer, SceneNode, Viewer,
};

/// Frames between camera log lines.
const LOG_EVERY: u64 = 120;

/// Logs the live camera instead of drawing.
struct CameraLogger {
    frames: u64,
    since_log: u64,
}

impl Renderer for CameraLogger {
    fn render(&mut self, camera: &ActiveCamera<'_>, scene: &SceneNode) {
        self.frames += 1;
        self.since_log += 1;
        if self.since_log < LOG_EVERY {
            return;
        }
        self.since_log = 0;
        let transform = camera.transform();
        log::debug!(
            "frame {}: {:?} eye {:.2} target {:.2} zoom {:.3} ({} nodes)",
            self.frames,
            camera.mode(),
            transform.position,
            transform.target,
            camera.zoom(),
            scene.draw_count()
        );
    }

    fn resize(&mut self, width: u32, height: u32) {
        log::debug!("surface {width}x{height}");
    }
}

fn demo_scene() -> SceneNode {
    let unit = Aabb::new(Vec3::splat(-1.0), Vec3::ONE);
    let at = |x: f32| unit.transformed(&Mat4::from_translation(Vec3::X * x));
    SceneNode::Group {
        name: "demo".into(),
        transform: Mat4::from_rotation_y(0.3),
        children: vec![
            SceneNode::mesh("left", at(-2.0)),
            SceneNode::mesh("right", at(2.0)),
        ],
    }
}

fn main() {
    env_logger::init();

    let options = match std::env::args().nth(1) {
        Some(path) => match Options::load(std::path::Path::new(&path)) {
            Ok(options) => options,
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        },
        None => Options::default(),
    };

    let result = Viewer::builder()
        .with_options(options)
        .with_scene(demo_scene())
        .with_renderer(CameraLogger {
            frames: 0,
            since_log: 0,
        })
        .build()
        .run();

    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}
