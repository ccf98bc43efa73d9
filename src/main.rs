use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use orbitcam::scene::load_scene;
use orbitcam::{Attachment, InputBus, OrbitCameraController, OrbitConfig, Scene, WinitInput};

/// Near clipping plane handed to the renderer uniform
const NEAR: f64 = 0.1;
/// Far clipping plane handed to the renderer uniform
const FAR: f64 = 1000.0;

#[derive(Parser, Debug)]
#[command(name = "orbitcam")]
#[command(about = "Orbit camera viewer for named bounding boxes")]
struct Args {
    /// Scene file with one `name min_x min_y min_z max_x max_y max_z` per line
    scene: Option<PathBuf>,

    /// Name of the object to view first
    #[arg(long)]
    object: Option<String>,

    /// Vertical field of view in degrees
    #[arg(long, default_value = "45.0")]
    fov: f64,

    /// Closest camera distance
    #[arg(long, default_value = "1.0")]
    min_zoom: f64,

    /// Farthest camera distance
    #[arg(long, default_value = "40.0")]
    max_zoom: f64,

    /// Distance used to frame zero-size objects, within the zoom range
    #[arg(long, default_value = "12.0")]
    fallback_distance: f64,

    /// Margin multiplier when framing an object
    #[arg(long, default_value = "1.5")]
    padding: f64,

    /// Drag sensitivity in radians per pixel
    #[arg(long, default_value = "0.01")]
    rotate_speed: f64,

    /// Wheel sensitivity in distance units per wheel unit
    #[arg(long, default_value = "0.01")]
    zoom_speed: f64,
}

impl Args {
    fn config(&self) -> OrbitConfig {
        OrbitConfig::default()
            .with_vertical_fov_degrees(self.fov)
            .with_zoom_range(self.min_zoom, self.max_zoom)
            .with_fallback_distance(self.fallback_distance)
            .with_padding_factor(self.padding)
            .with_rotate_speed(self.rotate_speed)
            .with_zoom_speed(self.zoom_speed)
    }
}

struct App {
    window: Option<Arc<Window>>,
    controller: Rc<RefCell<OrbitCameraController>>,
    bus: InputBus,
    input: WinitInput,
    attachment: Option<Attachment>,
    scene: Scene,
    /// Whether the last framing covered every object
    framed_all: bool,
}

impl App {
    fn fov(&self) -> f64 {
        self.controller.borrow().config().vertical_fov()
    }

    fn frame_current(&mut self) {
        let fov = self.fov();
        let object = self.scene.current().name.clone();
        let framing = self.controller.borrow_mut().frame_scene(&self.scene, fov);
        log::info!("viewing '{}' from distance {:.2}", object, framing.radius);
        self.framed_all = false;
    }

    fn frame_all(&mut self) {
        let fov = self.fov();
        let bounds = self.scene.total_bounds();
        let framing = self.controller.borrow_mut().frame(&bounds, fov);
        log::info!("viewing all objects from distance {:.2}", framing.radius);
        self.framed_all = true;
    }

    fn request_redraw(&self) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }

    fn handle_key(&mut self, key: KeyCode, event_loop: &ActiveEventLoop) {
        match key {
            KeyCode::Escape => event_loop.exit(),
            KeyCode::KeyN | KeyCode::Tab => {
                self.scene.select_next();
                self.frame_current();
            }
            KeyCode::KeyP => {
                self.scene.select_previous();
                self.frame_current();
            }
            KeyCode::KeyF => self.frame_current(),
            KeyCode::KeyA => self.frame_all(),
            KeyCode::KeyR => self.controller.borrow_mut().reset_view(),
            _ => return,
        }
        self.request_redraw();
    }

    fn redraw(&self) {
        let controller = self.controller.borrow();
        let camera = controller.current_camera_state(self.fov());
        let uniform = camera.to_uniform(controller.viewport().aspect(), NEAR, FAR);
        let orbit = controller.spherical();

        log::debug!("camera uniform eye {:?}", uniform.eye());
        let viewing = if self.framed_all {
            "all objects".to_string()
        } else {
            format!(
                "{} ({}/{})",
                self.scene.current().name,
                self.scene.current_index() + 1,
                self.scene.objects().len()
            )
        };
        if let Some(ref window) = self.window {
            window.set_title(&format!(
                "orbitcam - {} | r {:.2} az {:.1}° polar {:.1}°",
                viewing,
                orbit.radius,
                orbit.azimuth_display().to_degrees(),
                orbit.polar.to_degrees(),
            ));
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes().with_title("orbitcam");
        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("cannot create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.controller
            .borrow_mut()
            .on_resize(size.width, size.height);
        self.window = Some(window);

        if self.attachment.is_none() {
            self.attachment = Some(OrbitCameraController::attach(
                &self.controller,
                &mut self.bus,
            ));
        }
        self.frame_current();
        self.request_redraw();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                if let Some(attachment) = self.attachment.take() {
                    OrbitCameraController::detach(&self.controller, &mut self.bus, attachment);
                }
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => self.handle_key(key, event_loop),
            WindowEvent::RedrawRequested => self.redraw(),
            other => {
                if let Some(input) = self.input.translate(&other) {
                    self.bus.emit(&input);
                    self.request_redraw();
                }
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = args.config();
    let controller = OrbitCameraController::new(config).context("invalid camera settings")?;

    let mut scene = match args.scene {
        Some(ref path) => load_scene(path)
            .with_context(|| format!("cannot load scene {}", path.display()))?,
        None => Scene::demo(),
    };
    log::info!(
        "loaded {} objects: {}",
        scene.objects().len(),
        scene
            .objects()
            .iter()
            .map(|o| o.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    if let Some(ref name) = args.object {
        if !scene.select(name) {
            anyhow::bail!("scene has no object named '{}'", name);
        }
    }

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App {
        window: None,
        controller: Rc::new(RefCell::new(controller)),
        bus: InputBus::new(),
        input: WinitInput::new(),
        attachment: None,
        scene,
        framed_all: false,
    };

    event_loop.run_app(&mut app)?;

    Ok(())
}
