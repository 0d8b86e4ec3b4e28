use anyhow::Result;
use clap::Parser;
use latticeview_camera::OrbitCamera;
use latticeview_picking::{Ray, pick_marker};
use latticeview_render_wgpu::{GpuContext, Viewport, WgpuRenderer};
use latticeview_scene::{SceneSet, spawn_random_cubes};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

/// Cursor travel (pixels) below which a left press-release counts as a
/// click instead of a rotate drag.
const CLICK_SLOP: f64 = 4.0;

#[derive(Parser)]
#[command(name = "latticeview", about = "Wireframe cubes with clickable vertex markers")]
struct Cli {
    /// Number of cubes to generate
    #[arg(short = 'n', long, default_value = "8")]
    cubes: u32,

    /// RNG seed for a reproducible scene
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Drag {
    None,
    Rotate,
    Pan,
}

struct App {
    scene: SceneSet,
    camera: OrbitCamera,
    viewport: Viewport,
    drag: Drag,
    cursor: Option<PhysicalPosition<f64>>,
    drag_travel: f64,
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    renderer: Option<WgpuRenderer>,
}

impl App {
    fn new(scene: SceneSet) -> Self {
        Self {
            scene,
            camera: OrbitCamera::default(),
            viewport: Viewport::new(1, 1),
            drag: Drag::None,
            cursor: None,
            drag_travel: 0.0,
            window: None,
            gpu: None,
            renderer: None,
        }
    }

    fn handle_cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        if let Some(last) = self.cursor {
            let dx = (position.x - last.x) as f32;
            let dy = (position.y - last.y) as f32;
            match self.drag {
                Drag::Rotate => {
                    self.camera.rotate(dx, dy);
                    self.drag_travel += f64::from(dx.hypot(dy));
                }
                Drag::Pan => self.camera.pan(dx, dy),
                Drag::None => {}
            }
        }
        self.cursor = Some(position);
    }

    fn handle_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        match (button, state) {
            (MouseButton::Left, ElementState::Pressed) => {
                self.drag = Drag::Rotate;
                self.drag_travel = 0.0;
            }
            (MouseButton::Left, ElementState::Released) => {
                if self.drag == Drag::Rotate && self.drag_travel < CLICK_SLOP {
                    self.pick_at_cursor();
                }
                self.drag = Drag::None;
            }
            (MouseButton::Right, ElementState::Pressed) => {
                self.drag = Drag::Pan;
            }
            (MouseButton::Right, ElementState::Released) => {
                if self.drag == Drag::Pan {
                    self.drag = Drag::None;
                }
            }
            _ => {}
        }
    }

    fn handle_scroll(&mut self, delta: MouseScrollDelta) {
        let lines = match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(pos) => (pos.y / 120.0) as f32,
        };
        self.camera.zoom(lines);
    }

    /// Cast a ray through the cursor and highlight the nearest hit marker.
    fn pick_at_cursor(&mut self) {
        let Some(cursor) = self.cursor else {
            return;
        };
        let ray = Ray::from_screen(
            &self.camera,
            cursor.x as f32,
            cursor.y as f32,
            self.viewport.width() as f32,
            self.viewport.height() as f32,
        );
        if let Some(hit) = pick_marker(&ray, &self.scene) {
            if self.scene.highlight_marker(hit.marker) {
                tracing::debug!(distance = hit.distance, "vertex picked");
            }
        }
    }

    /// Match the backing buffer to the window's current pixel size before
    /// drawing, so the image tracks viewport and scale-factor changes.
    fn resize_if_needed(&mut self) {
        let Some(window) = &self.window else {
            return;
        };
        let size = window.inner_size();
        if !self.viewport.apply(size.width, size.height) {
            return;
        }
        if let Some(gpu) = &mut self.gpu {
            gpu.resize(self.viewport.width(), self.viewport.height());
            if let Some(renderer) = &mut self.renderer {
                renderer.resize(&gpu.device, self.viewport.width(), self.viewport.height());
            }
        }
        self.camera.set_aspect(self.viewport.aspect());
    }

    fn redraw(&mut self) {
        self.resize_if_needed();

        let (Some(gpu), Some(renderer)) = (&self.gpu, &self.renderer) else {
            return;
        };

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        renderer.render(&gpu.device, &gpu.queue, &view, &self.camera, &self.scene);

        output.present();
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Latticeview")
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        let window = Arc::new(event_loop.create_window(attrs).expect("create window"));

        let gpu = pollster::block_on(GpuContext::new(window.clone())).expect("initialize GPU");

        let size = window.inner_size();
        self.viewport = Viewport::new(size.width, size.height);
        self.camera.set_aspect(self.viewport.aspect());

        let renderer = WgpuRenderer::new(
            &gpu.device,
            gpu.config.format,
            self.viewport.width(),
            self.viewport.height(),
        );

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.renderer = Some(renderer);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.handle_cursor_moved(position);
            }
            WindowEvent::MouseInput { button, state, .. } => {
                self.handle_mouse_button(button, state);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.handle_scroll(delta);
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!(cubes = cli.cubes, "latticeview starting");

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut scene = SceneSet::new();
    spawn_random_cubes(&mut scene, cli.cubes, &mut rng);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(scene);
    event_loop.run_app(&mut app)?;

    Ok(())
}
