//! Plastikwelt: a point cloud that morphs through a timeline of plastic-pollution findings.

mod config;
mod overlay;

use anyhow::Result;
use assets::{AssetLoader, FileAssetLoader};
use engine_core::FrameClock;
use morph::{MorphController, TimelineAssets};
use overlay::TitleOverlay;
use rand::rngs::StdRng;
use rand::SeedableRng;
use renderer::{OrbitCamera, RenderOptions, Renderer};
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

const TITLE: &str = "Plastikwelt";

/// Everything that exists once the window is up.
struct ViewerState {
    window: Arc<Window>,
    renderer: Renderer,
    controller: MorphController<TitleOverlay>,
    camera: OrbitCamera,
    clock: FrameClock,
}

impl ViewerState {
    async fn new(window: Arc<Window>, config: &config::ViewerConfig, assets: TimelineAssets) -> Result<Self> {
        let renderer = Renderer::new(
            window.clone(),
            RenderOptions {
                vsync: config.vsync,
                point_size: config.point_size,
                point_capacity: config.morph.point_count,
            },
        )
        .await?;

        let (width, height) = renderer.dimensions();
        let mut camera = OrbitCamera::default();
        camera.set_aspect(width, height);

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut controller =
            MorphController::with_rng(assets, config.morph.clone(), TitleOverlay::new(TITLE), rng);
        controller.show_initial_cloud();

        Ok(Self {
            window,
            renderer,
            controller,
            camera,
            clock: FrameClock::new(),
        })
    }

    /// Returns true when the app should exit.
    fn handle_window_event(&mut self, event: WindowEvent) -> bool {
        match event {
            WindowEvent::CloseRequested => return true,
            WindowEvent::Resized(size) => {
                self.renderer.resize(size);
                self.camera.set_aspect(size.width, size.height);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                if code == KeyCode::Escape {
                    return true;
                }
                self.controller.on_key(code);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.controller.on_wheel(input::scroll_to_pixels(delta));
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.frame() {
                    log::error!("Render failed: {}", e);
                    return true;
                }
                self.window.request_redraw();
            }
            _ => {}
        }
        false
    }

    fn frame(&mut self) -> Result<()> {
        self.clock.update();
        self.controller.tick(self.clock.delta_seconds());
        self.camera.advance();

        if let Some(title) = self.controller.presenter_mut().take_title() {
            self.window.set_title(title);
        }
        if let Some(points) = self.controller.points_mut() {
            self.renderer.upload_points(points);
        }
        self.renderer.update_camera(&self.camera);

        match self.renderer.render() {
            Ok(()) => Ok(()),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.renderer.resize(self.window.inner_size());
                Ok(())
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Surface timeout, skipping frame");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Application handler for winit.
struct App {
    config: config::ViewerConfig,
    /// Handed to the controller when the window is created.
    assets: Option<TimelineAssets>,
    state: Option<ViewerState>,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        let Some(assets) = self.assets.take() else {
            return;
        };

        let window_attrs = Window::default_attributes()
            .with_title(TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window_width,
                self.config.window_height,
            ));
        let window = match event_loop.create_window(window_attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        match pollster::block_on(ViewerState::new(window.clone(), &self.config, assets)) {
            Ok(s) => {
                self.state = Some(s);
                window.request_redraw();
            }
            Err(e) => {
                log::error!("Failed to initialize viewer: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(state) = &mut self.state {
            if state.handle_window_event(event) {
                event_loop.exit();
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = config::ViewerConfig::load();
    log::info!("Starting {} ({} points)", TITLE, config.morph.point_count);

    let loader = FileAssetLoader::new(&config.timeline_path, &config.models_dir);
    let assets = loader.load()?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App {
        config,
        assets: Some(assets),
        state: None,
    };
    event_loop.run_app(&mut app)?;

    Ok(())
}
