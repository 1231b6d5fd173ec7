use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::context::WgpuContext;
use crate::device::{GpuInit, GraphicsError, SurfaceErrorAction};
use crate::render::{self, CubeRenderer};

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "cubecast".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, draws the cube and blocks until the window closes.
    ///
    /// Returns the startup or surface error that ended the loop, if any.
    pub fn run(config: RuntimeConfig, gpu_init: GpuInit) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure {
            Some(err) => Err(err).context("cubecast stopped"),
            None => Ok(()),
        }
    }
}

/// Context + renderer, both bound to the window's surface lifetime.
struct Stage<'w> {
    ctx: WgpuContext<'w>,
    renderer: CubeRenderer<WgpuContext<'w>>,
}

impl<'w> Stage<'w> {
    fn launch(window: &'w Window, gpu_init: GpuInit) -> Result<Self, GraphicsError> {
        let (ctx, renderer) =
            render::launch(|| pollster::block_on(WgpuContext::acquire(window, gpu_init)))?;
        Ok(Self { ctx, renderer })
    }
}

/// What the event loop does next after a frame or resize.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum NextStep {
    /// Wait for the platform to ask for a redraw.
    Idle,
    /// Draw once more.
    Redraw,
    /// Stop with `GraphicsError::SurfaceFatal`.
    Exit,
}

fn after_frame(result: Result<(), SurfaceErrorAction>) -> NextStep {
    match result {
        Ok(()) | Err(SurfaceErrorAction::SkipFrame) => NextStep::Idle,
        Err(SurfaceErrorAction::Reconfigured) => NextStep::Redraw,
        Err(SurfaceErrorAction::Fatal) => NextStep::Exit,
    }
}

/// A deferred (0x0) resize leaves nothing to draw; the next real resize redraws.
fn after_resize(reconfigured: bool) -> NextStep {
    if reconfigured {
        NextStep::Redraw
    } else {
        NextStep::Idle
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[not_covariant]
    stage: Stage<'this>,
}

struct AppState {
    config: RuntimeConfig,
    gpu_init: GpuInit,

    entry: Option<WindowEntry>,
    failure: Option<GraphicsError>,
    exit_requested: bool,
}

impl AppState {
    fn new(config: RuntimeConfig, gpu_init: GpuInit) -> Self {
        Self {
            config,
            gpu_init,
            entry: None,
            failure: None,
            exit_requested: false,
        }
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: GraphicsError) {
        log::error!("{err}");
        self.failure = Some(err);
        self.entry = None;
        self.request_exit(event_loop);
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();

        let entry = WindowEntryTryBuilder {
            window,
            stage_builder: |w| Stage::launch(w, gpu_init),
        }
        .try_build()?;

        entry.with_window(|w| w.request_redraw());
        self.entry = Some(entry);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(entry) = self.entry.as_mut() else { return };

        let result = entry.with_mut(|fields| {
            fields.window.pre_present_notify();
            fields.stage.renderer.draw(&mut fields.stage.ctx)
        });

        if result.is_ok() {
            log::trace!("frame presented");
        }

        match after_frame(result) {
            NextStep::Idle => {}
            NextStep::Redraw => entry.with_window(|w| w.request_redraw()),
            NextStep::Exit => self.fail(event_loop, GraphicsError::SurfaceFatal),
        }
    }

    fn resize(&mut self) {
        let Some(entry) = self.entry.as_mut() else { return };

        entry.with_mut(|fields| {
            let size = fields.window.inner_size();
            let stage = fields.stage;
            let reconfigured = stage.ctx.resize(size);
            if reconfigured {
                stage.renderer.resize(&mut stage.ctx, size.width, size.height);
                log::debug!("resized to {}x{}", size.width, size.height);
            } else {
                log::debug!("resize to {}x{} deferred", size.width, size.height);
            }

            if after_resize(reconfigured) == NextStep::Redraw {
                fields.window.request_redraw();
            }
        });
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.exit_requested {
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // No window means no drawing surface: same outcome as a missing GPU.
        if let Err(e) = self.create_window_entry(event_loop) {
            let err = e
                .downcast::<GraphicsError>()
                .unwrap_or_else(|other| GraphicsError::unavailable(&other));
            self.fail(event_loop, err);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(entry) = self.entry.as_ref() else { return };
        if entry.with_window(|w| w.id()) != window_id {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                self.entry = None;
                self.request_exit(event_loop);
            }
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => self.resize(),
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}
