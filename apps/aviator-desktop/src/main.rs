mod panel_ui;

use anyhow::Result;
use aviator_input::InputEvent;
use aviator_kernel::{FrameScheduler, Game, GameConfig};
use aviator_render_wgpu::{GpuSurface, SurfaceFrame};
use aviator_scene::Viewport;
use aviator_tools::ControlPanel;
use clap::Parser;
use egui::Context as EguiContext;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "aviator-desktop", about = "Fly the aviator scene in a window")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML config file
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Frames are pulled by the platform: requesting one schedules a redraw.
struct RedrawScheduler {
    window: Arc<Window>,
}

impl FrameScheduler for RedrawScheduler {
    fn request_frame(&mut self) {
        self.window.request_redraw();
    }

    fn next_frame(&mut self) -> bool {
        true
    }
}

/// Everything that exists only once the window is up.
struct Running {
    window: Arc<Window>,
    gpu: GpuSurface,
    game: Game,
    scheduler: RedrawScheduler,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

struct App {
    config: GameConfig,
    panel: ControlPanel,
    show_panel: bool,
    egui_ctx: EguiContext,
    running: Option<Running>,
}

impl App {
    fn new(config: GameConfig) -> Self {
        Self {
            config,
            panel: ControlPanel::lights(),
            show_panel: true,
            egui_ctx: EguiContext::default(),
            running: None,
        }
    }

    fn start(&self, event_loop: &ActiveEventLoop) -> Result<Running> {
        let attrs = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(PhysicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));
        let window = Arc::new(event_loop.create_window(attrs)?);
        let size = window.inner_size();

        let gpu = pollster::block_on(GpuSurface::new(
            window.clone(),
            size.width,
            size.height,
            self.config.shadow_map_size,
        ))?;

        let game = Game::new(Viewport::new(size.width, size.height), &self.config)?;

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(gpu.device(), gpu.format(), None, 1, false);

        Ok(Running {
            scheduler: RedrawScheduler {
                window: window.clone(),
            },
            window,
            gpu,
            game,
            egui_winit,
            egui_renderer,
        })
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, key: KeyCode) {
        match key {
            KeyCode::F1 => {
                self.show_panel = !self.show_panel;
                tracing::debug!(visible = self.show_panel, "panel toggled");
            }
            KeyCode::Escape => event_loop.exit(),
            _ => {}
        }
    }

    fn redraw(&mut self) {
        let Some(run) = &mut self.running else {
            return;
        };
        let Some(frame) = run.game.frame(&mut run.gpu, &mut run.scheduler) else {
            return;
        };
        if self.show_panel {
            draw_panel(&self.egui_ctx, &self.panel, run, &frame);
        }
        frame.present();
    }
}

/// Run the egui pass on top of the rendered scene.
fn draw_panel(ctx: &EguiContext, panel: &ControlPanel, run: &mut Running, frame: &SurfaceFrame) {
    let raw_input = run.egui_winit.take_egui_input(&run.window);
    let full_output = ctx.run(raw_input, |ctx| {
        panel_ui::show(ctx, panel, &mut run.game);
    });
    run.egui_winit
        .handle_platform_output(&run.window, full_output.platform_output);

    let paint_jobs = ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
    let (width, height) = run.gpu.size();
    let screen_descriptor = egui_wgpu::ScreenDescriptor {
        size_in_pixels: [width, height],
        pixels_per_point: full_output.pixels_per_point,
    };

    let device = run.gpu.device();
    let queue = run.gpu.queue();
    for (id, image_delta) in &full_output.textures_delta.set {
        run.egui_renderer
            .update_texture(device, queue, *id, image_delta);
    }
    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("egui_encoder"),
    });
    run.egui_renderer.update_buffers(
        device,
        queue,
        &mut encoder,
        &paint_jobs,
        &screen_descriptor,
    );
    {
        let mut pass = encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            })
            .forget_lifetime();
        run.egui_renderer
            .render(&mut pass, &paint_jobs, &screen_descriptor);
    }
    queue.submit(std::iter::once(encoder.finish()));
    for id in &full_output.textures_delta.free {
        run.egui_renderer.free_texture(id);
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }
        match self.start(event_loop) {
            Ok(running) => {
                // bootstrap frame; every later one is requested by the previous
                running.window.request_redraw();
                self.running = Some(running);
            }
            Err(e) => {
                tracing::error!("startup failed: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(run) = &mut self.running else {
            return;
        };
        if self.show_panel {
            let response = run.egui_winit.on_window_event(&run.window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                run.game.handle(
                    InputEvent::Resized {
                        width: size.width,
                        height: size.height,
                    },
                    &mut run.gpu,
                );
            }
            WindowEvent::CursorMoved { position, .. } => {
                run.game.handle(
                    InputEvent::PointerMoved {
                        x: position.x,
                        y: position.y,
                    },
                    &mut run.gpu,
                );
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
            } => self.handle_key(event_loop, key),
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    let config = GameConfig::load_or_default(cli.config.as_deref())?;
    tracing::info!(title = %config.window.title, "aviator-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    Ok(())
}
