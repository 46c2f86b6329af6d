//! Developer launcher: four buttons that run fixed external commands.
//!
//! `ludo_launcher <action>` runs one action without a window. Without an
//! action a small egui window is opened; when no display is available a
//! message is printed instead.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use ludo_devtools::launcher::{self, LauncherAction, Outcome, SystemRunner};
use ludo_platform::window::PlatformConfig;
use ludo_render::{EguiLayer, GpuContext, GpuOptions};

const GUI_UNAVAILABLE: &str = "GUI is unavailable: no display detected. \
Pass an action instead, e.g. `ludo_launcher run`.";

#[derive(Parser, Debug)]
#[command(name = "ludo_launcher", about = "Developer launcher for Ludorium")]
struct Cli {
    /// Run a single action without opening a window
    #[arg(value_enum)]
    action: Option<LauncherAction>,
}

struct LauncherState {
    window: Arc<Window>,
    gpu: GpuContext,
    egui: EguiLayer,
}

struct LauncherApp {
    config: PlatformConfig,
    state: Option<LauncherState>,
    status: String,
    fatal: Option<String>,
}

impl LauncherApp {
    fn new() -> Self {
        Self {
            config: PlatformConfig {
                title: "Ludorium Launcher".to_string(),
                width: 320,
                height: 180,
                scale: 1,
            },
            state: None,
            status: "Ready".to_string(),
            fatal: None,
        }
    }

    fn init_state(&self, event_loop: &ActiveEventLoop) -> Result<LauncherState, String> {
        let window = ludo_platform::window::create_window(event_loop, &self.config)?;
        let gpu = GpuContext::new(window.clone(), GpuOptions::tool())?;
        let egui = EguiLayer::new(&gpu.device, gpu.surface_format, &window);
        Ok(LauncherState { window, gpu, egui })
    }
}

impl ApplicationHandler for LauncherApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        match self.init_state(event_loop) {
            Ok(state) => self.state = Some(state),
            Err(err) => {
                log::error!("Launcher startup failed: {err}");
                self.fatal = Some(err);
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
        let Some(state) = self.state.as_mut() else {
            return;
        };
        state.egui.handle_window_event(&state.window, &event);

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                state.gpu.resize(size.width, size.height);
                state.window.request_redraw();
            }
            WindowEvent::RedrawRequested => {
                let mut clicked: Option<LauncherAction> = None;
                let status = self.status.as_str();
                state
                    .egui
                    .render(&state.gpu, &state.window, [24, 24, 32], |ctx| {
                        egui::CentralPanel::default().show(ctx, |ui| {
                            ui.heading("Ludorium");
                            ui.separator();
                            for &action in LauncherAction::ALL {
                                if ui.button(action.label()).clicked() {
                                    clicked = Some(action);
                                }
                            }
                            ui.separator();
                            ui.label(status);
                        });
                    });

                if let Some(action) = clicked {
                    let outcome = launcher::perform(action, &mut SystemRunner);
                    self.status = outcome.message(action);
                    state.window.request_redraw();
                }
            }
            _ => state.window.request_redraw(),
        }
    }
}

fn run_headless(action: LauncherAction) -> ExitCode {
    match launcher::perform(action, &mut SystemRunner) {
        Outcome::Exited(Some(0)) => ExitCode::SUCCESS,
        outcome @ Outcome::Exited(_) => {
            println!("{}", outcome.message(action));
            ExitCode::FAILURE
        }
        // Already reported by `perform`.
        Outcome::NotFound(_) | Outcome::Failed(_) => ExitCode::FAILURE,
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Some(action) = cli.action {
        return run_headless(action);
    }

    if !launcher::display_available() {
        println!("{GUI_UNAVAILABLE}");
        return ExitCode::SUCCESS;
    }

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(err) => {
            println!("GUI is unavailable: {err}");
            return ExitCode::SUCCESS;
        }
    };
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = LauncherApp::new();
    if let Err(err) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {err}");
        return ExitCode::FAILURE;
    }
    match app.fatal {
        Some(err) => {
            println!("Launcher failed: {err}");
            ExitCode::FAILURE
        }
        None => ExitCode::SUCCESS,
    }
}
