//! Ludorium -- host loop and application entry point.
//!
//! winit drives the event loop via `ApplicationHandler`. Scenes run inside
//! `RedrawRequested` on a fixed timestep (see `FrameClock`):
//!
//!   1. `begin_frame()` -- measure wall-clock delta, feed accumulator
//!   2. `while should_step()` -- sample input, update the active scene
//!   3. Record the active scene's draw commands into a `DrawList`
//!   4. Present the list plus the debug overlay through egui
//!
//! Configuration and the keymap are read before the window opens; a bad
//! file is fatal. Art is optional: missing atlas or resource files only
//! leave sprites unregistered.

mod config;
mod scenes;

use std::path::Path;
use std::process::ExitCode;
use std::rc::Rc;
use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use config::GameConfig;
use ludo_core::{AssetRegistry, DrawList, FrameClock, Input, KeyboardState, Keymap, SceneManager};
use ludo_devtools::{DebugOverlay, OverlayStats};
use ludo_render::{EguiLayer, GpuContext, ImageBanks, ScreenPainter};
use scenes::{Shared, TitleScene};

const CONFIG_PATH: &str = "config/game.json";
const KEYMAP_PATH: &str = "config/keymap.json";
const ATLAS_PATH: &str = "assets/atlas.csv";
const RESOURCES_PATH: &str = "assets/resources.json";
/// Letterbox colour around the virtual screen.
const BORDER_RGB: [u8; 3] = [0, 0, 0];

/// All per-window state. Constructed lazily in `ApplicationHandler::resumed`
/// once the window and GPU surface are available.
struct EngineState {
    window: Arc<Window>,
    gpu: GpuContext,
    egui: EguiLayer,
    painter: ScreenPainter,
    debug_overlay: DebugOverlay,

    keyboard: KeyboardState,
    input: Input,
    clock: FrameClock,
    scenes: SceneManager,
    draw_list: DrawList,
}

impl EngineState {
    fn new(window: Arc<Window>, content: &Content) -> Result<Self, String> {
        let gpu = GpuContext::new(window.clone(), content.config.gpu())?;
        let egui = EguiLayer::new(&gpu.device, gpu.surface_format, &window);
        let painter = ScreenPainter::new(content.shared.screen);

        let mut scenes = SceneManager::new();
        scenes
            .start(Box::new(TitleScene::new(Rc::clone(&content.shared))), None)
            .map_err(|e| format!("Failed to start title scene: {e}"))?;

        Ok(Self {
            window,
            gpu,
            egui,
            painter,
            debug_overlay: DebugOverlay::new(),
            keyboard: KeyboardState::new(),
            input: Input::new(content.keymap.clone()),
            clock: FrameClock::new(content.config.fps),
            scenes,
            draw_list: DrawList::new(),
        })
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, code: KeyCode, pressed: bool) {
        match (code, pressed) {
            (KeyCode::Escape, true) => {
                log::info!("Escape pressed, exiting.");
                event_loop.exit();
                return;
            }
            (KeyCode::F3, true) => self.debug_overlay.toggle(),
            _ => {}
        }

        let Some(raw) = ludo_platform::keys::raw_for_key_code(code) else {
            return;
        };
        if pressed {
            self.keyboard.key_down(raw);
        } else {
            self.keyboard.key_up(raw);
        }
    }

    fn step_and_render(&mut self, content: &Content) {
        self.clock.begin_frame();
        while self.clock.should_step() {
            self.input.update(&self.keyboard);
            self.scenes.update(&self.input, self.clock.fixed_dt);
        }

        self.draw_list.clear();
        self.scenes.draw(&mut self.draw_list);

        let stats = self.overlay_stats(&content.shared.assets);
        let painter = &mut self.painter;
        let overlay = &self.debug_overlay;
        let clock = &self.clock;
        let draw_list = &self.draw_list;
        let banks = &content.banks;
        let presented = self
            .egui
            .render(&self.gpu, &self.window, BORDER_RGB, |ctx| {
                painter.sync_banks(ctx, banks);
                painter.paint(ctx, draw_list);
                overlay.show(ctx, clock, &stats);
            });
        if !presented {
            log::debug!("Skipped frame {}: surface unavailable", self.clock.frame_count);
        }
    }

    fn overlay_stats(&self, assets: &AssetRegistry) -> OverlayStats {
        let mut pressed_buttons: Vec<String> = self
            .input
            .buttons()
            .filter(|name| self.input.pressed(name))
            .map(str::to_string)
            .collect();
        pressed_buttons.sort();
        let mut held_keys: Vec<&'static str> = self
            .keyboard
            .held()
            .filter_map(ludo_platform::keys::name_of)
            .collect();
        held_keys.sort_unstable();

        OverlayStats {
            active_scene: self.scenes.active_scene_name(),
            transitions: self.scenes.transition_count(),
            draw_commands: self.draw_list.len() as u32,
            sprite_count: self.draw_list.sprite_count() as u32,
            registered_sprites: assets.sprite_count() as u32,
            pressed_buttons,
            held_keys,
            tracked_keys: self.input.tracked_codes() as u32,
        }
    }
}

/// Everything read from disk before the window exists.
struct Content {
    config: GameConfig,
    keymap: Keymap,
    shared: Rc<Shared>,
    banks: ImageBanks,
}

fn load_content() -> Result<Content, String> {
    let config = config::load_config(Path::new(CONFIG_PATH))?;
    let keymap = config::load_keymap(Path::new(KEYMAP_PATH))?;
    let mut banks = ImageBanks::new();
    let assets = load_assets(Path::new(ATLAS_PATH), Path::new(RESOURCES_PATH), &mut banks)?;
    log::info!(
        "Loaded {} sprite(s), {} bank(s), {} button(s)",
        assets.sprite_count(),
        banks.bank_count(),
        keymap.len()
    );
    let shared = Rc::new(Shared {
        assets,
        screen: (config.width, config.height),
    });
    Ok(Content {
        config,
        keymap,
        shared,
        banks,
    })
}

/// Missing files are skipped with a warning; present but malformed files
/// are errors.
fn load_assets(
    atlas_path: &Path,
    resources_path: &Path,
    banks: &mut ImageBanks,
) -> Result<AssetRegistry, String> {
    let mut assets = AssetRegistry::new();

    if resources_path.exists() {
        assets
            .load_resources(resources_path, banks)
            .map_err(|e| e.to_string())?;
    } else {
        log::warn!(
            "Resource manifest '{}' was not found. Sprites will not be drawn.",
            resources_path.display()
        );
    }

    if atlas_path.exists() {
        assets.load_atlas(atlas_path).map_err(|e| e.to_string())?;
    } else {
        log::warn!(
            "Sprite atlas '{}' was not found. No sprites are registered.",
            atlas_path.display()
        );
    }

    Ok(assets)
}

struct App {
    content: Content,
    state: Option<EngineState>,
    fatal: Option<String>,
}

impl App {
    fn new(content: Content) -> Self {
        Self {
            content,
            state: None,
            fatal: None,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        let platform = self.content.config.platform();
        let state = ludo_platform::window::create_window(event_loop, &platform)
            .and_then(|window| EngineState::new(window, &self.content));
        match state {
            Ok(state) => {
                log::info!("Window created: {}x{}", platform.width, platform.height);
                self.state = Some(state);
            }
            Err(err) => {
                log::error!("Startup failed: {err}");
                self.fatal = Some(err);
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
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

        let egui_consumed = state.egui.handle_window_event(&state.window, &event);

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting.");
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    state.gpu.resize(size.width, size.height);
                    log::info!("Resized to {}x{}", size.width, size.height);
                }
            }

            WindowEvent::Focused(false) => state.keyboard.release_all(),

            WindowEvent::KeyboardInput { event, .. } if !egui_consumed => {
                if event.repeat {
                    return;
                }
                if let PhysicalKey::Code(code) = event.physical_key {
                    let pressed = event.state == ElementState::Pressed;
                    state.handle_key(event_loop, code, pressed);
                }
            }

            WindowEvent::RedrawRequested => state.step_and_render(&self.content),

            _ => {}
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Ludorium starting...");

    let content = match load_content() {
        Ok(content) => content,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(err) => {
            log::error!("Failed to create event loop: {err}");
            return ExitCode::FAILURE;
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(content);
    if let Err(err) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {err}");
        return ExitCode::FAILURE;
    }
    match app.fatal {
        Some(_) => ExitCode::FAILURE,
        None => ExitCode::SUCCESS,
    }
}
