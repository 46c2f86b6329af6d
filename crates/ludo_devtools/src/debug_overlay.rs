//! In-game debug window, toggled by F3.
//!
//! Drawn through the game's `EguiLayer` after the screen painter, so it sits
//! on top of the scene. UI logic only runs while `visible` is true.

use ludo_core::FrameClock;

#[derive(Debug, Clone, Default)]
pub struct OverlayStats {
    pub active_scene: Option<&'static str>,
    pub transitions: u64,
    pub draw_commands: u32,
    pub sprite_count: u32,
    pub registered_sprites: u32,
    /// Logical buttons held this frame, sorted.
    pub pressed_buttons: Vec<String>,
    /// Symbolic names of physical keys currently down, sorted.
    pub held_keys: Vec<&'static str>,
    /// Raw codes the keymap listens to.
    pub tracked_keys: u32,
}

#[derive(Debug, Default)]
pub struct DebugOverlay {
    pub visible: bool,
}

impl DebugOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
        log::info!("Debug overlay: {}", if self.visible { "ON" } else { "OFF" });
    }

    pub fn show(&self, ctx: &egui::Context, clock: &FrameClock, stats: &OverlayStats) {
        if !self.visible {
            return;
        }
        egui::Window::new("Debug")
            .default_pos([10.0, 10.0])
            .show(ctx, |ui| {
                ui.label(format!("FPS: {:.1}", clock.smoothed_fps));
                ui.label(format!("Frame time: {:.2} ms", clock.smoothed_frame_time_ms));
                ui.label(format!("Steps this frame: {}", clock.steps_this_frame));
                ui.label(format!("Total steps: {}", clock.step_count));
                ui.label(format!("Frame: {}", clock.frame_count));
                ui.separator();
                ui.label(format!(
                    "Scene: {}",
                    stats.active_scene.unwrap_or("(none)")
                ));
                ui.label(format!("Transitions: {}", stats.transitions));
                ui.label(format!("Draw commands: {}", stats.draw_commands));
                ui.label(format!(
                    "Sprites: {} drawn / {} registered",
                    stats.sprite_count, stats.registered_sprites
                ));
                ui.separator();
                ui.label(format!("Buttons: {}", pressed_label(&stats.pressed_buttons)));
                ui.label(keys_label(&stats.held_keys, stats.tracked_keys));
            });
    }
}

fn pressed_label(buttons: &[String]) -> String {
    if buttons.is_empty() {
        "-".to_string()
    } else {
        buttons.join(" ")
    }
}

fn keys_label(held: &[&str], tracked: u32) -> String {
    if held.is_empty() {
        format!("Keys: - ({tracked} tracked)")
    } else {
        format!("Keys: {} ({tracked} tracked)", held.join(" "))
    }
}
