//! Startup configuration: `config/game.json` and `config/keymap.json`.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use ludo_core::Keymap;
use ludo_platform::window::PlatformConfig;
use ludo_render::GpuOptions;

#[derive(Debug, Deserialize, Clone)]
pub struct GameConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    #[serde(default = "default_display_scale")]
    pub display_scale: u32,
    #[serde(default = "default_vsync")]
    pub vsync: bool,
}

impl GameConfig {
    pub fn platform(&self) -> PlatformConfig {
        PlatformConfig {
            title: self.title.clone(),
            width: self.width,
            height: self.height,
            scale: self.display_scale,
        }
    }

    pub fn gpu(&self) -> GpuOptions {
        GpuOptions {
            vsync: self.vsync,
            ..GpuOptions::default()
        }
    }
}

pub fn load_config(path: &Path) -> Result<GameConfig, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    let config: GameConfig = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &GameConfig) -> Result<(), String> {
    if config.width == 0 || config.height == 0 {
        return Err("Config validation failed: width/height must be > 0".to_string());
    }
    if config.fps == 0 {
        return Err("Config validation failed: fps must be > 0".to_string());
    }
    if config.display_scale == 0 {
        return Err("Config validation failed: display_scale must be > 0".to_string());
    }
    Ok(())
}

/// Reads logical button → symbolic key names and resolves each symbol
/// through the platform key table. Unknown symbols are dropped.
pub fn load_keymap(path: &Path) -> Result<Keymap, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read keymap {}: {e}", path.display()))?;
    let symbolic: HashMap<String, Vec<String>> = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse keymap {}: {e}", path.display()))?;
    Ok(resolve_keymap(symbolic))
}

fn resolve_keymap(symbolic: HashMap<String, Vec<String>>) -> Keymap {
    symbolic
        .into_iter()
        .map(|(button, symbols)| {
            let codes = symbols
                .iter()
                .filter_map(|symbol| {
                    let code = ludo_platform::keys::resolve(symbol);
                    if code.is_none() {
                        log::debug!("Keymap '{button}': dropping unknown key '{symbol}'");
                    }
                    code
                })
                .collect();
            (button, codes)
        })
        .collect()
}

const fn default_display_scale() -> u32 {
    4
}

const fn default_vsync() -> bool {
    true
}
