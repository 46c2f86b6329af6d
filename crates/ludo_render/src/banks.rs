//! Image banks loaded from a resource manifest.
//!
//! The manifest is JSON: `{ "images": ["images/bank0.png", ...] }`. Paths are
//! relative to the manifest's directory and entry `i` becomes bank `i`. A
//! load replaces every bank at once, or none if any image fails.

use image::RgbaImage;
use ludo_core::BankLoader;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct ResourceManifest {
    images: Vec<String>,
}

#[derive(Debug, Default)]
pub struct ImageBanks {
    banks: Vec<RgbaImage>,
    generation: u64,
}

impl ImageBanks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bank(&self, index: u32) -> Option<&RgbaImage> {
        self.banks.get(index as usize)
    }

    pub fn bank_count(&self) -> usize {
        self.banks.len()
    }

    /// Bumped on every successful load so texture caches know to rebuild.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl BankLoader for ImageBanks {
    fn load(&mut self, path: &Path) -> Result<(), String> {
        let raw = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read resource manifest {}: {e}", path.display()))?;
        let manifest: ResourceManifest = serde_json::from_str(&raw)
            .map_err(|e| format!("Failed to parse resource manifest {}: {e}", path.display()))?;
        if manifest.images.is_empty() {
            return Err(format!(
                "Resource manifest {} lists no images",
                path.display()
            ));
        }

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        let mut banks = Vec::with_capacity(manifest.images.len());
        for (index, image_path) in manifest.images.iter().enumerate() {
            let full = base.join(image_path);
            let image = image::open(&full)
                .map_err(|e| format!("Failed to decode bank {index} ({}): {e}", full.display()))?
                .to_rgba8();
            if image.width() == 0 || image.height() == 0 {
                return Err(format!("Bank {index} ({}) is empty", full.display()));
            }
            log::debug!(
                "Bank {index}: {} ({}x{})",
                full.display(),
                image.width(),
                image.height()
            );
            banks.push(image);
        }

        self.banks = banks;
        self.generation += 1;
        Ok(())
    }
}
