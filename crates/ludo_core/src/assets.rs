//! Name → sprite / tilemap lookup tables.
//!
//! Sprites are rectangles inside an image bank owned by the presentation
//! layer; tilemaps are (bank, index) pairs. Names are unique per table and the
//! last registration wins. Bulk sprite definitions come from a header-less CSV
//! atlas with rows `name,bank,u,v,w,h`.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteUv {
    pub bank: u32,
    pub u: i32,
    pub v: i32,
    pub w: i32,
    pub h: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilemapInfo {
    pub bank: u32,
    pub index: u32,
}

#[derive(Debug)]
pub enum AssetError {
    UnknownSprite(String),
    UnknownTilemap(String),
    /// Malformed atlas row; `line` is 1-based.
    Atlas {
        line: usize,
        reason: String,
    },
    Io {
        path: String,
        source: std::io::Error,
    },
    /// Failure reported by the resource bank loader.
    Resource(String),
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSprite(name) => write!(f, "unknown sprite '{name}'"),
            Self::UnknownTilemap(name) => write!(f, "unknown tilemap '{name}'"),
            Self::Atlas { line, reason } => write!(f, "atlas line {line}: {reason}"),
            Self::Io { path, source } => write!(f, "failed to read {path}: {source}"),
            Self::Resource(reason) => write!(f, "resource load failed: {reason}"),
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Populates the presentation layer's image/tilemap banks from a resource
/// file. Bank indices stored in the registry are only meaningful after this
/// has succeeded.
pub trait BankLoader {
    fn load(&mut self, path: &Path) -> Result<(), String>;
}

#[derive(Debug, Default, Clone)]
pub struct AssetRegistry {
    sprites: HashMap<String, SpriteUv>,
    tilemaps: HashMap<String, TilemapInfo>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_resources(
        &mut self,
        path: &Path,
        loader: &mut dyn BankLoader,
    ) -> Result<(), AssetError> {
        loader.load(path).map_err(AssetError::Resource)?;
        log::info!("Loaded resource banks from {}", path.display());
        Ok(())
    }

    pub fn register_sprite(&mut self, name: &str, bank: u32, u: i32, v: i32, w: i32, h: i32) {
        let entry = SpriteUv { bank, u, v, w, h };
        if self.sprites.insert(name.to_string(), entry).is_some() {
            log::debug!("Sprite '{name}' re-registered");
        }
    }

    pub fn sprite_uv(&self, name: &str) -> Result<SpriteUv, AssetError> {
        self.sprites
            .get(name)
            .copied()
            .ok_or_else(|| AssetError::UnknownSprite(name.to_string()))
    }

    pub fn register_tilemap(&mut self, name: &str, bank: u32, index: u32) {
        self.tilemaps
            .insert(name.to_string(), TilemapInfo { bank, index });
    }

    pub fn tilemap_info(&self, name: &str) -> Result<TilemapInfo, AssetError> {
        self.tilemaps
            .get(name)
            .copied()
            .ok_or_else(|| AssetError::UnknownTilemap(name.to_string()))
    }

    /// Registers one sprite per CSV record and returns how many were
    /// registered. Fields may be quoted; blank lines are skipped.
    ///
    /// Aborts on the first malformed record. Records before it stay
    /// registered.
    pub fn load_atlas(&mut self, path: &Path) -> Result<usize, AssetError> {
        let raw = fs::read_to_string(path).map_err(|source| AssetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let count = self.load_atlas_str(&raw)?;
        log::info!("Atlas {}: {} sprite(s)", path.display(), count);
        Ok(count)
    }

    pub fn load_atlas_str(&mut self, raw: &str) -> Result<usize, AssetError> {
        let mut count = 0;
        for (i, line) in raw.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let (name, bank, u, v, w, h) = read_csv_record(line)
                .and_then(|record| parse_atlas_record(&record))
                .map_err(|reason| AssetError::Atlas {
                    line: i + 1,
                    reason,
                })?;
            self.register_sprite(&name, bank, u, v, w, h);
            count += 1;
        }
        Ok(count)
    }

    pub fn sprite_count(&self) -> usize {
        self.sprites.len()
    }

    pub fn tilemap_count(&self) -> usize {
        self.tilemaps.len()
    }

    pub fn sprite_names(&self) -> impl Iterator<Item = &str> {
        self.sprites.keys().map(String::as_str)
    }
}

/// One atlas line as CSV fields, quotes removed and whitespace trimmed.
fn read_csv_record(line: &str) -> Result<csv::StringRecord, String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(line.as_bytes());
    let mut record = csv::StringRecord::new();
    match reader.read_record(&mut record) {
        Ok(true) => Ok(record),
        Ok(false) => Err("empty record".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

fn parse_atlas_record(
    record: &csv::StringRecord,
) -> Result<(String, u32, i32, i32, i32, i32), String> {
    let parts: Vec<&str> = record.iter().collect();
    if parts.len() != 6 {
        return Err(format!("expected 6 fields, found {}", parts.len()));
    }
    let name = parts[0];
    if name.is_empty() {
        return Err("sprite name is empty".to_string());
    }
    let bank = parts[1]
        .parse::<u32>()
        .map_err(|e| format!("bank '{}': {e}", parts[1]))?;
    let mut coords = [0i32; 4];
    for (slot, (label, field)) in coords
        .iter_mut()
        .zip(["u", "v", "w", "h"].iter().zip(&parts[2..]))
    {
        *slot = field
            .parse::<i32>()
            .map_err(|e| format!("{label} '{field}': {e}"))?;
    }
    let [u, v, w, h] = coords;
    Ok((name.to_string(), bank, u, v, w, h))
}
