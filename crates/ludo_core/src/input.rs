//! Logical button input with per-frame edge detection.
//!
//! Two layers:
//!
//! - **`KeyboardState`** tracks which physical keys are down right now. The
//!   host feeds it from window events (`key_down` / `key_up`) at any time
//!   during a frame.
//!
//! - **`Input`** maps logical button names ("START", "LEFT", ...) onto raw key
//!   codes and samples a `KeySource` once per frame in `update()`. The previous
//!   sample is kept, so `triggered` / `released` report transitions between two
//!   consecutive `update` calls.
//!
//! `update()` must run exactly once per frame before any query for that frame,
//! otherwise edges are stale.

use std::collections::{HashMap, HashSet};

/// Integer identifier of a physical key.
pub type RawKey = u32;

/// Logical button name → raw key codes.
pub type Keymap = HashMap<String, Vec<RawKey>>;

/// Per-key boolean polling.
pub trait KeySource {
    fn is_down(&self, code: RawKey) -> bool;
}

impl<F: Fn(RawKey) -> bool> KeySource for F {
    fn is_down(&self, code: RawKey) -> bool {
        self(code)
    }
}

/// Level state of physical keys, fed by the windowing layer.
#[derive(Debug, Default, Clone)]
pub struct KeyboardState {
    held: HashSet<RawKey>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, code: RawKey) {
        self.held.insert(code);
    }

    pub fn key_up(&mut self, code: RawKey) {
        self.held.remove(&code);
    }

    /// Drops every held key, e.g. when the window loses focus and release
    /// events will never arrive.
    pub fn release_all(&mut self) {
        if !self.held.is_empty() {
            log::debug!("Releasing {} held key(s)", self.held.len());
        }
        self.held.clear();
    }

    pub fn held(&self) -> impl Iterator<Item = RawKey> + '_ {
        self.held.iter().copied()
    }
}

impl KeySource for KeyboardState {
    fn is_down(&self, code: RawKey) -> bool {
        self.held.contains(&code)
    }
}

pub struct Input {
    keymap: Keymap,
    current: HashMap<RawKey, bool>,
    previous: HashMap<RawKey, bool>,
}

impl Input {
    pub fn new(keymap: Keymap) -> Self {
        let codes: HashSet<RawKey> = keymap.values().flatten().copied().collect();
        let current: HashMap<RawKey, bool> = codes.iter().map(|&code| (code, false)).collect();
        let previous = current.clone();
        log::debug!(
            "Input tracking {} raw key(s) for {} button(s)",
            current.len(),
            keymap.len()
        );
        Self {
            keymap,
            current,
            previous,
        }
    }

    /// Shifts current → previous for every tracked code, then re-polls.
    pub fn update(&mut self, source: &dyn KeySource) {
        for (code, down) in self.current.iter_mut() {
            self.previous.insert(*code, *down);
            *down = source.is_down(*code);
        }
    }

    /// Any mapped key is down this frame.
    pub fn pressed(&self, name: &str) -> bool {
        self.codes(name).iter().any(|code| self.is_current(*code))
    }

    /// Any mapped key is down this frame and was up last frame.
    pub fn triggered(&self, name: &str) -> bool {
        self.codes(name)
            .iter()
            .any(|code| self.is_current(*code) && !self.is_previous(*code))
    }

    /// Any mapped key is up this frame and was down last frame.
    pub fn released(&self, name: &str) -> bool {
        self.codes(name)
            .iter()
            .any(|code| !self.is_current(*code) && self.is_previous(*code))
    }

    /// Logical button names known to this keymap, in no particular order.
    pub fn buttons(&self) -> impl Iterator<Item = &str> {
        self.keymap.keys().map(String::as_str)
    }

    pub fn tracked_codes(&self) -> usize {
        self.current.len()
    }

    fn codes(&self, name: &str) -> &[RawKey] {
        self.keymap.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    fn is_current(&self, code: RawKey) -> bool {
        self.current.get(&code).copied().unwrap_or(false)
    }

    fn is_previous(&self, code: RawKey) -> bool {
        self.previous.get(&code).copied().unwrap_or(false)
    }
}
