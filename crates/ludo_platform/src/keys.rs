//! Symbolic key names used by `config/keymap.json`.
//!
//! Each entry ties a name (`"KEY_SPACE"`) to the raw code the input layer
//! tracks and to the winit physical key that produces it. Raw codes follow
//! the SDL keycode layout: printable keys use their ASCII value, the rest
//! carry the `0x4000_0000` scancode mask.

use ludo_core::RawKey;
use winit::keyboard::KeyCode;

const MASK: RawKey = 0x4000_0000;

pub struct KeyEntry {
    pub name: &'static str,
    pub raw: RawKey,
    pub code: KeyCode,
}

const fn key(name: &'static str, raw: RawKey, code: KeyCode) -> KeyEntry {
    KeyEntry { name, raw, code }
}

pub static KEY_TABLE: &[KeyEntry] = &[
    key("KEY_BACKSPACE", 8, KeyCode::Backspace),
    key("KEY_TAB", 9, KeyCode::Tab),
    key("KEY_RETURN", 13, KeyCode::Enter),
    key("KEY_ESCAPE", 27, KeyCode::Escape),
    key("KEY_SPACE", 32, KeyCode::Space),
    key("KEY_0", 48, KeyCode::Digit0),
    key("KEY_1", 49, KeyCode::Digit1),
    key("KEY_2", 50, KeyCode::Digit2),
    key("KEY_3", 51, KeyCode::Digit3),
    key("KEY_4", 52, KeyCode::Digit4),
    key("KEY_5", 53, KeyCode::Digit5),
    key("KEY_6", 54, KeyCode::Digit6),
    key("KEY_7", 55, KeyCode::Digit7),
    key("KEY_8", 56, KeyCode::Digit8),
    key("KEY_9", 57, KeyCode::Digit9),
    key("KEY_A", 97, KeyCode::KeyA),
    key("KEY_B", 98, KeyCode::KeyB),
    key("KEY_C", 99, KeyCode::KeyC),
    key("KEY_D", 100, KeyCode::KeyD),
    key("KEY_E", 101, KeyCode::KeyE),
    key("KEY_F", 102, KeyCode::KeyF),
    key("KEY_G", 103, KeyCode::KeyG),
    key("KEY_H", 104, KeyCode::KeyH),
    key("KEY_I", 105, KeyCode::KeyI),
    key("KEY_J", 106, KeyCode::KeyJ),
    key("KEY_K", 107, KeyCode::KeyK),
    key("KEY_L", 108, KeyCode::KeyL),
    key("KEY_M", 109, KeyCode::KeyM),
    key("KEY_N", 110, KeyCode::KeyN),
    key("KEY_O", 111, KeyCode::KeyO),
    key("KEY_P", 112, KeyCode::KeyP),
    key("KEY_Q", 113, KeyCode::KeyQ),
    key("KEY_R", 114, KeyCode::KeyR),
    key("KEY_S", 115, KeyCode::KeyS),
    key("KEY_T", 116, KeyCode::KeyT),
    key("KEY_U", 117, KeyCode::KeyU),
    key("KEY_V", 118, KeyCode::KeyV),
    key("KEY_W", 119, KeyCode::KeyW),
    key("KEY_X", 120, KeyCode::KeyX),
    key("KEY_Y", 121, KeyCode::KeyY),
    key("KEY_Z", 122, KeyCode::KeyZ),
    key("KEY_F1", MASK | 0x3a, KeyCode::F1),
    key("KEY_F2", MASK | 0x3b, KeyCode::F2),
    key("KEY_F3", MASK | 0x3c, KeyCode::F3),
    key("KEY_F4", MASK | 0x3d, KeyCode::F4),
    key("KEY_F5", MASK | 0x3e, KeyCode::F5),
    key("KEY_F6", MASK | 0x3f, KeyCode::F6),
    key("KEY_F7", MASK | 0x40, KeyCode::F7),
    key("KEY_F8", MASK | 0x41, KeyCode::F8),
    key("KEY_F9", MASK | 0x42, KeyCode::F9),
    key("KEY_F10", MASK | 0x43, KeyCode::F10),
    key("KEY_F11", MASK | 0x44, KeyCode::F11),
    key("KEY_F12", MASK | 0x45, KeyCode::F12),
    key("KEY_RIGHT", MASK | 0x4f, KeyCode::ArrowRight),
    key("KEY_LEFT", MASK | 0x50, KeyCode::ArrowLeft),
    key("KEY_DOWN", MASK | 0x51, KeyCode::ArrowDown),
    key("KEY_UP", MASK | 0x52, KeyCode::ArrowUp),
    key("KEY_LCTRL", MASK | 0xe0, KeyCode::ControlLeft),
    key("KEY_LSHIFT", MASK | 0xe1, KeyCode::ShiftLeft),
    key("KEY_LALT", MASK | 0xe2, KeyCode::AltLeft),
    key("KEY_RCTRL", MASK | 0xe4, KeyCode::ControlRight),
    key("KEY_RSHIFT", MASK | 0xe5, KeyCode::ShiftRight),
    key("KEY_RALT", MASK | 0xe6, KeyCode::AltRight),
];

/// Raw code for a symbolic name, `None` when the name is not in the table.
pub fn resolve(name: &str) -> Option<RawKey> {
    KEY_TABLE.iter().find(|k| k.name == name).map(|k| k.raw)
}

pub fn raw_for_key_code(code: KeyCode) -> Option<RawKey> {
    KEY_TABLE.iter().find(|k| k.code == code).map(|k| k.raw)
}

pub fn name_of(raw: RawKey) -> Option<&'static str> {
    KEY_TABLE.iter().find(|k| k.raw == raw).map(|k| k.name)
}
