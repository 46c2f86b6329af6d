pub mod debug_overlay;
pub mod launcher;

pub use debug_overlay::{DebugOverlay, OverlayStats};
pub use launcher::{perform, CommandRunner, LauncherAction, Outcome, SystemRunner};
