mod game;
mod title;

pub use game::GameScene;
pub use title::TitleScene;

use ludo_core::AssetRegistry;

/// Read-only state every scene can see. Built once at startup.
#[derive(Debug)]
pub struct Shared {
    pub assets: AssetRegistry,
    pub screen: (u32, u32),
}

/// Logical button that advances between title and game.
pub const START: &str = "START";
