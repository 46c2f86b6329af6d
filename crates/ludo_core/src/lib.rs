pub mod assets;
pub mod canvas;
pub mod input;
pub mod scene;
pub mod time;

pub use assets::{AssetError, AssetRegistry, BankLoader, SpriteUv, TilemapInfo};
pub use canvas::{Canvas, DrawCommand, DrawList};
pub use input::{Input, KeySource, KeyboardState, Keymap, RawKey};
pub use scene::{Scene, SceneContext, SceneData, SceneError, SceneManager, Transition};
pub use time::FrameClock;
