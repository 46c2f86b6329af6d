pub mod banks;
pub mod egui_layer;
pub mod gpu_context;
pub mod screen;

pub use banks::ImageBanks;
pub use egui_layer::EguiLayer;
pub use gpu_context::{GpuContext, GpuOptions};
pub use screen::{ScreenPainter, ScreenTransform};
