//! UI layer: the eframe app shell and portrait textures.

pub mod app;
pub mod portraits;
pub mod theme;

pub use app::ElectionGuiApp;
