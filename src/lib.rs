pub mod physics;
pub mod rendering;
pub mod settings;
