pub mod camera;
pub mod input;
pub mod preview;
pub mod terrain;
pub mod ui;
pub mod water;
