//! WebGPU rendering module
//!
//! The scene is rebuilt as a flat-colored triangle list every frame.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
