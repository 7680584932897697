//! Error types
//!
//! The simulation itself never fails; errors only come from loading tuning
//! documents and from bringing up the GPU surface.

use thiserror::Error;

/// A tuning document could not be used
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning document: {0}")]
    Io(#[from] std::io::Error),

    #[error("tuning document is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("`{field}` must be greater than zero (got {value})")]
    NonPositive { field: &'static str, value: f64 },

    #[error("`{field}` must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("invader fire chance must be within [0, 1] (got {0})")]
    ChanceOutOfRange(f64),

    #[error("pace threshold must be within (0, 1] (got {0})")]
    ThresholdOutOfRange(f32),

    #[error("pace factor must be at least 1.0 (got {0})")]
    PaceFactorTooLow(f32),

    #[error("`{field}` must be at least one")]
    EmptyLayout { field: &'static str },

    #[error("{what} would hold more than {max} entities")]
    LayoutTooLarge { what: &'static str, max: u64 },
}

/// The WebGPU surface could not be brought up
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,
}
