//! Error types for the fireworks field.
//!
//! Everything here is a setup-time failure: loading configuration, creating
//! the window and GPU presenter, or handing the simulator an unusable
//! surface. The per-frame paths (`tick`, `spawn_burst`) never fail.

use std::io;
use thiserror::Error;

/// Errors that can occur during GPU initialization.
#[derive(Debug, Error)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    #[error("Failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),

    /// No compatible GPU adapter found.
    #[error("No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support.")]
    NoAdapter,

    /// Failed to create GPU device.
    #[error("Failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),

    /// The surface reports no texture format to render into.
    #[error("GPU surface supports no texture formats")]
    NoSurfaceFormat,

    /// Presenting a frame failed in a way reconfiguring cannot fix.
    #[error("Failed to present frame: {0}")]
    Present(#[from] wgpu::SurfaceError),
}

/// Errors produced while setting up or running the fireworks field.
#[derive(Debug, Error)]
pub enum Error {
    /// The drawing surface has no area to draw on.
    #[error("Drawing surface is {width}x{height}; both dimensions must be non-zero")]
    ZeroSizedSurface { width: u32, height: u32 },

    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration JSON could not be parsed or written.
    #[error("Configuration JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Encoding a snapshot image failed.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Failed to create or run the event loop.
    #[error("Failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// Failed to create the window.
    #[error("Failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    /// GPU initialization failed.
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
