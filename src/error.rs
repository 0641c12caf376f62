use thiserror::Error;

/// Errors surfaced by the renderer. Widget and scene code never fails:
/// positions and sizes are clamped into range instead of rejected.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to create rendering surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter found")]
    AdapterNotFound,

    #[error("failed to acquire GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}
