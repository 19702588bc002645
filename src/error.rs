#[derive(thiserror::Error, Debug)]
pub enum ScreenError {
    #[error("Failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("Failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("No suitable gpu adapter found")]
    NoSuitableAdapter,
    #[error("Failed to request device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("Surface is not supported by the adapter")]
    UnsupportedSurface,
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorError {
    #[error("Color channel {channel} out of range: {value}")]
    ChannelOutOfRange { channel: usize, value: i32 },
}
