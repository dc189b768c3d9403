use thiserror::Error;

/// Boxed error returned by an external [`Scaler`](crate::Scaler).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("image dimensions cannot be zero")]
    ZeroDimension,

    #[error(
        "region {width}x{height} at ({left}, {top}) is empty or outside the {image_width}x{image_height} image"
    )]
    InvalidRegion {
        left: usize,
        top: usize,
        width: usize,
        height: usize,
        image_width: usize,
        image_height: usize,
    },

    #[error("max_colors must be at least 1, got {0}")]
    InvalidMaxColors(u32),

    #[error("resize area {resize_area} requested but no scaler is configured")]
    MissingScaler { resize_area: u64 },

    #[error("invalid target {name:?}: {reason}")]
    InvalidTarget { name: String, reason: String },

    #[error(transparent)]
    Scale(BoxError),
}
