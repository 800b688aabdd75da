pub type Result<T> = std::result::Result<T, FractalError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FractalError {
    #[error("invalid dimension {width}x{height}: width and height must be positive")]
    InvalidDimension { width: u32, height: u32 },

    #[error("coordinate ({x}, {y}) is outside the {width}x{height} grid")]
    InvalidCoordinate {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("batch size must be positive")]
    InvalidBatchSize,

    #[error("maximum order must be positive")]
    InvalidMaxOrder,
}
