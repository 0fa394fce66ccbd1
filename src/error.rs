use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlaneError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlaneError {
    #[error("basis components must be finite and positive, got ({x}, {y})")]
    InvalidBasis { x: f64, y: f64 },

    #[error("window dimensions must be non-zero, got {width}x{height}")]
    InvalidWindowSize { width: u32, height: u32 },

    #[error("combining needs at least {required} vectors, {present} present")]
    NotEnoughVectors { required: usize, present: usize },
}
