#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Input Error: the point is behind the camera at depth {depth}")]
    BehindCamera { depth: f32 },

    #[error(
        "Input Error: the length of {name} should be {target}, but got {length}"
    )]
    InvalidBufferLength {
        name: &'static str,
        length: usize,
        target: usize,
    },

    #[error("Input Error: {name} should be non-negative and countable, but got ({value})")]
    InvalidDimension { name: &'static str, value: String },

    #[error("Input Error: the frame size should be non-zero, but got {0}x{1}")]
    InvalidFrameSize(u32, u32),

    #[error("Input Error: {0}")]
    InvalidTexture(String),

    #[error(
        "Input Error: the triangle index {index} should be less than {count}"
    )]
    InvalidTriangleIndex { index: i64, count: usize },

    #[error("Input Error: the vertex index {index} should be less than {count}")]
    InvalidVertexIndex { index: u32, count: usize },

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error(
        "Bound Error: the pixel ({x}, {y}) is outside of the {width}x{height} buffer"
    )]
    OutOfBounds {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
    },

    #[error("Matrix Error: the determinant {determinant} is too close to zero")]
    SingularMatrix { determinant: f32 },
}

impl Error {
    /// Returns `true` if the error is caused by invalid input.
    pub const fn is_input_invalid(&self) -> bool {
        matches!(
            self,
            Self::InvalidBufferLength { .. }
                | Self::InvalidDimension { .. }
                | Self::InvalidFrameSize(..)
                | Self::InvalidTexture(..)
                | Self::InvalidTriangleIndex { .. }
                | Self::InvalidVertexIndex { .. }
        )
    }
}
