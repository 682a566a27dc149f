use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("map is empty")]
    Empty,

    #[error("map has {found} cells, expected {expected}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("map of {width}x{height} cells is too large")]
    TooLarge { width: usize, height: usize },

    #[error("invalid map cell {ch:?} at index {index}")]
    InvalidCell { ch: char, index: usize },

    #[error("map row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("map has no empty cell to start in")]
    NoEmptyCell,

    #[error("failed to read map file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("failed to load wall image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("wall texture must be square, got {width}x{height}")]
    NotSquare { width: u32, height: u32 },

    #[error("wall texture buffer has {found} bytes, expected {expected}")]
    BufferSize { expected: usize, found: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },

    #[error("field of view must be within (0, 180) degrees, got {0}")]
    FieldOfView(f32),
}

/// Fatal failures; any of these ends the process with a non-zero status.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Map(#[from] MapError),

    #[error(transparent)]
    Texture(#[from] TextureError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("event loop failed: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("frame surface failed: {0}")]
    Surface(#[from] softbuffer::SoftBufferError),
}
