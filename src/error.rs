use std::path::PathBuf;

/// Errors raised while building the renderer, map, textures or level.
///
/// None of these can occur once the frame loop is running.
#[derive(thiserror::Error, Debug)]
pub enum SetupError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to load image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("malformed map: {0}")]
    MalformedMap(String),

    #[error("invalid texture: {0}")]
    InvalidTexture(String),

    #[error("invalid render config: {0}")]
    InvalidConfig(String),

    #[error("invalid level: {0}")]
    InvalidLevel(String),
}

pub type SetupResult<T> = Result<T, SetupError>;
