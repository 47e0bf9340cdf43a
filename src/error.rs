pub type FramefitResult<T> = Result<T, FramefitError>;

#[derive(thiserror::Error, Debug)]
pub enum FramefitError {
    #[error("config error: {0}")]
    Config(String),

    #[error("registry error: {0}")]
    Registry(String),

    #[error("no device profile for platform '{platform}' at {width}x{height}")]
    NoProfile {
        platform: String,
        width: u32,
        height: u32,
    },

    #[error("decode error: {0}")]
    Decode(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FramefitError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn registry(msg: impl Into<String>) -> Self {
        Self::Registry(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}
