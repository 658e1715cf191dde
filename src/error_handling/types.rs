use std::fmt;

#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    TomlError(String),
    BadBindAddress(String),
    BadPort(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::TomlError(e) => write!(f, "TOML parsing error: {}", e),
            ConfigError::BadBindAddress(e) => write!(f, "Bind address error: {}", e),
            ConfigError::BadPort(e) => write!(f, "Port error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError(err)
    }
}

#[derive(Debug)]
pub enum CaptureError {
    SinkOpenFailed(std::io::Error),
    SinkWriteFailed(std::io::Error),
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::SinkOpenFailed(e) => write!(f, "Capture sink open failed: {}", e),
            CaptureError::SinkWriteFailed(e) => write!(f, "Capture sink write failed: {}", e),
        }
    }
}

impl std::error::Error for CaptureError {}

#[derive(Debug)]
pub enum WebError {
    BindError(std::io::Error),
    CaptureError(CaptureError),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebError::BindError(e) => write!(f, "Web server bind error: {}", e),
            WebError::CaptureError(e) => write!(f, "Capture error: {}", e),
        }
    }
}

impl std::error::Error for WebError {}

impl From<CaptureError> for WebError {
    fn from(err: CaptureError) -> Self {
        WebError::CaptureError(err)
    }
}
