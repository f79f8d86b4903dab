#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    InvalidConfiguration(&'static str),
}

impl std::fmt::Display for MapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapError::InvalidConfiguration(msg) => write!(f, "invalid map configuration: {}", msg),
        }
    }
}

impl std::error::Error for MapError {}
