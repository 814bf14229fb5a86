use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum SwipeError {
    /// The controller cannot be built from the supplied configuration.
    InvalidConfiguration { reason: &'static str, value: f32 },
}

impl fmt::Display for SwipeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwipeError::InvalidConfiguration { reason, value } => {
                write!(f, "invalid swipe configuration: {reason} (got {value})")
            }
        }
    }
}

impl std::error::Error for SwipeError {}
