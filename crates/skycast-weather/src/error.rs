//! Provider failure taxonomy shared by every HTTP client.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("Location not found")]
    NotFound,

    #[error("Invalid API credentials")]
    Unauthorized,

    #[error("Request timed out")]
    Timeout,

    #[error("Transport error ({}): {message}", status_label(.status))]
    Transport {
        status: Option<u16>,
        message: String,
    },

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Request superseded by a newer location")]
    Cancelled,
}

impl ProviderError {
    /// Classify a non-2xx HTTP status.
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        match status {
            404 => Self::NotFound,
            401 => Self::Unauthorized,
            _ => Self::Transport {
                status: Some(status),
                message: body.into(),
            },
        }
    }

    /// Short message for the location field and failure notification.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::NotFound => "City not found",
            Self::Unauthorized => "Invalid API key",
            Self::Timeout => "The request timed out. Please try again.",
            Self::Transport { status: Some(s), .. } if *s >= 500 => {
                "Weather service is unavailable. Please try again later."
            }
            Self::Transport { .. } => "Could not load weather data.",
            Self::Malformed(_) => "Received an unexpected response from the weather service.",
            Self::Cancelled => "Request superseded.",
        }
    }
}

fn status_label(status: &Option<u16>) -> String {
    match status {
        Some(s) => format!("HTTP {}", s),
        None => "no status".to_string(),
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_decode() {
            Self::Malformed(e.to_string())
        } else if let Some(status) = e.status() {
            Self::from_status(status.as_u16(), e.to_string())
        } else {
            Self::Transport {
                status: None,
                message: e.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(e: serde_json::Error) -> Self {
        Self::Malformed(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(ProviderError::from_status(404, ""), ProviderError::NotFound);
        assert_eq!(ProviderError::from_status(401, ""), ProviderError::Unauthorized);
        assert!(matches!(
            ProviderError::from_status(500, "boom"),
            ProviderError::Transport { status: Some(500), .. }
        ));
        assert!(matches!(
            ProviderError::from_status(403, ""),
            ProviderError::Transport { status: Some(403), .. }
        ));
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(ProviderError::NotFound.user_message(), "City not found");
    }

    #[test]
    fn test_timeout_distinct_from_not_found() {
        assert_ne!(
            ProviderError::Timeout.user_message(),
            ProviderError::NotFound.user_message()
        );
    }

    #[test]
    fn test_display_includes_status() {
        let err = ProviderError::from_status(503, "maintenance");
        assert!(err.to_string().contains("503"));
        let err = ProviderError::Transport {
            status: None,
            message: "connection refused".into(),
        };
        assert!(err.to_string().contains("no status"));
    }

    #[test]
    fn test_json_error_is_malformed() {
        let err: ProviderError = serde_json::from_str::<u8>("\"x\"").unwrap_err().into();
        assert!(matches!(err, ProviderError::Malformed(_)));
    }
}
