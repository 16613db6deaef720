/// Result alias that carries the custom [`DashboardError`] type.
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Fallback text shown when a failure carries no server message.
pub const UNKNOWN_ERROR: &str = "Error desconocido";

/// Prefix of every user-visible error indicator.
pub const WARNING_PREFIX: &str = "⚠️ ";

/// Common error type for the core crate.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// The request could not be sent or its body could not be read.
    #[error("transport failure: {0}")]
    Transport(String),
    /// The backend answered with `ok == false`.
    #[error("backend reported failure: {}", .0.as_deref().unwrap_or(UNKNOWN_ERROR))]
    Application(Option<String>),
    /// The response did not match the expected schema.
    #[error("malformed response: {0}")]
    Decode(String),
    /// The trigger for this pipeline variant is disabled.
    #[error("a {0} run is already in progress")]
    AlreadyRunning(&'static str),
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl DashboardError {
    /// Text for the error indicator. Only a non-empty server message is shown
    /// verbatim; every other failure falls back to [`UNKNOWN_ERROR`].
    pub fn user_message(&self) -> String {
        let detail = match self {
            Self::Application(Some(message)) if !message.is_empty() => message.as_str(),
            _ => UNKNOWN_ERROR,
        };
        format!("{WARNING_PREFIX}{detail}")
    }
}

impl From<reqwest::Error> for DashboardError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value.to_string())
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_is_prefixed() {
        let err = DashboardError::Application(Some("bad n".to_string()));
        assert_eq!(err.user_message(), "⚠️ bad n");
    }

    #[test]
    fn missing_or_empty_message_falls_back() {
        assert_eq!(
            DashboardError::Application(None).user_message(),
            "⚠️ Error desconocido"
        );
        assert_eq!(
            DashboardError::Application(Some(String::new())).user_message(),
            "⚠️ Error desconocido"
        );
        assert_eq!(
            DashboardError::Transport("connection refused".into()).user_message(),
            "⚠️ Error desconocido"
        );
    }
}
