use thiserror::Error;

/// Everything that can go wrong between the screens and the Contact Manager API.
#[derive(Debug, Error)]
pub enum Error {
    /// No session, or the server refused the bearer token.
    #[error("Not logged in")]
    Unauthenticated,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("{}", rejected_message(.status, .message))]
    ServerRejected { status: u16, message: Option<String> },

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Page {requested} is out of range ({total_pages} pages)")]
    OutOfRange { requested: u32, total_pages: u32 },

    #[error("Unsupported page size {0}")]
    InvalidPageSize(usize),

    #[error("Contact {0} is not on the current page")]
    UnknownContact(crate::api::models::ContactId),

    #[error("Invalid input: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

fn rejected_message(status: &u16, message: &Option<String>) -> String {
    match message {
        Some(m) => format!("HTTP {status}: {m}"),
        None => format!("HTTP {status}"),
    }
}

impl Error {
    /// Whether the caller should drop the session and go back to the login screen.
    pub fn requires_login(&self) -> bool {
        matches!(self, Error::Unauthenticated)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout
        } else if err.is_decode() {
            Error::Decode(err.to_string())
        } else {
            Error::Network(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::Config(format!("invalid API URL: {err}"))
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_errors_render_the_server_message() {
        let err = Error::ServerRejected { status: 409, message: Some("Email already exists".into()) };
        assert_eq!(err.to_string(), "HTTP 409: Email already exists");
        let err = Error::ServerRejected { status: 500, message: None };
        assert_eq!(err.to_string(), "HTTP 500");
    }

    #[test]
    fn only_unauthenticated_requires_login() {
        assert!(Error::Unauthenticated.requires_login());
        assert!(!Error::Timeout.requires_login());
        assert!(!Error::ServerRejected { status: 403, message: None }.requires_login());
    }
}
