use axum::http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CepError {
    #[error("Upstream request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Failed to decode upstream payload: {0}")]
    DecodeError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML config: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid upstream URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing 'cep' query parameter")]
    MissingCep,

    #[error("Timeout reached after {timeout_ms}ms")]
    Timeout { timeout_ms: u128 },
}

impl CepError {
    /// Status code the HTTP layer answers with when this error reaches a client.
    pub fn status_code(&self) -> StatusCode {
        match self {
            CepError::MissingCep => StatusCode::BAD_REQUEST,
            CepError::Timeout { .. } => StatusCode::REQUEST_TIMEOUT,
            CepError::HttpError(_) | CepError::DecodeError(_) | CepError::UrlError(_) => {
                StatusCode::BAD_GATEWAY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Body text sent to clients. Timeouts keep a fixed message so callers can match on it.
    pub fn client_message(&self) -> String {
        match self {
            CepError::Timeout { .. } => "Timeout reached".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CepError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(CepError::MissingCep.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            CepError::Timeout { timeout_ms: 1000 }.status_code(),
            StatusCode::REQUEST_TIMEOUT
        );
        assert_eq!(
            CepError::IoError(std::io::Error::other("disk")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_client_messages() {
        assert_eq!(
            CepError::MissingCep.client_message(),
            "Missing 'cep' query parameter"
        );
        assert_eq!(
            CepError::Timeout { timeout_ms: 250 }.client_message(),
            "Timeout reached"
        );
    }
}
