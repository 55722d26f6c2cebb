// shared/src/lib.rs

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{0}")]
    Validation(String),
    #[error("rate service unavailable: {0}")]
    RemoteUnavailable(String),
    /// Non-success status reported by the rate service, kept verbatim.
    #[error("[{code}] - {description}")]
    InvalidResponse { code: i32, description: String },
    #[error("malformed rate service response: {0}")]
    MalformedResponse(String),
    #[error("license key is not configured")]
    NotConfigured,
    #[error("internal: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

pub mod config;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_response_displays_remote_status() {
        let err = Error::InvalidResponse {
            code: 404,
            description: "not found".to_string(),
        };
        assert_eq!(err.to_string(), "[404] - not found");
    }

    #[test]
    fn test_validation_message_is_passed_through() {
        let err = Error::Validation("Zip is not provided".to_string());
        assert_eq!(err.to_string(), "Zip is not provided");
    }
}
