//! API error types

use hyper::StatusCode;
use thiserror::Error;

use crate::movies::StoreError;

/// Errors a handler can end with, each mapped onto a status code
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body is not a valid movie document.
    #[error("invalid movie payload: {0}")]
    InvalidBody(String),

    /// The request body exceeds `http.max_body_size`.
    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: u64 },

    /// The request body could not be read from the connection.
    #[error("failed to read request body: {0}")]
    BodyRead(String),

    /// The store refused the operation.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidBody(_) | Self::BodyRead(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::InvalidBody("eof".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::PayloadTooLarge { limit: 1 }.status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        let err = ApiError::from(StoreError::IdExhausted { attempts: 3 });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "no free movie id after 3 attempts");
    }
}
