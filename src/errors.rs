use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
#[error("Postmark API error: {status} - {message}")]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub(crate) fn from_body(status: StatusCode, text: &str) -> Self {
        #[derive(Deserialize)]
        struct ErrorResp {
            message: String,
        }

        let message = serde_json::from_str::<ErrorResp>(text).map_or_else(
            |e| format!("unable to get error message from {text:?}: {e}"),
            |r| r.message,
        );

        Self { status, message }
    }
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Postmark(#[from] ApiError),
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
    #[error(transparent)]
    UrlParse(#[from] url::ParseError),
}

#[derive(Error, Debug)]
pub enum ClientBuilderError {
    #[error(transparent)]
    UrlParse(#[from] url::ParseError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_decodes_message() {
        let err = ApiError::from_body(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"message":"missing domain"}"#,
        );
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.message, "missing domain");
    }

    #[test]
    fn api_error_keeps_undecodable_body() {
        let err = ApiError::from_body(StatusCode::INTERNAL_SERVER_ERROR, "not json");
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.message.contains("not json"));
    }
}
