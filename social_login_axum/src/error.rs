use axum::Json;
use http::{Result as HttpResponse, StatusCode};
use serde::Serialize;
use social_login::{CoordinationError, OAuth2Error};

/// JSON body of every profile API response that is not a user record.
#[derive(Debug, Serialize)]
pub struct ApiMessage {
    pub message: String,
}

impl ApiMessage {
    pub(crate) fn json(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<Self>) {
        (
            status,
            Json(Self {
                message: message.into(),
            }),
        )
    }
}

/// Helper trait for converting errors to a standard response error format
pub trait IntoResponseError<T> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)>;
}

/// Map [`CoordinationError`] variants to status codes
impl<T> IntoResponseError<T> for Result<T, CoordinationError> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)> {
        self.map_err(|e| {
            let status = match &e {
                CoordinationError::Unauthorized => StatusCode::UNAUTHORIZED,
                CoordinationError::OAuth2Error(
                    OAuth2Error::UnknownProvider(_) | OAuth2Error::ProviderNotConfigured(_),
                ) => StatusCode::NOT_FOUND,
                CoordinationError::OAuth2Error(_) => StatusCode::BAD_REQUEST,
                CoordinationError::InvalidState(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, e.to_string())
        })
    }
}

/// Implementation for http::Error (used by Response::builder())
impl<T> IntoResponseError<T> for HttpResponse<T> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)> {
        self.map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use social_login::SessionError;

    fn status_of(err: CoordinationError) -> StatusCode {
        let result: Result<(), CoordinationError> = Err(err);
        result.into_response_error().unwrap_err().0
    }

    #[test]
    fn test_unauthorized() {
        let result: Result<(), CoordinationError> = Err(CoordinationError::Unauthorized);
        let (status, message) = result.into_response_error().unwrap_err();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(message, "Not authenticated");
    }

    #[test]
    fn test_unknown_provider_is_not_found() {
        assert_eq!(
            status_of(OAuth2Error::UnknownProvider("github".to_string()).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(OAuth2Error::ProviderNotConfigured("kakao".to_string()).into()),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_session_store_fault_is_internal_error() {
        assert_eq!(
            status_of(SessionError::Storage("down".to_string()).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_ok_passes_through() {
        let result: Result<u8, CoordinationError> = Ok(7);
        assert_eq!(result.into_response_error().unwrap(), 7);
    }

    #[test]
    fn test_api_message_shape() {
        let (status, Json(body)) = ApiMessage::json(StatusCode::OK, "Logout successful");
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            serde_json::json!({ "message": "Logout successful" })
        );
    }
}
