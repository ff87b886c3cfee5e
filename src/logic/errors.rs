use anyhow::Error;

use crate::api::ApiError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorType {
    ConnectionRefused,
    Timeout,
    Unauthorized, // HTTP 401
    NotFound,     // HTTP 404
    ServerError,  // HTTP 500+
    NetworkError, // DNS, routing, etc.
    Other,
}

fn find_api_error(error: &Error) -> Option<&ApiError> {
    error
        .downcast_ref::<ApiError>()
        .or_else(|| error.chain().find_map(|cause| cause.downcast_ref::<ApiError>()))
}

/// Classify an error based on its type and error chain
pub fn classify_error(error: &Error) -> ErrorType {
    if let Some(api_err) = find_api_error(error) {
        return match api_err.status() {
            401 => ErrorType::Unauthorized,
            404 => ErrorType::NotFound,
            500..=599 => ErrorType::ServerError,
            _ => ErrorType::Other,
        };
    }

    for cause in error.chain() {
        if let Some(reqwest_err) = cause.downcast_ref::<reqwest::Error>() {
            if reqwest_err.is_timeout() {
                return ErrorType::Timeout;
            }
            if reqwest_err.is_connect() {
                return ErrorType::ConnectionRefused;
            }
        }
    }

    let error_msg = format!("{:#}", error).to_lowercase();
    if error_msg.contains("connection refused") {
        return ErrorType::ConnectionRefused;
    }
    if error_msg.contains("timeout") || error_msg.contains("timed out") {
        return ErrorType::Timeout;
    }
    if error_msg.contains("dns") || error_msg.contains("network") {
        return ErrorType::NetworkError;
    }

    ErrorType::Other
}

pub fn is_unauthorized(error: &Error) -> bool {
    classify_error(error) == ErrorType::Unauthorized
}

/// Message for a form or alert: the backend's own message when it sent one,
/// otherwise the action-specific fallback
pub fn user_message(error: &Error, fallback: &str) -> String {
    match find_api_error(error) {
        Some(api_err) if !api_err.message().trim().is_empty() => api_err.message().trim().to_string(),
        _ => fallback.to_string(),
    }
}

/// Raw error detail for the status bar and debug log
pub fn format_error_message(error: &Error) -> String {
    if let Some(api_err) = find_api_error(error) {
        if api_err.message().is_empty() {
            return format!("HTTP {}", api_err.status());
        }
        return format!("HTTP {}: {}", api_err.status(), api_err.message());
    }

    let mut current: Option<&dyn std::error::Error> = Some(error.as_ref());
    while let Some(err) = current {
        if let Some(reqwest_err) = err.downcast_ref::<reqwest::Error>() {
            return reqwest_err.to_string();
        }
        current = err.source();
    }

    error.root_cause().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(status: u16, message: &str) -> Error {
        ApiError::Status {
            status,
            message: message.to_string(),
        }
        .into()
    }

    #[test]
    fn test_classify_status_codes() {
        assert_eq!(classify_error(&status(404, "Image not found")), ErrorType::NotFound);
        assert_eq!(classify_error(&status(503, "")), ErrorType::ServerError);
        assert_eq!(classify_error(&status(400, "bad")), ErrorType::Other);
    }

    #[test]
    fn test_classify_unauthorized_through_context() {
        let err: Error = ApiError::Unauthorized {
            message: "Token expired".to_string(),
        }
        .into();
        let err = err.context("Failed to fetch folders");
        assert!(is_unauthorized(&err));
    }

    #[test]
    fn test_classify_message_heuristics() {
        assert_eq!(
            classify_error(&anyhow::anyhow!("connection refused (os error 111)")),
            ErrorType::ConnectionRefused
        );
        assert_eq!(classify_error(&anyhow::anyhow!("request timed out")), ErrorType::Timeout);
        assert_eq!(classify_error(&anyhow::anyhow!("dns lookup failed")), ErrorType::NetworkError);
        assert_eq!(classify_error(&anyhow::anyhow!("something else")), ErrorType::Other);
    }

    #[test]
    fn test_user_message_prefers_backend_text() {
        assert_eq!(
            user_message(&status(400, "Folder name already exists"), "Error creating folder"),
            "Folder name already exists"
        );
        assert_eq!(user_message(&status(500, "  "), "Error creating folder"), "Error creating folder");
        assert_eq!(
            user_message(&anyhow::anyhow!("tcp connect error"), "Error deleting image"),
            "Error deleting image"
        );
    }

    #[test]
    fn test_format_error_message() {
        assert_eq!(format_error_message(&status(404, "Image not found")), "HTTP 404: Image not found");
        assert_eq!(format_error_message(&status(502, "")), "HTTP 502");

        let inner = anyhow::anyhow!("tcp connect error");
        let outer = inner.context("Failed to fetch images");
        assert_eq!(format_error_message(&outer), "tcp connect error");
    }
}
