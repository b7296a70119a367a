// Extractor error handlers
//
// Malformed JSON bodies and unparsable path segments are turned into
// AppError::Validation so they share the application error body.

use actix_web::{
    error::{JsonPayloadError, PathError},
    web, Error, HttpRequest,
};

use crate::core::AppError;

/// Handler for `web::JsonConfig`
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    tracing::warn!(path = %req.path(), error = %err, "Rejected request body");
    AppError::validation(format!("Invalid request body: {}", err)).into()
}

/// Handler for `web::PathConfig`
pub fn path_error_handler(err: PathError, req: &HttpRequest) -> Error {
    tracing::warn!(path = %req.path(), error = %err, "Rejected path parameter");
    AppError::validation(format!("Invalid path parameter: {}", err)).into()
}

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(path_error_handler)
}
