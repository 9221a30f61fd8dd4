//! Extractor configuration turning malformed requests into domain errors.
//!
//! Actix rejects bodies, query strings, and path segments that fail to
//! deserialise before the handler runs. These handlers replace its plain-text
//! 400 responses with the JSON error envelope and a 422 status.

use std::fmt::Display;

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, web};
use serde_json::json;
use tracing::debug;

use crate::domain::Error;

/// Request part that failed to deserialise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Body,
    Query,
    Path,
}

impl Source {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::Query => "query",
            Self::Path => "path",
        }
    }
}

fn validation_error(source: Source, reason: &impl Display) -> Error {
    let reason = reason.to_string();
    debug!(source = source.as_str(), %reason, "request rejected by extractor");
    Error::validation_failed(format!("invalid request {}", source.as_str())).with_details(json!({
        "source": source.as_str(),
        "reason": reason,
    }))
}

/// JSON body configuration used by the user endpoints.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
            validation_error(Source::Body, &err).into()
        })
}

/// Query string configuration used by the user endpoints.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
            validation_error(Source::Query, &err).into()
        })
}

/// Path segment configuration used by the user endpoints.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err: PathError, _req: &HttpRequest| {
            validation_error(Source::Path, &err).into()
        })
}
