use axum::{Json, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use engine::{DateRange, EngineError};

use api_types::DateRangeQuery;
use serde::Serialize;
pub use server::{ServerState, router, run_with_listener};

mod cargo_manifests;
mod lookups;
mod mawbs;
mod server;
mod uploads;
mod user;
mod weight_slips;

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::ExistingKey(_) => StatusCode::CONFLICT,
        EngineError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EngineError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        EngineError::Configuration(_) | EngineError::Storage { .. } | EngineError::Database(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Storage { .. } | EngineError::Database(_) => {
            tracing::error!("database error: {err}");
            "internal server error".to_string()
        }
        EngineError::Configuration(_) => {
            tracing::error!("{err}");
            err.to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

/// Convert a `?from=&to=` query into the engine filter.
fn date_range(query: DateRangeQuery) -> Result<DateRange, ServerError> {
    Ok(DateRange::new(
        query.from.map(|dt| dt.with_timezone(&Utc)),
        query.to.map(|dt| dt.with_timezone(&Utc)),
    )?)
}

#[cfg(test)]
mod tests {
    use sea_orm::DbErr;

    use super::*;

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::KeyNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_conflict_maps_to_409() {
        let res = ServerError::from(EngineError::ExistingKey("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn engine_validation_maps_to_422() {
        let res = ServerError::from(EngineError::InvalidInput("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn engine_timeout_maps_to_504() {
        let res = ServerError::from(EngineError::Timeout("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn missing_default_status_maps_to_500() {
        let res = ServerError::from(EngineError::Configuration("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn storage_errors_are_hidden() {
        let message = message_for_engine_error(EngineError::Storage {
            operation: "create_cargo_manifest".to_string(),
            source: DbErr::Custom("disk I/O error".to_string()),
        });
        assert_eq!(message, "internal server error");
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn inverted_date_range_is_rejected() {
        let query = DateRangeQuery {
            from: chrono::DateTime::parse_from_rfc3339("2026-10-02T00:00:00Z").ok(),
            to: chrono::DateTime::parse_from_rfc3339("2026-10-01T00:00:00Z").ok(),
        };
        assert!(matches!(
            date_range(query),
            Err(ServerError::Engine(EngineError::InvalidInput(_)))
        ));
    }
}
