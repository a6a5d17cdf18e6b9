//! Upload log endpoints

use api_types::{
    DateRangeQuery,
    upload::{Upload, UploadNew},
};
use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
};
use engine::UploadLogCmd;

use crate::{ServerError, date_range, server::ServerState};

fn map_upload(log: engine::UploadLog) -> Upload {
    Upload {
        id: log.id,
        file_name: log.file_name,
        content_type: log.content_type,
        size_bytes: log.size_bytes,
        storage_key: log.storage_key,
        mawb_info_id: log.mawb_info_id,
        uploaded_by: log.uploaded_by,
        created_at: log.created_at,
    }
}

/// Log a file the client already put in object storage. The uploader is the
/// authenticated user.
pub async fn create(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Json(payload): Json<UploadNew>,
) -> Result<(StatusCode, Json<Upload>), ServerError> {
    let cmd = UploadLogCmd {
        file_name: payload.file_name,
        content_type: payload.content_type,
        size_bytes: payload.size_bytes,
        storage_key: payload.storage_key,
        mawb_info_id: payload.mawb_info_id,
        uploaded_by: user.username,
    };
    let log = state.engine.log_upload(cmd).await?;
    Ok((StatusCode::CREATED, Json(map_upload(log))))
}

pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<Vec<Upload>>, ServerError> {
    let logs = state.engine.upload_logs(date_range(query)?).await?;
    Ok(Json(logs.into_iter().map(map_upload).collect()))
}
