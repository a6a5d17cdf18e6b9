//! MAWB registry endpoints

use api_types::{
    DateRangeQuery,
    mawb::{MawbInfo, MawbInfoNew},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use engine::MawbInfoCmd;
use uuid::Uuid;

use crate::{ServerError, date_range, server::ServerState};

fn map_mawb(mawb: engine::MawbInfo) -> MawbInfo {
    MawbInfo {
        id: mawb.id,
        mawb_no: mawb.mawb_no,
        airline: mawb.airline,
        origin: mawb.origin,
        destination: mawb.destination,
        flight_no: mawb.flight_no,
        flight_date: mawb.flight_date,
        created_at: mawb.created_at,
        updated_at: mawb.updated_at,
    }
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MawbInfoNew>,
) -> Result<(StatusCode, Json<MawbInfo>), ServerError> {
    let cmd = MawbInfoCmd {
        mawb_no: payload.mawb_no,
        airline: payload.airline,
        origin: payload.origin,
        destination: payload.destination,
        flight_no: payload.flight_no,
        flight_date: payload.flight_date,
    };
    let mawb = state.engine.create_mawb_info(cmd).await?;
    Ok((StatusCode::CREATED, Json(map_mawb(mawb))))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MawbInfo>, ServerError> {
    Ok(Json(map_mawb(state.engine.mawb_info(id).await?)))
}

pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<Vec<MawbInfo>>, ServerError> {
    let mawbs = state.engine.mawb_infos(date_range(query)?).await?;
    Ok(Json(mawbs.into_iter().map(map_mawb).collect()))
}
