//! Weight slip endpoints

use api_types::{
    DateRangeQuery,
    status::StatusUpdate,
    weight_slip::{WeightSlip, WeightSlipDimension, WeightSlipPayload},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use engine::{EngineError, WeightSlipCmd, WeightSlipFields};
use uuid::Uuid;

use crate::{ServerError, date_range, server::ServerState};

fn map_dimension_in(dimension: WeightSlipDimension) -> engine::WeightSlipDimension {
    engine::WeightSlipDimension {
        length_cm: dimension.length_cm,
        width_cm: dimension.width_cm,
        height_cm: dimension.height_cm,
        pieces: dimension.pieces,
    }
}

fn map_dimension_out(dimension: engine::WeightSlipDimension) -> WeightSlipDimension {
    WeightSlipDimension {
        length_cm: dimension.length_cm,
        width_cm: dimension.width_cm,
        height_cm: dimension.height_cm,
        pieces: dimension.pieces,
    }
}

fn map_payload(payload: WeightSlipPayload) -> WeightSlipCmd {
    WeightSlipCmd {
        id: payload.id,
        mawb_info_id: payload.mawb_info_id,
        status_id: payload.status_id,
        fields: WeightSlipFields {
            slip_no: payload.slip_no,
            mawb_no: payload.mawb_no,
            flight_no: payload.flight_no,
            destination: payload.destination,
            gross_weight: payload.gross_weight,
            remark: payload.remark,
        },
        children: payload
            .dimensions
            .into_iter()
            .map(map_dimension_in)
            .collect(),
    }
}

fn map_slip(slip: engine::WeightSlip) -> WeightSlip {
    let total_pieces = slip.total_pieces();
    let volume_weight = slip.volume_weight();
    let chargeable_weight = slip.chargeable_weight();
    let fields = slip.fields;
    WeightSlip {
        id: slip.id,
        mawb_info_id: slip.mawb_info_id,
        status_id: slip.status_id,
        status_name: slip.status_name,
        slip_no: fields.slip_no,
        mawb_no: fields.mawb_no,
        flight_no: fields.flight_no,
        destination: fields.destination,
        gross_weight: fields.gross_weight,
        remark: fields.remark,
        dimensions: slip
            .dimensions
            .into_iter()
            .map(map_dimension_out)
            .collect(),
        total_pieces,
        volume_weight,
        chargeable_weight,
        created_at: slip.created_at,
        updated_at: slip.updated_at,
    }
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<WeightSlipPayload>,
) -> Result<(StatusCode, Json<WeightSlip>), ServerError> {
    let slip = state.engine.create_weight_slip(map_payload(payload)).await?;
    Ok((StatusCode::CREATED, Json(map_slip(slip))))
}

pub async fn update(
    State(state): State<ServerState>,
    Json(payload): Json<WeightSlipPayload>,
) -> Result<Json<WeightSlip>, ServerError> {
    let slip = state.engine.update_weight_slip(map_payload(payload)).await?;
    Ok(Json(map_slip(slip)))
}

pub async fn update_status(
    State(state): State<ServerState>,
    Path(mawb_info_id): Path<Uuid>,
    Json(payload): Json<StatusUpdate>,
) -> Result<Json<WeightSlip>, ServerError> {
    let slip = state
        .engine
        .update_weight_slip_status(mawb_info_id, payload.status_id)
        .await?;
    Ok(Json(map_slip(slip)))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WeightSlip>, ServerError> {
    Ok(Json(map_slip(state.engine.weight_slip(id).await?)))
}

pub async fn by_mawb(
    State(state): State<ServerState>,
    Path(mawb_info_id): Path<Uuid>,
) -> Result<Json<WeightSlip>, ServerError> {
    let slip = state
        .engine
        .weight_slip_by_mawb(mawb_info_id)
        .await?
        .ok_or_else(|| EngineError::KeyNotFound(mawb_info_id.to_string()))?;
    Ok(Json(map_slip(slip)))
}

pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<Vec<WeightSlip>>, ServerError> {
    let slips = state.engine.weight_slips(date_range(query)?).await?;
    Ok(Json(slips.into_iter().map(map_slip).collect()))
}
