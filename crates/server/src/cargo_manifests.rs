//! Cargo manifest endpoints

use api_types::{
    DateRangeQuery,
    cargo_manifest::{CargoManifest, CargoManifestItem, CargoManifestPayload},
    status::StatusUpdate,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use engine::{CargoManifestCmd, CargoManifestFields, EngineError};
use uuid::Uuid;

use crate::{ServerError, date_range, server::ServerState};

fn map_item_in(item: CargoManifestItem) -> engine::CargoManifestItem {
    engine::CargoManifestItem {
        hawb_no: item.hawb_no,
        pieces: item.pieces,
        gross_weight: item.gross_weight,
        destination: item.destination,
        commodity: item.commodity,
        shipper: item.shipper,
        consignee: item.consignee,
    }
}

fn map_item_out(item: engine::CargoManifestItem) -> CargoManifestItem {
    CargoManifestItem {
        hawb_no: item.hawb_no,
        pieces: item.pieces,
        gross_weight: item.gross_weight,
        destination: item.destination,
        commodity: item.commodity,
        shipper: item.shipper,
        consignee: item.consignee,
    }
}

fn map_payload(payload: CargoManifestPayload) -> CargoManifestCmd {
    CargoManifestCmd {
        id: payload.id,
        mawb_info_id: payload.mawb_info_id,
        status_id: payload.status_id,
        fields: CargoManifestFields {
            mawb_no: payload.mawb_no,
            flight_no: payload.flight_no,
            port_of_loading: payload.port_of_loading,
            port_of_discharge: payload.port_of_discharge,
            freight_date: payload.freight_date,
            consolidator: payload.consolidator,
            prepared_by: payload.prepared_by,
            remark: payload.remark,
        },
        children: payload.items.into_iter().map(map_item_in).collect(),
    }
}

fn map_manifest(manifest: engine::CargoManifest) -> CargoManifest {
    let total_pieces = manifest.total_pieces();
    let total_gross_weight = manifest.total_gross_weight();
    let fields = manifest.fields;
    CargoManifest {
        id: manifest.id,
        mawb_info_id: manifest.mawb_info_id,
        status_id: manifest.status_id,
        status_name: manifest.status_name,
        mawb_no: fields.mawb_no,
        flight_no: fields.flight_no,
        port_of_loading: fields.port_of_loading,
        port_of_discharge: fields.port_of_discharge,
        freight_date: fields.freight_date,
        consolidator: fields.consolidator,
        prepared_by: fields.prepared_by,
        remark: fields.remark,
        items: manifest.items.into_iter().map(map_item_out).collect(),
        total_pieces,
        total_gross_weight,
        created_at: manifest.created_at,
        updated_at: manifest.updated_at,
    }
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CargoManifestPayload>,
) -> Result<(StatusCode, Json<CargoManifest>), ServerError> {
    let manifest = state
        .engine
        .create_cargo_manifest(map_payload(payload))
        .await?;
    Ok((StatusCode::CREATED, Json(map_manifest(manifest))))
}

pub async fn update(
    State(state): State<ServerState>,
    Json(payload): Json<CargoManifestPayload>,
) -> Result<Json<CargoManifest>, ServerError> {
    let manifest = state
        .engine
        .update_cargo_manifest(map_payload(payload))
        .await?;
    Ok(Json(map_manifest(manifest)))
}

pub async fn update_status(
    State(state): State<ServerState>,
    Path(mawb_info_id): Path<Uuid>,
    Json(payload): Json<StatusUpdate>,
) -> Result<Json<CargoManifest>, ServerError> {
    let manifest = state
        .engine
        .update_cargo_manifest_status(mawb_info_id, payload.status_id)
        .await?;
    Ok(Json(map_manifest(manifest)))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CargoManifest>, ServerError> {
    Ok(Json(map_manifest(state.engine.cargo_manifest(id).await?)))
}

pub async fn by_mawb(
    State(state): State<ServerState>,
    Path(mawb_info_id): Path<Uuid>,
) -> Result<Json<CargoManifest>, ServerError> {
    let manifest = state
        .engine
        .cargo_manifest_by_mawb(mawb_info_id)
        .await?
        .ok_or_else(|| EngineError::KeyNotFound(mawb_info_id.to_string()))?;
    Ok(Json(map_manifest(manifest)))
}

pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<Vec<CargoManifest>>, ServerError> {
    let manifests = state.engine.cargo_manifests(date_range(query)?).await?;
    Ok(Json(manifests.into_iter().map(map_manifest).collect()))
}
