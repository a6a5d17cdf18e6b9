//! Dashboard and dropdown endpoints

use api_types::{
    dashboard::{Dashboard, StatusCount},
    mawb::MawbOption,
    status::Status,
};
use axum::{Json, extract::State};

use crate::{ServerError, server::ServerState};

fn map_counts(counts: Vec<engine::StatusCount>) -> Vec<StatusCount> {
    counts
        .into_iter()
        .map(|c| StatusCount {
            status: c.status,
            count: c.count,
        })
        .collect()
}

pub async fn dashboard(State(state): State<ServerState>) -> Result<Json<Dashboard>, ServerError> {
    let dashboard = state.engine.dashboard().await?;
    Ok(Json(Dashboard {
        mawb_count: dashboard.mawb_count,
        cargo_manifest_count: dashboard.cargo_manifest_count,
        weight_slip_count: dashboard.weight_slip_count,
        upload_count: dashboard.upload_count,
        cargo_manifest_statuses: map_counts(dashboard.cargo_manifest_statuses),
        weight_slip_statuses: map_counts(dashboard.weight_slip_statuses),
    }))
}

pub async fn statuses(State(state): State<ServerState>) -> Result<Json<Vec<Status>>, ServerError> {
    let statuses = state.engine.statuses().await?;
    Ok(Json(
        statuses
            .into_iter()
            .map(|s| Status {
                id: s.id,
                name: s.name,
                description: s.description,
            })
            .collect(),
    ))
}

pub async fn mawb_options(
    State(state): State<ServerState>,
) -> Result<Json<Vec<MawbOption>>, ServerError> {
    let options = state.engine.mawb_options().await?;
    Ok(Json(
        options
            .into_iter()
            .map(|o| MawbOption {
                id: o.id,
                mawb_no: o.mawb_no,
            })
            .collect(),
    ))
}
