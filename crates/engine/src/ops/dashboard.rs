use sea_orm::{ConnectionTrait, PaginatorTrait, Statement, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{ResultEngine, cargo_manifests, mawb_infos, upload_logs, weight_slips};

use super::Engine;

/// Number of records currently in one status.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

/// Back-office overview: totals plus a per-status breakdown of each record
/// kind. Every catalog status is listed, including those with no records.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    pub mawb_count: u64,
    pub cargo_manifest_count: u64,
    pub weight_slip_count: u64,
    pub upload_count: u64,
    pub cargo_manifest_statuses: Vec<StatusCount>,
    pub weight_slip_statuses: Vec<StatusCount>,
}

async fn status_counts<C: ConnectionTrait>(db: &C, table: &str) -> ResultEngine<Vec<StatusCount>> {
    let stmt = Statement::from_string(
        db.get_database_backend(),
        format!(
            "SELECT s.name AS status, COUNT(r.id) AS count \
             FROM statuses s \
             LEFT JOIN {table} r ON r.status_id = s.id \
             GROUP BY s.id, s.name \
             ORDER BY s.name;"
        ),
    );
    let rows = db.query_all(stmt).await?;
    rows.into_iter()
        .map(|row| {
            Ok(StatusCount {
                status: row.try_get("", "status")?,
                count: row.try_get("", "count")?,
            })
        })
        .collect()
}

impl Engine {
    pub async fn dashboard(&self) -> ResultEngine<Dashboard> {
        self.run_op("dashboard", async {
            let db = &self.database;
            Ok(Dashboard {
                mawb_count: mawb_infos::Entity::find().count(db).await?,
                cargo_manifest_count: cargo_manifests::Entity::find().count(db).await?,
                weight_slip_count: weight_slips::Entity::find().count(db).await?,
                upload_count: upload_logs::Entity::find().count(db).await?,
                cargo_manifest_statuses: status_counts(db, "cargo_manifests").await?,
                weight_slip_statuses: status_counts(db, "weight_slips").await?,
            })
        })
        .await
    }
}
