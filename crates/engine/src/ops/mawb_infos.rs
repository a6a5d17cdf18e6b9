use chrono::Utc;
use sea_orm::{ActiveValue, ConnectionTrait, QueryOrder, QuerySelect, TransactionTrait, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    DateRange, EngineError, MawbInfo, MawbInfoCmd, ResultEngine, mawb_infos,
    util::normalize_optional_text,
};

use super::{Engine, with_tx};

/// Id/number pair for MAWB dropdowns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MawbOption {
    pub id: Uuid,
    pub mawb_no: String,
}

pub(super) async fn require_mawb_info<C: ConnectionTrait>(
    db: &C,
    mawb_info_id: Uuid,
) -> ResultEngine<mawb_infos::Model> {
    mawb_infos::Entity::find_by_id(mawb_info_id)
        .one(db)
        .await?
        .ok_or_else(|| EngineError::KeyNotFound("mawb info not exists".to_string()))
}

impl Engine {
    /// Register a MAWB. `mawb_no` is unique.
    pub async fn create_mawb_info(&self, cmd: MawbInfoCmd) -> ResultEngine<MawbInfo> {
        cmd.validate()?;
        let mawb_no = cmd.mawb_no.trim().to_string();
        with_tx!(self, "create_mawb_info", |db_tx| {
            let exists = mawb_infos::Entity::find()
                .filter(mawb_infos::Column::MawbNo.eq(mawb_no.clone()))
                .one(&db_tx)
                .await?
                .is_some();
            if exists {
                return Err(EngineError::ExistingKey(mawb_no));
            }

            let now = Utc::now();
            let model = mawb_infos::ActiveModel {
                id: ActiveValue::Set(Uuid::new_v4()),
                mawb_no: ActiveValue::Set(mawb_no.clone()),
                airline: ActiveValue::Set(normalize_optional_text(cmd.airline.as_deref())),
                origin: ActiveValue::Set(normalize_optional_text(cmd.origin.as_deref())),
                destination: ActiveValue::Set(normalize_optional_text(
                    cmd.destination.as_deref(),
                )),
                flight_no: ActiveValue::Set(normalize_optional_text(cmd.flight_no.as_deref())),
                flight_date: ActiveValue::Set(cmd.flight_date),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
            }
            .insert(&db_tx)
            .await
            .map_err(|err| EngineError::from_write(err, mawb_no.clone()))?;
            Ok(MawbInfo::from(model))
        })
    }

    pub async fn mawb_info(&self, id: Uuid) -> ResultEngine<MawbInfo> {
        self.run_op("get_mawb_info", async {
            require_mawb_info(&self.database, id).await.map(MawbInfo::from)
        })
        .await
    }

    /// MAWBs created inside `range`, oldest first.
    pub async fn mawb_infos(&self, range: DateRange) -> ResultEngine<Vec<MawbInfo>> {
        self.run_op("list_mawb_infos", async {
            let mut query = mawb_infos::Entity::find();
            if let Some(from) = range.from {
                query = query.filter(mawb_infos::Column::CreatedAt.gte(from));
            }
            if let Some(to) = range.to {
                query = query.filter(mawb_infos::Column::CreatedAt.lte(to));
            }
            let models = query
                .order_by_asc(mawb_infos::Column::CreatedAt)
                .all(&self.database)
                .await?;
            Ok(models.into_iter().map(MawbInfo::from).collect())
        })
        .await
    }

    /// Every MAWB as an id/number pair, ordered by number.
    pub async fn mawb_options(&self) -> ResultEngine<Vec<MawbOption>> {
        self.run_op("list_mawb_options", async {
            let rows: Vec<(Uuid, String)> = mawb_infos::Entity::find()
                .select_only()
                .column(mawb_infos::Column::Id)
                .column(mawb_infos::Column::MawbNo)
                .order_by_asc(mawb_infos::Column::MawbNo)
                .into_tuple()
                .all(&self.database)
                .await?;
            Ok(rows
                .into_iter()
                .map(|(id, mawb_no)| MawbOption { id, mawb_no })
                .collect())
        })
        .await
    }
}
