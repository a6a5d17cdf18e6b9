use chrono::Utc;
use sea_orm::{ActiveValue, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    DateRange, ResultEngine, UploadLog, UploadLogCmd, upload_logs,
    util::normalize_optional_text,
};

use super::{Engine, mawb_infos::require_mawb_info, with_tx};

impl Engine {
    /// Record the metadata of a file already stored under `cmd.storage_key`.
    pub async fn log_upload(&self, cmd: UploadLogCmd) -> ResultEngine<UploadLog> {
        cmd.validate()?;
        with_tx!(self, "log_upload", |db_tx| {
            if let Some(mawb_info_id) = cmd.mawb_info_id {
                require_mawb_info(&db_tx, mawb_info_id).await?;
            }
            let model = upload_logs::ActiveModel {
                id: ActiveValue::Set(Uuid::new_v4()),
                file_name: ActiveValue::Set(cmd.file_name.trim().to_string()),
                content_type: ActiveValue::Set(normalize_optional_text(
                    cmd.content_type.as_deref(),
                )),
                size_bytes: ActiveValue::Set(cmd.size_bytes),
                storage_key: ActiveValue::Set(cmd.storage_key.trim().to_string()),
                mawb_info_id: ActiveValue::Set(cmd.mawb_info_id),
                uploaded_by: ActiveValue::Set(cmd.uploaded_by.clone()),
                created_at: ActiveValue::Set(Utc::now()),
            }
            .insert(&db_tx)
            .await?;
            tracing::info!(file = %model.file_name, by = %model.uploaded_by, "upload logged");
            Ok(UploadLog::from(model))
        })
    }

    /// Upload log entries inside `range`, newest first.
    pub async fn upload_logs(&self, range: DateRange) -> ResultEngine<Vec<UploadLog>> {
        self.run_op("list_upload_logs", async {
            let mut query = upload_logs::Entity::find();
            if let Some(from) = range.from {
                query = query.filter(upload_logs::Column::CreatedAt.gte(from));
            }
            if let Some(to) = range.to {
                query = query.filter(upload_logs::Column::CreatedAt.lte(to));
            }
            let models = query
                .order_by_desc(upload_logs::Column::CreatedAt)
                .all(&self.database)
                .await?;
            Ok(models.into_iter().map(UploadLog::from).collect())
        })
        .await
    }
}
