//! Upload log.
//!
//! The file itself lives in object storage; the engine only records what was
//! uploaded, where it was stored and by whom.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadLog {
    pub id: Uuid,
    pub file_name: String,
    pub content_type: Option<String>,
    pub size_bytes: i64,
    pub storage_key: String,
    pub mawb_info_id: Option<Uuid>,
    pub uploaded_by: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "upload_logs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub file_name: String,
    pub content_type: Option<String>,
    pub size_bytes: i64,
    pub storage_key: String,
    pub mawb_info_id: Option<Uuid>,
    pub uploaded_by: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::mawb_infos::Entity",
        from = "Column::MawbInfoId",
        to = "super::mawb_infos::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    MawbInfos,
}

impl Related<super::mawb_infos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MawbInfos.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for UploadLog {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            file_name: model.file_name,
            content_type: model.content_type,
            size_bytes: model.size_bytes,
            storage_key: model.storage_key,
            mawb_info_id: model.mawb_info_id,
            uploaded_by: model.uploaded_by,
            created_at: model.created_at,
        }
    }
}
