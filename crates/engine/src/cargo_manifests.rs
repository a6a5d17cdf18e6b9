//! Cargo manifests.
//!
//! A [`CargoManifest`] lists the house airway bills consolidated under one
//! MAWB. There is at most one manifest per MAWB; its lines are
//! [`CargoManifestItem`]s.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    ResultEngine,
    cargo_manifest_items::{self, CargoManifestItem},
    records::{RecordRow, Validate},
    statuses,
    util::{normalize_optional_text, require_text},
};

/// Header fields of a manifest, shared by create and update payloads.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CargoManifestFields {
    pub mawb_no: String,
    pub flight_no: Option<String>,
    pub port_of_loading: Option<String>,
    pub port_of_discharge: Option<String>,
    pub freight_date: Option<NaiveDate>,
    pub consolidator: Option<String>,
    pub prepared_by: Option<String>,
    pub remark: Option<String>,
}

impl CargoManifestFields {
    #[must_use]
    pub fn new(mawb_no: impl Into<String>) -> Self {
        Self {
            mawb_no: mawb_no.into(),
            ..Default::default()
        }
    }
}

impl Validate for CargoManifestFields {
    fn validate(&self) -> ResultEngine<()> {
        require_text(&self.mawb_no, "mawb_no")
    }
}

/// A persisted manifest with its status name and ordered items.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CargoManifest {
    pub id: Uuid,
    pub mawb_info_id: Uuid,
    pub status_id: Uuid,
    pub status_name: Option<String>,
    #[serde(flatten)]
    pub fields: CargoManifestFields,
    pub items: Vec<CargoManifestItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CargoManifest {
    pub fn total_pieces(&self) -> i64 {
        self.items.iter().map(|item| i64::from(item.pieces)).sum()
    }

    pub fn total_gross_weight(&self) -> f64 {
        self.items.iter().map(|item| item.gross_weight).sum()
    }

    pub(crate) fn from_models(
        model: Model,
        status: Option<statuses::Model>,
        items: Vec<cargo_manifest_items::Model>,
    ) -> Self {
        Self {
            id: model.id,
            mawb_info_id: model.mawb_info_id,
            status_id: model.status_id,
            status_name: status.map(|s| s.name),
            fields: CargoManifestFields {
                mawb_no: model.mawb_no,
                flight_no: model.flight_no,
                port_of_loading: model.port_of_loading,
                port_of_discharge: model.port_of_discharge,
                freight_date: model.freight_date,
                consolidator: model.consolidator,
                prepared_by: model.prepared_by,
                remark: model.remark,
            },
            items: items.into_iter().map(CargoManifestItem::from).collect(),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cargo_manifests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub mawb_info_id: Uuid,
    pub status_id: Uuid,
    pub mawb_no: String,
    pub flight_no: Option<String>,
    pub port_of_loading: Option<String>,
    pub port_of_discharge: Option<String>,
    pub freight_date: Option<Date>,
    pub consolidator: Option<String>,
    pub prepared_by: Option<String>,
    pub remark: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::mawb_infos::Entity",
        from = "Column::MawbInfoId",
        to = "super::mawb_infos::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    MawbInfos,
    #[sea_orm(
        belongs_to = "super::statuses::Entity",
        from = "Column::StatusId",
        to = "super::statuses::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Statuses,
    #[sea_orm(has_many = "super::cargo_manifest_items::Entity")]
    Items,
}

impl Related<super::mawb_infos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MawbInfos.def()
    }
}

impl Related<super::statuses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Statuses.def()
    }
}

impl Related<super::cargo_manifest_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    /// Column values for `row`. Timestamps are left for the caller to set.
    pub(crate) fn from_row(
        id: Uuid,
        row: &RecordRow<CargoManifestFields, CargoManifestItem>,
    ) -> Self {
        let fields = &row.fields;
        Self {
            id: ActiveValue::Set(id),
            mawb_info_id: ActiveValue::Set(row.mawb_info_id),
            status_id: ActiveValue::Set(row.status_id),
            mawb_no: ActiveValue::Set(fields.mawb_no.trim().to_string()),
            flight_no: ActiveValue::Set(normalize_optional_text(fields.flight_no.as_deref())),
            port_of_loading: ActiveValue::Set(normalize_optional_text(
                fields.port_of_loading.as_deref(),
            )),
            port_of_discharge: ActiveValue::Set(normalize_optional_text(
                fields.port_of_discharge.as_deref(),
            )),
            freight_date: ActiveValue::Set(fields.freight_date),
            consolidator: ActiveValue::Set(normalize_optional_text(
                fields.consolidator.as_deref(),
            )),
            prepared_by: ActiveValue::Set(normalize_optional_text(fields.prepared_by.as_deref())),
            remark: ActiveValue::Set(normalize_optional_text(fields.remark.as_deref())),
            created_at: ActiveValue::NotSet,
            updated_at: ActiveValue::NotSet,
        }
    }
}
