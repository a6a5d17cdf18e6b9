//! Cargo manifest lines, one per house airway bill.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    ResultEngine,
    records::Validate,
    util::{normalize_optional_text, require_measure, require_pieces, require_text},
};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CargoManifestItem {
    pub hawb_no: String,
    pub pieces: i32,
    /// Kilograms.
    pub gross_weight: f64,
    pub destination: Option<String>,
    pub commodity: Option<String>,
    pub shipper: Option<String>,
    pub consignee: Option<String>,
}

impl CargoManifestItem {
    #[must_use]
    pub fn new(hawb_no: impl Into<String>, pieces: i32, gross_weight: f64) -> Self {
        Self {
            hawb_no: hawb_no.into(),
            pieces,
            gross_weight,
            ..Default::default()
        }
    }
}

impl Validate for CargoManifestItem {
    fn validate(&self) -> ResultEngine<()> {
        require_text(&self.hawb_no, "hawb_no")?;
        require_pieces(self.pieces, "pieces")?;
        require_measure(self.gross_weight, "gross_weight")
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cargo_manifest_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub cargo_manifest_id: Uuid,
    pub position: i32,
    pub hawb_no: String,
    pub pieces: i32,
    pub gross_weight: f64,
    pub destination: Option<String>,
    pub commodity: Option<String>,
    pub shipper: Option<String>,
    pub consignee: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::cargo_manifests::Entity",
        from = "Column::CargoManifestId",
        to = "super::cargo_manifests::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    CargoManifests,
}

impl Related<super::cargo_manifests::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CargoManifests.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    /// Line `position` of manifest `cargo_manifest_id`, with a fresh id.
    pub(crate) fn from_child(
        cargo_manifest_id: Uuid,
        position: i32,
        item: &CargoManifestItem,
    ) -> Self {
        Self {
            id: ActiveValue::Set(Uuid::new_v4()),
            cargo_manifest_id: ActiveValue::Set(cargo_manifest_id),
            position: ActiveValue::Set(position),
            hawb_no: ActiveValue::Set(item.hawb_no.trim().to_string()),
            pieces: ActiveValue::Set(item.pieces),
            gross_weight: ActiveValue::Set(item.gross_weight),
            destination: ActiveValue::Set(normalize_optional_text(item.destination.as_deref())),
            commodity: ActiveValue::Set(normalize_optional_text(item.commodity.as_deref())),
            shipper: ActiveValue::Set(normalize_optional_text(item.shipper.as_deref())),
            consignee: ActiveValue::Set(normalize_optional_text(item.consignee.as_deref())),
        }
    }
}

impl From<Model> for CargoManifestItem {
    fn from(model: Model) -> Self {
        Self {
            hawb_no: model.hawb_no,
            pieces: model.pieces,
            gross_weight: model.gross_weight,
            destination: model.destination,
            commodity: model.commodity,
            shipper: model.shipper,
            consignee: model.consignee,
        }
    }
}
