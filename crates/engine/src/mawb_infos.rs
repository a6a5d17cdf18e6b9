//! Master air waybills.
//!
//! A MAWB is the shipment every cargo manifest and weight slip attaches to.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MawbInfo {
    pub id: Uuid,
    pub mawb_no: String,
    pub airline: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub flight_no: Option<String>,
    pub flight_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "mawb_infos")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub mawb_no: String,
    pub airline: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub flight_no: Option<String>,
    pub flight_date: Option<Date>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::cargo_manifests::Entity")]
    CargoManifests,
    #[sea_orm(has_many = "super::weight_slips::Entity")]
    WeightSlips,
}

impl Related<super::cargo_manifests::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CargoManifests.def()
    }
}

impl Related<super::weight_slips::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WeightSlips.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for MawbInfo {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            mawb_no: model.mawb_no,
            airline: model.airline,
            origin: model.origin,
            destination: model.destination,
            flight_no: model.flight_no,
            flight_date: model.flight_date,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
