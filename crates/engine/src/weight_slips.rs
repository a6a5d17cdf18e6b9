//! Weight slips.
//!
//! A [`WeightSlip`] records the weighed gross weight of a MAWB and the
//! measured dimensions used to compute its volumetric weight. There is at
//! most one slip per MAWB.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    ResultEngine,
    records::{RecordRow, Validate},
    statuses,
    util::{normalize_optional_text, require_measure, require_text},
    weight_slip_dimensions::{self, WeightSlipDimension},
};

/// Header fields of a slip, shared by create and update payloads.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightSlipFields {
    pub slip_no: String,
    pub mawb_no: String,
    pub flight_no: Option<String>,
    pub destination: Option<String>,
    /// Kilograms, as weighed.
    pub gross_weight: f64,
    pub remark: Option<String>,
}

impl WeightSlipFields {
    #[must_use]
    pub fn new(slip_no: impl Into<String>, mawb_no: impl Into<String>, gross_weight: f64) -> Self {
        Self {
            slip_no: slip_no.into(),
            mawb_no: mawb_no.into(),
            gross_weight,
            ..Default::default()
        }
    }
}

impl Validate for WeightSlipFields {
    fn validate(&self) -> ResultEngine<()> {
        require_text(&self.slip_no, "slip_no")?;
        require_text(&self.mawb_no, "mawb_no")?;
        require_measure(self.gross_weight, "gross_weight")
    }
}

/// A persisted slip with its status name and ordered dimension lines.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightSlip {
    pub id: Uuid,
    pub mawb_info_id: Uuid,
    pub status_id: Uuid,
    pub status_name: Option<String>,
    #[serde(flatten)]
    pub fields: WeightSlipFields,
    pub dimensions: Vec<WeightSlipDimension>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WeightSlip {
    pub fn total_pieces(&self) -> i64 {
        self.dimensions.iter().map(|d| i64::from(d.pieces)).sum()
    }

    /// Sum of the volumetric weight of every dimension line, in kilograms.
    pub fn volume_weight(&self) -> f64 {
        self.dimensions
            .iter()
            .map(WeightSlipDimension::volume_weight)
            .sum()
    }

    /// The billable weight: the greater of gross and volumetric weight.
    pub fn chargeable_weight(&self) -> f64 {
        self.fields.gross_weight.max(self.volume_weight())
    }

    pub(crate) fn from_models(
        model: Model,
        status: Option<statuses::Model>,
        dimensions: Vec<weight_slip_dimensions::Model>,
    ) -> Self {
        Self {
            id: model.id,
            mawb_info_id: model.mawb_info_id,
            status_id: model.status_id,
            status_name: status.map(|s| s.name),
            fields: WeightSlipFields {
                slip_no: model.slip_no,
                mawb_no: model.mawb_no,
                flight_no: model.flight_no,
                destination: model.destination,
                gross_weight: model.gross_weight,
                remark: model.remark,
            },
            dimensions: dimensions
                .into_iter()
                .map(WeightSlipDimension::from)
                .collect(),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "weight_slips")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub mawb_info_id: Uuid,
    pub status_id: Uuid,
    pub slip_no: String,
    pub mawb_no: String,
    pub flight_no: Option<String>,
    pub destination: Option<String>,
    pub gross_weight: f64,
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
    #[sea_orm(has_many = "super::weight_slip_dimensions::Entity")]
    Dimensions,
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

impl Related<super::weight_slip_dimensions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Dimensions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    /// Column values for `row`. Timestamps are left for the caller to set.
    pub(crate) fn from_row(id: Uuid, row: &RecordRow<WeightSlipFields, WeightSlipDimension>) -> Self {
        let fields = &row.fields;
        Self {
            id: ActiveValue::Set(id),
            mawb_info_id: ActiveValue::Set(row.mawb_info_id),
            status_id: ActiveValue::Set(row.status_id),
            slip_no: ActiveValue::Set(fields.slip_no.trim().to_string()),
            mawb_no: ActiveValue::Set(fields.mawb_no.trim().to_string()),
            flight_no: ActiveValue::Set(normalize_optional_text(fields.flight_no.as_deref())),
            destination: ActiveValue::Set(normalize_optional_text(fields.destination.as_deref())),
            gross_weight: ActiveValue::Set(fields.gross_weight),
            remark: ActiveValue::Set(normalize_optional_text(fields.remark.as_deref())),
            created_at: ActiveValue::NotSet,
            updated_at: ActiveValue::NotSet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slip(gross_weight: f64, dimensions: Vec<WeightSlipDimension>) -> WeightSlip {
        let now = Utc::now();
        WeightSlip {
            id: Uuid::new_v4(),
            mawb_info_id: Uuid::new_v4(),
            status_id: Uuid::new_v4(),
            status_name: None,
            fields: WeightSlipFields::new("WS-1", "176-12345675", gross_weight),
            dimensions,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn chargeable_weight_is_max_of_gross_and_volume() {
        // 100 x 60 x 50 cm = 300000 cm3 -> 50 kg per piece.
        let dims = vec![WeightSlipDimension::new(100.0, 60.0, 50.0, 2)];
        let light = slip(40.0, dims.clone());
        assert!((light.volume_weight() - 100.0).abs() < 1e-9);
        assert!((light.chargeable_weight() - 100.0).abs() < 1e-9);
        assert_eq!(light.total_pieces(), 2);

        let heavy = slip(250.0, dims);
        assert!((heavy.chargeable_weight() - 250.0).abs() < 1e-9);
    }

    #[test]
    fn header_validation() {
        assert!(WeightSlipFields::new("WS-1", "176-1", 1.0).validate().is_ok());
        assert!(WeightSlipFields::new("", "176-1", 1.0).validate().is_err());
        assert!(WeightSlipFields::new("WS-1", "176-1", -1.0).validate().is_err());
    }
}
