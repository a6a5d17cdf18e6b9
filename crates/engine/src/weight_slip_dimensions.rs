//! Measured dimension lines of a weight slip.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine,
    records::Validate,
    util::{require_measure, require_pieces},
};

/// IATA volumetric divisor: cubic centimetres per kilogram.
pub const VOLUMETRIC_DIVISOR: f64 = 6000.0;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightSlipDimension {
    pub length_cm: f64,
    pub width_cm: f64,
    pub height_cm: f64,
    pub pieces: i32,
}

impl WeightSlipDimension {
    #[must_use]
    pub fn new(length_cm: f64, width_cm: f64, height_cm: f64, pieces: i32) -> Self {
        Self {
            length_cm,
            width_cm,
            height_cm,
            pieces,
        }
    }

    /// Volumetric weight of all pieces of this line, in kilograms.
    pub fn volume_weight(&self) -> f64 {
        self.length_cm * self.width_cm * self.height_cm * f64::from(self.pieces)
            / VOLUMETRIC_DIVISOR
    }
}

impl Validate for WeightSlipDimension {
    fn validate(&self) -> ResultEngine<()> {
        for (value, label) in [
            (self.length_cm, "length_cm"),
            (self.width_cm, "width_cm"),
            (self.height_cm, "height_cm"),
        ] {
            require_measure(value, label)?;
            if value == 0.0 {
                return Err(EngineError::InvalidInput(format!("{label} must be > 0")));
            }
        }
        require_pieces(self.pieces, "pieces")
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "weight_slip_dimensions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub weight_slip_id: Uuid,
    pub position: i32,
    pub length_cm: f64,
    pub width_cm: f64,
    pub height_cm: f64,
    pub pieces: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::weight_slips::Entity",
        from = "Column::WeightSlipId",
        to = "super::weight_slips::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    WeightSlips,
}

impl Related<super::weight_slips::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WeightSlips.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub(crate) fn from_child(
        weight_slip_id: Uuid,
        position: i32,
        dimension: &WeightSlipDimension,
    ) -> Self {
        Self {
            id: ActiveValue::Set(Uuid::new_v4()),
            weight_slip_id: ActiveValue::Set(weight_slip_id),
            position: ActiveValue::Set(position),
            length_cm: ActiveValue::Set(dimension.length_cm),
            width_cm: ActiveValue::Set(dimension.width_cm),
            height_cm: ActiveValue::Set(dimension.height_cm),
            pieces: ActiveValue::Set(dimension.pieces),
        }
    }
}

impl From<Model> for WeightSlipDimension {
    fn from(model: Model) -> Self {
        Self {
            length_cm: model.length_cm,
            width_cm: model.width_cm,
            height_cm: model.height_cm,
            pieces: model.pieces,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sized_dimension_is_rejected() {
        assert!(WeightSlipDimension::new(10.0, 10.0, 10.0, 1).validate().is_ok());
        assert!(WeightSlipDimension::new(0.0, 10.0, 10.0, 1).validate().is_err());
        assert!(WeightSlipDimension::new(10.0, 10.0, 10.0, 0).validate().is_err());
    }
}
