use sea_orm::{QueryOrder, prelude::*};

use crate::{WeightSlip, WeightSlipCmd, WeightSlipDimension, WeightSlipFields};

use super::{
    Engine,
    records::{impl_record_ops, impl_record_store},
};

impl_record_store!(
    WeightSlips => WeightSlip {
        kind: WeightSlip,
        fields: WeightSlipFields,
        child: WeightSlipDimension,
        children: dimensions,
        parent: weight_slips,
        lines: weight_slip_dimensions by WeightSlipId (weight_slip_id),
        label: "weight slip",
    }
);

impl Engine {
    impl_record_ops!(
        WeightSlips => WeightSlip, WeightSlipCmd;
        create: create_weight_slip,
        update: update_weight_slip,
        update_status: update_weight_slip_status,
        by_mawb: weight_slip_by_mawb,
        by_id: weight_slip,
        list: weight_slips,
    );
}
