use sea_orm_migration::prelude::*;

use super::m20261001_000001_init::{MawbInfos, Statuses};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CargoManifests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CargoManifests::Id)
                            .blob()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CargoManifests::MawbInfoId).blob().not_null())
                    .col(ColumnDef::new(CargoManifests::StatusId).blob().not_null())
                    .col(ColumnDef::new(CargoManifests::MawbNo).string().not_null())
                    .col(ColumnDef::new(CargoManifests::FlightNo).string())
                    .col(ColumnDef::new(CargoManifests::PortOfLoading).string())
                    .col(ColumnDef::new(CargoManifests::PortOfDischarge).string())
                    .col(ColumnDef::new(CargoManifests::FreightDate).date())
                    .col(ColumnDef::new(CargoManifests::Consolidator).string())
                    .col(ColumnDef::new(CargoManifests::PreparedBy).string())
                    .col(ColumnDef::new(CargoManifests::Remark).string())
                    .col(
                        ColumnDef::new(CargoManifests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CargoManifests::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-cargo_manifests-mawb_info_id")
                            .from(CargoManifests::Table, CargoManifests::MawbInfoId)
                            .to(MawbInfos::Table, MawbInfos::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-cargo_manifests-status_id")
                            .from(CargoManifests::Table, CargoManifests::StatusId)
                            .to(Statuses::Table, Statuses::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // One manifest per MAWB, enforced by the store as well.
        manager
            .create_index(
                Index::create()
                    .name("idx-cargo_manifests-mawb_info_id-unique")
                    .table(CargoManifests::Table)
                    .col(CargoManifests::MawbInfoId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CargoManifestItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CargoManifestItems::Id)
                            .blob()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CargoManifestItems::CargoManifestId)
                            .blob()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CargoManifestItems::Position)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CargoManifestItems::HawbNo).string().not_null())
                    .col(ColumnDef::new(CargoManifestItems::Pieces).integer().not_null())
                    .col(
                        ColumnDef::new(CargoManifestItems::GrossWeight)
                            .double()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CargoManifestItems::Destination).string())
                    .col(ColumnDef::new(CargoManifestItems::Commodity).string())
                    .col(ColumnDef::new(CargoManifestItems::Shipper).string())
                    .col(ColumnDef::new(CargoManifestItems::Consignee).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-cargo_manifest_items-cargo_manifest_id")
                            .from(
                                CargoManifestItems::Table,
                                CargoManifestItems::CargoManifestId,
                            )
                            .to(CargoManifests::Table, CargoManifests::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-cargo_manifest_items-cargo_manifest_id-position")
                    .table(CargoManifestItems::Table)
                    .col(CargoManifestItems::CargoManifestId)
                    .col(CargoManifestItems::Position)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(WeightSlips::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WeightSlips::Id)
                            .blob()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(WeightSlips::MawbInfoId).blob().not_null())
                    .col(ColumnDef::new(WeightSlips::StatusId).blob().not_null())
                    .col(ColumnDef::new(WeightSlips::SlipNo).string().not_null())
                    .col(ColumnDef::new(WeightSlips::MawbNo).string().not_null())
                    .col(ColumnDef::new(WeightSlips::FlightNo).string())
                    .col(ColumnDef::new(WeightSlips::Destination).string())
                    .col(ColumnDef::new(WeightSlips::GrossWeight).double().not_null())
                    .col(ColumnDef::new(WeightSlips::Remark).string())
                    .col(
                        ColumnDef::new(WeightSlips::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WeightSlips::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-weight_slips-mawb_info_id")
                            .from(WeightSlips::Table, WeightSlips::MawbInfoId)
                            .to(MawbInfos::Table, MawbInfos::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-weight_slips-status_id")
                            .from(WeightSlips::Table, WeightSlips::StatusId)
                            .to(Statuses::Table, Statuses::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-weight_slips-mawb_info_id-unique")
                    .table(WeightSlips::Table)
                    .col(WeightSlips::MawbInfoId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(WeightSlipDimensions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WeightSlipDimensions::Id)
                            .blob()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(WeightSlipDimensions::WeightSlipId)
                            .blob()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WeightSlipDimensions::Position)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WeightSlipDimensions::LengthCm)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WeightSlipDimensions::WidthCm)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WeightSlipDimensions::HeightCm)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WeightSlipDimensions::Pieces)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-weight_slip_dimensions-weight_slip_id")
                            .from(
                                WeightSlipDimensions::Table,
                                WeightSlipDimensions::WeightSlipId,
                            )
                            .to(WeightSlips::Table, WeightSlips::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-weight_slip_dimensions-weight_slip_id-position")
                    .table(WeightSlipDimensions::Table)
                    .col(WeightSlipDimensions::WeightSlipId)
                    .col(WeightSlipDimensions::Position)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WeightSlipDimensions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(WeightSlips::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CargoManifestItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CargoManifests::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CargoManifests {
    Table,
    Id,
    MawbInfoId,
    StatusId,
    MawbNo,
    FlightNo,
    PortOfLoading,
    PortOfDischarge,
    FreightDate,
    Consolidator,
    PreparedBy,
    Remark,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum CargoManifestItems {
    Table,
    Id,
    CargoManifestId,
    Position,
    HawbNo,
    Pieces,
    GrossWeight,
    Destination,
    Commodity,
    Shipper,
    Consignee,
}

#[derive(Iden)]
enum WeightSlips {
    Table,
    Id,
    MawbInfoId,
    StatusId,
    SlipNo,
    MawbNo,
    FlightNo,
    Destination,
    GrossWeight,
    Remark,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum WeightSlipDimensions {
    Table,
    Id,
    WeightSlipId,
    Position,
    LengthCm,
    WidthCm,
    HeightCm,
    Pieces,
}
