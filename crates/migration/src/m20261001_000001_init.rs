use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).blob().not_null().primary_key())
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::DisplayName).string())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Statuses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Statuses::Id).blob().not_null().primary_key())
                    .col(
                        ColumnDef::new(Statuses::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Statuses::Description).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StatusDefaults::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StatusDefaults::EntityType)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StatusDefaults::StatusId).blob().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-status_defaults-status_id")
                            .from(StatusDefaults::Table, StatusDefaults::StatusId)
                            .to(Statuses::Table, Statuses::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MawbInfos::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(MawbInfos::Id).blob().not_null().primary_key())
                    .col(
                        ColumnDef::new(MawbInfos::MawbNo)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(MawbInfos::Airline).string())
                    .col(ColumnDef::new(MawbInfos::Origin).string())
                    .col(ColumnDef::new(MawbInfos::Destination).string())
                    .col(ColumnDef::new(MawbInfos::FlightNo).string())
                    .col(ColumnDef::new(MawbInfos::FlightDate).date())
                    .col(
                        ColumnDef::new(MawbInfos::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MawbInfos::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UploadLogs::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UploadLogs::Id).blob().not_null().primary_key())
                    .col(ColumnDef::new(UploadLogs::FileName).string().not_null())
                    .col(ColumnDef::new(UploadLogs::ContentType).string())
                    .col(
                        ColumnDef::new(UploadLogs::SizeBytes)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(UploadLogs::StorageKey).string().not_null())
                    .col(ColumnDef::new(UploadLogs::MawbInfoId).blob())
                    .col(ColumnDef::new(UploadLogs::UploadedBy).string().not_null())
                    .col(
                        ColumnDef::new(UploadLogs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-upload_logs-mawb_info_id")
                            .from(UploadLogs::Table, UploadLogs::MawbInfoId)
                            .to(MawbInfos::Table, MawbInfos::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UploadLogs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MawbInfos::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StatusDefaults::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Statuses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Users {
    Table,
    Id,
    Username,
    PasswordHash,
    DisplayName,
    CreatedAt,
}

#[derive(Iden)]
pub enum Statuses {
    Table,
    Id,
    Name,
    Description,
}

#[derive(Iden)]
pub enum StatusDefaults {
    Table,
    EntityType,
    StatusId,
}

#[derive(Iden)]
pub enum MawbInfos {
    Table,
    Id,
    MawbNo,
    Airline,
    Origin,
    Destination,
    FlightNo,
    FlightDate,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
pub enum UploadLogs {
    Table,
    Id,
    FileName,
    ContentType,
    SizeBytes,
    StorageKey,
    MawbInfoId,
    UploadedBy,
    CreatedAt,
}
