use sea_orm::{ConnectionTrait, Statement};
use sea_orm_migration::prelude::*;
use uuid::Uuid;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Initial status catalog: `(name, description)`.
const STATUSES: [(&str, &str); 4] = [
    ("DRAFT", "Being prepared, not yet submitted"),
    ("SUBMITTED", "Submitted for review"),
    ("APPROVED", "Reviewed and approved"),
    ("CLOSED", "Shipment closed, no further changes expected"),
];

const DEFAULT_STATUS: &str = "DRAFT";

const RECORD_KINDS: [&str; 2] = ["cargo_manifest", "weight_slip"];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        let backend = db.get_database_backend();

        let mut default_id = None;
        for (name, description) in STATUSES {
            let id = Uuid::new_v4();
            if name == DEFAULT_STATUS {
                default_id = Some(id);
            }
            db.execute(Statement::from_sql_and_values(
                backend,
                "INSERT INTO statuses (id, name, description) VALUES (?, ?, ?);",
                vec![id.into(), name.into(), description.into()],
            ))
            .await?;
        }

        let default_id = default_id
            .ok_or_else(|| DbErr::Migration(format!("{DEFAULT_STATUS} status not seeded")))?;
        for kind in RECORD_KINDS {
            db.execute(Statement::from_sql_and_values(
                backend,
                "INSERT INTO status_defaults (entity_type, status_id) VALUES (?, ?);",
                vec![kind.into(), default_id.into()],
            ))
            .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DELETE FROM status_defaults;").await?;
        for (name, _) in STATUSES {
            db.execute(Statement::from_sql_and_values(
                db.get_database_backend(),
                "DELETE FROM statuses WHERE name = ?;",
                vec![name.into()],
            ))
            .await?;
        }
        Ok(())
    }
}
