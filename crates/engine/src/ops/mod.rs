use std::{future::Future, time::Duration};

use sea_orm::DatabaseConnection;

use crate::{EngineError, ResultEngine};

mod cargo_manifests;
mod dashboard;
mod mawb_infos;
mod records;
mod statuses;
mod uploads;
mod users;
mod weight_slips;

pub use dashboard::{Dashboard, StatusCount};
pub use mawb_infos::MawbOption;

/// Upper bound of a single engine operation when the builder sets none.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(10);

/// Run a block inside a DB transaction, committing on success and rolling back
/// on error.
///
/// The block is evaluated as an async block, so `?` and `return` inside it
/// leave the block, not the caller. The engine deadline covers `BEGIN` and the
/// block; once the block has succeeded the commit always runs to completion,
/// so [`EngineError::Timeout`] means nothing was written. If the enclosing
/// future is dropped before commit the transaction guard rolls back on drop.
///
/// Errors are tagged with `$operation` like [`Engine::run_op`] does.
macro_rules! with_tx {
    ($self:expr, $operation:expr, |$tx:ident| $body:expr) => {
        $self
            .report(
                $operation,
                $crate::ops::tx_scope(async {
                    let $tx = $self
                        .bounded($operation, async {
                            $self.database.begin().await.map_err($crate::EngineError::from)
                        })
                        .await?;
                    let result = $self
                        .bounded($operation, $crate::ops::tx_scope(async { $body }))
                        .await;
                    match result {
                        Ok(value) => {
                            $tx.commit().await?;
                            Ok(value)
                        }
                        Err(err) => {
                            if let Err(rollback_err) = $tx.rollback().await {
                                tracing::warn!("rollback failed: {rollback_err}");
                            }
                            Err(err)
                        }
                    }
                }),
            )
            .await
    };
}

pub(crate) use with_tx;

/// Pins the output type of a transaction body so `?` inside it converts into
/// [`EngineError`].
pub(crate) fn tx_scope<T, F>(body: F) -> F
where
    F: Future<Output = ResultEngine<T>>,
{
    body
}

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
    operation_timeout: Duration,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Run a read `operation` under the engine deadline and tag storage errors
    /// with its name.
    ///
    /// Callers may race the returned future against their own deadline; the
    /// earlier one wins. Writes go through [`with_tx!`] instead.
    async fn run_op<T, F>(&self, operation: &str, fut: F) -> ResultEngine<T>
    where
        F: Future<Output = ResultEngine<T>>,
    {
        self.report(operation, self.bounded(operation, fut)).await
    }

    /// Fail with [`EngineError::Timeout`] if `fut` outlives the engine
    /// deadline. `fut` is dropped on expiry.
    async fn bounded<T, F>(&self, operation: &str, fut: F) -> ResultEngine<T>
    where
        F: Future<Output = ResultEngine<T>>,
    {
        match tokio::time::timeout(self.operation_timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(operation, timeout = ?self.operation_timeout, "operation timed out");
                Err(EngineError::Timeout(operation.to_string()))
            }
        }
    }

    /// Tag database errors with `operation` and log them.
    async fn report<T, F>(&self, operation: &str, fut: F) -> ResultEngine<T>
    where
        F: Future<Output = ResultEngine<T>>,
    {
        fut.await.map_err(|err| {
            let err = err.during(operation);
            if matches!(err, EngineError::Storage { .. } | EngineError::Configuration(_)) {
                tracing::error!(operation, "{err}");
            } else {
                tracing::debug!(operation, "{err}");
            }
            err
        })
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
    operation_timeout: Option<Duration>,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Upper bound of every engine operation. Defaults to
    /// [`DEFAULT_OPERATION_TIMEOUT`].
    pub fn operation_timeout(mut self, timeout: Duration) -> EngineBuilder {
        self.operation_timeout = Some(timeout);
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        let operation_timeout = self.operation_timeout.unwrap_or(DEFAULT_OPERATION_TIMEOUT);
        if operation_timeout.is_zero() {
            return Err(EngineError::Configuration(
                "operation timeout must be > 0".to_string(),
            ));
        }
        Ok(Engine {
            database: self.database,
            operation_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use migration::MigratorTrait;
    use sea_orm::{Database, DbErr, EntityTrait, PaginatorTrait, TransactionTrait};
    use tokio::sync::oneshot;

    use super::*;
    use super::{cargo_manifests::CargoManifests, statuses::default_status};
    use crate::{
        CargoManifestFields, CargoManifestItem, MawbInfoCmd, RecordKind,
        records::{RecordRow, RecordStore},
    };

    async fn engine(timeout: Duration) -> Engine {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        migration::Migrator::up(&db, None).await.unwrap();
        Engine::builder()
            .database(db)
            .operation_timeout(timeout)
            .build()
            .await
            .unwrap()
    }

    async fn manifest_row(engine: &Engine) -> RecordRow<CargoManifestFields, CargoManifestItem> {
        let mawb = engine
            .create_mawb_info(MawbInfoCmd::new("176-12345675"))
            .await
            .unwrap();
        let status = default_status(&engine.database, RecordKind::CargoManifest)
            .await
            .unwrap();
        RecordRow {
            mawb_info_id: mawb.id,
            status_id: status.id,
            fields: CargoManifestFields::new(&mawb.mawb_no),
            children: vec![
                CargoManifestItem::new("HAWB-001", 3, 120.5),
                CargoManifestItem::new("HAWB-002", 1, 40.0),
            ],
        }
    }

    async fn stored_manifest_rows(engine: &Engine) -> (u64, u64) {
        let parents = crate::cargo_manifests::Entity::find()
            .count(&engine.database)
            .await
            .unwrap();
        let items = crate::cargo_manifest_items::Entity::find()
            .count(&engine.database)
            .await
            .unwrap();
        (parents, items)
    }

    #[tokio::test]
    async fn run_op_times_out_pending_work() {
        let engine = Engine::builder()
            .operation_timeout(Duration::from_millis(10))
            .build()
            .await
            .unwrap();
        let result: ResultEngine<()> = engine
            .run_op("list_cargo_manifests", std::future::pending())
            .await;
        assert_eq!(
            result,
            Err(EngineError::Timeout("list_cargo_manifests".to_string()))
        );
    }

    #[tokio::test]
    async fn run_op_tags_database_errors() {
        let engine = Engine::builder().build().await.unwrap();
        let result: ResultEngine<()> = engine
            .run_op("list_uploads", async {
                Err(EngineError::Database(DbErr::Custom("gone".to_string())))
            })
            .await;
        assert!(matches!(
            result,
            Err(EngineError::Storage { ref operation, .. }) if operation == "list_uploads"
        ));
    }

    #[tokio::test]
    async fn deadline_inside_transaction_rolls_back_the_create() {
        let engine = engine(Duration::from_millis(200)).await;
        let row = manifest_row(&engine).await;

        let result: ResultEngine<()> = with_tx!(engine, "create_cargo_manifest", |db_tx| {
            CargoManifests::insert(&db_tx, row).await?;
            std::future::pending::<()>().await;
            Ok(())
        });

        assert_eq!(
            result,
            Err(EngineError::Timeout("create_cargo_manifest".to_string()))
        );
        assert_eq!(stored_manifest_rows(&engine).await, (0, 0));
    }

    #[tokio::test]
    async fn dropping_a_create_mid_transaction_rolls_it_back() {
        let engine = engine(DEFAULT_OPERATION_TIMEOUT).await;
        let row = manifest_row(&engine).await;
        let (inserted_tx, inserted_rx) = oneshot::channel();

        let create = async {
            let result: ResultEngine<()> = with_tx!(engine, "create_cargo_manifest", |db_tx| {
                CargoManifests::insert(&db_tx, row).await?;
                let _ = inserted_tx.send(());
                std::future::pending::<()>().await;
                Ok(())
            });
            result
        };
        tokio::select! {
            result = create => panic!("create finished before being dropped: {result:?}"),
            _ = inserted_rx => {}
        }

        assert_eq!(stored_manifest_rows(&engine).await, (0, 0));
    }

    #[tokio::test]
    async fn completed_body_is_committed() {
        let engine = engine(DEFAULT_OPERATION_TIMEOUT).await;
        let row = manifest_row(&engine).await;

        let result: ResultEngine<uuid::Uuid> = with_tx!(engine, "create_cargo_manifest", |db_tx| {
            let manifest = CargoManifests::insert(&db_tx, row).await?;
            Ok(manifest.id)
        });

        assert!(result.is_ok());
        assert_eq!(stored_manifest_rows(&engine).await, (1, 2));
    }

    #[tokio::test]
    async fn zero_timeout_is_rejected() {
        let result = Engine::builder()
            .operation_timeout(Duration::ZERO)
            .build()
            .await;
        assert!(matches!(result, Err(EngineError::Configuration(_))));
    }
}
