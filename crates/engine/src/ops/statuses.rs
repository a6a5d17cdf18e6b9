use sea_orm::{
    ActiveValue, ConnectionTrait, QueryOrder, TransactionTrait, prelude::*,
    sea_query::OnConflict,
};
use uuid::Uuid;

use crate::{
    EngineError, RecordKind, ResultEngine, Status, status_defaults, statuses,
    util::{normalize_optional_text, require_text},
};

use super::{Engine, with_tx};

/// Resolve the default status configured for `kind`.
///
/// A missing default is a deployment defect, reported as
/// [`EngineError::Configuration`].
pub(super) async fn default_status<C: ConnectionTrait>(
    db: &C,
    kind: RecordKind,
) -> ResultEngine<statuses::Model> {
    let found = status_defaults::Entity::find_by_id(kind.as_str().to_string())
        .find_also_related(statuses::Entity)
        .one(db)
        .await?;
    match found {
        Some((_, Some(status))) => Ok(status),
        _ => Err(EngineError::Configuration(format!(
            "no default status configured for {kind}"
        ))),
    }
}

pub(super) async fn require_status<C: ConnectionTrait>(
    db: &C,
    status_id: Uuid,
) -> ResultEngine<statuses::Model> {
    statuses::Entity::find_by_id(status_id)
        .one(db)
        .await?
        .ok_or_else(|| EngineError::KeyNotFound("status not exists".to_string()))
}

impl Engine {
    /// The whole status catalog, ordered by name.
    pub async fn statuses(&self) -> ResultEngine<Vec<Status>> {
        self.run_op("list_statuses", async {
            let models = statuses::Entity::find()
                .order_by_asc(statuses::Column::Name)
                .all(&self.database)
                .await?;
            Ok(models.into_iter().map(Status::from).collect())
        })
        .await
    }

    pub async fn default_status(&self, kind: RecordKind) -> ResultEngine<Status> {
        self.run_op("default_status", async {
            default_status(&self.database, kind).await.map(Status::from)
        })
        .await
    }

    /// Add a catalog entry. Names are unique, compared case-sensitively.
    pub async fn create_status(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> ResultEngine<Status> {
        require_text(name, "status name")?;
        let name = name.trim().to_string();
        with_tx!(self, "create_status", |db_tx| {
            let exists = statuses::Entity::find()
                .filter(statuses::Column::Name.eq(name.clone()))
                .one(&db_tx)
                .await?
                .is_some();
            if exists {
                return Err(EngineError::ExistingKey(name));
            }

            let model = statuses::ActiveModel {
                id: ActiveValue::Set(Uuid::new_v4()),
                name: ActiveValue::Set(name.clone()),
                description: ActiveValue::Set(normalize_optional_text(description)),
            }
            .insert(&db_tx)
            .await
            .map_err(|err| EngineError::from_write(err, name.clone()))?;
            Ok(Status::from(model))
        })
    }

    /// Point the default of `kind` at `status_id`, replacing any previous one.
    pub async fn set_default_status(&self, kind: RecordKind, status_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, "set_default_status", |db_tx| {
            require_status(&db_tx, status_id).await?;
            status_defaults::Entity::insert(status_defaults::ActiveModel {
                entity_type: ActiveValue::Set(kind.as_str().to_string()),
                status_id: ActiveValue::Set(status_id),
            })
            .on_conflict(
                OnConflict::column(status_defaults::Column::EntityType)
                    .update_column(status_defaults::Column::StatusId)
                    .to_owned(),
            )
            .exec(&db_tx)
            .await?;
            tracing::info!(%kind, %status_id, "default status updated");
            Ok(())
        })
    }
}
