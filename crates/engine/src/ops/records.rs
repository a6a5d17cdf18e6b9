//! Transaction-guarded record operations, written once over [`RecordStore`].
//!
//! Every kind of record goes through the same three write paths:
//!
//! - **create**: one record per MAWB, status forced to the configured default;
//! - **update**: the target row is resolved from the MAWB, never from the
//!   payload id, and the status is reset to the default;
//! - **update status**: only the status changes, children are rewritten
//!   unchanged.
//!
//! Each path runs in a single transaction; any error rolls it back and is
//! returned as is. The engine deadline stops at commit: a write that reports
//! [`EngineError::Timeout`] left nothing behind.

use sea_orm::TransactionTrait;
use uuid::Uuid;

use crate::{
    DateRange, EngineError, RecordDraft, ResultEngine,
    records::{RecordRow, RecordStore, Validate},
};

use super::{
    Engine,
    mawb_infos::require_mawb_info,
    statuses::{default_status, require_status},
    with_tx,
};

type Draft<S> = RecordDraft<<S as RecordStore>::Fields, <S as RecordStore>::Child>;

fn into_row<S: RecordStore>(draft: Draft<S>, status_id: Uuid) -> RecordRow<S::Fields, S::Child> {
    RecordRow {
        mawb_info_id: draft.mawb_info_id,
        status_id,
        fields: draft.fields,
        children: draft.children,
    }
}

pub(crate) async fn create_record<S: RecordStore>(
    engine: &Engine,
    operation: &str,
    draft: Draft<S>,
) -> ResultEngine<S::Record> {
    draft.validate()?;
    let mawb_info_id = draft.mawb_info_id;
    with_tx!(engine, operation, |db_tx| {
        if S::find_by_mawb(&db_tx, mawb_info_id).await?.is_some() {
            return Err(EngineError::ExistingKey(mawb_info_id.to_string()));
        }
        require_mawb_info(&db_tx, mawb_info_id).await?;
        let status = default_status(&db_tx, S::KIND).await?;

        let record = S::insert(&db_tx, into_row::<S>(draft, status.id)).await?;
        tracing::info!(
            kind = %S::KIND,
            %mawb_info_id,
            id = %S::record_id(&record),
            "record created"
        );
        Ok(record)
    })
}

pub(crate) async fn update_record<S: RecordStore>(
    engine: &Engine,
    operation: &str,
    draft: Draft<S>,
) -> ResultEngine<S::Record> {
    draft.validate()?;
    let mawb_info_id = draft.mawb_info_id;
    with_tx!(engine, operation, |db_tx| {
        let existing = S::find_by_mawb(&db_tx, mawb_info_id)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(mawb_info_id.to_string()))?;
        let id = S::record_id(&existing);
        if let Some(claimed) = draft.id
            && claimed != id
        {
            tracing::debug!(kind = %S::KIND, %claimed, %id, "ignoring payload id");
        }
        let status = default_status(&db_tx, S::KIND).await?;

        let record = S::replace(&db_tx, id, into_row::<S>(draft, status.id)).await?;
        tracing::info!(kind = %S::KIND, %mawb_info_id, %id, "record updated");
        Ok(record)
    })
}

pub(crate) async fn update_record_status<S: RecordStore>(
    engine: &Engine,
    operation: &str,
    mawb_info_id: Uuid,
    status_id: Uuid,
) -> ResultEngine<S::Record> {
    with_tx!(engine, operation, |db_tx| {
        let existing = S::find_by_mawb(&db_tx, mawb_info_id)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(mawb_info_id.to_string()))?;
        require_status(&db_tx, status_id).await?;

        let id = S::record_id(&existing);
        let row = RecordRow {
            status_id,
            ..S::into_row(existing)
        };
        let record = S::replace(&db_tx, id, row).await?;
        tracing::info!(kind = %S::KIND, %mawb_info_id, %status_id, "record status changed");
        Ok(record)
    })
}

pub(crate) async fn record_by_mawb<S: RecordStore>(
    engine: &Engine,
    mawb_info_id: Uuid,
) -> ResultEngine<Option<S::Record>> {
    S::find_by_mawb(&engine.database, mawb_info_id).await
}

pub(crate) async fn record_by_id<S: RecordStore>(
    engine: &Engine,
    id: Uuid,
) -> ResultEngine<S::Record> {
    S::find_by_id(&engine.database, id)
        .await?
        .ok_or_else(|| EngineError::KeyNotFound(id.to_string()))
}

pub(crate) async fn records<S: RecordStore>(
    engine: &Engine,
    range: DateRange,
) -> ResultEngine<Vec<S::Record>> {
    S::find_all(&engine.database, range).await
}

/// Public `Engine` API of one record kind.
///
/// Expands, inside an `impl Engine` block, to the six operations named by the
/// caller. Each one uses its own name as the operation tag.
macro_rules! impl_record_ops {
    (
        $store:ty => $record:ty, $cmd:ty;
        create: $create:ident,
        update: $update:ident,
        update_status: $update_status:ident,
        by_mawb: $by_mawb:ident,
        by_id: $by_id:ident,
        list: $list:ident $(,)?
    ) => {
        /// Create the record of a MAWB with the default status.
        ///
        /// Fails with [`EngineError::ExistingKey`](crate::EngineError) if the
        /// MAWB already has one.
        pub async fn $create(&self, cmd: $cmd) -> $crate::ResultEngine<$record> {
            $crate::ops::records::create_record::<$store>(self, stringify!($create), cmd).await
        }

        /// Rewrite the record of `cmd.mawb_info_id` and reset its status to
        /// the default. `cmd.id` and `cmd.status_id` are ignored.
        pub async fn $update(&self, cmd: $cmd) -> $crate::ResultEngine<$record> {
            $crate::ops::records::update_record::<$store>(self, stringify!($update), cmd).await
        }

        /// Move the record of a MAWB to `status_id`, keeping everything else.
        pub async fn $update_status(
            &self,
            mawb_info_id: uuid::Uuid,
            status_id: uuid::Uuid,
        ) -> $crate::ResultEngine<$record> {
            $crate::ops::records::update_record_status::<$store>(
                self,
                stringify!($update_status),
                mawb_info_id,
                status_id,
            )
            .await
        }

        pub async fn $by_mawb(
            &self,
            mawb_info_id: uuid::Uuid,
        ) -> $crate::ResultEngine<Option<$record>> {
            self.run_op(
                stringify!($by_mawb),
                $crate::ops::records::record_by_mawb::<$store>(self, mawb_info_id),
            )
            .await
        }

        pub async fn $by_id(&self, id: uuid::Uuid) -> $crate::ResultEngine<$record> {
            self.run_op(
                stringify!($by_id),
                $crate::ops::records::record_by_id::<$store>(self, id),
            )
            .await
        }

        /// Records created inside `range`, oldest first.
        pub async fn $list(
            &self,
            range: $crate::DateRange,
        ) -> $crate::ResultEngine<Vec<$record>> {
            self.run_op(
                stringify!($list),
                $crate::ops::records::records::<$store>(self, range),
            )
            .await
        }
    };
}

pub(crate) use impl_record_ops;

/// [`RecordStore`] for a parent entity with an ordered child entity.
///
/// The parent table carries `mawb_info_id` and `created_at`; the child table
/// carries the parent key and a `position` column. The entity modules provide
/// `ActiveModel::from_row` and `ActiveModel::from_child`, the record type
/// provides `from_models`. The caller brings the sea-orm query traits into
/// scope.
macro_rules! impl_record_store {
    (
        $store:ident => $record:ty {
            kind: $kind:ident,
            fields: $fields:ty,
            child: $child:ty,
            children: $children:ident,
            parent: $parent:ident,
            lines: $lines:ident by $parent_column:ident ($parent_field:ident),
            label: $label:literal $(,)?
        }
    ) => {
        #[doc = concat!("Storage of ", $label, " records and their lines.")]
        pub(crate) struct $store;

        impl $store {
            async fn load_lines<C: sea_orm::ConnectionTrait>(
                db: &C,
                parent_id: uuid::Uuid,
            ) -> $crate::ResultEngine<Vec<$crate::$lines::Model>> {
                Ok($crate::$lines::Entity::find()
                    .filter($crate::$lines::Column::$parent_column.eq(parent_id))
                    .order_by_asc($crate::$lines::Column::Position)
                    .all(db)
                    .await?)
            }

            async fn insert_lines<C: sea_orm::ConnectionTrait>(
                db: &C,
                parent_id: uuid::Uuid,
                lines: &[$child],
            ) -> $crate::ResultEngine<()> {
                if lines.is_empty() {
                    return Ok(());
                }
                let models = lines
                    .iter()
                    .enumerate()
                    .map(|(position, line)| {
                        let position = i32::try_from(position).map_err(|_| {
                            $crate::EngineError::InvalidInput(
                                concat!("too many ", $label, " lines").to_string(),
                            )
                        })?;
                        Ok($crate::$lines::ActiveModel::from_child(
                            parent_id, position, line,
                        ))
                    })
                    .collect::<$crate::ResultEngine<Vec<_>>>()?;
                $crate::$lines::Entity::insert_many(models)
                    .exec_without_returning(db)
                    .await?;
                Ok(())
            }

            async fn refetch<C: sea_orm::ConnectionTrait>(
                db: &C,
                id: uuid::Uuid,
            ) -> $crate::ResultEngine<$record> {
                <Self as $crate::records::RecordStore>::find_by_id(db, id)
                    .await?
                    .ok_or_else(|| {
                        $crate::EngineError::Database(sea_orm::DbErr::RecordNotFound(format!(
                            concat!($label, " {}"),
                            id
                        )))
                    })
            }
        }

        #[async_trait::async_trait]
        impl $crate::records::RecordStore for $store {
            const KIND: $crate::RecordKind = $crate::RecordKind::$kind;

            type Fields = $fields;
            type Child = $child;
            type Record = $record;

            async fn find_by_mawb<C: sea_orm::ConnectionTrait>(
                db: &C,
                mawb_info_id: uuid::Uuid,
            ) -> $crate::ResultEngine<Option<$record>> {
                let found = $crate::$parent::Entity::find()
                    .filter($crate::$parent::Column::MawbInfoId.eq(mawb_info_id))
                    .find_also_related($crate::statuses::Entity)
                    .one(db)
                    .await?;
                let Some((model, status)) = found else {
                    return Ok(None);
                };
                let lines = Self::load_lines(db, model.id).await?;
                Ok(Some(<$record>::from_models(model, status, lines)))
            }

            async fn find_by_id<C: sea_orm::ConnectionTrait>(
                db: &C,
                id: uuid::Uuid,
            ) -> $crate::ResultEngine<Option<$record>> {
                let found = $crate::$parent::Entity::find_by_id(id)
                    .find_also_related($crate::statuses::Entity)
                    .one(db)
                    .await?;
                let Some((model, status)) = found else {
                    return Ok(None);
                };
                let lines = Self::load_lines(db, model.id).await?;
                Ok(Some(<$record>::from_models(model, status, lines)))
            }

            async fn find_all<C: sea_orm::ConnectionTrait>(
                db: &C,
                range: $crate::DateRange,
            ) -> $crate::ResultEngine<Vec<$record>> {
                let mut query =
                    $crate::$parent::Entity::find().find_also_related($crate::statuses::Entity);
                if let Some(from) = range.from {
                    query = query.filter($crate::$parent::Column::CreatedAt.gte(from));
                }
                if let Some(to) = range.to {
                    query = query.filter($crate::$parent::Column::CreatedAt.lte(to));
                }
                let parents = query
                    .order_by_asc($crate::$parent::Column::CreatedAt)
                    .all(db)
                    .await?;
                if parents.is_empty() {
                    return Ok(Vec::new());
                }

                let ids: Vec<uuid::Uuid> = parents.iter().map(|(model, _)| model.id).collect();
                let mut lines_by_parent: std::collections::HashMap<
                    uuid::Uuid,
                    Vec<$crate::$lines::Model>,
                > = std::collections::HashMap::new();
                for line in $crate::$lines::Entity::find()
                    .filter($crate::$lines::Column::$parent_column.is_in(ids))
                    .order_by_asc($crate::$lines::Column::Position)
                    .all(db)
                    .await?
                {
                    lines_by_parent
                        .entry(line.$parent_field)
                        .or_default()
                        .push(line);
                }

                Ok(parents
                    .into_iter()
                    .map(|(model, status)| {
                        let lines = lines_by_parent.remove(&model.id).unwrap_or_default();
                        <$record>::from_models(model, status, lines)
                    })
                    .collect())
            }

            async fn insert<C: sea_orm::ConnectionTrait>(
                db: &C,
                row: $crate::records::RecordRow<$fields, $child>,
            ) -> $crate::ResultEngine<$record> {
                let id = uuid::Uuid::new_v4();
                let now = chrono::Utc::now();
                let mut model = $crate::$parent::ActiveModel::from_row(id, &row);
                model.created_at = sea_orm::ActiveValue::Set(now);
                model.updated_at = sea_orm::ActiveValue::Set(now);
                model.insert(db).await.map_err(|err| {
                    $crate::EngineError::from_write(err, row.mawb_info_id.to_string())
                })?;

                Self::insert_lines(db, id, &row.children).await?;
                Self::refetch(db, id).await
            }

            async fn replace<C: sea_orm::ConnectionTrait>(
                db: &C,
                id: uuid::Uuid,
                row: $crate::records::RecordRow<$fields, $child>,
            ) -> $crate::ResultEngine<$record> {
                let mut model = $crate::$parent::ActiveModel::from_row(id, &row);
                model.updated_at = sea_orm::ActiveValue::Set(chrono::Utc::now());
                model.update(db).await?;

                $crate::$lines::Entity::delete_many()
                    .filter($crate::$lines::Column::$parent_column.eq(id))
                    .exec(db)
                    .await?;
                Self::insert_lines(db, id, &row.children).await?;
                Self::refetch(db, id).await
            }

            fn record_id(record: &$record) -> uuid::Uuid {
                record.id
            }

            fn into_row(record: $record) -> $crate::records::RecordRow<$fields, $child> {
                $crate::records::RecordRow {
                    mawb_info_id: record.mawb_info_id,
                    status_id: record.status_id,
                    fields: record.fields,
                    children: record.$children,
                }
            }
        }
    };
}

pub(crate) use impl_record_store;
