//! Parent/child records keyed by a MAWB.
//!
//! A record is a parent row (cargo manifest, weight slip) owned by exactly one
//! [`mawb_infos`](crate::mawb_infos) row, plus an ordered list of child line
//! items. There is at most one record of each kind per MAWB.
//!
//! [`RecordStore`] is the persistence contract every record kind implements;
//! the orchestration in `ops::records` is written once against it.

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::ConnectionTrait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

/// Record type tag, also the key of the `status_defaults` table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    CargoManifest,
    WeightSlip,
}

impl RecordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CargoManifest => "cargo_manifest",
            Self::WeightSlip => "weight_slip",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for RecordKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "cargo_manifest" => Ok(Self::CargoManifest),
            "weight_slip" => Ok(Self::WeightSlip),
            other => Err(EngineError::InvalidInput(format!(
                "invalid record kind: {other}"
            ))),
        }
    }
}

/// Payload validation shared by record fields and child line items.
pub trait Validate {
    fn validate(&self) -> ResultEngine<()>;
}

/// Create/update payload for a record.
///
/// The same shape serves both operations. `id` and `status_id` are accepted so
/// that clients can echo back what they read, but they never decide which row
/// is written nor which status it gets.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordDraft<F, C> {
    pub id: Option<Uuid>,
    pub mawb_info_id: Uuid,
    pub status_id: Option<Uuid>,
    pub fields: F,
    pub children: Vec<C>,
}

impl<F, C> RecordDraft<F, C> {
    #[must_use]
    pub fn new(mawb_info_id: Uuid, fields: F) -> Self {
        Self {
            id: None,
            mawb_info_id,
            status_id: None,
            fields,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn status_id(mut self, status_id: Uuid) -> Self {
        self.status_id = Some(status_id);
        self
    }

    #[must_use]
    pub fn child(mut self, child: C) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn children(mut self, children: Vec<C>) -> Self {
        self.children = children;
        self
    }
}

impl<F: Validate, C: Validate> Validate for RecordDraft<F, C> {
    fn validate(&self) -> ResultEngine<()> {
        self.fields.validate()?;
        self.children.iter().try_for_each(Validate::validate)
    }
}

/// What the store writes: everything but the server-assigned id and
/// timestamps.
#[derive(Clone, Debug)]
pub(crate) struct RecordRow<F, C> {
    pub(crate) mawb_info_id: Uuid,
    pub(crate) status_id: Uuid,
    pub(crate) fields: F,
    pub(crate) children: Vec<C>,
}

/// Inclusive filter on `created_at`. Open ends are unbounded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new(from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> ResultEngine<Self> {
        if let (Some(from), Some(to)) = (from, to)
            && from > to
        {
            return Err(EngineError::InvalidInput(
                "date range start is after its end".to_string(),
            ));
        }
        Ok(Self { from, to })
    }
}

/// Persistence contract of one record kind.
///
/// Every method takes the connection explicitly so the same code runs on a
/// pooled connection or inside a transaction.
#[async_trait]
pub(crate) trait RecordStore {
    const KIND: RecordKind;

    type Fields: Validate + Clone + Send + Sync + 'static;
    type Child: Validate + Clone + Send + Sync + 'static;
    type Record: Send + 'static;

    async fn find_by_mawb<C: ConnectionTrait>(
        db: &C,
        mawb_info_id: Uuid,
    ) -> ResultEngine<Option<Self::Record>>;

    async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid)
    -> ResultEngine<Option<Self::Record>>;

    async fn find_all<C: ConnectionTrait>(
        db: &C,
        range: DateRange,
    ) -> ResultEngine<Vec<Self::Record>>;

    /// Insert the parent with a fresh id and timestamps, then its children.
    async fn insert<C: ConnectionTrait>(
        db: &C,
        row: RecordRow<Self::Fields, Self::Child>,
    ) -> ResultEngine<Self::Record>;

    /// Overwrite the parent `id` in place and replace all of its children.
    async fn replace<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
        row: RecordRow<Self::Fields, Self::Child>,
    ) -> ResultEngine<Self::Record>;

    fn record_id(record: &Self::Record) -> Uuid;

    fn into_row(record: Self::Record) -> RecordRow<Self::Fields, Self::Child>;
}
