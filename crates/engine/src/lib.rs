//! Air-cargo back-office engine.
//!
//! Owns the database schema entities and every write path: MAWB registry,
//! cargo manifests, weight slips, upload log and users. Cargo manifests and
//! weight slips share one orchestration: a transaction that checks the MAWB
//! has no record yet, resolves the default status and writes the parent row
//! together with its lines.

pub use cargo_manifest_items::CargoManifestItem;
pub use cargo_manifests::{CargoManifest, CargoManifestFields};
pub use commands::{CargoManifestCmd, MawbInfoCmd, UploadLogCmd, WeightSlipCmd};
pub use error::EngineError;
pub use mawb_infos::MawbInfo;
pub use ops::{Dashboard, Engine, EngineBuilder, MawbOption, StatusCount};
pub use password::{MIN_PASSWORD_LENGTH, is_acceptable_password};
pub use records::{DateRange, RecordDraft, RecordKind, Validate};
pub use statuses::Status;
pub use upload_logs::UploadLog;
pub use users::User;
pub use weight_slip_dimensions::{VOLUMETRIC_DIVISOR, WeightSlipDimension};
pub use weight_slips::{WeightSlip, WeightSlipFields};

mod cargo_manifest_items;
mod cargo_manifests;
mod commands;
mod error;
mod mawb_infos;
mod ops;
mod password;
mod records;
mod status_defaults;
mod statuses;
mod upload_logs;
mod users;
mod util;
mod weight_slip_dimensions;
mod weight_slips;

type ResultEngine<T> = Result<T, EngineError>;
