//! Command structs for engine operations.
//!
//! These types group parameters for write operations, keeping call sites
//! readable and avoiding long argument lists.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    CargoManifestFields, CargoManifestItem, EngineError, ResultEngine, WeightSlipDimension,
    WeightSlipFields,
    records::RecordDraft,
    util::require_text,
};

/// Create or update a cargo manifest.
pub type CargoManifestCmd = RecordDraft<CargoManifestFields, CargoManifestItem>;

/// Create or update a weight slip.
pub type WeightSlipCmd = RecordDraft<WeightSlipFields, WeightSlipDimension>;

/// Register a MAWB.
#[derive(Clone, Debug)]
pub struct MawbInfoCmd {
    pub mawb_no: String,
    pub airline: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub flight_no: Option<String>,
    pub flight_date: Option<NaiveDate>,
}

impl MawbInfoCmd {
    #[must_use]
    pub fn new(mawb_no: impl Into<String>) -> Self {
        Self {
            mawb_no: mawb_no.into(),
            airline: None,
            origin: None,
            destination: None,
            flight_no: None,
            flight_date: None,
        }
    }

    #[must_use]
    pub fn airline(mut self, airline: impl Into<String>) -> Self {
        self.airline = Some(airline.into());
        self
    }

    #[must_use]
    pub fn route(mut self, origin: impl Into<String>, destination: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self.destination = Some(destination.into());
        self
    }

    #[must_use]
    pub fn flight(mut self, flight_no: impl Into<String>, flight_date: NaiveDate) -> Self {
        self.flight_no = Some(flight_no.into());
        self.flight_date = Some(flight_date);
        self
    }

    pub(crate) fn validate(&self) -> ResultEngine<()> {
        require_text(&self.mawb_no, "mawb_no")
    }
}

/// Record a file that was uploaded to object storage.
#[derive(Clone, Debug)]
pub struct UploadLogCmd {
    pub file_name: String,
    pub content_type: Option<String>,
    pub size_bytes: i64,
    pub storage_key: String,
    pub mawb_info_id: Option<Uuid>,
    pub uploaded_by: String,
}

impl UploadLogCmd {
    #[must_use]
    pub fn new(
        file_name: impl Into<String>,
        storage_key: impl Into<String>,
        size_bytes: i64,
        uploaded_by: impl Into<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            size_bytes,
            storage_key: storage_key.into(),
            mawb_info_id: None,
            uploaded_by: uploaded_by.into(),
        }
    }

    #[must_use]
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    #[must_use]
    pub fn mawb_info_id(mut self, mawb_info_id: Uuid) -> Self {
        self.mawb_info_id = Some(mawb_info_id);
        self
    }

    pub(crate) fn validate(&self) -> ResultEngine<()> {
        require_text(&self.file_name, "file_name")?;
        require_text(&self.storage_key, "storage_key")?;
        if self.size_bytes < 0 {
            return Err(EngineError::InvalidInput(
                "size_bytes must be >= 0".to_string(),
            ));
        }
        Ok(())
    }
}
