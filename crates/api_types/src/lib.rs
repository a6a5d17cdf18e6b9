use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `?from=&to=` filter on creation time, RFC 3339 with offset.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DateRangeQuery {
    pub from: Option<DateTime<FixedOffset>>,
    pub to: Option<DateTime<FixedOffset>>,
}

pub mod mawb {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MawbInfoNew {
        pub mawb_no: String,
        pub airline: Option<String>,
        pub origin: Option<String>,
        pub destination: Option<String>,
        pub flight_no: Option<String>,
        pub flight_date: Option<NaiveDate>,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    pub struct MawbInfo {
        pub id: Uuid,
        pub mawb_no: String,
        pub airline: Option<String>,
        pub origin: Option<String>,
        pub destination: Option<String>,
        pub flight_no: Option<String>,
        pub flight_date: Option<NaiveDate>,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    /// Dropdown entry.
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    pub struct MawbOption {
        pub id: Uuid,
        pub mawb_no: String,
    }
}

pub mod status {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    pub struct Status {
        pub id: Uuid,
        pub name: String,
        pub description: Option<String>,
    }

    /// Body of `PATCH …/mawb/{mawb_info_id}/status`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct StatusUpdate {
        pub status_id: Uuid,
    }
}

pub mod cargo_manifest {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct CargoManifestItem {
        pub hawb_no: String,
        pub pieces: i32,
        pub gross_weight: f64,
        pub destination: Option<String>,
        pub commodity: Option<String>,
        pub shipper: Option<String>,
        pub consignee: Option<String>,
    }

    /// Create and update body.
    ///
    /// `id` and `status_id` may be echoed back from a previous read; the
    /// server ignores both.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CargoManifestPayload {
        pub id: Option<Uuid>,
        pub mawb_info_id: Uuid,
        pub status_id: Option<Uuid>,
        pub mawb_no: String,
        pub flight_no: Option<String>,
        pub port_of_loading: Option<String>,
        pub port_of_discharge: Option<String>,
        pub freight_date: Option<NaiveDate>,
        pub consolidator: Option<String>,
        pub prepared_by: Option<String>,
        pub remark: Option<String>,
        #[serde(default)]
        pub items: Vec<CargoManifestItem>,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    pub struct CargoManifest {
        pub id: Uuid,
        pub mawb_info_id: Uuid,
        pub status_id: Uuid,
        pub status_name: Option<String>,
        pub mawb_no: String,
        pub flight_no: Option<String>,
        pub port_of_loading: Option<String>,
        pub port_of_discharge: Option<String>,
        pub freight_date: Option<NaiveDate>,
        pub consolidator: Option<String>,
        pub prepared_by: Option<String>,
        pub remark: Option<String>,
        pub items: Vec<CargoManifestItem>,
        pub total_pieces: i64,
        pub total_gross_weight: f64,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }
}

pub mod weight_slip {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct WeightSlipDimension {
        pub length_cm: f64,
        pub width_cm: f64,
        pub height_cm: f64,
        pub pieces: i32,
    }

    /// Create and update body. `id` and `status_id` are ignored.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct WeightSlipPayload {
        pub id: Option<Uuid>,
        pub mawb_info_id: Uuid,
        pub status_id: Option<Uuid>,
        pub slip_no: String,
        pub mawb_no: String,
        pub flight_no: Option<String>,
        pub destination: Option<String>,
        pub gross_weight: f64,
        pub remark: Option<String>,
        #[serde(default)]
        pub dimensions: Vec<WeightSlipDimension>,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    pub struct WeightSlip {
        pub id: Uuid,
        pub mawb_info_id: Uuid,
        pub status_id: Uuid,
        pub status_name: Option<String>,
        pub slip_no: String,
        pub mawb_no: String,
        pub flight_no: Option<String>,
        pub destination: Option<String>,
        pub gross_weight: f64,
        pub remark: Option<String>,
        pub dimensions: Vec<WeightSlipDimension>,
        pub total_pieces: i64,
        /// Kilograms, L x W x H (cm) x pieces / 6000.
        pub volume_weight: f64,
        /// Greater of gross and volume weight.
        pub chargeable_weight: f64,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }
}

pub mod upload {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UploadNew {
        pub file_name: String,
        pub content_type: Option<String>,
        pub size_bytes: i64,
        pub storage_key: String,
        pub mawb_info_id: Option<Uuid>,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    pub struct Upload {
        pub id: Uuid,
        pub file_name: String,
        pub content_type: Option<String>,
        pub size_bytes: i64,
        pub storage_key: String,
        pub mawb_info_id: Option<Uuid>,
        pub uploaded_by: String,
        pub created_at: DateTime<Utc>,
    }
}

pub mod dashboard {
    use super::*;

    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct StatusCount {
        pub status: String,
        pub count: i64,
    }

    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Dashboard {
        pub mawb_count: u64,
        pub cargo_manifest_count: u64,
        pub weight_slip_count: u64,
        pub upload_count: u64,
        pub cargo_manifest_statuses: Vec<StatusCount>,
        pub weight_slip_statuses: Vec<StatusCount>,
    }
}

pub mod user {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    pub struct Me {
        pub id: Uuid,
        pub username: String,
        pub display_name: Option<String>,
    }
}
