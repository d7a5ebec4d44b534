//! Maintenance requests.

use bon::Builder;
use serde::{Deserialize, Serialize};

/// A maintenance request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MaintenanceRequest {
    pub id: i64,
    pub subject: String,
    pub description: String,
    pub status: String,
    pub created_date: String,
    pub category: String,
}

/// Paged envelope returned by the maintenance service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MaintenanceResponse {
    pub items: Vec<MaintenanceRequest>,
    pub total_count: i64,
}

/// Query sent with a maintenance listing.
///
/// The defaults list every open request, on hold or not, in a single page.
///
/// # Example
/// ```
/// use buildinglink::models::MaintenanceFilter;
///
/// let filter = MaintenanceFilter::builder().include_closed_requests(true).build();
/// assert!(filter.include_closed_requests);
/// assert_eq!(filter.size, 10_000);
/// ```
#[derive(Debug, Clone, Builder, PartialEq, Eq)]
pub struct MaintenanceFilter {
    #[builder(default = true)]
    pub on_hold_until: bool,
    #[builder(default = true)]
    pub on_hold_indefinitely: bool,
    #[builder(default)]
    pub include_closed_requests: bool,
    #[builder(default)]
    pub include_deactivated_units: bool,
    #[builder(default = 1)]
    pub page: u32,
    #[builder(default = 10_000)]
    pub size: u32,
}

impl Default for MaintenanceFilter {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl MaintenanceFilter {
    pub(crate) fn to_body(&self) -> serde_json::Value {
        serde_json::json!({
            "filterBy": {
                "onHoldUntil": self.on_hold_until,
                "onHoldIndefinitely": self.on_hold_indefinitely,
                "includeClosedRequests": self.include_closed_requests,
                "includeDeactivatedUnits": self.include_deactivated_units,
            },
            "current": self.page,
            "size": self.size,
        })
    }
}
