//! Packages and deliveries from the event log.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Event type attached to a package (carrier, colours, icon).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventType {
    pub id: String,
    #[serde(default)]
    pub abbreviated_description: String,
    #[serde(default)]
    pub event_background_color: String,
    #[serde(default)]
    pub event_font_color: String,
    #[serde(default)]
    pub icon_url: Option<String>,
}

/// A package/delivery entry from the event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: String,
    #[serde(default)]
    pub counter: i64,
    #[serde(default)]
    pub open_comment: Option<String>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub open_utc: Option<DateTime<Utc>>,
    #[serde(default)]
    pub event_type: Option<EventType>,
}

impl Package {
    /// Carrier name, `"Unknown"` when the event type is missing.
    pub fn carrier(&self) -> &str {
        self.event_type
            .as_ref()
            .map(|t| t.abbreviated_description.as_str())
            .unwrap_or("Unknown")
    }

    /// Tracking number; the front desk records it as the open comment.
    pub fn tracking_number(&self) -> Option<&str> {
        self.open_comment.as_deref()
    }
}

/// Envelope returned by the resident event log endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageResponse {
    #[serde(default)]
    pub last_record_version: Option<String>,
    #[serde(default)]
    pub entities: Vec<Package>,
}

/// Accepts RFC 3339 timestamps and naive timestamps (read as UTC).
fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };
    if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(parsed.with_timezone(&Utc)));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| Some(naive.and_utc()))
        .map_err(serde::de::Error::custom)
}
