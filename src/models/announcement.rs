use serde::{Deserialize, Serialize};

/// An active building announcement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Announcement {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub start_date: String,
    pub end_date: String,
}

/// A resident calendar event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalendarEvent {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub start_date_time: String,
    pub end_date_time: String,
    pub location: String,
}
