//! One accessor per resident endpoint.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use super::BuildingLinkClient;
use crate::config::ServiceHost;
use crate::error::Result;
use crate::models::{
    Amenity, AmenityReservation, Announcement, CalendarEvent, Contact, FrontDeskInstruction,
    FrontDeskInstructionType, MaintenanceFilter, MaintenanceRequest, MaintenanceResponse, Package,
    PackageResponse, Property, UserProfile,
};

const PROPERTIES_PATH: &str = "/Properties/AuthenticatedUser/v1/property/authorized-properties";
const PACKAGES_PATH: &str = "/event-log/integrations/resident-all";
const MAINTENANCE_PATH: &str = "/requests/get-all";
const ANNOUNCEMENTS_PATH: &str = "/ContentCreator/Resident/v1/announcements/active";
const CALENDAR_PATH: &str = "/Calendar/Resident/v2/resident/events/filteredeventsrsvp";
const AMENITIES_PATH: &str = "/AmenityReservation/Resident/v1/GetAmenities()";
const RESERVATIONS_PATH: &str = "/AmenityReservation/Resident/v1/GetReservations()";
const USER_PROFILE_PATH: &str = "/users/authenticated";
const INSTRUCTION_TYPES_PATH: &str = "/instruction-type/sync";
const INSTRUCTIONS_PATH: &str = "/instruction/sync";

const PACKAGE_EXPAND: &str = "Location,Type,Authorizations";
const PACKAGE_FILTER: &str = "IsOpen eq true and Type/IsShownOnTenantHomePage eq true";

impl BuildingLinkClient {
    fn url(&self, host: ServiceHost, path: &str) -> String {
        self.config.endpoints.url(host, path)
    }

    /// Properties the user is authorized for.
    ///
    /// Entries that do not parse are skipped.
    pub async fn properties(&self) -> Result<Vec<Property>> {
        let url = self.url(ServiceHost::Api, PROPERTIES_PATH);
        let payload = self.get(&url, &[("TypeNodeFilter", "/5/")]).await?;
        let entries = match payload {
            Value::Object(mut map) => match map.remove("properties") {
                Some(Value::Array(items)) => items,
                Some(_) => Vec::new(),
                None => vec![Value::Object(map)],
            },
            Value::Array(items) => items,
            _ => Vec::new(),
        };
        Ok(entries
            .into_iter()
            .filter_map(|entry| match serde_json::from_value(entry) {
                Ok(property) => Some(property),
                Err(err) => {
                    warn!(error = %err, "skipping unparseable property");
                    None
                }
            })
            .collect())
    }

    /// Open packages and deliveries.
    pub async fn packages(&self) -> Result<Vec<Package>> {
        let url = self.url(ServiceHost::EventLog, PACKAGES_PATH);
        let payload = self
            .get(&url, &[("$expand", PACKAGE_EXPAND), ("$filter", PACKAGE_FILTER)])
            .await?;
        let response: PackageResponse = serde_json::from_value(payload)?;
        Ok(response.entities)
    }

    /// Open maintenance requests.
    pub async fn maintenance_requests(&self) -> Result<Vec<MaintenanceRequest>> {
        self.maintenance_requests_with(&MaintenanceFilter::default())
            .await
    }

    pub async fn maintenance_requests_with(
        &self,
        filter: &MaintenanceFilter,
    ) -> Result<Vec<MaintenanceRequest>> {
        let url = self.url(ServiceHost::Maintenance, MAINTENANCE_PATH);
        let query = [("extended", "true"), ("isBoardMemberSection", "false")];
        let payload = self.post(&url, &query, &filter.to_body()).await?;
        let response: MaintenanceResponse = serde_json::from_value(payload)?;
        Ok(response.items)
    }

    /// Announcements currently shown to residents.
    pub async fn announcements(&self) -> Result<Vec<Announcement>> {
        let url = self.url(ServiceHost::Api, ANNOUNCEMENTS_PATH);
        list_of(self.get(&url, &[]).await?)
    }

    /// Calendar events, optionally bounded by date-time strings.
    pub async fn calendar_events(
        &self,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<Vec<CalendarEvent>> {
        let url = self.url(ServiceHost::Api, CALENDAR_PATH);
        let mut query = Vec::new();
        if let Some(from) = from.filter(|v| !v.is_empty()) {
            query.push(("fromDateTime", from));
        }
        if let Some(to) = to.filter(|v| !v.is_empty()) {
            query.push(("toDateTime", to));
        }
        list_of(self.get(&url, &query).await?)
    }

    pub async fn amenities(&self) -> Result<Vec<Amenity>> {
        let url = self.url(ServiceHost::Api, AMENITIES_PATH);
        odata_values(self.get(&url, &[("$skip", "0")]).await?)
    }

    pub async fn amenity_reservations(&self) -> Result<Vec<AmenityReservation>> {
        let url = self.url(ServiceHost::Api, RESERVATIONS_PATH);
        odata_values(self.get(&url, &[]).await?)
    }

    /// Building contacts for the property set with [`set_property`].
    ///
    /// Empty until both a property and a user id are known.
    ///
    /// [`set_property`]: BuildingLinkClient::set_property
    pub async fn contacts(&self) -> Result<Vec<Contact>> {
        let context = self.property_context();
        let (Some(property_id), Some(user_id)) = (context.property_id, context.user_id) else {
            return Ok(Vec::new());
        };
        let path = format!(
            "/services/MobileLinkResident1_7.svc/rest/Buildings/{property_id}/V2/Contacts"
        );
        let url = self.url(ServiceHost::Legacy, &path);
        let query = [("format", "json"), ("t", "1"), ("l", user_id.as_str())];
        list_of(self.get(&url, &query).await?)
    }

    pub async fn user_profile(&self) -> Result<UserProfile> {
        let url = self.url(ServiceHost::Users, USER_PROFILE_PATH);
        Ok(serde_json::from_value(self.get(&url, &[]).await?)?)
    }

    pub async fn front_desk_instruction_types(&self) -> Result<Vec<FrontDeskInstructionType>> {
        let url = self.url(ServiceHost::FrontDesk, INSTRUCTION_TYPES_PATH);
        list_of(self.get(&url, &[("excludeReplacedExpired", "true")]).await?)
    }

    pub async fn front_desk_instructions(&self) -> Result<Vec<FrontDeskInstruction>> {
        let url = self.url(ServiceHost::FrontDesk, INSTRUCTIONS_PATH);
        list_of(self.get(&url, &[("excludeReplacedExpired", "true")]).await?)
    }
}

/// Parse a JSON array; any other payload is an empty list.
fn list_of<T: DeserializeOwned>(payload: Value) -> Result<Vec<T>> {
    match payload {
        Value::Array(_) => Ok(serde_json::from_value(payload)?),
        _ => Ok(Vec::new()),
    }
}

/// OData collections wrap their items in `value`; some answer a bare array.
fn odata_values<T: DeserializeOwned>(payload: Value) -> Result<Vec<T>> {
    match payload {
        Value::Object(mut map) => list_of(map.remove("value").unwrap_or(Value::Null)),
        other => list_of(other),
    }
}
