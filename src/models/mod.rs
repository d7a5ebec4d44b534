//! Typed records returned by the BuildingLink API.
//!
//! Field names follow the upstream camelCase payloads; missing fields fall
//! back to their defaults so partially populated records still parse.

pub mod amenity;
pub mod announcement;
pub mod contact;
pub mod front_desk;
pub mod maintenance;
pub mod package;
pub mod property;
pub mod token;

pub use amenity::{Amenity, AmenityReservation};
pub use announcement::{Announcement, CalendarEvent};
pub use contact::Contact;
pub use front_desk::{FrontDeskInstruction, FrontDeskInstructionType};
pub use maintenance::{MaintenanceFilter, MaintenanceRequest, MaintenanceResponse};
pub use package::{EventType, Package, PackageResponse};
pub use property::{Property, UserProfile};
pub use token::TokenResponse;
