//! CLI entry point for buildinglink.

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// BuildingLink resident API CLI
#[derive(Parser, Debug)]
#[command(name = "buildinglink", version, about = "Query the BuildingLink resident API")]
pub struct Cli {
    /// TOML config file; BUILDINGLINK_* environment variables are used without one
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Authorized properties
    Properties,
    /// Open packages and deliveries
    Packages,
    /// Open maintenance requests
    Maintenance(MaintenanceArgs),
    /// Active announcements
    Announcements,
    /// Calendar events
    Events(EventsArgs),
    /// Amenities available for reservation
    Amenities,
    /// Your amenity reservations
    Reservations,
    /// Building contacts
    Contacts(ContactsArgs),
    /// Your profile
    Profile,
    /// Front desk instructions
    FrontDesk(FrontDeskArgs),
    /// Authenticate and print the current refresh token
    Token,
}

/// Arguments for `buildinglink maintenance`.
#[derive(Parser, Debug)]
pub struct MaintenanceArgs {
    /// Include closed requests
    #[arg(long)]
    pub include_closed: bool,
}

/// Arguments for `buildinglink events`.
#[derive(Parser, Debug)]
pub struct EventsArgs {
    /// Start of the range (e.g. 2026-10-01T00:00:00)
    #[arg(long)]
    pub from: Option<String>,

    /// End of the range
    #[arg(long)]
    pub to: Option<String>,
}

/// Arguments for `buildinglink contacts`.
#[derive(Parser, Debug)]
pub struct ContactsArgs {
    /// Property id
    #[arg(long)]
    pub property: String,

    /// Legacy numeric property id
    #[arg(long)]
    pub legacy_id: i64,

    /// User id
    #[arg(long)]
    pub user: String,
}

/// Arguments for `buildinglink front-desk`.
#[derive(Parser, Debug)]
pub struct FrontDeskArgs {
    #[command(subcommand)]
    pub command: FrontDeskCommands,
}

/// Front desk subcommands.
#[derive(Subcommand, Debug)]
pub enum FrontDeskCommands {
    /// Instruction types
    Types,
    /// Active instructions
    Instructions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_events_range() {
        let cli = Cli::parse_from(["buildinglink", "events", "--from", "2026-10-01", "--to", "2026-10-31"]);
        match cli.command {
            Commands::Events(args) => {
                assert_eq!(args.from.as_deref(), Some("2026-10-01"));
                assert_eq!(args.to.as_deref(), Some("2026-10-31"));
            }
            other => panic!("expected events, got {other:?}"),
        }
    }

    #[test]
    fn parses_front_desk_subcommand_and_global_config() {
        let cli = Cli::parse_from(["buildinglink", "front-desk", "types", "-c", "bl.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("bl.toml")));
        assert!(matches!(
            cli.command,
            Commands::FrontDesk(FrontDeskArgs {
                command: FrontDeskCommands::Types
            })
        ));
    }

    #[test]
    fn contacts_requires_property_and_user() {
        assert!(Cli::try_parse_from(["buildinglink", "contacts", "--property", "p"]).is_err());
    }

    #[test]
    fn contacts_requires_legacy_id() {
        let missing = ["buildinglink", "contacts", "--property", "p", "--user", "u"];
        assert!(Cli::try_parse_from(missing).is_err());

        let cli = Cli::parse_from([
            "buildinglink", "contacts", "--property", "p", "--legacy-id", "1234", "--user", "u",
        ]);
        match cli.command {
            Commands::Contacts(args) => assert_eq!(args.legacy_id, 1234),
            other => panic!("expected contacts, got {other:?}"),
        }
    }
}
