//! CLI command handlers.

use std::path::Path;

use serde::Serialize;

use super::{Commands, FrontDeskCommands};
use crate::client::BuildingLinkClient;
use crate::config::{ClientConfig, ConfigFile, Credentials};
use crate::models::MaintenanceFilter;

/// Build a client from the config file when given, else the environment.
pub fn build_client(config_path: Option<&Path>) -> Result<BuildingLinkClient, Box<dyn std::error::Error>> {
    let Some(path) = config_path else {
        return Ok(BuildingLinkClient::from_env()?);
    };
    let file = ConfigFile::load(path)?;
    let mut credentials = file.credentials();
    if credentials == Credentials::default() {
        credentials = Credentials::from_env();
    }
    let config: ClientConfig = file.client_config();
    let client = BuildingLinkClient::with_config(credentials, config)?;
    Ok(match file.device_id {
        Some(device_id) => client.with_device_id(device_id),
        None => client,
    })
}

/// Run one command and print its result as JSON.
pub async fn run(
    client: &BuildingLinkClient,
    command: Commands,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Properties => print_json(&client.properties().await?),
        Commands::Packages => print_json(&client.packages().await?),
        Commands::Maintenance(args) => {
            let filter = MaintenanceFilter::builder()
                .include_closed_requests(args.include_closed)
                .build();
            print_json(&client.maintenance_requests_with(&filter).await?)
        }
        Commands::Announcements => print_json(&client.announcements().await?),
        Commands::Events(args) => print_json(
            &client
                .calendar_events(args.from.as_deref(), args.to.as_deref())
                .await?,
        ),
        Commands::Amenities => print_json(&client.amenities().await?),
        Commands::Reservations => print_json(&client.amenity_reservations().await?),
        Commands::Contacts(args) => {
            client.set_property(args.property, args.legacy_id, Some(args.user));
            print_json(&client.contacts().await?)
        }
        Commands::Profile => print_json(&client.user_profile().await?),
        Commands::FrontDesk(args) => match args.command {
            FrontDeskCommands::Types => print_json(&client.front_desk_instruction_types().await?),
            FrontDeskCommands::Instructions => {
                print_json(&client.front_desk_instructions().await?)
            }
        },
        Commands::Token => {
            let Some(auth) = client.auth() else {
                return Err("client has no auth manager".into());
            };
            auth.get_access_token().await?;
            match auth.refresh_token() {
                Some(token) => println!("{token}"),
                None => eprintln!("Authenticated, but the server issued no refresh token"),
            }
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
