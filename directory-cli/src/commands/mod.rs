//! Subcommands of the `directory` binary and their execution against the query service.

use clap::{Parser, Subcommand};
use directory_query::DirectoryQueryService;
use directory_shared::types::{ActivityId, BuildingId, OrganizationId};
use serde_json::Value;
use tracing::info;

use crate::errors::CliError;

/// Query the organization directory.
#[derive(Debug, Parser)]
#[command(name = "directory", version, about)]
pub struct Cli {
    /// Pretty-print the JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Organizations housed in a building, with the building
    ByBuilding { building_id: BuildingId },

    /// Organizations linked to an activity or any of its descendants
    ByActivity { activity_id: ActivityId },

    /// Organizations within a radius of a point
    ByRadius {
        /// Latitude of the centre, in degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        /// Longitude of the centre, in degrees
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        /// Radius in metres
        #[arg(long, allow_negative_numbers = true)]
        radius: f64,
    },

    /// Organizations inside a latitude/longitude rectangle
    ByRectangle {
        #[arg(long, allow_negative_numbers = true)]
        lat_min: f64,
        #[arg(long, allow_negative_numbers = true)]
        lat_max: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon_min: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon_max: f64,
    },

    /// Organizations whose name contains a fragment, ignoring case
    Search {
        #[arg(long, default_value = "")]
        name: String,
    },

    /// Full detail of one organization
    Organization { organization_id: OrganizationId },

    /// Every building
    Buildings,
}

/// Run `command` against `service` and return its result as JSON.
///
/// # Returns
///
/// * `Ok(Value)` - The query result
/// * `Err(CliError::NotFound)` - If a requested organization does not exist
/// * `Err(CliError)` - If the query fails
pub async fn execute(service: &DirectoryQueryService, command: &Command) -> Result<Value, CliError> {
    info!(command = ?command, "Executing query");

    let value = match command {
        Command::ByBuilding { building_id } => {
            serde_json::to_value(service.list_by_building(*building_id).await?)?
        }
        Command::ByActivity { activity_id } => {
            serde_json::to_value(service.list_by_activity(*activity_id).await?)?
        }
        Command::ByRadius { lat, lon, radius } => {
            serde_json::to_value(service.list_by_radius(*lat, *lon, *radius).await?)?
        }
        Command::ByRectangle {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
        } => serde_json::to_value(
            service
                .list_by_rectangle(*lat_min, *lat_max, *lon_min, *lon_max)
                .await?,
        )?,
        Command::Search { name } => serde_json::to_value(service.search_by_name(name).await?)?,
        Command::Organization { organization_id } => {
            match service.get_detail(*organization_id).await? {
                Some(detail) => serde_json::to_value(detail)?,
                None => {
                    return Err(CliError::NotFound {
                        organization_id: *organization_id,
                    });
                }
            }
        }
        Command::Buildings => serde_json::to_value(service.list_buildings().await?)?,
    };

    Ok(value)
}

/// Render a query result for stdout.
pub fn render(value: &Value, pretty: bool) -> Result<String, CliError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(rendered)
}
