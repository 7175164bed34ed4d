mod args;

use args::{as_hierarchy, load_config, parse_key_value, parse_properties};
use clap::{Parser, Subcommand};
use inventory::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "inventory")]
#[command(about = "Search, create, edit, move and delete inventory locations")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// GraphQL endpoint, overrides the configuration file
    #[arg(long, global = true, env = "INVENTORY_ENDPOINT")]
    endpoint: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a location from its hierarchy
    Get {
        /// Hierarchy entry as Type=Name, outermost first
        #[arg(short, long = "path", required = true, value_parser = parse_key_value)]
        path: Vec<(String, String)>,
    },
    /// Create a location, and any missing parents
    Add {
        /// Hierarchy entry as Type=Name, outermost first
        #[arg(short, long = "path", required = true, value_parser = parse_key_value)]
        path: Vec<(String, String)>,
        /// Property of the new location as Name=Value
        #[arg(long = "property", value_parser = parse_key_value)]
        properties: Vec<(String, String)>,
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        long: Option<f64>,
        #[arg(long)]
        external_id: Option<String>,
    },
    /// List the children of a location
    Children {
        location_id: String,
    },
    /// Rename a location and set its coordinates
    Edit {
        location_id: String,
        #[arg(long)]
        name: String,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        long: f64,
        #[arg(long)]
        external_id: Option<String>,
    },
    /// Move a location under another one, or to the top level
    Move {
        location_id: String,
        /// New parent location id
        #[arg(long)]
        parent: Option<String>,
    },
    /// Delete a location without dependencies
    Delete {
        #[arg(short, long = "path", required = true, value_parser = parse_key_value)]
        path: Vec<(String, String)>,
    },
    /// List the documents attached to a location
    Documents {
        #[arg(short, long = "path", required = true, value_parser = parse_key_value)]
        path: Vec<(String, String)>,
    },
    /// Find locations by their external id
    ByExternalId {
        external_id: String,
    },
    /// List location types and their properties
    Types,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref(), cli.endpoint)?;
    let client = match InventoryClient::connect(config).await {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to connect: {}", e);
            return Err(e.into());
        }
    };

    match cli.command {
        Commands::Get { path } => {
            let location = client.get_location(&as_hierarchy(&path)).await?;
            print_json(&location)?;
        }
        Commands::Add {
            path,
            properties,
            lat,
            long,
            external_id,
        } => {
            add_location(&client, &path, &properties, lat, long, external_id.as_deref()).await?;
        }
        Commands::Children { location_id } => {
            let children = client.get_location_children(&location_id).await?;
            print_json(&children)?;
        }
        Commands::Edit {
            location_id,
            name,
            lat,
            long,
            external_id,
        } => {
            let location = Location::new(location_id, name.clone());
            let edited = client
                .edit_location(&location, &name, lat, long, external_id.as_deref())
                .await?;
            print_json(&edited)?;
        }
        Commands::Move {
            location_id,
            parent,
        } => {
            let moved = client
                .move_location(&location_id, parent.as_deref())
                .await?;
            print_json(&moved)?;
        }
        Commands::Delete { path } => {
            let location = client.get_location(&as_hierarchy(&path)).await?;
            client.delete_location(&location).await?;
            info!("Deleted {}", location.id);
            println!("Deleted {} ({})", location.name, location.id);
        }
        Commands::Documents { path } => {
            let location = client.get_location(&as_hierarchy(&path)).await?;
            let documents = client.get_location_documents(&location).await?;
            print_json(&documents)?;
        }
        Commands::ByExternalId { external_id } => {
            let locations = client.get_locations_by_external_id(&external_id).await?;
            print_json(&locations)?;
        }
        Commands::Types => {
            print_json(&client.location_types())?;
        }
    }

    Ok(())
}

async fn add_location(
    client: &InventoryClient,
    path: &[(String, String)],
    raw_properties: &[(String, String)],
    lat: Option<f64>,
    long: Option<f64>,
    external_id: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let properties = match path.last() {
        Some((location_type, _)) if !raw_properties.is_empty() => {
            parse_properties(client.location_type(location_type)?, raw_properties)?
        }
        _ => HashMap::new(),
    };

    let location = client
        .add_location(&as_hierarchy(path), &properties, lat, long, external_id)
        .await?;
    print_json(&location)?;

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
