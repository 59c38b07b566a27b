use std::{path::PathBuf, rc::Rc};

use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand};
use walkmap_core::{
    entities::route::RouteQuery,
    map::memory::{MemoryBackend, MemoryMap},
    screen::{MapScreen, Services},
    usecases::{self, NewReport, Resolution},
    util::timeout::Deadline,
};
use walkmap_gateways::{Nominatim, OpenRouteService, ReportApi};

use crate::{config::Config, timer::TokioTimer};

/// The container of the map that is rendered in memory.
const HEADLESS_MAP_CONTAINER: &str = "map";

#[derive(Parser)]
#[command(name = "walkmap", version, about = "Address lookup, walking routes and problem reports")]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve an address to its coordinates
    Geocode { address: String },
    /// List places that match a partial address
    Suggest { text: String },
    /// Calculate a walking route between two addresses
    Route { start: String, end: String },
    /// Submit a problem report
    Report {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
        #[arg(long)]
        category: String,
        #[arg(long)]
        description: String,
        /// E-mail address of the reporter
        #[arg(long)]
        email: String,
        /// ID of the location
        #[arg(long)]
        location: String,
        /// ID of the route
        #[arg(long)]
        route: Option<String>,
        #[arg(long)]
        photo: Option<String>,
    },
}

pub async fn run() -> Result<()> {
    let Cli { config, command } = Cli::parse();
    let cfg = Config::try_load_from_file_or_default(config)?;
    log::debug!("{cfg:?}");

    let client = walkmap_gateways::client_with_user_agent(&cfg.requests.user_agent)?;
    let deadline = Deadline::new(Rc::new(TokioTimer), cfg.requests.timeout);
    let nominatim = Nominatim::new(client.clone(), cfg.nominatim.base_url.as_str());

    match command {
        Command::Geocode { address } => {
            match usecases::resolve_address(&nominatim, &deadline, &address).await? {
                Resolution::Found(place) => {
                    println!("{}\t{}", place.pos, place.display_name);
                }
                Resolution::NotFound => bail!("Address not found: {address}"),
                Resolution::Skipped => bail!("No address given"),
            }
        }
        Command::Suggest { text } => {
            for place in usecases::suggest_places(&nominatim, &deadline, &text).await? {
                println!("{}\t{}", place.pos, place.display_name);
            }
        }
        Command::Route { start, end } => {
            let api_key = cfg.openrouteservice.api_key()?;
            let ors = OpenRouteService::new(client, cfg.openrouteservice.base_url.as_str(), api_key);
            let services = Services {
                geocoding: Rc::new(nominatim),
                routing: Rc::new(ors),
                deadline,
            };
            let query = RouteQuery::new(start, end);
            render_route(MapScreen::new(services, cfg.map), &query).await?;
        }
        Command::Report {
            lat,
            lng,
            category,
            description,
            email,
            location,
            route,
            photo,
        } => {
            let api = ReportApi::new(client, cfg.reports.base_url.as_str());
            let new_report = NewReport {
                lat,
                lng,
                category,
                description,
                photo,
                reporter_email: email,
                location_id: location,
                route_id: route,
            };
            let report = usecases::submit_report(&api, &deadline, new_report).await?;
            println!(
                "Submitted '{}' report at {} ({})",
                report.category, report.pos, report.created_at
            );
        }
    }
    Ok(())
}

/// Plan the route on a map that only exists in memory
/// and print what would be displayed.
async fn render_route(screen: MapScreen<MemoryMap>, query: &RouteQuery) -> Result<()> {
    let screen = Rc::new(screen);
    let backend = MemoryBackend::default().with_container(HEADLESS_MAP_CONTAINER);
    if !screen.activate(&backend, HEADLESS_MAP_CONTAINER, None) {
        bail!("Unable to create the map");
    }
    screen.plan_route(query).await;
    let state = screen.state();
    if let Some(notice) = state.notice {
        bail!("{notice}");
    }
    let route = state.route.ok_or_else(|| anyhow!("No route found"))?;
    let bounds = screen
        .with_map(|map| map.surface().and_then(MemoryMap::fitted_bounds))
        .flatten();
    screen.deactivate();

    println!(
        "Walking route: {:.2} km, {} points",
        route.length() / 1000.0,
        route.path.len()
    );
    if let Some(bbox) = bounds {
        println!("Bounds: {} - {}", bbox.southwest(), bbox.northeast());
    }
    for pos in &route.path {
        println!("{pos}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_report_arguments() {
        let cli = Cli::try_parse_from([
            "walkmap",
            "--config",
            "custom.toml",
            "report",
            "--lat",
            "-33.9",
            "--lng",
            "18.4",
            "--category",
            "pothole",
            "--description",
            "Deep hole",
            "--email",
            "user@example.com",
            "--location",
            "42",
        ])
        .unwrap();
        assert_eq!(Some(PathBuf::from("custom.toml")), cli.config);
        let Command::Report { lat, route, .. } = cli.command else {
            panic!("Unexpected command");
        };
        assert_eq!(-33.9, lat);
        assert_eq!(None, route);
    }

    #[test]
    fn route_requires_two_addresses() {
        assert!(Cli::try_parse_from(["walkmap", "route", "Toulouse"]).is_err());
        assert!(Cli::try_parse_from(["walkmap", "route", "Toulouse", "Paris"]).is_ok());
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
