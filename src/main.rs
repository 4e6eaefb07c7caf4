use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use estate_catalogue::models::parse_calendar_date;
use estate_catalogue::search::PropertyStats;
use estate_catalogue::{
    property_stats, sort_by_date, sort_by_price, Catalogue, Config, Property, PropertyId,
    SearchCriteria, Session, SortOrder,
};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter};

#[derive(Parser)]
#[command(name = "estate-catalogue", version, about = "Browse and shortlist estate agent listings")]
struct Cli {
    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Catalogue file path or http(s) URL
    #[arg(long, global = true, env = "ESTATE_CATALOGUE")]
    catalogue: Option<String>,

    /// Local-storage file holding favourites
    #[arg(long, global = true, env = "ESTATE_FAVOURITES")]
    favourites_file: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Filter the catalogue
    Search(SearchArgs),
    /// Show one property in full
    Show { id: String },
    /// Manage the favourites list
    #[command(subcommand)]
    Favourites(FavouritesCommand),
}

#[derive(Args)]
struct SearchArgs {
    /// house, flat, apartment, bungalow, ...
    #[arg(long = "type")]
    property_type: Option<String>,
    #[arg(long)]
    min_price: Option<String>,
    #[arg(long)]
    max_price: Option<String>,
    #[arg(long)]
    min_bedrooms: Option<String>,
    #[arg(long)]
    max_bedrooms: Option<String>,
    /// Added on or after (YYYY-MM-DD)
    #[arg(long)]
    from: Option<String>,
    /// Added on or before (YYYY-MM-DD)
    #[arg(long)]
    to: Option<String>,
    /// Outward code prefix, e.g. BR1
    #[arg(long)]
    postcode: Option<String>,
    #[arg(long, value_enum)]
    sort: Option<SortKey>,
    /// asc or desc; defaults to asc for price and desc for date
    #[arg(long)]
    order: Option<SortOrder>,
    /// Print summary figures after the listings
    #[arg(long)]
    stats: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum SortKey {
    Price,
    Date,
}

#[derive(Subcommand)]
enum FavouritesCommand {
    List,
    Add { id: String },
    Remove { id: String },
    Clear,
}

impl SearchArgs {
    fn criteria(&self) -> SearchCriteria {
        SearchCriteria {
            property_type: self.property_type.clone().unwrap_or_default(),
            min_price: self.min_price.clone().unwrap_or_default(),
            max_price: self.max_price.clone().unwrap_or_default(),
            min_bedrooms: self.min_bedrooms.clone().unwrap_or_default(),
            max_bedrooms: self.max_bedrooms.clone().unwrap_or_default(),
            date_added_from: date_arg("--from", self.from.as_deref()),
            date_added_to: date_arg("--to", self.to.as_deref()),
            postcode: self.postcode.clone().unwrap_or_default(),
        }
    }
}

/// Unreadable dates leave the bound unset.
fn date_arg(flag: &str, raw: Option<&str>) -> Option<chrono::NaiveDate> {
    let raw = raw?;
    let date = parse_calendar_date(raw);
    if date.is_none() {
        warn!("Ignoring {} '{}': expected YYYY-MM-DD", flag, raw);
    }
    date
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::default(),
    };
    if let Some(catalogue) = &cli.catalogue {
        config.catalogue = catalogue.clone();
    }
    if let Some(path) = &cli.favourites_file {
        config.favourites_file = path.clone();
    }
    Ok(config)
}

fn print_listing(i: usize, property: &Property, saved: bool) {
    let marker = if saved { " [saved]" } else { "" };
    println!("{}. £{:.0} {} in {}{}", i + 1, property.price, property.property_type, property.location, marker);
    println!("   {} bed, {} bath, {} sq ft", property.bedrooms, property.bathrooms, property.size);
    println!("   Postcode: {}  Added: {}", property.postcode, property.date_added);
    println!("   ID: {}", property.id);
    if !property.short_description.is_empty() {
        println!("   {}", property.short_description);
    }
    println!();
}

fn print_details(property: &Property) {
    println!("£{:.0} - {} ({})", property.price, property.location, property.postcode);
    println!("Type: {}", property.property_type);
    println!("Bedrooms: {}  Bathrooms: {}  Size: {} sq ft", property.bedrooms, property.bathrooms, property.size);
    println!("Added: {}", property.date_added);
    println!();
    println!("{}", property.full_description);
    println!();
    println!("Images: {}", property.images.join(", "));
    println!("Floor plan: {}", property.floor_plan);
    println!("Map: {}", property.map_address());
}

fn print_stats(stats: &PropertyStats) {
    println!("Count: {}", stats.count);
    println!("Average price: £{:.0}", stats.average_price);
    println!("Price range: £{:.0} - £{:.0}", stats.min_price, stats.max_price);
    println!("Average bedrooms: {:.1}", stats.average_bedrooms);
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging on stderr before anything else logs; stdout carries results
    let (initial, from_env) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, true),
        Err(_) => (EnvFilter::new("info"), false),
    };
    let (filter, filter_handle) = reload::Layer::new(initial);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = load_config(&cli)?;
    // RUST_LOG wins over the config file
    if !from_env {
        filter_handle.reload(EnvFilter::new(&config.log_level))?;
    }

    let source = config.catalogue_source()?;
    let catalogue = Catalogue::load(source.as_ref()).await?;
    let mut session = Session::new(catalogue, config.favourites_store());

    match cli.command {
        Command::Search(args) => {
            let results = session.set_criteria(args.criteria()).to_vec();
            let results = match args.sort {
                Some(SortKey::Price) => {
                    sort_by_price(&results, args.order.unwrap_or(SortOrder::PRICE_DEFAULT))
                }
                Some(SortKey::Date) => {
                    sort_by_date(&results, args.order.unwrap_or(SortOrder::DATE_DEFAULT))
                }
                None => results,
            };
            let stats = property_stats(&results);

            if cli.json {
                if args.stats {
                    print_json(&serde_json::json!({ "properties": results, "stats": stats }))?;
                } else {
                    print_json(&results)?;
                }
            } else {
                info!(
                    "Found {} {}",
                    results.len(),
                    if results.len() == 1 { "property" } else { "properties" }
                );
                for (i, property) in results.iter().enumerate() {
                    print_listing(i, property, session.is_favourite(&property.id));
                }
                if args.stats {
                    print_stats(&stats);
                }
            }
        }
        Command::Show { id } => {
            let id = PropertyId::parse(&id);
            let property = session
                .view(&id)
                .with_context(|| format!("No property with id {}", id))?;
            if cli.json {
                print_json(property)?;
            } else {
                print_details(property);
                if session.is_favourite(&id) {
                    println!("Saved to favourites");
                }
            }
        }
        Command::Favourites(command) => {
            match command {
                FavouritesCommand::List => {}
                FavouritesCommand::Add { id } => {
                    let id = PropertyId::parse(&id);
                    if session.view(&id).is_none() {
                        anyhow::bail!("No property with id {}", id);
                    }
                    if session.add_favourite(&id) {
                        info!("💾 Saved property {} to favourites", id);
                    } else {
                        info!("Property {} is already in favourites", id);
                    }
                }
                FavouritesCommand::Remove { id } => {
                    let id = PropertyId::parse(&id);
                    if session.remove_favourite(&id) {
                        info!("Removed property {} from favourites", id);
                    } else {
                        info!("Property {} was not in favourites", id);
                    }
                }
                FavouritesCommand::Clear => {
                    session.clear_favourites();
                }
            }

            let favourites = session.favourites();
            if cli.json {
                print_json(favourites.as_slice())?;
            } else {
                info!("{} favourites", favourites.len());
                for (i, property) in favourites.iter().enumerate() {
                    print_listing(i, property, true);
                }
            }
        }
    }

    Ok(())
}
