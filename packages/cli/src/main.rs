#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Interactive CLI for the Barcelona rent and income dashboard.
//!
//! Without a subcommand, lets the user pick between exploring the
//! dashboard in the terminal, printing the salary-share view, and starting
//! the API server. Subcommands resolve a single view and print it as JSON.

mod explore;

use bcn_rent_dataset_models::{PriceUnit, Year};
use bcn_rent_district_models::DistrictFilter;
use bcn_rent_view::resolver;
use bcn_rent_view_models::{DEFAULT_YEAR, MapFilter, TrendFilter};
use clap::{Parser, Subcommand};
use dialoguer::Select;

#[derive(Parser)]
#[command(name = "bcn_rent_cli", about = "Barcelona rent and income dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Step through the dashboard controls interactively
    Explore,
    /// Print the map group for one year
    Map {
        /// Year to show (2015-2020)
        #[arg(long, default_value_t = DEFAULT_YEAR)]
        year: Year,
    },
    /// Print the trend group for one district and unit
    Trend {
        /// `Barcelona` or a canonical district name
        #[arg(long, default_value_t = DistrictFilter::AreaWide)]
        district: DistrictFilter,
        /// `month` or `square_meter`
        #[arg(long, default_value_t = PriceUnit::PerMonth)]
        unit: PriceUnit,
    },
    /// Print the area-wide rent weight on the average salary
    SalaryShare,
    /// Start the API server
    Serve,
}

/// Top-level menu shown when no subcommand is given.
enum Tool {
    Explore,
    SalaryShare,
    Server,
}

impl Tool {
    const ALL: &[Self] = &[Self::Explore, Self::SalaryShare, Self::Server];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Explore => "Explore dashboard",
            Self::SalaryShare => "Show rent weight on salary",
            Self::Server => "Start server",
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    let command = match cli.command {
        Some(command) => command,
        None => pick_command()?,
    };

    match command {
        Commands::Serve => {
            actix_web::rt::System::new().block_on(bcn_rent_server::interactive::run())?;
        }
        Commands::Explore => explore::run(&bcn_rent_server::load_store()?)?,
        Commands::Map { year } => {
            let filter = MapFilter::new(year)?;
            let store = bcn_rent_server::load_store()?;
            print_json(&resolver::resolve_map(&store, filter))?;
        }
        Commands::Trend { district, unit } => {
            let store = bcn_rent_server::load_store()?;
            print_json(&resolver::resolve_trend(&store, TrendFilter { district, unit }))?;
        }
        Commands::SalaryShare => {
            let store = bcn_rent_server::load_store()?;
            print_json(&resolver::resolve_salary_share(&store))?;
        }
    }

    Ok(())
}

fn print_json(view: &impl serde::Serialize) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(view)?);
    Ok(())
}

fn pick_command() -> Result<Commands, dialoguer::Error> {
    println!("Barcelona Rent Dashboard");
    println!();

    let labels: Vec<&str> = Tool::ALL.iter().map(Tool::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(match Tool::ALL[idx] {
        Tool::Explore => Commands::Explore,
        Tool::SalaryShare => Commands::SalaryShare,
        Tool::Server => Commands::Serve,
    })
}
