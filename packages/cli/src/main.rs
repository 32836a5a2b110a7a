#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line explorer for heat retrofit impact and climate alignment.
//!
//! ```text
//! heat_retrofit developments [--borough brooklyn]
//! heat_retrofit retrofits [--category envelope]
//! heat_retrofit packages [--development BRV001]
//! heat_retrofit impact --development BRV001 --retrofit ac_electric --retrofit cool_roof
//! heat_retrofit alignment --development BRV001 --package climate_ready [--json]
//! heat_retrofit serve
//! ```
//!
//! Running `heat_retrofit` with no subcommand enters interactive mode.

mod interactive;
mod report;

use clap::{Args, Parser, Subcommand};
use heat_retrofit_impact::aggregate;
use heat_retrofit_impact_models::{ActiveSet, Assessment};
use heat_retrofit_reference::ReferenceData;
use heat_retrofit_reference_models::{Borough, Development, RetrofitCategory};

#[derive(Parser)]
#[command(
    name = "heat_retrofit",
    about = "Explore heat retrofit options for public housing developments"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List developments
    Developments {
        /// Only developments in this borough
        #[arg(long)]
        borough: Option<Borough>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List the retrofit catalog
    Retrofits {
        /// Only retrofits in this category
        #[arg(long)]
        category: Option<RetrofitCategory>,
        #[arg(long)]
        json: bool,
    },
    /// List curated packages, optionally recomputed at a development
    Packages {
        /// Development to price the packages at
        #[arg(long)]
        development: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Cost, temperature, and energy impact of a selection
    Impact(SelectionArgs),
    /// Alignment matrix of a selection
    Alignment(SelectionArgs),
    /// Start the API server
    Serve,
}

#[derive(Args)]
struct SelectionArgs {
    /// Development ID
    #[arg(long)]
    development: String,
    /// Retrofit to include (repeatable)
    #[arg(long = "retrofit")]
    retrofits: Vec<String>,
    /// Package whose members are added to the selection
    #[arg(long)]
    package: Option<String>,
    /// Print JSON instead of a report
    #[arg(long)]
    json: bool,
}

/// Errors from resolving command-line arguments against the reference data.
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("Unknown development '{0}'")]
    UnknownDevelopment(String),
    #[error("Unknown package '{0}'")]
    UnknownPackage(String),
}

impl SelectionArgs {
    /// Resolves the development and assesses the requested selection.
    ///
    /// Package members are applied first, then each `--retrofit` is
    /// toggled on, so explicit retrofits win exclusion conflicts.
    fn assess<'a>(
        &self,
        data: &'a ReferenceData,
    ) -> Result<(&'a Development, Assessment), CliError> {
        let dev = data
            .development(&self.development)
            .ok_or_else(|| CliError::UnknownDevelopment(self.development.clone()))?;

        let mut active = ActiveSet::new();
        if let Some(package_id) = &self.package {
            if data.package(package_id).is_none() {
                return Err(CliError::UnknownPackage(package_id.clone()));
            }
            active = heat_retrofit_impact::selection::select_package(data, &active, package_id);
        }
        for id in &self.retrofits {
            if data.retrofit(id).is_none() {
                log::warn!("Ignoring unknown retrofit '{id}'");
            } else if !active.contains(id) {
                active = heat_retrofit_impact::selection::toggle(data, &active, id);
            }
        }

        Ok((dev, heat_retrofit_impact::assess(data, dev, &active)))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    heat_retrofit_cli_utils::init_logger();
    let cli = Cli::parse();
    let data = heat_retrofit_reference::reference();

    let Some(command) = cli.command else {
        return interactive::run(data);
    };

    match command {
        Commands::Developments { borough, json } => {
            let developments: Vec<&Development> = match borough {
                Some(b) => data.developments_in(b).collect(),
                None => data.developments().iter().collect(),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&developments)?);
            } else {
                println!("{}", report::developments(developments));
            }
        }
        Commands::Retrofits { category, json } => {
            let retrofits: Vec<_> = data
                .retrofits()
                .iter()
                .filter(|r| category.is_none_or(|c| r.category == c))
                .collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&retrofits)?);
            } else {
                print!("{}", report::retrofits(data, retrofits));
            }
        }
        Commands::Packages { development, json } => match development {
            Some(id) => {
                let dev = data
                    .development(&id)
                    .ok_or(CliError::UnknownDevelopment(id))?;
                let summaries = aggregate::package_summaries(data, dev);
                if json {
                    println!("{}", serde_json::to_string_pretty(&summaries)?);
                } else {
                    print!("{}", report::package_summaries(dev, &summaries));
                }
            }
            None => {
                if json {
                    println!("{}", serde_json::to_string_pretty(data.packages())?);
                } else {
                    print!("{}", report::packages(data.packages()));
                }
            }
        },
        Commands::Impact(args) => {
            let (dev, assessment) = args.assess(data)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&assessment.impact)?);
            } else {
                println!("{}", report::impact(data, dev, &assessment));
            }
        }
        Commands::Alignment(args) => {
            let (dev, assessment) = args.assess(data)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&assessment)?);
            } else {
                println!("{}", report::alignment(dev, &assessment));
            }
        }
        Commands::Serve => {
            actix_web::rt::System::new().block_on(heat_retrofit_server::run_server())?;
        }
    }

    Ok(())
}
