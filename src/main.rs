//! CMS OpenAPI Generator - Command-line tool for generating OpenAPI documentation.
//!
//! This binary scans a CMS installation's API component and webservices plugin
//! sources and emits a complete OpenAPI 3.1 specification in YAML, without
//! executing any of the scanned code.
//!
//! # Usage
//!
//! ```bash
//! openapi-from-cms [OPTIONS] <CMS_ROOT>
//! ```
//!
//! # Examples
//!
//! Generate documentation for active plugins:
//! ```bash
//! openapi-from-cms /var/www/site -o core-apis.yaml
//! ```
//!
//! Include every discovered component:
//! ```bash
//! openapi-from-cms /var/www/site --all
//! ```
//!
//! Enable verbose logging:
//! ```bash
//! openapi-from-cms /var/www/site -v
//! ```

mod cli;
mod error;
mod extractor;
mod inflect;
mod openapi_builder;
mod scanner;
mod serializer;
mod tags;

use anyhow::Result;
use clap::Parser;
use log::info;

fn main() -> Result<()> {
    // Parse args once up front so the verbose flag can configure the logger
    let args_for_verbose = cli::CliArgs::parse();

    let log_level = if args_for_verbose.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("CMS OpenAPI Generator starting...");

    let args = cli::parse_args_from_parsed(args_for_verbose)?;

    cli::run(args)?;

    info!("OpenAPI document generation completed successfully");

    Ok(())
}
