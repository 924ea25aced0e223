//! Swagger From Service - Command-line tool for generating Swagger 1.2 documentation.
//!
//! This binary reads an API descriptor (a named, versioned list of REST service
//! descriptors) and writes either the resource listing of the API or the API
//! declaration of one of its services.
//!
//! # Usage
//!
//! ```bash
//! swagger-from-service [OPTIONS] <DESCRIPTOR>
//! ```
//!
//! # Examples
//!
//! Generate the resource listing:
//! ```bash
//! swagger-from-service ./shop.yaml -o api-docs.json
//! ```
//!
//! Generate the declaration of one service:
//! ```bash
//! swagger-from-service ./shop.yaml --service Order --base-url http://localhost/api
//! ```

use anyhow::Result;
use clap::Parser;
use log::info;
use swagger_from_service::cli;

fn main() -> Result<()> {
    let args = cli::CliArgs::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("Swagger From Service starting...");

    let args = cli::parse_args_from_parsed(args)?;

    cli::run(args)?;

    info!("Swagger document generation completed successfully");

    Ok(())
}
