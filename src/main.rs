// Life Expectancy Cleaner - Main executable
// Author: Gabriel Demetrios Lafis

use std::path::PathBuf;

use anyhow::Context;
use clap::{Arg, Command};
use log::error;

use life_expectancy::{
    cleaning::clean_file,
    utils::{init_logging, parse_level, Config},
};

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let matches = Command::new("life-expectancy")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Gabriel Demetrios Lafis")
        .about("Cleans the Eurostat life expectancy table for one region")
        .arg(
            Arg::new("region")
                .help("Country code to filter the data [default: PT]")
                .index(1),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Sets a custom config file (JSON or YAML)")
                .takes_value(true),
        )
        .arg(
            Arg::new("data-dir")
                .short('d')
                .long("data-dir")
                .value_name("DIR")
                .help("Directory holding the raw input and the cleaned output")
                .takes_value(true),
        )
        .arg(
            Arg::new("log-level")
                .short('l')
                .long("log-level")
                .value_name("LEVEL")
                .help("Log level: off, error, warn, info, debug or trace")
                .takes_value(true),
        )
        .get_matches();

    // Load configuration
    let mut config = match matches.value_of("config") {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("failed to load config file '{}'", path))?,
        None => Config::default(),
    };

    if let Some(dir) = matches.value_of("data-dir") {
        config.data.dir = PathBuf::from(dir);
    }

    let level = matches
        .value_of("log-level")
        .map(parse_level)
        .unwrap_or_else(|| config.log_level_filter());

    // Initialize logging
    if let Err(err) = init_logging(level) {
        eprintln!("Error initializing logger: {}", err);
    }

    let region = matches.value_of("region");

    if let Err(err) = clean_file(&config, region) {
        error!("Cleaning failed: {}", err);
        return Err(err).context("failed to clean life expectancy data");
    }

    Ok(())
}
