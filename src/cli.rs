use crate::config::{parse_coordinate, LATITUDE_LIMIT, LONGITUDE_LIMIT};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sapcast", version, about = "Maple sap tapping advisor")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override SQLite data directory
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Re-run interactive setup
    Init,
    /// Validate config and test connections
    Check,
    /// Print the tapping report for the configured or given location
    Report {
        /// Latitude (defaults to the configured location)
        #[arg(long, allow_hyphen_values = true, requires = "lon", value_parser = parse_latitude)]
        lat: Option<f64>,
        /// Longitude (defaults to the configured location)
        #[arg(long, allow_hyphen_values = true, requires = "lat", value_parser = parse_longitude)]
        lon: Option<f64>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
        /// Ignore the cache and fetch a fresh forecast
        #[arg(long)]
        refresh: bool,
    },
    /// Print typical season timing for a latitude (no network)
    Season {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Defaults to the current year
        #[arg(long)]
        year: Option<i32>,
    },
    /// Rate a single day from its low and high (°C) with default thresholds
    Rate {
        #[arg(long, allow_hyphen_values = true)]
        low: f64,
        #[arg(long, allow_hyphen_values = true)]
        high: f64,
    },
    /// Serve the JSON API and web page
    Serve {
        /// Address to bind, overriding the config
        #[arg(long)]
        bind: Option<String>,
    },
}

fn parse_latitude(raw: &str) -> Result<f64, String> {
    parse_coordinate(raw, "lat", LATITUDE_LIMIT)
}

fn parse_longitude(raw: &str) -> Result<f64, String> {
    parse_coordinate(raw, "lon", LONGITUDE_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_report_with_negative_longitude() {
        let cli = Cli::parse_from([
            "sapcast", "report", "--lat", "44.5", "--lon", "-73.2", "--json",
        ]);
        match cli.command {
            Some(Commands::Report {
                lat,
                lon,
                json,
                refresh,
            }) => {
                assert_eq!(lat, Some(44.5));
                assert_eq!(lon, Some(-73.2));
                assert!(json);
                assert!(!refresh);
            }
            _ => panic!("expected report command"),
        }
    }

    #[test]
    fn report_coordinates_come_in_pairs() {
        assert!(Cli::try_parse_from(["sapcast", "report", "--lat", "44.5"]).is_err());
    }

    #[test]
    fn report_coordinates_are_range_checked() {
        for args in [
            ["sapcast", "report", "--lat", "91", "--lon", "-73.2"],
            ["sapcast", "report", "--lat", "44.5", "--lon", "-180.5"],
            ["sapcast", "report", "--lat", "NaN", "--lon", "-73.2"],
            ["sapcast", "report", "--lat", "44.5", "--lon", "inf"],
        ] {
            assert!(Cli::try_parse_from(args).is_err(), "{:?}", args);
        }

        let cli = Cli::parse_from(["sapcast", "report", "--lat", "-90", "--lon", "180"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Report {
                lat: Some(_),
                lon: Some(_),
                ..
            })
        ));
    }

    #[test]
    fn no_subcommand_means_tui() {
        let cli = Cli::parse_from(["sapcast", "-vv"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
