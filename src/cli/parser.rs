use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition for rcheckin
/// CLI client to check staff in and out of the attendance backend
#[derive(Parser)]
#[command(
    name = "rcheckin",
    version = env!("CARGO_PKG_VERSION"),
    about = "Check staff in and out: geolocation, photo attachment and a local journal",
    long_about = None
)]
pub struct Cli {
    /// Override journal database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the backend base URL (e.g. http://localhost:5000)
    #[arg(global = true, long = "server")]
    pub server: Option<String>,

    /// Show developer trace output
    #[arg(global = true, long, short = 'v')]
    pub verbose: bool,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Fields of the action form.
#[derive(Args, Debug, Clone, Default)]
pub struct ActionArgs {
    /// Capture the current position and resolve it to an address
    #[arg(long = "locate", help = "Capture the current position and resolve an address")]
    pub locate: bool,

    /// Latitude of the position fix (implies --locate)
    #[arg(long = "lat", requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude of the position fix (implies --locate)
    #[arg(long = "lng", requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,

    /// Location text; overrides the looked-up address
    #[arg(long = "location", value_name = "TEXT")]
    pub location: Option<String>,

    /// Photo to attach
    #[arg(long = "photo", value_name = "FILE")]
    pub photo: Option<PathBuf>,

    /// Extra form field, repeatable
    #[arg(long = "field", value_name = "KEY=VALUE")]
    pub fields: Vec<String>,

    /// Offer to resubmit the same data after a failure
    #[arg(long = "retry", help = "Prompt to resubmit the same data after a failure")]
    pub retry: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the journal database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Check in
    Checkin(ActionArgs),

    /// Check out
    Checkout(ActionArgs),

    /// Capture the current position and print the resolved location
    Locate {
        #[arg(long = "lat", requires = "lng", allow_negative_numbers = true)]
        lat: Option<f64>,

        #[arg(long = "lng", requires = "lat", allow_negative_numbers = true)]
        lng: Option<f64>,
    },

    /// Show today's check-in / check-out status
    Status,

    /// List recorded activities
    History {
        /// Day to show (YYYY-MM-DD); defaults to today
        #[arg(long, short, conflicts_with = "all")]
        date: Option<String>,

        /// Show the whole journal
        #[arg(long)]
        all: bool,

        /// Filter by kind: login or logout
        #[arg(long)]
        kind: Option<String>,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Show the current local time
    Clock {
        /// Keep the clock running, refreshed every second
        #[arg(long, short)]
        watch: bool,

        /// Stop watching after N ticks
        #[arg(long, requires = "watch")]
        count: Option<u64>,
    },
}
