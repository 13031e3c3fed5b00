//! CLI argument definitions.

use clap::{Args, Parser, Subcommand};

use booking_core::ApiUrl;
use booking_core::types::DEFAULT_API_URL;

use crate::commands::{
    auth::AuthCommand, bookings::BookingsCommand, facilities::FacilitiesCommand,
    profile::ProfileCommand,
};

/// Book sports and community facilities from the terminal.
#[derive(Parser, Debug)]
#[command(name = "booking")]
#[command(author, version = env!("BOOKING_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Booking API base URL
    #[arg(long, env = "BOOKING_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api_url: ApiUrl,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30, global = true)]
    pub timeout_secs: u64,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in, register, log out
    Auth(AuthCommand),

    /// View or change your profile
    Profile(ProfileCommand),

    /// Browse facilities and their availability
    Facilities(FacilitiesCommand),

    /// Manage your bookings
    Bookings(BookingsCommand),
}
