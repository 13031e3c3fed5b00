//! Facility browsing commands.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use colored::Colorize;

use booking_core::model::{FacilityStatus, MonthlyAvailability, TimeSlot};

use super::connect_authenticated;
use crate::cli::GlobalArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct FacilitiesCommand {
    #[command(subcommand)]
    pub command: FacilitiesSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum FacilitiesSubcommand {
    /// List facilities, optionally filtered by name
    List {
        #[arg(long, default_value = "")]
        search: String,
    },

    /// Show one facility
    Show { id: u64 },

    /// Hourly availability for a day
    Daily {
        id: u64,

        /// Day to check (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
    },

    /// Fully-booked days in a month
    Monthly {
        id: u64,

        #[arg(long)]
        year: i32,

        /// Month number, 1-12
        #[arg(long)]
        month: u32,
    },
}

pub async fn handle(cmd: FacilitiesCommand, global: &GlobalArgs) -> Result<()> {
    let client = connect_authenticated(global).await?;

    match cmd.command {
        FacilitiesSubcommand::List { search } => {
            let facilities = client
                .facilities(&search)
                .await
                .context("Failed to list facilities")?;

            if global.json {
                return output::json_pretty(&facilities);
            }
            if facilities.is_empty() {
                output::note("No facilities found.");
                return Ok(());
            }
            for facility in &facilities {
                println!(
                    "{:>4}  {}  {}",
                    facility.id,
                    facility.name.bold(),
                    status_label(facility.status)
                );
                if !facility.description.is_empty() {
                    println!("      {}", facility.description.dimmed());
                }
            }
            Ok(())
        }
        FacilitiesSubcommand::Show { id } => {
            let facility = client
                .facility(id)
                .await
                .context("Failed to load facility")?;

            if global.json {
                return output::json_pretty(&facility);
            }
            output::field("ID", &facility.id.to_string());
            output::field("Name", &facility.name);
            output::field("Description", &facility.description);
            output::field("Capacity", &facility.max_capacity.to_string());
            output::field("Status", &status_label(facility.status));
            Ok(())
        }
        FacilitiesSubcommand::Daily { id, date } => {
            let slots = client
                .daily_availability(id, date)
                .await
                .context("Failed to load availability")?;

            if global.json {
                return output::json_pretty(&slots);
            }
            if slots.is_empty() {
                output::note("No time slots for this day.");
                return Ok(());
            }
            for slot in &slots {
                println!("{}", slot_line(slot));
            }
            Ok(())
        }
        FacilitiesSubcommand::Monthly { id, year, month } => {
            let days = client
                .monthly_availability(id, year, month)
                .await
                .context("Failed to load availability")?;

            if global.json {
                return output::json_pretty(&days);
            }
            for day in &days {
                println!("{}", day_line(day));
            }
            Ok(())
        }
    }
}

fn status_label(status: FacilityStatus) -> String {
    let label = status.to_string();
    match status {
        FacilityStatus::Active => label.green().to_string(),
        FacilityStatus::Inactive => label.red().to_string(),
        FacilityStatus::Maintenance => label.yellow().to_string(),
    }
}

fn slot_line(slot: &TimeSlot) -> String {
    let state = if slot.available {
        "available".green()
    } else {
        "full".red()
    };
    format!(
        "{}-{}  {}  ({}/{})",
        slot.start_time, slot.end_time, state, slot.current_bookings, slot.max_capacity
    )
}

fn day_line(day: &MonthlyAvailability) -> String {
    let state = if day.is_fully_booked {
        "fully booked".red()
    } else {
        "available".green()
    };
    format!("{}  {}", day.date.format("%Y-%m-%d"), state)
}
