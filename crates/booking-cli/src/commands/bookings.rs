//! Booking commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use serde_json::json;

use booking_core::BookingForm;
use booking_core::model::{Booking, BookingQuery, BookingStatus, SortDirection};

use super::connect_authenticated;
use crate::cli::GlobalArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct BookingsCommand {
    #[command(subcommand)]
    pub command: BookingsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum BookingsSubcommand {
    /// List your bookings, newest first by default
    List(ListArgs),

    /// Book one hour of a facility
    Create(CreateArgs),

    /// Cancel a booking
    Cancel { id: u64 },
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only bookings with this status (booked, cancelled, completed)
    #[arg(long)]
    pub status: Option<BookingStatus>,

    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Sort by creation time (asc or desc)
    #[arg(long, default_value = "desc")]
    pub sort: SortDirection,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Facility ID
    #[arg(long)]
    pub facility: u64,

    /// Booking date (YYYY-MM-DD)
    #[arg(long)]
    pub date: String,

    /// Start hour, 0-23
    #[arg(long)]
    pub hour: u8,

    #[arg(long)]
    pub notes: Option<String>,
}

pub async fn handle(cmd: BookingsCommand, global: &GlobalArgs) -> Result<()> {
    let client = connect_authenticated(global).await?;

    match cmd.command {
        BookingsSubcommand::List(args) => {
            let query = BookingQuery {
                page: args.page,
                sort_direction: args.sort,
                status: args.status,
                ..BookingQuery::default()
            };
            let page = client
                .my_bookings(&query)
                .await
                .context("Failed to list bookings")?;

            if global.json {
                return output::json_pretty(&page);
            }
            if page.bookings.is_empty() {
                output::note("No bookings found.");
                return Ok(());
            }
            for booking in &page.bookings {
                println!("{}", booking_line(booking));
            }
            eprintln!();
            output::note(&format!("Page {} of {}", page.page, page.total_pages));
            if let Some(next) = page.next_page() {
                output::note(&format!("Next page: --page {}", next));
            }
            Ok(())
        }
        BookingsSubcommand::Create(args) => {
            let mut form = BookingForm::new(args.facility, args.date, Some(args.hour));
            if let Some(notes) = args.notes {
                form = form.with_notes(notes);
            }
            let booking = client
                .create_booking(&form)
                .await
                .context("Failed to create booking")?;

            if global.json {
                return output::json_pretty(&json!({
                    "created": true,
                    "booking": booking,
                }));
            }
            match booking {
                Some(booking) => {
                    output::success(&format!("Booking #{} created", booking.id));
                    println!("{}", booking_line(&booking));
                }
                None => output::success("Booking created"),
            }
            Ok(())
        }
        BookingsSubcommand::Cancel { id } => {
            client
                .cancel_booking(id)
                .await
                .context("Failed to cancel booking")?;
            output::success(&format!("Booking #{} cancelled", id));
            Ok(())
        }
    }
}

fn booking_line(booking: &Booking) -> String {
    let status = booking.status.to_string();
    let status = match booking.status {
        BookingStatus::Booked => status.green(),
        BookingStatus::Cancelled => status.red(),
        BookingStatus::Completed => status.dimmed(),
    };

    let mut line = format!(
        "#{:<5} facility {}  {} {:02}:00-{:02}:00  {}",
        booking.id,
        booking.facility_id,
        booking.booking_date.format("%Y-%m-%d"),
        booking.start_hour,
        booking.end_hour,
        status
    );
    if let Some(notes) = &booking.notes {
        line.push_str(&format!("  {}", notes.dimmed()));
    }
    line
}
