//! Booking models and list queries.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// Lifecycle status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Booked,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Booked => "booked",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "booked" => Ok(BookingStatus::Booked),
            "cancelled" => Ok(BookingStatus::Cancelled),
            "completed" => Ok(BookingStatus::Completed),
            other => Err(InvalidInputError::Other {
                message: format!("unknown booking status '{}'", other),
            }
            .into()),
        }
    }
}

/// A booking owned by the current user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: u64,
    pub facility_id: u64,
    pub user_id: u64,
    pub booking_date: NaiveDate,
    pub start_hour: u8,
    pub end_hour: u8,
    #[serde(default)]
    pub notes: Option<String>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

/// One page of the current user's bookings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingsPage {
    #[serde(default)]
    pub bookings: Vec<Booking>,
    pub page: u32,
    pub total_pages: u32,
}

impl BookingsPage {
    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn next_page(&self) -> Option<u32> {
        self.has_next_page().then_some(self.page + 1)
    }
}

/// Sort order for booking lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(InvalidInputError::Other {
                message: format!("unknown sort direction '{}'", other),
            }
            .into()),
        }
    }
}

/// Filters and paging for "my bookings". Always sorted by creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingQuery {
    pub page: u32,
    pub page_size: u32,
    pub sort_direction: SortDirection,
    pub status: Option<BookingStatus>,
}

impl BookingQuery {
    pub const SORT_BY: &'static str = "createdAt";
    pub const DEFAULT_PAGE_SIZE: u32 = 10;

    /// The same filters on another page.
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    /// Query parameters in wire order.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("pageSize", self.page_size.to_string()),
            ("sortBy", Self::SORT_BY.to_string()),
            ("sortDirection", self.sort_direction.as_str().to_string()),
        ];
        if let Some(status) = self.status {
            params.push(("status", status.as_str().to_string()));
        }
        params
    }
}

impl Default for BookingQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: Self::DEFAULT_PAGE_SIZE,
            sort_direction: SortDirection::default(),
            status: None,
        }
    }
}
