//! Show/animation bookings and their clients.
//!
//! A secondary ledger: clients (schools, companies, town halls...) book
//! shows; their payments are attributed to the client and never enter the
//! membership settlement.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    normalize_optional, require_text, Money, ShowClientId, ShowId, Timestamp, ValidationError,
};

#[derive(Debug, Clone, Default)]
pub struct ShowClientDetails {
    pub client_type: String,
    pub name: String,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowClient {
    pub id: ShowClientId,
    pub client_type: String,
    pub name: String,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ShowClient {
    pub fn create(details: ShowClientDetails) -> Result<Self, ValidationError> {
        let now = Timestamp::now();
        let mut client = Self {
            id: ShowClientId::new(),
            client_type: String::new(),
            name: String::new(),
            contact_name: None,
            email: None,
            phone: None,
            address: None,
            notes: None,
            created_at: now,
            updated_at: now,
        };
        client.apply(details)?;
        Ok(client)
    }

    pub fn update(&mut self, details: ShowClientDetails) -> Result<(), ValidationError> {
        self.apply(details)?;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    fn apply(&mut self, details: ShowClientDetails) -> Result<(), ValidationError> {
        self.client_type = require_text("client_type", &details.client_type)?;
        self.name = require_text("name", &details.name)?;
        self.contact_name = normalize_optional(details.contact_name);
        self.email = normalize_optional(details.email);
        self.phone = normalize_optional(details.phone);
        self.address = normalize_optional(details.address);
        self.notes = normalize_optional(details.notes);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShowStatus {
    Pending,
    Paid,
    Cancelled,
}

impl ShowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShowStatus::Pending => "pending",
            ShowStatus::Paid => "paid",
            ShowStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(ShowStatus::Pending),
            "paid" => Some(ShowStatus::Paid),
            "cancelled" => Some(ShowStatus::Cancelled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ShowDetails {
    pub client_id: ShowClientId,
    pub title: String,
    pub description: Option<String>,
    pub proposed_date: Option<NaiveDate>,
    pub confirmed_date: Option<NaiveDate>,
    pub duration_minutes: Option<u32>,
    pub proposed_price: Money,
    pub agreed_price: Option<Money>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub status: ShowStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Show {
    pub id: ShowId,
    pub client_id: ShowClientId,
    pub title: String,
    pub description: Option<String>,
    pub proposed_date: Option<NaiveDate>,
    pub confirmed_date: Option<NaiveDate>,
    pub duration_minutes: Option<u32>,
    pub proposed_price: Money,
    pub agreed_price: Option<Money>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub status: ShowStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Show {
    pub fn create(details: ShowDetails) -> Result<Self, ValidationError> {
        let details = validate(details)?;
        let now = Timestamp::now();
        Ok(Self {
            id: ShowId::new(),
            client_id: details.client_id,
            title: details.title,
            description: details.description,
            proposed_date: details.proposed_date,
            confirmed_date: details.confirmed_date,
            duration_minutes: details.duration_minutes,
            proposed_price: details.proposed_price,
            agreed_price: details.agreed_price,
            location: details.location,
            notes: details.notes,
            status: details.status,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn update(&mut self, details: ShowDetails) -> Result<(), ValidationError> {
        let details = validate(details)?;
        self.client_id = details.client_id;
        self.title = details.title;
        self.description = details.description;
        self.proposed_date = details.proposed_date;
        self.confirmed_date = details.confirmed_date;
        self.duration_minutes = details.duration_minutes;
        self.proposed_price = details.proposed_price;
        self.agreed_price = details.agreed_price;
        self.location = details.location;
        self.notes = details.notes;
        self.status = details.status;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// The date the show takes place: confirmed if known, else proposed.
    pub fn scheduled_date(&self) -> Option<NaiveDate> {
        self.confirmed_date.or(self.proposed_date)
    }

    /// Not cancelled and scheduled on or after `today`.
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.status != ShowStatus::Cancelled
            && self.scheduled_date().is_some_and(|d| d >= today)
    }
}

fn validate(details: ShowDetails) -> Result<ShowDetails, ValidationError> {
    details.proposed_price.ensure_non_negative("proposed_price")?;
    if let Some(agreed) = details.agreed_price {
        agreed.ensure_non_negative("agreed_price")?;
    }
    if details.duration_minutes == Some(0) {
        return Err(ValidationError::out_of_range(
            "duration_minutes",
            1,
            i64::from(u32::MAX),
            0,
        ));
    }
    Ok(ShowDetails {
        title: require_text("title", &details.title)?,
        description: normalize_optional(details.description),
        location: normalize_optional(details.location),
        notes: normalize_optional(details.notes),
        ..details
    })
}
