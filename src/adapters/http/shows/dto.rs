//! Request and response bodies for show endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Money, ShowClientId, ShowId};
use crate::domain::show::{Show, ShowClient, ShowClientDetails, ShowDetails, ShowStatus};
use crate::ports::ShowFilter;

// ════════════════════════════════════════════════════════════════════════════════
// Clients
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowClientRequest {
    /// School, company, town hall...
    pub client_type: String,
    pub name: String,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<ShowClientRequest> for ShowClientDetails {
    fn from(request: ShowClientRequest) -> Self {
        ShowClientDetails {
            client_type: request.client_type,
            name: request.name,
            contact_name: request.contact_name,
            email: request.email,
            phone: request.phone,
            address: request.address,
            notes: request.notes,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowClientResponse {
    pub id: ShowClientId,
    pub client_type: String,
    pub name: String,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ShowClient> for ShowClientResponse {
    fn from(client: ShowClient) -> Self {
        Self {
            id: client.id,
            client_type: client.client_type,
            name: client.name,
            contact_name: client.contact_name,
            email: client.email,
            phone: client.phone,
            address: client.address,
            notes: client.notes,
            created_at: client.created_at.as_datetime().to_rfc3339(),
            updated_at: client.updated_at.as_datetime().to_rfc3339(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Shows
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowRequest {
    pub client_id: ShowClientId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub proposed_date: Option<NaiveDate>,
    #[serde(default)]
    pub confirmed_date: Option<NaiveDate>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    pub proposed_price: Money,
    #[serde(default)]
    pub agreed_price: Option<Money>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Pending when omitted.
    #[serde(default)]
    pub status: Option<ShowStatus>,
}

impl From<ShowRequest> for ShowDetails {
    fn from(request: ShowRequest) -> Self {
        ShowDetails {
            client_id: request.client_id,
            title: request.title,
            description: request.description,
            proposed_date: request.proposed_date,
            confirmed_date: request.confirmed_date,
            duration_minutes: request.duration_minutes,
            proposed_price: request.proposed_price,
            agreed_price: request.agreed_price,
            location: request.location,
            notes: request.notes,
            status: request.status.unwrap_or(ShowStatus::Pending),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowResponse {
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
    pub created_at: String,
    pub updated_at: String,
}

impl From<Show> for ShowResponse {
    fn from(show: Show) -> Self {
        Self {
            id: show.id,
            client_id: show.client_id,
            title: show.title,
            description: show.description,
            proposed_date: show.proposed_date,
            confirmed_date: show.confirmed_date,
            duration_minutes: show.duration_minutes,
            proposed_price: show.proposed_price,
            agreed_price: show.agreed_price,
            location: show.location,
            notes: show.notes,
            status: show.status,
            created_at: show.created_at.as_datetime().to_rfc3339(),
            updated_at: show.updated_at.as_datetime().to_rfc3339(),
        }
    }
}

/// Query string of `GET /shows`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowListParams {
    pub status: Option<ShowStatus>,
    pub client_id: Option<ShowClientId>,
}

impl From<ShowListParams> for ShowFilter {
    fn from(params: ShowListParams) -> Self {
        ShowFilter {
            status: params.status,
            client_id: params.client_id,
        }
    }
}
