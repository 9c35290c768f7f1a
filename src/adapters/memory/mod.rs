//! In-memory adapter implementing every port.
//!
//! All collections live behind one `RwLock`, so each port call, including
//! the multi-row writes of payment recording and workshop replacement,
//! is atomic. Useful for tests and local development.

mod families;
mod memberships;
mod payments;
mod registrations;
mod seasons;
mod settlement;
mod shows;
mod workshops;

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::family::{Family, Member};
use crate::domain::foundation::{
    FamilyId, MemberId, MembershipId, PaymentId, RegistrationId, SeasonId, ShowClientId, ShowId,
    WorkshopId,
};
use crate::domain::membership::Membership;
use crate::domain::payment::Payment;
use crate::domain::registration::Registration;
use crate::domain::season::Season;
use crate::domain::show::{Show, ShowClient};
use crate::domain::workshop::{Workshop, WorkshopPrice};

#[derive(Debug, Default)]
struct StoreState {
    seasons: HashMap<SeasonId, Season>,
    families: HashMap<FamilyId, Family>,
    members: HashMap<MemberId, Member>,
    workshops: HashMap<WorkshopId, Workshop>,
    prices: HashMap<(WorkshopId, SeasonId), WorkshopPrice>,
    memberships: HashMap<MembershipId, Membership>,
    registrations: HashMap<RegistrationId, Registration>,
    payments: HashMap<PaymentId, Payment>,
    show_clients: HashMap<ShowClientId, ShowClient>,
    shows: HashMap<ShowId, Show>,
}

/// Shared in-memory store. Clones share the same data.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(StoreState::default())),
        }
    }

    /// Number of stored payments (useful for tests).
    pub async fn payment_count(&self) -> usize {
        self.state.read().await.payments.len()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}
