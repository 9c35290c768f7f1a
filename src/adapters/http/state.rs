//! Shared state of the REST API.

use std::sync::Arc;

use sqlx::PgPool;

use crate::adapters::memory::InMemoryStore;
use crate::adapters::postgres::{
    PostgresFamilyRepository, PostgresMemberRepository, PostgresMembershipRepository,
    PostgresPaymentRepository, PostgresRegistrationRepository, PostgresSeasonRepository,
    PostgresSettlementReader, PostgresShowRepository, PostgresWorkshopRepository,
};
use crate::application::handlers::family::{FamilyHandlers, MemberHandlers};
use crate::application::handlers::membership::MembershipHandlers;
use crate::application::handlers::payment::{
    CancelPaymentHandler, CashPaymentHandler, GetPaymentHandler, GetPaymentStatusHandler,
    ListPaymentsHandler, RecordPaymentHandler,
};
use crate::application::handlers::registration::{
    CreateRegistrationHandler, DeleteRegistrationHandler, GetRegistrationHandler,
    ListRegistrationsHandler, RegistrationPricer, RegistrationRepricer, ReplaceWorkshopsHandler,
};
use crate::application::handlers::season::{
    ActivateSeasonHandler, CreateSeasonHandler, SeasonQueries, UpdateSeasonHandler,
};
use crate::application::handlers::show::ShowHandlers;
use crate::application::handlers::workshop::WorkshopHandlers;
use crate::ports::{
    FamilyRepository, MemberRepository, MembershipRepository, PaymentRepository,
    RegistrationRepository, SeasonRepository, SettlementReader, ShowRepository,
    WorkshopRepository,
};

/// Ports shared by every request.
///
/// Cloned per request; application handlers are built on demand from it.
#[derive(Clone)]
pub struct AppState {
    pub seasons: Arc<dyn SeasonRepository>,
    pub families: Arc<dyn FamilyRepository>,
    pub members: Arc<dyn MemberRepository>,
    pub workshops: Arc<dyn WorkshopRepository>,
    pub memberships: Arc<dyn MembershipRepository>,
    pub registrations: Arc<dyn RegistrationRepository>,
    pub payments: Arc<dyn PaymentRepository>,
    pub shows: Arc<dyn ShowRepository>,
    pub settlement: Arc<dyn SettlementReader>,
}

impl AppState {
    /// State backed by PostgreSQL.
    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            seasons: Arc::new(PostgresSeasonRepository::new(pool.clone())),
            families: Arc::new(PostgresFamilyRepository::new(pool.clone())),
            members: Arc::new(PostgresMemberRepository::new(pool.clone())),
            workshops: Arc::new(PostgresWorkshopRepository::new(pool.clone())),
            memberships: Arc::new(PostgresMembershipRepository::new(pool.clone())),
            registrations: Arc::new(PostgresRegistrationRepository::new(pool.clone())),
            payments: Arc::new(PostgresPaymentRepository::new(pool.clone())),
            shows: Arc::new(PostgresShowRepository::new(pool.clone())),
            settlement: Arc::new(PostgresSettlementReader::new(pool)),
        }
    }

    /// State backed by one in-memory store.
    pub fn from_store(store: InMemoryStore) -> Self {
        let store = Arc::new(store);
        Self {
            seasons: store.clone(),
            families: store.clone(),
            members: store.clone(),
            workshops: store.clone(),
            memberships: store.clone(),
            registrations: store.clone(),
            payments: store.clone(),
            shows: store.clone(),
            settlement: store,
        }
    }

    // ─── seasons ───

    pub fn season_queries(&self) -> SeasonQueries {
        SeasonQueries::new(self.seasons.clone())
    }

    pub fn create_season_handler(&self) -> CreateSeasonHandler {
        CreateSeasonHandler::new(self.seasons.clone())
    }

    pub fn update_season_handler(&self) -> UpdateSeasonHandler {
        UpdateSeasonHandler::new(self.seasons.clone())
    }

    pub fn activate_season_handler(&self) -> ActivateSeasonHandler {
        ActivateSeasonHandler::new(self.seasons.clone())
    }

    // ─── families & members ───

    pub fn family_handlers(&self) -> FamilyHandlers {
        FamilyHandlers::new(self.families.clone(), self.members.clone())
    }

    pub fn member_handlers(&self) -> MemberHandlers {
        MemberHandlers::new(self.families.clone(), self.members.clone())
    }

    // ─── workshops ───

    pub fn workshop_handlers(&self) -> WorkshopHandlers {
        WorkshopHandlers::new(self.workshops.clone(), self.seasons.clone())
    }

    // ─── memberships & registrations ───

    fn pricer(&self) -> RegistrationPricer {
        RegistrationPricer::new(self.workshops.clone(), self.memberships.clone())
    }

    fn repricer(&self) -> RegistrationRepricer {
        RegistrationRepricer::new(
            self.registrations.clone(),
            self.seasons.clone(),
            self.pricer(),
        )
    }

    pub fn membership_handlers(&self) -> MembershipHandlers {
        MembershipHandlers::new(
            self.memberships.clone(),
            self.members.clone(),
            self.seasons.clone(),
            self.repricer(),
        )
    }

    pub fn create_registration_handler(&self) -> CreateRegistrationHandler {
        CreateRegistrationHandler::new(
            self.registrations.clone(),
            self.members.clone(),
            self.seasons.clone(),
            self.pricer(),
        )
    }

    pub fn replace_workshops_handler(&self) -> ReplaceWorkshopsHandler {
        ReplaceWorkshopsHandler::new(
            self.registrations.clone(),
            self.seasons.clone(),
            self.pricer(),
        )
    }

    pub fn get_registration_handler(&self) -> GetRegistrationHandler {
        GetRegistrationHandler::new(self.registrations.clone())
    }

    pub fn list_registrations_handler(&self) -> ListRegistrationsHandler {
        ListRegistrationsHandler::new(self.registrations.clone())
    }

    pub fn delete_registration_handler(&self) -> DeleteRegistrationHandler {
        DeleteRegistrationHandler::new(self.registrations.clone())
    }

    // ─── payments ───

    pub fn record_payment_handler(&self) -> RecordPaymentHandler {
        RecordPaymentHandler::new(
            self.payments.clone(),
            self.seasons.clone(),
            self.shows.clone(),
            self.settlement.clone(),
            self.repricer(),
        )
    }

    pub fn cash_payment_handler(&self) -> CashPaymentHandler {
        CashPaymentHandler::new(
            self.payments.clone(),
            self.settlement.clone(),
            self.repricer(),
        )
    }

    pub fn cancel_payment_handler(&self) -> CancelPaymentHandler {
        CancelPaymentHandler::new(self.payments.clone())
    }

    pub fn payment_status_handler(&self) -> GetPaymentStatusHandler {
        GetPaymentStatusHandler::new(self.seasons.clone(), self.settlement.clone())
    }

    pub fn get_payment_handler(&self) -> GetPaymentHandler {
        GetPaymentHandler::new(self.payments.clone())
    }

    pub fn list_payments_handler(&self) -> ListPaymentsHandler {
        ListPaymentsHandler::new(self.payments.clone())
    }

    // ─── shows ───

    pub fn show_handlers(&self) -> ShowHandlers {
        ShowHandlers::new(self.shows.clone())
    }
}
