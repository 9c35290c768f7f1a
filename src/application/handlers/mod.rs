//! Command and query handlers, grouped by area.

pub mod family;
pub mod membership;
pub mod payment;
pub mod registration;
pub mod season;
pub mod show;
pub mod workshop;

#[cfg(test)]
pub(crate) mod test_support {
    //! Shared fixture: an in-memory store with one active season
    //! (10% sibling discount, 50.00 membership fee).

    use std::sync::Arc;

    use chrono::NaiveDate;

    use super::membership::MembershipHandlers;
    use super::payment::{
        CashPaymentHandler, GetPaymentStatusHandler, RecordPaymentCommand, RecordPaymentHandler,
    };
    use super::registration::{
        CreateRegistrationCommand, CreateRegistrationHandler, RegistrationPricer,
        RegistrationRepricer, ReplaceWorkshopsHandler, WorkshopQuantity,
    };
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::family::{Family, FamilyDetails, Member, MemberDetails};
    use crate::domain::foundation::{
        FamilyId, MembershipId, Money, RegistrationId, WorkshopId,
    };
    use crate::domain::membership::Membership;
    use crate::domain::payment::{PaymentScope, PaymentType};
    use crate::domain::registration::{FamilyOrder, Registration};
    use crate::domain::season::test_support::season_details;
    use crate::domain::season::Season;
    use crate::domain::show::{ShowClient, ShowClientDetails};
    use crate::domain::workshop::{Workshop, WorkshopDetails, WorkshopPrice};
    use crate::ports::{
        FamilyRepository, MemberRepository, MembershipRepository, RegistrationRepository,
        SeasonRepository, ShowRepository, WorkshopRepository,
    };

    pub struct Fixture {
        pub store: InMemoryStore,
        pub season: Season,
    }

    impl Fixture {
        pub async fn new() -> Self {
            let store = InMemoryStore::new();
            let season = Season::create(season_details(10)).unwrap();
            SeasonRepository::save(&store, &season).await.unwrap();
            Self { store, season }
        }

        pub fn arc(&self) -> Arc<InMemoryStore> {
            Arc::new(self.store.clone())
        }

        // ─── Data ───────────────────────────────────────────────────────────

        pub async fn family(&self) -> Family {
            let family = Family::create(FamilyDetails {
                name: "Martin".to_string(),
                ..Default::default()
            })
            .unwrap();
            FamilyRepository::save(&self.store, &family).await.unwrap();
            family
        }

        pub async fn member(&self, family_id: Option<FamilyId>) -> Member {
            let member = Member::create(MemberDetails {
                family_id,
                first_name: "Léa".to_string(),
                last_name: "Martin".to_string(),
                email: Some("lea@example.org".to_string()),
                phone: None,
                birth_date: None,
                is_minor: false,
                guardian: None,
            })
            .unwrap();
            MemberRepository::save(&self.store, &member).await.unwrap();
            member
        }

        pub async fn unpriced_workshop(&self) -> Workshop {
            let workshop = Workshop::create(WorkshopDetails {
                name: "Unpriced".to_string(),
                description: None,
                is_active: true,
                allow_multiple: false,
                max_per_member: None,
            })
            .unwrap();
            WorkshopRepository::save(&self.store, &workshop).await.unwrap();
            workshop
        }

        pub async fn workshop(&self, allow_multiple: bool, max_per_member: Option<u32>, price: i64) -> Workshop {
            let workshop = Workshop::create(WorkshopDetails {
                name: format!("Workshop {price}"),
                description: None,
                is_active: true,
                allow_multiple,
                max_per_member,
            })
            .unwrap();
            WorkshopRepository::save(&self.store, &workshop).await.unwrap();
            let price = WorkshopPrice::new(workshop.id, self.season.id, Money::from_units(price)).unwrap();
            self.store.upsert_price(&price).await.unwrap();
            workshop
        }

        /// Pending membership at the season fee, stored without repricing.
        pub async fn membership(&self, member: &Member) -> Membership {
            let membership = Membership::create(
                member.id,
                self.season.id,
                self.season.membership_amount,
                NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            )
            .unwrap();
            MembershipRepository::save(&self.store, &membership).await.unwrap();
            membership
        }

        pub async fn registration(&self, member: &Member, lines: &[(WorkshopId, u32)]) -> Registration {
            self.register(member, lines, FamilyOrder::FIRST).await
        }

        pub async fn sibling_registration(&self, member: &Member, lines: &[(WorkshopId, u32)]) -> Registration {
            self.register(member, lines, FamilyOrder::try_new(2).unwrap()).await
        }

        async fn register(
            &self,
            member: &Member,
            lines: &[(WorkshopId, u32)],
            family_order: FamilyOrder,
        ) -> Registration {
            self.create_registration_handler()
                .handle(CreateRegistrationCommand {
                    member_id: member.id,
                    season_id: self.season.id,
                    workshops: lines
                        .iter()
                        .map(|(workshop_id, quantity)| WorkshopQuantity {
                            workshop_id: *workshop_id,
                            quantity: *quantity,
                        })
                        .collect(),
                    family_order,
                    registration_date: None,
                })
                .await
                .unwrap()
        }

        pub async fn show_client(&self) -> ShowClient {
            let client = ShowClient::create(ShowClientDetails {
                client_type: "school".to_string(),
                name: "École Jules Ferry".to_string(),
                ..Default::default()
            })
            .unwrap();
            self.store.save_client(&client).await.unwrap();
            client
        }

        pub fn payment_command(&self, scope: PaymentScope, amount: i64) -> RecordPaymentCommand {
            RecordPaymentCommand {
                scope,
                season_id: Some(self.season.id),
                amount: Money::from_units(amount),
                payment_type: PaymentType::Check,
                payment_date: NaiveDate::from_ymd_opt(2024, 9, 15).unwrap(),
                reference: None,
                notes: None,
            }
        }

        // ─── Lookups ────────────────────────────────────────────────────────

        pub async fn registration_by_id(&self, id: &RegistrationId) -> Registration {
            RegistrationRepository::find_by_id(&self.store, id)
                .await
                .unwrap()
                .unwrap()
        }

        pub async fn membership_by_id(&self, id: &MembershipId) -> Membership {
            MembershipRepository::find_by_id(&self.store, id)
                .await
                .unwrap()
                .unwrap()
        }

        pub async fn season_donations(&self) -> Money {
            SeasonRepository::find_by_id(&self.store, &self.season.id)
                .await
                .unwrap()
                .unwrap()
                .total_donations
        }

        // ─── Handlers ───────────────────────────────────────────────────────

        pub fn pricer(&self) -> RegistrationPricer {
            RegistrationPricer::new(self.arc(), self.arc())
        }

        pub fn repricer(&self) -> RegistrationRepricer {
            RegistrationRepricer::new(self.arc(), self.arc(), self.pricer())
        }

        pub fn create_registration_handler(&self) -> CreateRegistrationHandler {
            CreateRegistrationHandler::new(self.arc(), self.arc(), self.arc(), self.pricer())
        }

        pub fn replace_workshops_handler(&self) -> ReplaceWorkshopsHandler {
            ReplaceWorkshopsHandler::new(self.arc(), self.arc(), self.pricer())
        }

        pub fn membership_handlers(&self) -> MembershipHandlers {
            MembershipHandlers::new(self.arc(), self.arc(), self.arc(), self.repricer())
        }

        pub fn record_payment_handler(&self) -> RecordPaymentHandler {
            RecordPaymentHandler::new(self.arc(), self.arc(), self.arc(), self.arc(), self.repricer())
        }

        pub fn cash_payment_handler(&self) -> CashPaymentHandler {
            CashPaymentHandler::new(self.arc(), self.arc(), self.repricer())
        }

        pub fn payment_status_handler(&self) -> GetPaymentStatusHandler {
            GetPaymentStatusHandler::new(self.arc(), self.arc())
        }
    }
}
