//! RegistrationPricer - prices workshop lines against the current price table.
//!
//! Shared by registration creation, workshop-set replacement and the
//! repricing triggered by membership changes.

use std::sync::Arc;

use tracing::debug;

use crate::domain::foundation::{DomainError, ErrorCode, MemberId, SeasonId, WorkshopId};
use crate::domain::registration::{FamilyOrder, PricingContext, WorkshopRegistration};
use crate::domain::season::Season;
use crate::ports::{MembershipRepository, WorkshopRepository};

/// A requested workshop and how many units of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkshopQuantity {
    pub workshop_id: WorkshopId,
    pub quantity: u32,
}

#[derive(Clone)]
pub struct RegistrationPricer {
    workshops: Arc<dyn WorkshopRepository>,
    memberships: Arc<dyn MembershipRepository>,
}

impl RegistrationPricer {
    pub fn new(
        workshops: Arc<dyn WorkshopRepository>,
        memberships: Arc<dyn MembershipRepository>,
    ) -> Self {
        Self {
            workshops,
            memberships,
        }
    }

    /// Builds the discount context for a member in a season.
    pub async fn context(
        &self,
        member_id: &MemberId,
        season: &Season,
        family_order: FamilyOrder,
    ) -> Result<PricingContext, DomainError> {
        let has_live_membership = self
            .memberships
            .find_by_member_and_season(member_id, &season.id)
            .await?
            .is_some_and(|m| m.counts_for_discount());

        Ok(PricingContext {
            season_discount: season.discount_percent,
            family_order,
            has_live_membership,
        })
    }

    /// Validates and prices every requested line.
    ///
    /// Fails on the first unknown workshop, missing price or invalid
    /// quantity; nothing is written either way.
    pub async fn price_lines(
        &self,
        context: &PricingContext,
        season_id: &SeasonId,
        requests: &[WorkshopQuantity],
    ) -> Result<Vec<WorkshopRegistration>, DomainError> {
        let mut lines = Vec::with_capacity(requests.len());
        for request in requests {
            let workshop = self
                .workshops
                .find_by_id(&request.workshop_id)
                .await?
                .ok_or_else(|| {
                    DomainError::new(
                        ErrorCode::WorkshopNotFound,
                        format!("Workshop {} not found", request.workshop_id),
                    )
                })?;
            let price = self
                .workshops
                .find_price(&request.workshop_id, season_id)
                .await?
                .ok_or_else(|| {
                    DomainError::new(
                        ErrorCode::WorkshopPriceNotFound,
                        format!("No price found for workshop {}", workshop.name),
                    )
                    .with_detail("workshop_id", request.workshop_id.to_string())
                    .with_detail("season_id", season_id.to_string())
                })?;

            let line = context.price_line(&workshop, price.amount, request.quantity)?;
            debug!(
                workshop_id = %workshop.id,
                base_price = %price.amount,
                applied_price = %line.applied_price,
                discount_percent = line.discount_percent.value(),
                "Priced workshop line"
            );
            lines.push(line);
        }
        Ok(lines)
    }

    /// Requotes existing lines with the current price table and discount.
    ///
    /// Quantities are kept as they are. A line whose workshop no longer has
    /// a price for the season keeps its snapshot.
    pub async fn reprice_lines(
        &self,
        context: &PricingContext,
        season_id: &SeasonId,
        lines: &[WorkshopRegistration],
    ) -> Result<Vec<WorkshopRegistration>, DomainError> {
        let mut repriced = Vec::with_capacity(lines.len());
        for line in lines {
            let price = self.workshops.find_price(&line.workshop_id, season_id).await?;
            let updated = match price {
                Some(price) => {
                    let quote = context.quote(price.amount);
                    WorkshopRegistration {
                        applied_price: quote.applied_price,
                        discount_percent: quote.discount_percent,
                        ..line.clone()
                    }
                }
                None => line.clone(),
            };
            repriced.push(updated);
        }
        Ok(repriced)
    }
}
