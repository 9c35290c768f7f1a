//! GetPaymentStatusHandler - due/paid/balance summary of a family or member.

use std::sync::Arc;

use tracing::debug;

use crate::domain::foundation::{DomainError, ErrorCode, SeasonId};
use crate::domain::payment::SettlementScope;
use crate::domain::settlement::SettlementSummary;
use crate::ports::{SeasonRepository, SettlementReader};

#[derive(Debug, Clone)]
pub struct GetPaymentStatusQuery {
    pub scope: SettlementScope,
    pub season_id: Option<SeasonId>,
}

pub struct GetPaymentStatusHandler {
    seasons: Arc<dyn SeasonRepository>,
    settlement: Arc<dyn SettlementReader>,
}

impl GetPaymentStatusHandler {
    pub fn new(seasons: Arc<dyn SeasonRepository>, settlement: Arc<dyn SettlementReader>) -> Self {
        Self {
            seasons,
            settlement,
        }
    }

    pub async fn handle(&self, query: GetPaymentStatusQuery) -> Result<SettlementSummary, DomainError> {
        if let Some(season_id) = &query.season_id {
            if self.seasons.find_by_id(season_id).await?.is_none() {
                return Err(DomainError::new(ErrorCode::SeasonNotFound, "Season not found"));
            }
        }

        let ledger = self
            .settlement
            .load_ledger(&query.scope, query.season_id.as_ref())
            .await?;
        let summary = ledger.summary();

        debug!(
            total_due = %summary.total_due,
            total_paid = %summary.total_paid,
            balance = %summary.balance,
            "Computed payment status"
        );

        Ok(summary)
    }
}
