//! Payout summary operations.

use chrono::{DateTime, Duration, Utc};
use tracing::instrument;

use myswipe_core::{Money, PayoutSchedule};

use super::types::{PayoutSummary, PayoutSummaryDto};
use super::{ApiClient, ApiError};

impl ApiClient {
    /// Fetch the payout summary for the signed-in seller.
    ///
    /// The backend reports the raw balance and interval; the next payout
    /// date is projected client-side from the schedule.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails. The payouts screen treats a
    /// failure as "summary unavailable" (the payments provider may not be
    /// configured yet) rather than an empty balance.
    #[instrument(skip(self))]
    pub async fn payout_summary(&self) -> Result<PayoutSummary, ApiError> {
        let dto: PayoutSummaryDto = self.get("/v1/seller/payouts/summary").await?;
        Ok(map_summary(dto, Utc::now()))
    }
}

fn map_summary(dto: PayoutSummaryDto, now: DateTime<Utc>) -> PayoutSummary {
    let schedule = match dto.interval.as_deref() {
        Some("daily") => PayoutSchedule::Daily,
        Some("monthly") => PayoutSchedule::Monthly,
        _ => PayoutSchedule::Weekly,
    };
    let days_until_next = match schedule {
        PayoutSchedule::Daily => 1,
        PayoutSchedule::Weekly => 7,
        PayoutSchedule::Monthly => 30,
    };

    PayoutSummary {
        // Never show a negative available balance.
        balance: Money::from_minor(dto.available_minor.max(0), dto.currency.unwrap_or_default()),
        schedule,
        next_payout_at: now + Duration::days(days_until_next),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use myswipe_core::Currency;

    fn dto(available_minor: i64, interval: Option<&str>) -> PayoutSummaryDto {
        PayoutSummaryDto {
            currency: Some(Currency::THB),
            available_minor,
            interval: interval.map(String::from),
        }
    }

    #[test]
    fn unknown_interval_defaults_to_weekly() {
        let now = Utc::now();
        let summary = map_summary(dto(5000, Some("fortnightly")), now);
        assert_eq!(summary.schedule, PayoutSchedule::Weekly);
        assert_eq!(summary.next_payout_at, now + Duration::days(7));
    }

    #[test]
    fn daily_interval_projects_tomorrow() {
        let now = Utc::now();
        let summary = map_summary(dto(5000, Some("daily")), now);
        assert_eq!(summary.schedule, PayoutSchedule::Daily);
        assert_eq!(summary.next_payout_at, now + Duration::days(1));
    }

    #[test]
    fn negative_balance_is_floored() {
        let summary = map_summary(dto(-250, None), Utc::now());
        assert_eq!(summary.balance.minor, 0);
    }
}
