//! Status enums for marketplace entities.

use serde::{Deserialize, Serialize};

/// Listing status of a product as the seller sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    Active,
    #[default]
    Draft,
}

/// Moderation outcome attached to a listing by the marketplace review team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    PendingReview,
    Approved,
    Rejected,
}

/// Surfacing mode of a listing.
///
/// Derived from the deal flag: a listing with an active deal shows in the
/// deal session, everything else in the discover feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ListingMode {
    #[default]
    Discover,
    Deal,
}

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Paid,
    Fulfilled,
    InTransit,
    Refunded,
}

/// Approval state of the seller account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SellerStatus {
    #[default]
    Pending,
    Approved,
    Disabled,
}

/// Identity-verification state reported by the hosted payments provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum KycStatus {
    #[default]
    NotStarted,
    InProgress,
    Verified,
    Rejected,
}

impl KycStatus {
    /// Whether this state is terminal for the onboarding poll.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Verified | Self::Rejected)
    }
}

/// Payout cadence configured with the payments provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PayoutSchedule {
    Daily,
    #[default]
    Weekly,
    Monthly,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kyc_terminal_states() {
        assert!(KycStatus::Verified.is_terminal());
        assert!(KycStatus::Rejected.is_terminal());
        assert!(!KycStatus::InProgress.is_terminal());
        assert!(!KycStatus::NotStarted.is_terminal());
    }

    #[test]
    fn statuses_serialize_snake_case() {
        assert_eq!(
            serde_json::to_string(&ReviewStatus::PendingReview).expect("serialize"),
            "\"pending_review\""
        );
        assert_eq!(
            serde_json::to_string(&OrderStatus::InTransit).expect("serialize"),
            "\"in_transit\""
        );
    }
}
