//! Paid visibility boost operations.
//!
//! Checkout happens on the payments provider's hosted page; after the
//! redirect back, activation races the provider webhook, so
//! [`crate::tasks::wait_for_boost_activation`] retries
//! [`ApiClient::activate_boosts`] on a bounded schedule.

use serde::Serialize;
use tracing::instrument;

use myswipe_core::{BoostId, ProductId};

use super::types::{Ack, Boost, BoostActivation, BoostCheckout, BoostList};
use super::{ApiClient, ApiError};

#[derive(Serialize)]
struct CreateCheckoutRequest<'a> {
    product_ids: &'a [ProductId],
    #[serde(skip_serializing_if = "Option::is_none")]
    days: Option<u32>,
}

#[derive(Serialize)]
struct ActivateRequest<'a> {
    session_id: &'a str,
}

impl ApiClient {
    /// List the seller's boosts, most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn list_boosts(&self) -> Result<Vec<Boost>, ApiError> {
        let list: BoostList = self.get("/v1/boosts").await?;
        let mut items = list.items;
        items.sort_by(|a, b| b.start_at.cmp(&a.start_at));
        Ok(items)
    }

    /// Start a hosted checkout for boosting the given products.
    ///
    /// Returns the checkout URL to redirect the seller to.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(count = product_ids.len()))]
    pub async fn create_boost_checkout(
        &self,
        product_ids: &[ProductId],
        days: Option<u32>,
    ) -> Result<BoostCheckout, ApiError> {
        self.post(
            "/v1/boosts/checkout",
            &CreateCheckoutRequest { product_ids, days },
        )
        .await
    }

    /// Activate boosts paid for in a checkout session.
    ///
    /// Fails until the provider confirms the payment, which may lag the
    /// redirect by up to two minutes.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or payment is not yet
    /// confirmed.
    #[instrument(skip(self))]
    pub async fn activate_boosts(&self, session_id: &str) -> Result<BoostActivation, ApiError> {
        self.post("/v1/boosts/activate", &ActivateRequest { session_id })
            .await
    }

    /// Cancel a running boost.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(boost_id = %id))]
    pub async fn cancel_boost(&self, id: &BoostId) -> Result<(), ApiError> {
        let _: Ack = self.post_empty(&format!("/v1/boosts/{id}/cancel")).await?;
        Ok(())
    }
}
