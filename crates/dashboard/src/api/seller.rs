//! Seller profile and KYC onboarding operations.

use tracing::instrument;

use myswipe_core::KycStatus;

use super::types::{KycStarted, KycStatusResponse, SellerProfile, SellerProfilePatch};
use super::{ApiClient, ApiError};

impl ApiClient {
    /// Fetch the seller profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn seller_profile(&self) -> Result<SellerProfile, ApiError> {
        self.get("/v1/seller/profile").await
    }

    /// Partially update the seller profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, patch))]
    pub async fn update_seller_profile(
        &self,
        patch: &SellerProfilePatch,
    ) -> Result<(), ApiError> {
        self.patch("/v1/seller/profile", patch).await
    }

    /// Fetch the current KYC state from the hosted payments provider.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn kyc_status(&self) -> Result<KycStatus, ApiError> {
        let response: KycStatusResponse = self.get("/v1/seller/kyc").await?;
        Ok(response.status)
    }

    /// Begin KYC onboarding with the hosted payments provider.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn start_kyc(&self) -> Result<KycStarted, ApiError> {
        self.post_empty("/v1/seller/kyc/start").await
    }

    /// Ensure a seller record exists for the signed-in account.
    ///
    /// Fired after sign-in as a best-effort bootstrap; failures are logged
    /// and ignored so a flaky backend never blocks the session.
    #[instrument(skip(self))]
    pub async fn ensure_seller(&self) {
        if let Err(err) = self
            .post_empty::<serde_json::Value>("/v1/seller/bootstrap")
            .await
        {
            tracing::debug!("seller bootstrap skipped: {err}");
        }
    }
}
