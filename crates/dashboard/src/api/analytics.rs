//! Seller analytics operations.

use tracing::instrument;

use super::types::{
    AnalyticsOverview, AnalyticsSort, AnalyticsTimeseries, AnalyticsWindow, ProductAnalytics,
};
use super::{ApiClient, ApiError};

const DEFAULT_PRODUCT_LIMIT: usize = 50;
const MAX_PRODUCT_LIMIT: usize = 100;

impl ApiClient {
    /// Fetch aggregate metrics for the given window.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn analytics_overview(
        &self,
        window: AnalyticsWindow,
    ) -> Result<AnalyticsOverview, ApiError> {
        self.get_with_query(
            "/v1/seller/analytics/overview",
            &[("window", window.as_str().to_string())],
        )
        .await
    }

    /// Fetch per-product metrics, sorted server-side.
    ///
    /// `limit` is clamped to 1..=100 to match the backend's bounds.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn analytics_products(
        &self,
        window: AnalyticsWindow,
        sort: AnalyticsSort,
        limit: Option<usize>,
    ) -> Result<ProductAnalytics, ApiError> {
        let limit = limit
            .unwrap_or(DEFAULT_PRODUCT_LIMIT)
            .clamp(1, MAX_PRODUCT_LIMIT);
        self.get_with_query(
            "/v1/seller/analytics/products",
            &[
                ("window", window.as_str().to_string()),
                ("sort", sort.as_str().to_string()),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }

    /// Fetch the daily timeseries for the given window.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn analytics_timeseries(
        &self,
        window: AnalyticsWindow,
    ) -> Result<AnalyticsTimeseries, ApiError> {
        self.get_with_query(
            "/v1/seller/analytics/timeseries",
            &[("window", window.as_str().to_string())],
        )
        .await
    }
}
