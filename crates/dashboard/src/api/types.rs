//! Wire types for the MySwipe backend.
//!
//! Field names follow the backend's JSON exactly: product resources use
//! snake_case, the media signing endpoints use camelCase.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use myswipe_core::{
    BoostId, Currency, KycStatus, ListingMode, MediaId, PayoutSchedule, ProductId, ReviewStatus,
    SellerStatus, VariantId,
};

// =============================================================================
// Products
// =============================================================================

/// Full product resource returned by `GET /v1/products/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductDto {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price_minor: Option<i64>,
    #[serde(default)]
    pub currency: Option<Currency>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub deal_active: bool,
    #[serde(default)]
    pub deal_percent: Option<u8>,
    #[serde(default)]
    pub deal_price_minor: Option<i64>,
    /// Consolidated pricing block; preferred over the flat fields when set.
    #[serde(default)]
    pub pricing: Option<PricingDto>,
    #[serde(default)]
    pub external_url: Option<String>,
    #[serde(default)]
    pub coupon_code: Option<String>,
    #[serde(default)]
    pub is_swipe_hour: bool,
    #[serde(default)]
    pub images: Vec<ImageDto>,
    #[serde(default)]
    pub videos: Vec<VideoDto>,
    #[serde(default)]
    pub variants: Vec<VariantDto>,
    pub created_at: DateTime<Utc>,
}

impl ProductDto {
    /// Base price in minor units, preferring the pricing block.
    #[must_use]
    pub fn price_minor(&self) -> i64 {
        self.pricing
            .as_ref()
            .map(|p| p.original_price_minor)
            .or(self.price_minor)
            .unwrap_or(0)
    }

    /// Currency, preferring the pricing block.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.pricing
            .as_ref()
            .and_then(|p| p.currency)
            .or(self.currency)
            .unwrap_or_default()
    }

    /// Whether a deal is active, preferring the pricing block.
    #[must_use]
    pub fn deal_active(&self) -> bool {
        self.pricing.as_ref().is_some_and(|p| p.is_deal) || self.deal_active
    }

    /// Deal discount percent, preferring the pricing block.
    #[must_use]
    pub fn deal_percent(&self) -> Option<u8> {
        self.pricing
            .as_ref()
            .and_then(|p| p.discount_percent)
            .or(self.deal_percent)
    }

    /// Effective sale price in minor units, preferring the pricing block.
    #[must_use]
    pub fn deal_price_minor(&self) -> Option<i64> {
        self.pricing
            .as_ref()
            .and_then(|p| p.display_price_minor)
            .or(self.deal_price_minor)
    }
}

/// Consolidated pricing block on a product resource.
#[derive(Debug, Clone, Deserialize)]
pub struct PricingDto {
    pub original_price_minor: i64,
    #[serde(default)]
    pub display_price_minor: Option<i64>,
    #[serde(default)]
    pub discount_percent: Option<u8>,
    #[serde(default)]
    pub is_deal: bool,
    #[serde(default)]
    pub currency: Option<Currency>,
}

/// Attached image on a product resource.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageDto {
    pub id: MediaId,
    /// Public URL (already resolved by the backend).
    pub url: String,
    #[serde(default)]
    pub position: i64,
    #[serde(default)]
    pub alt_text: Option<String>,
}

/// Attached video on a product resource.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoDto {
    pub id: MediaId,
    pub url: String,
    #[serde(default)]
    pub position: i64,
    /// Public URL of the poster image, if one was attached.
    #[serde(default)]
    pub thumbnail: Option<String>,
}

/// Variant row on a product resource.
#[derive(Debug, Clone, Deserialize)]
pub struct VariantDto {
    pub id: VariantId,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub price_minor: Option<i64>,
    #[serde(default)]
    pub stock: Option<u32>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub title: Option<String>,
}

/// Body for `POST /v1/products`.
#[derive(Debug, Clone, Serialize)]
pub struct ProductCreateRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price_minor: i64,
    pub currency: Currency,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
    pub is_swipe_hour: bool,
    pub active: bool,
}

/// Body for `POST /v1/products/{id}/variants`.
#[derive(Debug, Clone, Serialize)]
pub struct VariantCreateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub price_minor: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub stock: u32,
    pub active: bool,
}

/// Partial body for `PATCH /v1/products/{id}`.
///
/// Only set fields are serialized, so the backend sees a true partial
/// update.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductPatchRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_minor: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_swipe_hour: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl ProductPatchRequest {
    /// Whether any field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.price_minor.is_none()
            && self.currency.is_none()
            && self.category.is_none()
            && self.brand.is_none()
            && self.external_url.is_none()
            && self.coupon_code.is_none()
            && self.is_swipe_hour.is_none()
            && self.active.is_none()
    }
}

/// Body for `PATCH /v1/products/{id}/deal`.
#[derive(Debug, Clone, Serialize)]
pub struct DealPatchRequest {
    pub deal_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deal_percent: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deal_price_minor: Option<i64>,
}

/// Response of the create endpoints: the new resource identifier.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedProduct {
    pub id: ProductId,
}

/// Response of `POST /v1/products/{id}/variants`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedVariant {
    pub id: VariantId,
}

// =============================================================================
// Media signing
// =============================================================================

/// Body for the signed-URL endpoints (camelCase on the wire).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedUrlRequest {
    pub file_name: String,
    pub content_type: String,
    pub product_id: ProductId,
}

/// A short-lived, pre-authorized upload destination.
#[derive(Debug, Clone, Deserialize)]
pub struct SignedUpload {
    /// Storage path of the object once uploaded.
    pub path: String,
    /// Token for the SDK-style signed upload.
    pub token: String,
    /// Absolute URL accepting a raw `PUT` of the payload.
    #[serde(rename = "uploadUrl")]
    pub upload_url: String,
}

/// Body for `POST /v1/products/{id}/images`.
#[derive(Debug, Clone, Serialize)]
pub struct AttachImageRequest {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    pub position: usize,
}

/// Body for `POST /v1/products/{id}/videos`.
#[derive(Debug, Clone, Serialize)]
pub struct AttachVideoRequest {
    pub path: String,
    /// Storage path (or retained remote URL) of the poster image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub position: usize,
}

// =============================================================================
// Product listing
// =============================================================================

/// One page of `GET /v1/seller/products`.
#[derive(Debug, Clone, Deserialize)]
pub struct SellerProductsPage {
    #[serde(default)]
    pub items: Vec<SellerProductRow>,
    #[serde(rename = "nextCursor", default)]
    pub next_cursor: Option<String>,
}

/// Row shape of the seller products listing.
#[derive(Debug, Clone, Deserialize)]
pub struct SellerProductRow {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub deal_active: bool,
    #[serde(default)]
    pub deal_percent: Option<u8>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub price_minor: Option<i64>,
    #[serde(default)]
    pub currency: Option<Currency>,
    #[serde(default)]
    pub coupon_code: Option<String>,
    #[serde(default)]
    pub is_swipe_hour: bool,
    #[serde(default)]
    pub moderation_status: Option<String>,
    #[serde(default)]
    pub rejected_reason: Option<String>,
    /// Storage paths, not public URLs, in the listing rows.
    #[serde(default)]
    pub images: Vec<RowImage>,
    #[serde(default)]
    pub videos: Vec<RowVideo>,
}

/// Image entry on a listing row (storage path form).
#[derive(Debug, Clone, Deserialize)]
pub struct RowImage {
    pub url: String,
}

/// Video entry on a listing row (storage path form).
#[derive(Debug, Clone, Deserialize)]
pub struct RowVideo {
    pub url: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

/// Client-side summary of a listing, shaped for the products table.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSummary {
    pub id: ProductId,
    pub title: String,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
    pub first_is_video: bool,
    pub has_video: bool,
    pub active: bool,
    pub deal_active: bool,
    pub deal_percent: Option<u8>,
    pub created_at: DateTime<Utc>,
    pub category: Option<String>,
    pub price_minor: i64,
    pub currency: Currency,
    pub mode: ListingMode,
    pub coupon_code: Option<String>,
    pub is_swipe_hour: bool,
    pub review_status: Option<ReviewStatus>,
    pub rejected_reason: Option<String>,
}

/// Status filter for the products listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    Active,
    PendingReview,
    Rejected,
    Draft,
}

/// Filters and paging for [`super::ApiClient::list_products`].
#[derive(Debug, Clone, Default)]
pub struct ListProductsParams {
    pub q: Option<String>,
    pub status: Option<StatusFilter>,
    pub mode: Option<ListingMode>,
    pub min_discount: Option<u8>,
    /// 1-based page number (default 1).
    pub page: Option<usize>,
    /// Page size (default 20).
    pub page_size: Option<usize>,
}

/// Result of [`super::ApiClient::list_products`].
#[derive(Debug, Clone)]
pub struct ProductList {
    pub items: Vec<ProductSummary>,
    pub page: usize,
    pub page_size: usize,
}

// =============================================================================
// Payouts
// =============================================================================

/// Wire shape of `GET /v1/seller/payouts/summary`.
#[derive(Debug, Clone, Deserialize)]
pub struct PayoutSummaryDto {
    #[serde(default)]
    pub currency: Option<Currency>,
    #[serde(default)]
    pub available_minor: i64,
    #[serde(default)]
    pub interval: Option<String>,
}

/// Payout summary shaped for the payouts screen.
#[derive(Debug, Clone, PartialEq)]
pub struct PayoutSummary {
    /// Available balance, floored at zero.
    pub balance: myswipe_core::Money,
    pub schedule: PayoutSchedule,
    pub next_payout_at: DateTime<Utc>,
}

// =============================================================================
// Boosts
// =============================================================================

/// A paid visibility boost on one product.
#[derive(Debug, Clone, Deserialize)]
pub struct Boost {
    pub id: BoostId,
    pub product_id: ProductId,
    pub seller_id: myswipe_core::SellerId,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub status: String,
    pub package_code: String,
    pub price_minor: i64,
    pub currency: Currency,
    pub created_at: DateTime<Utc>,
}

/// Response of `GET /v1/boosts`.
#[derive(Debug, Clone, Deserialize)]
pub struct BoostList {
    #[serde(default)]
    pub items: Vec<Boost>,
}

/// Response of `POST /v1/boosts/checkout`.
#[derive(Debug, Clone, Deserialize)]
pub struct BoostCheckout {
    pub ok: bool,
    /// Hosted checkout URL to redirect the seller to.
    pub url: String,
}

/// One entry of a boost activation response.
#[derive(Debug, Clone, Deserialize)]
pub struct ActivatedBoost {
    #[serde(default)]
    pub id: Option<BoostId>,
    pub product_id: ProductId,
    pub status: String,
}

/// Response of `POST /v1/boosts/activate`.
#[derive(Debug, Clone, Deserialize)]
pub struct BoostActivation {
    #[serde(default)]
    pub created: Vec<ActivatedBoost>,
}

impl BoostActivation {
    /// Number of boosts that became active in this response.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.created.iter().filter(|b| b.status == "active").count()
    }
}

/// Generic acknowledgement body.
#[derive(Debug, Clone, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub ok: bool,
}

// =============================================================================
// Analytics
// =============================================================================

/// Reporting window accepted by the analytics endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalyticsWindow {
    #[default]
    SevenDays,
    ThirtyDays,
}

impl AnalyticsWindow {
    /// Wire value (`7d` / `30d`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SevenDays => "7d",
            Self::ThirtyDays => "30d",
        }
    }
}

/// Sort key for the per-product analytics listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalyticsSort {
    Impressions,
    #[default]
    Clicks,
    Saves,
}

impl AnalyticsSort {
    /// Wire value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Impressions => "impressions",
            Self::Clicks => "clicks",
            Self::Saves => "saves",
        }
    }
}

/// Response of `GET /v1/seller/analytics/overview`.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsOverview {
    #[serde(default)]
    pub impressions: u64,
    #[serde(default)]
    pub clicks: u64,
    #[serde(default)]
    pub saves: u64,
    #[serde(default)]
    pub orders: u64,
    #[serde(default)]
    pub revenue_minor: i64,
}

/// Row of `GET /v1/seller/analytics/products`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductAnalyticsRow {
    pub product_id: ProductId,
    pub title: String,
    #[serde(default)]
    pub impressions: u64,
    #[serde(default)]
    pub clicks: u64,
    #[serde(default)]
    pub saves: u64,
}

/// Response wrapper of the per-product analytics listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductAnalytics {
    #[serde(default)]
    pub items: Vec<ProductAnalyticsRow>,
}

/// Point of `GET /v1/seller/analytics/timeseries`.
#[derive(Debug, Clone, Deserialize)]
pub struct TimeseriesPoint {
    pub date: chrono::NaiveDate,
    #[serde(default)]
    pub impressions: u64,
    #[serde(default)]
    pub clicks: u64,
}

/// Response wrapper of the analytics timeseries.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsTimeseries {
    #[serde(default)]
    pub points: Vec<TimeseriesPoint>,
}

// =============================================================================
// Seller
// =============================================================================

/// Seller profile resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellerProfile {
    pub display_name: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    pub seller_status: SellerStatus,
    #[serde(default)]
    pub stripe_account_id: Option<String>,
}

/// Partial body for `PATCH /v1/seller/profile`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SellerProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

/// Response of `GET /v1/seller/kyc`.
#[derive(Debug, Clone, Deserialize)]
pub struct KycStatusResponse {
    pub status: KycStatus,
}

/// Response of `POST /v1/seller/kyc/start`.
#[derive(Debug, Clone, Deserialize)]
pub struct KycStarted {
    pub started: bool,
}
