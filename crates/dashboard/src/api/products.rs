//! Product catalog operations.

use tracing::instrument;

use myswipe_core::{ListingMode, ProductId, ReviewStatus, VariantId};

use super::types::{
    AttachImageRequest, AttachVideoRequest, CreatedProduct, CreatedVariant, DealPatchRequest,
    ListProductsParams, ProductCreateRequest, ProductDto, ProductList, ProductPatchRequest,
    ProductSummary, SellerProductRow, SellerProductsPage, SignedUpload, SignedUrlRequest,
    StatusFilter, VariantCreateRequest,
};
use super::{ApiClient, ApiError};
use crate::storage::PublicUrls;

const DEFAULT_PAGE_SIZE: usize = 20;

impl ApiClient {
    /// Create a new product record.
    ///
    /// Returns the identifier of the created product. Variants and media
    /// are attached by separate calls.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects the
    /// payload.
    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create_product(
        &self,
        input: &ProductCreateRequest,
    ) -> Result<ProductId, ApiError> {
        let created: CreatedProduct = self.post("/v1/products", input).await?;
        Ok(created.id)
    }

    /// Create one variant record on a product.
    ///
    /// Variant creation is intentionally sequential per product: callers
    /// must await each call before issuing the next so downstream row
    /// ordering stays stable.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects the
    /// payload.
    #[instrument(skip(self, input), fields(product_id = %product_id))]
    pub async fn create_variant(
        &self,
        product_id: &ProductId,
        input: &VariantCreateRequest,
    ) -> Result<VariantId, ApiError> {
        let created: CreatedVariant = self
            .post(&format!("/v1/products/{product_id}/variants"), input)
            .await?;
        Ok(created.id)
    }

    /// Partially update a product's core fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, patch), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        id: &ProductId,
        patch: &ProductPatchRequest,
    ) -> Result<(), ApiError> {
        self.patch(&format!("/v1/products/{id}"), patch).await
    }

    /// Toggle or update a product's deal configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, deal), fields(product_id = %id, deal_active = deal.deal_active))]
    pub async fn set_deal(&self, id: &ProductId, deal: &DealPatchRequest) -> Result<(), ApiError> {
        self.patch(&format!("/v1/products/{id}/deal"), deal).await
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), ApiError> {
        self.delete(&format!("/v1/products/{id}")).await
    }

    /// Fetch a full product resource (used to hydrate the edit form).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response does not
    /// parse.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: &ProductId) -> Result<ProductDto, ApiError> {
        self.get(&format!("/v1/products/{id}")).await
    }

    /// Request a signed upload destination for an image payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, input), fields(product_id = %input.product_id))]
    pub async fn image_signed_url(
        &self,
        input: &SignedUrlRequest,
    ) -> Result<SignedUpload, ApiError> {
        self.post("/v1/media/image-signed-url", input).await
    }

    /// Request a signed upload destination for a video payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, input), fields(product_id = %input.product_id))]
    pub async fn video_signed_url(
        &self,
        input: &SignedUrlRequest,
    ) -> Result<SignedUpload, ApiError> {
        self.post("/v1/media/video-signed-url", input).await
    }

    /// Attach a previously uploaded image to a product record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, input), fields(product_id = %id, position = input.position))]
    pub async fn attach_image(
        &self,
        id: &ProductId,
        input: &AttachImageRequest,
    ) -> Result<(), ApiError> {
        let _: serde_json::Value = self
            .post(&format!("/v1/products/{id}/images"), input)
            .await?;
        Ok(())
    }

    /// Attach a previously uploaded video to a product record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, input), fields(product_id = %id, position = input.position))]
    pub async fn attach_video(
        &self,
        id: &ProductId,
        input: &AttachVideoRequest,
    ) -> Result<(), ApiError> {
        let _: serde_json::Value = self
            .post(&format!("/v1/products/{id}/videos"), input)
            .await?;
        Ok(())
    }

    /// List the seller's products, one page at a time.
    ///
    /// The backend paginates by cursor; this walks forward to the
    /// requested 1-based page, maps rows to [`ProductSummary`] (resolving
    /// storage paths to public URLs), and applies the client-side filters.
    ///
    /// # Errors
    ///
    /// Returns an error if any page fetch fails.
    #[instrument(skip(self, urls))]
    pub async fn list_products(
        &self,
        params: &ListProductsParams,
        urls: &PublicUrls,
    ) -> Result<ProductList, ApiError> {
        let page = params.page.unwrap_or(1).max(1);
        let page_size = params.page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1);

        let mut cursor: Option<String> = None;
        let mut rows: Vec<SellerProductRow> = Vec::new();
        for current in 1..=page {
            let mut query = vec![("limit", page_size.to_string())];
            if let Some(c) = cursor.take() {
                query.push(("cursor", c));
            }
            let fetched: SellerProductsPage =
                self.get_with_query("/v1/seller/products", &query).await?;
            cursor = fetched.next_cursor;
            if current == page {
                rows = fetched.items;
            }
            if cursor.is_none() {
                break;
            }
        }

        let mut items: Vec<ProductSummary> =
            rows.into_iter().map(|row| summarize(row, urls)).collect();
        apply_filters(&mut items, params);

        Ok(ProductList {
            items,
            page,
            page_size,
        })
    }
}

/// Map a listing row to the table summary shape.
fn summarize(row: SellerProductRow, urls: &PublicUrls) -> ProductSummary {
    let has_video = !row.videos.is_empty();
    let mut thumbnail_url = None;
    let mut video_url = None;
    let mut first_is_video = false;

    // Prefer an image thumbnail; fall back to the first video.
    if let Some(first) = row.images.first() {
        thumbnail_url = Some(urls.image(&first.url));
    } else if let Some(first) = row.videos.first() {
        first_is_video = true;
        video_url = Some(urls.video(&first.url));
        thumbnail_url = first.thumbnail.as_deref().map(|t| urls.image(t));
    }

    let review_status = match row.moderation_status.as_deref() {
        Some("rejected") => Some(ReviewStatus::Rejected),
        Some(status) if !row.active && status != "approved" => Some(ReviewStatus::PendingReview),
        _ => None,
    };
    let rejected_reason = if review_status == Some(ReviewStatus::Rejected) {
        row.rejected_reason
    } else {
        None
    };

    ProductSummary {
        id: row.id,
        title: row.title,
        thumbnail_url,
        video_url,
        first_is_video,
        has_video,
        active: row.active,
        deal_active: row.deal_active,
        deal_percent: row.deal_percent,
        created_at: row.created_at,
        category: row.category,
        price_minor: row.price_minor.unwrap_or(0),
        currency: row.currency.unwrap_or_default(),
        mode: if row.deal_active {
            ListingMode::Deal
        } else {
            ListingMode::Discover
        },
        coupon_code: row.coupon_code,
        is_swipe_hour: row.is_swipe_hour,
        review_status,
        rejected_reason,
    }
}

fn apply_filters(items: &mut Vec<ProductSummary>, params: &ListProductsParams) {
    if let Some(q) = params.q.as_deref().filter(|q| !q.is_empty()) {
        let needle = q.to_lowercase();
        items.retain(|p| p.title.to_lowercase().contains(&needle));
    }
    match params.status {
        Some(StatusFilter::Active) => items.retain(|p| p.active),
        Some(StatusFilter::PendingReview) => {
            items.retain(|p| !p.active && p.review_status == Some(ReviewStatus::PendingReview));
        }
        Some(StatusFilter::Rejected) => {
            items.retain(|p| p.review_status == Some(ReviewStatus::Rejected));
        }
        Some(StatusFilter::Draft) => {
            items.retain(|p| !p.active && p.review_status.is_none());
        }
        None => {}
    }
    if let Some(mode) = params.mode {
        items.retain(|p| p.mode == mode);
    }
    if let Some(min) = params.min_discount {
        items.retain(|p| p.deal_percent.unwrap_or(0) >= min);
    }
}
