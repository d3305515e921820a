//! Multi-step remote submission of a product draft.
//!
//! The create flow issues several independent remote calls with no
//! distributed transaction: core record, then variant records
//! (sequentially, so row ordering is stable), then per media item the
//! signed-URL / upload / attach pipeline, then the deal toggle. There is
//! deliberately no rollback - a failure after the core create leaves the
//! created records in place and reports the failure.
//!
//! Media items are fault-isolated: one item's pipeline failing does not
//! stop the remaining items, but any failed item marks the whole
//! submission as failed so the seller retries from a truthful state.

use std::sync::Arc;

use thiserror::Error;
use tracing::instrument;

use myswipe_core::{ListingMode, MediaKind, ProductId, to_minor};

use crate::api::types::{
    AttachImageRequest, AttachVideoRequest, DealPatchRequest, ProductCreateRequest,
    ProductPatchRequest, SignedUrlRequest, VariantCreateRequest,
};
use crate::api::{ApiClient, ApiError};
use crate::storage::{Bucket, StorageClient, ext_from_content_type};

use super::draft::{EditContext, ProductDraft};
use super::media::{MediaItem, MediaSource, VideoThumbnail};
use super::pricing;
use super::validate::{self, FieldError};

/// Transient-notification channel (the toast analog).
///
/// Every user-visible success or failure of the orchestrator goes
/// through this trait, keeping failure presentation uniform.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
    fn info(&self, message: &str);
}

/// Notifier that drops every message (headless embedding, tests).
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn success(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
    fn info(&self, _message: &str) {}
}

/// One media item whose upload pipeline failed.
#[derive(Debug, Clone)]
pub struct MediaFailure {
    pub kind: MediaKind,
    pub position: usize,
    pub message: String,
}

/// Errors produced by [`SubmitOrchestrator::submit`].
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Local validation failed; no remote call was made. The first entry
    /// is the focus target.
    #[error("validation failed: {}", format_field_errors(.0))]
    Invalid(Vec<FieldError>),

    /// A required remote step (core record, variant record, deal toggle)
    /// failed; remaining steps were aborted.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Some media items failed while the rest of the submission went
    /// through. Created records are not rolled back.
    #[error("{} of {total} media uploads failed", failures.len())]
    Media {
        product_id: ProductId,
        total: usize,
        failures: Vec<MediaFailure>,
    },
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result of a successful submission.
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub product_id: ProductId,
}

/// Callback invoked after a successful save so the hosting view can
/// refresh its listing.
pub type OnSaved = Box<dyn Fn(&ProductId) + Send + Sync>;

/// Sequences the remote calls that persist a draft.
pub struct SubmitOrchestrator {
    api: ApiClient,
    storage: StorageClient,
    notifier: Arc<dyn Notifier>,
    on_saved: Option<OnSaved>,
}

impl SubmitOrchestrator {
    #[must_use]
    pub fn new(api: ApiClient, storage: StorageClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            storage,
            notifier,
            on_saved: None,
        }
    }

    /// Register the refresh callback invoked after a successful save.
    #[must_use]
    pub fn with_on_saved(mut self, on_saved: OnSaved) -> Self {
        self.on_saved = Some(on_saved);
        self
    }

    /// Validate and submit a draft.
    ///
    /// On success the draft is reset (create) and every staged preview
    /// handle released; on failure the draft is left untouched so the
    /// seller can retry.
    ///
    /// # Errors
    ///
    /// - [`SubmitError::Invalid`] when local validation fails (no remote
    ///   calls are made)
    /// - [`SubmitError::Api`] when a required remote step fails
    /// - [`SubmitError::Media`] when one or more media pipelines fail
    #[instrument(skip(self, draft), fields(edit = draft.is_edit()))]
    pub async fn submit(&self, draft: &mut ProductDraft) -> Result<SubmitOutcome, SubmitError> {
        let errors = validate::validate(draft);
        if !errors.is_empty() {
            return Err(SubmitError::Invalid(errors));
        }

        match draft.edit_context().cloned() {
            Some(ctx) => self.submit_edit(draft, &ctx).await,
            None => self.submit_create(draft).await,
        }
    }

    async fn submit_create(&self, draft: &mut ProductDraft) -> Result<SubmitOutcome, SubmitError> {
        let price_minor = to_minor(draft.price);

        let request = ProductCreateRequest {
            title: draft.title.clone(),
            description: none_if_empty(&draft.description),
            price_minor,
            currency: myswipe_core::Currency::THB,
            category: draft.effective_category(),
            brand: none_if_empty(&draft.brand),
            external_url: none_if_empty(&draft.external_url),
            coupon_code: none_if_empty(&draft.coupon_code),
            is_swipe_hour: draft.swipe_hour,
            // New listings stay inactive until moderation approves them.
            active: false,
        };
        let product_id = self
            .api
            .create_product(&request)
            .await
            .map_err(|e| self.report_api(e))?;

        // Variant records, strictly one after another.
        for variant in draft.resolved_variants() {
            let request = VariantCreateRequest {
                sku: variant.sku.clone(),
                title: Some(variant_title(&variant.key.label())),
                price_minor: to_minor(variant.price),
                size: variant.key.value_for("Size").map(String::from),
                color: variant.key.value_for("Color").map(String::from),
                stock: variant.stock,
                active: variant.available,
            };
            self.api
                .create_variant(&product_id, &request)
                .await
                .map_err(|e| self.report_api(e))?;
        }

        let (total, failures) = self.upload_staged_media(&product_id, draft).await;

        if draft.mode == ListingMode::Deal
            && let Some(percent) = draft.discount_percent
        {
            let deal = DealPatchRequest {
                deal_active: true,
                deal_percent: Some(percent),
                deal_price_minor: Some(pricing::deal_price_minor(price_minor, percent)),
            };
            self.api
                .set_deal(&product_id, &deal)
                .await
                .map_err(|e| self.report_api(e))?;
        }

        if !failures.is_empty() {
            return Err(self.report_media(product_id, total, failures));
        }

        draft.reset_for_create();
        self.notifier.success("Product added");
        if let Some(on_saved) = self.on_saved.as_ref() {
            on_saved(&product_id);
        }
        Ok(SubmitOutcome { product_id })
    }

    async fn submit_edit(
        &self,
        draft: &mut ProductDraft,
        ctx: &EditContext,
    ) -> Result<SubmitOutcome, SubmitError> {
        let product_id = ctx.product_id.clone();
        let price_minor = to_minor(draft.price);

        let patch = build_patch(draft, ctx, price_minor);
        if !patch.is_empty() {
            self.api
                .update_product(&product_id, &patch)
                .await
                .map_err(|e| self.report_api(e))?;
        }

        // Only newly staged media upload on edit; remote items stay put.
        let (total, failures) = self.upload_staged_media(&product_id, draft).await;

        let deal_active = draft.mode == ListingMode::Deal;
        let deal_changed = deal_active != ctx.deal_active
            || (deal_active && draft.discount_percent != ctx.deal_percent);
        if deal_changed {
            let deal = if deal_active {
                let percent = draft.discount_percent;
                DealPatchRequest {
                    deal_active: true,
                    deal_percent: percent,
                    deal_price_minor: percent
                        .map(|p| pricing::deal_price_minor(price_minor, p)),
                }
            } else {
                DealPatchRequest {
                    deal_active: false,
                    deal_percent: None,
                    deal_price_minor: None,
                }
            };
            self.api
                .set_deal(&product_id, &deal)
                .await
                .map_err(|e| self.report_api(e))?;
        }

        if !failures.is_empty() {
            return Err(self.report_media(product_id, total, failures));
        }

        self.notifier.success("Product updated");
        if let Some(on_saved) = self.on_saved.as_ref() {
            on_saved(&product_id);
        }
        Ok(SubmitOutcome { product_id })
    }

    /// Run the signed-URL / upload / attach pipeline for every staged
    /// item, images first, then videos. Each item is fault-isolated.
    async fn upload_staged_media(
        &self,
        product_id: &ProductId,
        draft: &ProductDraft,
    ) -> (usize, Vec<MediaFailure>) {
        let mut total = 0;
        let mut failures = Vec::new();

        for item in draft.images.staged_items() {
            total += 1;
            if let Err(message) = self.upload_image(product_id, item).await {
                tracing::warn!(position = item.position, "image upload failed: {message}");
                failures.push(MediaFailure {
                    kind: MediaKind::Image,
                    position: item.position,
                    message,
                });
            }
        }
        for item in draft.videos.staged_items() {
            total += 1;
            if let Err(message) = self.upload_video(product_id, item).await {
                tracing::warn!(position = item.position, "video upload failed: {message}");
                failures.push(MediaFailure {
                    kind: MediaKind::Video,
                    position: item.position,
                    message,
                });
            }
        }

        (total, failures)
    }

    async fn upload_image(&self, product_id: &ProductId, item: &MediaItem) -> Result<(), String> {
        let MediaSource::Staged {
            content_type,
            bytes,
            ..
        } = &item.source
        else {
            return Ok(());
        };

        let ext = ext_from_content_type(content_type);
        let signed = self
            .api
            .image_signed_url(&SignedUrlRequest {
                file_name: format!("upload.{ext}"),
                content_type: content_type.clone(),
                product_id: product_id.clone(),
            })
            .await
            .map_err(|e| e.to_string())?;
        self.storage
            .upload(Bucket::ProductImages, &signed, bytes.clone(), content_type)
            .await
            .map_err(|e| e.to_string())?;
        self.api
            .attach_image(
                product_id,
                &AttachImageRequest {
                    path: signed.path,
                    alt_text: item.alt.clone(),
                    position: item.position,
                },
            )
            .await
            .map_err(|e| e.to_string())?;
        Ok(())
    }

    async fn upload_video(&self, product_id: &ProductId, item: &MediaItem) -> Result<(), String> {
        let MediaSource::Staged {
            content_type,
            bytes,
            ..
        } = &item.source
        else {
            return Ok(());
        };

        let ext = ext_from_content_type(content_type);
        let signed = self
            .api
            .video_signed_url(&SignedUrlRequest {
                file_name: format!("upload.{ext}"),
                content_type: content_type.clone(),
                product_id: product_id.clone(),
            })
            .await
            .map_err(|e| e.to_string())?;
        self.storage
            .upload(Bucket::ProductVideos, &signed, bytes.clone(), content_type)
            .await
            .map_err(|e| e.to_string())?;

        // Poster upload is best-effort: a failed poster never fails the
        // video itself.
        let thumbnail = match &item.thumbnail {
            Some(VideoThumbnail::Staged {
                content_type: poster_type,
                bytes: poster_bytes,
            }) => match self
                .upload_poster(product_id, poster_type, poster_bytes.clone())
                .await
            {
                Ok(path) => Some(path),
                Err(message) => {
                    tracing::warn!("video poster upload failed: {message}");
                    None
                }
            },
            Some(VideoThumbnail::Remote { url }) => Some(url.clone()),
            None => None,
        };

        self.api
            .attach_video(
                product_id,
                &AttachVideoRequest {
                    path: signed.path,
                    thumbnail,
                    position: item.position,
                },
            )
            .await
            .map_err(|e| e.to_string())?;
        Ok(())
    }

    async fn upload_poster(
        &self,
        product_id: &ProductId,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, String> {
        let ext = ext_from_content_type(content_type);
        let signed = self
            .api
            .image_signed_url(&SignedUrlRequest {
                file_name: format!("thumb.{ext}"),
                content_type: content_type.to_string(),
                product_id: product_id.clone(),
            })
            .await
            .map_err(|e| e.to_string())?;
        self.storage
            .upload(Bucket::ProductImages, &signed, bytes, content_type)
            .await
            .map_err(|e| e.to_string())?;
        Ok(signed.path)
    }

    fn report_api(&self, err: ApiError) -> SubmitError {
        self.notifier.error(&err.to_string());
        SubmitError::Api(err)
    }

    fn report_media(
        &self,
        product_id: ProductId,
        total: usize,
        failures: Vec<MediaFailure>,
    ) -> SubmitError {
        let first = failures
            .first()
            .map_or_else(String::new, |f| f.message.clone());
        self.notifier.error(&format!(
            "{} of {total} media uploads failed: {first}",
            failures.len()
        ));
        SubmitError::Media {
            product_id,
            total,
            failures,
        }
    }
}

fn none_if_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn variant_title(label: &str) -> String {
    if label.is_empty() {
        "Default".to_string()
    } else {
        label.to_string()
    }
}

fn build_patch(draft: &ProductDraft, ctx: &EditContext, price_minor: i64) -> ProductPatchRequest {
    let mut patch = ProductPatchRequest::default();
    if draft.title != ctx.title {
        patch.title = Some(draft.title.clone());
    }
    if draft.description != ctx.description {
        patch.description = Some(draft.description.clone());
    }
    if price_minor != ctx.price_minor {
        patch.price_minor = Some(price_minor);
    }
    let category = draft.effective_category();
    if category != ctx.category {
        patch.category = Some(category);
    }
    if draft.brand != ctx.brand {
        patch.brand = Some(draft.brand.clone());
    }
    if draft.external_url != ctx.external_url {
        patch.external_url = Some(draft.external_url.clone());
    }
    if draft.coupon_code != ctx.coupon_code {
        patch.coupon_code = Some(draft.coupon_code.clone());
    }
    if draft.swipe_hour != ctx.swipe_hour {
        patch.is_swipe_hour = Some(draft.swipe_hour);
    }
    patch
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_title_defaults_for_empty_matrix() {
        assert_eq!(variant_title(""), "Default");
        assert_eq!(variant_title("M / Red"), "M / Red");
    }

    #[test]
    fn none_if_empty_trims() {
        assert_eq!(none_if_empty("  "), None);
        assert_eq!(none_if_empty(" Acme "), Some("Acme".to_string()));
    }

    #[test]
    fn invalid_error_lists_fields() {
        let errors = vec![
            FieldError {
                field: super::super::validate::Field::Title,
                message: "Required".to_string(),
            },
            FieldError {
                field: super::super::validate::Field::Price,
                message: "Must be greater than 0".to_string(),
            },
        ];
        let err = SubmitError::Invalid(errors);
        assert_eq!(
            err.to_string(),
            "validation failed: Name: Required; Price: Must be greater than 0"
        );
    }

    #[test]
    fn media_error_counts() {
        let err = SubmitError::Media {
            product_id: ProductId::new("p_1"),
            total: 3,
            failures: vec![MediaFailure {
                kind: MediaKind::Image,
                position: 1,
                message: "boom".to_string(),
            }],
        };
        assert_eq!(err.to_string(), "1 of 3 media uploads failed");
    }
}
