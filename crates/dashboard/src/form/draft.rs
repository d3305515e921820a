//! The in-progress product draft.
//!
//! A draft is created blank (create mode) or hydrated from a fetched
//! remote product (edit mode), mutated only through form interactions,
//! and converted to request payloads by the submission orchestrator.
//! Discarding the draft releases every staged preview handle.

use std::sync::Arc;

use myswipe_core::{ListingMode, ProductId, to_major};

use crate::api::types::ProductDto;

use super::media::{MediaBuffer, PreviewAllocator, RemoteMedia};
use super::options::{OptionSet, OverrideMap, ResolvedVariant, RootPricing, VariantKey};
use super::pricing;

/// Sentinel category whose selection enables the free-text input.
pub const OTHER_CATEGORY: &str = "Other (Custom)";

/// Category choices offered by the editor.
pub const CATEGORY_OPTIONS: &[&str] = &[
    "Tops (T-Shirts, Shirts, Blouses, Sweaters, Hoodies)",
    "Outerwear (Jackets, Coats, Blazers)",
    "Dresses & Jumpsuits",
    "Bottoms (Pants, Jeans, Shorts, Skirts, Leggings)",
    "Activewear",
    "Swimwear",
    "Underwear & Lingerie",
    "Sleepwear",
    "Headwear (Beanies, Caps)",
    "Accessories (Scarves, Belts, Gloves, Ties)",
    "Footwear",
    "Sets",
    "Wearables",
    OTHER_CATEGORY,
];

/// Item weight entered on the draft (display only; not part of the
/// create payload).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weight {
    pub value: Option<f64>,
    pub unit: WeightUnit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeightUnit {
    #[default]
    Grams,
    Kilograms,
}

/// Snapshot of the remote product's core fields, kept while editing so
/// the patch payload carries only what actually changed.
#[derive(Debug, Clone)]
pub struct EditContext {
    pub product_id: ProductId,
    pub title: String,
    pub description: String,
    pub price_minor: i64,
    pub category: String,
    pub brand: String,
    pub external_url: String,
    pub coupon_code: String,
    pub swipe_hour: bool,
    pub deal_active: bool,
    pub deal_percent: Option<u8>,
}

/// The aggregate draft behind the product form.
#[derive(Debug)]
pub struct ProductDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    /// Free-text category, effective when [`OTHER_CATEGORY`] is selected.
    pub custom_category: String,
    pub brand: String,
    /// Base price in major units.
    pub price: f64,
    pub compare_at_price: Option<f64>,
    pub cost_per_item: Option<f64>,
    pub sku: String,
    /// Root stock, carried by the synthesized default variant.
    pub stock: u32,
    pub weight: Option<Weight>,
    pub options: OptionSet,
    pub overrides: OverrideMap,
    pub images: MediaBuffer,
    pub videos: MediaBuffer,
    pub mode: ListingMode,
    pub discount_percent: Option<u8>,
    pub external_url: String,
    pub coupon_code: String,
    pub swipe_hour: bool,
    edit: Option<EditContext>,
}

impl ProductDraft {
    /// Blank draft for creating a new listing.
    #[must_use]
    pub fn new(previews: Arc<dyn PreviewAllocator>) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            category: String::new(),
            custom_category: String::new(),
            brand: String::new(),
            price: 0.0,
            compare_at_price: None,
            cost_per_item: None,
            sku: String::new(),
            stock: 0,
            weight: None,
            options: OptionSet::new(),
            overrides: OverrideMap::new(),
            images: MediaBuffer::new(myswipe_core::MediaKind::Image, Arc::clone(&previews)),
            videos: MediaBuffer::new(myswipe_core::MediaKind::Video, previews),
            mode: ListingMode::Discover,
            discount_percent: None,
            external_url: String::new(),
            coupon_code: String::new(),
            swipe_hour: false,
            edit: None,
        }
    }

    /// Draft hydrated from an existing remote product (edit mode).
    #[must_use]
    pub fn edit(product: &ProductDto, previews: Arc<dyn PreviewAllocator>) -> Self {
        let mut draft = Self::new(previews);

        draft.title = product.title.clone();
        draft.description = product.description.clone().unwrap_or_default();
        draft.category = product.category.clone().unwrap_or_default();
        draft.brand = product.brand.clone().unwrap_or_default();
        draft.price = to_major(product.price_minor());
        draft.external_url = product.external_url.clone().unwrap_or_default();
        draft.coupon_code = product.coupon_code.clone().unwrap_or_default();
        draft.swipe_hour = product.is_swipe_hour;

        if product.deal_active() {
            draft.mode = ListingMode::Deal;
            draft.discount_percent = product
                .deal_percent()
                .or(Some(pricing::DEFAULT_DISCOUNT_PERCENT));
        }

        // Rebuild the matrix from the legacy size/color rows, then seed
        // overrides from the matching variant records.
        draft.options = OptionSet::from_size_color(
            product
                .variants
                .iter()
                .map(|v| (v.size.as_deref(), v.color.as_deref())),
        );
        draft.sync_matrix();
        for key in draft.options.variant_keys() {
            let matched = product.variants.iter().find(|v| {
                v.size.as_deref() == key.value_for("Size")
                    && v.color.as_deref() == key.value_for("Color")
            });
            if let Some(variant) = matched {
                let entry = draft.overrides.entry_mut(&key);
                entry.sku = variant.sku.clone();
                entry.price = variant.price_minor.map(to_major);
                entry.stock = variant.stock;
                entry.available = Some(variant.active);
            }
        }

        draft.images.hydrate_remote(
            product
                .images
                .iter()
                .map(|image| RemoteMedia {
                    url: image.url.clone(),
                    alt: image.alt_text.clone(),
                    thumbnail: None,
                })
                .collect(),
        );
        draft.videos.hydrate_remote(
            product
                .videos
                .iter()
                .map(|video| RemoteMedia {
                    url: video.url.clone(),
                    alt: None,
                    thumbnail: video.thumbnail.clone(),
                })
                .collect(),
        );

        draft.edit = Some(EditContext {
            product_id: product.id.clone(),
            title: product.title.clone(),
            description: product.description.clone().unwrap_or_default(),
            price_minor: product.price_minor(),
            category: product.category.clone().unwrap_or_default(),
            brand: product.brand.clone().unwrap_or_default(),
            external_url: product.external_url.clone().unwrap_or_default(),
            coupon_code: product.coupon_code.clone().unwrap_or_default(),
            swipe_hour: product.is_swipe_hour,
            deal_active: product.deal_active(),
            deal_percent: product.deal_percent(),
        });

        draft
    }

    /// Whether this draft edits an existing product.
    #[must_use]
    pub const fn is_edit(&self) -> bool {
        self.edit.is_some()
    }

    /// Snapshot of the original product while editing.
    #[must_use]
    pub const fn edit_context(&self) -> Option<&EditContext> {
        self.edit.as_ref()
    }

    /// Switch listing mode. Entering deal mode for the first time
    /// defaults the discount to 20%.
    pub fn set_mode(&mut self, mode: ListingMode) {
        self.mode = mode;
        if mode == ListingMode::Deal && self.discount_percent.is_none() {
            self.discount_percent = Some(pricing::DEFAULT_DISCOUNT_PERCENT);
        }
    }

    /// Displayed deal price, when derivable.
    #[must_use]
    pub fn deal_price(&self) -> Option<f64> {
        if self.mode != ListingMode::Deal {
            return None;
        }
        pricing::deal_price(self.price, self.discount_percent?)
    }

    /// Two-way binding: a direct deal-price edit re-derives the discount
    /// percent. With no derivable percent (zero/non-finite base price)
    /// the stored percent is left untouched.
    pub fn set_deal_price(&mut self, deal_price: f64) {
        if let Some(percent) = pricing::discount_from_deal_price(self.price, deal_price) {
            self.discount_percent = Some(percent);
        }
    }

    /// Reconcile overrides with the current matrix. Call after any axis
    /// or value mutation.
    pub fn sync_matrix(&mut self) {
        let keys = self.options.variant_keys();
        self.overrides.reconcile(&keys);
    }

    /// The current variant matrix.
    #[must_use]
    pub fn variant_keys(&self) -> Vec<VariantKey> {
        self.options.variant_keys()
    }

    /// Root pricing fields that unset overrides inherit.
    #[must_use]
    pub const fn root_pricing(&self) -> RootPricing {
        RootPricing {
            price: self.price,
            compare_at_price: self.compare_at_price,
            cost_per_item: self.cost_per_item,
        }
    }

    /// Category sent to the backend: the free-text entry overrides the
    /// sentinel "Other" selection.
    #[must_use]
    pub fn effective_category(&self) -> String {
        let custom = self.custom_category.trim();
        if self.category == OTHER_CATEGORY && !custom.is_empty() {
            custom.to_string()
        } else {
            self.category.clone()
        }
    }

    /// Resolved variant rows for the payload. With no axes defined, a
    /// single default variant carries the root price and stock.
    #[must_use]
    pub fn resolved_variants(&self) -> Vec<ResolvedVariant> {
        let keys = self.options.variant_keys();
        if keys.is_empty() {
            let root = self.root_pricing();
            return vec![ResolvedVariant {
                key: VariantKey::from_pairs(Vec::new()),
                price: root.price,
                compare_at_price: root.compare_at_price,
                cost_per_item: root.cost_per_item,
                sku: None,
                stock: self.stock,
                available: true,
            }];
        }
        let root = self.root_pricing();
        keys.iter()
            .map(|key| self.overrides.resolve(key, &root))
            .collect()
    }

    /// Profit per item from the root pricing.
    #[must_use]
    pub fn profit(&self) -> f64 {
        pricing::profit(self.price, self.cost_per_item.unwrap_or(0.0))
    }

    /// Margin percent from the root pricing.
    #[must_use]
    pub fn margin(&self) -> f64 {
        pricing::margin(self.price, self.cost_per_item.unwrap_or(0.0))
    }

    /// Whether the minimal gate for enabling the submit action holds.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        let deal_ok = self.mode != ListingMode::Deal
            || self.discount_percent.is_some_and(pricing::valid_discount);
        !self.title.trim().is_empty() && self.price > 0.0 && deal_ok
    }

    /// Reset to a blank create draft after a successful submit,
    /// releasing every staged preview handle.
    pub fn reset_for_create(&mut self) {
        self.title.clear();
        self.description.clear();
        self.category.clear();
        self.custom_category.clear();
        self.brand.clear();
        self.price = 0.0;
        self.compare_at_price = None;
        self.cost_per_item = None;
        self.sku.clear();
        self.stock = 0;
        self.weight = None;
        self.options = OptionSet::new();
        self.overrides = OverrideMap::new();
        self.images.clear();
        self.videos.clear();
        self.mode = ListingMode::Discover;
        self.discount_percent = None;
        self.external_url.clear();
        self.coupon_code.clear();
        self.swipe_hour = false;
        self.edit = None;
    }

    /// Discard the draft on cancel/close, releasing preview handles.
    pub fn discard(&mut self) {
        self.images.clear();
        self.videos.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::media::InMemoryPreviews;

    fn previews() -> Arc<InMemoryPreviews> {
        Arc::new(InMemoryPreviews::new())
    }

    fn blank() -> ProductDraft {
        ProductDraft::new(previews() as Arc<dyn PreviewAllocator>)
    }

    #[test]
    fn entering_deal_mode_defaults_to_twenty_percent() {
        let mut draft = blank();
        assert_eq!(draft.discount_percent, None);
        draft.set_mode(ListingMode::Deal);
        assert_eq!(draft.discount_percent, Some(20));

        // Leaving and re-entering keeps an explicit value.
        draft.discount_percent = Some(35);
        draft.set_mode(ListingMode::Discover);
        draft.set_mode(ListingMode::Deal);
        assert_eq!(draft.discount_percent, Some(35));
    }

    #[test]
    fn deal_price_round_trips_through_percent() {
        let mut draft = blank();
        draft.price = 200.0;
        draft.set_mode(ListingMode::Deal);
        draft.discount_percent = Some(25);
        assert_eq!(draft.deal_price(), Some(150.0));

        draft.set_deal_price(150.0);
        assert_eq!(draft.discount_percent, Some(25));

        draft.set_deal_price(0.0);
        assert_eq!(draft.discount_percent, Some(90));
    }

    #[test]
    fn deal_price_edit_with_zero_base_price_is_ignored() {
        let mut draft = blank();
        draft.set_mode(ListingMode::Deal);
        draft.price = 0.0;
        draft.set_deal_price(10.0);
        assert_eq!(draft.discount_percent, Some(20));
        assert_eq!(draft.deal_price(), None);
    }

    #[test]
    fn effective_category_prefers_custom_text() {
        let mut draft = blank();
        draft.category = OTHER_CATEGORY.to_string();
        draft.custom_category = "  Vintage denim  ".to_string();
        assert_eq!(draft.effective_category(), "Vintage denim");

        draft.custom_category.clear();
        assert_eq!(draft.effective_category(), OTHER_CATEGORY);

        draft.category = "Footwear".to_string();
        draft.custom_category = "ignored".to_string();
        assert_eq!(draft.effective_category(), "Footwear");
    }

    #[test]
    fn no_axes_synthesizes_default_variant_with_root_fields() {
        let mut draft = blank();
        draft.price = 120.0;
        draft.stock = 9;
        let variants = draft.resolved_variants();
        assert_eq!(variants.len(), 1);
        assert!(variants[0].key.pairs().is_empty());
        assert!((variants[0].price - 120.0).abs() < f64::EPSILON);
        assert_eq!(variants[0].stock, 9);
        assert!(variants[0].available);
    }

    #[test]
    fn can_submit_gates_on_title_price_and_deal() {
        let mut draft = blank();
        assert!(!draft.can_submit());

        draft.title = "Shirt".to_string();
        draft.price = 100.0;
        assert!(draft.can_submit());

        draft.set_mode(ListingMode::Deal);
        draft.discount_percent = Some(0);
        assert!(!draft.can_submit());
        draft.discount_percent = Some(1);
        assert!(draft.can_submit());
    }

    #[test]
    fn reset_releases_previews_and_blanks_fields() {
        use crate::form::media::StagedFile;

        let allocator = previews();
        let mut draft = ProductDraft::new(Arc::clone(&allocator) as Arc<dyn PreviewAllocator>);
        draft.title = "Shirt".to_string();
        draft.images.add_files(vec![StagedFile {
            name: "a.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![1],
        }]);
        assert_eq!(allocator.live_count(), 1);

        draft.reset_for_create();
        assert_eq!(allocator.live_count(), 0);
        assert!(draft.title.is_empty());
        assert!(draft.images.is_empty());
    }
}
