//! Field-level validation ahead of submission.
//!
//! Validation is entirely local: a draft that fails here never produces a
//! network call. All violations are collected into one list so the form
//! can render a summary banner, and the first offender is the focus
//! target.

use myswipe_core::ListingMode;

use super::draft::ProductDraft;
use super::pricing;

/// Form fields that can carry a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Description,
    Category,
    Price,
    Sku,
    DiscountPercent,
    Images,
}

impl Field {
    /// Stable anchor id of the field's input, used for scroll/focus.
    #[must_use]
    pub const fn anchor(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Category => "category",
            Self::Price => "price",
            Self::Sku => "sku",
            Self::DiscountPercent => "discountPercent",
            Self::Images => "imagesSection",
        }
    }

    /// Human label used in the error summary.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Title => "Name",
            Self::Description => "Description",
            Self::Category => "Category",
            Self::Price => "Price",
            Self::Sku => "SKU",
            Self::DiscountPercent => "Discount %",
            Self::Images => "Product Image",
        }
    }
}

/// One validation violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    fn new(field: Field, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field.label(), self.message)
    }
}

/// Validate a draft, returning every violation in field order.
///
/// The image requirement only applies when creating: existing listings
/// keep their remote media, so an empty staging buffer is fine on edit.
#[must_use]
pub fn validate(draft: &ProductDraft) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if draft.title.trim().is_empty() {
        errors.push(FieldError::new(Field::Title, "Required"));
    }
    if draft.description.trim().is_empty() {
        errors.push(FieldError::new(Field::Description, "Required"));
    }
    if draft.effective_category().trim().is_empty() {
        errors.push(FieldError::new(Field::Category, "Required"));
    }
    if !draft.price.is_finite() || draft.price <= 0.0 {
        errors.push(FieldError::new(Field::Price, "Must be greater than 0"));
    }
    if draft.sku.trim().is_empty() {
        errors.push(FieldError::new(Field::Sku, "Required"));
    }
    if draft.mode == ListingMode::Deal {
        match draft.discount_percent {
            None => errors.push(FieldError::new(Field::DiscountPercent, "Required")),
            Some(percent) if percent < pricing::MIN_DISCOUNT_PERCENT => {
                errors.push(FieldError::new(Field::DiscountPercent, "Min 1%"));
            }
            Some(percent) if percent > pricing::MAX_DISCOUNT_PERCENT => {
                errors.push(FieldError::new(Field::DiscountPercent, "Max 90%"));
            }
            Some(_) => {}
        }
    }
    if !draft.is_edit() && draft.images.is_empty() {
        errors.push(FieldError::new(Field::Images, "Add at least one image"));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::media::{InMemoryPreviews, PreviewAllocator, StagedFile};
    use std::sync::Arc;

    fn valid_draft() -> ProductDraft {
        let previews: Arc<dyn PreviewAllocator> = Arc::new(InMemoryPreviews::new());
        let mut draft = ProductDraft::new(previews);
        draft.title = "Linen shirt".to_string();
        draft.description = "Breathable summer shirt".to_string();
        draft.category = "Tops (T-Shirts, Shirts, Blouses, Sweaters, Hoodies)".to_string();
        draft.price = 590.0;
        draft.sku = "LS-01".to_string();
        draft.images.add_files(vec![StagedFile {
            name: "front.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            bytes: vec![1, 2],
        }]);
        draft
    }

    #[test]
    fn valid_draft_passes() {
        assert!(validate(&valid_draft()).is_empty());
    }

    #[test]
    fn collects_all_violations_with_first_offender_first() {
        let previews: Arc<dyn PreviewAllocator> = Arc::new(InMemoryPreviews::new());
        let draft = ProductDraft::new(previews);
        let errors = validate(&draft);
        assert!(errors.len() >= 5);
        assert_eq!(errors[0].field, Field::Title);
        assert!(errors.iter().any(|e| e.field == Field::Images));
    }

    #[test]
    fn discount_boundaries() {
        let mut draft = valid_draft();
        draft.set_mode(ListingMode::Deal);

        draft.discount_percent = Some(0);
        assert!(validate(&draft).iter().any(|e| e.field == Field::DiscountPercent));

        draft.discount_percent = Some(91);
        assert!(validate(&draft).iter().any(|e| e.field == Field::DiscountPercent));

        draft.discount_percent = Some(1);
        assert!(validate(&draft).is_empty());

        draft.discount_percent = Some(90);
        assert!(validate(&draft).is_empty());
    }

    #[test]
    fn create_requires_images() {
        let mut draft = valid_draft();
        draft.images.clear();
        let errors = validate(&draft);
        assert!(errors.iter().any(|e| e.field == Field::Images));
        assert_eq!(
            errors
                .iter()
                .find(|e| e.field == Field::Images)
                .map(|e| e.field.anchor()),
            Some("imagesSection")
        );
    }

    #[test]
    fn custom_category_satisfies_the_category_requirement() {
        let mut draft = valid_draft();
        draft.category = super::super::draft::OTHER_CATEGORY.to_string();
        draft.custom_category = "Upcycled".to_string();
        assert!(validate(&draft).is_empty());
    }
}
