//! Option axes and the derived variant matrix.
//!
//! Sellers describe up to three option axes (e.g., Size, Color) with
//! ordered candidate values; the sellable variants are the cartesian
//! product of those values. Per-variant overrides live in an
//! [`OverrideMap`] keyed by [`VariantKey`] and survive axis edits for
//! every key that remains producible.

use std::collections::HashMap;

use uuid::Uuid;

/// Maximum number of option axes per product.
pub const MAX_AXES: usize = 3;

/// Stock level below which a variant is flagged as low.
pub const LOW_STOCK_THRESHOLD: u32 = 3;

/// Axis name suggestions offered by the editor.
pub const SUGGESTED_AXIS_NAMES: &[&str] = &["Size", "Color", "Material", "Style"];

/// Identifier of one option axis within a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AxisId(Uuid);

impl AxisId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// One named option dimension with its ordered candidate values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionAxis {
    pub id: AxisId,
    pub name: String,
    pub values: Vec<String>,
}

impl OptionAxis {
    fn empty() -> Self {
        Self {
            id: AxisId::new(),
            name: String::new(),
            values: Vec::new(),
        }
    }

    /// An axis only contributes to the matrix once it is named and has at
    /// least one value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.values.is_empty()
    }
}

/// The ordered set of option axes on a draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSet {
    axes: Vec<OptionAxis>,
}

impl OptionSet {
    #[must_use]
    pub const fn new() -> Self {
        Self { axes: Vec::new() }
    }

    /// Rebuild axes from existing variant rows (edit-mode hydration).
    ///
    /// Legacy variants carry flat size/color fields; distinct values are
    /// collected in row order into a Size and a Color axis.
    #[must_use]
    pub fn from_size_color<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (Option<&'a str>, Option<&'a str>)>,
    {
        let mut sizes: Vec<String> = Vec::new();
        let mut colors: Vec<String> = Vec::new();
        for (size, color) in rows {
            if let Some(size) = size.filter(|s| !s.is_empty())
                && !sizes.iter().any(|s| s == size)
            {
                sizes.push(size.to_string());
            }
            if let Some(color) = color.filter(|c| !c.is_empty())
                && !colors.iter().any(|c| c == color)
            {
                colors.push(color.to_string());
            }
        }

        let mut set = Self::new();
        if !sizes.is_empty() {
            set.axes.push(OptionAxis {
                id: AxisId::new(),
                name: "Size".to_string(),
                values: sizes,
            });
        }
        if !colors.is_empty() {
            set.axes.push(OptionAxis {
                id: AxisId::new(),
                name: "Color".to_string(),
                values: colors,
            });
        }
        set
    }

    #[must_use]
    pub fn axes(&self) -> &[OptionAxis] {
        &self.axes
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    /// Append an empty axis and return its id (for focusing the name
    /// input). Returns `None` once the axis limit is reached.
    pub fn add_axis(&mut self) -> Option<AxisId> {
        if self.axes.len() >= MAX_AXES {
            return None;
        }
        let axis = OptionAxis::empty();
        let id = axis.id;
        self.axes.push(axis);
        Some(id)
    }

    /// Delete an axis and all its values.
    pub fn remove_axis(&mut self, id: AxisId) {
        self.axes.retain(|a| a.id != id);
    }

    pub fn set_axis_name(&mut self, id: AxisId, name: impl Into<String>) {
        if let Some(axis) = self.axis_mut(id) {
            axis.name = name.into();
        }
    }

    pub fn add_value(&mut self, id: AxisId, value: impl Into<String>) {
        if let Some(axis) = self.axis_mut(id) {
            axis.values.push(value.into());
        }
    }

    /// Replace one value in place; no-op when the index is out of range.
    pub fn set_value(&mut self, id: AxisId, index: usize, value: impl Into<String>) {
        if let Some(axis) = self.axis_mut(id)
            && let Some(slot) = axis.values.get_mut(index)
        {
            *slot = value.into();
        }
    }

    /// Remove one value; no-op when the index is out of range.
    pub fn remove_value(&mut self, id: AxisId, index: usize) {
        if let Some(axis) = self.axis_mut(id)
            && index < axis.values.len()
        {
            axis.values.remove(index);
        }
    }

    /// Move one value to a new position; no-op when either index is out
    /// of range or they are equal.
    pub fn reorder_value(&mut self, id: AxisId, from: usize, to: usize) {
        if let Some(axis) = self.axis_mut(id)
            && from != to
            && from < axis.values.len()
            && to < axis.values.len()
        {
            let value = axis.values.remove(from);
            axis.values.insert(to, value);
        }
    }

    /// Derive the variant matrix: the cartesian product of axis values.
    ///
    /// Returns the empty set when there are no axes, or when any axis has
    /// an empty name or zero values. Order is axis order crossed with
    /// value order, never sorted.
    #[must_use]
    pub fn variant_keys(&self) -> Vec<VariantKey> {
        if self.axes.is_empty() || self.axes.iter().any(|a| !a.is_complete()) {
            return Vec::new();
        }

        let mut combos: Vec<Vec<(String, String)>> = vec![Vec::new()];
        for axis in &self.axes {
            let mut next = Vec::with_capacity(combos.len() * axis.values.len());
            for prefix in &combos {
                for value in &axis.values {
                    let mut pairs = prefix.clone();
                    pairs.push((axis.name.clone(), value.clone()));
                    next.push(pairs);
                }
            }
            combos = next;
        }

        combos.into_iter().map(VariantKey).collect()
    }

    fn axis_mut(&mut self, id: AxisId) -> Option<&mut OptionAxis> {
        self.axes.iter_mut().find(|a| a.id == id)
    }
}

/// One concrete combination of axis values identifying a sellable row.
///
/// Keys are the ordered (axis, value) pairs, so a key stays equal to
/// itself across unrelated axis edits and override state can follow it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariantKey(Vec<(String, String)>);

impl VariantKey {
    /// Build a key directly from (axis, value) pairs.
    #[must_use]
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }

    /// The selected value for an axis, if the axis participates.
    #[must_use]
    pub fn value_for(&self, axis: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(name, _)| name == axis)
            .map(|(_, value)| value.as_str())
    }

    /// Human-readable label, e.g. `M / Red`.
    #[must_use]
    pub fn label(&self) -> String {
        self.0
            .iter()
            .map(|(_, value)| value.as_str())
            .collect::<Vec<_>>()
            .join(" / ")
    }

    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }
}

/// Per-variant field overrides.
///
/// `None` means "inherit from the root pricing"; a set value is sticky
/// and no longer follows root edits.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariantOverride {
    pub price: Option<f64>,
    pub compare_at_price: Option<f64>,
    pub cost_per_item: Option<f64>,
    pub sku: Option<String>,
    pub stock: Option<u32>,
    pub available: Option<bool>,
}

/// Root pricing fields that unset override fields inherit from.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RootPricing {
    pub price: f64,
    pub compare_at_price: Option<f64>,
    pub cost_per_item: Option<f64>,
}

/// A variant row with inheritance resolved against the root pricing.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedVariant {
    pub key: VariantKey,
    pub price: f64,
    pub compare_at_price: Option<f64>,
    pub cost_per_item: Option<f64>,
    pub sku: Option<String>,
    pub stock: u32,
    pub available: bool,
}

/// Override storage for the variant matrix.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverrideMap {
    entries: HashMap<VariantKey, VariantOverride>,
}

impl OverrideMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile stored overrides with the current matrix: keep entries
    /// whose key is still producible, initialize missing keys to empty,
    /// drop the rest.
    pub fn reconcile(&mut self, keys: &[VariantKey]) {
        let mut next = HashMap::with_capacity(keys.len());
        for key in keys {
            let entry = self.entries.remove(key).unwrap_or_default();
            next.insert(key.clone(), entry);
        }
        self.entries = next;
    }

    #[must_use]
    pub fn get(&self, key: &VariantKey) -> Option<&VariantOverride> {
        self.entries.get(key)
    }

    /// Mutable access for direct edits; creates the entry when missing.
    pub fn entry_mut(&mut self, key: &VariantKey) -> &mut VariantOverride {
        self.entries.entry(key.clone()).or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a variant row, filling unset fields from the root pricing.
    #[must_use]
    pub fn resolve(&self, key: &VariantKey, root: &RootPricing) -> ResolvedVariant {
        let entry = self.entries.get(key).cloned().unwrap_or_default();
        ResolvedVariant {
            key: key.clone(),
            price: entry.price.unwrap_or(root.price),
            compare_at_price: entry.compare_at_price.or(root.compare_at_price),
            cost_per_item: entry.cost_per_item.or(root.cost_per_item),
            sku: entry.sku,
            stock: entry.stock.unwrap_or(0),
            available: entry.available.unwrap_or(true),
        }
    }

    /// Whether a variant should carry the low-stock indicator.
    #[must_use]
    pub fn is_low_stock(&self, key: &VariantKey) -> bool {
        let entry = self.entries.get(key).cloned().unwrap_or_default();
        entry.available.unwrap_or(true) && entry.stock.unwrap_or(0) < LOW_STOCK_THRESHOLD
    }

    /// Whether any variant in the matrix is low on stock.
    #[must_use]
    pub fn any_low_stock(&self, keys: &[VariantKey]) -> bool {
        keys.iter().any(|key| self.is_low_stock(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_with(axes: &[(&str, &[&str])]) -> OptionSet {
        let mut set = OptionSet::new();
        for (name, values) in axes {
            let id = set.add_axis().expect("axis limit");
            set.set_axis_name(id, *name);
            for value in *values {
                set.add_value(id, *value);
            }
        }
        set
    }

    fn key_of(pairs: &[(&str, &str)]) -> VariantKey {
        VariantKey::from_pairs(
            pairs
                .iter()
                .map(|(a, v)| ((*a).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    #[test]
    fn cartesian_product_is_complete_and_ordered() {
        let set = set_with(&[("Size", &["a1", "a2"]), ("Fit", &["b1"])]);
        let keys = set.variant_keys();
        assert_eq!(
            keys,
            vec![
                key_of(&[("Size", "a1"), ("Fit", "b1")]),
                key_of(&[("Size", "a2"), ("Fit", "b1")]),
            ]
        );
    }

    #[test]
    fn value_order_is_axis_order_not_sorted() {
        let set = set_with(&[("Size", &["M", "L", "S"])]);
        let labels: Vec<String> = set.variant_keys().iter().map(VariantKey::label).collect();
        assert_eq!(labels, vec!["M", "L", "S"]);
    }

    #[test]
    fn axis_with_no_values_empties_the_matrix() {
        let mut set = set_with(&[("Size", &["S", "M"])]);
        let id = set.add_axis().expect("axis limit");
        set.set_axis_name(id, "Color");
        assert!(set.variant_keys().is_empty());
    }

    #[test]
    fn unnamed_axis_empties_the_matrix() {
        let mut set = set_with(&[("Size", &["S", "M"])]);
        let id = set.add_axis().expect("axis limit");
        set.add_value(id, "Red");
        assert!(set.variant_keys().is_empty());
    }

    #[test]
    fn no_axes_means_no_keys() {
        assert!(OptionSet::new().variant_keys().is_empty());
    }

    #[test]
    fn axis_limit_is_enforced() {
        let mut set = set_with(&[("A", &["1"]), ("B", &["1"]), ("C", &["1"])]);
        assert!(set.add_axis().is_none());
        assert_eq!(set.axes().len(), MAX_AXES);
    }

    #[test]
    fn reorder_value_moves_and_ignores_out_of_range() {
        let mut set = set_with(&[("Size", &["S", "M", "L"])]);
        let id = set.axes()[0].id;

        set.reorder_value(id, 0, 2);
        assert_eq!(set.axes()[0].values, vec!["M", "L", "S"]);

        set.reorder_value(id, 1, 1);
        set.reorder_value(id, 5, 0);
        set.reorder_value(id, 0, 5);
        assert_eq!(set.axes()[0].values, vec!["M", "L", "S"]);
    }

    #[test]
    fn removing_axis_drops_its_keys() {
        let mut set = set_with(&[("Size", &["S"]), ("Color", &["Red", "Blue"])]);
        let color_id = set.axes()[1].id;
        set.remove_axis(color_id);
        let keys = set.variant_keys();
        assert_eq!(keys, vec![key_of(&[("Size", "S")])]);
    }

    #[test]
    fn reconcile_keeps_surviving_overrides_and_drops_stale() {
        let mut set = set_with(&[("Size", &["S", "M"])]);
        let mut overrides = OverrideMap::new();
        overrides.reconcile(&set.variant_keys());
        overrides.entry_mut(&key_of(&[("Size", "S")])).sku = Some("SKU-S".to_string());

        // Add a value: S's override survives, the new key starts empty.
        let id = set.axes()[0].id;
        set.add_value(id, "L");
        overrides.reconcile(&set.variant_keys());
        assert_eq!(overrides.len(), 3);
        assert_eq!(
            overrides
                .get(&key_of(&[("Size", "S")]))
                .and_then(|o| o.sku.as_deref()),
            Some("SKU-S")
        );

        // Remove M: its entry is pruned.
        set.remove_value(id, 1);
        overrides.reconcile(&set.variant_keys());
        assert_eq!(overrides.len(), 2);
        assert!(overrides.get(&key_of(&[("Size", "M")])).is_none());
    }

    #[test]
    fn override_inherits_current_root_until_edited() {
        let set = set_with(&[("Size", &["S"])]);
        let keys = set.variant_keys();
        let mut overrides = OverrideMap::new();
        overrides.reconcile(&keys);

        let mut root = RootPricing {
            price: 100.0,
            compare_at_price: None,
            cost_per_item: None,
        };
        let resolved = overrides.resolve(&keys[0], &root);
        assert!((resolved.price - 100.0).abs() < f64::EPSILON);

        // Explicit edit becomes sticky.
        overrides.entry_mut(&keys[0]).price = Some(80.0);
        root.price = 120.0;
        let resolved = overrides.resolve(&keys[0], &root);
        assert!((resolved.price - 80.0).abs() < f64::EPSILON);

        // Unedited fields keep following the root.
        root.cost_per_item = Some(40.0);
        let resolved = overrides.resolve(&keys[0], &root);
        assert_eq!(resolved.cost_per_item, Some(40.0));
    }

    #[test]
    fn low_stock_flag_respects_availability() {
        let set = set_with(&[("Size", &["S", "M"])]);
        let keys = set.variant_keys();
        let mut overrides = OverrideMap::new();
        overrides.reconcile(&keys);

        // Fresh variants default to stock 0, available: low.
        assert!(overrides.is_low_stock(&keys[0]));

        overrides.entry_mut(&keys[0]).stock = Some(3);
        assert!(!overrides.is_low_stock(&keys[0]));

        // Unavailable variants are never flagged.
        let entry = overrides.entry_mut(&keys[1]);
        entry.stock = Some(0);
        entry.available = Some(false);
        assert!(!overrides.is_low_stock(&keys[1]));

        assert!(!overrides.any_low_stock(&keys));
    }

    #[test]
    fn hydrates_axes_from_size_color_rows() {
        let rows = vec![
            (Some("S"), Some("Red")),
            (Some("M"), Some("Red")),
            (Some("S"), Some("Blue")),
        ];
        let set = OptionSet::from_size_color(rows);
        assert_eq!(set.axes().len(), 2);
        assert_eq!(set.axes()[0].name, "Size");
        assert_eq!(set.axes()[0].values, vec!["S", "M"]);
        assert_eq!(set.axes()[1].name, "Color");
        assert_eq!(set.axes()[1].values, vec!["Red", "Blue"]);
    }
}
