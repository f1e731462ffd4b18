//! Line items and their typed field updates.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Opaque identifier of a line item.
///
/// Issued by [`Document`](super::Document) from a counter that is never
/// rewound, so an id is never reused within one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw numeric value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One row of a check.
///
/// `total` is derived: it is recomputed as `quantity * price` whenever
/// either factor changes and has no setter of its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    id: ItemId,
    name: String,
    quantity: f64,
    unit: String,
    price: f64,
    total: f64,
}

impl LineItem {
    /// Default quantity of a freshly added item.
    pub const DEFAULT_QUANTITY: f64 = 1.0;
    /// Default unit of a freshly added item ("pieces").
    pub const DEFAULT_UNIT: &'static str = "pc";

    /// A blank item with default quantity and unit.
    pub(crate) fn blank(id: ItemId) -> Self {
        Self::new(id, "", Self::DEFAULT_QUANTITY, Self::DEFAULT_UNIT, 0.0)
    }

    pub(crate) fn new(
        id: ItemId,
        name: impl Into<String>,
        quantity: f64,
        unit: impl Into<String>,
        price: f64,
    ) -> Self {
        let mut item = Self {
            id,
            name: name.into(),
            quantity: finite_or_zero(quantity),
            unit: unit.into(),
            price: finite_or_zero(price),
            total: 0.0,
        };
        item.recompute();
        item
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    /// Apply a single field update.
    pub(crate) fn apply(&mut self, update: ItemUpdate) {
        match update {
            ItemUpdate::Name(name) => self.name = name,
            ItemUpdate::Unit(unit) => self.unit = unit,
            ItemUpdate::Quantity(quantity) => {
                self.quantity = finite_or_zero(quantity);
                self.recompute();
            }
            ItemUpdate::Price(price) => {
                self.price = finite_or_zero(price);
                self.recompute();
            }
        }
    }

    /// A product that overflows to infinity counts as 0.
    fn recompute(&mut self) {
        self.total = finite_or_zero(self.quantity * self.price);
    }
}

/// A typed update of one mutable line item field.
///
/// Serialized as `{"field": "quantity", "value": 2}`. Numeric values are
/// accepted either as JSON numbers or as text, and text is coerced with
/// [`coerce_number`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum ItemUpdate {
    Name(String),
    #[serde(deserialize_with = "lenient_number")]
    Quantity(f64),
    Unit(String),
    #[serde(deserialize_with = "lenient_number")]
    Price(f64),
}

impl ItemUpdate {
    /// Quantity from raw user input.
    pub fn quantity_input(input: &str) -> Self {
        Self::Quantity(coerce_number(input))
    }

    /// Price from raw user input.
    pub fn price_input(input: &str) -> Self {
        Self::Price(coerce_number(input))
    }
}

/// Coerce raw text to a finite number.
///
/// Blank input is 0, like an emptied numeric field. Anything that does not
/// parse to a finite number (including "NaN" and "inf") is also 0, so no
/// undefined value can ever reach a total.
pub fn coerce_number(input: &str) -> f64 {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().map(finite_or_zero).unwrap_or(0.0)
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberInput {
    Number(f64),
    Text(String),
    Null(()),
}

fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match NumberInput::deserialize(deserializer)? {
        NumberInput::Number(n) => finite_or_zero(n),
        NumberInput::Text(s) => coerce_number(&s),
        NumberInput::Null(()) => 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number("12"), 12.0);
        assert_eq!(coerce_number(" 2.5 "), 2.5);
        assert_eq!(coerce_number("1e3"), 1000.0);
        assert_eq!(coerce_number("-4"), -4.0);
        assert_eq!(coerce_number(""), 0.0);
        assert_eq!(coerce_number("   "), 0.0);
        assert_eq!(coerce_number("abc"), 0.0);
        assert_eq!(coerce_number("12abc"), 0.0);
        assert_eq!(coerce_number("NaN"), 0.0);
        assert_eq!(coerce_number("inf"), 0.0);
    }

    #[test]
    fn test_blank_item_defaults() {
        let item = LineItem::blank(ItemId::new(7));
        assert_eq!(item.id().get(), 7);
        assert_eq!(item.name(), "");
        assert_eq!(item.quantity(), 1.0);
        assert_eq!(item.unit(), "pc");
        assert_eq!(item.price(), 0.0);
        assert_eq!(item.total(), 0.0);
    }

    #[test]
    fn test_numeric_updates_recompute_total() {
        let mut item = LineItem::blank(ItemId::new(1));
        item.apply(ItemUpdate::Quantity(3.0));
        item.apply(ItemUpdate::Price(19.99));
        assert_eq!(item.total(), 3.0 * 19.99);

        item.apply(ItemUpdate::quantity_input("oops"));
        assert_eq!(item.quantity(), 0.0);
        assert_eq!(item.total(), 0.0);
    }

    #[test]
    fn test_text_updates_keep_total() {
        let mut item = LineItem::new(ItemId::new(1), "Sand", 2.0, "t", 300.0);
        item.apply(ItemUpdate::Name("River sand".into()));
        item.apply(ItemUpdate::Unit("m3".into()));
        assert_eq!(item.name(), "River sand");
        assert_eq!(item.unit(), "m3");
        assert_eq!(item.total(), 600.0);
    }

    #[test]
    fn test_non_finite_values_are_zeroed() {
        let mut item = LineItem::new(ItemId::new(1), "x", f64::NAN, "pc", 5.0);
        assert_eq!(item.quantity(), 0.0);
        item.apply(ItemUpdate::Price(f64::INFINITY));
        assert_eq!(item.price(), 0.0);
        assert!(item.total().is_finite());
    }

    #[test]
    fn test_overflowing_total_is_zeroed() {
        let mut item = LineItem::blank(ItemId::new(1));
        item.apply(ItemUpdate::quantity_input("1e200"));
        item.apply(ItemUpdate::price_input("1e200"));
        assert_eq!(item.quantity(), 1e200);
        assert_eq!(item.price(), 1e200);
        assert_eq!(item.total(), 0.0);
        assert_eq!(serde_json::to_value(&item).unwrap()["total"], serde_json::json!(0.0));
    }

    #[test]
    fn test_deserialize_updates() {
        let q: ItemUpdate = serde_json::from_str(r#"{"field":"quantity","value":2}"#).unwrap();
        assert_eq!(q, ItemUpdate::Quantity(2.0));

        let p: ItemUpdate = serde_json::from_str(r#"{"field":"price","value":"100"}"#).unwrap();
        assert_eq!(p, ItemUpdate::Price(100.0));

        let bad: ItemUpdate = serde_json::from_str(r#"{"field":"price","value":"ten"}"#).unwrap();
        assert_eq!(bad, ItemUpdate::Price(0.0));

        let name: ItemUpdate = serde_json::from_str(r#"{"field":"name","value":"Gravel"}"#).unwrap();
        assert_eq!(name, ItemUpdate::Name("Gravel".into()));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result: Result<ItemUpdate, _> =
            serde_json::from_str(r#"{"field":"total","value":5}"#);
        assert!(result.is_err());
    }
}
