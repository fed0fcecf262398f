//! Filter language for the shared list.
//!
//! A query is a run of `label:value;` fragments:
//!
//! ```text
//! price:10..20;checked:false;name:^mil;
//! ```
//!
//! Supported labels are `price` (inclusive range), `checked` (`true` or
//! `false`) and `name` (regular expression). Fragments that do not parse are
//! skipped. When none of the labels appear, the whole input is used as a name
//! regex, so typing `milk` just works.

use regex::Regex;

use super::item::{list_order, ShopListItem};

const PRICE_LABEL: &str = "price:";
const CHECKED_LABEL: &str = "checked:";
const NAME_LABEL: &str = "name:";

/// One recognised condition on an item.
#[derive(Debug, Clone)]
pub enum ItemFilter {
    PriceRange { low: f64, high: f64 },
    CheckedEquals(bool),
    NameMatches(Regex),
}

impl ItemFilter {
    pub fn matches(&self, item: &ShopListItem) -> bool {
        match self {
            ItemFilter::PriceRange { low, high } => item
                .price
                .map(|p| *low <= p && p <= *high)
                .unwrap_or(false),
            ItemFilter::CheckedEquals(expected) => item.checked == Some(*expected),
            ItemFilter::NameMatches(re) => item
                .name
                .as_deref()
                .map(|n| re.is_match(n))
                .unwrap_or(false),
        }
    }
}

impl PartialEq for ItemFilter {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                ItemFilter::PriceRange { low: l1, high: h1 },
                ItemFilter::PriceRange { low: l2, high: h2 },
            ) => l1 == l2 && h1 == h2,
            (ItemFilter::CheckedEquals(a), ItemFilter::CheckedEquals(b)) => a == b,
            (ItemFilter::NameMatches(a), ItemFilter::NameMatches(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

/// Compiled query: the conjunction of its filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    filters: Vec<ItemFilter>,
}

impl ListQuery {
    /// Query that matches every item.
    pub fn all() -> Self {
        Self::default()
    }

    /// Parses the filter language. Never fails; unusable fragments are dropped.
    pub fn parse(input: &str) -> Self {
        if input.trim().is_empty() {
            return Self::all();
        }

        let labelled = [PRICE_LABEL, CHECKED_LABEL, NAME_LABEL]
            .iter()
            .any(|label| input.contains(label));

        if !labelled {
            let filters = Regex::new(input.trim())
                .map(|re| vec![ItemFilter::NameMatches(re)])
                .unwrap_or_default();
            return Self { filters };
        }

        let mut filters = Vec::new();
        if let Some(filter) = fragment(input, PRICE_LABEL).and_then(parse_price) {
            filters.push(filter);
        }
        if let Some(filter) = fragment(input, CHECKED_LABEL).and_then(parse_checked) {
            filters.push(filter);
        }
        if let Some(filter) = fragment(input, NAME_LABEL).and_then(parse_name) {
            filters.push(filter);
        }
        Self { filters }
    }

    pub fn filters(&self) -> &[ItemFilter] {
        &self.filters
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn matches(&self, item: &ShopListItem) -> bool {
        self.filters.iter().all(|f| f.matches(item))
    }

    /// Filters and orders items the way the list is shown.
    pub fn evaluate(&self, items: impl IntoIterator<Item = ShopListItem>) -> Vec<ShopListItem> {
        let mut selected: Vec<ShopListItem> =
            items.into_iter().filter(|i| self.matches(i)).collect();
        selected.sort_by(list_order);
        selected
    }
}

/// Value between the first occurrence of `label` and the next `;`.
fn fragment<'a>(input: &'a str, label: &str) -> Option<&'a str> {
    let start = input.find(label)? + label.len();
    let rest = &input[start..];
    let end = rest.find(';')?;
    Some(&rest[..end])
}

fn parse_price(value: &str) -> Option<ItemFilter> {
    let (low, high) = value.split_once("..")?;
    if high.contains("..") {
        return None;
    }
    let low: f64 = low.trim().parse().ok()?;
    let high: f64 = high.trim().parse().ok()?;
    if !low.is_finite() || !high.is_finite() {
        return None;
    }
    Some(ItemFilter::PriceRange { low, high })
}

fn parse_checked(value: &str) -> Option<ItemFilter> {
    match value {
        "true" => Some(ItemFilter::CheckedEquals(true)),
        "false" => Some(ItemFilter::CheckedEquals(false)),
        _ => None,
    }
}

fn parse_name(value: &str) -> Option<ItemFilter> {
    if value.trim().is_empty() {
        return None;
    }
    Regex::new(value).ok().map(ItemFilter::NameMatches)
}
