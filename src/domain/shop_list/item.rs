//! Shop list items and partial edits.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::domain::foundation::ItemId;

/// Coloured label attached to an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub hex_color: String,
    pub label: String,
}

/// One entry of a room's shared list.
///
/// Every field but the id is optional; clients send whatever they have.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopListItem {
    pub uuid: ItemId,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub checked: Option<bool>,
    pub emoji: Option<String>,
    pub tags: Option<Vec<Tag>>,
}

impl ShopListItem {
    pub fn from_new(uuid: ItemId, item: NewItem) -> Self {
        Self {
            uuid,
            name: item.name,
            price: item.price,
            checked: item.checked,
            emoji: item.emoji,
            tags: item.tags,
        }
    }

    pub fn is_checked(&self) -> bool {
        self.checked.unwrap_or(false)
    }

    pub fn name_or_empty(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn price_or_zero(&self) -> f64 {
        self.price.unwrap_or(0.0)
    }
}

/// Fixed list order: unchecked first, then by name, then most expensive first.
pub fn list_order(a: &ShopListItem, b: &ShopListItem) -> Ordering {
    a.is_checked()
        .cmp(&b.is_checked())
        .then_with(|| a.name_or_empty().cmp(b.name_or_empty()))
        .then_with(|| b.price_or_zero().total_cmp(&a.price_or_zero()))
}

/// Item fields supplied when adding to the list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub checked: Option<bool>,
    pub emoji: Option<String>,
    pub tags: Option<Vec<Tag>>,
}

/// Partial update of an item. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub checked: Option<bool>,
    pub emoji: Option<String>,
    pub tags: Option<Vec<Tag>>,
}

impl ItemPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.checked.is_none()
            && self.emoji.is_none()
            && self.tags.is_none()
    }

    pub fn apply_to(&self, item: &mut ShopListItem) {
        if let Some(name) = &self.name {
            item.name = Some(name.clone());
        }
        if let Some(price) = self.price {
            item.price = Some(price);
        }
        if let Some(checked) = self.checked {
            item.checked = Some(checked);
        }
        if let Some(emoji) = &self.emoji {
            item.emoji = Some(emoji.clone());
        }
        if let Some(tags) = &self.tags {
            item.tags = Some(tags.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: Option<&str>, price: Option<f64>, checked: Option<bool>) -> ShopListItem {
        ShopListItem {
            uuid: ItemId::new(),
            name: name.map(str::to_string),
            price,
            checked,
            emoji: None,
            tags: None,
        }
    }

    #[test]
    fn unchecked_items_sort_first() {
        let a = item(Some("zzz"), Some(1.0), Some(false));
        let b = item(Some("aaa"), Some(1.0), Some(true));
        assert_eq!(list_order(&a, &b), Ordering::Less);
    }

    #[test]
    fn same_name_sorts_by_price_descending() {
        let cheap = item(Some("milk"), Some(1.0), None);
        let dear = item(Some("milk"), Some(3.0), None);
        assert_eq!(list_order(&dear, &cheap), Ordering::Less);
    }

    #[test]
    fn missing_fields_sort_as_defaults() {
        let blank = item(None, None, None);
        let named = item(Some("a"), Some(5.0), Some(false));
        assert_eq!(list_order(&blank, &named), Ordering::Less);
    }

    #[test]
    fn patch_only_touches_provided_fields() {
        let mut target = item(Some("bread"), Some(2.0), Some(false));
        let patch = ItemPatch {
            checked: Some(true),
            ..Default::default()
        };
        patch.apply_to(&mut target);
        assert_eq!(target.name.as_deref(), Some("bread"));
        assert_eq!(target.price, Some(2.0));
        assert_eq!(target.checked, Some(true));
    }

    #[test]
    fn default_patch_is_empty() {
        assert!(ItemPatch::default().is_empty());
        let patch = ItemPatch {
            emoji: Some("🍞".into()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn tags_serialize_in_camel_case() {
        let tag = Tag {
            hex_color: "#ff0000".into(),
            label: "urgent".into(),
        };
        let json = serde_json::to_value(&tag).unwrap();
        assert_eq!(json["hexColor"], "#ff0000");
    }
}
