//! The shopping item record and its creation-path validation.

use serde::{Deserialize, Serialize};

/// Categories offered by the presentation layer. The store itself accepts
/// any category text.
pub const KNOWN_CATEGORIES: [&str; 3] = ["Food", "Electronic", "Book"];

/// A persisted shopping-list entry. The `id` is assigned by the store on
/// first insert and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub id: u64,
    pub name: String,
    pub description: String,
    /// Whole units of the base currency (HUF), no minor units.
    pub estimated_price: u32,
    pub category: String,
    pub is_bought: bool,
}

/// A validated item draft, ready for insertion. Only the store can turn it
/// into a [`ShoppingItem`] by assigning an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub description: String,
    pub estimated_price: u32,
    pub category: String,
    pub is_bought: bool,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("item name must not be empty")]
    EmptyName,
    #[error("item description must not be empty")]
    EmptyDescription,
    #[error("estimated price must be a non-negative whole number, got '{0}'")]
    InvalidPrice(String),
}

impl NewItem {
    /// Validates raw user input into an insertable draft.
    ///
    /// Name and description must be non-blank; the price text must parse as
    /// a non-negative integer. Input is stored as given, only the checks are
    /// performed on trimmed text.
    pub fn parse(
        name: &str,
        description: &str,
        price: &str,
        category: &str,
        is_bought: bool,
    ) -> Result<Self, ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if description.trim().is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        let estimated_price: u32 = price
            .trim()
            .parse()
            .map_err(|_| ValidationError::InvalidPrice(price.to_string()))?;

        Ok(NewItem {
            name: name.to_string(),
            description: description.to_string(),
            estimated_price,
            category: category.to_string(),
            is_bought,
        })
    }

    pub fn into_item(self, id: u64) -> ShoppingItem {
        ShoppingItem {
            id,
            name: self.name,
            description: self.description,
            estimated_price: self.estimated_price,
            category: self.category,
            is_bought: self.is_bought,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_item() {
        let draft = NewItem::parse("Milk", "1L", "500", "Food", false).unwrap();

        assert_eq!(draft.name, "Milk");
        assert_eq!(draft.description, "1L");
        assert_eq!(draft.estimated_price, 500);
        assert_eq!(draft.category, "Food");
        assert!(!draft.is_bought);
    }

    #[test]
    fn test_parse_rejects_blank_name() {
        let err = NewItem::parse("   ", "1L", "500", "Food", false).unwrap_err();
        assert_eq!(err, ValidationError::EmptyName);
    }

    #[test]
    fn test_parse_rejects_blank_description() {
        let err = NewItem::parse("Milk", "", "500", "Food", false).unwrap_err();
        assert_eq!(err, ValidationError::EmptyDescription);
    }

    #[test]
    fn test_parse_rejects_non_numeric_price() {
        let err = NewItem::parse("Milk", "1L", "cheap", "Food", false).unwrap_err();
        assert_eq!(err, ValidationError::InvalidPrice("cheap".to_string()));
    }

    #[test]
    fn test_parse_rejects_negative_price() {
        let err = NewItem::parse("Milk", "1L", "-500", "Food", false).unwrap_err();
        assert_eq!(err, ValidationError::InvalidPrice("-500".to_string()));
    }

    #[test]
    fn test_into_item_assigns_id() {
        let draft = NewItem::parse("Milk", "1L", "500", "Food", true).unwrap();
        let item = draft.into_item(7);

        assert_eq!(item.id, 7);
        assert_eq!(item.name, "Milk");
        assert!(item.is_bought);
    }
}
