use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::replace;
use crate::utils::validation::not_blank;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub brand: String,
    /// Stock Keeping Unit (a.k.a. bar code)
    pub sku: String,
    pub available: bool,
    pub price: f64,
    pub category_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A product joined with the name of its category, as listed by the catalog.
#[derive(Debug, Clone, FromRow)]
pub struct ProductRow {
    #[sqlx(flatten)]
    pub product: Product,
    pub category_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewProduct {
    #[validate(
        length(min = 2, message = "The name must be at least 2 characters long."),
        custom(function = "not_blank")
    )]
    pub name: String,
    pub description: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub brand: String,
    #[validate(custom(function = "not_blank"))]
    pub sku: String,
    #[serde(default)]
    pub available: bool,
    #[validate(range(min = 0.0, message = "The price cannot be negative."))]
    pub price: f64,
    pub category_id: Option<i64>,
}

/// Field changes for an existing product. `None` leaves a field untouched;
/// the nested options clear nullable columns with `Some(None)`.
#[derive(Debug, Clone, Default, Validate)]
pub struct ProductChanges {
    #[validate(
        length(min = 2, message = "The name must be at least 2 characters long."),
        custom(function = "not_blank")
    )]
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    #[validate(custom(function = "not_blank"))]
    pub brand: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub sku: Option<String>,
    pub available: Option<bool>,
    #[validate(range(min = 0.0, message = "The price cannot be negative."))]
    pub price: Option<f64>,
    pub category_id: Option<Option<i64>>,
}

impl Product {
    /// Applies `changes` and refreshes `updated_at` when a tracked field
    /// actually changed. Returns whether anything changed.
    pub fn apply_changes(&mut self, changes: ProductChanges, now: DateTime<Utc>) -> bool {
        let mut changed = false;

        if let Some(name) = changes.name {
            changed |= replace(&mut self.name, name);
        }
        if let Some(description) = changes.description {
            changed |= replace(&mut self.description, description);
        }
        if let Some(brand) = changes.brand {
            changed |= replace(&mut self.brand, brand);
        }
        if let Some(sku) = changes.sku {
            changed |= replace(&mut self.sku, sku);
        }
        if let Some(available) = changes.available {
            changed |= replace(&mut self.available, available);
        }
        if let Some(price) = changes.price {
            changed |= replace(&mut self.price, price);
        }
        if let Some(category_id) = changes.category_id {
            changed |= replace(&mut self.category_id, category_id);
        }

        if changed {
            self.updated_at = now;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn product() -> Product {
        let created = Utc::now() - Duration::days(3);
        Product {
            id: 1,
            name: "Trail Shoe".into(),
            description: None,
            brand: "Acme".into(),
            sku: "SKU-001".into(),
            available: false,
            price: 89.9,
            category_id: Some(2),
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn tracked_change_refreshes_updated_at_only() {
        let mut p = product();
        let created = p.created_at;
        let now = Utc::now();

        let changed = p.apply_changes(
            ProductChanges {
                available: Some(true),
                ..Default::default()
            },
            now,
        );

        assert!(changed);
        assert!(p.available);
        assert_eq!(p.updated_at, now);
        assert_eq!(p.created_at, created);
    }

    #[test]
    fn identical_values_do_not_touch_timestamps() {
        let mut p = product();
        let before = p.updated_at;

        let changed = p.apply_changes(
            ProductChanges {
                name: Some("Trail Shoe".into()),
                price: Some(89.9),
                category_id: Some(Some(2)),
                ..Default::default()
            },
            Utc::now(),
        );

        assert!(!changed);
        assert_eq!(p.updated_at, before);
    }

    #[test]
    fn clearing_category_counts_as_change() {
        let mut p = product();
        let now = Utc::now();
        assert!(p.apply_changes(
            ProductChanges {
                category_id: Some(None),
                ..Default::default()
            },
            now,
        ));
        assert_eq!(p.category_id, None);
        assert_eq!(p.updated_at, now);
    }

    #[test]
    fn short_name_is_rejected() {
        let new = NewProduct {
            name: "X".into(),
            description: None,
            brand: "Acme".into(),
            sku: "SKU-9".into(),
            available: false,
            price: 10.0,
            category_id: None,
        };
        let errors = new.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn blank_brand_and_negative_price_are_rejected() {
        let new = NewProduct {
            name: "Runner".into(),
            description: None,
            brand: "   ".into(),
            sku: "SKU-9".into(),
            available: true,
            price: -1.0,
            category_id: None,
        };
        let errors = new.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("brand"));
        assert!(fields.contains_key("price"));
    }
}
