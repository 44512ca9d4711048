use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, AppResult};

/// A row of the `products` table.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    /// Stored as DECIMAL(10, 2), reported to clients as a plain number.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: i32,
    pub created_at: Option<NaiveDateTime>,
}

// ── Request payloads ─────────────────────────────────────────────────────────

/// Body of `POST /api/products`. Every field is optional here so that an
/// absent or null field is reported as a missing field rather than a
/// deserialization failure. `price` and `quantity` are kept as submitted;
/// the database converts them to their column types on insert.
#[derive(Debug, Default, Deserialize)]
pub struct CreateProduct {
    pub name: Option<String>,
    pub price: Option<Value>,
    pub quantity: Option<Value>,
}

/// A create request that passed validation and is ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: Value,
    pub quantity: Value,
}

impl CreateProduct {
    /// `name` must be non-empty; `price` and `quantity` only need to be
    /// present, so zero passes.
    pub fn validate(self) -> AppResult<NewProduct> {
        match (self.name, self.price, self.quantity) {
            (Some(name), Some(price), Some(quantity)) if !name.is_empty() => Ok(NewProduct {
                name,
                price,
                quantity,
            }),
            _ => Err(AppError::missing_fields()),
        }
    }
}

impl NewProduct {
    pub fn price_text(&self) -> String {
        sql_text(&self.price)
    }

    pub fn quantity_text(&self) -> String {
        sql_text(&self.quantity)
    }
}

/// Text handed to Postgres for casting: strings unquoted, anything else in
/// its JSON form.
fn sql_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ── Responses ────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CreatedProduct {
    pub id: i32,
    pub name: String,
    pub price: Value,
    pub quantity: Value,
    pub message: &'static str,
}

impl CreatedProduct {
    pub fn new(id: i32, product: NewProduct) -> Self {
        Self {
            id,
            name: product.name,
            price: product.price,
            quantity: product.quantity,
            message: "Product created successfully",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> CreateProduct {
        serde_json::from_value(value).unwrap()
    }

    fn assert_missing(result: AppResult<NewProduct>) {
        match result {
            Err(AppError::Validation(msg)) => assert_eq!(msg, "Missing required fields"),
            other => panic!("expected missing fields, got {other:?}"),
        }
    }

    // ── Validation ────────────────────────────────────────────────────────────

    #[test]
    fn complete_payload_validates() {
        let product = payload(json!({ "name": "Laptop", "price": 999.99, "quantity": 10 }))
            .validate()
            .unwrap();
        assert_eq!(product.name, "Laptop");
        assert_eq!(product.price_text(), "999.99");
        assert_eq!(product.quantity_text(), "10");
    }

    #[test]
    fn whitespace_name_is_present() {
        let product = payload(json!({ "name": " ", "price": 1, "quantity": 1 }))
            .validate()
            .unwrap();
        assert_eq!(product.name, " ");
    }

    #[test]
    fn missing_name_is_rejected() {
        assert_missing(payload(json!({ "price": 5, "quantity": 1 })).validate());
    }

    #[test]
    fn empty_or_null_name_is_rejected() {
        assert_missing(payload(json!({ "name": "", "price": 5, "quantity": 1 })).validate());
        assert_missing(payload(json!({ "name": null, "price": 5, "quantity": 1 })).validate());
    }

    #[test]
    fn missing_or_null_price_is_rejected() {
        assert_missing(payload(json!({ "name": "Pen", "quantity": 1 })).validate());
        assert_missing(payload(json!({ "name": "Pen", "price": null, "quantity": 1 })).validate());
    }

    #[test]
    fn missing_quantity_is_rejected() {
        assert_missing(payload(json!({ "name": "Pen", "price": 1.5 })).validate());
    }

    #[test]
    fn zero_price_and_quantity_are_present_values() {
        let product = payload(json!({ "name": "Freebie", "price": 0, "quantity": 0 }))
            .validate()
            .unwrap();
        assert_eq!(product.price, json!(0));
        assert_eq!(product.quantity, json!(0));
    }

    #[test]
    fn negative_quantity_is_accepted() {
        let product = payload(json!({ "name": "Backorder", "price": 3.25, "quantity": -4 }))
            .validate()
            .unwrap();
        assert_eq!(product.quantity_text(), "-4");
    }

    #[test]
    fn numeric_strings_are_passed_through_unquoted() {
        let product = payload(json!({ "name": "Pen", "price": "12.50", "quantity": "3" }))
            .validate()
            .unwrap();
        assert_eq!(product.price_text(), "12.50");
        assert_eq!(product.quantity_text(), "3");
    }

    #[test]
    fn non_numeric_values_are_left_for_the_database() {
        // Presence is all that is checked here; the insert rejects these.
        let product = payload(json!({ "name": "Pen", "price": "cheap", "quantity": true }))
            .validate()
            .unwrap();
        assert_eq!(product.price_text(), "cheap");
        assert_eq!(product.quantity_text(), "true");
    }

    // ── Serialization ─────────────────────────────────────────────────────────

    #[test]
    fn product_serializes_price_as_number_and_timestamp_as_iso() {
        let created_at = chrono::NaiveDate::from_ymd_opt(2024, 12, 9)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let product = Product {
            id: 1,
            name: "Laptop".to_string(),
            price: Decimal::new(99999, 2),
            quantity: 10,
            created_at: Some(created_at),
        };

        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["price"].as_f64(), Some(999.99));
        assert_eq!(value["created_at"], "2024-12-09T10:00:00");
    }

    #[test]
    fn missing_timestamp_serializes_as_null() {
        let product = Product {
            id: 2,
            name: "Mouse".to_string(),
            price: Decimal::new(2500, 2),
            quantity: 3,
            created_at: None,
        };
        let value = serde_json::to_value(&product).unwrap();
        assert!(value["created_at"].is_null());
    }

    #[test]
    fn created_product_echoes_input() {
        let new = NewProduct {
            name: "Laptop".to_string(),
            price: json!(999.99),
            quantity: json!(10),
        };
        let value = serde_json::to_value(CreatedProduct::new(7, new)).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 7,
                "name": "Laptop",
                "price": 999.99,
                "quantity": 10,
                "message": "Product created successfully",
            })
        );
    }

    #[test]
    fn created_product_echoes_submitted_representation() {
        let new = payload(json!({ "name": "Pen", "price": 5, "quantity": "2" }))
            .validate()
            .unwrap();
        let value = serde_json::to_value(CreatedProduct::new(3, new)).unwrap();
        assert_eq!(value["price"], json!(5));
        assert_eq!(value["price"].to_string(), "5");
        assert_eq!(value["quantity"], json!("2"));
    }
}
