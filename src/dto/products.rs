use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{dto::required, error::AppResult, models::Product};

/// Body of `POST /products` and `PUT /products/{id}`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ProductPayload {
    #[validate(
        required(message = "Missing data for required field."),
        length(min = 1, max = 200, message = "Length must be between 1 and 200.")
    )]
    pub product_name: Option<String>,
    #[validate(
        required(message = "Missing data for required field."),
        range(min = 0.0, message = "Price must not be negative.")
    )]
    pub price: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub product_name: String,
    pub price: f64,
}

impl ProductPayload {
    pub fn into_candidate(self) -> AppResult<NewProduct> {
        Ok(NewProduct {
            product_name: required(self.product_name, "product_name")?,
            price: required(self.price, "price")?,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_price_is_rejected() {
        let p: ProductPayload =
            serde_json::from_value(serde_json::json!({ "product_name": "Mug", "price": -1.5 }))
                .unwrap();

        assert!(p.validate().unwrap_err().field_errors().contains_key("price"));
    }

    #[test]
    fn non_numeric_price_does_not_deserialize() {
        let parsed = serde_json::from_value::<ProductPayload>(
            serde_json::json!({ "product_name": "Mug", "price": "cheap" }),
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn free_product_is_allowed() {
        let p: ProductPayload =
            serde_json::from_value(serde_json::json!({ "product_name": "Sticker", "price": 0 }))
                .unwrap();

        assert!(p.validate().is_ok());
        assert_eq!(p.into_candidate().unwrap().price, 0.0);
    }
}
