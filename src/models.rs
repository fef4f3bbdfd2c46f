//! Public representations of the stored entities.
//!
//! Each entity has exactly one mapping from its row model, shared by single-item
//! and list responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::{orders, products, users};

/// A user as seen by API clients. The password hash never leaves the store.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: i32,
    pub public_id: Uuid,
    pub name: String,
    pub address: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i32,
    pub product_name: String,
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: i32,
    pub order_date: DateTime<Utc>,
    pub user_id: i32,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        User {
            id: model.id,
            public_id: model.public_id,
            name: model.name,
            address: model.address,
            email: model.email,
        }
    }
}

impl From<products::Model> for Product {
    fn from(model: products::Model) -> Self {
        Product {
            id: model.id,
            product_name: model.product_name,
            price: model.price,
        }
    }
}

impl From<orders::Model> for Order {
    fn from(model: orders::Model) -> Self {
        Order {
            id: model.id,
            order_date: model.order_date.with_timezone(&Utc),
            user_id: model.user_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_representation_omits_password_hash() {
        let model = users::Model {
            id: 7,
            public_id: Uuid::new_v4(),
            name: "A".into(),
            address: "X".into(),
            email: "a@x.com".into(),
            password_hash: "$argon2id$secret".into(),
        };

        let json = serde_json::to_value(User::from(model)).unwrap();
        assert_eq!(json["email"], "a@x.com");
        assert!(json.get("password_hash").is_none());
    }
}
