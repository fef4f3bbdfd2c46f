use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    dto::required,
    error::{AppError, AppResult},
    models::{Order, Product},
};

/// Body of `POST /orders`. `order_date` defaults to the time of creation.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct OrderPayload {
    #[validate(required(message = "provide a user_id"))]
    pub user_id: Option<i32>,
    pub order_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: i32,
    pub order_date: Option<DateTime<Utc>>,
}

impl OrderPayload {
    pub fn into_candidate(self) -> AppResult<NewOrder> {
        let user_id = required(self.user_id, "user_id")
            .map_err(|_| AppError::field("user_id", "provide a user_id"))?;
        Ok(NewOrder {
            user_id,
            order_date: self.order_date,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct OrderList {
    #[schema(value_type = Vec<Order>)]
    pub items: Vec<Order>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct OrderProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}

/// Identifies one order/product link in add/remove responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderProductLink {
    pub order_id: i32,
    pub product_id: i32,
}
