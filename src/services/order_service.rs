use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set, SqlErr,
    TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;

use crate::{
    dto::orders::{NewOrder, OrderList, OrderProductLink, OrderProductList},
    entity::{
        order_product::{ActiveModel as LinkActive, Column as LinkCol, Entity as OrderProduct},
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders},
        products::{Column as ProdCol, Entity as Products},
        users::Entity as Users,
    },
    error::{AppError, AppResult, is_unique_violation},
    models::{Order, Product},
    response::{ApiResponse, Meta},
    state::AppState,
};

fn invalid_user() -> AppError {
    AppError::NotFound("Invalid user id".into())
}

fn invalid_order() -> AppError {
    AppError::NotFound("Invalid order id".into())
}

fn invalid_product() -> AppError {
    AppError::NotFound("Invalid product id".into())
}

pub async fn create_order(state: &AppState, payload: NewOrder) -> AppResult<ApiResponse<Order>> {
    let txn = state.orm.begin().await?;

    if Users::find_by_id(payload.user_id).one(&txn).await?.is_none() {
        return Err(invalid_user());
    }

    let order_date = payload.order_date.unwrap_or_else(Utc::now);
    let order = OrderActive {
        id: NotSet,
        order_date: Set(order_date.into()),
        user_id: Set(payload.user_id),
    }
    .insert(&txn)
    .await;

    // The user may have been deleted between the lookup and the insert.
    let order = match order {
        Ok(order) => order,
        Err(err) if matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_))) => {
            return Err(invalid_user());
        }
        Err(err) => return Err(err.into()),
    };
    txn.commit().await?;

    tracing::info!(order_id = order.id, user_id = order.user_id, "order created");
    Ok(ApiResponse::success(
        "Order created",
        Order::from(order),
        Some(Meta::empty()),
    ))
}

/// Link a product to an order. A second link of the same pair is a conflict.
pub async fn add_product(
    state: &AppState,
    order_id: i32,
    product_id: i32,
) -> AppResult<ApiResponse<OrderProductLink>> {
    let txn = state.orm.begin().await?;

    let order = Orders::find_by_id(order_id)
        .one(&txn)
        .await?
        .ok_or_else(invalid_order)?;
    let product = Products::find_by_id(product_id)
        .one(&txn)
        .await?
        .ok_or_else(invalid_product)?;

    let inserted = LinkActive {
        order_id: Set(order.id),
        product_id: Set(product.id),
    }
    .insert(&txn)
    .await;

    match inserted {
        Ok(_) => {}
        Err(err) if is_unique_violation(&err) => {
            return Err(AppError::Conflict(format!(
                "Duplicate product {} for order {}",
                product.product_name, order.id
            )));
        }
        Err(err) => return Err(err.into()),
    }
    txn.commit().await?;

    tracing::info!(order_id = order.id, product_id = product.id, "product added to order");
    Ok(ApiResponse::success(
        format!("{} added to order {}!", product.product_name, order.id),
        OrderProductLink {
            order_id: order.id,
            product_id: product.id,
        },
        Some(Meta::empty()),
    ))
}

/// Unlink a product from an order. Unlinking a pair that was never linked succeeds.
pub async fn remove_product(
    state: &AppState,
    order_id: i32,
    product_id: i32,
) -> AppResult<ApiResponse<OrderProductLink>> {
    let txn = state.orm.begin().await?;

    let order = Orders::find_by_id(order_id)
        .one(&txn)
        .await?
        .ok_or_else(invalid_order)?;
    let product = Products::find_by_id(product_id)
        .one(&txn)
        .await?
        .ok_or_else(invalid_product)?;

    let result = OrderProduct::delete_many()
        .filter(LinkCol::OrderId.eq(order.id))
        .filter(LinkCol::ProductId.eq(product.id))
        .exec(&txn)
        .await?;
    txn.commit().await?;

    if result.rows_affected == 0 {
        tracing::debug!(order_id = order.id, product_id = product.id, "no link to remove");
    }

    Ok(ApiResponse::success(
        format!("{} removed from order {}!", product.product_name, order.id),
        OrderProductLink {
            order_id: order.id,
            product_id: product.id,
        },
        Some(Meta::empty()),
    ))
}

pub async fn list_orders_for_user(
    state: &AppState,
    user_id: i32,
) -> AppResult<ApiResponse<OrderList>> {
    let items = Orders::find()
        .filter(OrderCol::UserId.eq(user_id))
        .order_by_asc(OrderCol::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Order::from)
        .collect();

    Ok(ApiResponse::success("Ok", OrderList { items }, Some(Meta::empty())))
}

pub async fn list_products_for_order(
    state: &AppState,
    order_id: i32,
) -> AppResult<ApiResponse<OrderProductList>> {
    let order = Orders::find_by_id(order_id)
        .one(&state.orm)
        .await?
        .ok_or_else(invalid_order)?;

    let items = order
        .find_related(Products)
        .order_by_asc(ProdCol::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Product::from)
        .collect();

    Ok(ApiResponse::success(
        "OK",
        OrderProductList { items },
        Some(Meta::empty()),
    ))
}
