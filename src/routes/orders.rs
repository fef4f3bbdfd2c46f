use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
};

use crate::{
    dto::orders::{OrderList, OrderPayload, OrderProductLink, OrderProductList},
    error::AppResult,
    middleware::validated_json::ValidatedJson,
    models::Order,
    response::ApiResponse,
    routes::{Access, gate},
    services::order_service,
    state::AppState,
};

pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", gate(Access::Public, post(create_order), state))
        .route(
            "/{order_id}/add_product/{product_id}",
            gate(Access::Public, get(add_product), state),
        )
        .route(
            "/{order_id}/remove_product/{product_id}",
            gate(Access::Public, delete(remove_product), state),
        )
        .route(
            "/user/{user_id}",
            gate(Access::Public, get(orders_for_user), state),
        )
        .route(
            "/{order_id}/products",
            gate(Access::Public, get(products_for_order), state),
        )
}

#[utoipa::path(
    post,
    path = "/orders",
    request_body = OrderPayload,
    responses(
        (status = 201, description = "Order created", body = ApiResponse<Order>),
        (status = 400, description = "Missing user_id, invalid user id or validation failed")
    ),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<OrderPayload>,
) -> AppResult<(StatusCode, Json<ApiResponse<Order>>)> {
    let resp = order_service::create_order(&state, payload.into_candidate()?).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/orders/{order_id}/add_product/{product_id}",
    params(
        ("order_id" = i32, Path, description = "Order ID"),
        ("product_id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product added to order", body = ApiResponse<OrderProductLink>),
        (status = 400, description = "Invalid order id, invalid product id or duplicate product")
    ),
    tag = "Orders"
)]
pub async fn add_product(
    State(state): State<AppState>,
    Path((order_id, product_id)): Path<(i32, i32)>,
) -> AppResult<Json<ApiResponse<OrderProductLink>>> {
    let resp = order_service::add_product(&state, order_id, product_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/orders/{order_id}/remove_product/{product_id}",
    params(
        ("order_id" = i32, Path, description = "Order ID"),
        ("product_id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product removed from order", body = ApiResponse<OrderProductLink>),
        (status = 400, description = "Invalid order id or invalid product id")
    ),
    tag = "Orders"
)]
pub async fn remove_product(
    State(state): State<AppState>,
    Path((order_id, product_id)): Path<(i32, i32)>,
) -> AppResult<Json<ApiResponse<OrderProductLink>>> {
    let resp = order_service::remove_product(&state, order_id, product_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/orders/user/{user_id}",
    params(
        ("user_id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Orders placed by the user", body = ApiResponse<OrderList>)
    ),
    tag = "Orders"
)]
pub async fn orders_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = order_service::list_orders_for_user(&state, user_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/orders/{order_id}/products",
    params(
        ("order_id" = i32, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Products in the order", body = ApiResponse<OrderProductList>),
        (status = 400, description = "Invalid order id")
    ),
    tag = "Orders"
)]
pub async fn products_for_order(
    State(state): State<AppState>,
    Path(order_id): Path<i32>,
) -> AppResult<Json<ApiResponse<OrderProductList>>> {
    let resp = order_service::list_products_for_order(&state, order_id).await?;
    Ok(Json(resp))
}
