use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;

use crate::{
    dto::products::{NewProduct, ProductList},
    entity::{
        order_product::{Column as LinkCol, Entity as OrderProduct},
        products::{ActiveModel, Column, Entity as Products},
    },
    error::{AppError, AppResult},
    models::Product,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    services::paginate,
    state::AppState,
};

fn invalid_product() -> AppError {
    AppError::NotFound("Invalid product id".into())
}

pub async fn list_products(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<ProductList>> {
    let finder = Products::find().order_by_asc(Column::Id);

    let (models, meta) = paginate(&state.orm, finder, &pagination).await?;

    let items = models.into_iter().map(Product::from).collect();
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

pub async fn get_product(state: &AppState, id: i32) -> AppResult<ApiResponse<Product>> {
    let result = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(Product::from);
    let result = match result {
        Some(p) => p,
        None => return Err(invalid_product()),
    };
    Ok(ApiResponse::success("Product", result, Some(Meta::empty())))
}

pub async fn create_product(
    state: &AppState,
    payload: NewProduct,
) -> AppResult<ApiResponse<Product>> {
    let active = ActiveModel {
        id: NotSet,
        product_name: Set(payload.product_name),
        price: Set(payload.price),
    };
    let product = active.insert(&state.orm).await?;

    tracing::info!(product_id = product.id, "product created");
    Ok(ApiResponse::success(
        "Product created",
        Product::from(product),
        Some(Meta::empty()),
    ))
}

pub async fn update_product(
    state: &AppState,
    id: i32,
    payload: NewProduct,
) -> AppResult<ApiResponse<Product>> {
    let txn = state.orm.begin().await?;

    let existing = Products::find_by_id(id).one(&txn).await?;
    let existing = match existing {
        Some(p) => p,
        None => return Err(invalid_product()),
    };

    let mut active: ActiveModel = existing.into();
    active.product_name = Set(payload.product_name);
    active.price = Set(payload.price);

    let product = active.update(&txn).await?;
    txn.commit().await?;

    Ok(ApiResponse::success(
        "Updated",
        Product::from(product),
        Some(Meta::empty()),
    ))
}

/// Delete a product. Orders that referenced it keep existing; only the links go.
pub async fn delete_product(
    state: &AppState,
    id: i32,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let txn = state.orm.begin().await?;

    if Products::find_by_id(id).one(&txn).await?.is_none() {
        return Err(invalid_product());
    }

    let unlinked = OrderProduct::delete_many()
        .filter(LinkCol::ProductId.eq(id))
        .exec(&txn)
        .await?;
    Products::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    tracing::info!(
        product_id = id,
        unlinked = unlinked.rows_affected,
        "product deleted"
    );
    Ok(ApiResponse::message(format!("successfully deleted product {id}")))
}
