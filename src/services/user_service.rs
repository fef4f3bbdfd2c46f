use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;
use uuid::Uuid;

use crate::{
    dto::users::{NewUser, UserList},
    entity::{
        order_product::{Column as LinkCol, Entity as OrderProduct},
        orders::{Column as OrderCol, Entity as Orders},
        users::{ActiveModel, Column, Entity as Users},
    },
    error::{AppError, AppResult, is_unique_violation},
    models::User,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    services::{auth_service::hash_password, paginate},
    state::AppState,
};

fn invalid_user() -> AppError {
    AppError::NotFound("Invalid user id".into())
}

fn duplicate_email(email: &str) -> AppError {
    AppError::Conflict(format!("Duplicate email {email}"))
}

/// Register a user. The email's unique constraint settles concurrent sign-ups.
pub async fn create_user(state: &AppState, payload: NewUser) -> AppResult<ApiResponse<User>> {
    let NewUser {
        name,
        address,
        email,
        password,
    } = payload;
    let password_hash = hash_password(&password)?;

    let active = ActiveModel {
        id: NotSet,
        public_id: Set(Uuid::new_v4()),
        name: Set(name),
        address: Set(address),
        email: Set(email.clone()),
        password_hash: Set(password_hash),
    };

    let user = match active.insert(&state.orm).await {
        Ok(user) => user,
        Err(err) if is_unique_violation(&err) => return Err(duplicate_email(&email)),
        Err(err) => return Err(err.into()),
    };

    tracing::info!(user_id = user.id, public_id = %user.public_id, "user registered");
    Ok(ApiResponse::success(
        "User created",
        User::from(user),
        Some(Meta::empty()),
    ))
}

pub async fn get_user(state: &AppState, id: i32) -> AppResult<ApiResponse<User>> {
    let user = Users::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(User::from)
        .ok_or_else(invalid_user)?;
    Ok(ApiResponse::success("User", user, Some(Meta::empty())))
}

pub async fn list_users(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<UserList>> {
    let finder = Users::find().order_by_asc(Column::Id);

    let (models, meta) = paginate(&state.orm, finder, &pagination).await?;

    let items = models.into_iter().map(User::from).collect();
    Ok(ApiResponse::success("Users", UserList { items }, Some(meta)))
}

/// Replace every field of an existing user, re-hashing the password.
pub async fn update_user(
    state: &AppState,
    id: i32,
    payload: NewUser,
) -> AppResult<ApiResponse<User>> {
    let txn = state.orm.begin().await?;

    let existing = Users::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(invalid_user)?;

    let password_hash = hash_password(&payload.password)?;
    let email = payload.email;

    let mut active: ActiveModel = existing.into();
    active.name = Set(payload.name);
    active.address = Set(payload.address);
    active.email = Set(email.clone());
    active.password_hash = Set(password_hash);

    let user = match active.update(&txn).await {
        Ok(user) => user,
        Err(err) if is_unique_violation(&err) => return Err(duplicate_email(&email)),
        Err(err) => return Err(err.into()),
    };
    txn.commit().await?;

    tracing::info!(user_id = user.id, "user updated");
    Ok(ApiResponse::success(
        "Updated",
        User::from(user),
        Some(Meta::empty()),
    ))
}

/// Delete a user together with its orders and their product links.
pub async fn delete_user(
    state: &AppState,
    id: i32,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let txn = state.orm.begin().await?;

    if Users::find_by_id(id).one(&txn).await?.is_none() {
        return Err(invalid_user());
    }

    let order_ids: Vec<i32> = Orders::find()
        .select_only()
        .column(OrderCol::Id)
        .filter(OrderCol::UserId.eq(id))
        .into_tuple()
        .all(&txn)
        .await?;

    if !order_ids.is_empty() {
        OrderProduct::delete_many()
            .filter(LinkCol::OrderId.is_in(order_ids.clone()))
            .exec(&txn)
            .await?;
        Orders::delete_many()
            .filter(OrderCol::UserId.eq(id))
            .exec(&txn)
            .await?;
    }

    Users::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    tracing::info!(user_id = id, orders = order_ids.len(), "user deleted");
    Ok(ApiResponse::message(format!("successfully deleted user {id}")))
}
