use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use commerce_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    dto::{products::NewProduct, users::NewUser},
    entity::products::{Column as ProdCol, Entity as Products},
    error::AppError,
    services::{product_service, token_service::TokenService, user_service},
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = AppConfig::from_env()?;
    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;

    let state = AppState {
        orm,
        tokens: TokenService::new(&config.jwt_secret, config.token_ttl_minutes),
        auth_mode: config.auth_mode,
    };

    ensure_user(&state, "demo@example.com", "demo123").await?;
    seed_products(&state).await?;

    tracing::info!("seed completed");
    Ok(())
}

async fn ensure_user(state: &AppState, email: &str, password: &str) -> anyhow::Result<()> {
    let user = NewUser {
        name: "Demo User".into(),
        address: "1 Ferris Way".into(),
        email: email.into(),
        password: password.into(),
    };

    match user_service::create_user(state, user).await {
        Ok(_) => tracing::info!(email, "seeded user"),
        Err(AppError::Conflict(_)) => tracing::info!(email, "user already present"),
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

async fn seed_products(state: &AppState) -> anyhow::Result<()> {
    let products = [
        ("Axum Hoodie", 55.0),
        ("Ferris Mug", 12.0),
        ("Rust Sticker Pack", 5.0),
        ("E-book: Async Rust", 25.0),
    ];

    for (name, price) in products {
        let existing = Products::find()
            .filter(ProdCol::ProductName.eq(name))
            .one(&state.orm)
            .await?;
        if existing.is_some() {
            continue;
        }

        product_service::create_product(
            state,
            NewProduct {
                product_name: name.into(),
                price,
            },
        )
        .await?;
    }

    tracing::info!("seeded products");
    Ok(())
}
