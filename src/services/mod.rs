use sea_orm::{DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QuerySelect, Select};

use crate::{response::Meta, routes::params::Pagination};

pub mod auth_service;
pub mod order_service;
pub mod product_service;
pub mod token_service;
pub mod user_service;

/// Run an ordered listing, one page at a time when a page was requested.
/// Pages past the end come back empty without querying for rows.
pub(crate) async fn paginate<E>(
    db: &DatabaseConnection,
    finder: Select<E>,
    pagination: &Pagination,
) -> Result<(Vec<E::Model>, Meta), DbErr>
where
    E: EntityTrait,
    E::Model: Sync + 'static,
{
    let Some((page, limit, offset)) = pagination.normalize() else {
        return Ok((finder.all(db).await?, Meta::empty()));
    };

    let total = finder.clone().count(db).await?;
    let meta = Meta::new(page, limit, i64::try_from(total).unwrap_or(i64::MAX));

    let offset = u64::try_from(offset).unwrap_or_default();
    if offset >= total {
        return Ok((Vec::new(), meta));
    }

    let limit = u64::try_from(limit).unwrap_or_default();
    let models = finder.limit(limit).offset(offset).all(db).await?;
    Ok((models, meta))
}
