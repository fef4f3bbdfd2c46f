use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{ApiKey, ApiKeyValue, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse},
        orders::{OrderList, OrderPayload, OrderProductLink, OrderProductList},
        products::{ProductList, ProductPayload},
        users::{UserList, UserPayload},
    },
    models::{Order, Product, User},
    response::{ApiResponse, Meta},
    routes::{auth, health, orders, params, products, users},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "access_token",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("x-access-token"))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        health::readiness,
        auth::login,
        users::create_user,
        users::list_users,
        users::get_user,
        users::update_user,
        users::delete_user,
        products::list_products,
        products::create_product,
        products::get_product,
        products::update_product,
        products::delete_product,
        orders::create_order,
        orders::add_product,
        orders::remove_product,
        orders::orders_for_user,
        orders::products_for_order
    ),
    components(
        schemas(
            User,
            Product,
            Order,
            UserPayload,
            ProductPayload,
            OrderPayload,
            LoginRequest,
            LoginResponse,
            UserList,
            ProductList,
            OrderList,
            OrderProductList,
            OrderProductLink,
            params::Pagination,
            Meta,
            ApiResponse<User>,
            ApiResponse<Product>,
            ApiResponse<Order>,
            ApiResponse<LoginResponse>,
            ApiResponse<UserList>,
            ApiResponse<ProductList>,
            ApiResponse<OrderList>,
            ApiResponse<OrderProductList>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Auth", description = "Token issuance"),
        (name = "Users", description = "User endpoints"),
        (name = "Products", description = "Product endpoints"),
        (name = "Orders", description = "Order endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_endpoint() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        for path in [
            "/login",
            "/users",
            "/users/{id}",
            "/products",
            "/products/{id}",
            "/orders",
            "/orders/{order_id}/add_product/{product_id}",
            "/orders/{order_id}/remove_product/{product_id}",
            "/orders/user/{user_id}",
            "/orders/{order_id}/products",
        ] {
            assert!(paths.contains_key(path), "missing {path}");
        }
    }
}
