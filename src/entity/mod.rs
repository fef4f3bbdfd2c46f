pub mod order_product;
pub mod orders;
pub mod products;
pub mod users;

pub use order_product::Entity as OrderProduct;
pub use orders::Entity as Orders;
pub use products::Entity as Products;
pub use users::Entity as Users;
