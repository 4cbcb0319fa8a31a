pub mod account_service;
pub mod auth_service;
pub mod bootstrap_service;
pub mod category_service;
pub mod product_service;
pub mod user_service;
