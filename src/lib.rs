pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{
    auth_service::AuthService, category_service::CategoryService,
    product_service::ProductService, user_service::UserService,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub product_service: ProductService,
    pub category_service: CategoryService,
    pub user_service: UserService,
    pub auth_service: AuthService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let config = crate::config::get_config();

        let product_service = ProductService::new(pool.clone());
        let category_service = CategoryService::new(pool.clone());
        let user_service = UserService::new(pool.clone());
        let auth_service = AuthService::new(
            user_service.clone(),
            config.jwt_secret.clone(),
            config.jwt_ttl_minutes,
        );

        Self {
            pool,
            product_service,
            category_service,
            user_service,
            auth_service,
        }
    }
}
