pub mod auth;
pub mod categories;
pub mod docs;
pub mod health;
pub mod products;
pub mod users;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{middleware::auth::require_bearer_auth, AppState};

/// The complete HTTP surface. Routes under `/api/users` require a bearer
/// token of an existing user; everything else is public.
pub fn router(state: AppState) -> Router {
    let public_api = Router::new()
        .route("/health", get(health::health))
        .route("/api/docs/openapi.json", get(docs::openapi_json))
        .route("/api/auth/login", post(auth::login))
        .route("/api/products", get(products::list_products))
        .route("/api/products/:id", get(products::get_product))
        .route("/api/categories", get(categories::list_categories))
        .route("/api/categories/:id", get(categories::get_category));

    let user_api = Router::new()
        .route(
            "/api/users",
            get(users::list_users).post(users::create_user),
        )
        .route(
            "/api/users/:id",
            get(users::get_user).delete(users::delete_user),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_bearer_auth,
        ));

    public_api
        .merge(user_api)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
