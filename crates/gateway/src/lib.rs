//! # Roster Gateway Crate
//!
//! HTTP API layer for the roster service. Routes requests to the account
//! service and translates domain errors into JSON error responses.
//!
//! - **REST**: account endpoints with OpenAPI documentation
//! - **State**: shared application state holding the account service
//! - **Middleware**: CORS and request logging

pub mod error;
pub mod middleware;
pub mod rest;
pub mod state;

pub use error::{GatewayError, GatewayResult};
pub use state::GatewayState;

use axum::{middleware as axum_middleware, Router};
use std::sync::Arc;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Create the main application router with all routes
pub fn create_router(state: GatewayState) -> Router {
    let arc_state = Arc::new(state);
    #[allow(unused_mut)]
    let mut router = Router::new()
        .merge(rest::create_rest_routes().with_state(arc_state))
        .layer(middleware::create_cors_middleware())
        .layer(axum_middleware::from_fn(middleware::logging_middleware));

    // Swagger UI only in debug builds
    #[cfg(debug_assertions)]
    {
        #[derive(OpenApi)]
        #[openapi(
            paths(
                rest::health::health_check,
                rest::users::register,
                rest::users::login,
                rest::users::list_users,
                rest::users::get_user_by_name,
                rest::users::update_profile,
                rest::users::update_user_by_name,
                rest::users::delete_user,
            ),
            components(
                schemas(
                    rest::health::HealthResponse,
                    rest::users::RegisterRequest,
                    rest::users::LoginRequest,
                    rest::users::UpdateProfileRequest,
                    rest::users::UpdateUserByNameRequest,
                    rest::users::UserResponse,
                    rest::users::RegisterResponse,
                    rest::users::LoginResponse,
                    rest::users::MessageResponse,
                    rest::users::ErrorResponse,
                )
            ),
            tags(
                (name = "Health", description = "Service health"),
                (name = "Users", description = "Account management"),
            )
        )]
        struct ApiDoc;

        router = router
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    router
}
