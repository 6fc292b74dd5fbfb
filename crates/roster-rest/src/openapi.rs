//! OpenAPI documentation configuration.

use roster_core::{ErrorResponse, HealthReport, UserId};
use roster_service::{
    CreateUserRequest, MessageResponse, UpdateUserRequest, UserDetailResponse, UserResponse,
};
use utoipa::OpenApi;

/// OpenAPI documentation for the Roster API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Roster API",
        version = "1.0.0",
        description = "User records with a cache-aside read path",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    paths(
        crate::controllers::user_controller::list_users,
        crate::controllers::user_controller::create_user,
        crate::controllers::user_controller::get_user,
        crate::controllers::user_controller::update_user,
        crate::controllers::user_controller::delete_user,
        crate::controllers::health_controller::health_check,
    ),
    components(
        schemas(
            UserId,
            ErrorResponse,
            HealthReport,
            CreateUserRequest,
            UpdateUserRequest,
            UserResponse,
            UserDetailResponse,
            MessageResponse,
        )
    ),
    tags(
        (name = "users", description = "User management endpoints"),
        (name = "health", description = "Dependency health")
    )
)]
pub struct ApiDoc;
