use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use linkvault_models::{Link, User};

use crate::modules::auth::model::{
    ErrorResponse, LoginRequest, LoginResponse, LogoutAllResponse, MessageResponse,
    RefreshResponse, RegisterRequestDto, SessionUser,
};
use crate::modules::links::model::{CreateLinkDto, DeleteLinkResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::refresh_token,
        crate::modules::auth::controller::logout_user,
        crate::modules::auth::controller::logout_all,
        crate::modules::auth::controller::get_me,
        crate::modules::links::controller::get_links,
        crate::modules::links::controller::create_link,
        crate::modules::links::controller::delete_link,
    ),
    components(
        schemas(
            User,
            Link,
            SessionUser,
            RegisterRequestDto,
            LoginRequest,
            LoginResponse,
            RefreshResponse,
            MessageResponse,
            LogoutAllResponse,
            ErrorResponse,
            CreateLinkDto,
            DeleteLinkResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and session management"),
        (name = "Links", description = "Saved links of the current user")
    ),
    info(
        title = "LinkVault API",
        version = "0.1.0",
        description = "Bookmark storage with short-lived access tokens and allow-listed refresh tokens.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
