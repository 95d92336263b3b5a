use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;

use linkvault_core::AppError;
use linkvault_models::{Link, LinkId};

use super::model::{CreateLinkDto, DeleteLinkResponse};
use super::service::LinkService;
use crate::middleware::auth::AuthUser;
use crate::modules::auth::model::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// List the caller's saved links, newest first
#[utoipa::path(
    get,
    path = "/api/links",
    responses(
        (status = 200, description = "Saved links", body = Vec<Link>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Links",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn get_links(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<Link>>, AppError> {
    let links = LinkService::list_links(&state, auth_user.user_id()).await?;
    Ok(Json(links))
}

/// Save and enrich a link
#[utoipa::path(
    post,
    path = "/api/links",
    request_body = CreateLinkDto,
    responses(
        (status = 201, description = "Link saved", body = Link),
        (status = 400, description = "Invalid URL or enrichment failure", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Links",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn create_link(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateLinkDto>,
) -> Result<(StatusCode, Json<Link>), AppError> {
    let link = LinkService::create_link(&state, auth_user.user_id(), &dto.url).await?;
    Ok((StatusCode::CREATED, Json(link)))
}

/// Delete one of the caller's links
#[utoipa::path(
    delete,
    path = "/api/links/{id}",
    params(("id" = String, Path, description = "Link ID")),
    responses(
        (status = 200, description = "Link deleted", body = DeleteLinkResponse),
        (status = 400, description = "Malformed link ID", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Link belongs to another user", body = ErrorResponse),
        (status = 404, description = "Link not found", body = ErrorResponse)
    ),
    tag = "Links",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn delete_link(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DeleteLinkResponse>, AppError> {
    let link_id: LinkId = id
        .parse()
        .map_err(|_| AppError::bad_request("Invalid link ID"))?;

    LinkService::delete_link(&state, auth_user.user_id(), link_id).await?;
    Ok(Json(DeleteLinkResponse {
        message: "Link deleted successfully".to_string(),
    }))
}
