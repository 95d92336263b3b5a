use tracing::instrument;
use url::Url;

use linkvault_core::AppError;
use linkvault_models::{Link, LinkId, NewLink, UserId};

use crate::metrics::track_link_created;
use crate::state::AppState;

pub struct LinkService;

/// Accepts absolute `http`/`https` URLs with a host.
pub fn parse_link_url(raw: &str) -> Result<Url, AppError> {
    let url = Url::parse(raw.trim()).map_err(|_| AppError::bad_request("Invalid URL"))?;

    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(AppError::bad_request("Invalid URL"));
    }

    Ok(url)
}

impl LinkService {
    #[instrument(skip(state))]
    pub async fn list_links(state: &AppState, user_id: UserId) -> Result<Vec<Link>, AppError> {
        state.links.list_for_user(user_id).await
    }

    #[instrument(skip(state))]
    pub async fn create_link(
        state: &AppState,
        user_id: UserId,
        raw_url: &str,
    ) -> Result<Link, AppError> {
        let url = parse_link_url(raw_url)?;

        let preview = state.enricher.enrich(&url).await.map_err(|e| {
            if e.is_server_error() {
                tracing::warn!(error = %e.error, "Link enrichment failed");
                AppError::bad_request(format!("Failed to analyze {}", url))
            } else {
                e
            }
        })?;

        let link = state
            .links
            .create(NewLink {
                user_id,
                url: url.to_string(),
                title: preview.title,
                image_url: preview.image_url,
                ai_summary: preview.summary,
                ai_tags: preview.tags,
            })
            .await?;

        track_link_created();
        Ok(link)
    }

    #[instrument(skip(state))]
    pub async fn delete_link(
        state: &AppState,
        user_id: UserId,
        link_id: LinkId,
    ) -> Result<(), AppError> {
        let link = state
            .links
            .find(link_id)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found"))?;

        if !link.is_owned_by(user_id) {
            return Err(AppError::forbidden(
                "You do not have permission to delete this link",
            ));
        }

        if !state.links.delete(link_id).await? {
            return Err(AppError::not_found("Link not found"));
        }

        Ok(())
    }
}
