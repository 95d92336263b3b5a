//! Link enrichment.
//!
//! Turning a URL into a title, preview image, summary and tags is delegated to
//! a [`LinkEnricher`]. The built-in [`UrlEnricher`] works offline from the URL
//! alone; a scraping or summarizing implementation can be swapped in through
//! [`AppState::with_enricher`](crate::state::AppState::with_enricher).

use async_trait::async_trait;
use url::Url;

use linkvault_core::AppError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkPreview {
    pub title: String,
    pub image_url: Option<String>,
    pub summary: Vec<String>,
    pub tags: Vec<String>,
}

#[async_trait]
pub trait LinkEnricher: Send + Sync {
    /// Builds the preview for `url`. Errors are reported to the client as 400.
    async fn enrich(&self, url: &Url) -> Result<LinkPreview, AppError>;
}

/// Derives the title from the host and path. Summary and tags stay empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct UrlEnricher;

impl UrlEnricher {
    pub fn title_for(url: &Url) -> String {
        let host = url
            .host_str()
            .map(|h| h.strip_prefix("www.").unwrap_or(h))
            .unwrap_or_default();

        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();

        if segments.is_empty() {
            host.to_string()
        } else {
            format!("{} / {}", host, segments.join(" / "))
        }
    }
}

#[async_trait]
impl LinkEnricher for UrlEnricher {
    async fn enrich(&self, url: &Url) -> Result<LinkPreview, AppError> {
        Ok(LinkPreview {
            title: Self::title_for(url),
            ..LinkPreview::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title(raw: &str) -> String {
        UrlEnricher::title_for(&Url::parse(raw).unwrap())
    }

    #[test]
    fn test_title_from_host_only() {
        assert_eq!(title("https://www.rust-lang.org/"), "rust-lang.org");
        assert_eq!(title("https://docs.rs"), "docs.rs");
    }

    #[test]
    fn test_title_includes_path_segments() {
        assert_eq!(
            title("https://www.rust-lang.org/learn/get-started?x=1#top"),
            "rust-lang.org / learn / get-started"
        );
        assert_eq!(title("https://example.com/a//b/"), "example.com / a / b");
    }

    #[tokio::test]
    async fn test_enrich_leaves_analysis_empty() {
        let url = Url::parse("https://example.com/post").unwrap();
        let preview = UrlEnricher.enrich(&url).await.unwrap();

        assert_eq!(preview.title, "example.com / post");
        assert!(preview.image_url.is_none());
        assert!(preview.summary.is_empty());
        assert!(preview.tags.is_empty());
    }
}
