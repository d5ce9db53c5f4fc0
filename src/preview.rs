use crate::config::ImportConfig;
use crate::extractors::meta_property;
use crate::fetchers::{Fetcher, RequestFetcher};
use crate::model::LinkPreview;
use log::warn;
use scraper::Html;

/// Read the OpenGraph title, image and description out of a page.
pub fn read_open_graph(url: &str, html: &str) -> LinkPreview {
    let document = Html::parse_document(html);
    LinkPreview {
        title: meta_property(&document, "og:title").unwrap_or_default(),
        image: meta_property(&document, "og:image").unwrap_or_default(),
        description: meta_property(&document, "og:description").unwrap_or_default(),
        url: url.to_string(),
    }
}

/// Fetch `url` and build its link preview. Error pages are still read, since
/// some sites serve their OpenGraph tags with a non-2xx status. Never fails:
/// when the page cannot be loaded every field except `url` is empty.
pub async fn link_preview(fetcher: &dyn Fetcher, url: &str) -> LinkPreview {
    match fetcher.fetch_any_status(url).await {
        Ok(html) => read_open_graph(url, &html),
        Err(e) => {
            warn!("Failed to fetch OpenGraph data for {}: {}", url, e);
            LinkPreview {
                url: url.to_string(),
                ..Default::default()
            }
        }
    }
}

pub async fn fetch_link_preview(url: &str, config: &ImportConfig) -> LinkPreview {
    match RequestFetcher::from_config(config) {
        Ok(fetcher) => link_preview(&fetcher, url).await,
        Err(e) => {
            warn!("Failed to build HTTP client for {}: {}", url, e);
            LinkPreview {
                url: url.to_string(),
                ..Default::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_open_graph() {
        let html = r#"
        <html><head>
            <meta property="og:title" content="Spaghetti Carbonara">
            <meta property="og:image" content="https://example.com/carbonara.jpg">
            <meta name="description" content="not OpenGraph">
        </head><body></body></html>
        "#;

        let preview = read_open_graph("https://example.com/carbonara", html);
        assert_eq!(preview.title, "Spaghetti Carbonara");
        assert_eq!(preview.image, "https://example.com/carbonara.jpg");
        assert_eq!(preview.description, "");
        assert_eq!(preview.url, "https://example.com/carbonara");
    }
}
