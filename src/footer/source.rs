use crate::footer::FooterContent;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

#[async_trait]
pub trait FooterSource: Send + Sync {
    async fn fetch(&self) -> Result<FooterContent>;
}

pub struct HttpFooterSource {
    http: Client,
    url: String,
}

impl HttpFooterSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }
}

#[async_trait]
impl FooterSource for HttpFooterSource {
    async fn fetch(&self) -> Result<FooterContent> {
        let content = self
            .http
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("GET {}", self.url))?
            .error_for_status()?
            .json()
            .await
            .context("Invalid footer document")?;
        Ok(content)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Json, Router};
    use tokio::net::TcpListener;

    async fn serve(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{addr}/footer")
    }

    #[tokio::test]
    async fn test_fetches_footer_document() {
        let app = Router::new().route(
            "/footer",
            get(|| async {
                Json(serde_json::json!({
                    "content": "Made with care",
                    "links": [{ "title": "Status", "url": "https://status.example.com", "target": "_blank" }],
                    "social_media": [{ "platform": "github", "url": "https://github.com/example" }]
                }))
            }),
        );
        let source = HttpFooterSource::new(serve(app).await, Duration::from_secs(5)).unwrap();

        let content = source.fetch().await.unwrap();
        assert_eq!(content.content, "Made with care");
        assert!(content.links[0].opens_new_window());
        assert_eq!(content.social_media[0].platform, "github");
    }

    #[tokio::test]
    async fn test_server_error_is_err() {
        let app = Router::new().route(
            "/footer",
            get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        );
        let source = HttpFooterSource::new(serve(app).await, Duration::from_secs(5)).unwrap();
        assert!(source.fetch().await.is_err());
    }
}
