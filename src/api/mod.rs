//! HTTP client for the gallery server API.

mod error;
mod models;

pub use error::ApiError;
pub use models::{Config, DeleteRequest, ErrorBody, Image, MessageResponse, PageResponse};

use image::DynamicImage;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::config::ClientConfig;
use crate::gallery::Query;

/// Async client for the gallery server. Cheap to clone.
#[derive(Debug, Clone)]
pub struct GalleryClient {
    http: reqwest::Client,
    base: String,
    page_size: u32,
}

impl GalleryClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: config.base_url(),
            page_size: config.page_size,
        }
    }

    /// Resolve an API path or an image `filepath` against the server root.
    /// Absolute URLs are returned unchanged.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.base, path)
        } else {
            format!("{}/{}", self.base, path)
        }
    }

    #[instrument(
        skip(self, query),
        fields(
            query = %query.text,
            sort = query.sort.as_param(),
            platform = query.platform.as_param()
        )
    )]
    pub async fn list_images(&self, page: u32, query: &Query) -> Result<PageResponse, ApiError> {
        let response = self
            .http
            .get(self.url("/api/images"))
            .query(&[
                ("page", page.to_string()),
                ("limit", self.page_size.to_string()),
                ("query", query.text.clone()),
                ("sort_by", query.sort.as_param().to_string()),
                ("platform_filter", query.platform.as_param().to_string()),
            ])
            .send()
            .await?;
        let page: PageResponse = decode(response).await?;
        debug!(
            images = page.images.len(),
            page = page.page,
            total_pages = page.total_pages,
            "list response"
        );
        Ok(page)
    }

    #[instrument(skip(self))]
    pub async fn get_image(&self, id: i64) -> Result<Image, ApiError> {
        let response = self
            .http
            .get(self.url(&format!("/api/images/{}", id)))
            .send()
            .await?;
        decode(response).await
    }

    #[instrument(skip(self))]
    pub async fn get_config(&self) -> Result<Config, ApiError> {
        let response = self.http.get(self.url("/api/config")).send().await?;
        decode(response).await
    }

    #[instrument(
        skip(self, config),
        fields(source = %config.image_file_path, dest = %config.des_file_path)
    )]
    pub async fn save_config(&self, config: &Config) -> Result<MessageResponse, ApiError> {
        let response = self
            .http
            .post(self.url("/api/config"))
            .json(config)
            .send()
            .await?;
        decode(response).await
    }

    #[instrument(skip(self))]
    pub async fn trigger_scan(&self) -> Result<MessageResponse, ApiError> {
        let response = self.http.post(self.url("/api/scan")).send().await?;
        decode(response).await
    }

    #[instrument(skip(self), fields(count = ids.len()))]
    pub async fn delete_images(&self, ids: &[i64]) -> Result<MessageResponse, ApiError> {
        let response = self
            .http
            .delete(self.url("/api/images/batch"))
            .json(&DeleteRequest { image_ids: ids })
            .send()
            .await?;
        decode(response).await
    }

    /// Download the raw bytes behind an image `filepath`.
    #[instrument(skip(self))]
    pub async fn fetch_image_bytes(&self, filepath: &str) -> Result<Vec<u8>, ApiError> {
        let response = self.http.get(self.url(filepath)).send().await?;
        let bytes = check(response).await?.bytes().await?;
        Ok(bytes.to_vec())
    }

    /// Download and decode an image for thumbnail display.
    /// Decoding runs on the blocking pool so it never stalls other requests.
    pub async fn fetch_thumbnail(&self, filepath: &str) -> Result<DynamicImage, ApiError> {
        let bytes = self.fetch_image_bytes(filepath).await?;
        let decoded = tokio::task::spawn_blocking(move || image::load_from_memory(&bytes))
            .await??;
        Ok(decoded)
    }
}

/// Map non-success responses to `ApiError`, extracting the server's `detail`.
async fn check(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let detail = response
        .json::<ErrorBody>()
        .await
        .ok()
        .map(ErrorBody::into_message);

    if status == StatusCode::NOT_FOUND {
        Err(ApiError::NotFound { detail })
    } else {
        Err(ApiError::Status { status, detail })
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    Ok(check(response).await?.json::<T>().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::{PlatformFilter, SortMode};
    use axum::extract::{Json, Path, Query as AxumQuery};
    use axum::http::StatusCode as AxumStatus;
    use axum::routing::{delete, get, post};
    use axum::Router;
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use tokio::net::TcpListener;

    async fn spawn_server(app: Router) -> GalleryClient {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        let config = ClientConfig::new(&format!("http://{}", addr), 30).unwrap();
        GalleryClient::new(&config)
    }

    #[test]
    fn url_joins_paths() {
        let client = GalleryClient::new(&ClientConfig::default());
        assert_eq!(client.url("/api/images"), "http://127.0.0.1:8000/api/images");
        assert_eq!(client.url("images/a.png"), "http://127.0.0.1:8000/images/a.png");
        assert_eq!(client.url("https://cdn.example/a.png"), "https://cdn.example/a.png");
    }

    #[tokio::test]
    async fn list_sends_query_parameters() {
        // The mock encodes what it received into the returned filepath
        let app = Router::new().route(
            "/api/images",
            get(|AxumQuery(params): AxumQuery<HashMap<String, String>>| async move {
                let echo = format!(
                    "page={};limit={};query={};sort_by={};platform_filter={}",
                    params["page"],
                    params["limit"],
                    params["query"],
                    params["sort_by"],
                    params["platform_filter"],
                );
                Json(json!({
                    "images": [{"no": 1, "filepath": echo, "platform": "NovelAI"}],
                    "page": params["page"].parse::<u32>().unwrap(),
                    "total_pages": 2,
                }))
            }),
        );
        let client = spawn_server(app).await;

        let query = Query::default()
            .with_text("cat ears")
            .with_sort(SortMode::Newest)
            .with_platform(PlatformFilter::StableDiffusion);
        let page = client.list_images(2, &query).await.unwrap();

        assert_eq!(page.page, 2);
        assert_eq!(page.total_pages, 2);
        assert!(!page.has_more());
        assert_eq!(
            page.images[0].filepath,
            "page=2;limit=30;query=cat ears;sort_by=desc;platform_filter=StableDiffusion"
        );
    }

    #[tokio::test]
    async fn list_forwards_every_parameter() {
        let app = Router::new().route(
            "/api/images",
            get(|AxumQuery(params): AxumQuery<HashMap<String, String>>| async move {
                let ok = params.get("limit").map(String::as_str) == Some("30")
                    && params.get("query").map(String::as_str) == Some("cat ears")
                    && params.get("sort_by").map(String::as_str) == Some("asc")
                    && params.get("platform_filter").map(String::as_str) == Some("none");
                if ok {
                    (AxumStatus::OK, Json(json!({"images": [], "page": 1, "total_pages": 0})))
                } else {
                    (AxumStatus::BAD_REQUEST, Json(json!({"detail": format!("{:?}", params)})))
                }
            }),
        );
        let client = spawn_server(app).await;

        let query = Query::default()
            .with_text("cat ears")
            .with_sort(SortMode::Oldest)
            .with_platform(PlatformFilter::Untagged);
        let page = client.list_images(1, &query).await.unwrap();
        assert!(page.images.is_empty());
        assert!(!page.has_more());
    }

    #[tokio::test]
    async fn config_not_found_maps_to_not_found() {
        let app = Router::new().route(
            "/api/config",
            get(|| async {
                (
                    AxumStatus::NOT_FOUND,
                    Json(json!({"detail": "Configuration not found. Please set it up."})),
                )
            }),
        );
        let client = spawn_server(app).await;

        let err = client.get_config().await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.detail(), "Configuration not found. Please set it up.");
    }

    #[tokio::test]
    async fn save_config_surfaces_detail_on_failure() {
        let app = Router::new().route(
            "/api/config",
            post(|Json(body): Json<Value>| async move {
                (
                    AxumStatus::BAD_REQUEST,
                    Json(json!({
                        "detail": format!(
                            "Source path not found: {}",
                            body["image_file_path"].as_str().unwrap()
                        )
                    })),
                )
            }),
        );
        let client = spawn_server(app).await;

        let config = Config {
            image_file_path: "/missing".to_string(),
            des_file_path: "/dest".to_string(),
        };
        let err = client.save_config(&config).await.unwrap_err();
        assert_eq!(err.detail(), "Source path not found: /missing");
    }

    #[tokio::test]
    async fn detail_returns_metadata() {
        let app = Router::new().route(
            "/api/images/{id}",
            get(|Path(id): Path<i64>| async move {
                Json(json!({
                    "no": id,
                    "filepath": "/images/b.png",
                    "platform": "StableDiffusion",
                    "metadata": {"prompt": "a cat\nSteps: 20", "Software": "StableDiffusion"},
                }))
            }),
        );
        let client = spawn_server(app).await;

        let image = client.get_image(42).await.unwrap();
        assert_eq!(image.no, 42);
        let metadata = image.metadata.unwrap();
        let keys: Vec<&String> = metadata.keys().collect();
        assert_eq!(keys, ["prompt", "Software"]);
    }

    #[tokio::test]
    async fn batch_delete_sends_ids() {
        let app = Router::new().route(
            "/api/images/batch",
            delete(|Json(body): Json<Value>| async move {
                let ids = body["image_ids"].as_array().unwrap().len();
                Json(json!({"message": format!("deleted {}", ids)}))
            }),
        );
        let client = spawn_server(app).await;

        let reply = client.delete_images(&[3, 7]).await.unwrap();
        assert_eq!(reply.message, "deleted 2");
    }

    #[tokio::test]
    async fn scan_server_error_without_body() {
        let app = Router::new().route(
            "/api/scan",
            post(|| async { AxumStatus::INTERNAL_SERVER_ERROR }),
        );
        let client = spawn_server(app).await;

        let err = client.trigger_scan().await.unwrap_err();
        match err {
            ApiError::Status { status, detail } => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert!(detail.is_none());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn unreachable_server_is_transport_error() {
        let config = ClientConfig::new("http://127.0.0.1:1", 30).unwrap();
        let client = GalleryClient::new(&config);
        let err = client.get_config().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
