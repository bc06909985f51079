//! HTTP client for the SmugMug v2 API.

use std::time::Duration;

use url::Url;

use crate::params::ApiParams;
use crate::types::{
    AlbumResponse, Envelope, ImageResponse, NodeResponse, ServerResponse, UserAlbumsResponse,
    UserResponse,
};
use crate::Error;

const BASE_API_URL: &str = "https://api.smugmug.com/api/v2";
const USER_AGENT: &str = concat!("rust-smugmug/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the SmugMug v2 API.
///
/// One request produces one response which is decoded and assembled before
/// control returns. No retries, no caching. Each request builds a fresh
/// `reqwest::Client` with a 30-second timeout.
///
/// Authentication is not handled here: point `with_base_url` at an
/// authenticating proxy, or use it directly against public resources.
pub struct Client {
    /// Base URL up to and including `/api/v2` (no trailing slash).
    base_api_url: String,
    /// Ask the server for pretty-printed JSON. Useful when tracing bodies.
    pretty: bool,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a new client pointing at the production SmugMug API.
    pub fn new() -> Self {
        Self {
            base_api_url: BASE_API_URL.to_string(),
            pretty: false,
        }
    }

    /// Creates a new client with a custom base URL (up to `/api/v2`). Used
    /// for testing with wiremock and for authenticating proxies.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_api_url: base_url.trim_end_matches('/').to_string(),
            pretty: false,
        }
    }

    /// Requests pretty-printed response bodies from the server.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn get_url(&self, path: &str, params: &ApiParams) -> Result<Url, Error> {
        let url = Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestFailed
        })?;
        let url = params.add_to_url(&url, self.pretty);
        // The server expects literal commas in _expand/_filter lists.
        Url::parse(&url.to_string().replace("%2C", ",")).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestFailed
        })
    }

    async fn get(
        &self,
        path: &str,
        params: &ApiParams,
    ) -> Result<(Envelope, ServerResponse), Error> {
        let url = self.get_url(path, params)?;
        tracing::debug!("GET {}", url);
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        let resp = client
            .get(url)
            .header("accept", "application/json")
            .header("content-type", "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get resource: {}", e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if status.as_u16() >= 400 {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        let envelope = serde_json::from_str::<Envelope>(&body).map_err(|e| {
            tracing::error!("Failed to parse envelope: {} | body: {}", e, truncate_body(&body));
            Error::Decode(e)
        })?;
        tracing::debug!("response code {} ({})", envelope.code, envelope.message);

        Ok((
            envelope,
            ServerResponse {
                status: status.as_u16(),
                headers,
            },
        ))
    }

    /// Fetches a single album by key, resolving any requested expansions.
    pub async fn get_album(
        &self,
        album_key: &str,
        params: &ApiParams,
    ) -> Result<AlbumResponse, Error> {
        let (envelope, server) = self
            .get(format!("/album/{}", album_key).as_str(), params)
            .await?;
        AlbumResponse::assemble(envelope, server)
    }

    /// Fetches a page of a user's albums. Defaults to the window
    /// `start=0, count=50` when the caller sets no pagination.
    pub async fn get_user_albums(
        &self,
        nickname: &str,
        params: &ApiParams,
    ) -> Result<UserAlbumsResponse, Error> {
        let mut params = params.clone();
        if params.start.is_none() && params.count.is_none() {
            params = params.with_pagination(0, 50);
        }
        let (envelope, server) = self
            .get(format!("/user/{}!albums", nickname).as_str(), &params)
            .await?;
        UserAlbumsResponse::assemble(envelope, server)
    }

    /// Fetches a single image by key, resolving any requested expansions.
    pub async fn get_image(
        &self,
        image_key: &str,
        params: &ApiParams,
    ) -> Result<ImageResponse, Error> {
        let (envelope, server) = self
            .get(format!("/image/{}", image_key).as_str(), params)
            .await?;
        ImageResponse::assemble(envelope, server)
    }

    /// Fetches a single node by id, resolving any requested expansions.
    pub async fn get_node(&self, node_id: &str, params: &ApiParams) -> Result<NodeResponse, Error> {
        let (envelope, server) = self
            .get(format!("/node/{}", node_id).as_str(), params)
            .await?;
        NodeResponse::assemble(envelope, server)
    }

    /// Fetches a user by nickname.
    pub async fn get_user(
        &self,
        nickname: &str,
        params: &ApiParams,
    ) -> Result<UserResponse, Error> {
        let (envelope, server) = self
            .get(format!("/user/{}", nickname).as_str(), params)
            .await?;
        UserResponse::assemble(envelope, server)
    }

    /// Fetches the authenticated user (`!authuser`).
    pub async fn get_auth_user(&self, params: &ApiParams) -> Result<UserResponse, Error> {
        let (envelope, server) = self.get("!authuser", params).await?;
        UserResponse::assemble(envelope, server)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        format!("{}...[truncated]", &body[..MAX])
    }
}
