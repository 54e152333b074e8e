//! HTTP fetching for the two open datasets.
//!
//! The [`HttpClient`] trait is the seam for tests; production code uses
//! [`BasicClient`], a thin wrapper over a plain reqwest client. Neither
//! dataset requires authentication.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Request, Response};

#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}

pub struct BasicClient(reqwest::Client);

impl BasicClient {
    pub fn new() -> Self {
        Self(reqwest::Client::new())
    }
}

impl Default for BasicClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for BasicClient {
    async fn execute(&self, req: Request) -> reqwest::Result<Response> {
        self.0.execute(req).await
    }
}

/// Issues a GET for `url` and returns the raw response body.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = Request::new(reqwest::Method::GET, url.parse()?);
    let resp = client.execute(req).await?;
    Ok(resp.bytes().await?.to_vec())
}
