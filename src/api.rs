// API client module: a small blocking HTTP client for the remote shrink
// service. One request uploads the image, a second one fetches the result.

use std::io::Read;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, ORIGIN, REFERER, USER_AGENT,
};
use serde::Deserialize;
use tracing::debug;

use crate::download::Downloader;
use crate::provider::{CompressionProvider, ShrinkResult};

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36";
const SITE_ORIGIN: &str = "https://tinyjpg.com";
const SITE_REFERER: &str = "https://tinyjpg.com/";
const ACCEPT_LANGUAGE_VALUE: &str = "en-US,en;q=0.9";

/// Client for the shrink endpoint. Holds a reqwest blocking client and the
/// URL images are POSTed to.
#[derive(Clone)]
pub struct TinyClient {
    client: Client,
    endpoint: String,
}

/// Shape of the shrink endpoint's JSON reply. Only the parts we use are
/// declared; `input`, `size`, `width` and friends are ignored.
#[derive(Deserialize, Debug)]
struct ShrinkResponse {
    output: ShrinkOutput,
}

#[derive(Deserialize, Debug)]
struct ShrinkOutput {
    url: String,
    ratio: f64,
}

impl From<ShrinkResponse> for ShrinkResult {
    fn from(resp: ShrinkResponse) -> Self {
        ShrinkResult {
            output_url: resp.output.url,
            ratio: resp.output.ratio,
        }
    }
}

impl TinyClient {
    /// Build a client for `endpoint`. `timeout` of `None` waits forever.
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let client = Client::builder()
            .default_headers(browser_headers())
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(TinyClient {
            client,
            endpoint: endpoint.into(),
        })
    }
}

/// Static headers that make requests look like they come from the site's
/// own upload page.
fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(ORIGIN, HeaderValue::from_static(SITE_ORIGIN));
    headers.insert(REFERER, HeaderValue::from_static(SITE_REFERER));
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE));
    headers
}

fn parse_shrink_response(body: &[u8]) -> Result<ShrinkResult> {
    let resp: ShrinkResponse =
        serde_json::from_slice(body).context("Parsing shrink response json")?;
    Ok(resp.into())
}

impl CompressionProvider for TinyClient {
    /// POST the raw image bytes and decode where the result can be fetched.
    fn shrink(&self, body: Vec<u8>, content_type: &str) -> Result<ShrinkResult> {
        debug!(
            "POST {} ({} bytes, {})",
            self.endpoint,
            body.len(),
            content_type
        );
        let res = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .context("Failed to send shrink request")?;
        if !res.status().is_success() {
            let status = res.status();
            let txt = res.text().unwrap_or_else(|_| "".into());
            anyhow::bail!("Shrink failed: {} - {}", status, txt.trim());
        }
        let bytes = res.bytes().context("Reading shrink response")?;
        parse_shrink_response(&bytes)
    }
}

impl Downloader for TinyClient {
    /// GET `url`; the response body is streamed by the caller.
    fn fetch(&self, url: &str) -> Result<Box<dyn Read + '_>> {
        debug!("GET {url}");
        let res = self
            .client
            .get(url)
            .send()
            .context("Failed to send download request")?;
        if !res.status().is_success() {
            anyhow::bail!("Download failed: {}", res.status());
        }
        Ok(Box::new(res))
    }
}
