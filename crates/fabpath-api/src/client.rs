// Controller REST client
//
// Wraps `reqwest::Client` with controller URL construction and `imdata`
// envelope unwrapping. Endpoint groups (auth, class queries) live in
// sibling modules as inherent methods to keep this file about transport.

use serde::Serialize;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::models::{ImData, parse_imdata};
use crate::transport::TransportConfig;

/// Raw HTTP client for the controller's REST API.
///
/// Session state lives in the cookie jar of the underlying
/// `reqwest::Client`: after [`login`](Self::login) the controller's
/// `APIC-cookie` rides along on every request.
pub struct ApicClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApicClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// If the config doesn't already include a cookie jar, one is created
    /// automatically (session auth requires cookies).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let config = if transport.cookie_jar.is_some() {
            transport.clone()
        } else {
            transport.clone().with_cookie_jar()
        };
        let http = config.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client around a pre-built `reqwest::Client`.
    ///
    /// The client must carry its own cookie store for sessions to stick.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// The controller base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for an API path: `{base}/api/{path}`.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}/api/{path}")).map_err(Error::InvalidUrl)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and unwrap the `imdata` envelope.
    pub(crate) async fn get(&self, url: Url) -> Result<ImData, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;

        Self::parse_envelope(resp).await
    }

    /// Send a POST request with JSON body and unwrap the `imdata` envelope.
    pub(crate) async fn post(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<ImData, Error> {
        debug!("POST {}", url);

        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::parse_envelope(resp).await
    }

    /// Parse the `{ totalCount, imdata }` envelope.
    ///
    /// HTTP 401/403 mean the session is missing or the token was rejected.
    /// Any other failure status, or an `error` object inside `imdata`
    /// (the controller sometimes reports errors with HTTP 200), becomes
    /// [`Error::Api`] carrying the controller's code and text.
    async fn parse_envelope(resp: reqwest::Response) -> Result<ImData, Error> {
        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;
        trace!(status = status.as_u16(), bytes = body.len(), "response received");

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            let detail = parse_imdata(&body)
                .ok()
                .and_then(|env| env.error())
                .map_or_else(|| format!("HTTP {status}"), |err| err.text);
            return Err(Error::Authentication {
                message: format!("session rejected: {detail}"),
            });
        }

        if !status.is_success() {
            if let Some(err) = parse_imdata(&body).ok().and_then(|env| env.error()) {
                return Err(Error::Api {
                    code: err.code,
                    text: err.text,
                    status: status.as_u16(),
                });
            }
            return Err(Error::Api {
                code: status.as_u16().to_string(),
                text: body.chars().take(200).collect(),
                status: status.as_u16(),
            });
        }

        let envelope = parse_imdata(&body)?;
        if let Some(err) = envelope.error() {
            return Err(Error::Api {
                code: err.code,
                text: err.text,
                status: status.as_u16(),
            });
        }
        Ok(envelope)
    }
}
