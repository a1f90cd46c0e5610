// Async HTTP client for the hotel back-office REST API.
//
// Auth: `Authorization: Bearer <token>` on every request.
// Lists: `GET <resource>?<filters>&page=N&per_page=M`, envelope folded
// into `RawPage<T>` by `envelope::decode_page`.

use std::future::Future;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::envelope::{self, EmptyResultMarkers, RawPage};
use crate::error::Error;
use crate::resource::Resource;
use crate::transport::TransportConfig;

/// Upper bound on pages walked by [`ApiClient::paginate_all`].
pub const MAX_PAGES: u32 = 1000;

// ── Error response shape ─────────────────────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the back-office REST API.
///
/// Cheap to share behind an `Arc`; the bearer token is baked into the
/// underlying `reqwest::Client` as a sensitive default header.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    empty_markers: EmptyResultMarkers,
    timeout_secs: u64,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a bearer token and transport config.
    pub fn from_token(
        base_url: &str,
        token: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|e| Error::Authentication {
                message: format!("invalid token header value: {e}"),
            })?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = transport.build_client_with_headers(headers)?;
        Ok(Self {
            http,
            base_url: Self::normalize_base_url(base_url)?,
            empty_markers: EmptyResultMarkers::default(),
            timeout_secs: transport.timeout_secs(),
        })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        Ok(Self {
            http,
            base_url: Self::normalize_base_url(base_url)?,
            empty_markers: EmptyResultMarkers::default(),
            timeout_secs: TransportConfig::default().timeout_secs(),
        })
    }

    /// Replace the "no matching records" message markers.
    pub fn with_empty_markers(mut self, markers: EmptyResultMarkers) -> Self {
        self.empty_markers = markers;
        self
    }

    /// Ensure the base URL ends with `/` so relative joins keep its path.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    fn record_path(resource: Resource, id: &str) -> String {
        format!("{}/{id}", resource.path())
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, Error> {
        request.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout {
                    timeout_secs: self.timeout_secs,
                }
            } else {
                Error::Transport(e)
            }
        })
    }

    async fn get_text(&self, path: &str, params: &[(String, String)]) -> Result<(u16, String), Error> {
        let url = self.url(path)?;
        debug!("GET {url} params={params:?}");

        let resp = self.send(self.http.get(url).query(params)).await?;
        self.success_body(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.send(self.http.post(url).json(body)).await?;
        let (_, text) = self.success_body(resp).await?;
        envelope::decode_record(&text)
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PUT {url}");

        let resp = self.send(self.http.put(url).json(body)).await?;
        let (_, text) = self.success_body(resp).await?;
        envelope::decode_record(&text)
    }

    async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let resp = self.send(self.http.delete(url)).await?;
        self.success_body(resp).await.map(|_| ())
    }

    // ── Response handling ────────────────────────────────────────────

    async fn success_body(&self, resp: reqwest::Response) -> Result<(u16, String), Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok((status.as_u16(), body))
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn parse_error(&self, status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&raw)
            .ok()
            .and_then(|e| e.message.or(e.error))
            .unwrap_or_else(|| {
                if raw.is_empty() {
                    status.to_string()
                } else {
                    raw.chars().take(200).collect()
                }
            });

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Error::Authentication { message };
        }
        // Some endpoints answer 404 + "No data found" for an empty filter result.
        if status == reqwest::StatusCode::NOT_FOUND && self.empty_markers.matches(&message) {
            return Error::NoRecords { message };
        }

        Error::Api {
            status: status.as_u16(),
            message,
        }
    }

    // ── Pagination ───────────────────────────────────────────────────

    /// Fetch one page of `resource`.
    ///
    /// `params` are the already-normalized filter parameters; `page` and
    /// `per_page` are appended here.
    pub async fn fetch_page<T: DeserializeOwned>(
        &self,
        resource: Resource,
        params: &[(String, String)],
        page: u32,
        per_page: u32,
    ) -> Result<RawPage<T>, Error> {
        let mut query = params.to_vec();
        query.push(("page".into(), page.to_string()));
        query.push(("per_page".into(), per_page.to_string()));

        let (status, body) = self.get_text(resource.path(), &query).await?;
        envelope::decode_page(&body, status, page, per_page, &self.empty_markers)
    }

    /// Collect all pages into a single `Vec<T>`.
    ///
    /// Stops at the first page whose hint says there is nothing more, or
    /// when the server reports "no records". Also stops when the server's
    /// page number does not advance, when a page repeats the previous one,
    /// or after [`MAX_PAGES`] pages.
    pub async fn paginate_all<T, F, Fut>(&self, per_page: u32, fetch: F) -> Result<Vec<T>, Error>
    where
        T: PartialEq,
        F: Fn(u32, u32) -> Fut,
        Fut: Future<Output = Result<RawPage<T>, Error>>,
    {
        let mut all: Vec<T> = Vec::new();
        let mut page = 1;
        let mut previous: Option<(u32, usize)> = None;

        loop {
            let raw = match fetch(page, per_page).await {
                Ok(raw) => raw,
                Err(e) if e.is_empty_result() => break,
                Err(e) => return Err(e),
            };

            if let Some((served, len)) = previous {
                let repeated = raw.items.len() == len && all[all.len() - len..] == raw.items[..];
                if raw.page <= served || repeated {
                    warn!(
                        page,
                        served = raw.page,
                        repeated,
                        "server is not advancing pages, stopping"
                    );
                    break;
                }
            }

            let more = raw.has_more_hint() && !raw.items.is_empty();
            previous = Some((raw.page, raw.items.len()));
            all.extend(raw.items);
            if !more {
                break;
            }
            if page >= MAX_PAGES {
                warn!(pages = page, "page limit reached, stopping");
                break;
            }
            page += 1;
        }

        Ok(all)
    }

    /// Fetch every page of `resource` with the given filters.
    pub async fn list_all<T: DeserializeOwned + PartialEq>(
        &self,
        resource: Resource,
        params: &[(String, String)],
    ) -> Result<Vec<T>, Error> {
        self.paginate_all(resource.default_per_page(), move |page, per_page| {
            self.fetch_page(resource, params, page, per_page)
        })
        .await
    }

    // ── Single records ───────────────────────────────────────────────

    pub async fn get_record<T: DeserializeOwned>(
        &self,
        resource: Resource,
        id: &str,
    ) -> Result<T, Error> {
        let (_, body) = self.get_text(&Self::record_path(resource, id), &[]).await?;
        envelope::decode_record(&body)
    }

    pub async fn create_record<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        resource: Resource,
        body: &B,
    ) -> Result<T, Error> {
        self.post(resource.path(), body).await
    }

    pub async fn update_record<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        resource: Resource,
        id: &str,
        body: &B,
    ) -> Result<T, Error> {
        self.put(&Self::record_path(resource, id), body).await
    }

    pub async fn delete_record(&self, resource: Resource, id: &str) -> Result<(), Error> {
        self.delete(&Self::record_path(resource, id)).await
    }
}
