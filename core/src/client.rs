//! Request/response engine shared by every resource method.
//!
//! # Design
//! `ShippoClient` holds an immutable `ClientConfig` and a `Transport`; it
//! carries no state between calls. Each operation is one of two shapes:
//! - `call_one`: one exchange, one decoded JSON object.
//! - `call_list`: walk a paginated endpoint, handing every raw item to a
//!   callback and following `next` until the server stops sending it.
//!
//! Status codes outside `[200, 300)` are rejected before the body is decoded,
//! so an error page never masquerades as a deserialization failure.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ApiError, BoxError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::list::ListEnvelope;
use crate::transport::{Transport, UreqTransport};

/// Scheme prefix of the `Authorization` header.
pub const AUTH_SCHEME: &str = "ShippoToken";

/// Placeholder for `input` on bodyless calls.
pub const NO_BODY: Option<&'static ()> = None;

/// Synchronous client for the Shippo API.
///
/// Cheap to share across threads: every call builds its own request and, with
/// the default transport, opens its own connection.
#[derive(Debug, Clone)]
pub struct ShippoClient<T = UreqTransport> {
    config: ClientConfig,
    transport: T,
}

impl ShippoClient<UreqTransport> {
    /// Client for the production API using `token`.
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_config(ClientConfig::new(token))
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }
}

impl<T: Transport> ShippoClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the request for `url` with the fixed JSON and auth headers.
    pub fn build_request<I>(
        &self,
        method: HttpMethod,
        url: &str,
        input: Option<&I>,
    ) -> Result<HttpRequest>
    where
        I: Serialize + ?Sized,
    {
        let body = input
            .map(serde_json::to_string)
            .transpose()
            .map_err(ApiError::Serialization)?;

        url::Url::parse(url).map_err(|source| ApiError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        Ok(HttpRequest {
            method,
            url: url.to_string(),
            headers: vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                ("Accept".to_string(), "application/json".to_string()),
                (
                    "Authorization".to_string(),
                    format!("{AUTH_SCHEME} {}", self.config.token),
                ),
                ("Connection".to_string(), "close".to_string()),
            ],
            body,
        })
    }

    /// Perform one exchange against an absolute `url`.
    ///
    /// The status code is returned as-is; classifying it is up to the caller.
    pub fn execute<I>(&self, method: HttpMethod, url: &str, input: Option<&I>) -> Result<HttpResponse>
    where
        I: Serialize + ?Sized,
    {
        let request = self.build_request(method, url, input)?;
        debug!(%method, url, "sending request");
        self.transport.send(&request)
    }

    /// Single-object call: `base_url + path`, one request, one decoded output.
    pub fn call_one<I, O>(&self, method: HttpMethod, path: &str, input: Option<&I>) -> Result<O>
    where
        I: Serialize + ?Sized,
        O: DeserializeOwned,
    {
        let url = format!("{}{path}", self.config.base_url);
        let response = self.execute(method, &url, input)?;
        check_status(&response)?;
        decode(&response)
    }

    /// Paginated call: hands every item of every page to `on_item`, in order.
    ///
    /// The first error from `on_item` stops the walk: later items on the same
    /// page are skipped and no further pages are requested. Items already
    /// handed out are not revisited.
    pub fn call_list<I, F, E>(
        &self,
        method: HttpMethod,
        path: &str,
        input: Option<&I>,
        mut on_item: F,
    ) -> Result<()>
    where
        I: Serialize + ?Sized,
        F: FnMut(Value) -> std::result::Result<(), E>,
        E: Into<BoxError>,
    {
        let mut next_url = Some(first_page_url(
            &self.config.base_url,
            path,
            self.config.page_size,
        ));
        let mut page = 0usize;

        while let Some(url) = next_url.take() {
            if let Some(limit) = self.config.max_pages {
                if page >= limit {
                    warn!(limit, url = %url, "stopping pagination at page limit");
                    return Err(ApiError::PageLimitExceeded { limit });
                }
            }
            page += 1;

            let response = self.execute(method, &url, input)?;
            check_status(&response)?;
            let envelope: ListEnvelope = decode(&response)?;
            debug!(
                page,
                items = envelope.results.len(),
                has_next = envelope.next.is_some(),
                "fetched list page"
            );

            for item in envelope.results {
                on_item(item).map_err(|err| ApiError::Callback(err.into()))?;
            }

            next_url = envelope.next;
        }

        Ok(())
    }

    /// Collect every item of a `GET` list endpoint, decoded as `O`.
    pub fn list_all<O>(&self, path: &str) -> Result<Vec<O>>
    where
        O: DeserializeOwned,
    {
        let mut items = Vec::new();
        self.for_each(path, |item: O| {
            items.push(item);
            Ok::<_, BoxError>(())
        })?;
        Ok(items)
    }

    /// Decode each item of a `GET` list endpoint as `O` and pass it to `f`.
    pub fn for_each<O, F, E>(&self, path: &str, mut f: F) -> Result<()>
    where
        O: DeserializeOwned,
        F: FnMut(O) -> std::result::Result<(), E>,
        E: Into<BoxError>,
    {
        self.call_list(HttpMethod::Get, path, NO_BODY, |raw| -> std::result::Result<(), BoxError> {
            let item: O = serde_json::from_value(raw)?;
            f(item).map_err(Into::into)
        })
    }
}

fn first_page_url(base_url: &str, path: &str, page_size: usize) -> String {
    let separator = if path.contains('?') { '&' } else { '?' };
    format!("{base_url}{path}{separator}results={page_size}")
}

fn check_status(response: &HttpResponse) -> Result<()> {
    if response.is_success() {
        Ok(())
    } else {
        Err(ApiError::HttpStatus {
            status: response.status,
        })
    }
}

/// Decode a response body. Only a zero-length body is read as JSON `null`.
fn decode<O: DeserializeOwned>(response: &HttpResponse) -> Result<O> {
    let body = if response.body.is_empty() {
        "null"
    } else {
        response.body.as_str()
    };
    serde_json::from_str(body).map_err(|source| ApiError::Deserialization {
        status: response.status,
        source,
    })
}
