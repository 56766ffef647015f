//! HTTP transport shared by all remote adapters.
//!
//! Every call goes to `[api] base_url` from the console config, carries the
//! bearer token when there is one and is raced against the configured
//! timeout. Failures are mapped onto `SyncError`.

use futures::future::{select, Either};
use gloo_net::http::{Request, RequestBuilder};
use gloo_timers::future::TimeoutFuture;
use serde::de::DeserializeOwned;
use serde::Serialize;
use view_model::SyncError;

use crate::shared::config::config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// Build a full API URL from a path like "/stores/123"
pub fn api_url(path: &str) -> String {
    format!("{}{}", config().api.base_url.trim_end_matches('/'), path)
}

/// Encodes a path segment (ids come from the server but are not trusted).
pub fn segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

/// Appends a serde_qs query string; `None` fields are skipped by the DTO.
pub fn with_query<Q: Serialize>(path: &str, query: &Q) -> String {
    match serde_qs::to_string(query) {
        Ok(qs) if !qs.is_empty() => format!("{}?{}", path, qs),
        Ok(_) => path.to_string(),
        Err(e) => {
            log::warn!("Failed to encode query for {}: {}", path, e);
            path.to_string()
        }
    }
}

fn builder(method: HttpMethod, url: &str) -> RequestBuilder {
    match method {
        HttpMethod::Get => Request::get(url),
        HttpMethod::Post => Request::post(url),
        HttpMethod::Put => Request::put(url),
        HttpMethod::Delete => Request::delete(url),
    }
}

async fn send<B: Serialize>(
    method: HttpMethod,
    url: &str,
    body: Option<&B>,
    token: Option<&str>,
) -> Result<(u16, String), SyncError> {
    let mut request = builder(method, url).header("Content-Type", "application/json");
    if let Some(token) = token.filter(|t| !t.is_empty()) {
        request = request.header("Authorization", &format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => request
            .json(body)
            .map_err(|e| SyncError::Validation(format!("Failed to serialize request: {}", e)))?,
        None => request
            .build()
            .map_err(|e| SyncError::Network(format!("Failed to build request: {}", e)))?,
    };

    let response = request.send().await.map_err(|e| {
        SyncError::Network(format!(
            "Unable to connect to the server. Please check if the backend is running. ({})",
            e
        ))
    })?;
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| SyncError::Network(format!("Failed to read response: {}", e)))?;
    Ok((status, text))
}

/// Sends a request and decodes the JSON body of a 2xx response.
pub async fn request_json<B, T>(
    method: HttpMethod,
    path: &str,
    body: Option<&B>,
    token: Option<&str>,
) -> Result<T, SyncError>
where
    B: Serialize,
    T: DeserializeOwned,
{
    let url = api_url(path);
    let timeout_ms = config().api.request_timeout_ms;
    log::debug!("{:?} {}", method, url);

    let request = Box::pin(send(method, &url, body, token));
    let (status, text) = match select(request, Box::pin(TimeoutFuture::new(timeout_ms))).await {
        Either::Left((result, _)) => result?,
        Either::Right(_) => {
            log::warn!("{:?} {} timed out after {}ms", method, url, timeout_ms);
            return Err(SyncError::Network(format!(
                "Request timed out after {} ms",
                timeout_ms
            )));
        }
    };

    if !(200..300).contains(&status) {
        let error = SyncError::from_status(status, &text);
        log::warn!("{:?} {} -> {}: {}", method, url, status, error);
        return Err(error);
    }

    // empty 2xx bodies (204 on delete) decode as an empty object
    let body = if text.trim().is_empty() { "{}" } else { text.as_str() };
    serde_json::from_str::<T>(body).map_err(|e| SyncError::Server {
        status,
        message: format!("Failed to parse response: {}", e),
    })
}

/// `request_json` for calls without a body.
pub async fn get_json<T: DeserializeOwned>(path: &str, token: Option<&str>) -> Result<T, SyncError> {
    request_json::<(), T>(HttpMethod::Get, path, None, token).await
}
