//! HTTP transport for catalog requests.
//!
//! Catalog clients talk to the network only through [`HttpClient`] so tests
//! can swap in [`MockClient`].

mod client;
mod rate_limiter;

pub use client::{HttpClient, MockClient, MockResponse, ReqwestClient, ReqwestClientBuilder};
pub use rate_limiter::RateLimiter;

/// Host part of a URL, used as the rate limiting key.
pub(crate) fn host_of(url: &str) -> Option<String> {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()))
}
