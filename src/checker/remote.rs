// src/checker/remote.rs
// =============================================================================
// This module checks remote URLs over HTTP.
//
// The policy is deliberately minimal:
// - a single GET per URL, default client settings, no retry
// - redirects follow the client default; a chain that ends in 200 is fine
// - only a final status of exactly 200 counts as alive
//
// GitHub gets special treatment: it rate-limits unauthenticated clients
// aggressively (HTTP 429), so every request to a github.com host is
// preceded by a short unconditional pause. Checking is sequential, so the
// pause paces the whole run.
//
// The RemoteCheck trait is the seam the validator is tested through - the
// tests swap in a canned double instead of a live client.
// =============================================================================

use std::time::Duration;

use anyhow::Result;
use reqwest::Client;
use url::Url;

// Hosts containing this substring get a courtesy pause before each request.
const RATE_LIMITED_HOST: &str = "github.com";

// Fixed pause per rate-limited request, not adaptive.
const COURTESY_DELAY: Duration = Duration::from_millis(500);

// A source of HTTP status codes for URLs.
//
// Err means the request never produced a status at all (DNS failure,
// refused connection, timeout); the validator maps that to a broken link
// just like a non-200 status.
pub trait RemoteCheck {
    async fn status(&self, url: &str) -> Result<u16>;
}

// The real implementation, backed by reqwest.
pub struct HttpChecker {
    client: Client,
}

impl HttpChecker {
    pub fn new() -> Self {
        HttpChecker {
            client: Client::new(),
        }
    }
}

impl RemoteCheck for HttpChecker {
    async fn status(&self, url: &str) -> Result<u16> {
        if is_rate_limited_host(url) {
            tokio::time::sleep(COURTESY_DELAY).await;
        }

        let response = self.client.get(url).send().await?;
        Ok(response.status().as_u16())
    }
}

// True iff the URL's host contains the rate-limited domain.
fn is_rate_limited_host(url: &str) -> bool {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(|host| host.contains(RATE_LIMITED_HOST)))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_github_hosts_are_rate_limited() {
        assert!(is_rate_limited_host("https://github.com/org/repo"));
        assert!(is_rate_limited_host("https://api.github.com/repos/org/repo"));
    }

    #[test]
    fn test_match_is_on_the_host_not_the_path() {
        assert!(!is_rate_limited_host("https://example.com/github.com/mirror"));
    }

    #[test]
    fn test_other_hosts_are_not_rate_limited() {
        assert!(!is_rate_limited_host("https://example.com/page"));
        assert!(!is_rate_limited_host("not a url"));
    }
}
