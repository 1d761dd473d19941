use std::time::Duration;

use reqwest::blocking::Client;
use url::Url;

use crate::error::{ErrorKind, ResizeError};
use crate::{ro_err, ro_try};

/// Source of the image bytes.
pub trait Fetch {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>, ResizeError>;
}

/// A single blocking HTTP GET. No custom headers, no retries.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// `None` disables the timeout entirely, the request waits as long as the server does.
    pub fn new(timeout: Option<Duration>) -> Result<Self, ResizeError> {
        let client = ro_try!(ErrorKind::Network, Client::builder().timeout(timeout).build());
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>, ResizeError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| ro_err!(ErrorKind::Network, "GET {url} => {e}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ro_err!(ErrorKind::Network, "GET {url} => HTTP {status}"));
        }

        let body = response
            .bytes()
            .map_err(|e| ro_err!(ErrorKind::Read, "failed to read response body: {e}"))?;
        tracing::debug!(bytes = body.len(), "response body read");
        Ok(body.to_vec())
    }
}
