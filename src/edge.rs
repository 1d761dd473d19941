//! Event-triggered entry point for CDN edge functions.
//!
//! The request event is accepted and logged, but the fields have no effect on what is fetched
//! or how it is resized: the run is driven by [ResizeConfig] alone.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::info;

use crate::config::ResizeConfig;
use crate::error::ResizeError;
use crate::fetch::Fetch;
use crate::pipeline::{run, ResizeSummary};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EdgeEvent {
    #[serde(rename = "Records")]
    pub records: Vec<EdgeRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EdgeRecord {
    pub cf: CloudFront,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CloudFront {
    pub config: DistributionConfig,
    pub request: EdgeRequest,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DistributionConfig {
    pub distribution_domain_name: String,
    pub distribution_id: String,
    pub event_type: String,
    pub request_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EdgeRequest {
    pub body: Option<RequestBody>,
    pub client_ip: String,
    pub querystring: String,
    pub uri: String,
    pub method: String,
    /// Lower-cased header name to the list of original key/value pairs
    pub headers: HashMap<String, Vec<Header>>,
    pub origin: Option<Origin>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RequestBody {
    pub action: String,
    pub data: String,
    pub encoding: String,
    pub input_truncated: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Header {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Origin {
    pub custom: Option<CustomOrigin>,
    pub s3: Option<S3Origin>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomOrigin {
    pub custom_headers: HashMap<String, Vec<Header>>,
    pub domain_name: String,
    pub keepalive_timeout: u32,
    pub path: String,
    pub port: u16,
    pub protocol: String,
    pub read_timeout: u32,
    pub ssl_protocols: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct S3Origin {
    pub auth_method: String,
    pub custom_headers: HashMap<String, Vec<Header>>,
    pub domain_name: String,
    pub path: String,
    pub region: String,
}

impl EdgeEvent {
    /// Request id of the first record, if there is one
    pub fn request_id(&self) -> Option<&str> {
        self.records
            .first()
            .map(|record| record.cf.config.request_id.as_str())
            .filter(|id| !id.is_empty())
    }
}

/// Runs the pipeline once per event, regardless of the event contents.
pub fn handle(
    event: &EdgeEvent,
    config: &ResizeConfig,
    fetcher: &impl Fetch,
) -> Result<ResizeSummary, ResizeError> {
    info!(
        records = event.records.len(),
        request_id = event.request_id().unwrap_or("-"),
        "edge event received"
    );
    run(config, fetcher)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWER_REQUEST: &str = r#"{
      "Records": [
        {
          "cf": {
            "config": {
              "distributionDomainName": "d111111abcdef8.cloudfront.net",
              "distributionId": "EDFDVBD6EXAMPLE",
              "eventType": "origin-request",
              "requestId": "4TyzHTaYWb1GX1qTfsHhEqV6HUDd_BzoBZnwfnvQc_1oF26ClkoUSEQ=="
            },
            "request": {
              "clientIp": "203.0.113.178",
              "headers": {
                "host": [{ "key": "Host", "value": "d111111abcdef8.cloudfront.net" }],
                "user-agent": [{ "key": "User-Agent", "value": "curl/7.66.0" }]
              },
              "method": "GET",
              "origin": {
                "custom": {
                  "customHeaders": {},
                  "domainName": "example.org",
                  "keepaliveTimeout": 5,
                  "path": "",
                  "port": 443,
                  "protocol": "https",
                  "readTimeout": 30,
                  "sslProtocols": ["TLSv1", "TLSv1.1", "TLSv1.2"]
                }
              },
              "querystring": "",
              "uri": "/"
            }
          }
        }
      ]
    }"#;

    #[test]
    fn parses_origin_request_event() {
        let event: EdgeEvent = serde_json::from_str(VIEWER_REQUEST).unwrap();
        assert_eq!(event.records.len(), 1);
        let request = &event.records[0].cf.request;
        assert_eq!(request.method, "GET");
        assert_eq!(request.headers["user-agent"][0].value, "curl/7.66.0");
        let custom = request.origin.as_ref().unwrap().custom.as_ref().unwrap();
        assert_eq!(custom.port, 443);
        assert_eq!(custom.ssl_protocols.len(), 3);
        assert!(event.request_id().unwrap().starts_with("4TyzHTaYWb1G"));
    }

    #[test]
    fn event_contents_do_not_steer_the_run() {
        use std::cell::RefCell;
        use url::Url;

        use crate::error::ErrorKind;

        struct Recorder(RefCell<Vec<Url>>);
        impl Fetch for Recorder {
            fn fetch(&self, url: &Url) -> Result<Vec<u8>, ResizeError> {
                self.0.borrow_mut().push(url.clone());
                Err(crate::ro_err!(ErrorKind::Network, "offline"))
            }
        }

        let event: EdgeEvent = serde_json::from_str(VIEWER_REQUEST).unwrap();
        let recorder = Recorder(RefCell::new(Vec::new()));
        let config = ResizeConfig::default();
        let err = handle(&event, &config, &recorder).unwrap_err();

        assert_eq!(err.kind, ErrorKind::Network);
        assert_eq!(recorder.0.borrow().as_slice(), &[config.parsed_url().unwrap()]);
    }

    #[test]
    fn empty_event_is_accepted() {
        let event: EdgeEvent = serde_json::from_str("{}").unwrap();
        assert!(event.records.is_empty());
        assert_eq!(event.request_id(), None);
    }
}
