// Copyright 2025 The Drasi Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! URL rewriting for collection documents.
//!
//! Rewrites every endpoint entry of a collection to point at a target
//! authority: the structured `host`/`protocol`/`port` fields are replaced
//! outright, and the leading `scheme://authority/` prefix of the `raw` URL
//! string is swapped for the target. Applied on upload (to the configured
//! canonical authority) and on download (to a caller-supplied domain).

use lazy_static::lazy_static;
use regex::{NoExpand, Regex};

use crate::model::Collection;

lazy_static! {
    /// Leading `scheme://authority/` prefix of a raw URL. Scheme is `http`
    /// or `https`; authority is letters, digits, underscore, colon, dot.
    static ref RAW_URL_PREFIX: Regex =
        Regex::new(r"^http[s]?://[0-9a-zA-Z_:.]+/").expect("invalid raw URL prefix pattern");
}

/// The authority every endpoint entry is rewritten to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetAuthority {
    pub protocol: String,
    pub host: String,
    /// Empty when the authority carries no explicit port.
    pub port: String,
}

impl TargetAuthority {
    pub fn new(
        protocol: impl Into<String>,
        host: impl Into<String>,
        port: impl Into<String>,
    ) -> Self {
        Self {
            protocol: protocol.into(),
            host: host.into(),
            port: port.into(),
        }
    }

    /// Parse a caller-supplied `host[:port]` domain, as passed in the `d`
    /// download query parameter.
    pub fn from_domain(domain: &str, protocol: impl Into<String>) -> Self {
        let (host, port) = match domain.split_once(':') {
            Some((host, port)) => (host, port),
            None => (domain, ""),
        };
        Self::new(protocol, host, port)
    }

    /// The authority as it appears in a URL: `host` or `host:port`.
    pub fn authority(&self) -> String {
        if self.port.is_empty() {
            self.host.clone()
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// The host split on `.` into ordered labels, the representation the
    /// structured `url.host` field uses.
    pub fn host_labels(&self) -> Vec<String> {
        self.host.split('.').map(str::to_string).collect()
    }
}

/// Rewrite every endpoint entry of `collection` to point at `target`.
///
/// The raw URL is only touched when it starts with a recognizable
/// `scheme://authority/` prefix; otherwise it is left as-is.
pub fn rewrite_collection(collection: &mut Collection, target: &TargetAuthority) {
    let replacement = format!("{}://{}/", target.protocol, target.authority());
    let host_labels = target.host_labels();

    for item in &mut collection.items {
        let url = &mut item.request.url;
        url.host = host_labels.clone();
        url.protocol = target.protocol.clone();
        url.port = target.port.clone();
        url.raw = RAW_URL_PREFIX
            .replace(&url.raw, NoExpand(&replacement))
            .into_owned();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CollectionInfo, Item, RequestSpec, UrlSpec};
    use pretty_assertions::assert_eq;

    fn collection_with_raw(raw: &str) -> Collection {
        Collection {
            info: CollectionInfo::default(),
            items: vec![Item {
                name: "entry".to_string(),
                request: RequestSpec {
                    method: "GET".to_string(),
                    url: UrlSpec {
                        raw: raw.to_string(),
                        protocol: "https".to_string(),
                        host: vec!["shop".to_string(), "example".to_string()],
                        path: vec!["order".to_string()],
                        query: serde_json::Value::Null,
                        port: String::new(),
                    },
                    ..RequestSpec::default()
                },
                response: serde_json::Value::Null,
            }],
        }
    }

    #[test]
    fn test_rewrite_sets_structured_fields() {
        let mut collection = collection_with_raw("https://shop.example/order/create");
        let target = TargetAuthority::new("http", "example.com", "8080");

        rewrite_collection(&mut collection, &target);

        let url = &collection.items[0].request.url;
        assert_eq!(url.host, vec!["example", "com"]);
        assert_eq!(url.protocol, "http");
        assert_eq!(url.port, "8080");
        assert_eq!(url.raw, "http://example.com:8080/order/create");
    }

    #[test]
    fn test_rewrite_without_port() {
        let mut collection = collection_with_raw("http://old.host:9999/a/b");
        let target = TargetAuthority::new("https", "shop.example.com", "");

        rewrite_collection(&mut collection, &target);

        let url = &collection.items[0].request.url;
        assert_eq!(url.port, "");
        assert_eq!(url.raw, "https://shop.example.com/a/b");
    }

    #[test]
    fn test_rewrite_leaves_unrecognized_raw_unchanged() {
        let raws = [
            "ftp://example.com/file",
            "/relative/path",
            "example.com/no-scheme",
            "",
        ];
        for raw in raws {
            let mut collection = collection_with_raw(raw);
            let target = TargetAuthority::new("http", "example.com", "");

            rewrite_collection(&mut collection, &target);

            let url = &collection.items[0].request.url;
            assert_eq!(url.raw, raw, "raw URL {raw:?} should not change");
            // Structured fields are still rewritten.
            assert_eq!(url.host, vec!["example", "com"]);
        }
    }

    #[test]
    fn test_rewrite_is_idempotent() {
        let mut once = collection_with_raw("https://shop.example/order/create");
        let target = TargetAuthority::new("http", "example.com", "8080");

        rewrite_collection(&mut once, &target);
        let mut twice = once.clone();
        rewrite_collection(&mut twice, &target);

        let first = &once.items[0].request.url;
        let second = &twice.items[0].request.url;
        assert_eq!(first.raw, second.raw);
        assert_eq!(first.host, second.host);
        assert_eq!(first.protocol, second.protocol);
        assert_eq!(first.port, second.port);
    }

    #[test]
    fn test_from_domain_splits_port() {
        let target = TargetAuthority::from_domain("example.com:8080", "http");
        assert_eq!(target.host, "example.com");
        assert_eq!(target.port, "8080");
        assert_eq!(target.authority(), "example.com:8080");

        let bare = TargetAuthority::from_domain("example.com", "http");
        assert_eq!(bare.host, "example.com");
        assert_eq!(bare.port, "");
        assert_eq!(bare.authority(), "example.com");
    }

    #[test]
    fn test_rewrite_only_touches_leading_prefix() {
        let mut collection =
            collection_with_raw("https://old.example/redirect?to=https://other.example/x");
        let target = TargetAuthority::new("http", "new.example", "");

        rewrite_collection(&mut collection, &target);

        assert_eq!(
            collection.items[0].request.url.raw,
            "http://new.example/redirect?to=https://other.example/x"
        );
    }
}
