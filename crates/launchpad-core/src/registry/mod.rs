//! Package registry access and version selection
//!
//! This module provides:
//! - A registry client for package metadata documents
//! - The version resolver (fetch, filter pre-release channels, sort)
//! - The version selector (two newest major lines, three releases each)

pub mod client;
pub mod version;

pub use client::{Packument, RegistryClient};
pub use version::{
    filter_and_sort, is_prerelease_channel, select_recent_versions, VersionRecord,
    MAJOR_LINES_SHOWN, RELEASES_PER_MAJOR,
};

use tracing::{debug, error};

/// Fetch every published version of `package`, minus `rc`/`canary` builds,
/// newest first.
///
/// A failed query is logged and yields an empty list; callers treat an
/// empty result as "no versions available".
pub async fn resolve_versions(client: &RegistryClient, package: &str) -> Vec<VersionRecord> {
    match client.fetch_packument(package).await {
        Ok(packument) => {
            let records = filter_and_sort(packument.version_records());
            debug!(package, count = records.len(), "resolved versions");
            records
        }
        Err(e) => {
            error!(package, "failed to fetch versions: {:#}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn packument_body() -> serde_json::Value {
        serde_json::json!({
            "name": "create-next-app",
            "versions": {
                "13.5.6": {}, "14.0.0": {}, "14.2.3": {}, "14.2.4-canary.1": {},
                "15.0.0-rc.0": {}, "15.0.1": {}, "15.0.2": {}
            },
            "time": {
                "created": "2016-10-25T00:00:00.000Z",
                "modified": "2024-11-01T00:00:00.000Z",
                "13.5.6": "2023-10-18T00:00:00.000Z",
                "14.0.0": "2023-10-26T00:00:00.000Z",
                "14.2.3": "2024-04-24T00:00:00.000Z",
                "14.2.4-canary.1": "2024-04-25T00:00:00.000Z",
                "15.0.0-rc.0": "2024-05-23T00:00:00.000Z",
                "15.0.1": "2024-10-22T00:00:00.000Z",
                "15.0.2": "2024-10-29T00:00:00.000Z"
            }
        })
    }

    #[tokio::test]
    async fn test_resolve_versions_filters_and_sorts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/create-next-app"))
            .respond_with(ResponseTemplate::new(200).set_body_json(packument_body()))
            .mount(&server)
            .await;

        let client = RegistryClient::new(server.uri().parse().unwrap(), "launchpad-test");
        let records = resolve_versions(&client, "create-next-app").await;
        let versions: Vec<&str> = records.iter().map(|r| r.version.as_str()).collect();

        assert_eq!(versions, ["15.0.2", "15.0.1", "14.2.3", "14.0.0", "13.5.6"]);
        assert_eq!(records[2].published.as_deref(), Some("2024-04-24T00:00:00.000Z"));
    }

    #[tokio::test]
    async fn test_resolve_versions_http_error_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = RegistryClient::new(server.uri().parse().unwrap(), "launchpad-test");
        assert!(resolve_versions(&client, "create-next-app").await.is_empty());
    }

    #[tokio::test]
    async fn test_resolve_versions_malformed_body_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let client = RegistryClient::new(server.uri().parse().unwrap(), "launchpad-test");
        assert!(resolve_versions(&client, "nuxi").await.is_empty());
    }

    #[tokio::test]
    async fn test_scoped_package_is_one_path_segment() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/@angular%2Fcli"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "versions": { "17.3.0": {}, "18.0.1": {} },
                "time": {}
            })))
            .mount(&server)
            .await;

        let client = RegistryClient::new(server.uri().parse().unwrap(), "launchpad-test");
        let records = resolve_versions(&client, "@angular/cli").await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].version, "18.0.1");
        assert!(records[0].published.is_none());
    }
}
