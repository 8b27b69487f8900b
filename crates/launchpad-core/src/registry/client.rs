//! HTTP client for the package registry

use super::version::VersionRecord;
use crate::product::ProductConfig;
use anyhow::{Context, Result};
use serde::de::IgnoredAny;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;
use url::Url;

/// The parts of a registry package document this tool reads
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Packument {
    /// Every published version, keyed by version string
    #[serde(default)]
    pub versions: HashMap<String, IgnoredAny>,

    /// Publish timestamps keyed by version (plus `created`/`modified`)
    #[serde(default)]
    pub time: HashMap<String, String>,
}

impl Packument {
    /// Pair each published version with its publish timestamp
    pub fn version_records(&self) -> Vec<VersionRecord> {
        self.versions
            .keys()
            .map(|version| VersionRecord {
                version: version.clone(),
                published: self.time.get(version).cloned(),
            })
            .collect()
    }
}

/// Read-only client for a package registry
pub struct RegistryClient {
    base_url: Url,
    client: reqwest::Client,
}

impl RegistryClient {
    /// Create a new client with a custom user agent
    pub fn new(base_url: Url, user_agent: &str) -> Self {
        Self {
            base_url,
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Create a client from a product config, honoring the URL override env var
    pub fn from_config<C: ProductConfig>(config: &C) -> Result<Self> {
        let url_str = std::env::var(config.registry_url_env())
            .unwrap_or_else(|_| config.default_registry_url().to_string());
        let url =
            Url::parse(&url_str).with_context(|| format!("Invalid registry URL: {}", url_str))?;
        Ok(Self::new(url, config.user_agent()))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build a URL by appending a path segment, preserving query parameters
    ///
    /// Scoped names such as `@angular/cli` stay one segment (`@angular%2Fcli`).
    fn build_url(base: &Url, path_segment: &str) -> Result<Url> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("URL cannot have path segments: {}", base))?
            .pop_if_empty()
            .push(path_segment);
        Ok(url)
    }

    /// Fetch the metadata document for a package
    pub async fn fetch_packument(&self, package: &str) -> Result<Packument> {
        let url = Self::build_url(&self.base_url, package)?;
        debug!(%url, "fetching package metadata");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to fetch package metadata from {}", url))?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Failed to fetch package metadata from {}: HTTP {}",
                url,
                response.status()
            );
        }

        let content = response.text().await?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse package metadata for {}", package))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_appends_package() {
        let base = Url::parse("https://registry.npmjs.org").unwrap();
        let url = RegistryClient::build_url(&base, "nuxi").unwrap();
        assert_eq!(url.as_str(), "https://registry.npmjs.org/nuxi");
    }

    #[test]
    fn test_build_url_encodes_scoped_package() {
        let base = Url::parse("https://registry.npmjs.org/").unwrap();
        let url = RegistryClient::build_url(&base, "@nestjs/cli").unwrap();
        assert_eq!(url.as_str(), "https://registry.npmjs.org/@nestjs%2Fcli");
    }

    #[test]
    fn test_build_url_keeps_mirror_prefix_and_query() {
        let base = Url::parse("https://mirror.example.com/npm/?token=abc").unwrap();
        let url = RegistryClient::build_url(&base, "create-vue").unwrap();
        assert_eq!(
            url.as_str(),
            "https://mirror.example.com/npm/create-vue?token=abc"
        );
    }

    #[test]
    fn test_version_records_skip_time_bookkeeping_keys() {
        let packument: Packument = serde_json::from_str(
            r#"{
                "versions": { "1.0.0": { "name": "x" } },
                "time": { "created": "2020-01-01", "modified": "2021-01-01", "1.0.0": "2020-02-02" }
            }"#,
        )
        .unwrap();

        let records = packument.version_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].version, "1.0.0");
        assert_eq!(records[0].published.as_deref(), Some("2020-02-02"));
    }
}
