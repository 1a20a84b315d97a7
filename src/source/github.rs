//! GitHub source implementation.

use anyhow::{Result, bail};
use async_trait::async_trait;
use log::debug;

use crate::http::HttpClient;

use super::{Release, ReleaseAsset, ReleaseSource};

/// GitHub API response types (internal).
mod api {
    use serde::Deserialize;

    #[derive(Deserialize, Debug)]
    pub struct Release {
        pub tag_name: String,
        pub assets: Vec<Asset>,
    }

    #[derive(Deserialize, Debug)]
    pub struct Asset {
        #[serde(default)]
        pub name: Option<String>,
        #[serde(default)]
        pub browser_download_url: Option<String>,
    }
}

/// Reads the latest release of one repository from the GitHub REST API.
pub struct GitHubSource {
    http_client: HttpClient,
    api_url: String,
    repo: String,
}

impl GitHubSource {
    /// Create from an existing HttpClient. `repo` is in `owner/name` form.
    pub fn from_http_client(http_client: HttpClient, api_url: &str, repo: &str) -> Self {
        Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
            repo: repo.to_string(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn latest_release_url(&self) -> String {
        format!("{}/repos/{}/releases/latest", self.api_url, self.repo)
    }
}

#[async_trait]
impl ReleaseSource for GitHubSource {
    #[tracing::instrument(skip(self))]
    async fn latest_release(&self) -> Result<Release> {
        let url = self.latest_release_url();
        debug!("Fetching latest release from {}...", url);

        let release: api::Release = self.http_client.get_json(&url).await?;
        if release.tag_name.trim().is_empty() {
            bail!("Latest release from {} has an empty tag_name", url);
        }

        debug!(
            "Latest release is {} with {} asset(s)",
            release.tag_name,
            release.assets.len()
        );
        Ok(release.into())
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_text(&self, url: &str) -> Result<String> {
        self.http_client.get_text(url).await
    }
}

impl From<api::Release> for Release {
    fn from(r: api::Release) -> Self {
        Release {
            tag: r.tag_name,
            assets: r.assets.into_iter().map(|a| a.into()).collect(),
        }
    }
}

impl From<api::Asset> for ReleaseAsset {
    fn from(a: api::Asset) -> Self {
        ReleaseAsset {
            name: a.name.unwrap_or_default(),
            download_url: a.browser_download_url.filter(|url| !url.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::FetchError;
    use reqwest::Client;

    const LATEST_PATH: &str = "/repos/OpenCortexIDE/cortexide-binaries/releases/latest";

    fn source_for(url: &str) -> GitHubSource {
        GitHubSource::from_http_client(
            HttpClient::new(Client::new()),
            url,
            "OpenCortexIDE/cortexide-binaries",
        )
    }

    #[test]
    fn test_latest_release_url_trims_trailing_slash() {
        let source = source_for("https://api.github.com/");
        assert_eq!(source.api_url(), "https://api.github.com");
        assert_eq!(
            source.latest_release_url(),
            "https://api.github.com/repos/OpenCortexIDE/cortexide-binaries/releases/latest"
        );
    }

    #[test]
    fn test_release_conversion() {
        let api_release = api::Release {
            tag_name: "v2.0.0".into(),
            assets: vec![
                api::Asset {
                    name: Some("cortexide_2.0.0_amd64.deb".into()),
                    browser_download_url: Some("https://example.com/asset".into()),
                },
                api::Asset {
                    name: Some("broken".into()),
                    browser_download_url: Some(String::new()),
                },
            ],
        };

        let release: Release = api_release.into();
        assert_eq!(release.tag, "v2.0.0");
        assert_eq!(release.assets.len(), 2);
        assert_eq!(release.assets[0].name, "cortexide_2.0.0_amd64.deb");
        assert_eq!(release.assets[1].download_url, None);
    }

    #[tokio::test]
    async fn test_latest_release_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", LATEST_PATH)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "tag_name": "2.0.0",
                    "assets": [
                        {"name": "CortexIDE-linux-x64-2.0.0.tar.gz", "browser_download_url": "https://example.com/a.tar.gz"},
                        {"name": "notes.txt", "browser_download_url": null}
                    ]
                }"#,
            )
            .create_async()
            .await;

        let release = source_for(&server.url()).latest_release().await.unwrap();

        mock.assert_async().await;
        assert_eq!(release.tag, "2.0.0");
        assert_eq!(
            release.assets,
            vec![
                ReleaseAsset::new(
                    "CortexIDE-linux-x64-2.0.0.tar.gz",
                    "https://example.com/a.tar.gz"
                ),
                ReleaseAsset {
                    name: "notes.txt".into(),
                    download_url: None,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_latest_release_keeps_assets_next_to_null_name() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", LATEST_PATH)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "tag_name": "2.0.0",
                    "assets": [
                        {"name": null, "browser_download_url": "https://example.com/unnamed"},
                        {"name": "cortexide_2.0.0_amd64.deb", "browser_download_url": "https://example.com/a.deb"}
                    ]
                }"#,
            )
            .create_async()
            .await;

        let release = source_for(&server.url()).latest_release().await.unwrap();

        assert_eq!(release.assets.len(), 2);
        assert_eq!(release.assets[0].name, "");

        let options = crate::links::classify_linux_assets(&release.assets);
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].id, "deb-amd64");
        assert_eq!(options[0].url, "https://example.com/a.deb");
    }

    #[tokio::test]
    async fn test_latest_release_forbidden() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", LATEST_PATH)
            .with_status(403)
            .create_async()
            .await;

        let err = source_for(&server.url())
            .latest_release()
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<FetchError>(),
            Some(FetchError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn test_latest_release_missing_tag_is_error() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", LATEST_PATH)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"assets": []}"#)
            .create_async()
            .await;

        assert!(source_for(&server.url()).latest_release().await.is_err());
    }

    #[tokio::test]
    async fn test_latest_release_empty_tag_is_error() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", LATEST_PATH)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"tag_name": "  ", "assets": []}"#)
            .create_async()
            .await;

        let err = source_for(&server.url())
            .latest_release()
            .await
            .unwrap_err();
        assert!(err.to_string().contains("empty tag_name"));
    }

    #[tokio::test]
    async fn test_fetch_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/main/latest.txt")
            .with_status(200)
            .with_body("1.99.30050")
            .create_async()
            .await;

        let body = source_for("https://api.github.com")
            .fetch_text(&format!("{}/main/latest.txt", server.url()))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(body, "1.99.30050");
    }
}
