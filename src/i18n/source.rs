use crate::i18n::{Region, TranslationDictionary};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::debug;

/// Where region dictionaries come from.
///
/// Implementations report every failure as an error; falling back to the
/// built-in dictionary is the caller's job. No retries are attempted.
#[allow(async_fn_in_trait)]
pub trait TranslationSource {
    async fn fetch(&self, region: Region) -> Result<TranslationDictionary>;
}

/// Fetch dictionaries over HTTP from `{base_url}/components/{file}`
#[derive(Debug, Clone)]
pub struct HttpTranslationSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTranslationSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Full URL of a region's dictionary
    pub fn url_for(&self, region: Region) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            region.resource_path()
        )
    }
}

impl TranslationSource for HttpTranslationSource {
    async fn fetch(&self, region: Region) -> Result<TranslationDictionary> {
        let url = self.url_for(region);
        debug!("Fetching {} dictionary from {}", region, url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to request {}", url))?;

        if !response.status().is_success() {
            let status = response.status();
            anyhow::bail!("Dictionary request for {} failed ({})", url, status);
        }

        let dictionary: TranslationDictionary = response
            .json()
            .await
            .with_context(|| format!("Failed to decode dictionary from {}", url))?;

        Ok(dictionary)
    }
}

/// Read dictionaries from a local site root, `{root}/components/{file}`
#[derive(Debug, Clone)]
pub struct FileTranslationSource {
    root: PathBuf,
}

impl FileTranslationSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, region: Region) -> PathBuf {
        self.root.join(region.resource_path())
    }
}

impl TranslationSource for FileTranslationSource {
    async fn fetch(&self, region: Region) -> Result<TranslationDictionary> {
        let path = self.path_for(region);
        debug!("Reading {} dictionary from {}", region, path.display());

        let content = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;

        TranslationDictionary::from_json(&content)
            .with_context(|| format!("Failed to decode dictionary in {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    // ==================== HttpTranslationSource Tests ====================

    #[test]
    fn test_url_for_trims_trailing_slash() {
        let source = HttpTranslationSource::new("https://example.com/intro/");
        assert_eq!(
            source.url_for(Region::MY),
            "https://example.com/intro/components/i18n-zh-my.json"
        );
    }

    #[tokio::test]
    async fn test_http_fetch_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/components/i18n-zh-my.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "greeting": "Hai, apa khabar" })),
            )
            .mount(&mock_server)
            .await;

        let source = HttpTranslationSource::new(mock_server.uri());
        let dict = source.fetch(Region::MY).await.expect("Should fetch");
        assert_eq!(dict.get("greeting"), Some("Hai, apa khabar"));
    }

    #[tokio::test]
    async fn test_http_fetch_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/components/i18n-zh-sg.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let source = HttpTranslationSource::new(mock_server.uri());
        let err = source.fetch(Region::SG).await.unwrap_err();
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn test_http_fetch_malformed_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/components/i18n-zh-sg.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let source = HttpTranslationSource::new(mock_server.uri());
        assert!(source.fetch(Region::SG).await.is_err());
    }

    // ==================== FileTranslationSource Tests ====================

    #[tokio::test]
    async fn test_file_fetch_success() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let components = temp_dir.path().join("components");
        std::fs::create_dir_all(&components).unwrap();
        std::fs::write(components.join("i18n-zh-sg.json"), r#"{"or": "或者"}"#).unwrap();

        let source = FileTranslationSource::new(temp_dir.path());
        let dict = source.fetch(Region::SG).await.expect("Should read");
        assert_eq!(dict.get("or"), Some("或者"));
    }

    #[tokio::test]
    async fn test_file_fetch_missing() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let source = FileTranslationSource::new(temp_dir.path());

        let err = source.fetch(Region::MY).await.unwrap_err();
        assert!(err.to_string().contains("i18n-zh-my.json"));
    }
}
