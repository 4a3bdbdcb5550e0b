use crate::bom_reconciliation::domain::{ReleaseRecord, TrackerLookup};
use crate::ports::outbound::ReleaseRepository;
use crate::shared::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

/// `additionalData` key under which the Fossology upload id is stored
const FOSSOLOGY_UPLOAD_ID_KEY: &str = "fossology_upload_id";

#[derive(Debug, Default, Deserialize)]
struct SearchResponse<T> {
    #[serde(rename = "_embedded", default)]
    embedded: Option<T>,
}

#[derive(Debug, Default, Deserialize)]
struct EmbeddedReleases {
    #[serde(rename = "sw360:releases", default)]
    releases: Vec<Sw360Release>,
}

#[derive(Debug, Default, Deserialize)]
struct EmbeddedComponents {
    #[serde(rename = "sw360:components", default)]
    components: Vec<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Sw360Release {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    component_id: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    version: String,
    #[serde(default)]
    clearing_state: Option<String>,
    #[serde(default, rename = "sourceCodeDownloadurl")]
    source_code_download_url: Option<String>,
    #[serde(default, rename = "binaryDownloadurl")]
    binary_download_url: Option<String>,
    #[serde(default)]
    additional_data: HashMap<String, String>,
    #[serde(rename = "_links", default)]
    links: Option<Value>,
}

impl Sw360Release {
    fn into_record(self) -> ReleaseRecord {
        let link = self
            .links
            .as_ref()
            .and_then(|l| l.pointer("/self/href"))
            .and_then(Value::as_str)
            .map(str::to_string);
        let release_id = self
            .id
            .or_else(|| link.as_deref().and_then(last_path_segment))
            .unwrap_or_default();

        ReleaseRecord {
            release_id,
            component_id: self.component_id,
            name: self.name,
            version: self.version,
            clearing_state: self.clearing_state,
            source_download_url: self.source_code_download_url.filter(|u| !u.is_empty()),
            binary_download_url: self.binary_download_url.filter(|u| !u.is_empty()),
            fossology_upload_id: self
                .additional_data
                .get(FOSSOLOGY_UPLOAD_ID_KEY)
                .filter(|id| !id.is_empty())
                .cloned(),
            link,
        }
    }
}

fn last_path_segment(href: &str) -> Option<String> {
    href.rsplit('/').next().filter(|s| !s.is_empty()).map(str::to_string)
}

/// Purl without its `@version` part, used as the component external id
fn versionless_purl(purl: &str) -> &str {
    let name_start = purl.rfind('/').map(|i| i + 1).unwrap_or(0);
    match purl[name_start..].find('@') {
        Some(at) => &purl[..name_start + at],
        None => purl,
    }
}

/// Sw360ReleaseRepository adapter for the SW360 REST API
///
/// Releases are searched by their `package-url` external id. When no
/// release is registered, the versionless purl is searched among components
/// so the report can tell "component known, release missing" apart from
/// "nothing known".
pub struct Sw360ReleaseRepository {
    client: reqwest::Client,
    base_url: String,
    token: String,
    max_retries: u32,
}

impl Sw360ReleaseRepository {
    /// Creates a client for the SW360 instance at `base_url`
    ///
    /// # Arguments
    /// * `base_url` - Server root, e.g. `https://sw360.example.org`
    /// * `token` - REST token sent as `Authorization: Token <token>`
    pub fn new(base_url: &str, token: String) -> Result<Self> {
        if !base_url.starts_with("https://") && !base_url.starts_with("http://") {
            anyhow::bail!(
                "SW360 URL must start with http:// or https:// (got '{}')",
                base_url
            );
        }

        let user_agent = format!("bom-reconciler/{}", env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            max_retries: 3,
        })
    }

    fn search_url(&self, collection: &str, purl: &str) -> String {
        format!(
            "{}/resource/api/{}/searchByExternalIds?package-url={}",
            self.base_url,
            collection,
            urlencoding::encode(purl)
        )
    }

    async fn get_with_retry(&self, url: &str) -> Result<Value> {
        let mut last_error = anyhow::anyhow!("SW360 request was not attempted");

        for attempt in 1..=self.max_retries {
            match self.get_json(url).await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    tracing::debug!(attempt, url, error = %e, "SW360 request failed");
                    last_error = e;
                    if attempt < self.max_retries {
                        tokio::time::sleep(Duration::from_millis(200 * attempt as u64)).await;
                    }
                }
            }
        }

        Err(last_error)
    }

    async fn get_json(&self, url: &str) -> Result<Value> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::AUTHORIZATION, format!("Token {}", self.token))
            .header(reqwest::header::ACCEPT, "application/hal+json")
            .send()
            .await?;

        let status = response.status();
        // SW360 answers a search without hits with 204 or 404 depending on version
        if status == reqwest::StatusCode::NO_CONTENT || status == reqwest::StatusCode::NOT_FOUND {
            return Ok(Value::Null);
        }
        if !status.is_success() {
            anyhow::bail!("SW360 API returned status code {}", status);
        }

        Ok(response.json().await?)
    }

    async fn find_release(&self, purl: &str) -> Result<Option<ReleaseRecord>> {
        let value = self.get_with_retry(&self.search_url("releases", purl)).await?;
        Ok(parse_release_search(value)?)
    }

    async fn component_exists(&self, purl: &str) -> Result<bool> {
        let url = self.search_url("components", versionless_purl(purl));
        let value = self.get_with_retry(&url).await?;
        Ok(parse_component_search(value)?)
    }
}

fn parse_release_search(value: Value) -> serde_json::Result<Option<ReleaseRecord>> {
    if value.is_null() {
        return Ok(None);
    }
    let response: SearchResponse<EmbeddedReleases> = serde_json::from_value(value)?;
    Ok(response
        .embedded
        .and_then(|e| e.releases.into_iter().next())
        .map(Sw360Release::into_record))
}

fn parse_component_search(value: Value) -> serde_json::Result<bool> {
    if value.is_null() {
        return Ok(false);
    }
    let response: SearchResponse<EmbeddedComponents> = serde_json::from_value(value)?;
    Ok(response.embedded.is_some_and(|e| !e.components.is_empty()))
}

#[async_trait]
impl ReleaseRepository for Sw360ReleaseRepository {
    async fn lookup_release(&self, purl: &str) -> Result<TrackerLookup> {
        if let Some(release) = self.find_release(purl).await? {
            return Ok(TrackerLookup {
                component_exists: true,
                release: Some(release),
            });
        }

        Ok(TrackerLookup {
            component_exists: self.component_exists(purl).await?,
            release: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_client_creation() {
        let client = Sw360ReleaseRepository::new("https://sw360.example.org/", "t".to_string());
        assert!(client.is_ok());
        assert_eq!(client.unwrap().base_url, "https://sw360.example.org");
    }

    #[test]
    fn test_client_rejects_url_without_scheme() {
        let result = Sw360ReleaseRepository::new("sw360.example.org", "t".to_string());
        assert!(result.is_err());
    }

    #[test]
    fn test_search_url_encodes_purl() {
        let client = Sw360ReleaseRepository::new("https://sw360.example.org", "t".to_string()).unwrap();
        assert_eq!(
            client.search_url("releases", "pkg:npm/@babel/core@7.0.0"),
            "https://sw360.example.org/resource/api/releases/searchByExternalIds?package-url=pkg%3Anpm%2F%40babel%2Fcore%407.0.0"
        );
    }

    #[test]
    fn test_versionless_purl() {
        assert_eq!(versionless_purl("pkg:npm/lodash@4.17.21"), "pkg:npm/lodash");
        assert_eq!(versionless_purl("pkg:npm/@babel/core@7.0.0"), "pkg:npm/@babel/core");
        assert_eq!(versionless_purl("pkg:npm/lodash"), "pkg:npm/lodash");
    }

    #[test]
    fn test_parse_release_search() {
        let value = json!({
            "_embedded": {
                "sw360:releases": [{
                    "name": "lodash",
                    "version": "4.17.21",
                    "clearingState": "APPROVED",
                    "sourceCodeDownloadurl": "https://github.com/lodash/lodash/archive/4.17.21.tar.gz",
                    "binaryDownloadurl": "",
                    "additionalData": { "fossology_upload_id": "118" },
                    "_links": { "self": { "href": "https://sw360.example.org/resource/api/releases/abc123" } }
                }]
            }
        });

        let record = parse_release_search(value).unwrap().unwrap();
        assert_eq!(record.release_id, "abc123");
        assert_eq!(record.clearing_state.as_deref(), Some("APPROVED"));
        assert!(record.binary_download_url.is_none());
        assert_eq!(record.fossology_upload_id.as_deref(), Some("118"));
        assert!(record.is_approved());
    }

    #[test]
    fn test_parse_empty_searches() {
        assert!(parse_release_search(Value::Null).unwrap().is_none());
        assert!(parse_release_search(json!({})).unwrap().is_none());
        assert!(!parse_component_search(json!({"_embedded": {"sw360:components": []}})).unwrap());
        assert!(parse_component_search(json!({"_embedded": {"sw360:components": [{"name": "lodash"}]}})).unwrap());
    }
}
