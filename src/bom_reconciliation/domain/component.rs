use super::property::{names, parse_bool, Property};
use super::purl::normalize_purl;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// CycloneDX 1.6 component classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Classification {
    Application,
    Framework,
    #[default]
    Library,
    Container,
    Platform,
    OperatingSystem,
    Device,
    DeviceDriver,
    Firmware,
    File,
    MachineLearningModel,
    Data,
    CryptographicAsset,
}

/// A software component in a BOM.
///
/// Identity is `(name, version, purl)`; deduplication uses `(name, version)`.
/// CycloneDX fields this tool does not interpret (licenses, hashes, external
/// references, ...) are carried in `extra` so a baseline BOM round-trips.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Component {
    #[serde(rename = "type", default)]
    pub component_type: Classification,
    #[serde(rename = "bom-ref", default, skip_serializing_if = "Option::is_none")]
    pub bom_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purl: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Property>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Component {
    /// Creates a library component whose bom-ref is its purl
    pub fn new(name: impl Into<String>, version: impl Into<String>, purl: impl Into<String>) -> Self {
        let purl = purl.into();
        let purl = (!purl.is_empty()).then_some(purl);
        Self {
            bom_ref: purl.clone(),
            name: name.into(),
            version: version.into(),
            purl,
            ..Self::default()
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    pub fn purl_str(&self) -> &str {
        self.purl.as_deref().unwrap_or("")
    }

    pub fn bom_ref_str(&self) -> &str {
        self.bom_ref.as_deref().unwrap_or("")
    }

    /// Key used to deduplicate components within one BOM
    pub fn identity_key(&self) -> (String, String) {
        (self.name.clone(), self.version.clone())
    }

    /// `group/name` when a distinct group is set, otherwise `name`
    pub fn display_name(&self) -> String {
        match self.group.as_deref() {
            Some(group) if !group.is_empty() && group != self.name => {
                format!("{}/{}", group, self.name)
            }
            _ => self.name.clone(),
        }
    }

    /// Name, version and purl are all non-empty
    pub fn is_fully_specified(&self) -> bool {
        !self.name.is_empty() && !self.version.is_empty() && !self.purl_str().is_empty()
    }

    pub fn normalized_purl(&self) -> String {
        normalize_purl(self.purl_str())
    }

    /// First property with exactly this name
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }

    /// Property value for display, falling back to `default` when absent
    pub fn property_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.property(name).unwrap_or(default)
    }

    /// Boolean property, absent or unparseable values read as `false`
    pub fn flag(&self, name: &str) -> bool {
        self.property(name).and_then(parse_bool).unwrap_or(false)
    }

    /// Appends a property, even if one with the same name exists
    pub fn push_property(&mut self, property: Property) {
        self.properties.push(property);
    }

    /// Overwrites the first property with this name, or appends it
    pub fn set_property(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.properties.iter_mut().find(|p| p.name == name) {
            Some(existing) => existing.value = value,
            None => self.properties.push(Property::new(name, value)),
        }
    }

    pub fn is_excluded(&self) -> bool {
        self.flag(names::EXCLUDE_COMPONENT)
    }

    pub fn is_development(&self) -> bool {
        self.flag(names::IS_DEVELOPMENT)
    }
}
