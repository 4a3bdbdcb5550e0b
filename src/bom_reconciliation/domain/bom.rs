use super::component::Component;
use super::composition::Composition;
use super::dependency::Dependency;
use super::property::Property;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const BOM_FORMAT: &str = "CycloneDX";
pub const SPEC_VERSION: &str = "1.6";

/// BOM-level metadata
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<Box<Component>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Property>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The BOM aggregate root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bom {
    #[serde(default = "default_bom_format")]
    pub bom_format: String,
    #[serde(default = "default_spec_version")]
    pub spec_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(default)]
    pub components: Vec<Component>,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub compositions: Vec<Composition>,
    /// Sections this tool does not interpret (vulnerabilities, services, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_bom_format() -> String {
    BOM_FORMAT.to_string()
}

fn default_spec_version() -> String {
    SPEC_VERSION.to_string()
}

fn default_version() -> u32 {
    1
}

impl Default for Bom {
    fn default() -> Self {
        Self {
            bom_format: default_bom_format(),
            spec_version: default_spec_version(),
            serial_number: None,
            version: default_version(),
            metadata: None,
            components: Vec::new(),
            dependencies: Vec::new(),
            compositions: Vec::new(),
            extra: Map::new(),
        }
    }
}

impl Bom {
    pub fn with_components(components: Vec<Component>) -> Self {
        Self {
            components,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty() && self.dependencies.is_empty() && self.compositions.is_empty()
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn find_by_bom_ref(&self, bom_ref: &str) -> Option<&Component> {
        self.components
            .iter()
            .find(|c| c.bom_ref.as_deref() == Some(bom_ref))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_bom_uses_defaults() {
        let bom: Bom = serde_json::from_str(r#"{"components":[]}"#).unwrap();
        assert_eq!(bom.bom_format, "CycloneDX");
        assert_eq!(bom.spec_version, "1.6");
        assert_eq!(bom.version, 1);
        assert!(bom.is_empty());
    }

    #[test]
    fn test_unknown_sections_round_trip() {
        let json = r#"{
            "bomFormat": "CycloneDX",
            "specVersion": "1.5",
            "version": 3,
            "components": [],
            "dependencies": [],
            "vulnerabilities": [{"id": "CVE-2024-0001"}]
        }"#;
        let bom: Bom = serde_json::from_str(json).unwrap();
        assert_eq!(bom.version, 3);
        let out = serde_json::to_value(&bom).unwrap();
        assert_eq!(out["vulnerabilities"][0]["id"], "CVE-2024-0001");
        assert_eq!(out["specVersion"], "1.5");
    }

    #[test]
    fn test_find_by_bom_ref() {
        let bom = Bom::with_components(vec![Component::new("a", "1", "pkg:npm/a@1")]);
        assert!(bom.find_by_bom_ref("pkg:npm/a@1").is_some());
        assert!(bom.find_by_bom_ref("pkg:npm/b@1").is_none());
    }
}
