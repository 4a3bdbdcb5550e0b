use crate::adapters::outbound::filesystem::FileSystemReader;
use crate::bom_reconciliation::domain::property::names;
use crate::bom_reconciliation::domain::{Bom, Component, Dependency, Property};
use crate::ports::outbound::{ParseOutcome, SpdxBomParser, SpdxImport};
use serde::Deserialize;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Oldest SPDX version with the JSON-LD `@graph` serialization
const MIN_SPEC_VERSION: (u32, u32) = (3, 0);

const DEPENDS_ON: &str = "dependsOn";
const DEVELOPMENT_SCOPE: &str = "development";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PackageNode {
    #[serde(default)]
    name: String,
    #[serde(default, rename = "software_packageVersion")]
    package_version: String,
    #[serde(default, rename = "software_packageUrl")]
    package_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RelationshipNode {
    #[serde(default)]
    from: String,
    #[serde(default, deserialize_with = "one_or_many")]
    to: Vec<String>,
    #[serde(default)]
    scope: Option<String>,
}

/// `to` is an array in SPDX 3 but some producers emit a single id
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(id) => vec![id],
        OneOrMany::Many(ids) => ids,
    })
}

/// SpdxFileParser adapter for SPDX 3 JSON-LD documents
#[derive(Debug, Default)]
pub struct SpdxFileParser {
    reader: FileSystemReader,
}

impl SpdxFileParser {
    pub fn new() -> Self {
        Self {
            reader: FileSystemReader::new(),
        }
    }
}

impl SpdxBomParser for SpdxFileParser {
    fn parse_spdx_bom(&self, path: &Path) -> ParseOutcome<SpdxImport> {
        match self.reader.read_text(path) {
            ParseOutcome::Parsed(text) => {
                let outcome = parse_spdx_str(&text);
                if let ParseOutcome::Parsed(import) = &outcome {
                    if let Some(version) = &import.rejected_version {
                        tracing::warn!(
                            path = %path.display(),
                            spec_version = %version,
                            "SPDX document is not SPDX 3.0 or later, ignored"
                        );
                    }
                }
                outcome
            }
            ParseOutcome::NotFound => ParseOutcome::NotFound,
            ParseOutcome::Unreadable(reason) => ParseOutcome::Unreadable(reason),
            ParseOutcome::Malformed(reason) => ParseOutcome::Malformed(reason),
        }
    }
}

/// Builds components and dependencies from the `@graph` of an SPDX 3 document
pub fn parse_spdx_str(text: &str) -> ParseOutcome<SpdxImport> {
    let document: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => return ParseOutcome::Malformed(format!("Invalid JSON: {}", e)),
    };
    let Some(graph) = document.get("@graph").and_then(Value::as_array) else {
        return ParseOutcome::Malformed("SPDX document has no @graph array".to_string());
    };

    let spec_version = document_spec_version(graph);
    if !spec_version.as_deref().is_some_and(is_supported_version) {
        return ParseOutcome::Parsed(SpdxImport {
            rejected_version: Some(spec_version.unwrap_or_default()),
            ..SpdxImport::default()
        });
    }

    let packages = package_purls(graph);
    let mut components = Vec::new();
    for node in graph.iter().filter(|n| node_type(n) == Some("software_Package")) {
        let package = match PackageNode::deserialize(node) {
            Ok(package) => package,
            Err(e) => {
                tracing::warn!(id = node_id(node).unwrap_or_default(), error = %e, "skipping SPDX package");
                continue;
            }
        };
        if package.name.is_empty() || package.package_version.is_empty() || package.package_url.is_empty() {
            continue;
        }
        components.push(Component::new(package.name, package.package_version, package.package_url));
    }

    let mut dependencies = Vec::new();
    let mut development = HashSet::new();
    let mut development_known = false;
    for node in graph {
        if node.get("relationshipType").and_then(Value::as_str) != Some(DEPENDS_ON) {
            continue;
        }
        let relationship = match RelationshipNode::deserialize(node) {
            Ok(relationship) => relationship,
            Err(e) => {
                tracing::warn!(id = node_id(node).unwrap_or_default(), error = %e, "skipping SPDX relationship");
                continue;
            }
        };

        let targets: Vec<&str> = relationship
            .to
            .iter()
            .filter_map(|id| packages.get(id.as_str()).copied())
            .collect();

        if let Some(scope) = &relationship.scope {
            development_known = true;
            if scope.eq_ignore_ascii_case(DEVELOPMENT_SCOPE) {
                development.extend(targets.iter().copied());
            }
        }

        let Some(from) = packages.get(relationship.from.as_str()) else {
            continue;
        };
        if targets.is_empty() {
            continue;
        }
        dependencies.push(Dependency::with_refs(*from, targets));
    }

    if development_known {
        for component in &mut components {
            let is_development = development.contains(component.purl_str());
            component.push_property(Property::flag(names::IS_DEVELOPMENT, is_development));
        }
    }

    ParseOutcome::Parsed(SpdxImport {
        bom: Bom {
            components,
            dependencies,
            ..Bom::default()
        },
        rejected_version: None,
        development_known,
    })
}

fn node_type(node: &Value) -> Option<&str> {
    node.get("type")
        .or_else(|| node.get("@type"))
        .and_then(Value::as_str)
}

fn node_id(node: &Value) -> Option<&str> {
    node.get("spdxId")
        .or_else(|| node.get("@id"))
        .and_then(Value::as_str)
}

/// `spdxId → software_packageUrl` for every package with a purl
fn package_purls(graph: &[Value]) -> HashMap<&str, &str> {
    graph
        .iter()
        .filter(|n| node_type(n) == Some("software_Package"))
        .filter_map(|n| {
            let id = node_id(n)?;
            let purl = n.get("software_packageUrl").and_then(Value::as_str)?;
            (!purl.is_empty()).then_some((id, purl))
        })
        .collect()
}

/// `specVersion` of the CreationInfo referenced by the SpdxDocument node.
///
/// `creationInfo` may be the id of a CreationInfo node or the node inline.
fn document_spec_version(graph: &[Value]) -> Option<String> {
    let document = graph.iter().find(|n| node_type(n) == Some("SpdxDocument"))?;
    let creation_info = match document.get("creationInfo")? {
        Value::String(id) => graph
            .iter()
            .find(|n| node_type(n) == Some("CreationInfo") && node_id(n) == Some(id.as_str()))?,
        inline @ Value::Object(_) => inline,
        _ => return None,
    };
    creation_info
        .get("specVersion")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// `3.0`, `3.0.1`, `SPDX-3.0` and later are supported
fn is_supported_version(version: &str) -> bool {
    let version = version.trim();
    let version = version.strip_prefix("SPDX-").unwrap_or(version);
    let mut parts = version.split('.').map(str::parse::<u32>);
    match (parts.next(), parts.next()) {
        (Some(Ok(major)), Some(Ok(minor))) => (major, minor) >= MIN_SPEC_VERSION,
        (Some(Ok(major)), None) => (major, 0) >= MIN_SPEC_VERSION,
        _ => false,
    }
}
