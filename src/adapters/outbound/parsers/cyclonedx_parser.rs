use crate::adapters::outbound::filesystem::FileSystemReader;
use crate::bom_reconciliation::domain::{Bom, Classification, Composition, Metadata};
use crate::ports::outbound::{CycloneDxBomParser, ParseOutcome};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::Path;

/// CycloneDxFileParser adapter for CycloneDX JSON files
#[derive(Debug, Default)]
pub struct CycloneDxFileParser {
    reader: FileSystemReader,
}

impl CycloneDxFileParser {
    pub fn new() -> Self {
        Self {
            reader: FileSystemReader::new(),
        }
    }
}

impl CycloneDxBomParser for CycloneDxFileParser {
    fn parse_cyclonedx_bom(&self, path: &Path) -> ParseOutcome<Bom> {
        match self.reader.read_text(path) {
            ParseOutcome::Parsed(text) => {
                let outcome = parse_cyclonedx_str(&text);
                if let ParseOutcome::Malformed(reason) = &outcome {
                    tracing::error!(path = %path.display(), reason = %reason, "not a CycloneDX BOM");
                }
                outcome
            }
            ParseOutcome::NotFound => ParseOutcome::NotFound,
            ParseOutcome::Unreadable(reason) => ParseOutcome::Unreadable(reason),
            ParseOutcome::Malformed(reason) => ParseOutcome::Malformed(reason),
        }
    }
}

/// Decodes CycloneDX JSON text.
///
/// Strict typed decoding is tried first. When it fails the document is
/// walked element by element: undecodable components, dependencies and
/// compositions are skipped with a warning.
pub fn parse_cyclonedx_str(text: &str) -> ParseOutcome<Bom> {
    let strict_error = match serde_json::from_str::<Bom>(text) {
        Ok(bom) => return ParseOutcome::Parsed(bom),
        Err(e) => e,
    };
    tracing::debug!(error = %strict_error, "strict CycloneDX decoding failed, using lenient decoder");

    let value: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => return ParseOutcome::Malformed(format!("Invalid JSON: {}", e)),
    };

    match value {
        Value::Object(document) => ParseOutcome::Parsed(decode_lenient(document)),
        _ => ParseOutcome::Malformed("CycloneDX document must be a JSON object".to_string()),
    }
}

fn decode_lenient(mut document: Map<String, Value>) -> Bom {
    let mut bom = Bom::default();

    if let Some(Value::String(format)) = document.remove("bomFormat") {
        bom.bom_format = format;
    }
    if let Some(spec_version) = document.remove("specVersion").and_then(|v| scalar_to_string(&v)) {
        bom.spec_version = spec_version;
    }
    bom.serial_number = document
        .remove("serialNumber")
        .and_then(|v| v.as_str().map(str::to_string));
    if let Some(version) = document.remove("version").and_then(|v| v.as_u64()) {
        bom.version = u32::try_from(version).unwrap_or(1);
    }

    bom.metadata = document.remove("metadata").and_then(|mut metadata| {
        if let Some(component) = metadata.get_mut("component") {
            normalize_component(component);
        }
        decode_element::<Metadata>(metadata, "metadata")
    });

    bom.components = decode_array(document.remove("components"), "component", normalize_component);
    bom.dependencies = decode_array(document.remove("dependencies"), "dependency", |_| {});
    bom.compositions = decode_array::<Composition>(document.remove("compositions"), "composition", |_| {});

    bom.extra = document;
    bom
}

fn decode_array<T: DeserializeOwned>(
    value: Option<Value>,
    kind: &str,
    normalize: impl Fn(&mut Value),
) -> Vec<T> {
    let items = match value {
        Some(Value::Array(items)) => items,
        Some(Value::Null) | None => return Vec::new(),
        Some(_) => {
            tracing::warn!(kind, "expected an array, section skipped");
            return Vec::new();
        }
    };

    items
        .into_iter()
        .filter_map(|mut item| {
            normalize(&mut item);
            decode_element(item, kind)
        })
        .collect()
}

fn decode_element<T: DeserializeOwned>(value: Value, kind: &str) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(element) => Some(element),
        Err(e) => {
            tracing::warn!(kind, error = %e, "skipping element that could not be decoded");
            None
        }
    }
}

/// Repairs the common deviations seen in third-party CycloneDX output
fn normalize_component(component: &mut Value) {
    let Some(object) = component.as_object_mut() else {
        return;
    };

    for key in ["name", "version", "group", "purl", "bom-ref"] {
        if let Some(value) = object.get(key) {
            if !value.is_string() {
                match scalar_to_string(value) {
                    Some(text) => {
                        object.insert(key.to_string(), Value::String(text));
                    }
                    None => {
                        object.remove(key);
                    }
                }
            }
        }
    }

    let known_type = object
        .get("type")
        .map(|t| serde_json::from_value::<Classification>(t.clone()).is_ok())
        .unwrap_or(true);
    if !known_type {
        object.insert("type".to_string(), Value::String("library".to_string()));
    }

    if let Some(Value::Array(properties)) = object.get_mut("properties") {
        for property in properties.iter_mut().filter_map(Value::as_object_mut) {
            if let Some(value) = property.get("value") {
                if !value.is_string() {
                    let text = scalar_to_string(value).unwrap_or_default();
                    property.insert("value".to_string(), Value::String(text));
                }
            }
        }
    }

    if let Some(Value::Array(children)) = object.get_mut("components") {
        for child in children.iter_mut() {
            normalize_component(child);
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
