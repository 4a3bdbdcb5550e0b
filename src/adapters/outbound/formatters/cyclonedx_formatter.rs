use crate::bom_reconciliation::domain::Bom;
use crate::ports::outbound::BomFormatter;
use crate::shared::Result;

/// CycloneDxFormatter adapter for writing CycloneDX 1.6 JSON
///
/// Sections the tool does not interpret are written back as they were read,
/// so a baseline BOM keeps its licenses, hashes and extensions.
pub struct CycloneDxFormatter;

impl CycloneDxFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CycloneDxFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl BomFormatter for CycloneDxFormatter {
    fn format_bom(&self, bom: &Bom) -> Result<String> {
        let mut json = serde_json::to_string_pretty(bom)?;
        json.push('\n');
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bom_reconciliation::domain::property::names;
    use crate::bom_reconciliation::domain::{Component, Composition, Dependency, Property};
    use serde_json::{json, Value};

    fn format(bom: &Bom) -> Value {
        let output = CycloneDxFormatter::new().format_bom(bom).unwrap();
        serde_json::from_str(&output).unwrap()
    }

    #[test]
    fn test_format_uses_cyclonedx_field_names() {
        let bom = Bom {
            serial_number: Some("urn:uuid:00000000-0000-0000-0000-000000000000".to_string()),
            components: vec![Component::new("lodash", "4.17.21", "pkg:npm/lodash@4.17.21")
                .with_property(Property::flag(names::IS_DEVELOPMENT, false))],
            dependencies: vec![Dependency::with_refs(
                "pkg:npm/lodash@4.17.21",
                ["pkg:npm/left-pad@1.3.0"],
            )],
            compositions: vec![Composition::new(["pkg:npm/lodash@4.17.21"], ["pkg:npm/left-pad@1.3.0"])],
            ..Bom::default()
        };

        let json = format(&bom);

        assert_eq!(json["bomFormat"], "CycloneDX");
        assert_eq!(json["specVersion"], "1.6");
        assert_eq!(json["serialNumber"], "urn:uuid:00000000-0000-0000-0000-000000000000");

        let component = &json["components"][0];
        assert_eq!(component["type"], "library");
        assert_eq!(component["bom-ref"], "pkg:npm/lodash@4.17.21");
        assert_eq!(
            component["properties"][0],
            json!({"name": "is-development", "value": "false"})
        );

        assert_eq!(json["dependencies"][0]["ref"], "pkg:npm/lodash@4.17.21");
        assert_eq!(
            json["dependencies"][0]["dependsOn"],
            json!(["pkg:npm/left-pad@1.3.0"])
        );
        assert_eq!(json["compositions"][0]["assemblies"], json!(["pkg:npm/lodash@4.17.21"]));
    }

    #[test]
    fn test_format_keeps_unknown_sections() {
        let mut bom = Bom::default();
        bom.extra
            .insert("vulnerabilities".to_string(), json!([{"id": "CVE-2021-23337"}]));

        let json = format(&bom);
        assert_eq!(json["vulnerabilities"][0]["id"], "CVE-2021-23337");
    }

    #[test]
    fn test_format_ends_with_newline() {
        let output = CycloneDxFormatter::new().format_bom(&Bom::default()).unwrap();
        assert!(output.ends_with("}\n"));
    }
}
