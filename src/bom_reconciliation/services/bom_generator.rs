use crate::bom_reconciliation::domain::bom::{BOM_FORMAT, SPEC_VERSION};
use crate::bom_reconciliation::domain::{Bom, Metadata};
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

/// Tool name recorded in `metadata.tools`
pub const TOOL_NAME: &str = "bom-reconciler";

/// BomGenerator service for stamping fresh BOM metadata
///
/// Every run produces a new document: a new serial number, version 1 and the
/// current UTC time. Metadata fields this service does not own (component,
/// properties, extensions) are kept.
pub struct BomGenerator;

impl BomGenerator {
    /// Stamps `bom` as a freshly generated CycloneDX 1.6 document
    ///
    /// # Arguments
    /// * `tool_name` - Name of the tool generating the BOM
    /// * `tool_version` - Version of the tool
    pub fn stamp(bom: &mut Bom, tool_name: &str, tool_version: &str) {
        bom.bom_format = BOM_FORMAT.to_string();
        bom.spec_version = SPEC_VERSION.to_string();
        bom.serial_number = Some(format!("urn:uuid:{}", Uuid::new_v4()));
        bom.version = 1;

        let metadata = bom.metadata.get_or_insert_with(Metadata::default);
        metadata.timestamp = Some(Utc::now().to_rfc3339());
        metadata.tools = Some(json!({
            "components": [{
                "type": "application",
                "name": tool_name,
                "version": tool_version,
            }]
        }));
    }

    /// Stamps `bom` with this crate's name and compile-time version
    pub fn stamp_default(bom: &mut Bom) {
        Self::stamp(bom, TOOL_NAME, env!("CARGO_PKG_VERSION"));
    }
}
