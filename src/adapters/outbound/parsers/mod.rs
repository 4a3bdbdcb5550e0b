/// BOM file parsers (CycloneDX JSON, SPDX 3 JSON-LD)
mod cyclonedx_parser;
mod spdx_parser;

pub use cyclonedx_parser::{parse_cyclonedx_str, CycloneDxFileParser};
pub use spdx_parser::{parse_spdx_str, SpdxFileParser};
