use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// CycloneDX composition: a completeness statement about a set of assemblies
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Composition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregate: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assemblies: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Composition {
    pub fn new<A, D>(assemblies: A, dependencies: D) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
    {
        Self {
            aggregate: None,
            assemblies: assemblies.into_iter().map(Into::into).collect(),
            dependencies: dependencies.into_iter().map(Into::into).collect(),
            extra: Map::new(),
        }
    }

    /// Same assemblies, element-wise and in order
    pub fn same_assemblies(&self, other: &Composition) -> bool {
        self.assemblies == other.assemblies
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_assemblies_is_order_sensitive() {
        let ab = Composition::new(["A", "B"], ["x"]);
        let ab_other_deps = Composition::new(["A", "B"], ["y"]);
        let ba = Composition::new(["B", "A"], ["x"]);
        assert!(ab.same_assemblies(&ab_other_deps));
        assert!(!ab.same_assemblies(&ba));
    }

    #[test]
    fn test_round_trip_keeps_aggregate() {
        let json = r#"{"aggregate":"complete","assemblies":["A"],"dependencies":["x"]}"#;
        let composition: Composition = serde_json::from_str(json).unwrap();
        assert_eq!(composition.aggregate.as_deref(), Some("complete"));
        assert_eq!(serde_json::to_string(&composition).unwrap(), json);
    }
}
