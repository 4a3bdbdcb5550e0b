use serde::{Deserialize, Serialize};

/// A dependency edge set rooted at the component identified by `bom_ref`.
///
/// In memory the nesting is recursive. CycloneDX JSON only has a flat
/// `dependsOn` list of refs, so nested entries serialize as their refs and
/// deserialize as leaves.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "DependencyRecord", into = "DependencyRecord")]
pub struct Dependency {
    pub bom_ref: String,
    pub depends_on: Vec<Dependency>,
}

impl Dependency {
    pub fn new(bom_ref: impl Into<String>) -> Self {
        Self {
            bom_ref: bom_ref.into(),
            depends_on: Vec::new(),
        }
    }

    /// Creates a dependency whose children are leaves with the given refs
    pub fn with_refs<I, S>(bom_ref: impl Into<String>, refs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            bom_ref: bom_ref.into(),
            depends_on: refs.into_iter().map(Dependency::new).collect(),
        }
    }

    pub fn child_refs(&self) -> impl Iterator<Item = &str> {
        self.depends_on.iter().map(|d| d.bom_ref.as_str())
    }

    /// Every ref in this subtree, including the root
    pub fn all_refs(&self) -> Vec<&str> {
        let mut refs = vec![self.bom_ref.as_str()];
        for child in &self.depends_on {
            refs.extend(child.all_refs());
        }
        refs
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DependencyRecord {
    #[serde(rename = "ref")]
    bom_ref: String,
    #[serde(rename = "dependsOn", default, skip_serializing_if = "Vec::is_empty")]
    depends_on: Vec<String>,
}

impl From<DependencyRecord> for Dependency {
    fn from(record: DependencyRecord) -> Self {
        Dependency::with_refs(record.bom_ref, record.depends_on)
    }
}

impl From<Dependency> for DependencyRecord {
    fn from(dependency: Dependency) -> Self {
        DependencyRecord {
            bom_ref: dependency.bom_ref,
            depends_on: dependency
                .depends_on
                .into_iter()
                .map(|d| d.bom_ref)
                .collect(),
        }
    }
}
