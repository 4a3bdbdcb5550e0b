use crate::shared::error::SbomError;
use std::fmt;
use std::str::FromStr;

/// Normalizes a package URL for comparison.
///
/// Package managers disagree on whether the `@` of scoped names and of the
/// version separator is percent-encoded; only `%40` is decoded so the result
/// stays stable under repeated application.
pub fn normalize_purl(purl: &str) -> String {
    purl.replace("%40", "@")
}

/// Case-insensitive equality of two purls after normalization.
pub fn purls_match(left: &str, right: &str) -> bool {
    normalize_purl(left).eq_ignore_ascii_case(&normalize_purl(right))
}

/// Ecosystem a project is scanned as.
///
/// Each type accepts only components whose purl carries its marker; anything
/// else is routed to the unsupported set instead of the BOM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectType {
    Npm,
    Nuget,
    Maven,
    Python,
    Conan,
    Debian,
    Alpine,
    Cargo,
    Choco,
}

impl ProjectType {
    pub const ALL: [ProjectType; 9] = [
        ProjectType::Npm,
        ProjectType::Nuget,
        ProjectType::Maven,
        ProjectType::Python,
        ProjectType::Conan,
        ProjectType::Debian,
        ProjectType::Alpine,
        ProjectType::Cargo,
        ProjectType::Choco,
    ];

    /// The purl prefix a supported component must contain
    pub fn purl_marker(&self) -> &'static str {
        match self {
            ProjectType::Npm => "pkg:npm",
            ProjectType::Nuget => "pkg:nuget",
            ProjectType::Maven => "pkg:maven",
            ProjectType::Python => "pkg:pypi",
            ProjectType::Conan => "pkg:conan",
            ProjectType::Debian => "pkg:deb",
            ProjectType::Alpine => "pkg:apk",
            ProjectType::Cargo => "pkg:cargo",
            ProjectType::Choco => "pkg:chocolatey",
        }
    }

    /// Value written to the `project-type` property
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Npm => "NPM",
            ProjectType::Nuget => "NUGET",
            ProjectType::Maven => "MAVEN",
            ProjectType::Python => "PYTHON",
            ProjectType::Conan => "CONAN",
            ProjectType::Debian => "DEBIAN",
            ProjectType::Alpine => "ALPINE",
            ProjectType::Cargo => "CARGO",
            ProjectType::Choco => "CHOCO",
        }
    }

    /// Whether a purl belongs to this ecosystem
    pub fn supports_purl(&self, purl: &str) -> bool {
        purl.contains(self.purl_marker())
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectType {
    type Err = SbomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "npm" => Ok(ProjectType::Npm),
            "nuget" => Ok(ProjectType::Nuget),
            "maven" => Ok(ProjectType::Maven),
            "python" | "poetry" | "pypi" => Ok(ProjectType::Python),
            "conan" => Ok(ProjectType::Conan),
            "debian" | "deb" => Ok(ProjectType::Debian),
            "alpine" | "apk" => Ok(ProjectType::Alpine),
            "cargo" => Ok(ProjectType::Cargo),
            "choco" | "chocolatey" => Ok(ProjectType::Choco),
            _ => Err(SbomError::UnsupportedProjectType {
                value: s.to_string(),
            }),
        }
    }
}
