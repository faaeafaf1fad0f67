//! View tree fixtures loaded from JSON or YAML

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;
use viewfind::{FinderConfig, ResourceTable, ViewHierarchy, ViewSpec};

use crate::error::{CliError, CliResult};

/// A captured view hierarchy plus the context needed to query it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Fixture {
    /// Package ids are resolved against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_package: Option<String>,
    /// Symbolic id names per package
    #[serde(default)]
    pub resources: ResourceTable,
    /// Finder settings
    #[serde(default)]
    pub config: FinderConfig,
    /// Root view; absent for an empty hierarchy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<ViewSpec>,
}

impl Fixture {
    /// Load a fixture, choosing the format by file extension
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let fixture = match extension.as_deref() {
            Some("json") => Self::from_json(&content)?,
            Some("yaml" | "yml") => Self::from_yaml(&content)?,
            _ => {
                return Err(CliError::fixture(format!(
                    "{} must end in .json, .yaml or .yml",
                    path.display()
                )))
            }
        };
        debug!(path = %path.display(), "loaded fixture");
        Ok(fixture)
    }

    /// Parse a JSON fixture
    pub fn from_json(content: &str) -> CliResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parse a YAML fixture
    pub fn from_yaml(content: &str) -> CliResult<Self> {
        Ok(serde_yaml_ng::from_str(content)?)
    }

    /// Materialize the view hierarchy
    #[must_use]
    pub fn hierarchy(&self) -> ViewHierarchy {
        self.root
            .as_ref()
            .map_or_else(ViewHierarchy::new, ViewHierarchy::from_spec)
    }

    /// Finder settings with the fixture's target package applied
    #[must_use]
    pub fn finder_config(&self) -> FinderConfig {
        match &self.target_package {
            Some(package) => self.config.clone().with_target_package(package.clone()),
            None => self.config.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;
    use viewfind::{ResourceId, ViewTree};

    const JSON: &str = r#"{
        "target-package": "com.example",
        "resources": { "com.example": { "save": 7 } },
        "config": { "require_displayed": false },
        "root": {
            "class": "android.widget.LinearLayout",
            "children": [
                { "class": "android.widget.Button", "id": 7, "text": "Save" },
                { "class": "android.widget.Button", "text": "Save", "displayed": false }
            ]
        }
    }"#;

    const YAML: &str = "
target-package: com.example
root:
  class: android.widget.FrameLayout
  children:
    - class: android.widget.TextView
      text: Title
      content-desc: heading
";

    mod parse_tests {
        use super::*;

        #[test]
        fn test_json_fixture() {
            let fixture = Fixture::from_json(JSON).unwrap();
            assert_eq!(fixture.target_package.as_deref(), Some("com.example"));
            assert_eq!(fixture.resources.len(), 1);
            assert!(!fixture.config.require_displayed);
            assert_eq!(fixture.hierarchy().len(), 3);
        }

        #[test]
        fn test_yaml_fixture() {
            let fixture = Fixture::from_yaml(YAML).unwrap();
            let tree = fixture.hierarchy();
            let root = tree.root().unwrap();
            let title = tree.children(root)[0];
            let view = tree.view(title).unwrap();
            assert_eq!(view.text.as_deref(), Some("Title"));
            assert_eq!(view.content_description.as_deref(), Some("heading"));
            assert!(fixture.config.require_displayed);
        }

        #[test]
        fn test_missing_root_is_empty_hierarchy() {
            let fixture = Fixture::from_json("{}").unwrap();
            assert!(fixture.hierarchy().is_empty());
        }

        #[test]
        fn test_malformed_json_fails() {
            assert!(matches!(
                Fixture::from_json("{ \"root\": 3 }"),
                Err(CliError::Json(_))
            ));
        }
    }

    mod config_tests {
        use super::*;

        #[test]
        fn test_target_package_applied() {
            let fixture = Fixture::from_json(JSON).unwrap();
            let config = fixture.finder_config();
            assert_eq!(config.target_package, "com.example");
            assert!(!config.require_displayed);
        }

        #[test]
        fn test_config_package_kept_without_override() {
            let fixture = Fixture {
                config: FinderConfig::new().with_target_package("org.sample"),
                ..Fixture::default()
            };
            assert_eq!(fixture.finder_config().target_package, "org.sample");
        }

        #[test]
        fn test_resources_deserialize_as_ids() {
            let fixture = Fixture::from_json(JSON).unwrap();
            let table = ResourceTable::new().with("com.example", "save", ResourceId(7));
            assert_eq!(fixture.resources, table);
        }
    }

    mod load_tests {
        use super::*;

        fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
            let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
            file.write_all(content.as_bytes()).unwrap();
            file
        }

        #[test]
        fn test_load_by_extension() {
            let json = write_temp(".json", JSON);
            let yaml = write_temp(".yml", YAML);
            assert!(Fixture::load(json.path()).unwrap().root.is_some());
            assert!(Fixture::load(yaml.path()).unwrap().root.is_some());
        }

        #[test]
        fn test_unknown_extension_rejected() {
            let file = write_temp(".txt", JSON);
            let err = Fixture::load(file.path()).unwrap_err();
            assert!(matches!(err, CliError::Fixture { .. }));
        }

        #[test]
        fn test_missing_file_is_io_error() {
            let err = Fixture::load(Path::new("/nonexistent/viewfind/ui.json")).unwrap_err();
            assert!(matches!(err, CliError::Io(_)));
        }
    }
}
