use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::categorize::{default_rules, CategoryRule};
use crate::error::{OrganizeError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OrganizerConfig {
    pub source_dir: PathBuf,
    pub dest_dir: PathBuf,
    pub file_glob: String,
    pub extension: String,
    pub product: String,
    pub header_path: PathBuf,
    pub default_version: String,
    pub rules: Vec<CategoryRule>,
    pub listing_limit: usize,
}

impl Default for OrganizerConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("build_output/release"),
            dest_dir: PathBuf::from("build_output/custom"),
            file_glob: "*.bin".to_string(),
            extension: ".bin".to_string(),
            product: "WLED".to_string(),
            header_path: PathBuf::from("wled00/wled.h"),
            default_version: "0.16.0-alpha".to_string(),
            rules: default_rules(),
            listing_limit: 2,
        }
    }
}

impl OrganizerConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|err| OrganizeError::io(path, err))?;
        serde_json::from_str(&data).map_err(|err| {
            OrganizeError::InvalidConfig(format!("failed to parse {}: {err}", path.display()))
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.product.trim().is_empty() {
            return Err(OrganizeError::InvalidConfig(
                "product must not be empty".to_string(),
            ));
        }
        if self.file_glob.trim().is_empty() {
            return Err(OrganizeError::InvalidConfig(
                "file_glob must not be empty".to_string(),
            ));
        }
        if self.default_version.trim().is_empty() {
            return Err(OrganizeError::InvalidConfig(
                "default_version must not be empty".to_string(),
            ));
        }
        if self.listing_limit == 0 {
            return Err(OrganizeError::InvalidConfig(
                "listing_limit must be greater than zero".to_string(),
            ));
        }
        if let Some(rule) = self.rules.iter().find(|rule| rule.patterns.is_empty()) {
            return Err(OrganizeError::InvalidConfig(format!(
                "rule for {} has no patterns",
                rule.category.dir_name()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::OrganizerConfig;
    use crate::categorize::CategoryRule;
    use crate::model::Category;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: OrganizerConfig =
            serde_json::from_str(r#"{"source_dir": "out/bin", "listing_limit": 5}"#)
                .expect("config parses");
        assert_eq!(config.source_dir.to_str(), Some("out/bin"));
        assert_eq!(config.listing_limit, 5);
        assert_eq!(config.product, "WLED");
        assert_eq!(config.rules.len(), 6);
    }

    #[test]
    fn rules_load_from_json_in_order() {
        let config: OrganizerConfig = serde_json::from_str(
            r#"{"rules": [
                {"category": "universal_shield", "patterns": ["universal"]},
                {"category": "s2_s3_c3", "patterns": ["s3_"]}
            ]}"#,
        )
        .expect("config parses");
        assert_eq!(config.rules[0].category, Category::UniversalShield);
        assert_eq!(config.rules[1].category, Category::S2S3C3);
    }

    #[test]
    fn reads_config_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("organizer.json");
        fs::write(&path, r#"{"product": "ACME"}"#).expect("write");
        let config = OrganizerConfig::from_json_file(&path).expect("config loads");
        assert_eq!(config.product, "ACME");

        fs::write(&path, "{not json").expect("write");
        assert!(OrganizerConfig::from_json_file(&path).is_err());
    }

    #[test]
    fn validation_rejects_bad_values() {
        assert!(OrganizerConfig::default().validate().is_ok());

        let config = OrganizerConfig {
            product: " ".to_string(),
            ..OrganizerConfig::default()
        };
        assert!(config.validate().is_err());

        let config = OrganizerConfig {
            listing_limit: 0,
            ..OrganizerConfig::default()
        };
        assert!(config.validate().is_err());

        let config = OrganizerConfig {
            rules: vec![CategoryRule::new(Category::DebugBuilds, &[])],
            ..OrganizerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
