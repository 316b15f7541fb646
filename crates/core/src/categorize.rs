use serde::{Deserialize, Serialize};

use crate::model::Category;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryRule {
    pub category: Category,
    pub patterns: Vec<String>,
}

impl CategoryRule {
    pub fn new(category: Category, patterns: &[&str]) -> Self {
        Self {
            category,
            patterns: patterns.iter().map(|pattern| pattern.to_string()).collect(),
        }
    }

    pub fn matches(&self, lowered: &str) -> bool {
        self.patterns
            .iter()
            .any(|pattern| lowered.contains(&pattern.to_lowercase()))
    }
}

pub fn default_rules() -> Vec<CategoryRule> {
    vec![
        // fan + relay combinations
        CategoryRule::new(
            Category::FourChannelBoard,
            &["4ch_fan", "fan_display_rotary_relays", "devb_4ch"],
        ),
        CategoryRule::new(Category::DebugBuilds, &["debug"]),
        // Dallas / SHT sensor variants
        CategoryRule::new(
            Category::Esp32DevBoard,
            &[
                "esp32_devb_dallas",
                "esp32_devb_sht",
                "devb_dallas",
                "devb_sht",
            ],
        ),
        CategoryRule::new(Category::MiniShield, &["mini_shield"]),
        CategoryRule::new(
            Category::S2S3C3,
            &[
                "esp32s2",
                "s2_",
                "saola",
                "esp32s3",
                "s3_",
                "s3dev",
                "esp32c3",
                "c3_",
                "stamp5_c3",
                "lolin_s2",
                "lolin_s3",
                "lolin_c3",
            ],
        ),
        CategoryRule::new(Category::UniversalShield, &["universal"]),
    ]
}

pub fn categorize(env_name: &str, rules: &[CategoryRule]) -> Option<Category> {
    let lowered = env_name.to_lowercase();
    rules
        .iter()
        .find(|rule| rule.matches(&lowered))
        .map(|rule| rule.category)
}

/// Strips `<product>_<version>_` and the extension from `file_name`.
///
/// Names without the prefix only lose the extension; names without either
/// are returned unchanged. Only a trailing extension is removed, so an
/// embedded `.bin` stays part of the environment name.
pub fn environment_name(file_name: &str, product: &str, version: &str, extension: &str) -> String {
    let prefix = format!("{product}_{version}_");
    if let Some(rest) = file_name.strip_prefix(&prefix) {
        return rest.strip_suffix(extension).unwrap_or(rest).to_string();
    }
    file_name
        .strip_suffix(extension)
        .unwrap_or(file_name)
        .to_string()
}
