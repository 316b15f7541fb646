use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const REPORT_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    FourChannelBoard,
    DebugBuilds,
    Esp32DevBoard,
    MiniShield,
    S2S3C3,
    UniversalShield,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::FourChannelBoard,
        Category::DebugBuilds,
        Category::Esp32DevBoard,
        Category::MiniShield,
        Category::S2S3C3,
        Category::UniversalShield,
    ];

    pub fn dir_name(self) -> &'static str {
        match self {
            Category::FourChannelBoard => "4ch_board",
            Category::DebugBuilds => "Debug_builds",
            Category::Esp32DevBoard => "esp32_wled_dev_board",
            Category::MiniShield => "mini_shield",
            Category::S2S3C3 => "S2_S3_C3",
            Category::UniversalShield => "universal_shield",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirmwareFile {
    pub path: PathBuf,
    pub file_name: String,
    pub version: String,
    pub category: Option<Category>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileOutcome {
    pub file_name: String,
    pub version: String,
    pub category: Option<Category>,
    pub destination: PathBuf,
    #[serde(default)]
    pub error: Option<String>,
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryBucket {
    pub category: Category,
    pub files: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VersionSummary {
    pub version: String,
    #[serde(default)]
    pub from_header: bool,
    pub root_files: Vec<String>,
    pub categories: Vec<CategoryBucket>,
    pub organized: u64,
    pub failed: u64,
}

impl VersionSummary {
    pub fn total_files(&self) -> usize {
        self.root_files.len()
            + self
                .categories
                .iter()
                .map(|bucket| bucket.files.len())
                .sum::<usize>()
    }

    pub fn files_in(&self, category: Category) -> &[String] {
        self.categories
            .iter()
            .find(|bucket| bucket.category == category)
            .map(|bucket| bucket.files.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrganizeReport {
    pub report_version: String,
    pub run_id: String,
    pub generated_at: String,
    pub source_dir: String,
    pub dest_dir: String,
    pub versions: Vec<VersionSummary>,
    pub files: Vec<FileOutcome>,
    #[serde(default)]
    pub unrecognized_files: Vec<String>,
    pub total_organized: u64,
    pub failed: u64,
}

impl OrganizeReport {
    pub fn version_names(&self) -> Vec<&str> {
        self.versions
            .iter()
            .map(|summary| summary.version.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OrganizeEvent {
    HeaderFallback { version: String },
    Discovered { total_files: usize, groups: Vec<(String, usize)> },
    VersionStarted { version: String },
    FileProcessed(FileOutcome),
    VersionFinished(VersionSummary),
}
