pub mod categorize;
pub mod config;
pub mod error;
pub mod fs;
pub mod layout;
pub mod model;
pub mod organize;
pub mod summary;
pub mod version;

pub use categorize::{categorize, default_rules, environment_name, CategoryRule};
pub use config::OrganizerConfig;
pub use error::{OrganizeError, Result};
pub use fs::{FileSystem, LocalFileSystem};
pub use layout::{create_version_layout, relative_destination};
pub use model::{
    Category, CategoryBucket, FileOutcome, FirmwareFile, OrganizeEvent, OrganizeReport,
    VersionSummary, REPORT_VERSION,
};
pub use organize::{
    classify, clean_destination, discover_firmware, group_by_version, organize,
    organize_with_callback, VersionGroups,
};
pub use summary::{
    render_discovery, render_progress_line, render_run_summary, render_version_summary,
};
pub use version::VersionPatterns;
