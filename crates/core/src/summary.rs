use std::path::Path;

use crate::model::{FileOutcome, OrganizeReport, VersionSummary};

const RULE_WIDTH: usize = 60;
const SECTION_WIDTH: usize = 40;

pub fn render_progress_line(outcome: &FileOutcome) -> String {
    match &outcome.error {
        None => format!(
            "  SUCCESS: {} -> {}",
            outcome.file_name,
            outcome.destination.to_string_lossy().replace('\\', "/")
        ),
        Some(error) => format!("  ERROR: Failed to copy {}: {}", outcome.file_name, error),
    }
}

pub fn render_discovery(total_files: usize, groups: &[(String, usize)]) -> String {
    let mut out = format!(
        "Found {} firmware files across {} versions:\n",
        total_files,
        groups.len()
    );
    for (version, count) in groups {
        out.push_str(&format!("  Version {version}: {count} files\n"));
    }
    out
}

pub fn render_version_summary(summary: &VersionSummary, listing_limit: usize) -> String {
    let mut out = format!(
        "\nVersion {} Summary:\n{}\n",
        summary.version,
        "-".repeat(SECTION_WIDTH)
    );

    if !summary.root_files.is_empty() {
        out.push_str(&format!("  Root files: {}\n", summary.root_files.len()));
        push_listing(&mut out, &summary.root_files, listing_limit);
    }

    for bucket in &summary.categories {
        out.push_str(&format!(
            "  {}: {} files\n",
            bucket.category.dir_name(),
            bucket.files.len()
        ));
        push_listing(&mut out, &bucket.files, listing_limit);
    }
    out
}

pub fn render_run_summary(report: &OrganizeReport, dest_dir: &Path) -> String {
    let mut out = String::new();
    if !report.unrecognized_files.is_empty() {
        out.push_str(&format!(
            "\nWARNING: {} files with unrecognized version patterns:\n",
            report.unrecognized_files.len()
        ));
        for name in &report.unrecognized_files {
            out.push_str(&format!("  - {name}\n"));
        }
    }

    out.push_str(&format!("\n{}\n", "=".repeat(RULE_WIDTH)));
    out.push_str(&format!("Total files organized: {}\n", report.total_organized));
    if report.failed > 0 {
        out.push_str(&format!("Failed copies: {}\n", report.failed));
    }
    out.push_str(&format!(
        "Versions processed: {}\n",
        report.version_names().join(", ")
    ));
    out.push_str(&format!("Files organized into: {}\n", dest_dir.display()));
    out
}

fn push_listing(out: &mut String, names: &[String], limit: usize) {
    for name in names.iter().take(limit) {
        out.push_str(&format!("    - {name}\n"));
    }
    if names.len() > limit {
        out.push_str(&format!("    - ... and {} more\n", names.len() - limit));
    }
}
