use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use globset::{Glob, GlobMatcher};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::categorize::{categorize, environment_name};
use crate::config::OrganizerConfig;
use crate::error::{OrganizeError, Result};
use crate::fs::FileSystem;
use crate::layout::{create_version_layout, relative_destination};
use crate::model::{
    Category, CategoryBucket, FileOutcome, FirmwareFile, OrganizeEvent, OrganizeReport,
    VersionSummary, REPORT_VERSION,
};
use crate::version::VersionPatterns;

pub type VersionGroups = BTreeMap<String, Vec<PathBuf>>;

pub fn organize(config: &OrganizerConfig, fs: &dyn FileSystem) -> Result<OrganizeReport> {
    organize_with_callback(config, fs, |_| {})
}

pub fn organize_with_callback<F>(
    config: &OrganizerConfig,
    fs: &dyn FileSystem,
    mut on_event: F,
) -> Result<OrganizeReport>
where
    F: FnMut(&OrganizeEvent),
{
    config.validate()?;
    let patterns = VersionPatterns::new(&config.product)?;
    let matcher = compile_file_glob(&config.file_glob)?;

    let files = discover_firmware(fs, &config.source_dir, &matcher)?;
    if files.is_empty() {
        return Err(OrganizeError::NoMatchingFiles {
            path: config.source_dir.clone(),
            pattern: config.file_glob.clone(),
        });
    }

    let (mut groups, mut unrecognized) = group_by_version(&files, &patterns);
    let mut header_version = None;
    if groups.is_empty() && !unrecognized.is_empty() {
        let version =
            patterns.header_version(fs, &config.header_path, &config.default_version);
        on_event(&OrganizeEvent::HeaderFallback {
            version: version.clone(),
        });
        groups.insert(version.clone(), std::mem::take(&mut unrecognized));
        header_version = Some(version);
    }
    if groups.is_empty() {
        return Err(OrganizeError::UnresolvableVersion);
    }

    on_event(&OrganizeEvent::Discovered {
        total_files: files.len(),
        groups: groups
            .iter()
            .map(|(version, paths)| (version.clone(), paths.len()))
            .collect(),
    });

    let mut outcomes = Vec::new();
    let mut versions = Vec::new();
    for (version, paths) in &groups {
        on_event(&OrganizeEvent::VersionStarted {
            version: version.clone(),
        });
        create_version_layout(fs, &config.dest_dir, version)?;

        let mut summary = VersionSummary {
            version: version.clone(),
            from_header: header_version.as_deref() == Some(version.as_str()),
            root_files: Vec::new(),
            categories: Vec::new(),
            organized: 0,
            failed: 0,
        };
        let mut buckets: BTreeMap<&'static str, CategoryBucket> = BTreeMap::new();

        for path in paths {
            let firmware = classify(path, version, config);
            let outcome = copy_firmware(fs, &config.dest_dir, &firmware);
            if outcome.is_success() {
                summary.organized += 1;
            } else {
                summary.failed += 1;
            }

            match firmware.category {
                Some(category) => buckets
                    .entry(category.dir_name())
                    .or_insert_with(|| CategoryBucket {
                        category,
                        files: Vec::new(),
                    })
                    .files
                    .push(firmware.file_name.clone()),
                None => summary.root_files.push(firmware.file_name.clone()),
            }

            on_event(&OrganizeEvent::FileProcessed(outcome.clone()));
            outcomes.push(outcome);
        }

        summary.categories = buckets.into_values().collect();
        on_event(&OrganizeEvent::VersionFinished(summary.clone()));
        versions.push(summary);
    }

    let unrecognized_files = unrecognized
        .iter()
        .map(|path| file_name_of(path))
        .collect::<Vec<_>>();
    if !unrecognized_files.is_empty() {
        warn!(
            "{} file(s) with unrecognized version patterns were not organized",
            unrecognized_files.len()
        );
    }

    let total_organized = versions.iter().map(|summary| summary.organized).sum();
    let failed = versions.iter().map(|summary| summary.failed).sum();
    info!(
        "organized {} file(s) into {} ({} failed)",
        total_organized,
        config.dest_dir.display(),
        failed
    );

    Ok(OrganizeReport {
        report_version: REPORT_VERSION.to_string(),
        run_id: Uuid::new_v4().to_string(),
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        source_dir: config.source_dir.to_string_lossy().to_string(),
        dest_dir: config.dest_dir.to_string_lossy().to_string(),
        versions,
        files: outcomes,
        unrecognized_files,
        total_organized,
        failed,
    })
}

pub fn clean_destination(fs: &dyn FileSystem, dest_dir: &Path) -> Result<bool> {
    if !fs.is_dir(dest_dir) {
        return Ok(false);
    }
    fs.remove_tree(dest_dir)
        .map_err(|err| OrganizeError::io(dest_dir, err))?;
    info!("removed destination tree {}", dest_dir.display());
    Ok(true)
}

pub fn discover_firmware(
    fs: &dyn FileSystem,
    source_dir: &Path,
    matcher: &GlobMatcher,
) -> Result<Vec<PathBuf>> {
    if !fs.is_dir(source_dir) {
        return Err(OrganizeError::MissingSourceDirectory {
            path: source_dir.to_path_buf(),
        });
    }
    let files = fs
        .list_files(source_dir)
        .map_err(|err| OrganizeError::io(source_dir, err))?;
    Ok(files
        .into_iter()
        .filter(|path| {
            path.file_name()
                .is_some_and(|name| matcher.is_match(Path::new(name)))
        })
        .collect())
}

pub fn group_by_version(
    files: &[PathBuf],
    patterns: &VersionPatterns,
) -> (VersionGroups, Vec<PathBuf>) {
    let mut groups = VersionGroups::new();
    let mut unrecognized = Vec::new();
    for path in files {
        match patterns.extract(&file_name_of(path)) {
            Some(version) => groups.entry(version).or_default().push(path.clone()),
            None => unrecognized.push(path.clone()),
        }
    }
    (groups, unrecognized)
}

pub fn classify(path: &Path, version: &str, config: &OrganizerConfig) -> FirmwareFile {
    let file_name = file_name_of(path);
    let env_name = environment_name(&file_name, &config.product, version, &config.extension);
    let category = categorize(&env_name, &config.rules);
    debug!(
        "{} -> env '{}' category {}",
        file_name,
        env_name,
        category.map(Category::dir_name).unwrap_or("<root>")
    );
    FirmwareFile {
        path: path.to_path_buf(),
        file_name,
        version: version.to_string(),
        category,
    }
}

fn copy_firmware(fs: &dyn FileSystem, dest_dir: &Path, firmware: &FirmwareFile) -> FileOutcome {
    let destination =
        relative_destination(&firmware.version, firmware.category, &firmware.file_name);
    let error = match fs.copy_file(&firmware.path, &dest_dir.join(&destination)) {
        Ok(()) => None,
        Err(err) => {
            warn!("failed to copy {}: {}", firmware.path.display(), err);
            Some(err.to_string())
        }
    };
    FileOutcome {
        file_name: firmware.file_name.clone(),
        version: firmware.version.clone(),
        category: firmware.category,
        destination,
        error,
    }
}

fn compile_file_glob(pattern: &str) -> Result<GlobMatcher> {
    Glob::new(pattern)
        .map(|glob| glob.compile_matcher())
        .map_err(|err| OrganizeError::InvalidPattern {
            pattern: pattern.to_string(),
            message: err.to_string(),
        })
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}
