use std::path::Path;

use regex::Regex;
use tracing::debug;

use crate::error::{OrganizeError, Result};
use crate::fs::FileSystem;

const VERSION_BODY: &str = r"[0-9]+\.[0-9]+\.[0-9]+(?:-[^_]+)?";

#[derive(Debug, Clone)]
pub struct VersionPatterns {
    prefixed: Regex,
    loose: Regex,
    header: Regex,
}

impl VersionPatterns {
    pub fn new(product: &str) -> Result<Self> {
        let product = regex::escape(product);
        Ok(Self {
            prefixed: compile(&format!("{product}_({VERSION_BODY})_"))?,
            loose: compile(&format!("({VERSION_BODY})"))?,
            header: compile(&format!(r#"#define\s+{product}_VERSION\s+"([^"]+)""#))?,
        })
    }

    pub fn extract(&self, file_name: &str) -> Option<String> {
        self.prefixed
            .captures(file_name)
            .or_else(|| self.loose.captures(file_name))
            .and_then(|captures| captures.get(1))
            .map(|found| found.as_str().to_string())
    }

    pub fn parse_header(&self, contents: &str) -> Option<String> {
        self.header
            .captures(contents)
            .and_then(|captures| captures.get(1))
            .map(|found| found.as_str().to_string())
    }

    pub fn header_version(&self, fs: &dyn FileSystem, header: &Path, default: &str) -> String {
        match fs.read_to_string(header) {
            Ok(contents) => self.parse_header(&contents).unwrap_or_else(|| {
                debug!("no version define in {}", header.display());
                default.to_string()
            }),
            Err(err) => {
                debug!("cannot read header {}: {}", header.display(), err);
                default.to_string()
            }
        }
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|err| OrganizeError::InvalidPattern {
        pattern: pattern.to_string(),
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::VersionPatterns;
    use crate::fs::memory::MemoryFileSystem;

    fn wled() -> VersionPatterns {
        VersionPatterns::new("WLED").expect("patterns compile")
    }

    #[test]
    fn extracts_prefixed_versions() {
        let patterns = wled();
        assert_eq!(
            patterns.extract("WLED_0.15.1_esp32_devb_dallas.bin").as_deref(),
            Some("0.15.1")
        );
        assert_eq!(
            patterns.extract("WLED_0.16.0-alpha_esp32s3.bin").as_deref(),
            Some("0.16.0-alpha")
        );
        assert_eq!(
            patterns.extract("WLED_10.2.33_universal_shield.bin").as_deref(),
            Some("10.2.33")
        );
    }

    #[test]
    fn falls_back_to_embedded_version() {
        let patterns = wled();
        assert_eq!(
            patterns.extract("esp32_build_1.2.3_final.bin").as_deref(),
            Some("1.2.3")
        );
        assert_eq!(
            patterns.extract("OTHER_2.0.0_board.bin").as_deref(),
            Some("2.0.0")
        );
    }

    #[test]
    fn reports_missing_version() {
        let patterns = wled();
        assert_eq!(patterns.extract("esp32_universal_shield.bin"), None);
        assert_eq!(patterns.extract("WLED_1.2_esp32.bin"), None);
    }

    #[test]
    fn product_name_is_matched_literally() {
        let patterns = VersionPatterns::new("W.LED").expect("patterns compile");
        assert_eq!(
            patterns.extract("W.LED_1.0.0_board.bin").as_deref(),
            Some("1.0.0")
        );
    }

    #[test]
    fn parses_version_from_header() {
        let fs = MemoryFileSystem::default();
        fs.add_file(
            "wled00/wled.h",
            b"#pragma once\n#define WLED_VERSION   \"0.15.2-b1\"\n#define VERSION 2410\n",
        );
        let version = wled().header_version(&fs, Path::new("wled00/wled.h"), "0.16.0-alpha");
        assert_eq!(version, "0.15.2-b1");
    }

    #[test]
    fn header_fallback_uses_default_when_missing_or_unparsable() {
        let fs = MemoryFileSystem::default();
        let patterns = wled();
        assert_eq!(
            patterns.header_version(&fs, Path::new("wled00/wled.h"), "0.16.0-alpha"),
            "0.16.0-alpha"
        );

        fs.add_file("wled00/wled.h", b"#define VERSION 2410\n");
        assert_eq!(
            patterns.header_version(&fs, Path::new("wled00/wled.h"), "0.16.0-alpha"),
            "0.16.0-alpha"
        );
    }
}
