//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::core::errors::{ConversionError, Result};
use crate::core::models::{DocumentId, Manifest};

/// Replacement applied to every output document after conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathRewrite {
    pub from: String,
    pub to: String,
}

impl PathRewrite {
    /// Replace every non-overlapping occurrence of `from`, left to right
    pub fn apply(&self, text: &str) -> String {
        if self.from.is_empty() {
            return text.to_string();
        }
        text.replace(&self.from, &self.to)
    }
}

impl Default for PathRewrite {
    fn default() -> Self {
        Self {
            from: "/zht/".to_string(),
            to: "/".to_string(),
        }
    }
}

/// Configuration for a conversion run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    pub source_root: PathBuf,
    pub dest_root: PathBuf,
    pub manifest: Vec<String>,
    /// Sentinel markers; a document starting with one is copied verbatim,
    /// elsewhere a pair of the same marker fences an unconverted region
    pub markers: Vec<String>,
    pub path_rewrite: PathRewrite,
    pub jobs: usize,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from("src/zht"),
            dest_root: PathBuf::from("src"),
            manifest: DEFAULT_MANIFEST.iter().map(|id| id.to_string()).collect(),
            markers: DEFAULT_MARKERS.iter().map(|m| m.to_string()).collect(),
            path_rewrite: PathRewrite::default(),
            jobs: 1,
        }
    }
}

/// Default sentinel markers
pub const DEFAULT_MARKERS: &[&str] = &["<!-- do not translate -->", "<!-- verbatim -->"];

/// Pages of the documentation site, in publishing order
pub const DEFAULT_MANIFEST: &[&str] = &[
    "/index.md",
    "/docs/index.md",
    "/docs/changelog.md",
    "/docs/developing.md",
    "/docs/technical.md",
    "/docs/discussion.md",
    "/docs/background.md",
    "/docs/statistics.md",
    "/docs/concepts.md",
    "/docs/coding.md",
    "/docs/guji.md",
    "/docs/yuniversus.md",
    "/docs/star.md",
    "/docs/light.md",
    "/docs/wafel.md",
    "/docs/ming.md",
    "/docs/ling.md",
    "/docs/joy.md",
    "/docs/characteristics.md",
    "/docs/coverage.md",
    "/docs/faq.md",
    "/docs/gene.md",
    // 教程
    "/learn/index.md",
    "/learn/division.md",
    "/learn/prohibition.md",
    "/learn/intrinsic.md",
    "/learn/variation.md",
    "/learn/radicals.md",
    "/learn/grouping.md",
    "/learn/machine.md",
    // 星陳
    "/learn/roots.md",
    "/learn/chars.md",
    "/learn/quick.md",
    "/learn/words.md",
    "/learn/lexicon.md",
    // 日月
    "/learn/roots_ming.md",
    "/learn/chars_ming.md",
    // 靈明
    "/learn/roots_ling.md",
    "/learn/chars_ling.md",
    "/learn/quick_ling.md",
    // 例子
    "/learn/examples.md",
    "/learn/frequent.md",
    "/learn/frequent_tc.md",
    // 練習
    "/practice/root.md",
    "/practice/char.md",
    "/practice/char_tw.md",
    "/practice/root_light.md",
    "/practice/char_light.md",
    "/practice/root_joy.md",
    "/practice/char_joy.md",
    "/practice/char_joy_zhu.md",
    "/practice/root_ming.md",
    "/practice/char_ming.md",
    "/practice/char_ming_zhu.md",
    "/practice/root_ling.md",
    "/practice/char_ling.md",
    "/practice/char_ling_zhu.md",
    "/practice/root_wafel.md",
    "/practice/tupa.md",
    "/practice/root_sky.md",
    // 安裝
    "/docs/install.md",
    // 在線輸入
    "/pad/ling.md",
    "/pad/ling5.md",
    "/pad/ming.md",
    "/diy/index.md",
    // 大觀
    "/ime/index.md",
    "/ime/sypy.md",
    "/ime/sky.md",
    "/ime/xuma.md",
    "/ime/yima.md",
    "/ime/sbmm.md",
];

impl ConverterConfig {
    /// Defaults overridden by `TC2SC_*` environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Load from JSON file; missing fields keep their defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConversionError::file(path, e))?;
        let config: Self = serde_json::from_str(&content)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save configuration to file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConversionError::file(path, e))?;
        Ok(())
    }

    /// Overlay `TC2SC_SOURCE_ROOT`, `TC2SC_DEST_ROOT` and `TC2SC_JOBS`
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(root) = std::env::var("TC2SC_SOURCE_ROOT") {
            self.source_root = PathBuf::from(root);
        }

        if let Ok(root) = std::env::var("TC2SC_DEST_ROOT") {
            self.dest_root = PathBuf::from(root);
        }

        if let Ok(jobs) = std::env::var("TC2SC_JOBS") {
            self.jobs = jobs
                .parse::<usize>()
                .map_err(|e| ConversionError::config(format!("TC2SC_JOBS: {}", e)))?;
        }

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.markers.is_empty() {
            return Err(ConversionError::config("at least one marker is required"));
        }

        if self.markers.iter().any(|m| m.is_empty()) {
            return Err(ConversionError::config("markers must not be empty"));
        }

        if self.path_rewrite.from.is_empty() {
            return Err(ConversionError::config("path_rewrite.from must not be empty"));
        }

        if self.jobs == 0 {
            return Err(ConversionError::config("jobs must be greater than 0"));
        }

        if self.source_root == self.dest_root {
            warn!(
                "source_root and dest_root are both {}; documents will be overwritten in place",
                self.source_root.display()
            );
        }

        self.manifest()?;
        Ok(())
    }

    /// Parsed manifest
    pub fn manifest(&self) -> Result<Manifest> {
        Manifest::parse(self.manifest.iter().cloned())
    }

    /// Replace the manifest with every Markdown file under `source_root`
    pub fn scan_manifest(&mut self) -> Result<usize> {
        let root = &self.source_root;
        if !root.is_dir() {
            return Err(ConversionError::FileError {
                path: root.display().to_string(),
                message: "Not a directory".to_string(),
            });
        }

        let mut ids = Vec::new();
        for entry in walkdir::WalkDir::new(root).into_iter() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry during scan: {}", e);
                    continue;
                }
            };
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }
            let Ok(relative) = path.strip_prefix(root) else {
                continue;
            };
            let id = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            ids.push(DocumentId::parse(format!("/{}", id))?);
        }
        ids.sort();

        info!("Found {} Markdown files under {}", ids.len(), root.display());
        self.manifest = ids.into_iter().map(String::from).collect();
        Ok(self.manifest.len())
    }
}

/// Check if file is Markdown
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            ext == "md" || ext == "markdown"
        })
        .unwrap_or(false)
}
