//! Style guide loading and generation
//!
//! `StyleGuideLoader` is the entry point for file-level work:
//!
//! - String-based methods (`compile`, `render`) are the core operations
//! - File-based methods (`load`, `generate`, ...) read or write files and
//!   delegate to the string methods
//! - Directory mode (`generate_all`) compiles every ruleset under a tree into
//!   its own style guide
//!
//! ```rust,ignore
//! use ruledoc::ruledoc::StyleGuideLoader;
//!
//! let loader = StyleGuideLoader::new();
//! let markdown = loader.load_and_render("api-ruleset.yaml", "markdown")?;
//! let written = loader.generate_all("rulesets/", "docs/")?;
//! ```

use crate::ruledoc::ast::Document;
use crate::ruledoc::config::{BatchConfig, RuledocConfig};
use crate::ruledoc::error::{Result, RuledocError};
use crate::ruledoc::formats::{FormatError, FormatRegistry};
use crate::ruledoc::scanning::{compile_with, ScanOptions};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub struct StyleGuideLoader {
    options: ScanOptions,
    registry: FormatRegistry,
    format: String,
    batch: BatchConfig,
}

impl StyleGuideLoader {
    /// A loader using the built-in defaults.
    pub fn new() -> Self {
        Self {
            options: ScanOptions::default(),
            registry: FormatRegistry::with_defaults(),
            format: "markdown".to_string(),
            batch: BatchConfig {
                ruleset_suffix: "-ruleset.yaml".to_string(),
                output_suffix: "_STYLE_GUIDE.md".to_string(),
            },
        }
    }

    pub fn from_config(config: &RuledocConfig) -> Self {
        Self {
            options: config.scan_options(),
            registry: FormatRegistry::with_palette(config.palette()),
            format: config.render.format.clone(),
            batch: config.batch.clone(),
        }
    }

    pub fn registry(&self) -> &FormatRegistry {
        &self.registry
    }

    /// Format used when the caller does not ask for one.
    pub fn default_format(&self) -> &str {
        &self.format
    }

    pub fn compile(&self, source: &str) -> Document {
        compile_with(source, &self.options)
    }

    pub fn render(&self, doc: &Document, format: &str) -> Result<String> {
        Ok(self.registry.serialize(doc, format)?)
    }

    /// Read and compile a ruleset file.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Document> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| RuledocError::io(path, e))?;
        debug!(path = %path.display(), bytes = source.len(), "loaded ruleset");
        Ok(self.compile(&source))
    }

    pub fn load_and_render(&self, path: impl AsRef<Path>, format: &str) -> Result<String> {
        let doc = self.load(path)?;
        self.render(&doc, format)
    }

    /// Compile `input` and write the result to `output`.
    ///
    /// With no output path the rendered text is returned for the caller to
    /// print; with one, the file is written and `None` is returned.
    pub fn generate(
        &self,
        input: impl AsRef<Path>,
        output: Option<&Path>,
        format: &str,
    ) -> Result<Option<String>> {
        let rendered = self.load_and_render(input, format)?;
        match output {
            Some(path) => {
                write_output(path, &rendered)?;
                info!(path = %path.display(), "generated style guide");
                Ok(None)
            }
            None => Ok(Some(rendered)),
        }
    }

    /// Ruleset files under `dir`, searched recursively, in sorted order.
    pub fn find_ruleset_files(&self, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        collect_files(dir.as_ref(), &self.batch.ruleset_suffix, &mut files)?;
        files.sort();
        Ok(files)
    }

    /// Output file name for a ruleset: `api-ruleset.yaml` becomes
    /// `API_STYLE_GUIDE.md` with the default suffixes. The extension of the
    /// output suffix is replaced by `extension`.
    pub fn output_name(&self, ruleset: &Path, extension: &str) -> Option<String> {
        let file_name = ruleset.file_name()?.to_str()?;
        let base = file_name.strip_suffix(&self.batch.ruleset_suffix)?;
        let stem = self
            .batch
            .output_suffix
            .rsplit_once('.')
            .map_or(self.batch.output_suffix.as_str(), |(stem, _)| stem);
        Some(format!("{}{stem}.{extension}", base.to_uppercase()))
    }

    /// Compile every ruleset under `dir` into `out_dir`, returning the paths
    /// written.
    pub fn generate_all(
        &self,
        dir: impl AsRef<Path>,
        out_dir: impl AsRef<Path>,
        format: &str,
    ) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        let out_dir = out_dir.as_ref();
        let extension = self
            .registry
            .get(format)
            .ok_or_else(|| FormatError::FormatNotFound(format.to_string()))?
            .file_extension()
            .to_string();
        let rulesets = self.find_ruleset_files(dir)?;
        if rulesets.is_empty() {
            info!(
                dir = %dir.display(),
                suffix = %self.batch.ruleset_suffix,
                "no ruleset files found"
            );
            return Ok(Vec::new());
        }

        fs::create_dir_all(out_dir).map_err(|e| RuledocError::io(out_dir, e))?;

        let mut written = Vec::with_capacity(rulesets.len());
        for ruleset in &rulesets {
            let Some(name) = self.output_name(ruleset, &extension) else {
                continue;
            };
            let target = out_dir.join(name);
            self.generate(ruleset, Some(target.as_path()), format)?;
            written.push(target);
        }
        Ok(written)
    }
}

impl Default for StyleGuideLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn collect_files(dir: &Path, suffix: &str, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|e| RuledocError::io(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| RuledocError::io(dir, e))?;
        let path = entry.path();
        // DirEntry::file_type does not follow symlinks, so linked directories
        // are never descended into.
        let file_type = entry.file_type().map_err(|e| RuledocError::io(&path, e))?;
        if file_type.is_dir() {
            collect_files(&path, suffix, files)?;
        } else if path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(suffix))
        {
            files.push(path);
        }
    }
    Ok(())
}

fn write_output(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| RuledocError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ruledoc::config::load_defaults;
    use tempfile::TempDir;

    const RULESET: &str = "\
# Title: API Guide
# Section: Paths
rules:
  # Paths use kebab-case.
  path-kebab-case: error
";

    fn write(dir: &Path, relative: &str, content: &str) -> PathBuf {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = StyleGuideLoader::new()
            .load("/nonexistent/api-ruleset.yaml")
            .unwrap_err();
        assert!(matches!(err, RuledocError::Io { .. }));
    }

    #[test]
    fn test_generate_to_stdout_returns_text() {
        let tmp = TempDir::new().unwrap();
        let input = write(tmp.path(), "api-ruleset.yaml", RULESET);

        let output = StyleGuideLoader::new()
            .generate(&input, None, "markdown")
            .unwrap()
            .unwrap();
        assert!(output.starts_with("# API Guide\n"));
        assert!(output.contains("### path-kebab-case\n"));
    }

    #[test]
    fn test_generate_to_file() {
        let tmp = TempDir::new().unwrap();
        let input = write(tmp.path(), "api-ruleset.yaml", RULESET);
        let target = tmp.path().join("guide.md");

        let returned = StyleGuideLoader::new()
            .generate(&input, Some(target.as_path()), "markdown")
            .unwrap();
        assert!(returned.is_none());
        assert!(fs::read_to_string(&target)
            .unwrap()
            .contains("Paths use kebab-case."));
    }

    #[test]
    fn test_unknown_format_is_reported() {
        let loader = StyleGuideLoader::new();
        let err = loader.render(&loader.compile(RULESET), "pdf").unwrap_err();
        assert_eq!(err.to_string(), "Format 'pdf' not found");
    }

    #[test]
    fn test_output_name() {
        let loader = StyleGuideLoader::new();
        assert_eq!(
            loader.output_name(Path::new("rules/api-ruleset.yaml"), "md"),
            Some("API_STYLE_GUIDE.md".to_string())
        );
        assert_eq!(
            loader.output_name(Path::new("rules/api-ruleset.yaml"), "json"),
            Some("API_STYLE_GUIDE.json".to_string())
        );
        assert_eq!(loader.output_name(Path::new("rules/notes.yaml"), "md"), None);
    }

    #[test]
    fn test_generate_all_uses_format_extension() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "src/api-ruleset.yaml", RULESET);
        let out = tmp.path().join("out");

        let written = StyleGuideLoader::new()
            .generate_all(tmp.path().join("src"), &out, "json")
            .unwrap();
        assert_eq!(written, vec![out.join("API_STYLE_GUIDE.json")]);
        assert!(fs::read_to_string(&written[0])
            .unwrap()
            .contains("\"name\": \"path-kebab-case\""));
    }

    #[test]
    fn test_generate_all_rejects_unknown_format_before_writing() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "src/api-ruleset.yaml", RULESET);
        let out = tmp.path().join("out");

        let err = StyleGuideLoader::new()
            .generate_all(tmp.path().join("src"), &out, "pdf")
            .unwrap_err();
        assert!(matches!(err, RuledocError::Format(FormatError::FormatNotFound(_))));
        assert!(!out.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_find_ruleset_files_skips_symlinked_directories() {
        let tmp = TempDir::new().unwrap();
        let rules = tmp.path().join("rules");
        write(&rules, "api-ruleset.yaml", RULESET);
        std::os::unix::fs::symlink(&rules, rules.join("self")).unwrap();

        let loader = StyleGuideLoader::new();
        let found = loader.find_ruleset_files(&rules).unwrap();
        assert_eq!(found, vec![rules.join("api-ruleset.yaml")]);

        let out = tmp.path().join("out");
        let written = loader.generate_all(&rules, &out, "markdown").unwrap();
        assert_eq!(written, vec![out.join("API_STYLE_GUIDE.md")]);
    }

    #[test]
    fn test_generate_all_walks_subdirectories() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        write(&src, "api-ruleset.yaml", RULESET);
        write(&src, "nested/events-ruleset.yaml", RULESET);
        write(&src, "nested/README.md", "not a ruleset");
        let out = tmp.path().join("out");

        let written = StyleGuideLoader::new()
            .generate_all(&src, &out, "markdown")
            .unwrap();
        assert_eq!(
            written,
            vec![out.join("API_STYLE_GUIDE.md"), out.join("EVENTS_STYLE_GUIDE.md")]
        );
        for path in &written {
            assert!(fs::read_to_string(path).unwrap().starts_with("# API Guide\n"));
        }
    }

    #[test]
    fn test_generate_all_with_no_rulesets() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("out");
        let written = StyleGuideLoader::new()
            .generate_all(tmp.path(), &out, "markdown")
            .unwrap();
        assert!(written.is_empty());
        assert!(!out.exists());
    }

    #[test]
    fn test_from_config_uses_configured_defaults() {
        let mut config = load_defaults().unwrap();
        config.scan.default_severity = "hint".to_string();
        config.render.error_color = "crimson".to_string();

        let loader = StyleGuideLoader::from_config(&config);
        let doc = loader.compile("# Section: S\nrules:\n  quiet:\n  loud: error\n");
        assert_eq!(doc.find_rule("quiet").unwrap().severity, "hint");

        let markdown = loader.render(&doc, loader.default_format()).unwrap();
        assert!(markdown.contains(r#"<span style="color:crimson">ERROR</span>"#));
        assert!(markdown.contains("#### Severity: HINT\n"));
    }
}
