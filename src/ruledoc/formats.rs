//! Output formats for compiled style guides
//!
//! - `markdown`: the style guide itself (sections, rules, severities, examples)
//! - `json` / `yaml`: the document model as data, for pipelines that template
//!   their own output

pub mod json;
pub mod markdown;
pub mod registry;
pub mod yaml;

pub use json::JsonFormatter;
pub use markdown::{MarkdownFormatter, SeverityPalette};
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use yaml::YamlFormatter;
