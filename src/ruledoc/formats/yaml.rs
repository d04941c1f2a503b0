//! YAML export of the document model

use crate::ruledoc::ast::Document;
use crate::ruledoc::formats::registry::{FormatError, Formatter};

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn description(&self) -> &str {
        "Document model as YAML"
    }

    fn file_extension(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serde_yaml::to_string(doc).map_err(|e| FormatError::SerializationError(e.to_string()))
    }
}
