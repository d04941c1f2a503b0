//! JSON export of the document model

use crate::ruledoc::ast::Document;
use crate::ruledoc::formats::registry::{FormatError, Formatter};

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Document model as pretty-printed JSON"
    }

    fn file_extension(&self) -> &str {
        "json"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        let mut output = serde_json::to_string_pretty(doc)
            .map_err(|e| FormatError::SerializationError(e.to_string()))?;
        output.push('\n');
        Ok(output)
    }
}
