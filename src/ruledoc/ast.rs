//! Document model
//!
//! The tree the scanner builds and the formatters read:
//!
//! ```text
//! Document
//! ├── title, description
//! └── Section*
//!     ├── name, description
//!     └── Rule*
//!         ├── name, severity, description
//!         └── Example* (kind, label, content)
//! ```
//!
//! Every node owns its children outright; there are no back references. The
//! model is filled in once during scanning and only read afterwards.
//!
//! Description and content lines are stored exactly as captured (document and
//! section descriptions already carry their hard-break suffix), so formatters
//! can emit them without further processing.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub title: Option<String>,
    pub description: Vec<String>,
    pub sections: Vec<Section>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// All rules across all sections, in document order.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.sections.iter().flat_map(|section| section.rules.iter())
    }

    /// First rule with the given name, searching sections in order.
    pub fn find_rule(&self, name: &str) -> Option<&Rule> {
        self.rules().find(|rule| rule.name == name)
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_empty() && self.sections.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    pub description: Vec<String>,
    pub rules: Vec<Rule>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: Vec::new(),
            rules: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub name: String,
    pub severity: String,
    pub description: Vec<String>,
    pub examples: Vec<Example>,
}

impl Rule {
    pub fn new(name: impl Into<String>, severity: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            severity: severity.into(),
            description: Vec::new(),
            examples: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub kind: ExampleKind,
    pub label: Option<String>,
    pub content: Vec<String>,
}

impl Example {
    pub fn new(kind: ExampleKind, label: Option<String>) -> Self {
        Self {
            kind,
            label,
            content: Vec::new(),
        }
    }
}

/// Whether an example shows compliant or non-compliant usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExampleKind {
    Valid,
    Invalid,
}

impl ExampleKind {
    /// Parse the keyword of an example header, ignoring case.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        if keyword.eq_ignore_ascii_case("valid") {
            Some(ExampleKind::Valid)
        } else if keyword.eq_ignore_ascii_case("invalid") {
            Some(ExampleKind::Invalid)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExampleKind::Valid => "valid",
            ExampleKind::Invalid => "invalid",
        }
    }

    /// Capitalized form used in rendered example labels.
    pub fn heading(&self) -> &'static str {
        match self {
            ExampleKind::Valid => "Valid",
            ExampleKind::Invalid => "Invalid",
        }
    }
}

impl fmt::Display for ExampleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
