//! Main module for ruledoc library functionality

pub mod ast;
pub mod classification;
pub mod config;
pub mod error;
pub mod formats;
pub mod loader;
pub mod scanning;
pub mod testing;

pub use ast::{Document, Example, ExampleKind, Rule, Section};
pub use error::{Result, RuledocError};
pub use formats::{FormatError, FormatRegistry, Formatter};
pub use loader::StyleGuideLoader;
pub use scanning::{compile, compile_with, ScanOptions};
