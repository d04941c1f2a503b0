//! # ruledoc
//!
//! Compiles a comment-annotated ruleset (a YAML-ish lint configuration whose
//! `#` comments double as documentation) into a structured style guide.
//!
//! The work happens in two phases: [scanning](ruledoc::scanning) walks the
//! source lines once and builds a [`Document`](ruledoc::ast::Document), then a
//! [formatter](ruledoc::formats) projects that document into output text.
//!
//! ## Testing
//!
//! The [testing module](ruledoc::testing) provides fluent assertions over the
//! document model; prefer them over poking at struct fields in tests.

pub mod ruledoc;
