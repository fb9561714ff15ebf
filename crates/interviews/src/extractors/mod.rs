// ABOUTME: Extraction of interview question records from rendered pages.
// ABOUTME: Includes the text cleaner, selector sets, field lookups, and record assembly.

//! Extraction module.
//!
//! Submodules:
//! - `clean`: text normalization applied to every field.
//! - `selectors`: selector set data model and compiled selector cache.
//! - `loader`: builtin and file-based selector sets.
//! - `fields`: lookup-with-default within a question block.
//! - `record`: block discovery and record assembly.

pub mod clean;
pub mod fields;
pub mod loader;
pub mod record;
pub mod selectors;
