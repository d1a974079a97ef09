//! leafpress Core Library
//!
//! Content record types, record file loading, schema validation and site
//! configuration for the leafpress article toolkit.

pub mod config;
pub mod error;
pub mod meta;
pub mod record;
pub mod section;
pub mod validate;

pub use config::Config;
pub use error::{CoreError, NotFoundError, Result};
pub use meta::ArticleMeta;
pub use record::{ContentRecord, RecordFormat, TocEntry};
pub use section::{
    Block, Checklist, ComparisonTable, QaPair, QaStyle, Reference, Section, SectionKind,
    SectionSource,
};
pub use validate::{ValidationError, Violation, Warning};
