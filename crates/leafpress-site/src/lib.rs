//! Leafpress Site Library
//!
//! Content registry and static site generation for leafpress.
//!
//! # Modules
//!
//! - [`registry`] - Slug-keyed index of validated content records
//! - [`collector`] - Content discovery and parsing
//! - [`template`] - HTML template system with variable interpolation
//! - [`html`] - Article and listing page generation
//! - [`build`] - Build orchestration

pub mod build;
pub mod collector;
pub mod html;
pub mod registry;
pub mod template;

pub use build::{BuildError, BuildStats, Builder};
pub use collector::{CollectorError, ContentCollector};
pub use html::HtmlGenerator;
pub use registry::{ContentRegistry, TaxonomyIndex, TaxonomyTerm};
pub use template::{Template, TemplateContext, TemplateRegistry};
