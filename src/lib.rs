//! Wrikka Design System Core
//!
//! The component metadata registry and flat-file content engine backing the
//! Wrikka design system.
//!
//! ## Features
//!
//! - **Component Registry**: in-memory descriptor collection with derived
//!   category/tag indexes, status filtering, substring search, relation
//!   resolution, stats, and snapshot export/import
//! - **Content Resolver**: logical path + query resolution over a store of
//!   markdown files with front-matter headers, including blog-index
//!   aggregation
//! - **Typed Outcomes**: resolution never throws; not-found and parse
//!   failures are structured, inspectable results
//! - **Layered Configuration**: wrikka.toml, XDG config, and `WRIKKA_*`
//!   environment overrides
//!
//! ## Architecture
//!
//! ```text
//! content/
//! ├── docs/
//! │   ├── index.md
//! │   ├── getting-started.md
//! │   └── guides/
//! │       ├── index.md
//! │       └── quickstart.md
//! └── blog/
//!     ├── index.md
//!     ├── post-a.md
//!     └── post-b.md
//! ```

pub mod config;
pub mod content;
pub mod descriptor;
pub mod error;
pub mod registry;

pub use config::WrikkaConfig;
pub use content::{
    ContentDocument, ContentNotFound, ContentOutcome, ContentQuery, ContentRequest,
    ContentResolver, SortDirection,
};
pub use descriptor::{
    load_descriptors, ComponentCategory, ComponentDescriptor, ComponentExample, ComponentStatus,
};
pub use error::{Result, WrikkaError};
pub use registry::{ComponentRegistry, RegistrySnapshot, RegistryStats};
