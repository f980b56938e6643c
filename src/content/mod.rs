//! Content resolution engine
//!
//! Maps a logical content path plus a query/sort/limit specification onto a
//! hierarchical store of markdown files with front-matter headers. Documents
//! are parsed fresh on every read; the backing files are the source of truth.

pub mod document;
pub mod frontmatter;
pub mod query;
pub mod resolver;

pub use document::ContentDocument;
pub use query::{ContentQuery, SortDirection};
pub use resolver::{ContentNotFound, ContentOutcome, ContentRequest, ContentResolver};
