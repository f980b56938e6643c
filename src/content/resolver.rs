//! Content path resolution
//!
//! Drives a single request through path normalization, content-type
//! mapping, and the resolution chain: blog-index aggregation, directory
//! with index document, direct file hit, filtered directory listing, and
//! finally a structured not-found. Every failure path terminates in a
//! returned [`ContentOutcome`]; the resolver never propagates an error to
//! its caller.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::debug;
use walkdir::WalkDir;

use crate::config::{BlogIndexConfig, ContentConfig, WrikkaConfig};
use crate::content::document::ContentDocument;
use crate::content::frontmatter;
use crate::content::query::ContentQuery;
use crate::error::Result;

/// A single content request: logical path, optional content type, query
#[derive(Debug, Clone, Default)]
pub struct ContentRequest {
    /// Logical slash-separated path, relative to the content type root
    pub path: String,
    /// Content type key; the configured default applies when absent
    pub content_type: Option<String>,
    /// Filter/sort/limit specification
    pub query: ContentQuery,
}

impl ContentRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content_type: None,
            query: ContentQuery::new(),
        }
    }

    /// Set the content type
    pub fn with_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Set the query specification
    pub fn with_query(mut self, query: ContentQuery) -> Self {
        self.query = query;
        self
    }

    /// Decode the flat key/value wire contract: `path`, `query`, `sort`,
    /// `limit`, `single`, `type`.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self> {
        let get = |key: &str| params.get(key).map(String::as_str);

        let query = ContentQuery::from_wire(
            get("query").unwrap_or("{}"),
            get("sort").unwrap_or("{}"),
            get("limit").unwrap_or(""),
            get("single").unwrap_or("false"),
        )?;

        Ok(Self {
            path: get("path").unwrap_or("").to_string(),
            content_type: get("type").map(str::to_string),
            query,
        })
    }
}

/// Structured not-found result
///
/// A normal, reportable outcome — carries the attempted resolved path and,
/// when a failure was captured at the boundary, a diagnostic message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentNotFound {
    pub error: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ContentNotFound {
    fn new(path: impl Into<String>) -> Self {
        Self {
            error: "Content not found".to_string(),
            path: path.into(),
            details: None,
        }
    }

    fn with_details(path: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            details: Some(details.into()),
            ..Self::new(path)
        }
    }
}

/// Result of resolving a content request
#[derive(Debug, Clone, PartialEq)]
pub enum ContentOutcome {
    /// A single document
    Document(ContentDocument),
    /// An ordered document collection
    Documents(Vec<ContentDocument>),
    /// A blog index document together with its aggregated posts
    BlogIndex {
        index: ContentDocument,
        posts: Vec<ContentDocument>,
    },
    /// Single-mode request that matched nothing; serializes as JSON `null`
    Empty,
    /// Nothing matched the resolved path
    NotFound(ContentNotFound),
}

impl ContentOutcome {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentOutcome::NotFound(_))
    }

    pub fn as_document(&self) -> Option<&ContentDocument> {
        match self {
            ContentOutcome::Document(document) => Some(document),
            _ => None,
        }
    }

    pub fn as_documents(&self) -> Option<&[ContentDocument]> {
        match self {
            ContentOutcome::Documents(documents) => Some(documents),
            _ => None,
        }
    }
}

impl Serialize for ContentOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            ContentOutcome::Document(document) => document.serialize(serializer),
            ContentOutcome::Documents(documents) => documents.serialize(serializer),
            ContentOutcome::BlogIndex { index, posts } => {
                let mut value = index.to_value();
                if let Value::Object(object) = &mut value {
                    let posts =
                        serde_json::to_value(posts).map_err(serde::ser::Error::custom)?;
                    object.insert("posts".to_string(), posts);
                }
                value.serialize(serializer)
            }
            ContentOutcome::Empty => serializer.serialize_none(),
            ContentOutcome::NotFound(not_found) => not_found.serialize(serializer),
        }
    }
}

/// Resolves logical content paths against the backing file store.
///
/// Stateless and side-effect free per call: every invocation reads the
/// store directly and constructs documents fresh, so concurrent calls are
/// independent as long as the store itself is not mutated mid-read.
pub struct ContentResolver {
    content: ContentConfig,
    blog_index: BlogIndexConfig,
}

impl ContentResolver {
    pub fn new(content: ContentConfig, blog_index: BlogIndexConfig) -> Self {
        Self {
            content,
            blog_index,
        }
    }

    /// Build a resolver from a loaded configuration, with the content root
    /// resolved against the current directory.
    pub fn from_config(config: &WrikkaConfig) -> Self {
        let mut content = config.content.clone();
        content.dir = config.content_dir();
        Self::new(content, config.blog_index.clone())
    }

    /// Resolve a request assembled from flat wire parameters.
    ///
    /// Malformed parameters surface as the not-found shape, like every
    /// other failure.
    pub fn resolve_params(&self, params: &HashMap<String, String>) -> ContentOutcome {
        match ContentRequest::from_params(params) {
            Ok(request) => self.resolve(&request),
            Err(error) => ContentOutcome::NotFound(ContentNotFound::with_details(
                params.get("path").cloned().unwrap_or_default(),
                error.to_string(),
            )),
        }
    }

    /// Resolve a request to a document, a collection, or a structured
    /// not-found. Never panics and never returns an error: file-system and
    /// parse failures are captured here and reported as data.
    pub fn resolve(&self, request: &ContentRequest) -> ContentOutcome {
        let content_type = request
            .content_type
            .clone()
            .unwrap_or_else(|| self.content.default_type.clone());
        // Unmapped types pass through as their own directory name
        let sub_dir = self
            .content
            .types
            .get(&content_type)
            .cloned()
            .unwrap_or_else(|| content_type.clone());
        let type_dir = self.content.dir.join(sub_dir);

        let (bare, file) = normalize(&request.path, &self.content.extension);
        let attempted = type_dir.join(&file);

        match self.try_resolve(&content_type, &type_dir, &bare, &file, &request.query) {
            Ok(outcome) => outcome,
            Err(error) => {
                debug!(path = %attempted.display(), %error, "content resolution failed");
                ContentOutcome::NotFound(ContentNotFound::with_details(
                    attempted.display().to_string(),
                    error.to_string(),
                ))
            }
        }
    }

    fn try_resolve(
        &self,
        content_type: &str,
        type_dir: &Path,
        bare: &str,
        file: &str,
        query: &ContentQuery,
    ) -> Result<ContentOutcome> {
        let index_file = format!("index.{}", self.content.extension);

        // Blog-index aggregation: the index of the blog-mapped type lists
        // every sibling post.
        if self.blog_index.enabled
            && content_type == self.blog_index.content_type
            && file == index_file
            && type_dir.is_dir()
        {
            return self.resolve_blog_index(type_dir, &index_file);
        }

        // Directory with an index document, as long as no same-named file
        // shadows it.
        let dir = type_dir.join(bare);
        let direct = type_dir.join(file);
        if dir.is_dir() && dir.join(&index_file).is_file() && !direct.is_file() {
            debug!(path = %dir.display(), "resolved directory index");
            let document =
                self.parse_document(&dir.join(&index_file), format!("/{bare}"), "index")?;
            return Ok(ContentOutcome::Document(document));
        }

        // Direct file hit. The implicit-extension case collapses into this
        // one: `file` is the path with its own extension or with the
        // default appended during normalization.
        if direct.is_file() {
            debug!(path = %direct.display(), "resolved document");
            let id = file_stem(bare);
            let document = self.parse_document(&direct, format!("/{bare}"), &id)?;
            return Ok(ContentOutcome::Document(document));
        }

        // Directory listing with query evaluation
        if dir.is_dir() {
            debug!(path = %dir.display(), "resolved directory listing");
            let documents = self.list_documents(&dir, Some(bare), None)?;
            let mut documents = query.apply(documents);
            if query.single {
                return Ok(match documents.is_empty() {
                    true => ContentOutcome::Empty,
                    false => ContentOutcome::Document(documents.remove(0)),
                });
            }
            return Ok(ContentOutcome::Documents(documents));
        }

        Ok(ContentOutcome::NotFound(ContentNotFound::new(
            direct.display().to_string(),
        )))
    }

    fn resolve_blog_index(&self, type_dir: &Path, index_file: &str) -> Result<ContentOutcome> {
        let posts = self.list_documents(type_dir, None, Some(index_file))?;

        let sort = ContentQuery::new().sort_by(
            self.blog_index.sort_field.clone(),
            self.blog_index.sort_direction,
        );
        let posts = sort.apply(posts);
        debug!(posts = posts.len(), "aggregated blog index");

        let index_path = type_dir.join(index_file);
        if index_path.is_file() {
            let index = self.parse_document(&index_path, "/".to_string(), "index")?;
            return Ok(ContentOutcome::BlogIndex { index, posts });
        }

        // No index document: the bare sorted list stands alone
        Ok(ContentOutcome::Documents(posts))
    }

    /// Enumerate documents directly inside a directory (non-recursive),
    /// name-sorted for determinism. `parent` prefixes child display paths;
    /// `exclude` skips a filename (the index document during aggregation).
    fn list_documents(
        &self,
        dir: &Path,
        parent: Option<&str>,
        exclude: Option<&str>,
    ) -> Result<Vec<ContentDocument>> {
        let mut files: Vec<PathBuf> = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| {
                path.extension()
                    .is_some_and(|ext| ext == self.content.extension.as_str())
            })
            .collect();

        if let Some(exclude) = exclude {
            files.retain(|path| path.file_name() != Some(std::ffi::OsStr::new(exclude)));
        }

        let mut documents = Vec::with_capacity(files.len());
        for path in files {
            let stem = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
            let display = match parent {
                Some(parent) => format!("/{parent}/{stem}"),
                None => format!("/{stem}"),
            };
            documents.push(self.parse_document(&path, display, &stem)?);
        }
        Ok(documents)
    }

    fn parse_document(
        &self,
        file_path: &Path,
        display_path: String,
        id: &str,
    ) -> Result<ContentDocument> {
        let text = std::fs::read_to_string(file_path)?;
        let (front_matter, body) = frontmatter::parse(&text);
        Ok(ContentDocument::new(display_path, id, front_matter, body))
    }
}

/// Normalize a logical path: strip surrounding slashes, map the empty path
/// to `index`, and derive the bare form (no forced extension) alongside the
/// file form (default extension appended when the path carries none).
fn normalize(raw: &str, extension: &str) -> (String, String) {
    let mut path = raw.trim().trim_start_matches('/').trim_end_matches('/').to_string();
    if path.is_empty() {
        path = "index".to_string();
    }

    let suffix = format!(".{extension}");
    if let Some(bare) = path.strip_suffix(&suffix) {
        let bare = bare.to_string();
        (bare, path)
    } else if Path::new(&path).extension().is_some() {
        (path.clone(), path)
    } else {
        let file = format!("{path}{suffix}");
        (path, file)
    }
}

/// Last path segment without extension
fn file_stem(bare: &str) -> String {
    Path::new(bare)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| bare.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::SortDirection;
    use serde_json::json;
    use std::fs;

    fn write_store(root: &Path) {
        let docs = root.join("content/docs");
        fs::create_dir_all(docs.join("guides")).unwrap();
        fs::write(
            docs.join("getting-started.md"),
            "---\ntitle: \"Getting Started\"\ndraft: false\n---\nWelcome.",
        )
        .unwrap();
        fs::write(
            docs.join("guides/index.md"),
            "---\ntitle: \"Guides\"\n---\nAll guides.",
        )
        .unwrap();
        fs::write(
            docs.join("guides/quickstart.md"),
            "---\ntitle: \"Quickstart\"\nweight: 1\n---\nGo fast.",
        )
        .unwrap();
        fs::write(
            docs.join("guides/advanced.md"),
            "---\ntitle: \"Advanced\"\nweight: 2\n---\nGo deep.",
        )
        .unwrap();

        let blog = root.join("content/blog");
        fs::create_dir_all(&blog).unwrap();
        fs::write(blog.join("index.md"), "---\ntitle: \"Blog\"\n---\nPosts.").unwrap();
        fs::write(
            blog.join("post-a.md"),
            "---\ntitle: \"A\"\ndate: 2024-01-01\n---\nFirst.",
        )
        .unwrap();
        fs::write(
            blog.join("post-b.md"),
            "---\ntitle: \"B\"\ndate: 2024-02-01\n---\nSecond.",
        )
        .unwrap();
    }

    fn resolver(root: &Path) -> ContentResolver {
        let content = ContentConfig {
            dir: root.join("content"),
            ..ContentConfig::default()
        };
        ContentResolver::new(content, BlogIndexConfig::default())
    }

    #[test]
    fn test_direct_and_implicit_extension_hits() {
        let dir = tempfile::tempdir().unwrap();
        write_store(dir.path());
        let resolver = resolver(dir.path());

        for path in ["getting-started", "getting-started.md", "/getting-started"] {
            let outcome = resolver.resolve(&ContentRequest::new(path));
            let document = outcome.as_document().expect("expected a document");
            assert_eq!(document.path, "/getting-started");
            assert_eq!(document.id, "getting-started");
            assert_eq!(document.front_matter["title"], json!("Getting Started"));
            assert_eq!(document.body, "Welcome.");
        }
    }

    #[test]
    fn test_directory_with_index() {
        let dir = tempfile::tempdir().unwrap();
        write_store(dir.path());
        let resolver = resolver(dir.path());

        let outcome = resolver.resolve(&ContentRequest::new("guides"));
        let document = outcome.as_document().expect("expected the index document");
        assert_eq!(document.path, "/guides");
        assert_eq!(document.id, "index");
        assert_eq!(document.front_matter["title"], json!("Guides"));
    }

    #[test]
    fn test_sibling_file_shadows_directory_index() {
        let dir = tempfile::tempdir().unwrap();
        write_store(dir.path());
        // guides.md next to guides/ wins over guides/index.md
        fs::write(
            dir.path().join("content/docs/guides.md"),
            "---\ntitle: \"Flat Guides\"\n---\nFlat.",
        )
        .unwrap();
        let resolver = resolver(dir.path());

        let outcome = resolver.resolve(&ContentRequest::new("guides"));
        let document = outcome.as_document().unwrap();
        assert_eq!(document.front_matter["title"], json!("Flat Guides"));
    }

    #[test]
    fn test_directory_listing_is_name_sorted() {
        let dir = tempfile::tempdir().unwrap();
        write_store(dir.path());
        // Remove the index so the listing branch is reached
        fs::remove_file(dir.path().join("content/docs/guides/index.md")).unwrap();
        let resolver = resolver(dir.path());

        let outcome = resolver.resolve(&ContentRequest::new("guides"));
        let documents = outcome.as_documents().unwrap();
        let ids: Vec<&str> = documents.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["advanced", "quickstart"]);
        assert_eq!(documents[0].path, "/guides/advanced");
    }

    #[test]
    fn test_directory_listing_with_query() {
        let dir = tempfile::tempdir().unwrap();
        write_store(dir.path());
        fs::remove_file(dir.path().join("content/docs/guides/index.md")).unwrap();
        let resolver = resolver(dir.path());

        let query = ContentQuery::new()
            .sort_by("weight", SortDirection::Desc)
            .limit(1);
        let outcome = resolver.resolve(&ContentRequest::new("guides").with_query(query));
        let documents = outcome.as_documents().unwrap();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].id, "advanced");
    }

    #[test]
    fn test_single_returns_first_or_empty() {
        let dir = tempfile::tempdir().unwrap();
        write_store(dir.path());
        fs::remove_file(dir.path().join("content/docs/guides/index.md")).unwrap();
        let resolver = resolver(dir.path());

        let first = ContentQuery::new()
            .sort_by("weight", SortDirection::Asc)
            .single();
        let outcome = resolver.resolve(&ContentRequest::new("guides").with_query(first));
        assert_eq!(outcome.as_document().unwrap().id, "quickstart");

        let none = ContentQuery::new().where_field("weight", 99).single();
        let outcome = resolver.resolve(&ContentRequest::new("guides").with_query(none));
        assert_eq!(outcome, ContentOutcome::Empty);
        assert_eq!(serde_json::to_value(&outcome).unwrap(), Value::Null);
    }

    #[test]
    fn test_blog_index_aggregation() {
        let dir = tempfile::tempdir().unwrap();
        write_store(dir.path());
        let resolver = resolver(dir.path());

        let outcome = resolver.resolve(&ContentRequest::new("").with_type("blog"));
        let ContentOutcome::BlogIndex { index, posts } = &outcome else {
            panic!("expected a blog index, got {outcome:?}");
        };
        assert_eq!(index.front_matter["title"], json!("Blog"));
        let ids: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
        // Default sort: date descending
        assert_eq!(ids, vec!["post-b", "post-a"]);
        assert_eq!(posts[0].path, "/post-b");

        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["title"], json!("Blog"));
        assert_eq!(value["posts"][0]["_id"], json!("post-b"));
    }

    #[test]
    fn test_blog_without_index_returns_bare_list() {
        let dir = tempfile::tempdir().unwrap();
        write_store(dir.path());
        fs::remove_file(dir.path().join("content/blog/index.md")).unwrap();
        let resolver = resolver(dir.path());

        let outcome = resolver.resolve(&ContentRequest::new("/index").with_type("blog"));
        let documents = outcome.as_documents().unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].id, "post-b");
    }

    #[test]
    fn test_blog_aggregation_disabled_falls_through() {
        let dir = tempfile::tempdir().unwrap();
        write_store(dir.path());
        let content = ContentConfig {
            dir: dir.path().join("content"),
            ..ContentConfig::default()
        };
        let blog_index = BlogIndexConfig {
            enabled: false,
            ..BlogIndexConfig::default()
        };
        let resolver = ContentResolver::new(content, blog_index);

        // Plain direct hit on the index document instead of aggregation
        let outcome = resolver.resolve(&ContentRequest::new("index").with_type("blog"));
        let document = outcome.as_document().unwrap();
        assert_eq!(document.front_matter["title"], json!("Blog"));
    }

    #[test]
    fn test_unmapped_type_passes_through() {
        let dir = tempfile::tempdir().unwrap();
        let pages = dir.path().join("content/pages");
        fs::create_dir_all(&pages).unwrap();
        fs::write(pages.join("about.md"), "---\ntitle: \"About\"\n---\nUs.").unwrap();
        let resolver = resolver(dir.path());

        let outcome = resolver.resolve(&ContentRequest::new("about").with_type("pages"));
        assert_eq!(
            outcome.as_document().unwrap().front_matter["title"],
            json!("About")
        );
    }

    #[test]
    fn test_not_found_carries_attempted_path() {
        let dir = tempfile::tempdir().unwrap();
        write_store(dir.path());
        let resolver = resolver(dir.path());

        let outcome = resolver.resolve(&ContentRequest::new("does/not/exist"));
        let ContentOutcome::NotFound(not_found) = &outcome else {
            panic!("expected not found, got {outcome:?}");
        };
        assert_eq!(not_found.error, "Content not found");
        assert!(not_found.path.contains("does/not/exist.md"));
        assert!(not_found.details.is_none());

        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["error"], json!("Content not found"));
        assert!(value.get("details").is_none());
    }

    #[test]
    fn test_malformed_params_become_not_found_shape() {
        let dir = tempfile::tempdir().unwrap();
        write_store(dir.path());
        let resolver = resolver(dir.path());

        let params = HashMap::from([
            ("path".to_string(), "guides".to_string()),
            ("query".to_string(), "{broken".to_string()),
        ]);
        let outcome = resolver.resolve_params(&params);
        let ContentOutcome::NotFound(not_found) = outcome else {
            panic!("expected not found");
        };
        assert_eq!(not_found.path, "guides");
        assert!(not_found.details.is_some());
    }

    #[test]
    fn test_request_from_params() {
        let params = HashMap::from([
            ("path".to_string(), "/blog".to_string()),
            ("type".to_string(), "blog".to_string()),
            ("query".to_string(), r#"{"draft": false}"#.to_string()),
            ("sort".to_string(), r#"{"date": "desc"}"#.to_string()),
            ("limit".to_string(), "2".to_string()),
            ("single".to_string(), "true".to_string()),
        ]);
        let request = ContentRequest::from_params(&params).unwrap();
        assert_eq!(request.path, "/blog");
        assert_eq!(request.content_type.as_deref(), Some("blog"));
        assert_eq!(request.query.where_clause["draft"], json!(false));
        assert_eq!(request.query.limit, Some(2));
        assert!(request.query.single);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(
            normalize("", "md"),
            ("index".to_string(), "index.md".to_string())
        );
        assert_eq!(
            normalize("/", "md"),
            ("index".to_string(), "index.md".to_string())
        );
        assert_eq!(
            normalize("/guides/", "md"),
            ("guides".to_string(), "guides.md".to_string())
        );
        assert_eq!(
            normalize("post.md", "md"),
            ("post".to_string(), "post.md".to_string())
        );
        assert_eq!(
            normalize("data.json", "md"),
            ("data.json".to_string(), "data.json".to_string())
        );
    }
}
