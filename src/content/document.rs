//! Content document value object

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// A parsed content document
///
/// Immutable value object constructed fresh on every read. The display path
/// always carries a leading slash and no trailing slash, with the default
/// extension stripped; `id` is the filename without extension.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentDocument {
    /// Logical slash-separated identity (e.g. "/guides/quickstart")
    pub path: String,
    /// Filename without extension
    pub id: String,
    /// Parsed front-matter fields, in declaration order
    pub front_matter: Map<String, Value>,
    /// Raw text after the front-matter block
    pub body: String,
}

impl ContentDocument {
    pub fn new(
        path: impl Into<String>,
        id: impl Into<String>,
        front_matter: Map<String, Value>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            id: id.into(),
            front_matter,
            body: body.into(),
        }
    }

    /// Resolve a field the way filters and sorts address documents:
    /// `_path`, `_id`, and `body` are synthetic fields next to the
    /// front-matter keys.
    pub fn field(&self, name: &str) -> Option<Value> {
        match name {
            "_path" => Some(Value::String(self.path.clone())),
            "_id" => Some(Value::String(self.id.clone())),
            "body" => Some(Value::String(self.body.clone())),
            _ => self.front_matter.get(name).cloned(),
        }
    }

    /// Flatten to the wire shape: `{ _path, _id, ...front_matter, body }`.
    ///
    /// Front-matter keys are spread after the identity fields, so a document
    /// may shadow `_path`/`_id`; the real body always wins over a `body`
    /// front-matter key.
    pub fn to_value(&self) -> Value {
        let mut object = Map::new();
        object.insert("_path".to_string(), Value::String(self.path.clone()));
        object.insert("_id".to_string(), Value::String(self.id.clone()));
        for (key, value) in &self.front_matter {
            object.insert(key.clone(), value.clone());
        }
        object.insert("body".to_string(), Value::String(self.body.clone()));
        Value::Object(object)
    }
}

impl Serialize for ContentDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}
