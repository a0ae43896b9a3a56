//! Blob and FileEntry types
//!
//! The adapter's data model is intentionally small:
//! - `Blob`: opaque payload plus a content type, read-only once built
//! - `FileEntry`: a name paired with its blob, a transient view into the
//!   backend (the adapter never retains one past a single operation)

use bytes::Bytes;

/// Content type used by [`Blob::text`]
pub const TEXT_CONTENT_TYPE: &str = "text/plain";

/// Fallback content type for payloads of unknown kind
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Opaque byte-bearing content with an associated content type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    data: Bytes,
    content_type: String,
}

impl Blob {
    /// Create a blob from raw bytes and an explicit content type
    pub fn new(data: impl Into<Bytes>, content_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            content_type: content_type.into(),
        }
    }

    /// Wrap textual content with the fixed `text/plain` content type
    pub fn text(content: impl Into<String>) -> Self {
        Self::new(Bytes::from(content.into()), TEXT_CONTENT_TYPE)
    }

    /// The payload bytes
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// The content type string
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Payload size in bytes
    pub fn len(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// A named entry in a storage area
///
/// Names are `/`-separated relative paths ("photos/cat.jpg"); they never
/// begin with a separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    name: String,
    blob: Blob,
}

impl FileEntry {
    pub fn new(name: impl Into<String>, blob: Blob) -> Self {
        Self {
            name: name.into(),
            blob,
        }
    }

    /// The entry's path-like name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The entry's content
    pub fn blob(&self) -> &Blob {
        &self.blob
    }

    /// Consume the entry, returning its content
    pub fn into_blob(self) -> Blob {
        self.blob
    }
}

/// Which space figure a space query asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpaceKind {
    /// Bytes still available in the area
    Free,
    /// Bytes consumed by stored entries
    Used,
}
