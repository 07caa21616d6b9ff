use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::path::PathBuf;

/// A named collection of labeled components, one per diagram.
#[derive(Clone, FromRow, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
}

/// A labeled element of a diagram. `metadata` may be empty.
#[derive(Clone, FromRow, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub id: i64,
    pub project_id: i64,
    pub label: String,
    pub metadata: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiagramKind {
    Image,
    Pdf,
}

/// Diagram file attached to the current session. Never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagram {
    pub path: PathBuf,
    pub kind: DiagramKind,
    pub size_bytes: u64,
}

impl Diagram {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}
