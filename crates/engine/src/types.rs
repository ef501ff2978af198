use serde::{Deserialize, Serialize};
use std::fmt;

/// Heading depth (chapter, subchapter, subsubchapter)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    One,
    Two,
    Three,
}

impl HeadingLevel {
    pub const ALL: [HeadingLevel; 3] = [HeadingLevel::One, HeadingLevel::Two, HeadingLevel::Three];

    pub fn as_u8(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            3 => Some(Self::Three),
            _ => None,
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// Type tag of a block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    /// Heading of the given level
    Heading(HeadingLevel),

    /// Reference to a mirrored (synced) container
    MirrorReference { container_id: String },

    /// Anything else (paragraphs, lists, images, ...)
    Other,
}

/// One unit of document content as returned by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Stable block identifier
    pub id: String,

    pub kind: BlockKind,

    /// Plain text payload; only meaningful for headings
    pub text: Option<String>,
}

impl Block {
    pub fn heading(id: impl Into<String>, level: HeadingLevel, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: BlockKind::Heading(level),
            text: Some(text.into()),
        }
    }

    pub fn mirror(id: impl Into<String>, container_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: BlockKind::MirrorReference {
                container_id: container_id.into(),
            },
            text: None,
        }
    }

    pub fn other(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: BlockKind::Other,
            text: None,
        }
    }

    pub fn heading_level(&self) -> Option<HeadingLevel> {
        match self.kind {
            BlockKind::Heading(level) => Some(level),
            _ => None,
        }
    }

    pub fn mirror_target(&self) -> Option<&str> {
        match &self.kind {
            BlockKind::MirrorReference { container_id } => Some(container_id.as_str()),
            _ => None,
        }
    }
}

/// One page of a container's children
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChildPage {
    pub items: Vec<Block>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

/// Raw answer of the store to a heading update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateResponse {
    Ok,

    /// Optimistic-concurrency failure; safe to retry
    Conflict,

    /// Any other failure (transport, validation, auth, ...)
    Error(String),
}
