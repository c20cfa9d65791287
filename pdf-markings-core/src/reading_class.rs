//! Importance classes and provenance sources for reading rectangles

use crate::error::MarkingsError;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Why a region of a page matters.
///
/// Ordering compares [`ReadingClass::importance`], never declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ReadingClass {
    /// No class assigned
    Unset,
    /// Region carrying a user tag
    Tag,
    /// Region visible in the viewport
    Viewport,
    /// Paragraph read by eye gaze
    Paragraph,
    /// Skimmed or marked as low relevance
    Low,
    /// Region matched by a search
    FoundString,
    /// Read or marked as medium relevance
    Medium,
    /// Marked as critical
    High,
}

impl ReadingClass {
    /// Relevance classes in ascending order of importance
    pub const RELEVANCE: [ReadingClass; 3] =
        [ReadingClass::Low, ReadingClass::Medium, ReadingClass::High];

    /// Every class, in ascending order of importance
    pub const ALL: [ReadingClass; 8] = [
        ReadingClass::Unset,
        ReadingClass::Tag,
        ReadingClass::Viewport,
        ReadingClass::Paragraph,
        ReadingClass::Low,
        ReadingClass::FoundString,
        ReadingClass::Medium,
        ReadingClass::High,
    ];

    /// Importance rank used for ordering
    pub fn importance(&self) -> u8 {
        match self {
            ReadingClass::Unset => 0,
            ReadingClass::Tag => 1,
            ReadingClass::Viewport => 2,
            ReadingClass::Paragraph => 3,
            ReadingClass::Low => 4,
            ReadingClass::FoundString => 5,
            ReadingClass::Medium => 6,
            ReadingClass::High => 7,
        }
    }

    /// Stable integer code exchanged with logging services
    pub fn raw_value(&self) -> i32 {
        match self {
            ReadingClass::Unset => 0,
            ReadingClass::Tag => 1,
            ReadingClass::Viewport => 10,
            ReadingClass::Paragraph => 15,
            ReadingClass::Low => 20,
            ReadingClass::FoundString => 25,
            ReadingClass::Medium => 30,
            ReadingClass::High => 40,
        }
    }

    /// Inverse of [`ReadingClass::raw_value`]
    pub fn from_raw_value(value: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.raw_value() == value)
    }

    /// Whether this is one of Low, Medium or High
    pub fn is_relevance(&self) -> bool {
        Self::RELEVANCE.contains(self)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ReadingClass::Unset => "unset",
            ReadingClass::Tag => "tag",
            ReadingClass::Viewport => "viewport",
            ReadingClass::Paragraph => "paragraph",
            ReadingClass::Low => "low",
            ReadingClass::FoundString => "found_string",
            ReadingClass::Medium => "medium",
            ReadingClass::High => "high",
        }
    }
}

impl PartialOrd for ReadingClass {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ReadingClass {
    fn cmp(&self, other: &Self) -> Ordering {
        self.importance().cmp(&other.importance())
    }
}

impl fmt::Display for ReadingClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReadingClass {
    type Err = MarkingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = match s.trim().to_ascii_lowercase().replace('-', "_") {
            n if n == "foundstring" => "found_string".to_string(),
            n => n,
        };
        Self::ALL
            .into_iter()
            .find(|c| c.name() == normalized)
            .ok_or_else(|| MarkingsError::Parse(format!("unknown reading class '{s}'")))
    }
}

/// How a marking was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ClassSource {
    Unset,
    /// Viewport tracking
    Viewport,
    /// Mouse click on a paragraph
    Click,
    /// Eye tracker gaze
    Eye,
    /// Machine-learning suggestion
    Ml,
    /// Search match
    Search,
    /// Peer on the local machine
    LocalPeer,
    /// Peer reached over the network
    NetworkPeer,
    /// Text selected by hand
    ManualSelection,
    /// Filter wildcard for either peer source
    AnyPeer,
}

impl ClassSource {
    pub const ALL: [ClassSource; 10] = [
        ClassSource::Unset,
        ClassSource::Viewport,
        ClassSource::Click,
        ClassSource::Eye,
        ClassSource::Ml,
        ClassSource::Search,
        ClassSource::LocalPeer,
        ClassSource::NetworkPeer,
        ClassSource::ManualSelection,
        ClassSource::AnyPeer,
    ];

    /// Stable integer code exchanged with logging services
    pub fn raw_value(&self) -> i32 {
        match self {
            ClassSource::Unset => 0,
            ClassSource::Viewport => 1,
            ClassSource::Click => 2,
            ClassSource::Eye => 3,
            ClassSource::Ml => 4,
            ClassSource::Search => 5,
            ClassSource::LocalPeer => 6,
            ClassSource::NetworkPeer => 7,
            ClassSource::ManualSelection => 8,
            ClassSource::AnyPeer => 9,
        }
    }

    pub fn from_raw_value(value: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.raw_value() == value)
    }

    /// Whether a rectangle tagged `actual` satisfies this source used as a
    /// filter. `AnyPeer` accepts both peer sources.
    pub fn matches(&self, actual: ClassSource) -> bool {
        match self {
            ClassSource::AnyPeer => matches!(
                actual,
                ClassSource::AnyPeer | ClassSource::LocalPeer | ClassSource::NetworkPeer
            ),
            other => *other == actual,
        }
    }

    pub fn is_peer(&self) -> bool {
        ClassSource::AnyPeer.matches(*self)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ClassSource::Unset => "unset",
            ClassSource::Viewport => "viewport",
            ClassSource::Click => "click",
            ClassSource::Eye => "eye",
            ClassSource::Ml => "ml",
            ClassSource::Search => "search",
            ClassSource::LocalPeer => "local_peer",
            ClassSource::NetworkPeer => "network_peer",
            ClassSource::ManualSelection => "manual_selection",
            ClassSource::AnyPeer => "any_peer",
        }
    }
}

impl fmt::Display for ClassSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ClassSource {
    type Err = MarkingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = match s.trim().to_ascii_lowercase().replace('-', "_") {
            n if n == "gaze" || n == "smi" => "eye".to_string(),
            n => n,
        };
        Self::ALL
            .into_iter()
            .find(|c| c.name() == normalized)
            .ok_or_else(|| MarkingsError::Parse(format!("unknown class source '{s}'")))
    }
}
