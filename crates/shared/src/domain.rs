use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u64);
    };
}

id_newtype!(RequestSeq);

/// Sort direction as carried in the `d` URL parameter (by ordinal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn ordinal(self) -> u8 {
        match self {
            Self::Ascending => 0,
            Self::Descending => 1,
        }
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            0 => Some(Self::Ascending),
            1 => Some(Self::Descending),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortMode {
    pub name: String,
    pub display_name: String,
    pub default_direction: SortDirection,
}

impl SortMode {
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        default_direction: SortDirection,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            default_direction,
        }
    }
}

/// Ordered sort catalog used when no configuration overrides it.
pub fn default_sort_modes() -> Vec<SortMode> {
    vec![
        SortMode::new("relevance", "Best match", SortDirection::Descending),
        SortMode::new("name", "Name", SortDirection::Ascending),
        SortMode::new("newest", "Newest", SortDirection::Descending),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ManifestMetadata {
    pub repository: String,
    #[serde(default)]
    pub official_repository: bool,
    #[serde(default)]
    pub repository_stars: u32,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub committed: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub license: Option<String>,
    pub metadata: ManifestMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ResultsPage {
    pub results: Vec<Manifest>,
    pub count: u64,
}

impl ResultsPage {
    pub fn empty() -> Self {
        Self::default()
    }
}
