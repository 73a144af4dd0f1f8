//! Official/community tiering for search results.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Official,
    PopularCommunity,
    Community,
}

impl Tier {
    pub fn color(self) -> &'static str {
        match self {
            Self::Official => "#2E86C1",
            Self::PopularCommunity => "#6B9DBF",
            Self::Community => "#CCCCCC",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Official => "Official bucket",
            Self::PopularCommunity => "Popular community bucket",
            Self::Community => "Community bucket",
        }
    }

    /// Tooltip text; the star count is shown for every tier.
    pub fn tooltip(self, stars: u32) -> String {
        format!("{} ({stars} stars)", self.label())
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn classify(official: bool, stars: u32, popularity_threshold: u32) -> Tier {
    if official {
        Tier::Official
    } else if stars >= popularity_threshold {
        Tier::PopularCommunity
    } else {
        Tier::Community
    }
}
