//! Defines the transformation kinds and the `CausalEdge` they produce between
//! sectors.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four transformation ("flying") categories, in canonical tuple order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Transformation {
    #[serde(rename = "禄")]
    Lu,
    #[serde(rename = "权")]
    Quan,
    #[serde(rename = "科")]
    Ke,
    #[serde(rename = "忌")]
    Ji,
}

impl Transformation {
    /// All kinds in `[禄, 权, 科, 忌]` order.
    pub const ALL: [Transformation; 4] = [Self::Lu, Self::Quan, Self::Ke, Self::Ji];

    /// Position of this kind inside a transformation-star tuple.
    pub fn slot(self) -> usize {
        match self {
            Self::Lu => 0,
            Self::Quan => 1,
            Self::Ke => 2,
            Self::Ji => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lu => "禄",
            Self::Quan => "权",
            Self::Ke => "科",
            Self::Ji => "忌",
        }
    }
}

impl fmt::Display for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed flight from one sector to another.
///
/// Identity is the full `(from, to, kind, star)` tuple; `star` is empty when
/// the scope's transformation-star tuple is unknown.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CausalEdge {
    pub from: String,
    pub to: String,
    pub kind: Transformation,
    #[serde(default)]
    pub star: String,
}

impl CausalEdge {
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

impl fmt::Display for CausalEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.star.is_empty() {
            write!(f, "{} —{}→ {}", self.from, self.kind, self.to)
        } else {
            write!(f, "{} —{}（{}）→ {}", self.from, self.kind, self.star, self.to)
        }
    }
}
