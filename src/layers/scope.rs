//! Time layers: the user-selected `Mode` and the provider-level `Scope`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The reading mode selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Life,
    Decadal,
    Year,
    Month,
    Date,
}

impl Mode {
    pub const ALL: [Mode; 5] = [Self::Life, Self::Decadal, Self::Year, Self::Month, Self::Date];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Life => "life",
            Self::Decadal => "decadal",
            Self::Year => "year",
            Self::Month => "month",
            Self::Date => "date",
        }
    }

    /// Whether this mode reads the chart at a point in time.
    pub fn is_timed(self) -> bool {
        self != Self::Life
    }

    /// The target type named in the time anchor.
    pub fn target_type(self) -> &'static str {
        match self {
            Self::Life => "本命",
            Self::Decadal => "大限",
            Self::Year => "流年",
            Self::Month => "流月",
            Self::Date => "流日",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "life" => Ok(Self::Life),
            "decadal" => Ok(Self::Decadal),
            "year" => Ok(Self::Year),
            "month" => Ok(Self::Month),
            "date" => Ok(Self::Date),
            other => Err(format!("unknown mode '{}'", other)),
        }
    }
}

/// A time granularity at which the chart is reinterpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Natal,
    Decadal,
    Yearly,
    Monthly,
    Daily,
}

impl Scope {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Natal => "natal",
            Self::Decadal => "decadal",
            Self::Yearly => "yearly",
            Self::Monthly => "monthly",
            Self::Daily => "daily",
        }
    }

    /// Short layer name used in labels ("大限", "流年", ...).
    pub fn layer_name(self) -> &'static str {
        match self {
            Self::Natal => "本命",
            Self::Decadal => "大限",
            Self::Yearly => "流年",
            Self::Monthly => "流月",
            Self::Daily => "流日",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
