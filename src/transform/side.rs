//! Grid sides.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Edge of the heatmap grid a panel is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Left,
    Right,
    #[default]
    Bottom,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Left, Side::Right, Side::Bottom];

    /// Top and bottom panels run along the columns.
    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Side::Top | Side::Bottom)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Top => "top",
            Side::Left => "left",
            Side::Right => "right",
            Side::Bottom => "bottom",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown side name.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown side {0:?}, expected one of top, left, right, bottom")]
pub struct SideParseError(pub String);

impl FromStr for Side {
    type Err = SideParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Side::Top),
            "left" => Ok(Side::Left),
            "right" => Ok(Side::Right),
            "bottom" => Ok(Side::Bottom),
            other => Err(SideParseError(other.to_owned())),
        }
    }
}
