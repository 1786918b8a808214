//! Priority levels and their display attributes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, PlannerResult};

/// Fixed label and color for a priority level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelInfo {
    pub label: &'static str,
    /// Hex color, `#rrggbb`
    pub color: &'static str,
}

const LEVELS: [LevelInfo; 4] = [
    LevelInfo {
        label: "Remark",
        color: "#1890ff",
    },
    LevelInfo {
        label: "Normal",
        color: "#52c41a",
    },
    LevelInfo {
        label: "Priority",
        color: "#ffa940",
    },
    LevelInfo {
        label: "Emergency",
        color: "#ff4d4f",
    },
];

/// Event priority. Higher values are more urgent.
///
/// Stored records may carry any integer; only 0..=3 have a label and color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Level(u8);

impl Level {
    pub const REMARK: Level = Level(0);
    pub const NORMAL: Level = Level(1);
    pub const PRIORITY: Level = Level(2);
    pub const EMERGENCY: Level = Level(3);

    /// All known levels, most urgent first.
    pub const ALL: [Level; 4] = [
        Level::EMERGENCY,
        Level::PRIORITY,
        Level::NORMAL,
        Level::REMARK,
    ];

    pub fn new(value: u8) -> PlannerResult<Self> {
        let level = Level(value);
        if level.is_known() {
            Ok(level)
        } else {
            Err(PlannerError::InvalidLevel(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_known(self) -> bool {
        usize::from(self.0) < LEVELS.len()
    }

    pub fn info(self) -> Option<&'static LevelInfo> {
        LEVELS.get(usize::from(self.0))
    }

    pub fn label(self) -> &'static str {
        self.info().map(|i| i.label).unwrap_or("Unknown")
    }

    pub fn color(self) -> Option<&'static str> {
        self.info().map(|i| i.color)
    }

    /// The level color as an RGB triple, for terminal rendering.
    pub fn rgb(self) -> Option<(u8, u8, u8)> {
        self.color().and_then(hex_to_rgb)
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::NORMAL
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parse `#rrggbb` into an RGB triple.
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
