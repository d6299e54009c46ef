// Chart slot identity
use std::fmt;

/// Logical identity of one on-screen chart. A slot owns at most one live
/// chart instance at a time; the session manager replaces the instance on
/// every render into the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartSlot {
    Primary,
    Secondary,
}

impl ChartSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartSlot::Primary => "primary",
            ChartSlot::Secondary => "secondary",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "primary" => Some(ChartSlot::Primary),
            "secondary" => Some(ChartSlot::Secondary),
            _ => None,
        }
    }
}

impl fmt::Display for ChartSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
