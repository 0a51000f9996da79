//! How the wait probe matches a UI element.

use std::fmt;

/// Exactly one of text equality or accessibility-description equality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Visible text equals the target
    #[default]
    Text,
    /// Content description equals the target
    Description,
}

impl MatchMode {
    /// uiautomator selector mask bit for this mode
    pub fn selector_mask(&self) -> u32 {
        match self {
            MatchMode::Text => 0x01,
            MatchMode::Description => 0x40,
        }
    }

    /// uiautomator selector field name for this mode
    pub fn selector_field(&self) -> &'static str {
        match self {
            MatchMode::Text => "text",
            MatchMode::Description => "description",
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selector_field())
    }
}
