//! Player identities.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name the computer opponent is shown under in chat.
pub const COMPUTER_DISPLAY_NAME: &str = "Newman";

/// Who a seat at the board belongs to.
///
/// Humans are identified by their chat handle (e.g. `@alice`). The computer
/// is its own variant, so no handle a user can type ever resolves to it.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum PlayerId {
    Human(String),
    Computer,
}

impl PlayerId {
    pub fn human(handle: impl Into<String>) -> Self {
        Self::Human(handle.into())
    }

    pub fn is_computer(&self) -> bool {
        matches!(self, Self::Computer)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Human(handle) => write!(f, "{handle}"),
            Self::Computer => write!(f, "{COMPUTER_DISPLAY_NAME}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(PlayerId::human("@alice").to_string(), "@alice");
        assert_eq!(PlayerId::Computer.to_string(), COMPUTER_DISPLAY_NAME);
    }

    #[test]
    fn test_handle_never_equals_computer() {
        assert_ne!(PlayerId::human("-1"), PlayerId::Computer);
        assert_ne!(PlayerId::human(COMPUTER_DISPLAY_NAME), PlayerId::Computer);
    }
}
