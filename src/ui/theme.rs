/// Design tokens for the treelink CLI.
///
/// All icons must be sourced from this module; the `_ascii` variants are the
/// fallback for terminals without Unicode.
pub mod icons {
    // Selection states.
    pub const SELECTED: &str = "●";
    pub const UNSELECTED: &str = "○";
    pub const PARTIAL: &str = "◐";

    // Tree expansion.
    pub const EXPAND: &str = "▼";
    pub const COLLAPSE: &str = "▶";

    pub const LINK: &str = "⇄";
}

pub mod icons_ascii {
    pub const SELECTED: &str = "[x]";
    pub const UNSELECTED: &str = "[ ]";
    pub const PARTIAL: &str = "[-]";

    pub const EXPAND: &str = "[v]";
    pub const COLLAPSE: &str = "[>]";

    pub const LINK: &str = "<=>";
}

/// Icon set picked once per render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Icons {
    pub selected: &'static str,
    pub unselected: &'static str,
    pub partial: &'static str,
    pub expand: &'static str,
    pub collapse: &'static str,
    pub link: &'static str,
}

impl Icons {
    pub fn new(supports_unicode: bool) -> Self {
        if supports_unicode {
            Self {
                selected: icons::SELECTED,
                unselected: icons::UNSELECTED,
                partial: icons::PARTIAL,
                expand: icons::EXPAND,
                collapse: icons::COLLAPSE,
                link: icons::LINK,
            }
        } else {
            Self {
                selected: icons_ascii::SELECTED,
                unselected: icons_ascii::UNSELECTED,
                partial: icons_ascii::PARTIAL,
                expand: icons_ascii::EXPAND,
                collapse: icons_ascii::COLLAPSE,
                link: icons_ascii::LINK,
            }
        }
    }
}
