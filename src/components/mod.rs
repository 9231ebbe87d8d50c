//! UI components: the dot field background and the theme toggle.

pub mod preference;
pub mod theme_toggle;
pub mod waving_dots;
