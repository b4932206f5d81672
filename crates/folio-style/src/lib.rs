#![forbid(unsafe_code)]

//! Styles and the colour scheme.

pub mod style;
pub mod theme;

pub use style::Style;
pub use theme::Theme;
