#![forbid(unsafe_code)]

//! Folio: a responsive personal portfolio.
//!
//! The page is described once, as a [`ViewTree`](view::ViewTree) projected
//! from compiled-in [`PortfolioContent`](catalog::PortfolioContent), and is
//! shown either by the desktop terminal binary or by the web host.

pub mod app;
pub mod catalog;
pub mod cli;
pub mod paint;
pub mod view;

pub use app::{Msg, PortfolioApp};
pub use catalog::{Catalog, CatalogError, Icon, PortfolioContent, ProfileInfo, ProjectEntry};
pub use view::{CardAction, CardView, ViewNode, ViewTree, render_view};
