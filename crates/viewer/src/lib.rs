//! Dated aerial imagery viewer: everything except the widget and the DOM.

pub mod config;
pub mod controller;
pub mod cursor;
pub mod dates;
pub mod download;
pub mod resolution;
pub mod surface;

pub use config::*;
pub use controller::*;
pub use dates::{CoverageChange, DateSelection, Nav, NavState};
pub use download::{DownloadLink, DownloadRequest};
pub use resolution::*;
pub use surface::*;
