//! Coverage lookups: which capture dates exist for a viewport.
//!
//! The HTTP round trip itself belongs to the front end; this crate builds the
//! query, decodes the answer, and orders completions.

pub mod query;
pub mod request;
pub mod response;

pub use query::*;
pub use request::*;
pub use response::*;
