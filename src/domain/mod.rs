//! Domain layer for the poemseek plugin.
//!
//! Core types that do not depend on Zellij or on the transport: the poem model
//! and the error taxonomy.
//!
//! # Organization
//!
//! - [`error`]: Search outcome errors, crate error type and result alias
//! - [`poem`]: Poem model and result set alias
//! - [`request`]: Lookup request identity
//!
//! # Examples
//!
//! ```
//! use poemseek::domain::{Poem, SearchError};
//!
//! fn lookup(found: bool) -> Result<Vec<Poem>, SearchError> {
//!     if found {
//!         Ok(vec![Poem::new("Hope", "Emily Dickinson", vec!["..."])])
//!     } else {
//!         Err(SearchError::NotFound)
//!     }
//! }
//!
//! assert!(lookup(false).is_err());
//! ```

pub mod error;
pub mod poem;
pub mod request;

pub use error::{PoemseekError, Result, SearchError};
pub use poem::{Poem, ResultSet};
pub use request::RequestId;
