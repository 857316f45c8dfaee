//! The typed value model.
//!
//! - [`tag`]: the closed type-tag registry with canonical wire IDs
//! - [`value`]: the sixteen value variants and their constructors
//! - [`container`]: the two composite kinds (Container, Array)

pub mod container;
pub mod tag;
pub mod value;

pub use container::{Array, Container};
pub use tag::TypeTag;
pub use value::{Payload, Value};
