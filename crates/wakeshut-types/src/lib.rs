//! Wakeshut Types - Pure type definitions
//!
//! Profiles, execution outcomes and view states shared by the core
//! library and the front-ends. No runtime dependencies.

pub mod outcome;
pub mod profile;
pub mod state;

pub use outcome::*;
pub use profile::*;
pub use state::*;
