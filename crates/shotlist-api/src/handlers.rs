//! Request handlers.

pub mod catalog;
pub mod downloads;
pub mod generation;
pub mod health;
pub mod images;

pub use catalog::*;
pub use downloads::*;
pub use generation::*;
pub use health::*;
pub use images::*;
