//! Pure data structures: the [`Burrow`] owned by each actor and the pool [`Report`].

pub mod burrow;
pub mod report;

pub use burrow::*;
pub use report::*;
