pub mod date_range;
pub mod employee;
pub mod state;

pub use date_range::*;
pub use employee::*;
pub use state::*;
