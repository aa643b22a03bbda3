pub mod counter;
pub mod interval;

pub use counter::{Counter, Event};
pub use interval::Interval;
