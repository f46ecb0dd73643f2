pub mod layout;
pub mod scheduler;

pub use layout::{split_lines, LineLayout, MonospaceMeasurer, TextMeasurer};
pub use scheduler::{Scheduler, TaskId};
