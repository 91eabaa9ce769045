mod engine;

pub use engine::{PieChange, TaskPie};
