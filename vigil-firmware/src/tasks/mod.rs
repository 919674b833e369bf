//! Embassy async tasks
//!
//! The tick task is the poll scheduler; the alert task runs one controller
//! evaluation per tick.

pub mod alert;
pub mod tick;

pub use alert::{alert_task, AlertPeripherals};
pub use tick::tick_task;
