//! Buzzer drivers

pub mod tone;

pub use tone::{ToneBuzzer, ToneOutput};
