//! Ambient light sensor drivers

pub mod opt3001;

pub use opt3001::Opt3001;
