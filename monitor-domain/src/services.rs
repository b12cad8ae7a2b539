// Domain services
pub mod activity;
pub mod ranking;

pub use ranking::*;
