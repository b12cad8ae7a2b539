// Repository and Gateway Port Traits (Interfaces)
// Define what the domain needs from infrastructure

pub mod gateways;
pub mod repositories;

pub use gateways::*;
pub use repositories::*;
