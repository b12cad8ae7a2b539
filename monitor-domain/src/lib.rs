// Monitor Domain Layer

pub mod entities;
pub mod ingest;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use ingest::*;
pub use ports::*;
pub use services::*;
pub use value_objects::*;
