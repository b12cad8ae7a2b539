pub mod game_gateway;

pub use game_gateway::*;
