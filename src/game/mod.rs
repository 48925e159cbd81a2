// Game module - the running session
//
// - types.rs: per-frame context handed to entities, player input, player snapshot
// - world.rs: GameWorld, which owns the entities and runs the per-tick phases

pub mod types;
pub mod world;

pub use types::*;
pub use world::GameWorld;
