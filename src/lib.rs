//! Tile-based platformer core
//!
//! Entity physics against a tilemap, the player and enemy rules layered on top
//! of it, and the level editor state that edits the same tilemap. Rendering,
//! audio and windowing are left to the binaries.

pub mod animation;
pub mod collision;
pub mod config;
pub mod editor;
pub mod effects;
pub mod enemy;
pub mod game;
pub mod health;
pub mod physics;
pub mod player;
pub mod save;
pub mod tile;
pub mod vector;
