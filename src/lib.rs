pub mod config;
pub mod enemy;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod hero;
pub mod level;
pub mod material;
pub mod pathfinding;
pub mod render;
pub mod script;
pub mod services;
pub mod tilemap;
