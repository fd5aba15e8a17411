//! Simulacion de una cafetera con dispensers y despensa compartidos
pub mod coffee_maker;
pub mod config;
pub mod constants;
pub mod container;
pub mod errors;
pub mod menu;
pub mod outcome;
pub mod outlets;
pub mod pantry;
pub mod recipe;
pub mod statistics;
