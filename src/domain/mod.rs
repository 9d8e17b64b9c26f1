//! Domain types: what a cell is and how it looks.

pub mod cell;
pub mod colour;

pub use cell::{Category, Cell, CellType, Velocity, FIRE_LIFE_TIME, SMOKE_LIFE_TIME};
pub use colour::Colour;
