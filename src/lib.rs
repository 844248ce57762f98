//! Lane-crossing arcade game: grid-stepping player, lane enemies, score and
//! hit/win transitions, rendered through an abstract drawing surface.

pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod error;
pub mod graphics;
pub mod grid;
pub mod input;
pub mod transition;

pub use error::{GameError, Result};
