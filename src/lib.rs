//! A small top-down arcade shooter played in the terminal.
//!
//! The simulation (`entities` + `compute`) is pure and engine-agnostic; the
//! other modules are the terminal host around it.

pub mod assets;
pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod error;
pub mod input;
