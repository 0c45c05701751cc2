//! Continuous-motion Snake: a fixed-timestep simulation core plus a
//! terminal front-end that draws its snapshots.

pub mod clock;
pub mod collision;
pub mod config;
pub mod error;
pub mod food;
pub mod frame_loop;
pub mod game;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
