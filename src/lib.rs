//! Question generation, answer checking and level progress for a children's
//! arithmetic and clock-reading quiz. Rendering is left to the caller, which
//! drives a [`session::level::LevelSession`] and draws from its state.

pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod generator;
pub mod levels;
pub mod question;
pub mod session;
