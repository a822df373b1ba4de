// Library exports for the 2048 engine
// This allows the server, the selfplay tool and the tests to share the core logic

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod game;
pub mod handler;
pub mod types;
