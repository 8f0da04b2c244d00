//! Public library modules for the CLI crate
pub mod app;
pub mod launch;
pub mod logging;
pub mod paths;
pub mod shell;
