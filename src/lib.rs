// Library surface for headless/integration tests and reuse.
// The binary owns the terminal views; everything here is UI-agnostic.
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod controller;
pub mod dial;
pub mod logging;
pub mod preset;
pub mod runtime;
pub mod schedule;
pub mod session;
pub mod util;
