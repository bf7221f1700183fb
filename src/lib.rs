pub mod cli;
pub mod config;
pub mod convert;
pub mod formatter;
pub mod logging;
pub mod record;
pub mod timer;
