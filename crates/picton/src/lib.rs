pub mod cli;
pub mod cmd;
pub mod config;
pub mod schema_arg;
