pub mod account;
pub mod cli;
pub mod commands;
pub mod config;
pub mod keys;
pub mod logging;
