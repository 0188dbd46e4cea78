//! Command-line front end for the Protolex catalog engine.
//!
//! # Modules
//!
//! - [`cli`]: clap argument definitions
//! - [`config`]: `ProtolexConfig` loaded via confyg
//! - [`app`]: `ProtolexCli`, logging setup and command dispatch
//! - [`catalog_handlers`], [`graph_handlers`], [`config_handlers`]: command bodies

#![doc = include_str!("../README.md")]

pub mod app;
pub mod catalog_handlers;
pub mod cli;
pub mod config;
pub mod config_handlers;
pub mod graph_handlers;

pub use app::ProtolexCli;
pub use cli::{CliArgs, Command};
pub use config::ProtolexConfig;
