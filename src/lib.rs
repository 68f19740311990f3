//! tilmarks: a local-first bookmark manager for "today I learned" links.
//!
//! This library crate exposes all modules for use by the RPC binary and integration tests.

pub mod app;
pub mod database;
pub mod managers;
pub mod platform;
pub mod rpc_handler;
pub mod seed;
pub mod services;
pub mod types;
