//! Terminal browser for DynamoDB table schemas.
//!
//! Credentials are resolved from the environment, the container metadata
//! endpoint, or the instance metadata service before falling back to the
//! SDK's own default chain; a built-in demo catalog keeps the browser
//! usable without any AWS access.

pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod credentials;
pub mod db;
pub mod ui;
