//! Index-tracking results dashboard.
//!
//! Loads precomputed model results from CSV once at startup and serves
//! reactive chart/table specifications filtered by model selection.

pub mod catalog;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod filter;
pub mod logging;
pub mod normalize;
pub mod server;
pub mod session;
pub mod table;
pub mod views;
