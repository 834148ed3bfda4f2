//! Session API - cookie-based login sessions over HTTP.
//!
//! Exposes `/api/session` for reading the current session, logging in with a
//! name and password, and logging out. Users live in PostgreSQL; sessions in
//! memory or Redis.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
