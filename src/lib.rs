//! Companies API Library
//!
//! CRUD service over the company entity: REST handlers, a Postgres-backed
//! repository behind a transaction wrapper, and a Kafka event stream fed
//! after each committed mutation.

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod service;
