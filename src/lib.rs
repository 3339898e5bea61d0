//! Core library exports for the category catalog service.
//!
//! The `data` feature exposes the persistence and domain layer on its own;
//! `server` adds the services, forms and HTTP routes of the REST API.

#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod schema;

#[cfg(feature = "server")]
pub mod assembler;
#[cfg(feature = "server")]
pub mod db;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod error_conversions;
#[cfg(feature = "server")]
pub mod errors;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod messages;
#[cfg(feature = "server")]
pub mod pagination;
#[cfg(feature = "server")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

/// Schema migrations compiled into the binary.
#[cfg(feature = "server")]
pub const MIGRATIONS: diesel_migrations::EmbeddedMigrations =
    diesel_migrations::embed_migrations!();
