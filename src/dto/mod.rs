//! Wire representations returned by the HTTP API.

pub mod categories;
