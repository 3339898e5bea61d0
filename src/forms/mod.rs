//! Request bodies and query strings, and their conversion into validated payloads.

pub mod categories;
