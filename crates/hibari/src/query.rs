//! Fluent query builders.
//!
//! Builders accumulate filter state with no network effect; the execution
//! call (`search`, `update`) snapshots the spec and runs the pipeline once.
//! Re-running a query method on the client creates an independent builder.

pub mod anime;
pub mod forum;
pub mod list_update;
pub mod manga;
pub mod user_list;
