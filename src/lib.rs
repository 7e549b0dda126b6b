//! Invoice management: a REST API over Postgres or an in-memory store, and
//! a server-rendered web frontend that talks to it.

pub mod adapters;
pub mod application;
pub mod domain;
pub mod infrastructure;
