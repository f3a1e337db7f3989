//! Persistence layer for fitpath: SQLite pool, embedded migrations, raw
//! key-value queries, the [`backend::KvBackend`] seam, and the domain models
//! stored through it.

pub mod backend;
pub mod config;
pub mod models;
pub mod pool;
pub mod queries;
