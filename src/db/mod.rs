//! Named-query data access.
//!
//! This module provides the storage abstraction used by the tools and the CLI:
//! - A catalog of parameterized queries loaded by name from a definitions file
//! - Argument coercion into engine primitives
//! - Row shaping (identity, positional tuples with defaults, column subsets)
//! - A [`Store`] facade that owns one connection and its setup/teardown hooks
//!
//! # Architecture
//!
//! The default engine is CozoDB, embedded in-process (in memory or backed by a
//! SQLite file). Queries are CozoScript with `$name` parameters and come back
//! as `NamedRows`, which the cozo backend converts into [`Row`]s. A PostgreSQL
//! backend implements the same [`Engine`] trait with SQL definitions.
//!
//! # Type Decisions
//!
//! **Why a closed `Value` enum instead of engine-native cells?**
//! Shaping and output code is shared by every backend. Converting at the
//! connection boundary keeps `cozo::DataValue` and `postgres::Row` out of the
//! rest of the crate.
//!
//! **Why does an unknown query name return an empty result?**
//! Tools probe for optional queries. A missing name is logged as a warning and
//! treated as "no rows"; [`Store::has_query`] tells the two apart when needed.

mod args;
mod backend;
mod catalog;
mod config;
mod cozo;
mod hooks;
mod postgres;
mod shape;
mod store;
mod value;

pub use args::{Params, QueryArg, QueryArgs, Symbolic};
pub use backend::{Connection, Engine, ParamBinding, RowStream, Statement};
pub use catalog::{
    parse_definitions, placeholders, BoundQuery, CatalogError, CatalogSource, QueryCatalog,
    QueryDefinition, QueryDescription,
};
pub use config::{DatabaseConfig, PostgresConfig};
pub use cozo::{CozoEngine, CozoStorage};
pub use hooks::{HookContext, HookFn, Hooks, Phase, Session};
pub use postgres::{rewrite_placeholders, PgEngine};
pub use shape::{ColumnSelector, Identity, Shape, Shaper};
pub use store::Store;
pub use value::{Row, Value};

use thiserror::Error;

/// Store error types
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store is not set up; call setup() first")]
    NotSetUp,

    #[error("Store is already set up")]
    AlreadySetUp,

    #[error("Failed to connect to {engine}: {message}")]
    ConnectFailed { engine: String, message: String },

    #[error("Query '{name}' failed: {message}")]
    QueryFailed { name: String, message: String },

    /// Raised by backends, which do not know the query name.
    #[error("Engine error: {message}")]
    Engine { message: String },

    #[error("Unknown column '{name}' (available: {})", available.join(", "))]
    UnknownColumn { name: String, available: Vec<String> },

    #[error("Query catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("{phase} step '{step}' failed: {source}")]
    Hook {
        phase: Phase,
        step: String,
        #[source]
        source: Box<StoreError>,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
