//! Backend traits for abstracting different database engines.
//!
//! An [`Engine`] knows how to bind catalog definitions to its calling
//! convention and how to open a [`Connection`]. The store owns exactly one
//! connection at a time and never looks at engine-native types.

use super::args::Params;
use super::catalog::{CatalogError, QueryDefinition};
use super::value::Row;
use super::StoreError;

/// Rows produced by one execution. Engines may yield them lazily.
pub type RowStream<'c> = Box<dyn Iterator<Item = Result<Row, StoreError>> + 'c>;

/// A query definition bound to an engine's calling convention.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// Text handed to the engine.
    pub text: String,
    pub binding: ParamBinding,
}

/// How arguments travel to the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamBinding {
    /// Arguments passed by name; the engine resolves `$name` itself.
    Named,
    /// Arguments passed by position, in this order of parameter names.
    Positional(Vec<String>),
}

/// A database engine that can open connections.
pub trait Engine: Send + Sync {
    /// Get the backend name for logging/debugging.
    fn name(&self) -> &'static str;

    /// Bind a parsed definition to this engine's calling convention.
    fn bind(&self, definition: &QueryDefinition) -> Result<Statement, CatalogError>;

    /// Open a fresh session.
    fn connect(&self) -> Result<Box<dyn Connection>, StoreError>;
}

/// A live session owned by one store.
pub trait Connection: Send {
    /// Execute a bound statement with coerced arguments.
    fn execute<'c>(
        &'c mut self,
        statement: &Statement,
        params: &Params,
    ) -> Result<RowStream<'c>, StoreError>;

    /// Close the session.
    ///
    /// # Default Implementation
    /// Drops the connection, which is enough for engines that release their
    /// resources on drop.
    fn close(self: Box<Self>) -> Result<(), StoreError> {
        Ok(())
    }
}
