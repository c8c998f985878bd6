//! The store facade: one connection, one catalog, named queries.

use tokio::sync::Mutex;

use super::args::QueryArgs;
use super::backend::{Connection, Engine};
use super::catalog::{CatalogSource, QueryCatalog, QueryDescription};
use super::hooks::{HookContext, Hooks, Phase, Session};
use super::shape::{Identity, Shape, Shaper};
use super::value::{Row, Value};
use super::StoreError;

struct Live {
    catalog: QueryCatalog,
    conn: Mutex<Box<dyn Connection>>,
}

/// Named-query access over a single engine connection.
///
/// Lifecycle: [`Store::setup`] runs the `PreSetup` steps, loads the catalog,
/// connects and runs the `PostSetup` steps; [`Store::dispose`] runs the
/// `PreDispose` steps, closes the connection and runs the `PostDispose` steps.
/// Queries in between share the connection, one execution at a time.
///
/// A store dropped without `dispose` still closes its connection.
pub struct Store {
    engine: Box<dyn Engine>,
    source: CatalogSource,
    hooks: Hooks,
    verbose: bool,
    live: Option<Live>,
}

impl Store {
    pub fn new(engine: impl Engine + 'static, source: CatalogSource) -> Self {
        Self::from_boxed(Box::new(engine), source)
    }

    pub fn from_boxed(engine: Box<dyn Engine>, source: CatalogSource) -> Self {
        Self {
            engine,
            source,
            hooks: Hooks::new(),
            verbose: false,
            live: None,
        }
    }

    pub fn with_hooks(mut self, hooks: Hooks) -> Self {
        self.hooks = hooks;
        self
    }

    /// Default verbosity of the convenience query methods.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn hooks_mut(&mut self) -> &mut Hooks {
        &mut self.hooks
    }

    pub fn engine_name(&self) -> &'static str {
        self.engine.name()
    }

    pub fn is_set_up(&self) -> bool {
        self.live.is_some()
    }

    /// Open the connection and load the catalog.
    ///
    /// On failure the store is left not set up and any connection opened here
    /// is closed again.
    pub async fn setup(&mut self) -> Result<(), StoreError> {
        if self.live.is_some() {
            return Err(StoreError::AlreadySetUp);
        }

        self.hooks
            .run(Phase::PreSetup, &mut HookContext::detached(Phase::PreSetup))?;

        let catalog = QueryCatalog::load(&self.source, self.engine.as_ref())?;
        let mut conn = self.engine.connect()?;
        tracing::info!(
            engine = self.engine.name(),
            catalog = catalog.origin(),
            queries = catalog.len(),
            "store connected"
        );

        let post_setup = {
            let session = Session::new(&catalog, conn.as_mut(), self.verbose);
            self.hooks
                .run(Phase::PostSetup, &mut HookContext::attached(Phase::PostSetup, session))
        };
        if let Err(e) = post_setup {
            close_connection(conn, self.engine.name());
            return Err(e);
        }

        self.live = Some(Live {
            catalog,
            conn: Mutex::new(conn),
        });
        Ok(())
    }

    /// Close the connection.
    ///
    /// The connection is closed even when a `PreDispose` step fails; the
    /// first error is returned.
    pub async fn dispose(&mut self) -> Result<(), StoreError> {
        let Live { catalog, conn } = self.live.take().ok_or(StoreError::NotSetUp)?;
        let mut conn = conn.into_inner();

        let pre_dispose = {
            let session = Session::new(&catalog, conn.as_mut(), self.verbose);
            self.hooks
                .run(Phase::PreDispose, &mut HookContext::attached(Phase::PreDispose, session))
        };
        let closed = conn.close();
        tracing::info!(engine = self.engine.name(), "store disposed");

        pre_dispose?;
        closed?;
        self.hooks
            .run(Phase::PostDispose, &mut HookContext::detached(Phase::PostDispose))
    }

    fn live(&self) -> Result<&Live, StoreError> {
        self.live.as_ref().ok_or(StoreError::NotSetUp)
    }

    /// Whether `name` is in the loaded catalog. False before setup.
    pub fn has_query(&self, name: &str) -> bool {
        self.live
            .as_ref()
            .is_some_and(|live| live.catalog.contains(name))
    }

    /// Every loaded query with its text.
    pub fn describe_catalog(&self) -> Result<Vec<QueryDescription>, StoreError> {
        Ok(self.live()?.catalog.describe())
    }

    /// Run a named query and shape every row.
    ///
    /// The rows are fully drained from the engine before `shape` runs, and
    /// `shape` sees each row exactly once, in result order. An unknown `name`
    /// logs a warning and yields no rows. `verbose` logs the coerced arguments
    /// and the result; it does not change what runs.
    pub async fn execute<S: Shape>(
        &self,
        name: &str,
        args: QueryArgs,
        shape: &S,
        verbose: bool,
    ) -> Result<Vec<S::Output>, StoreError> {
        let live = self.live()?;
        let rows = {
            let mut conn = live.conn.lock().await;
            run_named(&live.catalog, conn.as_mut(), name, &args, verbose)?
        };
        Ok(rows.into_iter().map(|row| shape.shape(row)).collect())
    }

    /// Rows as returned by the engine.
    pub async fn query(&self, name: &str, args: QueryArgs) -> Result<Vec<Row>, StoreError> {
        self.execute(name, args, &Identity, self.verbose).await
    }

    pub async fn query_with<S: Shape>(
        &self,
        name: &str,
        args: QueryArgs,
        shape: &S,
    ) -> Result<Vec<S::Output>, StoreError> {
        self.execute(name, args, shape, self.verbose).await
    }

    /// First row, if any.
    pub async fn query_one(&self, name: &str, args: QueryArgs) -> Result<Option<Row>, StoreError> {
        Ok(self.query(name, args).await?.into_iter().next())
    }

    /// First shaped row, or `default` when the query returns nothing.
    pub async fn query_one_or<S: Shape>(
        &self,
        name: &str,
        args: QueryArgs,
        shape: &S,
        default: S::Output,
    ) -> Result<S::Output, StoreError> {
        let rows = self.query_with(name, args, shape).await?;
        Ok(rows.into_iter().next().unwrap_or(default))
    }

    /// Rows as positional tuples laid out by `shaper`.
    pub async fn query_to_tuple(
        &self,
        name: &str,
        args: QueryArgs,
        shaper: &Shaper,
    ) -> Result<Vec<Vec<Value>>, StoreError> {
        self.query_with(name, args, shaper).await
    }

    /// Rows as positional tuples over `col_names`, missing columns as null.
    pub async fn query_to_tuple_from_col_names<C: AsRef<str>>(
        &self,
        name: &str,
        args: QueryArgs,
        col_names: &[C],
    ) -> Result<Vec<Vec<Value>>, StoreError> {
        self.query_with(name, args, &Shaper::from_col_names(col_names))
            .await
    }
}

impl Drop for Store {
    fn drop(&mut self) {
        if let Some(live) = self.live.take() {
            tracing::warn!(engine = self.engine.name(), "store dropped without dispose; closing connection");
            close_connection(live.conn.into_inner(), self.engine.name());
        }
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("engine", &self.engine.name())
            .field("source", &self.source)
            .field("hooks", &self.hooks)
            .field("set_up", &self.live.is_some())
            .finish()
    }
}

fn close_connection(conn: Box<dyn Connection>, engine: &str) {
    if let Err(e) = conn.close() {
        tracing::warn!(engine, error = %e, "failed to close connection");
    }
}

/// Resolve, execute and drain one named query.
pub(crate) fn run_named(
    catalog: &QueryCatalog,
    conn: &mut dyn Connection,
    name: &str,
    args: &QueryArgs,
    verbose: bool,
) -> Result<Vec<Row>, StoreError> {
    let params = args.coerce();
    if verbose {
        tracing::info!(query = name, args = ?params, "running query");
    }

    let Some(query) = catalog.resolve(name) else {
        tracing::warn!(query = name, catalog = catalog.origin(), "query not found");
        return Ok(Vec::new());
    };

    let rows = conn
        .execute(&query.statement, &params)
        .and_then(|stream| stream.collect::<Result<Vec<Row>, StoreError>>())
        .map_err(|e| {
            tracing::warn!(query = name, args = ?params, error = %e, "query failed");
            match e {
                StoreError::Engine { message } => StoreError::QueryFailed {
                    name: name.to_string(),
                    message,
                },
                other => other,
            }
        })?;

    if verbose {
        tracing::debug!(query = name, rows = rows.len(), result = ?rows, "query result");
    }
    Ok(rows)
}
