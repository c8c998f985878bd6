//! Ordered setup and teardown steps.
//!
//! Steps are registered per [`Phase`] and run in registration order. Steps in
//! `PostSetup` and `PreDispose` get a [`Session`] on the live connection, so
//! they can run catalog queries (for example to load tables from files).

use std::fmt;

use super::args::QueryArgs;
use super::backend::Connection;
use super::catalog::QueryCatalog;
use super::store::run_named;
use super::value::Row;
use super::StoreError;

/// Lifecycle extension point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Before the catalog is loaded and the connection opened.
    PreSetup,
    /// After connecting; the connection is available.
    PostSetup,
    /// Before disconnecting; the connection is available.
    PreDispose,
    /// After the connection is closed.
    PostDispose,
}

impl Phase {
    /// Whether steps of this phase run with a live connection.
    pub fn has_connection(self) -> bool {
        matches!(self, Phase::PostSetup | Phase::PreDispose)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::PreSetup => "pre_setup",
            Phase::PostSetup => "post_setup",
            Phase::PreDispose => "pre_dispose",
            Phase::PostDispose => "post_dispose",
        })
    }
}

/// Query access handed to steps that run on a live connection.
pub struct Session<'a> {
    catalog: &'a QueryCatalog,
    conn: &'a mut dyn Connection,
    verbose: bool,
}

impl<'a> Session<'a> {
    pub(crate) fn new(catalog: &'a QueryCatalog, conn: &'a mut dyn Connection, verbose: bool) -> Self {
        Self {
            catalog,
            conn,
            verbose,
        }
    }

    /// Run a catalog query. Same semantics as [`crate::db::Store::query`].
    pub fn query(&mut self, name: &str, args: QueryArgs) -> Result<Vec<Row>, StoreError> {
        run_named(self.catalog, &mut *self.conn, name, &args, self.verbose)
    }

    pub fn catalog(&self) -> &QueryCatalog {
        self.catalog
    }
}

/// What a step sees when it runs.
pub struct HookContext<'a> {
    phase: Phase,
    session: Option<Session<'a>>,
}

impl<'a> HookContext<'a> {
    pub(crate) fn detached(phase: Phase) -> Self {
        Self {
            phase,
            session: None,
        }
    }

    pub(crate) fn attached(phase: Phase, session: Session<'a>) -> Self {
        Self {
            phase,
            session: Some(session),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The live session, or `NotSetUp` in phases without a connection.
    pub fn session(&mut self) -> Result<&mut Session<'a>, StoreError> {
        self.session.as_mut().ok_or(StoreError::NotSetUp)
    }
}

/// A registered step.
pub type HookFn = Box<dyn Fn(&mut HookContext<'_>) -> Result<(), StoreError> + Send + Sync>;

struct Step {
    phase: Phase,
    name: String,
    run: HookFn,
}

/// Registration list of lifecycle steps.
#[derive(Default)]
pub struct Hooks {
    steps: Vec<Step>,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a step; it runs after the steps already registered for `phase`.
    pub fn add<F>(&mut self, phase: Phase, name: impl Into<String>, f: F)
    where
        F: Fn(&mut HookContext<'_>) -> Result<(), StoreError> + Send + Sync + 'static,
    {
        self.steps.push(Step {
            phase,
            name: name.into(),
            run: Box::new(f),
        });
    }

    /// Builder form of [`Hooks::add`].
    pub fn with<F>(mut self, phase: Phase, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&mut HookContext<'_>) -> Result<(), StoreError> + Send + Sync + 'static,
    {
        self.add(phase, name, f);
        self
    }

    /// Register a step that runs one catalog query and discards its rows.
    ///
    /// Only phases with a live connection accept query steps.
    pub fn add_query(
        &mut self,
        phase: Phase,
        query: impl Into<String>,
        args: QueryArgs,
    ) -> Result<(), StoreError> {
        let query = query.into();
        if !phase.has_connection() {
            return Err(StoreError::Config {
                message: format!("query step '{}' cannot run in {}", query, phase),
            });
        }
        let name = query.clone();
        self.add(phase, name, move |ctx| {
            ctx.session()?.query(&query, args.clone()).map(|_| ())
        });
        Ok(())
    }

    /// Names of the steps registered for `phase`, in run order.
    pub fn steps(&self, phase: Phase) -> impl Iterator<Item = &str> {
        self.steps
            .iter()
            .filter(move |s| s.phase == phase)
            .map(|s| s.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every step of `phase` in order, stopping at the first failure.
    pub(crate) fn run(&self, phase: Phase, ctx: &mut HookContext<'_>) -> Result<(), StoreError> {
        for step in self.steps.iter().filter(|s| s.phase == phase) {
            tracing::debug!(phase = %phase, step = %step.name, "running lifecycle step");
            (step.run)(ctx).map_err(|e| {
                tracing::warn!(phase = %phase, step = %step.name, error = %e, "lifecycle step failed");
                StoreError::Hook {
                    phase,
                    step: step.name.clone(),
                    source: Box::new(e),
                }
            })?;
        }
        Ok(())
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.steps.iter().map(|s| format!("{}:{}", s.phase, s.name)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(&str) -> HookFn) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let make = {
            let log = Arc::clone(&log);
            move |label: &str| -> HookFn {
                let log = Arc::clone(&log);
                let label = label.to_string();
                Box::new(move |_ctx: &mut HookContext<'_>| {
                    log.lock().unwrap().push(label.clone());
                    Ok(())
                })
            }
        };
        (log, make)
    }

    #[test]
    fn test_steps_run_in_registration_order_per_phase() {
        let (log, make) = recorder();
        let mut hooks = Hooks::new();
        hooks.add(Phase::PreSetup, "b", make("pre-1"));
        hooks.add(Phase::PostDispose, "x", make("post-dispose"));
        hooks.add(Phase::PreSetup, "a", make("pre-2"));

        hooks
            .run(Phase::PreSetup, &mut HookContext::detached(Phase::PreSetup))
            .unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["pre-1", "pre-2"]);
        assert_eq!(hooks.steps(Phase::PreSetup).collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(hooks.len(), 3);
    }

    #[test]
    fn test_failing_step_stops_the_phase() {
        let (log, make) = recorder();
        let hooks = Hooks::new()
            .with(Phase::PreSetup, "fails", |_ctx: &mut HookContext<'_>| {
                Err(StoreError::Config {
                    message: "nope".into(),
                })
            })
            .with(Phase::PreSetup, "never", make("never"));

        let err = hooks
            .run(Phase::PreSetup, &mut HookContext::detached(Phase::PreSetup))
            .unwrap_err();

        match err {
            StoreError::Hook { phase, step, .. } => {
                assert_eq!(phase, Phase::PreSetup);
                assert_eq!(step, "fails");
            }
            other => panic!("Expected Hook error, got {:?}", other),
        }
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_detached_context_has_no_session() {
        let mut ctx = HookContext::detached(Phase::PostDispose);
        assert_eq!(ctx.phase(), Phase::PostDispose);
        assert!(matches!(ctx.session(), Err(StoreError::NotSetUp)));
    }

    #[test]
    fn test_query_steps_need_a_connection() {
        let mut hooks = Hooks::new();
        assert!(hooks.add_query(Phase::PreSetup, "create_table_country", QueryArgs::new()).is_err());
        assert!(hooks.add_query(Phase::PostSetup, "create_table_country", QueryArgs::new()).is_ok());
        assert_eq!(
            hooks.steps(Phase::PostSetup).collect::<Vec<_>>(),
            vec!["create_table_country"]
        );
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::PreSetup.to_string(), "pre_setup");
        assert_eq!(Phase::PostDispose.to_string(), "post_dispose");
        assert!(Phase::PostSetup.has_connection());
        assert!(!Phase::PostDispose.has_connection());
    }
}
