//! Shared test utilities for store, tool and command tests.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::dataset::{DataFiles, COZO_CATALOG};
use crate::db::{CatalogSource, CozoEngine, Hooks, Phase, QueryArgs, Store};
use crate::fixtures;

/// Switches the current directory and restores it on drop.
///
/// Tests that use a guard must run `#[serial]`.
pub struct CurrentDirGuard {
    previous: PathBuf,
}

impl CurrentDirGuard {
    pub fn enter(dir: &Path) -> Self {
        let previous = std::env::current_dir().expect("Failed to read current dir");
        std::env::set_current_dir(dir).expect("Failed to change current dir");
        Self { previous }
    }
}

impl Drop for CurrentDirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.previous);
    }
}

/// The embedded cozo catalog plus the fixture seed queries.
pub fn seeded_catalog() -> CatalogSource {
    CatalogSource::text(
        "demography.cozo+fixtures",
        format!("{}\n{}", COZO_CATALOG, fixtures::SEED_QUERIES),
    )
}

/// An in-memory store, not yet set up, that seeds the fixture rows after
/// connecting.
pub fn seeded_store_unopened() -> Store {
    let mut hooks = Hooks::new();
    for step in fixtures::SEED_STEPS {
        hooks
            .add_query(Phase::PostSetup, step, QueryArgs::new())
            .expect("Seed steps run with a connection");
    }
    Store::new(CozoEngine::mem(), seeded_catalog()).with_hooks(hooks)
}

/// An in-memory store, set up and seeded with the fixture rows.
pub async fn seeded_store() -> Store {
    let mut store = seeded_store_unopened();
    store.setup().await.expect("Seeded store setup should succeed");
    store
}

/// An in-memory store over the embedded catalog with no tables.
pub async fn empty_store() -> Store {
    let mut store = Store::new(
        CozoEngine::mem(),
        CatalogSource::text("demography.cozo", COZO_CATALOG),
    );
    store.setup().await.expect("Empty store setup should succeed");
    store
}

/// Write the fixture CSV files into a temporary directory.
pub fn csv_data_files() -> (TempDir, DataFiles) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let files = DataFiles {
        demography: dir.path().join("demography.csv"),
        countries: dir.path().join("all.csv"),
        fertility: dir.path().join("fertility-rate.csv"),
    };
    fs::write(&files.demography, fixtures::DEMOGRAPHY_CSV).expect("Failed to write CSV");
    fs::write(&files.countries, fixtures::COUNTRIES_CSV).expect("Failed to write CSV");
    fs::write(&files.fertility, fixtures::FERTILITY_CSV).expect("Failed to write CSV");
    (dir, files)
}
