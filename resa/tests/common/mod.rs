//! Shared fixtures for the integration suites.

#![allow(dead_code)]

use resa::{
    AdminConfig, Catalog, Config, Engine, MemoryStorage, ReservationStore, UserDirectory,
};

/// The separately-owned components of an in-memory engine, for tests that
/// drive the planners and executor directly.
pub struct Components {
    pub catalog: Catalog,
    pub store: ReservationStore,
    pub users: UserDirectory,
}

/// Builds in-memory components with an empty catalog and directory.
pub fn components() -> Components {
    let catalog = Catalog::open(
        Box::new(MemoryStorage::new()),
        Box::new(MemoryStorage::new()),
    )
    .expect("open catalog");
    let store = ReservationStore::open(
        Box::new(MemoryStorage::new()),
        Box::new(MemoryStorage::new()),
    )
    .expect("open store");
    let users = UserDirectory::open(Box::new(MemoryStorage::new()), AdminConfig::default())
        .expect("open user directory");
    Components {
        catalog,
        store,
        users,
    }
}

/// Builds an in-memory engine with an empty catalog and directory.
pub fn memory_engine() -> Engine {
    let parts = components();
    Engine::from_components(parts.catalog, parts.store, parts.users, 14)
}

/// Opens a file-backed engine in the given directory with default admin
/// credentials and a 14-day horizon, ignoring ambient environment.
pub fn file_engine(data_dir: &std::path::Path) -> Engine {
    let config = Config::builder()
        .skip_env()
        .data_dir(data_dir)
        .build()
        .expect("build config");
    Engine::open(&config).expect("open engine")
}
