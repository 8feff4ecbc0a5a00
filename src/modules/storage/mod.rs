pub mod store;

pub use store::{
    run_blocking, DocumentBackend, InMemoryBackend, JsonFileBackend, PersistenceStore, StorageError,
    CUSTOM_PERSONAS_KEY, USER_RECORDS_KEY,
};
