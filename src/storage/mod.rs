pub mod postgres;
pub mod row;

pub use postgres::PgRecordStore;
pub use row::IdCardRow;

use log::{info, warn};

use crate::config::ServiceConfig;
use crate::utils::PersistError;

/// Destination for extracted records. One call stores one row.
pub trait RecordSink {
    fn store(&self, row: &IdCardRow) -> Result<(), PersistError>;
}

impl<S: RecordSink + ?Sized> RecordSink for Box<S> {
    fn store(&self, row: &IdCardRow) -> Result<(), PersistError> {
        (**self).store(row)
    }
}

/// Sink used when persistence is switched off.
pub struct NoopSink;

impl RecordSink for NoopSink {
    fn store(&self, _row: &IdCardRow) -> Result<(), PersistError> {
        Ok(())
    }
}

/// Build the sink selected by the configuration and probe the database once.
///
/// Fatal errors (bad credentials, unknown database or table) are returned.
/// An unreachable server only logs a warning: the store is still returned and
/// each later insert reports its own failure.
pub fn open_sink(config: &ServiceConfig) -> Result<Box<dyn RecordSink>, PersistError> {
    if config.no_persist {
        info!("Persistence disabled, records will not be stored");
        return Ok(Box::new(NoopSink));
    }

    let store = PgRecordStore::new(&config.database)?;

    if config.init_schema {
        store.ensure_schema()?;
    }

    match store.check_connection() {
        Ok(()) => info!("Connected to {}", store.target()),
        Err(e) if e.is_fatal() => return Err(e),
        Err(e) => warn!(
            "Database {} is not reachable, records will not be stored until it is: {}",
            store.target(),
            e
        ),
    }

    Ok(Box::new(store))
}
