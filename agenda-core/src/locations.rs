//! Read-only access to the `ubicaciones` table.

use crate::error::{AgendaError, AgendaResult};
use crate::event::Location;
use crate::store::{JsonStore, LOCATIONS_TABLE, Record};

#[derive(Debug, Clone, Copy)]
pub struct LocationAccessor<'a> {
    store: &'a JsonStore,
}

impl<'a> LocationAccessor<'a> {
    pub fn new(store: &'a JsonStore) -> Self {
        LocationAccessor { store }
    }

    /// Same contract as [`JsonStore::find`], index 0 included.
    pub fn find(&self, index: Option<usize>) -> AgendaResult<&'a [Record]> {
        self.store.find(LOCATIONS_TABLE, index)
    }

    pub fn all(&self) -> AgendaResult<Vec<Location>> {
        self.find(None)?.iter().map(Location::from_record).collect()
    }

    pub fn count(&self) -> AgendaResult<usize> {
        Ok(self.find(None)?.len())
    }

    /// Plain positional lookup, without the index-0 exclusion of `find`.
    pub fn get(&self, index: usize) -> AgendaResult<Location> {
        self.find(None)?
            .get(index)
            .ok_or(AgendaError::NotFound)
            .and_then(Location::from_record)
    }
}
