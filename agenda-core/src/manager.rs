//! Event manager: booking rules plus reads and writes through the store.
//!
//! Every operation is one read-validate-write pass over the in-memory
//! document. Callers sharing a manager between threads must hold an
//! exclusive lock for the whole call.

use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};
use tracing::{info, warn};

use crate::error::{AgendaError, AgendaResult};
use crate::event::{EVENT_FIELDS, EventView, Location, StoredEvent};
use crate::locations::LocationAccessor;
use crate::schedule;
use crate::store::{EVENTS_TABLE, JsonStore};

type Clock = Box<dyn Fn() -> NaiveDateTime + Send + Sync>;

pub struct EventManager {
    store: JsonStore,
    clock: Clock,
}

impl EventManager {
    /// Open the document at `path` and check every record against the
    /// event and location schemas.
    pub fn open(path: impl Into<PathBuf>) -> AgendaResult<Self> {
        Self::new(JsonStore::open(path)?)
    }

    pub fn new(store: JsonStore) -> AgendaResult<Self> {
        Self::with_clock(store, || Local::now().naive_local())
    }

    /// Use `clock` instead of the local wall clock for the booking window.
    pub fn with_clock(
        store: JsonStore,
        clock: impl Fn() -> NaiveDateTime + Send + Sync + 'static,
    ) -> AgendaResult<Self> {
        let manager = EventManager {
            store,
            clock: Box::new(clock),
        };

        let events = manager.stored_events()?;
        let locations = manager.locations().all()?;
        info!(
            events = events.len(),
            locations = locations.len(),
            "event manager ready"
        );

        Ok(manager)
    }

    pub fn locations(&self) -> LocationAccessor<'_> {
        LocationAccessor::new(&self.store)
    }

    pub fn create_event(
        &mut self,
        title: &str,
        start: NaiveDateTime,
        description: &str,
        location: i128,
    ) -> AgendaResult<()> {
        let event = self.validate(title, start, description, location)?;
        self.store
            .insert(EVENTS_TABLE, &EVENT_FIELDS, event.values())?;

        info!(title = %event.title, start = %event.start, location = event.location, "event created");
        Ok(())
    }

    /// All events with their location expanded.
    pub fn list_events(&self) -> AgendaResult<Vec<EventView>> {
        let locations = self.locations().all()?;

        self.stored_events()?
            .into_iter()
            .map(|event| hydrate(event, &locations))
            .collect()
    }

    /// One event by position. Position 0 is never found.
    pub fn get_event(&self, id: usize) -> AgendaResult<EventView> {
        let record = self.store.find_one(EVENTS_TABLE, id)?;
        let event = StoredEvent::from_record(record)?;
        let location = match self.locations().get(event.location) {
            Err(AgendaError::NotFound) => return Err(dangling(&event)),
            other => other?,
        };
        Ok(event.hydrate(location))
    }

    /// Replace the event at `id` after the same checks as creation.
    ///
    /// The double-booking scan includes the event being replaced, so keeping
    /// its current location and start is rejected.
    pub fn update_event(
        &mut self,
        title: &str,
        start: NaiveDateTime,
        description: &str,
        location: i128,
        id: usize,
    ) -> AgendaResult<()> {
        self.store.find_one(EVENTS_TABLE, id)?;

        let event = self.validate(title, start, description, location)?;
        self.store
            .update(EVENTS_TABLE, &EVENT_FIELDS, event.values(), id)?;

        info!(id, title = %event.title, "event updated");
        Ok(())
    }

    /// Remove the event at `id`; later events move down one position.
    pub fn delete_event(&mut self, id: usize) -> AgendaResult<StoredEvent> {
        let record = self
            .store
            .find(EVENTS_TABLE, None)?
            .get(id)
            .ok_or(AgendaError::NotFound)?;
        let event = StoredEvent::from_record(record)?;
        self.store.delete(EVENTS_TABLE, id)?;

        info!(id, title = %event.title, "event deleted");
        Ok(event)
    }

    fn stored_events(&self) -> AgendaResult<Vec<StoredEvent>> {
        self.store
            .find(EVENTS_TABLE, None)?
            .iter()
            .map(StoredEvent::from_record)
            .collect()
    }

    fn validate(
        &self,
        title: &str,
        start: NaiveDateTime,
        description: &str,
        location: i128,
    ) -> AgendaResult<StoredEvent> {
        self.check(title, start, description, location)
            .inspect_err(|e| warn!(title, %start, %location, "event rejected: {e}"))
    }

    fn check(
        &self,
        title: &str,
        start: NaiveDateTime,
        description: &str,
        location: i128,
    ) -> AgendaResult<StoredEvent> {
        let title = schedule::clean_title(title);
        schedule::check_text_fields(&title, description)?;
        schedule::check_start(&start, &(self.clock)())?;

        let known = self.locations().count()?;
        let location = usize::try_from(location)
            .ok()
            .filter(|&l| l < known)
            .ok_or_else(|| AgendaError::validation("La ubicación del evento no existe"))?;

        let start = schedule::format_start(&start);
        let taken = self
            .stored_events()?
            .iter()
            .any(|e| e.location == location && e.start == start);
        if taken {
            return Err(AgendaError::validation(
                "La ubicación y fecha del evento ya están ocupadas por otro evento",
            ));
        }

        Ok(StoredEvent {
            title,
            start,
            description: description.to_string(),
            location,
        })
    }
}

fn hydrate(event: StoredEvent, locations: &[Location]) -> AgendaResult<EventView> {
    let location = locations
        .get(event.location)
        .cloned()
        .ok_or_else(|| dangling(&event))?;
    Ok(event.hydrate(location))
}

fn dangling(event: &StoredEvent) -> AgendaError {
    AgendaError::Schema(format!(
        "event '{}' references missing location {}",
        event.title, event.location
    ))
}
