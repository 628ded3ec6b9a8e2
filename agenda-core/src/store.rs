//! Flat JSON document store.
//!
//! The whole document is held in memory as a set of named tables, each an
//! ordered list of JSON objects. Every mutation rewrites the file.
//!
//! ```text
//! {
//!     "eventos": [ { "titulo_evento": "...", ... } ],
//!     "ubicaciones": [ { "nombre": "...", "direccion": "..." } ]
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{AgendaError, AgendaResult};

/// One row of a table.
pub type Record = Map<String, Value>;

type Tables = BTreeMap<String, Vec<Record>>;

pub const EVENTS_TABLE: &str = "eventos";
pub const LOCATIONS_TABLE: &str = "ubicaciones";

const REQUIRED_TABLES: [&str; 2] = [EVENTS_TABLE, LOCATIONS_TABLE];

#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    tables: Tables,
}

impl JsonStore {
    /// Read and strictly parse the document at `path`.
    ///
    /// A missing file is an error; no empty document is created.
    pub fn open(path: impl Into<PathBuf>) -> AgendaResult<Self> {
        let path = path.into();
        let content = fs::read_to_string(&path)?;
        let tables = parse_document(&content)?;

        debug!(
            path = %path.display(),
            tables = tables.len(),
            "loaded database document"
        );

        Ok(JsonStore { path, tables })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the in-memory document over the file.
    pub fn save(&self) -> AgendaResult<()> {
        write_document(&self.path, &self.tables)
    }

    /// Append a record built from parallel `fields` / `values` lists.
    pub fn insert(&mut self, table: &str, fields: &[&str], values: Vec<Value>) -> AgendaResult<()> {
        let record = build_record(fields, values)?;

        self.commit(|tables| {
            table_mut(tables, table)?.push(record);
            Ok(())
        })?;

        debug!(table, "record created");
        Ok(())
    }

    /// Without an index, the whole table. With one, a single-record slice.
    ///
    /// Only `0 < index < len` is found: index 0 is never returned, even when
    /// the table has a record there.
    pub fn find(&self, table: &str, index: Option<usize>) -> AgendaResult<&[Record]> {
        let rows = self.table(table)?;

        match index {
            None => Ok(rows),
            Some(i) if 0 < i && i < rows.len() => Ok(std::slice::from_ref(&rows[i])),
            Some(_) => Err(AgendaError::NotFound),
        }
    }

    /// Same bounds as [`find`](Self::find) with an index.
    pub fn find_one(&self, table: &str, index: usize) -> AgendaResult<&Record> {
        let found = self.find(table, Some(index))?;
        found.first().ok_or(AgendaError::NotFound)
    }

    /// Replace the record at `index` wholesale.
    pub fn update(
        &mut self,
        table: &str,
        fields: &[&str],
        values: Vec<Value>,
        index: usize,
    ) -> AgendaResult<()> {
        let record = build_record(fields, values)?;

        self.commit(|tables| {
            let slot = table_mut(tables, table)?
                .get_mut(index)
                .ok_or(AgendaError::NotFound)?;
            *slot = record;
            Ok(())
        })?;

        debug!(table, index, "record updated");
        Ok(())
    }

    /// Remove the record at `index` and return it. Later records shift down.
    pub fn delete(&mut self, table: &str, index: usize) -> AgendaResult<Record> {
        let removed = self.commit(|tables| {
            let rows = table_mut(tables, table)?;
            if index >= rows.len() {
                return Err(AgendaError::NotFound);
            }
            Ok(rows.remove(index))
        })?;

        debug!(table, index, "record deleted");
        Ok(removed)
    }

    fn table(&self, name: &str) -> AgendaResult<&[Record]> {
        self.tables
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| AgendaError::UnknownTable(name.to_string()))
    }

    /// Apply `change` to a copy of the document, persist the copy and only
    /// then swap it in. A failed write leaves memory matching the file.
    fn commit<T>(&mut self, change: impl FnOnce(&mut Tables) -> AgendaResult<T>) -> AgendaResult<T> {
        let mut next = self.tables.clone();
        let out = change(&mut next)?;
        write_document(&self.path, &next)?;
        self.tables = next;
        Ok(out)
    }
}

fn table_mut<'a>(tables: &'a mut Tables, name: &str) -> AgendaResult<&'a mut Vec<Record>> {
    tables
        .get_mut(name)
        .ok_or_else(|| AgendaError::UnknownTable(name.to_string()))
}

fn build_record(fields: &[&str], values: Vec<Value>) -> AgendaResult<Record> {
    if fields.len() != values.len() {
        return Err(AgendaError::FieldMismatch {
            fields: fields.len(),
            values: values.len(),
        });
    }

    Ok(fields
        .iter()
        .map(|f| f.to_string())
        .zip(values)
        .collect())
}

/// The top level must be an object of arrays of objects, and the required
/// tables must all be present.
fn parse_document(content: &str) -> AgendaResult<Tables> {
    let tables: Tables = serde_json::from_str(content).map_err(|e| {
        if e.is_data() {
            AgendaError::Schema(e.to_string())
        } else {
            AgendaError::Json(e)
        }
    })?;

    for name in REQUIRED_TABLES {
        if !tables.contains_key(name) {
            return Err(AgendaError::Schema(format!("missing table '{name}'")));
        }
    }

    Ok(tables)
}

/// Write to a `.tmp` sibling, sync, then rename over the target.
fn write_document(path: &Path, tables: &Tables) -> AgendaResult<()> {
    let tmp_path = path.with_extension("json.tmp");

    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    tables.serialize(&mut ser)?;

    let mut file = fs::File::create(&tmp_path)?;
    file.write_all(&buf)?;
    file.sync_data()?;
    drop(file);

    fs::rename(&tmp_path, path)?;
    Ok(())
}
