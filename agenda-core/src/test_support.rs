//! Throwaway databases for unit tests.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{Value, json};
use tempfile::TempDir;

use crate::store::JsonStore;

pub(crate) fn write_db(dir: &Path, doc: &Value) -> PathBuf {
    let path = dir.join("db.json");
    std::fs::write(&path, serde_json::to_string_pretty(doc).unwrap()).unwrap();
    path
}

pub(crate) fn sample_locations() -> Value {
    json!([
        {"nombre": "Auditorio", "direccion": "Calle 1 #2-3"},
        {"nombre": "Biblioteca", "direccion": "Carrera 4 #5-6"},
        {"nombre": "Coliseo", "direccion": "Avenida 7 #8-9"},
    ])
}

pub(crate) fn sample_store(events: Value) -> (TempDir, JsonStore) {
    let dir = tempfile::tempdir().unwrap();
    let path = write_db(
        dir.path(),
        &json!({"eventos": events, "ubicaciones": sample_locations()}),
    );
    let store = JsonStore::open(path).unwrap();
    (dir, store)
}

/// Fixed "now" used by manager tests: 2030-01-01 09:30:00.
pub(crate) fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2030, 1, 1)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
}

pub(crate) fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}
