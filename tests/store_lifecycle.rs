//! Record Store Lifecycle Tests
//!
//! Covers:
//! - Sequential reads return records in write order
//! - Record operations on a closed store are state errors
//! - Reading past the last record is end of data, not a partial record
//! - Close / reopen-append transitions

use recstore::store::{OpenMode, StoreErrorCode, StoreState};
use recstore::{Employee, FixedRecord, RecordStore, Student};
use std::fs;
use tempfile::TempDir;

// =============================================================================
// Test Utilities
// =============================================================================

fn sample_employees() -> Vec<Employee> {
    vec![
        Employee::new(1, 100.0, "Ibrahim"),
        Employee::new(2, 100.0, "Maybe"),
        Employee::new(3, 100.0, "Again"),
    ]
}

fn create_store(dir: &TempDir) -> RecordStore<Employee> {
    RecordStore::create_or_replace(dir.path().join("employee.bin"))
        .expect("Failed to create store")
}

// =============================================================================
// Sequential Access
// =============================================================================

/// Writing three employees, resetting both cursors and reading three times
/// yields the same employees in write order.
#[test]
fn test_employee_scenario() {
    let dir = TempDir::new().unwrap();
    let mut store = create_store(&dir);
    let written = sample_employees();

    for employee in &written {
        store.write_record(employee).unwrap();
    }
    store.reset_read_cursor().unwrap();
    store.reset_write_cursor().unwrap();

    let read: Vec<Employee> = (0..3).map(|_| store.read_record().unwrap()).collect();
    assert_eq!(read, written);
    assert_eq!(read[0].id, 1);
    assert_eq!(read[0].salary, 100.0);
    assert_eq!(read[0].name, "Ibrahim");
}

/// A fourth read after three writes reports end of data.
#[test]
fn test_read_past_last_record_is_end_of_data() {
    let dir = TempDir::new().unwrap();
    let mut store = create_store(&dir);
    for employee in sample_employees() {
        store.write_record(&employee).unwrap();
    }
    store.reset_read_cursor().unwrap();

    for _ in 0..3 {
        store.read_record().unwrap();
    }
    let err = store.read_record().unwrap_err();
    assert_eq!(err.code(), StoreErrorCode::EndOfData);
    assert!(!err.is_io_error());
}

/// The file is exactly `count * stride` bytes with no header.
#[test]
fn test_file_is_headerless_blocks() {
    let dir = TempDir::new().unwrap();
    let mut store = create_store(&dir);
    let written = sample_employees();
    for employee in &written {
        store.write_record(employee).unwrap();
    }
    store.close().unwrap();

    let bytes = fs::read(dir.path().join("employee.bin")).unwrap();
    assert_eq!(bytes.len(), 3 * Employee::ENCODED_LEN);
    for (i, chunk) in bytes.chunks(Employee::ENCODED_LEN).enumerate() {
        assert_eq!(chunk, written[i].encode().as_slice());
    }
}

/// Record `i` can be read directly without reading the ones before it.
#[test]
fn test_index_addressing() {
    let dir = TempDir::new().unwrap();
    let mut store = RecordStore::<Student>::create_or_replace(dir.path().join("s.bin")).unwrap();
    for i in 0..10 {
        store
            .write_record(&Student::new(i, format!("student{}", i), i as f32 * 1.5))
            .unwrap();
    }

    let seventh = store.read_at(7).unwrap();
    assert_eq!(seventh, Student::new(7, "student7", 10.5));
    assert_eq!(store.read_cursor(), 8 * Student::ENCODED_LEN as u64);
    assert_eq!(store.read_record().unwrap().id, 8);
}

// =============================================================================
// Lifecycle State
// =============================================================================

/// Writing to a closed store fails with a state error.
#[test]
fn test_write_on_closed_store_is_state_error() {
    let dir = TempDir::new().unwrap();
    let mut store = create_store(&dir);
    store.close().unwrap();

    let err = store.write_record(&sample_employees()[0]).unwrap_err();
    assert_eq!(err.code(), StoreErrorCode::StateError);
    assert_eq!(fs::metadata(dir.path().join("employee.bin")).unwrap().len(), 0);
}

/// Closing twice fails on the second call.
#[test]
fn test_double_close_is_state_error() {
    let dir = TempDir::new().unwrap();
    let mut store = create_store(&dir);

    store.close().unwrap();
    let err = store.close().unwrap_err();
    assert!(err.is_state_error());
    assert!(err.message().contains("already closed"));
    assert_eq!(store.state(), StoreState::Closed);
}

/// Close, reopen in append mode, keep writing after the existing records.
#[test]
fn test_close_reopen_append_cycle() {
    let dir = TempDir::new().unwrap();
    let mut store = create_store(&dir);
    let written = sample_employees();

    store.write_record(&written[0]).unwrap();
    store.close().unwrap();
    store.reopen_append().unwrap();
    store.write_record(&written[1]).unwrap();
    store.close().unwrap();
    store.reopen_append().unwrap();
    store.write_record(&written[2]).unwrap();

    assert_eq!(store.state(), StoreState::Open(OpenMode::Append));
    assert_eq!(store.record_count().unwrap(), 3);
    assert_eq!(store.read_all().unwrap(), written);
}

/// Dropping an open store releases the file; a new store sees the data.
#[test]
fn test_drop_releases_file() {
    let dir = TempDir::new().unwrap();
    {
        let mut store = create_store(&dir);
        store.write_record(&sample_employees()[0]).unwrap();
    }

    let mut reopened =
        RecordStore::<Employee>::open_existing(dir.path().join("employee.bin")).unwrap();
    assert_eq!(reopened.read_record().unwrap(), sample_employees()[0]);
}

/// Opening a missing file without create is an I/O error.
#[test]
fn test_open_existing_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = RecordStore::<Employee>::open_existing(dir.path().join("missing.bin")).unwrap_err();
    assert_eq!(err.code(), StoreErrorCode::IoError);
}

// =============================================================================
// I/O Failures
// =============================================================================

/// A write the device cannot complete is an I/O error and the write cursor
/// does not move.
#[cfg(target_os = "linux")]
#[test]
fn test_failed_write_is_io_error_and_keeps_cursor() {
    let mut store = RecordStore::<Employee>::open_existing("/dev/full")
        .expect("Failed to open /dev/full");

    let err = store
        .write_record(&Employee::new(1, 1.0, "x"))
        .unwrap_err();
    assert_eq!(err.code(), StoreErrorCode::IoError);
    assert_eq!(store.write_cursor(), 0);
    assert!(store.is_open());
}

/// Reopening after the store's directory disappeared is an I/O error and
/// the store stays closed.
#[test]
fn test_reopen_append_in_removed_directory_is_io_error() {
    let dir = TempDir::new().unwrap();
    let data_dir = dir.path().join("data");
    fs::create_dir(&data_dir).unwrap();

    let mut store = RecordStore::<Employee>::create_or_replace(data_dir.join("employee.bin"))
        .unwrap();
    store.write_record(&sample_employees()[0]).unwrap();
    store.close().unwrap();
    fs::remove_dir_all(&data_dir).unwrap();

    let err = store.reopen_append().unwrap_err();
    assert_eq!(err.code(), StoreErrorCode::IoError);
    assert_eq!(store.state(), StoreState::Closed);
}
