//! Record Layout Tests
//!
//! Covers:
//! - Round trip for text within capacity
//! - Silent truncation for text beyond capacity
//! - Constant encoded size per record type

use rand::distributions::{Alphanumeric, DistString};
use rand::Rng;
use recstore::record::{truncate_text, TEXT_CAPACITY};
use recstore::{Employee, FixedRecord, Student};

/// Random names up to the usable capacity survive a round trip.
#[test]
fn test_roundtrip_within_capacity() {
    let mut rng = rand::thread_rng();
    for _ in 0..200 {
        let len = rng.gen_range(0..TEXT_CAPACITY);
        let name = Alphanumeric.sample_string(&mut rng, len);
        let employee = Employee::new(rng.gen(), rng.gen_range(-1.0e6..1.0e6), name);
        assert_eq!(Employee::decode(&employee.encode()).unwrap(), employee);
    }
}

/// Overlong names are cut to 49 bytes without error; other fields survive.
#[test]
fn test_overlong_text_truncated() {
    let name = "abcdefghij".repeat(10);
    let student = Student::new(42, name.clone(), 77.25);

    let decoded = Student::decode(&student.encode()).unwrap();
    assert_eq!(decoded.name, &name[..TEXT_CAPACITY - 1]);
    assert_eq!(decoded.id, 42);
    assert_eq!(decoded.marks, 77.25);
}

/// Multi-byte text is truncated on a character boundary.
#[test]
fn test_multibyte_truncation_stays_valid() {
    let name = "ü".repeat(40); // 80 bytes
    let decoded = Employee::decode(&Employee::new(1, 0.0, name.clone()).encode()).unwrap();

    assert_eq!(decoded.name, truncate_text(&name, TEXT_CAPACITY - 1));
    assert_eq!(decoded.name.len(), 48);
    assert!(name.starts_with(&decoded.name));
}

/// Every instance of a type encodes to the same size.
#[test]
fn test_stride_constant() {
    let samples = [
        Employee::default(),
        Employee::new(i32::MAX, f32::MAX, "x".repeat(500)),
        Employee::new(i32::MIN, -0.0, ""),
    ];
    for employee in &samples {
        assert_eq!(employee.encode().len(), Employee::ENCODED_LEN);
    }
    assert_eq!(Student::new(1, "y".repeat(49), 1.0).encode().len(), Student::ENCODED_LEN);
}

/// Non-finite measurements keep their exact bit pattern.
#[test]
fn test_non_finite_floats_preserved() {
    let decoded = Employee::decode(&Employee::new(1, f32::INFINITY, "inf").encode()).unwrap();
    assert_eq!(decoded.salary, f32::INFINITY);

    let nan = Employee::decode(&Employee::new(1, f32::NAN, "nan").encode()).unwrap();
    assert!(nan.salary.is_nan());
}
