//! Employee record

use std::fmt;

use serde::{Deserialize, Serialize};

use super::codec::{BlockReader, BlockWriter, TEXT_CAPACITY};
use super::errors::CodecResult;
use super::FixedRecord;

/// Employee entry: id, salary and a bounded name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i32,
    pub salary: f32,
    pub name: String,
}

impl Employee {
    pub fn new(id: i32, salary: f32, name: impl Into<String>) -> Self {
        Self {
            id,
            salary,
            name: name.into(),
        }
    }
}

impl Default for Employee {
    fn default() -> Self {
        Self::new(-1, 0.0, "")
    }
}

impl FixedRecord for Employee {
    const ENCODED_LEN: usize = 4 + 4 + TEXT_CAPACITY;
    const LAYOUT_VERSION: u16 = 1;
    const KIND: &'static str = "employee";

    fn write_fields(&self, out: &mut BlockWriter) {
        out.put_i32(self.id);
        out.put_f32(self.salary);
        out.put_text(&self.name, TEXT_CAPACITY);
    }

    fn read_fields(input: &mut BlockReader<'_>) -> CodecResult<Self> {
        let id = input.get_i32()?;
        let salary = input.get_f32()?;
        let name = input.get_text(TEXT_CAPACITY)?;
        Ok(Self { id, salary, name })
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.id, self.salary, self.name)
    }
}
