//! Student record
//!
//! Unlike [`Employee`](super::Employee), the name sits between the id and
//! the numeric field.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::codec::{BlockReader, BlockWriter, TEXT_CAPACITY};
use super::errors::CodecResult;
use super::FixedRecord;

/// Student entry: id, bounded name and marks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: i32,
    pub name: String,
    pub marks: f32,
}

impl Student {
    pub fn new(id: i32, name: impl Into<String>, marks: f32) -> Self {
        Self {
            id,
            name: name.into(),
            marks,
        }
    }
}

impl Default for Student {
    fn default() -> Self {
        Self::new(0, "", 0.0)
    }
}

impl FixedRecord for Student {
    const ENCODED_LEN: usize = 4 + TEXT_CAPACITY + 4;
    const LAYOUT_VERSION: u16 = 1;
    const KIND: &'static str = "student";

    fn write_fields(&self, out: &mut BlockWriter) {
        out.put_i32(self.id);
        out.put_text(&self.name, TEXT_CAPACITY);
        out.put_f32(self.marks);
    }

    fn read_fields(input: &mut BlockReader<'_>) -> CodecResult<Self> {
        let id = input.get_i32()?;
        let name = input.get_text(TEXT_CAPACITY)?;
        let marks = input.get_f32()?;
        Ok(Self { id, name, marks })
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.id, self.name, self.marks)
    }
}
