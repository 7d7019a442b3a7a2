// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parsed event record: a framed wire string turned into a tagged record.

use crate::opcode::{EventClass, Opcode};
use pilot_core::{PilotError, Rank};
use std::fmt;

/// A parsed event, plus the verbatim text it was parsed from (retained for
/// deadlock traceback — distilled spec §4.1/§4.2).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    pub class: EventClass,
    pub subject: Rank,
    pub opcode: Opcode,
    /// Channel id (`Write`/`Read`/`HasData`) or bundle id
    /// (`Select`/`TrySelect`/`Broadcast`/`Gather`); `None` for `Finish`.
    pub object: Option<u32>,
    /// Exact text this record was parsed from.
    pub raw: String,
}

impl EventRecord {
    /// Build a record from its structured fields rather than parsing wire
    /// text, rendering `raw` immediately so `Display`/traceback text is
    /// always available. Used by `pilot-runtime`'s process handle, which
    /// knows the operation it's about to log without round-tripping
    /// through text first.
    pub fn call(class: EventClass, subject: Rank, opcode: Opcode, object: Option<u32>, sep: char) -> Self {
        let mut record = Self { class, subject, opcode, object, raw: String::new() };
        record.raw = record.format(sep);
        record
    }

    /// Parse one logical event line. `sep` is the field separator (default
    /// tab; see [`pilot_core::DEFAULT_SEPARATOR`]).
    pub fn parse(text: &str, sep: char) -> Result<Self, PilotError> {
        let raw = text.to_string();
        let mut fields = text.split(sep);

        let class_field = fields
            .next()
            .ok_or_else(|| PilotError::MalformedEvent(raw.clone()))?;
        let class_char = class_field
            .chars()
            .next()
            .ok_or_else(|| PilotError::MalformedEvent(raw.clone()))?;
        let class = EventClass::from_char(class_char)?;

        let rank_field = fields
            .next()
            .ok_or_else(|| PilotError::MalformedEvent(raw.clone()))?;
        let rank: u32 = rank_field
            .parse()
            .map_err(|_| PilotError::MalformedEvent(raw.clone()))?;

        let code_field = fields
            .next()
            .ok_or_else(|| PilotError::MalformedEvent(raw.clone()))?;
        let opcode = Opcode::from_mnemonic(code_field)?;

        let object = if opcode.has_object() {
            let object_field = fields
                .next()
                .ok_or_else(|| PilotError::MalformedEvent(raw.clone()))?;
            let object: u32 = object_field
                .parse()
                .map_err(|_| PilotError::MalformedEvent(raw.clone()))?;
            Some(object)
        } else {
            None
        };

        Ok(Self {
            class,
            subject: Rank(rank),
            opcode,
            object,
            raw,
        })
    }

    /// Re-render this record to its wire string (used by the in-process
    /// transport and by tests constructing events programmatically).
    pub fn format(&self, sep: char) -> String {
        match self.object {
            Some(obj) => format!(
                "{}{sep}{}{sep}{}{sep}{}",
                self.class.as_char(),
                self.subject,
                self.opcode,
                obj
            ),
            None => format!("{}{sep}{}{sep}{}", self.class.as_char(), self.subject, self.opcode),
        }
    }
}

impl fmt::Display for EventRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
