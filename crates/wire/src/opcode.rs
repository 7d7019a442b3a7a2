// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event classes and opcodes recognized by the wire format.

use pilot_core::PilotError;
use std::fmt;

/// First field of a framed event string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventClass {
    /// A user-process call into a Pilot operation (`Write`, `Read`, ...).
    Call,
    /// A Pilot-internal lifecycle event (currently only process exit).
    Pilot,
}

impl EventClass {
    pub fn from_char(c: char) -> Result<Self, PilotError> {
        match c {
            'C' => Ok(Self::Call),
            'P' => Ok(Self::Pilot),
            other => Err(PilotError::MalformedEvent(format!(
                "unknown event class '{other}'"
            ))),
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Call => 'C',
            Self::Pilot => 'P',
        }
    }
}

/// The three-character opcode mnemonic, second field of a framed event.
///
/// Order matches the switch cases in the reference detector's `handle()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Write,
    Read,
    Select,
    HasData,
    TrySelect,
    Broadcast,
    Gather,
    Finish,
}

impl Opcode {
    pub fn mnemonic(self) -> &'static str {
        match self {
            Self::Write => "Wri",
            Self::Read => "Rea",
            Self::Select => "Sel",
            Self::HasData => "Has",
            Self::TrySelect => "Try",
            Self::Broadcast => "Bro",
            Self::Gather => "Gat",
            Self::Finish => "FIN",
        }
    }

    pub fn from_mnemonic(s: &str) -> Result<Self, PilotError> {
        match s {
            "Wri" => Ok(Self::Write),
            "Rea" => Ok(Self::Read),
            "Sel" => Ok(Self::Select),
            "Has" => Ok(Self::HasData),
            "Try" => Ok(Self::TrySelect),
            "Bro" => Ok(Self::Broadcast),
            "Gat" => Ok(Self::Gather),
            "FIN" => Ok(Self::Finish),
            other => Err(PilotError::UnknownOpcode(other.to_string())),
        }
    }

    /// True for opcodes that carry an object id (channel or bundle).
    pub fn has_object(self) -> bool {
        !matches!(self, Self::Finish)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

#[cfg(test)]
#[path = "opcode_tests.rs"]
mod tests;
