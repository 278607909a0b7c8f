//! Shared types used across the framework analysis crates.
//!
//! This crate only models what framework analyzers need: stable ids into the
//! project database, a source-level view of Java types, and diagnostics.

mod ty;

use serde::{Deserialize, Serialize};

pub use ty::{ClassType, Parameter, PrimitiveType, Type};

macro_rules! raw_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(u32);

        impl $name {
            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            pub const fn from_raw(raw: u32) -> Self {
                Self(raw)
            }

            pub const fn to_raw(self) -> u32 {
                self.0
            }
        }
    };
}

raw_id!(
    /// A project (one classpath / source-root set) known to the database.
    ProjectId
);
raw_id!(
    /// A class declaration known to the database.
    ClassId
);
raw_id!(
    /// A non-Java resource (e.g. `.properties`) known to the database.
    FileId
);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: &'static str,
    pub message: String,
}

impl Diagnostic {
    pub fn error(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }
}
