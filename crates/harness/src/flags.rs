// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Flag-report line parsing.
//!
//! A flag-report line has the shape
//!
//! ```text
//!      uint ParallelGCThreads                        := 4                 {product} {default}
//! ```
//!
//! i.e. a type tag, the flag name, `=` or `:=`, the value and one or more
//! `{origin}` groups, separated by arbitrary horizontal whitespace.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;
use thiserror::Error;

/// Errors extracting a flag value from captured text
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("No flag-report line found for flag '{flag}'")]
    PatternNotFound { flag: String },

    #[error("Flag '{flag}' has malformed integer value '{value}'")]
    MalformedNumber { flag: String, value: String },

    #[error("Flag '{flag}' value '{value}' does not fit in a 64-bit signed integer")]
    OutOfRange { flag: String, value: String },

    #[error("Flag '{flag}' has malformed boolean value '{value}'")]
    MalformedBool { flag: String, value: String },
}

/// Declared type used to interpret a flag's printed value
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagType {
    #[default]
    Int64,
    String,
    Bool,
}

impl FlagType {
    /// Infer the declared type from a report line's type tag.
    ///
    /// Integer tags of every width (`int`, `uint`, `intx`, `uintx`,
    /// `uint64_t`, `size_t`) map to [`FlagType::Int64`]; anything unknown is
    /// treated as a string.
    pub fn from_type_tag(tag: &str) -> Self {
        match tag {
            "bool" => FlagType::Bool,
            "int" | "uint" | "intx" | "uintx" | "uint64_t" | "size_t" => FlagType::Int64,
            _ => FlagType::String,
        }
    }
}

impl FromStr for FlagType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "int64" | "int" => Ok(FlagType::Int64),
            "string" | "str" => Ok(FlagType::String),
            "bool" => Ok(FlagType::Bool),
            other => Err(format!(
                "unknown flag type '{}' (expected int64, string or bool)",
                other
            )),
        }
    }
}

impl fmt::Display for FlagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagType::Int64 => write!(f, "int64"),
            FlagType::String => write!(f, "string"),
            FlagType::Bool => write!(f, "bool"),
        }
    }
}

/// A typed flag value
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl FlagValue {
    pub fn flag_type(&self) -> FlagType {
        match self {
            FlagValue::Bool(_) => FlagType::Bool,
            FlagValue::Int(_) => FlagType::Int64,
            FlagValue::Str(_) => FlagType::String,
        }
    }
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagValue::Bool(b) => write!(f, "{}", b),
            FlagValue::Int(i) => write!(f, "{}", i),
            FlagValue::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for FlagValue {
    fn from(value: i64) -> Self {
        FlagValue::Int(value)
    }
}

impl From<bool> for FlagValue {
    fn from(value: bool) -> Self {
        FlagValue::Bool(value)
    }
}

impl From<&str> for FlagValue {
    fn from(value: &str) -> Self {
        FlagValue::Str(value.to_string())
    }
}

/// One parsed flag-report line
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlagLine {
    pub type_tag: String,
    pub name: String,
    pub value: String,
    /// Contents of the first `{...}` group, e.g. `product`
    pub origin: String,
}

/// Name and declared type of a flag to extract
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FlagDescriptor {
    pub name: String,
    pub expected_type: FlagType,
}

impl FlagDescriptor {
    pub fn new(name: impl Into<String>, expected_type: FlagType) -> Self {
        Self {
            name: name.into(),
            expected_type,
        }
    }

    pub fn int64(name: impl Into<String>) -> Self {
        Self::new(name, FlagType::Int64)
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, FlagType::String)
    }

    pub fn bool(name: impl Into<String>) -> Self {
        Self::new(name, FlagType::Bool)
    }

    /// Extract and convert this flag's value from `text`
    pub fn extract(&self, text: &str) -> Result<FlagValue, ParseError> {
        let line = find_flag(&self.name, text).ok_or_else(|| ParseError::PatternNotFound {
            flag: self.name.clone(),
        })?;
        match self.expected_type {
            FlagType::Int64 => parse_int(&self.name, &line.value).map(FlagValue::Int),
            FlagType::Bool => parse_bool(&self.name, &line.value).map(FlagValue::Bool),
            FlagType::String => Ok(FlagValue::Str(line.value)),
        }
    }
}

fn flag_line_pattern(name: &str) -> Option<Regex> {
    let pattern = format!(
        r"(?m)^[ \t]*(?P<tag>[A-Za-z_][A-Za-z0-9_]*)[ \t]+(?P<name>{})[ \t]*:?=[ \t]*(?P<value>[^\n]*?)[ \t]*\{{(?P<origin>[^}}\n]*)\}}(?:[ \t]*\{{[^}}\n]*\}})*[ \t]*\r?$",
        regex::escape(name)
    );
    Regex::new(&pattern).ok()
}

/// Find the first flag-report line for `name` in `text`
pub fn find_flag(name: &str, text: &str) -> Option<FlagLine> {
    let caps = flag_line_pattern(name)?.captures(text)?;
    Some(FlagLine {
        type_tag: caps["tag"].to_string(),
        name: caps["name"].to_string(),
        value: caps["value"].to_string(),
        origin: caps["origin"].trim().to_string(),
    })
}

/// Integer value of flag `name` in `text`
pub fn flag_value(name: &str, text: &str) -> Result<i64, ParseError> {
    match FlagDescriptor::int64(name).extract(text)? {
        FlagValue::Int(value) => Ok(value),
        other => Err(ParseError::MalformedNumber {
            flag: name.to_string(),
            value: other.to_string(),
        }),
    }
}

fn parse_int(flag: &str, value: &str) -> Result<i64, ParseError> {
    value.parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => ParseError::OutOfRange {
            flag: flag.to_string(),
            value: value.to_string(),
        },
        _ => ParseError::MalformedNumber {
            flag: flag.to_string(),
            value: value.to_string(),
        },
    })
}

fn parse_bool(flag: &str, value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::MalformedBool {
            flag: flag.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
#[path = "flags_tests.rs"]
mod tests;
