// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Capability probes for gating scenarios on optional features.

use std::collections::BTreeSet;

/// Answers whether an optional capability is available in this environment.
///
/// Implementations must be cheap and free of side effects; the driver may
/// query the same name many times.
pub trait CapabilityProbe: Send + Sync {
    fn is_supported(&self, capability: &str) -> bool;
}

impl<F> CapabilityProbe for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_supported(&self, capability: &str) -> bool {
        self(capability)
    }
}

/// Probe backed by a fixed set of supported capability names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StaticProbe {
    supported: BTreeSet<String>,
}

impl StaticProbe {
    /// Create a probe that supports exactly the given names
    pub fn new<I, S>(supported: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            supported: supported.into_iter().map(Into::into).collect(),
        }
    }

    /// Merge the capabilities of another static probe into this one
    pub fn extend(&mut self, other: &StaticProbe) {
        self.supported.extend(other.supported.iter().cloned());
    }

    /// Supported names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.supported.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.supported.is_empty()
    }
}

impl CapabilityProbe for StaticProbe {
    fn is_supported(&self, capability: &str) -> bool {
        self.supported.contains(capability)
    }
}

/// Probe reading a comma-separated capability list from an environment
/// variable.
///
/// The variable is read once at construction so later lookups never touch
/// process state.
#[derive(Clone, Debug, Default)]
pub struct EnvProbe {
    inner: StaticProbe,
}

impl EnvProbe {
    pub fn from_var(name: &str) -> Self {
        let raw = std::env::var(name).unwrap_or_default();
        Self::parse(&raw)
    }

    /// Parse a list such as `"G1, Parallel"`; blank entries are ignored.
    pub fn parse(list: &str) -> Self {
        let names = list
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty());
        Self {
            inner: StaticProbe::new(names),
        }
    }

    pub fn into_static(self) -> StaticProbe {
        self.inner
    }
}

impl CapabilityProbe for EnvProbe {
    fn is_supported(&self, capability: &str) -> bool {
        self.inner.is_supported(capability)
    }
}

#[cfg(test)]
#[path = "probe_tests.rs"]
mod tests;
