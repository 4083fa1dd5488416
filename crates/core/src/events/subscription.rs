// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event pattern matching and subscriptions

use std::fmt;

/// Pattern for matching event names
///
/// Supports:
///   - Exact: "file:ready"
///   - Single wildcard: "upload:*" matches "upload:progress", "upload:failed"
///   - Trailing double wildcard: "stage:**" matches every stage event
///   - "*" or "**" alone match everything
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventPattern(String);

impl EventPattern {
    pub fn new(pattern: &str) -> Self {
        Self(pattern.to_string())
    }

    /// Check if this pattern matches an event name
    pub fn matches(&self, event_name: &str) -> bool {
        match self.0.as_str() {
            "" => false,
            "*" | "**" => true,
            pattern => {
                let pattern: Vec<&str> = pattern.split(':').collect();
                let event: Vec<&str> = event_name.split(':').collect();
                match_segments(&pattern, &event)
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn match_segments(pattern: &[&str], event: &[&str]) -> bool {
    match (pattern, event) {
        ([], []) => true,
        (["**", ..], _) => true,
        (["*", p_rest @ ..], [_, e_rest @ ..]) => match_segments(p_rest, e_rest),
        ([p, p_rest @ ..], [e, e_rest @ ..]) if p == e => match_segments(p_rest, e_rest),
        _ => false,
    }
}

/// Subscriber handle for unsubscribing
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(pub String);

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A subscription to specific event patterns
#[derive(Clone, Debug)]
pub struct Subscription {
    pub id: SubscriberId,
    pub patterns: Vec<EventPattern>,
    pub description: String,
}

impl Subscription {
    pub fn new(
        id: impl Into<String>,
        patterns: Vec<EventPattern>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: SubscriberId(id.into()),
            patterns,
            description: description.into(),
        }
    }

    /// Build a subscription from pattern strings
    pub fn with_patterns(id: impl Into<String>, patterns: &[&str]) -> Self {
        let patterns: Vec<EventPattern> = patterns.iter().map(|p| EventPattern::new(p)).collect();
        let description = patterns
            .iter()
            .map(EventPattern::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        Self::new(id, patterns, description)
    }

    /// Check if any pattern matches the event
    pub fn matches(&self, event_name: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(event_name))
    }
}

#[cfg(test)]
#[path = "subscription_tests.rs"]
mod tests;
