/// Session state definitions for the request lifecycle
///
/// This module defines the states a session moves through while a crawl
/// request is composed, sent and resolved.
use crate::client::CrawlResult;
use crate::request::CrawlRequest;
use std::fmt;

/// Where a failed attempt went wrong
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The crawl call itself failed (unreachable, timeout, bad envelope)
    External,

    /// The service answered but reported `success = false`
    Crawl,
}

/// User-visible description of a failed attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}

impl Failure {
    pub fn external(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::External,
            message: message.into(),
        }
    }

    pub fn crawl(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Crawl,
            message: message.into(),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Current attempt state of a session
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Nothing submitted yet
    Idle,

    /// A request has been sent and not yet resolved
    InFlight { request: CrawlRequest },

    /// The last attempt (or a selected history entry) succeeded
    Succeeded(CrawlResult),

    /// The last attempt failed
    Failed(Failure),
}

impl SessionState {
    /// Returns true while a crawl call is outstanding
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::InFlight { .. })
    }

    pub fn result(&self) -> Option<&CrawlResult> {
        match self {
            Self::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::InFlight { .. } => "in_flight",
            Self::Succeeded(_) => "succeeded",
            Self::Failed(_) => "failed",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
