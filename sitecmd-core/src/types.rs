//! Core types and data structures for sitecmd

use serde::{Deserialize, Serialize};
use std::fmt;

/// ID of the main site of a multi-tenant installation
pub const MAIN_TENANT: TenantId = TenantId(1);

/// Default value of the `--blogs` option
pub const DEFAULT_TENANTS: &str = "1";

/// Identifier of one tenant (site) of the host application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(i64);

impl TenantId {
    /// Wrap a raw tenant ID
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw integer value
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Zero is never a valid tenant
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl From<i64> for TenantId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Filter applied when enumerating every tenant of the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantFilter {
    /// Leave out archived tenants
    pub exclude_archived: bool,
    /// Leave out deleted tenants
    pub exclude_deleted: bool,
}

impl TenantFilter {
    /// Only tenants that are neither archived nor deleted
    pub const fn active() -> Self {
        Self {
            exclude_archived: true,
            exclude_deleted: true,
        }
    }

    /// Every tenant the host knows about
    pub const fn all() -> Self {
        Self {
            exclude_archived: false,
            exclude_deleted: false,
        }
    }
}

impl Default for TenantFilter {
    fn default() -> Self {
        Self::active()
    }
}

/// Process-level result of one command invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExitStatus {
    Success,
    Failure,
}

impl ExitStatus {
    /// Numeric process exit code
    pub const fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
        }
    }

    pub const fn is_success(self) -> bool {
        matches!(self, ExitStatus::Success)
    }
}

impl From<ExitStatus> for std::process::ExitCode {
    fn from(status: ExitStatus) -> Self {
        std::process::ExitCode::from(status.code())
    }
}

/// Outcome of running a handler against one tenant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "message", rename_all = "lowercase")]
pub enum ExecutionOutcome {
    Success,
    Failure(String),
}

impl ExecutionOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, ExecutionOutcome::Failure(_))
    }
}
