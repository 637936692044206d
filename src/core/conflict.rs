//! Duplicate-versus-conflict decision on identifier collisions
//!
//! The resolver is consulted only when a submitted transaction's identifier
//! is already present in the log. It compares content, not hashes: equal
//! line multisets mean the caller is retrying, anything else is a conflict.

use crate::types::{Transaction, TransactionLine};

/// Which parts of a transaction make up its identity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdentityPolicy {
    /// Compare lines only; metadata is documentation
    #[default]
    LinesOnly,

    /// Compare lines and metadata
    LinesAndMetadata,
}

/// Verdict for a colliding submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Same content as the stored transaction: idempotent retry
    Duplicate,

    /// Different content: reject, the stored transaction stays authoritative
    Conflict,
}

/// Decides whether a colliding submission is a retry or a conflict
#[derive(Debug, Clone, Copy, Default)]
pub struct ConflictResolver {
    policy: IdentityPolicy,
}

impl ConflictResolver {
    pub fn new(policy: IdentityPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> IdentityPolicy {
        self.policy
    }

    /// Compare an incoming submission against the stored transaction
    ///
    /// Line comparison is order-independent but multiplicity-sensitive, so
    /// `[(A,5),(A,5),(B,-10)]` and `[(A,5),(B,-10)]` are different.
    pub fn resolve(&self, stored: &Transaction, incoming: &Transaction) -> Resolution {
        let same_lines = same_line_multiset(&stored.lines, &incoming.lines);
        let same_data = match self.policy {
            IdentityPolicy::LinesOnly => true,
            IdentityPolicy::LinesAndMetadata => stored.data == incoming.data,
        };

        if same_lines && same_data {
            Resolution::Duplicate
        } else {
            Resolution::Conflict
        }
    }
}

fn same_line_multiset(a: &[TransactionLine], b: &[TransactionLine]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut a: Vec<&TransactionLine> = a.iter().collect();
    let mut b: Vec<&TransactionLine> = b.iter().collect();
    a.sort_unstable();
    b.sort_unstable();
    a == b
}
