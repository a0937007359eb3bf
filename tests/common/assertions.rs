//! Custom assertions over journal and scope outputs

use std::collections::HashSet;

use flint_branch::branch::{JournalCode, JournalEntry};
use flint_branch::storage::ScopeRow;

/// Assert that no identity appears twice among the scopes
pub fn assert_unique_identities(scopes: &[ScopeRow]) {
    let mut seen = HashSet::new();
    for scope in scopes {
        assert!(
            seen.insert(scope.identity),
            "identity {} appears more than once",
            scope.identity
        );
    }
}

/// Count journal entries carrying `code`
pub fn count_code(journal: &[JournalEntry], code: JournalCode) -> usize {
    journal.iter().filter(|e| e.code == code).count()
}

/// Assert that a single template resolution wrote its journal in phase order:
/// commits (codes 3 and 2) first, then retired descendants (1), then the
/// retired template (0) last
pub fn assert_journal_phases(journal: &[JournalEntry]) {
    let phase = |code: JournalCode| match code {
        JournalCode::ClonedDescendant | JournalCode::InstanceRoot => 0,
        JournalCode::RetiredDescendant => 1,
        JournalCode::RetiredTemplate => 2,
    };
    for pair in journal.windows(2) {
        assert!(
            phase(pair[0].code) <= phase(pair[1].code),
            "journal out of phase order: {:?} before {:?}",
            pair[0],
            pair[1]
        );
    }
    assert_eq!(
        journal.last().map(|e| e.code),
        Some(JournalCode::RetiredTemplate),
        "journal should end with the retired template"
    );
}
