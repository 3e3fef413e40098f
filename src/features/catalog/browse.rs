//! Browse-side search helpers.
//!
//! Two guards sit in front of the search store query:
//! - a minimum-length gate: queries under two characters are never
//!   issued and mean "clear the results";
//! - a generation-token session: each issued query takes a ticket, and
//!   only the ticket from the latest generation may publish its
//!   results, so a slow response can never overwrite a newer one.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::shared::constants::MIN_SEARCH_QUERY_LEN;

/// True if the query is long enough to be issued at all
pub fn should_issue(query: &str) -> bool {
    query.trim().chars().count() >= MIN_SEARCH_QUERY_LEN
}

/// Ticket handed out for one issued query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

/// Latest-wins guard over a sequence of searches
#[derive(Debug, Default)]
pub struct SearchSession {
    generation: AtomicU64,
}

impl SearchSession {
    pub fn new() -> Self {
        Self {
            generation: AtomicU64::new(0),
        }
    }

    /// Take a ticket for a newly issued query, invalidating every
    /// earlier ticket.
    pub fn begin(&self) -> SearchTicket {
        SearchTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// True if `ticket` still belongs to the latest issued query
    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Publish results for `ticket`; stale tickets yield None and the
    /// caller drops the response.
    pub fn commit<T>(&self, ticket: SearchTicket, results: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(results)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_queries_are_not_issued() {
        assert!(!should_issue(""));
        assert!(!should_issue("a"));
        assert!(!should_issue(" a "));
        assert!(should_issue("ab"));
        assert!(should_issue("kompor"));
    }

    #[test]
    fn test_latest_ticket_commits() {
        let session = SearchSession::new();
        let ticket = session.begin();
        assert_eq!(session.commit(ticket, vec!["x"]), Some(vec!["x"]));
    }

    #[test]
    fn test_stale_ticket_is_dropped() {
        let session = SearchSession::new();
        let old = session.begin();
        let new = session.begin();
        // The slow first response arrives after the second query went out
        assert_eq!(session.commit(old, vec!["stale"]), None);
        assert_eq!(session.commit(new, vec!["fresh"]), Some(vec!["fresh"]));
    }

    #[test]
    fn test_commit_consumes_nothing_on_reuse() {
        // Committing twice with the same current ticket stays valid
        // until a newer query begins.
        let session = SearchSession::new();
        let ticket = session.begin();
        assert!(session.commit(ticket, 1).is_some());
        assert!(session.commit(ticket, 2).is_some());
        session.begin();
        assert!(session.commit(ticket, 3).is_none());
    }
}
