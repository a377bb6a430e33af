//! Single-Flight Queue
//!
//! At most one request per scope is in flight. Requests arriving meanwhile
//! wait in arrival order. Position updates shift their neighbours, so they do
//! not commute: a request only replaces the last waiting one when both move
//! the same item, and otherwise queues behind it.

use std::collections::{HashMap, VecDeque};

#[derive(Debug)]
struct ScopeQueue<R> {
    waiting: VecDeque<(String, R)>,
}

#[derive(Debug)]
pub struct SingleFlight<R> {
    scopes: HashMap<String, ScopeQueue<R>>,
}

impl<R> Default for SingleFlight<R> {
    fn default() -> Self {
        Self {
            scopes: HashMap::new(),
        }
    }
}

impl<R> SingleFlight<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the request back when the scope is idle and the caller should
    /// send it now; otherwise it is parked and `None` is returned.
    pub fn submit(&mut self, scope_key: &str, item_id: &str, request: R) -> Option<R> {
        let Some(queue) = self.scopes.get_mut(scope_key) else {
            self.scopes.insert(
                scope_key.to_string(),
                ScopeQueue {
                    waiting: VecDeque::new(),
                },
            );
            return Some(request);
        };
        match queue.waiting.back_mut() {
            Some(last) if last.0 == item_id => {
                tracing::debug!(scope = scope_key, item = item_id, "coalesced queued position update");
                last.1 = request;
            }
            _ => queue.waiting.push_back((item_id.to_string(), request)),
        }
        None
    }

    /// The in-flight request of `scope_key` finished. Returns the next one to
    /// send, or `None` once the scope is idle again.
    pub fn complete(&mut self, scope_key: &str) -> Option<R> {
        let queue = self.scopes.get_mut(scope_key)?;
        match queue.waiting.pop_front() {
            Some((_, next)) => Some(next),
            None => {
                self.scopes.remove(scope_key);
                None
            }
        }
    }

    pub fn is_busy(&self, scope_key: &str) -> bool {
        self.scopes.contains_key(scope_key)
    }

    pub fn waiting(&self, scope_key: &str) -> usize {
        self.scopes.get(scope_key).map_or(0, |q| q.waiting.len())
    }
}
