use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

/// Read-side access to the active scope chain.
///
/// The formatter only ever traverses; it never pushes or releases. Keeping
/// this a separate trait lets the formatter accept any chain implementation
/// without caring how entries got there.
pub trait ScopeAccess: Send + Sync {
    /// Invoke `visitor` once per active scope, outermost first, innermost
    /// last. The visitor must not push onto or release from the same chain.
    fn for_each_scope(&self, visitor: &mut dyn FnMut(&dyn fmt::Display));
}

struct ScopeEntry {
    id: u64,
    value: Box<dyn fmt::Display + Send + Sync>,
}

/// Ordered stack of contextual scope values for one logical call chain.
///
/// Entries are opaque; the chain only renders them through `Display` at
/// traversal time. Each chain has its own storage and lock, so independent
/// call chains never contaminate each other.
pub struct ScopeChain {
    entries: Arc<Mutex<Vec<ScopeEntry>>>,
    next_id: AtomicU64,
}

impl ScopeChain {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            next_id: AtomicU64::new(0),
        }
    }

    /// Append `value` as the innermost scope.
    ///
    /// **Parameters**
    /// - `value`: opaque scope label, rendered through `Display` whenever a
    ///   record is formatted while the scope is active.
    ///
    /// **Returns**
    /// - A [`ScopeGuard`] that removes exactly this entry when dropped.
    ///   Well-nested (stack-disciplined) release is the supported contract;
    ///   dropping guards out of order still removes the right entry but the
    ///   resulting interleaving is unspecified.
    ///
    /// Pushing always succeeds.
    pub fn push(&self, value: impl fmt::Display + Send + Sync + 'static) -> ScopeGuard {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.push(ScopeEntry {
            id,
            value: Box::new(value),
        });
        drop(entries);
        ScopeGuard {
            entries: Arc::downgrade(&self.entries),
            id,
        }
    }

    /// Number of currently active scopes.
    pub fn depth(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Default for ScopeChain {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeAccess for ScopeChain {
    fn for_each_scope(&self, visitor: &mut dyn FnMut(&dyn fmt::Display)) {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        for entry in entries.iter() {
            visitor(&entry.value);
        }
    }
}

/// Removes its scope entry from the owning chain when dropped.
///
/// Holds only a weak reference: a guard outliving its chain is a no-op on
/// drop, never a dangling access.
#[must_use = "the scope stays active until the guard is dropped"]
pub struct ScopeGuard {
    entries: Weak<Mutex<Vec<ScopeEntry>>>,
    id: u64,
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        if let Some(entries) = self.entries.upgrade() {
            let mut entries = entries.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(position) = entries.iter().rposition(|entry| entry.id == self.id) {
                entries.remove(position);
            }
        }
    }
}
