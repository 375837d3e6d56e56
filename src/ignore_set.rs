//! Actors excluded from targeting casts.
use hashbrown::HashSet;

use crate::constants::IGNORE_SET_CAPACITY;
use crate::handle::ActorHandle;

/// Handles a character's sphere casts must never report.
///
/// Always holds the character itself, its owner when there is one, and
/// [`ActorHandle::NULL`]. Once an attack has been committed it also holds the
/// locked target. Only [`IgnoreSet::lock`] changes it after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreSet {
    handles: HashSet<ActorHandle>,
    locked: Option<ActorHandle>,
}

impl IgnoreSet {
    /// Builds the permanent part of the set.
    #[must_use]
    pub fn new(this: ActorHandle, owner: Option<ActorHandle>) -> Self {
        let mut handles = HashSet::with_capacity(IGNORE_SET_CAPACITY);
        handles.insert(this);
        handles.insert(ActorHandle::NULL);
        if let Some(owner) = owner {
            handles.insert(owner);
        }
        Self {
            handles,
            locked: None,
        }
    }

    /// Swaps the previously locked target for `target`.
    ///
    /// Permanent entries are never removed, and locking one of them records
    /// no lock.
    pub fn lock(&mut self, target: ActorHandle) {
        match self.locked.take() {
            Some(previous) if previous == target => {
                self.locked = Some(target);
                return;
            }
            Some(previous) => {
                self.handles.remove(&previous);
            }
            None => {}
        }
        if self.handles.insert(target) {
            self.locked = Some(target);
        }
        debug_assert!(self.handles.len() <= IGNORE_SET_CAPACITY);
    }

    /// Whether casts must skip `handle`.
    #[must_use]
    pub fn contains(&self, handle: ActorHandle) -> bool {
        self.handles.contains(&handle)
    }

    /// The target most recently locked through [`IgnoreSet::lock`].
    #[must_use]
    pub const fn locked(&self) -> Option<ActorHandle> {
        self.locked
    }

    /// Number of excluded handles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Always `false`: the null sentinel is a permanent member.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Iterates over the excluded handles in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = ActorHandle> + '_ {
        self.handles.iter().copied()
    }
}
