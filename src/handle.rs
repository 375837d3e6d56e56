//! Generation-counted actor handles and the arena that issues them.
//!
//! Characters only ever hold handles, never the actors themselves. A handle
//! whose slot has been freed resolves to `None`, so a despawned target can
//! not be dereferenced by accident.
use std::fmt;

use bevy::prelude::Entity;
use serde::Serialize;

/// Non-owning reference to a targetable actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ActorHandle {
    index: u32,
    generation: u32,
}

impl ActorHandle {
    /// Sentinel that no registry ever issues.
    ///
    /// Ignore sets carry it permanently so a scene that reports an
    /// unresolved hit can never surface it as a target.
    pub const NULL: Self = Self {
        index: u32::MAX,
        generation: u32::MAX,
    };

    /// Builds a handle from its raw parts.
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index of the handle.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Generation of the slot when the handle was issued.
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }

    /// Packs the handle into a single integer, index in the low half.
    #[must_use]
    pub fn to_bits(self) -> u64 {
        (u64::from(self.generation) << 32) | u64::from(self.index)
    }

    /// Inverse of [`ActorHandle::to_bits`].
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Each half of the packed value is exactly 32 bits wide."
    )]
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self {
            index: bits as u32,
            generation: (bits >> 32) as u32,
        }
    }

    /// Whether this is the [`ActorHandle::NULL`] sentinel.
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.index == u32::MAX && self.generation == u32::MAX
    }
}

impl From<Entity> for ActorHandle {
    fn from(entity: Entity) -> Self {
        Self::from_bits(entity.to_bits())
    }
}

impl fmt::Display for ActorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return f.write_str("actor(null)");
        }
        write!(f, "actor({}v{})", self.index, self.generation)
    }
}

#[derive(Debug, Clone)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Slot arena mapping [`ActorHandle`]s to actors.
///
/// Freed slots are reused with a bumped generation.
///
/// # Examples
///
/// ```
/// use brawler::ActorRegistry;
///
/// let mut registry = ActorRegistry::default();
/// let handle = registry.insert("grunt");
/// assert_eq!(registry.get(handle), Some(&"grunt"));
///
/// registry.remove(handle);
/// let reused = registry.insert("brute");
/// assert_eq!(registry.get(handle), None);
/// assert_eq!(registry.get(reused), Some(&"brute"));
/// ```
#[derive(Debug, Clone)]
pub struct ActorRegistry<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
}

impl<T> Default for ActorRegistry<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }
}

impl<T> ActorRegistry<T> {
    /// Stores `value` and returns the handle that now refers to it.
    ///
    /// # Panics
    ///
    /// Panics if the registry would need more than `u32::MAX - 1` slots.
    pub fn insert(&mut self, value: T) -> ActorHandle {
        if let Some(index) = self.free.pop() {
            if let Some(slot) = self.slots.get_mut(index as usize) {
                slot.value = Some(value);
                return ActorHandle::new(index, slot.generation);
            }
        }

        let index = u32::try_from(self.slots.len())
            .ok()
            .filter(|index| *index < u32::MAX)
            .unwrap_or_else(|| panic!("actor registry exhausted"));
        self.slots.push(Slot {
            generation: 0,
            value: Some(value),
        });
        ActorHandle::new(index, 0)
    }

    /// Frees the slot behind `handle`, returning its value if it was live.
    pub fn remove(&mut self, handle: ActorHandle) -> Option<T> {
        let slot = self.live_slot_mut(handle)?;
        let value = slot.value.take();
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        value
    }

    /// Resolves `handle`, or `None` when it is stale or unknown.
    #[must_use]
    pub fn get(&self, handle: ActorHandle) -> Option<&T> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.value.as_ref())
    }

    /// Mutable counterpart of [`ActorRegistry::get`].
    pub fn get_mut(&mut self, handle: ActorHandle) -> Option<&mut T> {
        self.live_slot_mut(handle)
            .and_then(|slot| slot.value.as_mut())
    }

    /// Whether `handle` still refers to a live actor.
    #[must_use]
    pub fn contains(&self, handle: ActorHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Number of live actors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Whether the registry holds no live actors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over live actors with their handles.
    pub fn iter(&self) -> impl Iterator<Item = (ActorHandle, &T)> {
        self.slots.iter().zip(0_u32..).filter_map(|(slot, index)| {
            slot.value
                .as_ref()
                .map(|value| (ActorHandle::new(index, slot.generation), value))
        })
    }

    fn live_slot_mut(&mut self, handle: ActorHandle) -> Option<&mut Slot<T>> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation && slot.value.is_some())
    }
}
