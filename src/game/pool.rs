//! Pooled Object Storage
//!
//! `Pool<T>` keeps objects in generation-stamped slots addressed by
//! [`Entity`] handles. Freed slots go on a free list and are reused first.
//! Removal during a pass over the pool goes through a despawn queue that is
//! flushed afterwards, so iteration never sees slots disappear underneath it.

use super::entity::Entity;

struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

pub struct Pool<T> {
    slots: Vec<Slot<T>>,
    /// Empty slot indices, popped from the back
    free: Vec<u32>,
    len: usize,
    /// Entities queued for removal at the next flush
    despawn_queue: Vec<Entity>,
}

impl<T> Pool<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
            despawn_queue: Vec::new(),
        }
    }

    /// Add an object, returning its handle
    pub fn spawn(&mut self, value: T) -> Entity {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = Some(value);
            return Entity::new(index, slot.generation);
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            value: Some(value),
        });
        Entity::new(index, 0)
    }

    fn slot(&self, entity: Entity) -> Option<&Slot<T>> {
        self.slots
            .get(entity.index() as usize)
            .filter(|slot| slot.generation == entity.generation())
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.slot(entity).is_some_and(|slot| slot.value.is_some())
    }

    #[cfg(test)]
    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.slot(entity)?.value.as_ref()
    }

    #[cfg(test)]
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        self.slots
            .get_mut(entity.index() as usize)
            .filter(|slot| slot.generation == entity.generation())?
            .value
            .as_mut()
    }

    /// Remove immediately. Returns None if the handle is stale.
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        let slot = self.slots.get_mut(entity.index() as usize)?;
        if slot.generation != entity.generation() {
            return None;
        }
        let value = slot.value.take()?;
        slot.generation += 1;
        self.free.push(entity.index());
        self.len -= 1;
        Some(value)
    }

    /// Queue for removal at the next [`Pool::flush_despawns`]
    pub fn despawn(&mut self, entity: Entity) {
        if self.is_alive(entity) && !self.is_pending_despawn(entity) {
            self.despawn_queue.push(entity);
        }
    }

    pub fn is_pending_despawn(&self, entity: Entity) -> bool {
        self.despawn_queue.contains(&entity)
    }

    /// Remove everything queued. Returns how many objects were removed.
    pub fn flush_despawns(&mut self) -> usize {
        let queue = std::mem::take(&mut self.despawn_queue);
        queue
            .into_iter()
            .filter(|&entity| self.remove(entity).is_some())
            .count()
    }

    /// Iterate over live objects with their handles
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            let value = slot.value.as_ref()?;
            Some((Entity::new(index as u32, slot.generation), value))
        })
    }

    /// Iterate mutably over live objects with their handles
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.slots.iter_mut().enumerate().filter_map(|(index, slot)| {
            let generation = slot.generation;
            let value = slot.value.as_mut()?;
            Some((Entity::new(index as u32, generation), value))
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drop every object and pending despawn. Old handles all go stale and
    /// slots are handed out again from index 0.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            if slot.value.take().is_some() {
                slot.generation += 1;
            }
        }
        self.free = (0..self.slots.len() as u32).rev().collect();
        self.len = 0;
        self.despawn_queue.clear();
    }
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}
