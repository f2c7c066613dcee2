//! Entity store: the hecs world plus deferred structural removal.
//!
//! Removal never despawns mid-tick. `remove` flips the entity's `Active`
//! flag (so later systems and collision pairs skip it) and queues it;
//! `flush` despawns everything queued at end of tick.

use hecs::{DynamicBundle, Entity, World};

use wavestrike_core::components::*;
use wavestrike_core::enums::EntityKind;
use wavestrike_core::types::{Extents, Position};

/// Owns every live simulation object.
pub struct EntityStore {
    world: World,
    despawn_buffer: Vec<Entity>,
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            despawn_buffer: Vec::new(),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Spawn an entity from a component bundle.
    pub fn add(&mut self, bundle: impl DynamicBundle) -> Entity {
        self.world.spawn(bundle)
    }

    /// Deactivate an entity and queue it for despawn at end of tick.
    /// Returns false if it was already inactive or gone.
    pub fn remove(&mut self, entity: Entity) -> bool {
        let Ok(mut active) = self.world.get::<&mut Active>(entity) else {
            return false;
        };
        if !active.0 && self.despawn_buffer.contains(&entity) {
            return false;
        }
        active.0 = false;
        drop(active);
        self.despawn_buffer.push(entity);
        true
    }

    /// Set the active flag without queueing removal (player hide/show).
    pub fn set_active(&mut self, entity: Entity, value: bool) {
        if let Ok(mut active) = self.world.get::<&mut Active>(entity) {
            active.0 = value;
        }
    }

    pub fn is_active(&self, entity: Entity) -> bool {
        self.world
            .get::<&Active>(entity)
            .map(|a| a.0)
            .unwrap_or(false)
    }

    /// Kind of an entity, if it exists.
    pub fn kind_of(&self, entity: Entity) -> Option<EntityKind> {
        let e = self.world.entity(entity).ok()?;
        if e.has::<PlayerShip>() {
            Some(EntityKind::Player)
        } else if e.has::<Enemy>() {
            Some(EntityKind::Enemy)
        } else if e.has::<Projectile>() {
            Some(EntityKind::Projectile)
        } else if e.has::<Pickup>() {
            Some(EntityKind::Pickup)
        } else {
            None
        }
    }

    /// Active entities of a kind, in stable (ascending id) order.
    pub fn query(&self, kind: EntityKind) -> Vec<Entity> {
        let mut out = match kind {
            EntityKind::Player => self.active_with::<PlayerShip>(),
            EntityKind::Enemy => self.active_with::<Enemy>(),
            EntityKind::Projectile => self.active_with::<Projectile>(),
            EntityKind::Pickup => self.active_with::<Pickup>(),
        };
        out.sort_by_key(|e| e.id());
        out
    }

    /// Visit active entities of a kind with their position and bounds.
    pub fn for_each(&self, kind: EntityKind, mut f: impl FnMut(Entity, Position, Extents)) {
        for entity in self.query(kind) {
            let Ok(pos) = self.world.get::<&Position>(entity) else {
                continue;
            };
            let Ok(bounds) = self.world.get::<&Bounds>(entity) else {
                continue;
            };
            f(entity, *pos, bounds.extents);
        }
    }

    /// Number of active entities of a kind.
    pub fn count(&self, kind: EntityKind) -> usize {
        self.query(kind).len()
    }

    /// Remove every active entity of a kind. Returns how many were removed.
    pub fn clear_kind(&mut self, kind: EntityKind) -> usize {
        let mut removed = 0;
        for entity in self.query(kind) {
            if self.remove(entity) {
                removed += 1;
            }
        }
        removed
    }

    /// Despawn everything queued by `remove`. Returns the number despawned.
    pub fn flush(&mut self) -> usize {
        let mut despawned = 0;
        for entity in self.despawn_buffer.drain(..) {
            if self.world.despawn(entity).is_ok() {
                despawned += 1;
            }
        }
        despawned
    }

    /// Drop every entity immediately (run reset).
    pub fn clear(&mut self) {
        self.world.clear();
        self.despawn_buffer.clear();
    }

    fn active_with<T: hecs::Component>(&self) -> Vec<Entity> {
        self.world
            .query::<(&T, &Active)>()
            .iter()
            .filter(|(_, (_, active))| active.0)
            .map(|(entity, _)| entity)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wavestrike_core::enums::Owner;

    fn projectile(store: &mut EntityStore, y: f64) -> Entity {
        store.add((
            Projectile {
                owner: Owner::Player,
            },
            Position::new(10.0, y),
            Bounds {
                extents: Extents::new(3.0, 8.0),
            },
            Active(true),
        ))
    }

    #[test]
    fn test_remove_is_deferred_until_flush() {
        let mut store = EntityStore::new();
        let e = projectile(&mut store, 100.0);

        assert!(store.remove(e));
        assert!(!store.is_active(e), "Removed entity must be inactive at once");
        assert!(store.world().contains(e), "Despawn must wait for flush");
        assert_eq!(store.count(EntityKind::Projectile), 0);

        assert_eq!(store.flush(), 1);
        assert!(!store.world().contains(e));
    }

    #[test]
    fn test_double_remove_is_noop() {
        let mut store = EntityStore::new();
        let e = projectile(&mut store, 100.0);
        assert!(store.remove(e));
        assert!(!store.remove(e));
        assert_eq!(store.flush(), 1);
        assert!(!store.remove(e), "Removing a despawned entity is a no-op");
    }

    #[test]
    fn test_query_is_sorted_and_filtered_by_kind() {
        let mut store = EntityStore::new();
        let a = projectile(&mut store, 1.0);
        let b = projectile(&mut store, 2.0);
        let pickup = store.add((
            Pickup,
            Position::new(0.0, 0.0),
            Bounds {
                extents: Extents::new(12.0, 12.0),
            },
            Active(true),
        ));

        let projectiles = store.query(EntityKind::Projectile);
        assert_eq!(projectiles, vec![a, b]);
        assert_eq!(store.query(EntityKind::Pickup), vec![pickup]);
        assert_eq!(store.kind_of(pickup), Some(EntityKind::Pickup));
        assert!(store.query(EntityKind::Enemy).is_empty());
    }

    #[test]
    fn test_for_each_visits_positions() {
        let mut store = EntityStore::new();
        projectile(&mut store, 5.0);
        projectile(&mut store, 7.0);
        let mut ys = Vec::new();
        store.for_each(EntityKind::Projectile, |_, pos, _| ys.push(pos.y));
        assert_eq!(ys, vec![5.0, 7.0]);
    }

    #[test]
    fn test_clear_kind_leaves_other_kinds() {
        let mut store = EntityStore::new();
        projectile(&mut store, 1.0);
        projectile(&mut store, 2.0);
        let player = store.add((
            PlayerShip,
            Position::new(0.0, 0.0),
            Bounds {
                extents: Extents::new(16.0, 16.0),
            },
            Active(true),
        ));
        assert_eq!(store.clear_kind(EntityKind::Projectile), 2);
        store.flush();
        assert!(store.is_active(player));
        assert_eq!(store.world().len(), 1);
    }
}
