//! Cleanup system: despawns everything removed during the tick.

use crate::context::SimContext;

/// Flush the store's deferred removals. Returns the number despawned.
pub fn run(ctx: &mut SimContext) -> usize {
    let despawned = ctx.store.flush();
    if despawned > 0 {
        tracing::trace!(despawned, tick = ctx.time.tick, "Cleanup");
    }
    despawned
}
