use crate::Context;
use crate::protocol;
use crate::protocol::ServerMessage;

/// One disconnected-player sweep across every live game.
///
/// Bounded work per tick: a game whose lock is contended is skipped and
/// retried next tick rather than waited on, so a long-running client
/// action never stalls the sweep. One game's trouble never spills into
/// the rest of the pass.
pub async fn sweep(ctx: &Context) {
    for (id, game) in ctx.registry.games().await {
        let mut guard = match game.try_lock() {
            Ok(guard) => guard,
            Err(_) => {
                log::debug!("[sweep] game {} busy, skipping this tick", id);
                continue;
            }
        };
        let events = match guard.sweep(ctx.config.liveness_timeout) {
            Ok(events) => events,
            Err(e) => {
                log::warn!("[sweep] game {} sweep failed: {}", id, e);
                continue;
            }
        };
        let empty = guard.is_empty();
        let idle = guard.idle_for() > ctx.config.idle_timeout;
        let over = guard.is_over();
        drop(guard);
        for event in &events {
            let payload = ServerMessage::encode(id, event).to_json();
            if let Err(e) = ctx.broadcaster.publish(&protocol::game_topic(id), payload).await {
                log::warn!("[sweep] publish for game {} failed: {}", id, e);
            }
        }
        if empty || idle || over {
            log::info!(
                "[sweep] tearing down game {} (empty: {}, idle: {}, over: {})",
                id,
                empty,
                idle,
                over
            );
            let _ = ctx.registry.remove(id).await;
        }
    }
}
