use crate::Context;
use async_trait::async_trait;

/// External server-discovery registry. Told once at startup that this
/// instance is live, tagged with its process-unique id.
#[async_trait]
pub trait Announcer: Send + Sync {
    async fn alive(&self, server: &str) -> anyhow::Result<()>;
}

/// Discovery disabled or unconfigured: announcements go to the log only.
pub struct NullAnnouncer;

#[async_trait]
impl Announcer for NullAnnouncer {
    async fn alive(&self, server: &str) -> anyhow::Result<()> {
        log::debug!("[announce] discovery disabled, server {}", server);
        Ok(())
    }
}

/// The one-shot startup announcement. Failures are logged, never fatal.
pub async fn announce_alive(ctx: &Context) {
    match ctx.announcer.alive(&ctx.server_id).await {
        Ok(()) => log::info!("[announce] server {} announced", ctx.server_id),
        Err(e) => log::warn!("[announce] failed: {}", e),
    }
}
