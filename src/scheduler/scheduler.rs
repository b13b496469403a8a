use super::*;
use crate::Context;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio::time::interval_at;

/// Owns the periodic housekeeping tasks.
///
/// Each task runs at a fixed rate after an initial warm-up and takes the
/// same locks as client-driven actions. A task failure is logged and the
/// next tick still fires; dropping the scheduler via
/// [`shutdown`](Scheduler::shutdown) aborts all loops.
pub struct Scheduler {
    tasks: Vec<JoinHandle<()>>,
}

impl Scheduler {
    /// Spawns the liveness sweep, the game-list broadcast, and (when
    /// discovery is enabled) the one-shot alive announcement.
    pub fn start(ctx: Arc<Context>) -> Self {
        let mut tasks = Vec::new();
        tasks.push(Self::every(
            ctx.clone(),
            crate::PING_START_DELAY,
            crate::PING_CHECK_DELAY,
            |ctx| async move {
                sweep(&ctx).await;
                Ok(())
            },
        ));
        tasks.push(Self::every(
            ctx.clone(),
            crate::BROADCAST_UPDATE_START_DELAY,
            crate::BROADCAST_UPDATE_DELAY,
            |ctx| async move { broadcast_game_list(&ctx).await },
        ));
        if ctx.config.discovery_enabled {
            tasks.push(tokio::spawn(async move {
                announce_alive(&ctx).await;
            }));
        }
        log::info!("[scheduler] started {} periodic tasks", tasks.len());
        Self { tasks }
    }
    pub fn shutdown(self) {
        for task in self.tasks {
            task.abort();
        }
        log::info!("[scheduler] stopped");
    }
    fn every<F, Fut>(ctx: Arc<Context>, delay: Duration, period: Duration, tick: F) -> JoinHandle<()>
    where
        F: Fn(Arc<Context>) -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send,
    {
        tokio::spawn(async move {
            let mut timer = interval_at(Instant::now() + delay, period);
            timer.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                timer.tick().await;
                if let Err(e) = tick(ctx.clone()).await {
                    log::warn!("[scheduler] tick failed: {}", e);
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;
    use crate::cards::StaticCatalog;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;

    /// Lets spawned task loops run between clock advances.
    async fn drain() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    fn context_with(
        config: Config,
        broadcaster: Arc<dyn Broadcaster>,
        announcer: Arc<dyn Announcer>,
    ) -> Arc<Context> {
        let (catalog, _) = StaticCatalog::single_set("base", Vec::new(), Vec::new());
        Context::new(config, Arc::new(catalog), broadcaster, announcer)
    }

    struct CountingAnnouncer(AtomicUsize);
    #[async_trait]
    impl Announcer for CountingAnnouncer {
        async fn alive(&self, _: &str) -> anyhow::Result<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct FailingBroadcaster(AtomicUsize);
    #[async_trait]
    impl Broadcaster for FailingBroadcaster {
        async fn publish(&self, _: &str, _: String) -> anyhow::Result<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Err(anyhow!("sink down"))
        }
        fn subscribers(&self, _: &str) -> usize {
            1
        }
    }

    #[tokio::test(start_paused = true)]
    async fn announcement_fires_once_when_discovery_enabled() {
        let announcer = Arc::new(CountingAnnouncer(AtomicUsize::new(0)));
        let config = Config {
            discovery_enabled: true,
            ..Default::default()
        };
        let ctx = context_with(config, Arc::new(ChannelBroadcaster::new()), announcer.clone());
        let scheduler = Scheduler::start(ctx);
        tokio::time::advance(Duration::from_secs(1)).await;
        drain().await;
        assert_eq!(announcer.0.load(Ordering::SeqCst), 1);
        tokio::time::advance(Duration::from_secs(300)).await;
        drain().await;
        assert_eq!(announcer.0.load(Ordering::SeqCst), 1);
        scheduler.shutdown();
    }
    #[tokio::test(start_paused = true)]
    async fn announcement_skipped_when_discovery_disabled() {
        let announcer = Arc::new(CountingAnnouncer(AtomicUsize::new(0)));
        let ctx = context_with(
            Config::default(),
            Arc::new(ChannelBroadcaster::new()),
            announcer.clone(),
        );
        let scheduler = Scheduler::start(ctx);
        tokio::time::advance(Duration::from_secs(120)).await;
        drain().await;
        assert_eq!(announcer.0.load(Ordering::SeqCst), 0);
        scheduler.shutdown();
    }
    #[tokio::test(start_paused = true)]
    async fn broadcast_failures_do_not_stop_the_loop() {
        let broadcaster = Arc::new(FailingBroadcaster(AtomicUsize::new(0)));
        let ctx = context_with(Config::default(), broadcaster.clone(), Arc::new(NullAnnouncer));
        let scheduler = Scheduler::start(ctx);
        drain().await;
        // first tick at 60s, then every 60s; failures logged, loop alive
        tokio::time::advance(crate::BROADCAST_UPDATE_START_DELAY).await;
        drain().await;
        tokio::time::advance(crate::BROADCAST_UPDATE_DELAY).await;
        drain().await;
        assert!(broadcaster.0.load(Ordering::SeqCst) >= 2);
        scheduler.shutdown();
    }
    #[tokio::test(start_paused = true)]
    async fn list_broadcast_reaches_lobby_subscribers() {
        let broadcaster = Arc::new(ChannelBroadcaster::new());
        let mut lobby = broadcaster.subscribe(crate::LOBBY);
        let ctx = context_with(Config::default(), broadcaster, Arc::new(NullAnnouncer));
        let scheduler = Scheduler::start(ctx);
        tokio::time::advance(crate::BROADCAST_UPDATE_START_DELAY).await;
        drain().await;
        let payload = lobby.recv().await.unwrap();
        let message: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(message["type"], "game_list");
        scheduler.shutdown();
    }
}
