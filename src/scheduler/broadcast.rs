use crate::Context;
use crate::protocol::ServerMessage;
use crate::registry::ListFilter;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::unbounded_channel;

/// Fans a payload out to subscribed clients. The core decides when and
/// what; transport and delivery guarantees live behind this seam.
#[async_trait]
pub trait Broadcaster: Send + Sync {
    async fn publish(&self, topic: &str, payload: String) -> anyhow::Result<()>;
    /// Current subscriber count; lets ticks skip topics nobody watches.
    fn subscribers(&self, topic: &str) -> usize;
}

/// In-process broadcaster over unbounded channels, for tests and
/// single-process embedding. Closed subscribers are pruned on publish.
#[derive(Default)]
pub struct ChannelBroadcaster {
    topics: Mutex<HashMap<String, Vec<UnboundedSender<String>>>>,
}

impl ChannelBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn subscribe(&self, topic: &str) -> UnboundedReceiver<String> {
        let (tx, rx) = unbounded_channel();
        self.topics
            .lock()
            .expect("broadcaster lock")
            .entry(topic.to_string())
            .or_default()
            .push(tx);
        rx
    }
}

#[async_trait]
impl Broadcaster for ChannelBroadcaster {
    async fn publish(&self, topic: &str, payload: String) -> anyhow::Result<()> {
        let mut topics = self.topics.lock().expect("broadcaster lock");
        if let Some(subscribers) = topics.get_mut(topic) {
            subscribers.retain(|tx| tx.send(payload.clone()).is_ok());
        }
        Ok(())
    }
    fn subscribers(&self, topic: &str) -> usize {
        self.topics
            .lock()
            .expect("broadcaster lock")
            .get(topic)
            .map(|subscribers| subscribers.iter().filter(|tx| !tx.is_closed()).count())
            .unwrap_or(0)
    }
}

/// One game-list broadcast tick. Skipped, not retried, when nobody is
/// watching the lobby.
pub async fn broadcast_game_list(ctx: &Context) -> anyhow::Result<()> {
    if ctx.broadcaster.subscribers(crate::LOBBY) == 0 {
        log::debug!("[broadcast] no lobby subscribers, skipping");
        return Ok(());
    }
    let games = ctx.registry.list(&ListFilter::default()).await;
    log::debug!("[broadcast] pushing {} games to lobby", games.len());
    ctx.broadcaster
        .publish(crate::LOBBY, ServerMessage::game_list(games).to_json())
        .await
}
