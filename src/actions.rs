use crate::Context;
use crate::GameError;
use crate::ID;
use crate::cards::CardSet;
use crate::cards::WhiteCard;
use crate::gameplay::CardsView;
use crate::gameplay::Game;
use crate::gameplay::GameEvent;
use crate::gameplay::GameOptions;
use crate::gameplay::Player;
use crate::protocol;
use crate::protocol::ServerMessage;
use crate::registry::GameSummary;
use crate::registry::ListFilter;
use crate::scheduler::broadcast_game_list;

/// Transport-agnostic client actions.
///
/// Every entry point takes the context by reference, holds exactly one
/// game lock at a time, and pushes resulting events through the broadcast
/// seam after the lock is released. A publish failure never fails the
/// action itself.

/// Creates a game from validated options and freshly loaded card stock,
/// then refreshes the lobby list.
pub async fn create_game(ctx: &Context, options: GameOptions) -> Result<ID<Game>, GameError> {
    options.validate(&ctx.config)?;
    let stock = ctx
        .catalog
        .load(&options.card_sets)
        .await
        .map_err(|e| GameError::InvalidOptions(e.to_string()))?;
    let id = ctx.registry.create(options, stock).await?;
    if let Err(e) = broadcast_game_list(ctx).await {
        log::warn!("[actions] lobby refresh after create failed: {}", e);
    }
    Ok(id)
}

/// The lobby view, filtered.
pub async fn list_games(ctx: &Context, filter: &ListFilter) -> Vec<GameSummary> {
    ctx.registry.list(filter).await
}

/// Available card sets for the creation screen.
pub async fn list_card_sets(ctx: &Context, include_inactive: bool) -> Result<Vec<CardSet>, GameError> {
    ctx.catalog
        .card_sets(include_inactive)
        .await
        .map_err(|e| GameError::IllegalState(e.to_string()))
}

pub async fn join_game(
    ctx: &Context,
    game: ID<Game>,
    name: &str,
    password: Option<&str>,
) -> Result<ID<Player>, GameError> {
    let handle = ctx.registry.get(game).await?;
    let (player, event) = handle.lock().await.join(name, password)?;
    publish(ctx, game, &[event]).await;
    Ok(player)
}

pub async fn spectate_game(
    ctx: &Context,
    game: ID<Game>,
    name: &str,
    password: Option<&str>,
) -> Result<ID<Player>, GameError> {
    let handle = ctx.registry.get(game).await?;
    let (player, event) = handle.lock().await.join_spectator(name, password)?;
    publish(ctx, game, &[event]).await;
    Ok(player)
}

/// Removes a player; the game itself is torn down once its roster empties.
pub async fn leave_game(ctx: &Context, game: ID<Game>, player: ID<Player>) -> Result<(), GameError> {
    let handle = ctx.registry.get(game).await?;
    let (events, empty) = {
        let mut guard = handle.lock().await;
        let events = guard.leave(player)?;
        (events, guard.is_empty())
    };
    publish(ctx, game, &events).await;
    if empty {
        let _ = ctx.registry.remove(game).await;
    }
    Ok(())
}

pub async fn start_game(ctx: &Context, game: ID<Game>, player: ID<Player>) -> Result<(), GameError> {
    let handle = ctx.registry.get(game).await?;
    let events = handle.lock().await.start(player)?;
    publish(ctx, game, &events).await;
    Ok(())
}

pub async fn submit_cards(
    ctx: &Context,
    game: ID<Game>,
    player: ID<Player>,
    cards: &[ID<WhiteCard>],
) -> Result<(), GameError> {
    let handle = ctx.registry.get(game).await?;
    let events = handle.lock().await.submit(player, cards)?;
    publish(ctx, game, &events).await;
    Ok(())
}

/// The judge picks a winner by reveal-order index. A game ended by the
/// pick is unregistered after its final events go out.
pub async fn judge_select(
    ctx: &Context,
    game: ID<Game>,
    player: ID<Player>,
    index: usize,
) -> Result<(), GameError> {
    let handle = ctx.registry.get(game).await?;
    let (events, over) = {
        let mut guard = handle.lock().await;
        let events = guard.judge_pick(player, index)?;
        (events, guard.is_over())
    };
    publish(ctx, game, &events).await;
    if over {
        let _ = ctx.registry.remove(game).await;
    }
    Ok(())
}

/// What the acting player may see right now. Also counts as activity.
pub async fn get_cards(
    ctx: &Context,
    game: ID<Game>,
    player: ID<Player>,
) -> Result<CardsView, GameError> {
    let handle = ctx.registry.get(game).await?;
    let mut guard = handle.lock().await;
    let view = guard.cards_for(player)?;
    guard.heartbeat(player)?;
    Ok(view)
}

/// Keep-alive for a connected client.
pub async fn heartbeat(ctx: &Context, game: ID<Game>, player: ID<Player>) -> Result<(), GameError> {
    let handle = ctx.registry.get(game).await?;
    handle.lock().await.heartbeat(player)
}

async fn publish(ctx: &Context, game: ID<Game>, events: &[GameEvent]) {
    let topic = protocol::game_topic(game);
    for event in events {
        log::debug!("[actions] game {}: {}", game, event);
        let payload = ServerMessage::encode(game, event).to_json();
        if let Err(e) = ctx.broadcaster.publish(&topic, payload).await {
            log::warn!("[actions] publish to {} failed: {}", topic, e);
        }
    }
}
