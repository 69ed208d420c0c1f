//! # Enemy Turn
//!
//! Routes every enemy one step toward the player after each player move.
//!
//! Enemies are ranked by their distance to the player on a field that
//! ignores other enemies, then moved nearest-first. Each in-bounds enemy
//! follows a fresh field that treats the other enemies as obstacles; an
//! enemy with no route picks a random open neighbour instead. Enemies that
//! cannot act are retried in later rounds, up to a fixed round limit.

use crate::config::{MAX_ENEMY_ROUNDS, OFF_GRID_DISTANCE};
use crate::{
    shortest_paths_to, CharacterId, Characters, Coords, Direction, GridContext, GridEvent,
    HedgerowError, HedgerowResult, MoveOutcome, PathMap,
};
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

/// One enemy-turn pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyTurn {
    max_rounds: usize,
}

impl Default for EnemyTurn {
    fn default() -> Self {
        Self::new(MAX_ENEMY_ROUNDS)
    }
}

impl EnemyTurn {
    pub fn new(max_rounds: usize) -> Self {
        Self { max_rounds }
    }

    /// Moves every enemy it can and returns the longest delay produced,
    /// or zero when no enemy acted.
    ///
    /// Enemies still unresolved after the last round stay where they are.
    pub fn run(
        &self,
        characters: &mut Characters,
        ctx: &mut GridContext<'_>,
        player: Coords,
        rng: &mut StdRng,
    ) -> HedgerowResult<f32> {
        let ranking = shortest_paths_to(player, ctx.geometry, ctx.walls, &HashSet::new(), rng);
        let mut pending = rank_enemies(characters, ctx, &ranking);
        let mut max_delay = 0.0_f32;

        for round in 1..=self.max_rounds {
            if pending.is_empty() {
                break;
            }
            trace!("Enemy round {} with {} enemies", round, pending.len());

            let mut deferred = Vec::new();
            for id in pending {
                match self.advance_enemy(characters, ctx, id, player, rng)? {
                    Some(outcome) => {
                        max_delay = max_delay.max(outcome.delay);
                        if !outcome.did_move {
                            deferred.push(id);
                        }
                    }
                    None => deferred.push(id),
                }
            }
            pending = deferred;
        }

        if !pending.is_empty() {
            debug!(
                "{} enemies left unresolved after {} rounds",
                pending.len(),
                self.max_rounds
            );
        }
        Ok(max_delay)
    }

    /// Tries to move one enemy. None means the enemy must wait for a later
    /// round.
    fn advance_enemy(
        &self,
        characters: &mut Characters,
        ctx: &mut GridContext<'_>,
        id: CharacterId,
        player: Coords,
        rng: &mut StdRng,
    ) -> HedgerowResult<Option<MoveOutcome>> {
        let origin = characters
            .get(id)
            .map(|c| c.coords)
            .ok_or_else(|| HedgerowError::InvalidState(format!("Enemy {} vanished", id)))?;

        if !ctx.in_bounds(origin) {
            return self.enter_grid(characters, ctx, id, origin);
        }

        let obstacles: HashSet<Coords> = characters
            .iter()
            .filter(|c| c.is_enemy() && c.id != id)
            .map(|c| c.coords)
            .collect();
        let field = shortest_paths_to(player, ctx.geometry, ctx.walls, &obstacles, rng);

        let step = match field.next_step(origin) {
            Some(step) => step,
            None => match fallback_step(characters, ctx, origin, rng) {
                Some(step) => {
                    trace!("Enemy {} has no route, wandering to {}", id, step);
                    step
                }
                None => return Ok(None),
            },
        };

        let delta = step - origin;
        characters
            .move_character(ctx, id, delta.col, delta.row, false)
            .map(Some)
    }

    /// Walks an off-grid enemy onto the nearest cell, ignoring walls.
    fn enter_grid(
        &self,
        characters: &mut Characters,
        ctx: &mut GridContext<'_>,
        id: CharacterId,
        origin: Coords,
    ) -> HedgerowResult<Option<MoveOutcome>> {
        let entry = ctx.geometry.clamp(origin);
        if !matches!(characters.character_at(entry), Ok(None)) {
            trace!("Enemy {} waits for {} to clear", id, entry);
            return Ok(None);
        }

        let delta = entry - origin;
        let outcome = characters.move_character(ctx, id, delta.col, delta.row, true)?;
        if characters.get(id).map(|c| c.coords) == Some(entry) {
            characters.mark_entered(id);
            ctx.events.push(GridEvent::EnemyEntered {
                character: id,
                at: entry,
            });
        }
        Ok(Some(outcome))
    }
}

/// Orders enemies by distance to the player, nearest first.
///
/// Enemies outside the grid rank last; unreachable in-bounds enemies rank
/// just before them. Equal distances keep roster order.
pub fn rank_enemies(
    characters: &Characters,
    ctx: &GridContext<'_>,
    ranking: &PathMap,
) -> Vec<CharacterId> {
    let mut ranked: Vec<(CharacterId, u32)> = characters
        .iter()
        .filter(|c| c.is_enemy())
        .map(|c| {
            let distance = if ctx.in_bounds(c.coords) {
                ranking
                    .distance(c.coords)
                    .unwrap_or(OFF_GRID_DISTANCE - 1)
            } else {
                OFF_GRID_DISTANCE
            };
            (c.id, distance)
        })
        .collect();
    ranked.sort_by_key(|&(_, distance)| distance);
    ranked.into_iter().map(|(id, _)| id).collect()
}

/// A random in-bounds neighbour not behind a wall and free of enemies.
fn fallback_step(
    characters: &Characters,
    ctx: &GridContext<'_>,
    origin: Coords,
    rng: &mut StdRng,
) -> Option<Coords> {
    let open: Vec<Coords> = Direction::cardinal()
        .into_iter()
        .filter_map(|direction| {
            let (dx, dy) = direction.to_delta();
            let next = origin.translated(dx, dy);
            let open = ctx.in_bounds(next)
                && ctx.wall_between(origin, dx, dy).is_none()
                && !characters.enemy_at(next);
            open.then_some(next)
        })
        .collect();
    open.choose(rng).copied()
}
