//! # Characters Subsystem
//!
//! The roster of characters and single-move resolution.
//!
//! [`Characters::move_character`] is the atomic unit of movement shared by
//! the player and every enemy. A move can be blocked by a wall, bump into
//! another character (an attack when the two are hostile), or commit.

use crate::config::{BUMP_DELAY, STEP_DELAY};
use crate::{
    Character, CharacterId, Coords, Facing, GridContext, GridEvent, HedgerowError, HedgerowResult,
    Role,
};
use log::{error, trace};
use serde::{Deserialize, Serialize};

/// Result of resolving one move.
///
/// `delay` is how long the presentation needs before the next step of the
/// turn may run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub did_move: bool,
    pub delay: f32,
    pub dx: i32,
    pub dy: i32,
}

impl MoveOutcome {
    fn moved(delay: f32, dx: i32, dy: i32) -> Self {
        Self {
            did_move: true,
            delay,
            dx,
            dy,
        }
    }

    fn refused(delay: f32, dx: i32, dy: i32) -> Self {
        Self {
            did_move: false,
            delay,
            dx,
            dy,
        }
    }
}

/// Animation durations handed back through [`MoveOutcome::delay`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveTimings {
    /// Blocked move or attack
    pub bump: f32,
    /// Committed one-cell step
    pub step: f32,
}

impl Default for MoveTimings {
    fn default() -> Self {
        Self {
            bump: BUMP_DELAY,
            step: STEP_DELAY,
        }
    }
}

/// Owns every character and resolves their moves.
#[derive(Debug, Clone, Default)]
pub struct Characters {
    roster: Vec<Character>,
    timings: MoveTimings,
}

impl Characters {
    pub fn new(timings: MoveTimings) -> Self {
        Self {
            roster: Vec::new(),
            timings,
        }
    }

    pub fn timings(&self) -> MoveTimings {
        self.timings
    }

    pub fn set_timings(&mut self, timings: MoveTimings) {
        self.timings = timings;
    }

    /// Adds a character and returns its id.
    pub fn add_character(&mut self, character: Character) -> CharacterId {
        let id = character.id;
        self.roster.push(character);
        id
    }

    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.roster.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.roster.iter_mut().find(|c| c.id == id)
    }

    /// Iterates the roster in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.roster.iter()
    }

    pub fn len(&self) -> usize {
        self.roster.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }

    /// The first player character on the roster.
    pub fn player(&self) -> Option<&Character> {
        self.roster.iter().find(|c| c.is_player())
    }

    /// Ids of every enemy, in insertion order.
    pub fn enemy_ids(&self) -> Vec<CharacterId> {
        self.roster
            .iter()
            .filter(|c| c.is_enemy())
            .map(|c| c.id)
            .collect()
    }

    /// Whether an enemy stands on `coords`.
    pub fn enemy_at(&self, coords: Coords) -> bool {
        self.roster
            .iter()
            .any(|c| c.is_enemy() && c.coords == coords)
    }

    /// The character standing on `coords`, if any.
    ///
    /// Fails with [`HedgerowError::OccupancyConflict`] when more than one
    /// character claims the cell.
    pub fn character_at(&self, coords: Coords) -> HedgerowResult<Option<CharacterId>> {
        let mut occupants = self.roster.iter().filter(|c| c.coords == coords);
        let first = occupants.next().map(|c| c.id);
        let extra = occupants.count();
        if extra > 0 {
            return Err(HedgerowError::OccupancyConflict {
                at: coords,
                count: extra + 1,
            });
        }
        Ok(first)
    }

    fn character(&self, id: CharacterId) -> HedgerowResult<&Character> {
        self.get(id)
            .ok_or_else(|| HedgerowError::InvalidAction(format!("Unknown character {}", id)))
    }

    /// Resolves a move of `(dx, dy)` for character `id`.
    ///
    /// 1. A non-zero `dx` always updates facing, even if the move fails.
    /// 2. A wall between the cells (unless `ignore_walls`) refuses the move
    ///    with a bump delay.
    /// 3. A target off the grid reports a move with zero delay and leaves
    ///    the character where it is.
    /// 4. An occupied target produces a bump. Against a hostile occupant
    ///    this is an attack and counts as a move; against an ally it is
    ///    refused.
    /// 5. Otherwise the character steps onto the target.
    ///
    /// If the occupancy lookup itself fails, the failure is logged and the
    /// move is reported as a zero-delay success without changing anything.
    pub fn move_character(
        &mut self,
        ctx: &mut GridContext<'_>,
        id: CharacterId,
        dx: i32,
        dy: i32,
        ignore_walls: bool,
    ) -> HedgerowResult<MoveOutcome> {
        let origin = self.character(id)?.coords;

        if let Some(facing) = Facing::from_dx(dx) {
            if let Some(actor) = self.get_mut(id) {
                actor.facing = facing;
            }
            ctx.events.push(GridEvent::FacingChanged {
                character: id,
                facing,
            });
        }

        let target = origin.translated(dx, dy);

        if !ignore_walls && ctx.wall_between(origin, dx, dy).is_some() {
            trace!("{} bumped a wall moving from {} to {}", id, origin, target);
            return Ok(self.bump(ctx, id, dx, dy, false));
        }

        if !ctx.in_bounds(target) {
            return Ok(MoveOutcome::moved(0.0, dx, dy));
        }

        let occupant = match self.character_at(target) {
            Ok(occupant) => occupant,
            Err(e) => {
                error!("Occupancy lookup for {} moving to {} failed: {}", id, target, e);
                return Ok(MoveOutcome::moved(0.0, dx, dy));
            }
        };

        if let Some(occupant) = occupant.filter(|&other| other != id) {
            let mover = self.character(id)?;
            let other = self.character(occupant)?;
            let hostile = mover.is_hostile_to(other);
            if hostile {
                trace!("{:?} {} attacks {:?} {}", mover.role, id, other.role, occupant);
                ctx.events.push(GridEvent::Attacked {
                    attacker: id,
                    target: occupant,
                });
            }
            return Ok(self.bump(ctx, id, dx, dy, hostile));
        }

        if let Some(actor) = self.get_mut(id) {
            actor.coords = target;
        }
        ctx.events.push(GridEvent::Moved {
            character: id,
            from: origin,
            to: target,
            duration: self.timings.step,
        });
        trace!("{} moved from {} to {}", id, origin, target);
        Ok(MoveOutcome::moved(self.timings.step, dx, dy))
    }

    fn bump(
        &self,
        ctx: &mut GridContext<'_>,
        id: CharacterId,
        dx: i32,
        dy: i32,
        counts_as_move: bool,
    ) -> MoveOutcome {
        let delay = self.timings.bump;
        ctx.events.push(GridEvent::Bumped {
            character: id,
            dx,
            dy,
            duration: delay,
        });
        if counts_as_move {
            MoveOutcome::moved(delay, dx, dy)
        } else {
            MoveOutcome::refused(delay, dx, dy)
        }
    }

    /// Marks an enemy as having entered the grid.
    pub(crate) fn mark_entered(&mut self, id: CharacterId) {
        if let Some(character) = self.get_mut(id) {
            if character.role == Role::Enemy {
                character.entered = true;
            }
        }
    }
}
