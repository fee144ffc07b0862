use crate::engine::output::Output;
use crate::world::{Entity, Mob, Room, fight};

/// Player attacks the first live critter with this short description.
///
/// Returns true when the player did not survive.
pub fn handle_fight(out: &mut Output, room: &mut Room, name: &str) -> bool {
    let target = room.contents().iter().position(|e| match e {
        Entity::Critter(c) => c.is_alive() && e.short_description() == name,
        _ => false,
    });
    let (Some(target), Some(player)) = (target, room.player_index()) else {
        return false;
    };

    let Some((Entity::Explorer(explorer), Entity::Critter(critter))) = room.pair_mut(player, target)
    else {
        return false;
    };

    let outcome = fight(&mut *explorer, &mut *critter);
    tracing::debug!(?outcome, health = explorer.health(), "fight finished");

    if explorer.is_alive() {
        out.event("You won");
        false
    } else {
        out.event("Game over");
        true
    }
}
