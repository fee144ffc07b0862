//! Turn-based fights between anything that implements [`Mob`].

/// Anything which can fight.
pub trait Mob {
    /// Damage dealt by one blow.
    fn damage(&self) -> i32;

    fn health(&self) -> i32;

    fn is_alive(&self) -> bool {
        self.health() > 0
    }

    /// Reviving restores the maximum health; killing sets health to 0.
    fn set_alive(&mut self, alive: bool);

    /// Health never drops below zero.
    fn take_damage(&mut self, amount: i32);

    fn wants_to_fight(&self, other: &dyn Mob) -> bool;

    fn is_explorer(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FightOutcome {
    AttackerWon,
    TargetWon,
    /// Both were already down before the first blow.
    NoContest,
}

/// Fight until one side falls. The attacker strikes first and the target
/// only strikes back while it is still standing.
pub fn fight(attacker: &mut dyn Mob, target: &mut dyn Mob) -> FightOutcome {
    while attacker.is_alive() && target.is_alive() {
        // every blow lands for at least one point
        target.take_damage(attacker.damage().max(1));
        if target.is_alive() {
            attacker.take_damage(target.damage().max(1));
        }
    }

    match (attacker.is_alive(), target.is_alive()) {
        (true, _) => FightOutcome::AttackerWon,
        (false, true) => FightOutcome::TargetWon,
        (false, false) => FightOutcome::NoContest,
    }
}
