//! Things that can sit in a room or be carried, and their one-line encoding.
//!
//! | kind     | line        |
//! |----------|-------------|
//! | explorer | `E;H;S;L`   |
//! | treasure | `$;V;S`     |
//! | critter  | `C;V;H;S;L` |
//!
//! `V` is written with five decimals. Empty trailing fields are kept.

use crate::world::combat::Mob;
use crate::world::model::sanitize;

/// Starting (and revived) health of an explorer.
pub const EXPLORER_MAX_HEALTH: i32 = 10;

/// Something a player can pick up.
pub trait Lootable {
    fn value(&self) -> f64;

    /// Whether `looter` is allowed to take this.
    fn can_loot(&self, looter: &Entity) -> bool;
}

#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Treasure(Treasure),
    Critter(Critter),
    Explorer(Explorer),
}

impl Entity {
    pub fn short_description(&self) -> &str {
        match self {
            Entity::Treasure(t) => &t.short_desc,
            Entity::Critter(c) => &c.short_desc,
            Entity::Explorer(e) => &e.short_desc,
        }
    }

    pub fn long_description(&self) -> &str {
        match self {
            Entity::Treasure(t) => &t.short_desc,
            Entity::Critter(c) => &c.long_desc,
            Entity::Explorer(e) => &e.long_desc,
        }
    }

    /// What `examine` shows: the long description plus any status suffix.
    pub fn description(&self) -> String {
        match self {
            Entity::Treasure(t) => t.short_desc.clone(),
            Entity::Critter(c) => {
                if c.is_alive() {
                    c.long_desc.clone()
                } else {
                    format!("{}(fainted)", c.long_desc)
                }
            }
            Entity::Explorer(e) => {
                if e.is_alive() {
                    format!("{} with {} health", e.long_desc, e.health)
                } else {
                    format!("{}(fainted)", e.long_desc)
                }
            }
        }
    }

    pub fn encode(&self) -> String {
        match self {
            Entity::Explorer(e) => format!("E;{};{};{}", e.health, e.short_desc, e.long_desc),
            Entity::Treasure(t) => format!("$;{:.5};{}", t.value, t.short_desc),
            Entity::Critter(c) => format!(
                "C;{:.5};{};{};{}",
                c.value, c.health, c.short_desc, c.long_desc
            ),
        }
    }

    /// Rebuild an entity from its [`encode`](Self::encode) form.
    ///
    /// Returns `None` for an unknown tag, the wrong number of fields or a
    /// numeric field that does not parse. Values may be padded with
    /// whitespace; health must not be.
    pub fn decode(encoded: &str) -> Option<Entity> {
        let fields: Vec<&str> = encoded.split(';').collect();
        match fields.as_slice() {
            ["E", health, short, long] => Some(Entity::Explorer(Explorer::with_health(
                short,
                long,
                health.parse().ok()?,
            ))),
            ["$", value, short] => Some(Entity::Treasure(Treasure::new(short, parse_value(value)?))),
            ["C", value, health, short, long] => Some(Entity::Critter(Critter::new(
                short,
                long,
                parse_value(value)?,
                health.parse().ok()?,
            ))),
            _ => None,
        }
    }

    pub fn as_mob(&self) -> Option<&dyn Mob> {
        match self {
            Entity::Critter(c) => Some(c),
            Entity::Explorer(e) => Some(e),
            Entity::Treasure(_) => None,
        }
    }

    pub fn as_mob_mut(&mut self) -> Option<&mut dyn Mob> {
        match self {
            Entity::Critter(c) => Some(c),
            Entity::Explorer(e) => Some(e),
            Entity::Treasure(_) => None,
        }
    }

    pub fn as_lootable(&self) -> Option<&dyn Lootable> {
        match self {
            Entity::Treasure(t) => Some(t),
            Entity::Critter(c) => Some(c),
            Entity::Explorer(_) => None,
        }
    }
}

fn parse_value(field: &str) -> Option<f64> {
    field.trim().parse().ok()
}

/// Lootable thing that doesn't fight.
#[derive(Debug, Clone, PartialEq)]
pub struct Treasure {
    short_desc: String,
    value: f64,
}

impl Treasure {
    /// The short description doubles as the long one.
    pub fn new(short_desc: &str, value: f64) -> Self {
        Treasure {
            short_desc: sanitize(short_desc),
            value,
        }
    }
}

impl Lootable for Treasure {
    fn value(&self) -> f64 {
        self.value
    }

    fn can_loot(&self, looter: &Entity) -> bool {
        matches!(looter, Entity::Explorer(_))
    }
}

/// A non-player mob; lootable once it has fainted.
#[derive(Debug, Clone, PartialEq)]
pub struct Critter {
    short_desc: String,
    long_desc: String,
    value: f64,
    health: i32,
    max_health: i32,
}

impl Critter {
    /// Non-positive `health` becomes 0, and so does the maximum.
    pub fn new(short_desc: &str, long_desc: &str, value: f64, health: i32) -> Self {
        let health = health.max(0);
        Critter {
            short_desc: sanitize(short_desc),
            long_desc: sanitize(long_desc),
            value,
            health,
            max_health: health,
        }
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }
}

impl Lootable for Critter {
    fn value(&self) -> f64 {
        self.value
    }

    fn can_loot(&self, looter: &Entity) -> bool {
        matches!(looter, Entity::Explorer(_)) && self.health == 0
    }
}

impl Mob for Critter {
    fn damage(&self) -> i32 {
        2
    }

    fn health(&self) -> i32 {
        self.health
    }

    fn take_damage(&mut self, amount: i32) {
        self.health = (self.health - amount).max(0);
    }

    fn set_alive(&mut self, alive: bool) {
        self.health = if alive { self.max_health } else { 0 };
    }

    fn wants_to_fight(&self, other: &dyn Mob) -> bool {
        other.is_explorer()
    }
}

/// The player character.
#[derive(Debug, Clone, PartialEq)]
pub struct Explorer {
    short_desc: String,
    long_desc: String,
    health: i32,
    inventory: Vec<Entity>,
}

impl Explorer {
    pub fn new(short_desc: &str, long_desc: &str) -> Self {
        Self::with_health(short_desc, long_desc, EXPLORER_MAX_HEALTH)
    }

    pub fn with_health(short_desc: &str, long_desc: &str, health: i32) -> Self {
        Explorer {
            short_desc: sanitize(short_desc),
            long_desc: sanitize(long_desc),
            health: health.max(0),
            inventory: Vec::new(),
        }
    }

    pub fn contents(&self) -> &[Entity] {
        &self.inventory
    }

    pub fn add(&mut self, thing: Entity) {
        self.inventory.push(thing);
    }

    pub fn drop(&mut self, index: usize) -> Option<Entity> {
        (index < self.inventory.len()).then(|| self.inventory.remove(index))
    }

    /// Remove the first carried thing with this short description.
    pub fn drop_named(&mut self, short_desc: &str) -> Option<Entity> {
        let idx = self
            .inventory
            .iter()
            .position(|t| t.short_description() == short_desc)?;
        Some(self.inventory.remove(idx))
    }

    /// Total value of everything carried.
    pub fn inventory_value(&self) -> f64 {
        self.inventory
            .iter()
            .filter_map(Entity::as_lootable)
            .map(|l| l.value())
            .sum()
    }
}

impl Mob for Explorer {
    fn damage(&self) -> i32 {
        1
    }

    fn health(&self) -> i32 {
        self.health
    }

    fn take_damage(&mut self, amount: i32) {
        self.health = (self.health - amount).max(0);
    }

    fn set_alive(&mut self, alive: bool) {
        self.health = if alive { EXPLORER_MAX_HEALTH } else { 0 };
    }

    fn wants_to_fight(&self, _other: &dyn Mob) -> bool {
        false
    }

    fn is_explorer(&self) -> bool {
        true
    }
}
