//! Game reference tables.
//!
//! Character classes and races as the armory numbers them in its XML
//! (`classId` / `raceId` attributes).

use std::fmt;

use serde::{Deserialize, Serialize};

/// A playable character class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterClass {
    Warrior,
    Paladin,
    Hunter,
    Rogue,
    Priest,
    DeathKnight,
    Shaman,
    Mage,
    Warlock,
    Druid,
}

impl CharacterClass {
    /// All classes, sorted alphabetically by name.
    pub const ALL: [CharacterClass; 10] = [
        Self::DeathKnight,
        Self::Druid,
        Self::Hunter,
        Self::Mage,
        Self::Paladin,
        Self::Priest,
        Self::Rogue,
        Self::Shaman,
        Self::Warlock,
        Self::Warrior,
    ];

    /// Looks up a class by its armory id.
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|class| class.id() == id)
    }

    /// Returns the armory id.
    pub fn id(self) -> u8 {
        match self {
            Self::Warrior => 1,
            Self::Paladin => 2,
            Self::Hunter => 3,
            Self::Rogue => 4,
            Self::Priest => 5,
            Self::DeathKnight => 6,
            Self::Shaman => 7,
            Self::Mage => 8,
            Self::Warlock => 9,
            Self::Druid => 11,
        }
    }

    /// Returns the display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Warrior => "Warrior",
            Self::Paladin => "Paladin",
            Self::Hunter => "Hunter",
            Self::Rogue => "Rogue",
            Self::Priest => "Priest",
            Self::DeathKnight => "Death Knight",
            Self::Shaman => "Shaman",
            Self::Mage => "Mage",
            Self::Warlock => "Warlock",
            Self::Druid => "Druid",
        }
    }

    /// Returns the class color as six hex digits, without `#`.
    pub fn color(self) -> &'static str {
        match self {
            Self::Warrior => "C79C6E",
            Self::Paladin => "F58CBA",
            Self::Hunter => "ABD473",
            Self::Rogue => "FFF569",
            Self::Priest => "FFFFFF",
            Self::DeathKnight => "C41F3B",
            Self::Shaman => "2459FF",
            Self::Mage => "69CCF0",
            Self::Warlock => "9482C9",
            Self::Druid => "FF7D0A",
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A playable race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Race {
    Human,
    Orc,
    Dwarf,
    NightElf,
    Undead,
    Tauren,
    Gnome,
    Troll,
    BloodElf,
    Draenei,
}

impl Race {
    pub const ALL: [Race; 10] = [
        Self::Human,
        Self::Orc,
        Self::Dwarf,
        Self::NightElf,
        Self::Undead,
        Self::Tauren,
        Self::Gnome,
        Self::Troll,
        Self::BloodElf,
        Self::Draenei,
    ];

    /// Looks up a race by its armory id.
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|race| race.id() == id)
    }

    /// Returns the armory id. Id 9 is unused.
    pub fn id(self) -> u8 {
        match self {
            Self::Human => 1,
            Self::Orc => 2,
            Self::Dwarf => 3,
            Self::NightElf => 4,
            Self::Undead => 5,
            Self::Tauren => 6,
            Self::Gnome => 7,
            Self::Troll => 8,
            Self::BloodElf => 10,
            Self::Draenei => 11,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Human => "Human",
            Self::Orc => "Orc",
            Self::Dwarf => "Dwarf",
            Self::NightElf => "Night Elf",
            Self::Undead => "Undead",
            Self::Tauren => "Tauren",
            Self::Gnome => "Gnome",
            Self::Troll => "Troll",
            Self::BloodElf => "Blood Elf",
            Self::Draenei => "Draenei",
        }
    }
}

impl fmt::Display for Race {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
