//! Room graph. Layouts are static tables; only per-game progress (cleared
//! rooms, player position) is stored in the save.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::GameError;
use super::monster::MonsterKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "north" | "n" => Ok(Direction::North),
            "south" | "s" => Ok(Direction::South),
            "east" | "e" => Ok(Direction::East),
            "west" | "w" => Ok(Direction::West),
            other => Err(GameError::InvalidInput(format!(
                "unknown direction '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug)]
pub struct RoomSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Dungeon level used for loot rolls in this room.
    pub depth: u32,
    pub exits: &'static [(Direction, &'static str)],
    /// Spawned on first entry, until defeated.
    pub guardian: Option<MonsterKind>,
}

impl RoomSpec {
    pub fn exit(&self, dir: Direction) -> Option<&'static str> {
        self.exits
            .iter()
            .find(|(d, _)| *d == dir)
            .map(|(_, to)| *to)
    }

    pub fn exit_directions(&self) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|d| self.exit(*d).is_some())
            .collect()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Dungeon {
    pub name: &'static str,
    pub rooms: &'static [RoomSpec],
    pub start: &'static str,
    /// Reaching this room while exploring wins the game.
    pub exit: &'static str,
}

impl Dungeon {
    pub fn room(&self, id: &str) -> Option<&'static RoomSpec> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn start_room(&self) -> Option<&'static RoomSpec> {
        self.room(self.start)
    }

    /// Every exit points at a room in the layout, and start/exit exist.
    pub fn validate(&self) -> Result<(), String> {
        if self.room(self.start).is_none() {
            return Err(format!("start room '{}' missing", self.start));
        }
        if self.room(self.exit).is_none() {
            return Err(format!("exit room '{}' missing", self.exit));
        }
        for room in self.rooms {
            for (dir, to) in room.exits {
                if self.room(to).is_none() {
                    return Err(format!(
                        "room '{}' exit {} leads to unknown room '{}'",
                        room.id, dir, to
                    ));
                }
            }
        }
        Ok(())
    }
}

use Direction::{East, North, South, West};

static DEFAULT_ROOMS: [RoomSpec; 8] = [
    RoomSpec {
        id: "cave_mouth",
        name: "Cave Mouth",
        description: "Daylight fades behind you. Damp stone steps lead down into the dark.",
        depth: 0,
        exits: &[(North, "torchlit_hall"), (East, "storeroom")],
        guardian: None,
    },
    RoomSpec {
        id: "storeroom",
        name: "Collapsed Storeroom",
        description: "Broken crates and split sacks litter the floor. Something has been eating the grain.",
        depth: 1,
        exits: &[(West, "cave_mouth")],
        guardian: Some(MonsterKind::Goblin),
    },
    RoomSpec {
        id: "torchlit_hall",
        name: "Torchlit Hall",
        description: "Sputtering torches line a long hall. Fresh footprints cross the dust.",
        depth: 1,
        exits: &[
            (South, "cave_mouth"),
            (North, "crossroads"),
            (East, "shrine"),
        ],
        guardian: Some(MonsterKind::Goblin),
    },
    RoomSpec {
        id: "shrine",
        name: "Forgotten Shrine",
        description: "A cracked altar stands beneath a carved sun. The air is still and quiet.",
        depth: 2,
        exits: &[(West, "torchlit_hall")],
        guardian: None,
    },
    RoomSpec {
        id: "crossroads",
        name: "Crossroads",
        description: "Four tunnels meet beneath a vaulted ceiling. A hot wind blows from the north.",
        depth: 2,
        exits: &[
            (South, "torchlit_hall"),
            (West, "barracks"),
            (North, "dragon_lair"),
        ],
        guardian: Some(MonsterKind::Orc),
    },
    RoomSpec {
        id: "barracks",
        name: "Orc Barracks",
        description: "Rows of filthy bunks and a rack of notched spears. It reeks of sweat and smoke.",
        depth: 3,
        exits: &[(East, "crossroads")],
        guardian: Some(MonsterKind::Orc),
    },
    RoomSpec {
        id: "dragon_lair",
        name: "Dragon's Lair",
        description: "Scorched bones crunch underfoot. A vast shape stirs atop a bed of coins.",
        depth: 4,
        exits: &[(South, "crossroads"), (North, "sunlit_stair")],
        guardian: Some(MonsterKind::Dragon),
    },
    RoomSpec {
        id: "sunlit_stair",
        name: "Sunlit Stair",
        description: "A narrow stair climbs toward daylight and fresh air.",
        depth: 5,
        exits: &[(South, "dragon_lair")],
        guardian: None,
    },
];

/// The built-in dungeon.
pub fn default_dungeon() -> Dungeon {
    Dungeon {
        name: "depths",
        rooms: &DEFAULT_ROOMS,
        start: "cave_mouth",
        exit: "sunlit_stair",
    }
}
