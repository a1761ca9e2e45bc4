//! Plain-text rendering of session events. Colors come from the treasure
//! style table and are only emitted when enabled.

use super::dungeon::Direction;
use super::engine::{Event, MonsterView, Summary};
use super::errors::GameError;
use super::treasure::Treasure;

const RESET: &str = "\x1b[0m";
const RED: &str = "\x1b[31m";
const BOLD: &str = "\x1b[1m";

pub const ERROR_PREFIX: &str = "!!";

fn help_text() -> &'static str {
    "Commands:\n\
N)orth S)outh E)ast W)est - move (also: go <dir>)\n\
A)ttack - strike the monster in this room; it hits back if it survives\n\
L)ook - describe the room again\n\
I)nventory - treasure, health and level\n\
U)se - drink a health potion\n\
SAVE [name] / LOAD [name] - save or restore the game\n\
RESTART - begin a new game; H)elp - this list; Q)uit - leave\n\
Goal: reach the Sunlit Stair alive."
}

#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    pub color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Renderer { color }
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.color {
            format!("{}{}{}", color, text, RESET)
        } else {
            text.to_string()
        }
    }

    fn treasure(&self, t: &Treasure) -> String {
        let style = t.kind.style();
        let label = format!("{} {}", style.icon, t.name);
        format!(
            "{} ({}, worth {}) - {}",
            self.paint(style.color, &label),
            style.label,
            t.value,
            t.description
        )
    }

    fn exits(exits: &[Direction]) -> String {
        if exits.is_empty() {
            return "none".to_string();
        }
        exits
            .iter()
            .map(|d| d.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn monster(&self, m: &MonsterView) -> String {
        format!(
            "A {} blocks your way! (HP {}, attack {})",
            self.paint(BOLD, &m.name),
            m.health,
            m.attack_power
        )
    }

    fn summary(s: &Summary) -> String {
        format!(
            "Level {}, {} XP, treasure worth {}, {} turns.",
            s.level, s.experience, s.treasure_value, s.turns
        )
    }

    pub fn event(&self, event: &Event) -> String {
        match event {
            Event::Room {
                name,
                description,
                exits,
                monster,
            } => {
                let mut out = format!(
                    "== {} ==\n{}\nExits: {}.",
                    self.paint(BOLD, name),
                    description,
                    Self::exits(exits)
                );
                if let Some(m) = monster {
                    out.push('\n');
                    out.push_str(&self.monster(m));
                }
                out
            }
            Event::NoExit(dir) => format!("You cannot go {} from here.", dir),
            Event::PlayerStrikes {
                monster,
                damage,
                remaining,
            } => format!(
                "You hit the {} for {}. (its HP {})",
                monster, damage, remaining
            ),
            Event::MonsterStrikes {
                monster,
                damage,
                remaining,
            } => format!(
                "The {} hits you for {}. (your HP {})",
                monster, damage, remaining
            ),
            Event::MonsterDefeated {
                monster,
                experience,
            } => format!("The {} falls! (+{} XP)", monster, experience),
            Event::LevelUp {
                level,
                max_health,
                attack_power,
            } => format!(
                "You reach level {}! Max HP {}, attack {}.",
                level, max_health, attack_power
            ),
            Event::TreasureFound(t) => format!("You find {}", self.treasure(t)),
            Event::NothingFound => "You search the room but find nothing.".to_string(),
            Event::Inventory {
                items,
                total_value,
                health,
                attack_power,
                experience,
                level,
            } => {
                let mut out = format!(
                    "HP {} | ATK {} | L{} | XP {}\n",
                    health, attack_power, level, experience
                );
                if items.is_empty() {
                    out.push_str("You carry nothing.");
                } else {
                    for t in items {
                        out.push_str(&self.treasure(t));
                        out.push('\n');
                    }
                    out.push_str(&format!("Total value: {}", total_value));
                }
                out
            }
            Event::PotionUsed {
                name,
                restored,
                health,
            } => format!(
                "You drink the {} and recover {} HP. (HP {})",
                name, restored, health
            ),
            Event::Saved(id) => format!("Game saved as '{}'.", id),
            Event::Loaded(id) => format!("Loaded '{}'.", id),
            Event::Help => help_text().to_string(),
            Event::Restarted => "A new adventure begins.".to_string(),
            Event::Victory(s) => format!(
                "You climb into the daylight. Victory!\n{}",
                Self::summary(s)
            ),
            Event::Defeat(s) => format!(
                "You have fallen. Game over. (restart or quit)\n{}",
                Self::summary(s)
            ),
            Event::Farewell => "Farewell, adventurer.".to_string(),
        }
    }

    pub fn events(&self, events: &[Event]) -> String {
        events
            .iter()
            .map(|e| self.event(e))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn error(&self, err: &GameError) -> String {
        self.paint(RED, &format!("{} {}", ERROR_PREFIX, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::health::Health;
    use crate::game::treasure::TreasureType;

    #[test]
    fn room_lists_exits_and_monster() {
        let r = Renderer::new(false);
        let text = r.event(&Event::Room {
            name: "Crossroads",
            description: "Four tunnels meet.",
            exits: vec![Direction::North, Direction::South],
            monster: Some(MonsterView {
                name: "Orc".into(),
                health: Health::new(50),
                attack_power: 15,
            }),
        });
        assert!(text.contains("Exits: north, south."));
        assert!(text.contains("A Orc blocks your way! (HP 50/50, attack 15)"));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn treasure_uses_style_when_colored() {
        let t = Treasure {
            kind: TreasureType::Gold,
            name: "Gold Coins".into(),
            value: 75,
            description: "It glints even in the dark.".into(),
        };
        let plain = Renderer::new(false).event(&Event::TreasureFound(t.clone()));
        assert_eq!(
            plain,
            "You find $ Gold Coins (Gold, worth 75) - It glints even in the dark."
        );
        let colored = Renderer::new(true).event(&Event::TreasureFound(t));
        assert!(colored.contains("\x1b[33m$ Gold Coins\x1b[0m"));
    }

    #[test]
    fn errors_are_prefixed() {
        let err = GameError::InvalidCommand("there is nothing here to attack".into());
        assert_eq!(
            Renderer::new(false).error(&err),
            "!! invalid command: there is nothing here to attack"
        );
        assert!(Renderer::new(true).error(&err).starts_with(RED));
    }
}
