//! Text command parsing. The first word picks the command (case-insensitive),
//! the remainder is its argument. Save names keep their case.

use std::fmt;

use super::dungeon::Direction;
use super::errors::GameError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Attack,
    Look,
    Inventory,
    /// Drink a health potion.
    Use,
    Save(Option<String>),
    Load(Option<String>),
    Help,
    Restart,
    Quit,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Move(d) => write!(f, "move {}", d),
            Command::Attack => f.write_str("attack"),
            Command::Look => f.write_str("look"),
            Command::Inventory => f.write_str("inventory"),
            Command::Use => f.write_str("use"),
            Command::Save(Some(n)) => write!(f, "save {}", n),
            Command::Save(None) => f.write_str("save"),
            Command::Load(Some(n)) => write!(f, "load {}", n),
            Command::Load(None) => f.write_str("load"),
            Command::Help => f.write_str("help"),
            Command::Restart => f.write_str("restart"),
            Command::Quit => f.write_str("quit"),
        }
    }
}

pub fn parse(line: &str) -> Result<Command, GameError> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };
    if verb.is_empty() {
        return Err(GameError::InvalidCommand("empty command".to_string()));
    }
    let verb = verb.to_ascii_lowercase();
    let arg = (!rest.is_empty()).then_some(rest);

    let bare = |cmd: Command| match arg {
        None => Ok(cmd),
        Some(a) => Err(GameError::InvalidInput(format!(
            "'{}' takes no argument (got '{}')",
            verb, a
        ))),
    };

    match verb.as_str() {
        "north" | "n" => bare(Command::Move(Direction::North)),
        "south" | "s" => bare(Command::Move(Direction::South)),
        "east" | "e" => bare(Command::Move(Direction::East)),
        "west" | "w" => bare(Command::Move(Direction::West)),
        "go" | "move" => match arg {
            Some(dir) => Ok(Command::Move(dir.parse()?)),
            None => Err(GameError::InvalidInput("go where?".to_string())),
        },
        "attack" | "a" => bare(Command::Attack),
        "look" | "l" => bare(Command::Look),
        "inventory" | "inv" | "i" => bare(Command::Inventory),
        "use" | "u" | "drink" => match arg.map(|a| a.to_ascii_lowercase()) {
            None => Ok(Command::Use),
            Some(a) if a == "potion" || a == "p" => Ok(Command::Use),
            Some(a) => Err(GameError::InvalidInput(format!("cannot use '{}'", a))),
        },
        // the whole remainder is the name; validation rejects spaces
        "save" => Ok(Command::Save(arg.map(str::to_string))),
        "load" => Ok(Command::Load(arg.map(str::to_string))),
        "help" | "h" | "?" => bare(Command::Help),
        "restart" => bare(Command::Restart),
        "quit" | "q" | "exit" => bare(Command::Quit),
        _ => Err(GameError::InvalidCommand(format!(
            "unknown command '{}' (type help)",
            verb
        ))),
    }
}
