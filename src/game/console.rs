//! Line-oriented console loop: read a command, dispatch it, print the result.
//!
//! Generic over tokio's async reader/writer so the binary can drive it from
//! stdin/stdout and tests from byte buffers.

use log::{debug, info, warn};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use super::dice::Dice;
use super::command::Command;
use super::engine::{Event, Flow, Session};
use super::render::Renderer;
use crate::logutil::escape_input;
use crate::storage::SaveStore;

pub const PROMPT: &str = "> ";

/// Try to resume a save before play starts. On failure the fresh game stays
/// in place and the returned text says why.
pub fn resume<S: SaveStore, D: Dice>(
    session: &mut Session<S, D>,
    renderer: Renderer,
    name: &str,
) -> String {
    match session.dispatch(Command::Load(Some(name.to_string()))) {
        Ok(turn) => turn
            .events
            .iter()
            .filter(|e| matches!(e, Event::Loaded(_)))
            .map(|e| renderer.event(e))
            .collect::<Vec<_>>()
            .join("\n"),
        Err(e) => {
            warn!("could not resume '{}': {}", escape_input(name), e);
            format!("{}\nStarting a new game.", renderer.error(&e))
        }
    }
}

/// Run until the player quits or input ends. Recoverable command errors are
/// printed and the loop keeps going; I/O errors and broken game state end it.
pub async fn run<S, D, R, W>(
    session: &mut Session<S, D>,
    renderer: Renderer,
    input: R,
    mut output: W,
) -> anyhow::Result<()>
where
    S: SaveStore,
    D: Dice,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let opening = renderer.events(&session.opening()?);
    output.write_all(opening.as_bytes()).await?;
    output.write_all(b"\n").await?;

    let mut lines = input.lines();
    loop {
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            info!("input closed; leaving game");
            break;
        };
        let text = match session.handle_line(&line) {
            Ok(turn) => {
                debug!("input: {}", escape_input(&line));
                let text = renderer.events(&turn.events);
                if turn.flow == Flow::Quit {
                    output.write_all(text.as_bytes()).await?;
                    output.write_all(b"\n").await?;
                    break;
                }
                text
            }
            Err(e) if e.is_recoverable() => {
                warn!("rejected '{}': {}", escape_input(&line), e);
                renderer.error(&e)
            }
            Err(e) => return Err(e.into()),
        };
        output.write_all(text.as_bytes()).await?;
        output.write_all(b"\n").await?;
    }
    output.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game::dice::ScriptedDice;
    use crate::game::dungeon::default_dungeon;
    use crate::storage::{MemorySaveStore, SaveStore};

    #[tokio::test]
    async fn errors_do_not_end_the_loop() {
        let mut session = Session::new(
            default_dungeon(),
            GameConfig::default(),
            MemorySaveStore::new(),
            ScriptedDice::new(vec![]),
        );
        let input: &[u8] = b"dance\nattack\nlook\nquit\nnorth\n";
        let mut out = Vec::new();
        run(&mut session, Renderer::new(false), input, &mut out)
            .await
            .unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("== Cave Mouth =="));
        assert!(text.contains("!! invalid command: unknown command 'dance' (type help)"));
        assert!(text.contains("!! invalid command: there is nothing here to attack"));
        assert!(text.contains("Farewell, adventurer."));
        // nothing after quit is processed
        assert!(!text.contains("Torchlit Hall"));
        assert_eq!(session.game().player.position, "cave_mouth");
    }

    #[test]
    fn failed_resume_keeps_a_fresh_game() {
        let mut session = Session::new(
            default_dungeon(),
            GameConfig::default(),
            MemorySaveStore::new(),
            ScriptedDice::new(vec![]),
        );
        let text = resume(&mut session, Renderer::new(false), "nowhere");
        assert_eq!(text, "!! no save named 'nowhere'\nStarting a new game.");
        assert_eq!(session.game().player.position, "cave_mouth");
        assert!(session.handle_line("n").is_ok());
    }

    #[test]
    fn resume_reports_the_loaded_save() {
        let mut store = MemorySaveStore::new();
        let mut seed = Session::new(
            default_dungeon(),
            GameConfig::default(),
            MemorySaveStore::new(),
            ScriptedDice::new(vec![]),
        );
        seed.handle_line("e").unwrap();
        let mut snapshot = seed.game().clone();
        snapshot.save_id = Some("run".into());
        store.save(&snapshot).unwrap();

        let mut session = Session::new(
            default_dungeon(),
            GameConfig::default(),
            store,
            ScriptedDice::new(vec![]),
        );
        let text = resume(&mut session, Renderer::new(false), "run");
        assert_eq!(text, "Loaded 'run'.");
        assert_eq!(session.game().player.position, "storeroom");
    }
}
