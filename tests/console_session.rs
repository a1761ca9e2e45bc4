use dungeoncrawl::config::{Config, GameConfig};
use dungeoncrawl::game::{console, default_dungeon, Renderer, RngDice, ScriptedDice, Session};
use dungeoncrawl::storage::{FileSaveStore, SaveStore};

// Console loop over byte buffers with a real file store behind it.
#[tokio::test]
async fn console_saves_and_reloads() {
    let td = tempfile::tempdir().unwrap();
    let store = FileSaveStore::new(&td.path().to_string_lossy()).unwrap();
    let mut session = Session::new(
        default_dungeon(),
        GameConfig::default(),
        store,
        ScriptedDice::new(vec![]),
    );

    let input: &[u8] = b"save slot\nnorth\nnorth\nload slot\nlook\nload ../etc\nquit\n";
    let mut out = Vec::new();
    console::run(&mut session, Renderer::new(false), input, &mut out)
        .await
        .unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("Game saved as 'slot'."), "output: {}", text);
    assert!(text.contains("A Goblin blocks your way!"));
    assert!(text.contains("!! invalid command: you cannot flee from the Goblin"));
    assert!(text.contains("Loaded 'slot'."));
    assert!(text.contains("!! invalid input: save name contains invalid characters"));
    assert!(text.trim_end().ends_with("Farewell, adventurer."));
    assert_eq!(session.game().player.position, "cave_mouth");
    assert_eq!(session.store().list().unwrap(), vec!["slot".to_string()]);
}

#[tokio::test]
async fn end_of_input_stops_cleanly() {
    let mut session = Session::new(
        default_dungeon(),
        GameConfig::default(),
        dungeoncrawl::storage::MemorySaveStore::new(),
        RngDice::seeded(1),
    );
    let input: &[u8] = b"east\n";
    let mut out = Vec::new();
    console::run(&mut session, Renderer::new(true), input, &mut out)
        .await
        .unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Collapsed Storeroom"));
    assert!(text.ends_with(console::PROMPT));
}

#[tokio::test]
async fn config_drives_a_session() {
    let td = tempfile::tempdir().unwrap();
    let path = td.path().join("dungeon.toml");
    let data_dir = td.path().join("data");
    let toml = format!(
        "[game]\nstarting_health = 40\nstarting_attack = 30\nseed = 5\n\n[storage]\ndata_dir = {:?}\n\n[display]\ncolor = false\n",
        data_dir.to_string_lossy()
    );
    tokio::fs::write(&path, toml).await.unwrap();

    let config = Config::load(&path.to_string_lossy()).await.unwrap();
    let store = FileSaveStore::new(&config.storage.data_dir).unwrap();
    let mut session = Session::new(
        default_dungeon(),
        config.game.clone(),
        store,
        RngDice::seeded(config.game.seed.unwrap_or_default()),
    );
    assert_eq!(session.game().player.health.max(), 40);

    let input: &[u8] = b"n\na\ni\nsave cfg\nq\n";
    let mut out = Vec::new();
    console::run(
        &mut session,
        Renderer::new(config.display.color),
        input,
        &mut out,
    )
    .await
    .unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("The Goblin falls! (+15 XP)"));
    assert!(text.contains("HP 40/40 | ATK 30 | L1 | XP 15"));
    assert!(data_dir.join("saves").join("cfg.json").exists());
}
