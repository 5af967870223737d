//! End-to-end play sessions against a temporary project directory.

use std::path::Path;

use playmode_content::ContentFactory;
use playmode_core::{Direction, FrameInput, Handoff, Position, QuestStatus};
use playmode_runtime::{FileSaveRepository, PlaySession, RepositoryError, RuntimeError, Screen};
use tempfile::TempDir;

const DT: f32 = 1.0;

const TOWN_GROUPS: &str = r#"[
    {"name": "grass"},
    {"name": "hero", "isPlayer": true},
    {"name": "coin", "entityType": "item",
     "properties": {"name": "Gold Coin", "on_collect_increment": "coins"}},
    {"name": "elder", "entityType": "npc",
     "properties": {"name": "Elder", "dialogue": "dialogues/elder.json"}},
    {"name": "spikes", "entityType": "trap",
     "properties": {"name": "Spike Trap", "damage": 100}}
]"#;

const TOWN_ENTITIES: &str = r#"[
    {"id": "hero", "group": "hero", "x": 1, "y": 1},
    {"id": "coin01", "group": "coin", "x": 2, "y": 1},
    {"id": "elder", "group": "elder", "x": 3, "y": 1},
    {"id": "spikes01", "group": "spikes", "x": 1, "y": 2}
]"#;

/// Town (5x3) with a coin, an elder and a trap; forest to the west; a
/// missing map to the north. The elder's farewell starts a second quest.
fn project() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    std::fs::create_dir(root.join("maps")).unwrap();
    std::fs::create_dir(root.join("dialogues")).unwrap();

    let cells = vec!["\"grass\""; 15].join(", ");
    let town = format!(
        r#"{{"width": 5, "height": 3,
            "layers": [{{"name": "ground", "cells": [{}]}}],
            "groups": {},
            "entities": {}}}"#,
        cells, TOWN_GROUPS, TOWN_ENTITIES
    );
    write(root, "maps/town.json", &town);
    write(root, "maps/forest.json", r#"{"width": 3, "height": 3}"#);
    write(
        root,
        "world.ron",
        r#"(maps: {
            "town": (neighbors: { West: "forest", North: "ruins" }),
            "forest": (neighbors: { East: "town" }),
        })"#,
    );
    write(
        root,
        "quests.json",
        r#"[{"id": "coins", "name": "Coin Collector",
             "objectives": [{"description": "Collect a coin", "type": "variable_gte",
                             "variable": "coins", "value": 1}]},
            {"id": "errand", "name": "Elder's Errand", "startFlag": "met_elder",
             "objectives": [{"description": "Reach the ruins", "type": "flag",
                             "flag": "visited_map:ruins"}]}]"#,
    );
    write(
        root,
        "dialogues/elder.json",
        r#"{"nodes": [
            {"id": "hi", "speaker": "Elder", "text": "Welcome.", "nextNodeId": "bye"},
            {"id": "bye", "speaker": "Elder", "text": "Farewell.", "setsFlag": "met_elder"}
        ]}"#,
    );
    dir
}

fn write(root: &Path, relative: &str, content: &str) {
    std::fs::write(root.join(relative), content).unwrap();
}

fn start(dir: &TempDir) -> PlaySession {
    PlaySession::start(ContentFactory::new(dir.path()), "town", None).unwrap()
}

/// Steps once and lets the move resolve.
fn walk(session: &mut PlaySession, direction: Direction) -> Vec<String> {
    let mut messages = session.update(&FrameInput::step(direction), DT).messages;
    messages.extend(session.update(&FrameInput::default(), DT).messages);
    messages
}

fn press(session: &mut PlaySession, input: FrameInput) -> Vec<String> {
    session.update(&input, DT).messages
}

fn confirm() -> FrameInput {
    FrameInput {
        confirm: true,
        ..FrameInput::default()
    }
}

fn cancel() -> FrameInput {
    FrameInput {
        cancel: true,
        ..FrameInput::default()
    }
}

#[test]
fn collecting_a_coin_completes_the_quest() {
    let dir = project();
    let mut session = start(&dir);
    assert_eq!(session.state().player.position, Position::new(1, 1));

    let messages = walk(&mut session, Direction::East);
    assert_eq!(messages[0], "Quest started: Coin Collector");
    assert!(messages.contains(&"Picked up Gold Coin!".to_string()));
    assert!(messages.contains(&"Objective complete: Collect a coin".to_string()));
    assert_eq!(
        messages.last().map(String::as_str),
        Some("Quest complete: Coin Collector")
    );

    assert!(session.state().player.inventory().contains("Gold Coin"));
    assert!(session.state().has_flag("entity_inactive:coin01"));
    let log = session.quest_log();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].status, QuestStatus::Completed);
    assert_eq!(log[0].objectives, vec![("Collect a coin".to_string(), true)]);
}

#[test]
fn bumping_the_elder_walks_the_dialogue() {
    let dir = project();
    let mut session = start(&dir);
    walk(&mut session, Direction::East);

    let outcome = session.update(&FrameInput::step(Direction::East), DT);
    assert!(matches!(outcome.handoff, Some(Handoff::Dialogue(_))));
    assert_eq!(session.screen(), Screen::Dialogue);
    assert_eq!(session.state().player.position, Position::new(2, 1));
    assert_eq!(
        session.dialogue().and_then(|d| d.current_node()).map(|n| n.text.as_str()),
        Some("Welcome.")
    );

    // The farewell node sets the flag on entry, which starts the errand
    // while the conversation is still open.
    let messages = press(&mut session, confirm());
    assert!(session.state().has_flag("met_elder"));
    assert_eq!(messages, vec!["Quest started: Elder's Errand".to_string()]);
    assert_eq!(session.screen(), Screen::Dialogue);

    assert!(press(&mut session, confirm()).is_empty());
    assert_eq!(session.screen(), Screen::Play);
    assert!(session.dialogue().is_none());
}

#[test]
fn walking_off_the_west_edge_enters_the_forest() {
    let dir = project();
    let mut session = start(&dir);
    walk(&mut session, Direction::West);
    assert_eq!(session.state().player.position, Position::new(0, 1));

    let outcome = session.update(&FrameInput::step(Direction::West), DT);
    assert!(matches!(outcome.handoff, Some(Handoff::Transition(_))));
    assert_eq!(session.state().current_map(), "forest");
    assert_eq!(session.state().player.position, Position::new(2, 1));
    assert!(session.state().has_flag("visited_map:forest"));
    assert!(session.state().entities.is_empty());

    session.update(&FrameInput::step(Direction::East), DT);
    assert_eq!(session.state().current_map(), "town");
    assert_eq!(session.state().player.position, Position::new(0, 1));
}

#[test]
fn missing_neighbor_map_keeps_the_player_in_place() {
    let dir = project();
    let mut session = start(&dir);
    walk(&mut session, Direction::North);

    let messages = press(&mut session, FrameInput::step(Direction::North));
    assert_eq!(messages, vec!["Map 'ruins' not found".to_string()]);
    assert_eq!(session.state().current_map(), "town");
    assert_eq!(session.state().player.position, Position::new(1, 0));
    assert_eq!(session.status_message(), Some("Map 'ruins' not found"));
}

#[test]
fn trap_death_ends_the_game_and_confirm_restarts() {
    let dir = project();
    let mut session = start(&dir);
    walk(&mut session, Direction::East);
    walk(&mut session, Direction::West);

    let messages = walk(&mut session, Direction::South);
    assert!(messages.contains(&"Spike Trap hits you for 20 damage!".to_string()));
    assert_eq!(
        messages.last().map(String::as_str),
        Some("You have been defeated.")
    );
    assert_eq!(session.screen(), Screen::GameOver);

    // Movement is ignored until the player confirms.
    press(&mut session, FrameInput::step(Direction::North));
    assert_eq!(session.screen(), Screen::GameOver);

    let messages = press(&mut session, confirm());
    assert_eq!(messages, vec!["Quest started: Coin Collector".to_string()]);
    assert_eq!(session.screen(), Screen::Play);
    assert_eq!(session.state().player.position, Position::new(1, 1));
    assert_eq!(session.state().player.health(), 20);
    assert!(session.state().player.inventory().is_empty());
    assert!(session.state().entity_at(Position::new(2, 1)).is_some());
}

#[test]
fn save_and_load_restore_progress() {
    let dir = project();
    let saves = tempfile::tempdir().unwrap();
    let mut session =
        start(&dir).with_repository(FileSaveRepository::new(saves.path()).unwrap());
    walk(&mut session, Direction::East);
    session.save("slot1").unwrap();
    assert!(saves.path().join("slot1.sav").exists());

    walk(&mut session, Direction::West);
    walk(&mut session, Direction::West);
    session.update(&FrameInput::step(Direction::West), DT);
    assert_eq!(session.state().current_map(), "forest");

    session.load("slot1").unwrap();
    assert_eq!(session.state().current_map(), "town");
    assert_eq!(session.state().player.position, Position::new(2, 1));
    assert!(session.state().player.inventory().contains("Gold Coin"));
    assert!(session.state().entity_at(Position::new(2, 1)).is_none());
    assert!(session.state().entity_at(Position::new(3, 1)).is_some());

    // The quest was completed before saving, so nothing is re-announced.
    assert!(press(&mut session, FrameInput::default()).is_empty());
    assert_eq!(session.save_slots().unwrap(), vec!["slot1".to_string()]);

    assert!(matches!(
        session.load("slot2"),
        Err(RuntimeError::SaveNotFound { .. })
    ));

    session.delete_save("slot1").unwrap();
    assert!(!saves.path().join("slot1.sav").exists());
    assert!(matches!(
        session.delete_save("slot1"),
        Err(RuntimeError::SaveNotFound { .. })
    ));
}

#[test]
fn in_memory_saves_reject_bad_slot_names() {
    let dir = project();
    let mut session = start(&dir);
    session.save("quick").unwrap();

    assert!(matches!(
        session.load("../quick"),
        Err(RuntimeError::Repository(RepositoryError::InvalidSlot(_)))
    ));
    assert!(matches!(
        session.delete_save("../quick"),
        Err(RuntimeError::SaveNotFound { .. })
    ));
    assert_eq!(session.save_slots().unwrap(), vec!["quick".to_string()]);
}

#[test]
fn inventory_screen_actions() {
    let dir = project();
    let mut session = start(&dir);
    walk(&mut session, Direction::East);

    press(
        &mut session,
        FrameInput {
            inventory: true,
            ..FrameInput::default()
        },
    );
    assert_eq!(session.screen(), Screen::Inventory);

    assert_eq!(
        session.use_item("Gold Coin"),
        vec!["Gold Coin cannot be used".to_string()]
    );
    assert_eq!(session.equip("Gold Coin"), vec!["Equipped Gold Coin.".to_string()]);
    assert_eq!(
        session.state().player.equipment().item_in("weapon"),
        Some("Gold Coin")
    );
    assert_eq!(session.unequip("weapon"), vec!["Unequipped Gold Coin.".to_string()]);
    assert_eq!(
        session.unequip("weapon"),
        vec!["nothing is equipped in slot 'weapon'".to_string()]
    );

    // Menu screens swallow movement.
    press(&mut session, FrameInput::step(Direction::West));
    assert_eq!(session.state().player.position, Position::new(2, 1));
    press(&mut session, cancel());
    assert_eq!(session.screen(), Screen::Play);
}

#[test]
fn missing_start_map_fails_to_start() {
    let dir = project();
    let result = PlaySession::start(ContentFactory::new(dir.path()), "nowhere", None);
    assert!(matches!(result, Err(RuntimeError::Content(_))));
}
