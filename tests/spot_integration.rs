//! Named spots across engine restarts

use sniper::core::types::{Point, ScreenSize};
use sniper::input::{InputEvent, RecordingExecutor};
use sniper::mouse::SpotStore;
use sniper::{Engine, EngineConfig};
use std::path::Path;
use std::sync::Arc;

fn boot(spot_file: &Path) -> (Arc<RecordingExecutor>, Engine) {
    let exec = Arc::new(RecordingExecutor::with_screen(
        ScreenSize::new(1920, 1080),
        Point::new(960, 540),
    ));
    let config = EngineConfig {
        spot_file: Some(spot_file.to_path_buf()),
        ..EngineConfig::without_delays()
    };
    let engine = Engine::new(exec.clone(), config).unwrap();
    (exec, engine)
}

#[test]
fn test_spot_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let spot_file = dir.path().join("nested").join("spots.json");

    {
        let (exec, engine) = boot(&spot_file);
        exec.nudge_cursor(Point::new(123, 456));
        engine.run("remember compose").unwrap();
    }

    let (exec, engine) = boot(&spot_file);
    engine.run("compose").unwrap();
    assert_eq!(exec.cursor(), Point::new(123, 456));
}

#[test]
fn test_spot_file_is_readable_by_store() {
    let dir = tempfile::tempdir().unwrap();
    let spot_file = dir.path().join("spots.json");

    let (exec, engine) = boot(&spot_file);
    exec.nudge_cursor(Point::new(1, 2));
    engine.run("remember Reply").unwrap();
    exec.nudge_cursor(Point::new(3, 4));
    engine.run("remember archive").unwrap();
    engine.run("forget archive").unwrap();

    let store = SpotStore::open(&spot_file).unwrap();
    assert_eq!(store.names(), vec!["reply".to_string()]);
    assert_eq!(store.get("reply"), Some(Point::new(1, 2)));
}

#[test]
fn test_spot_then_click_in_one_phrase() {
    let dir = tempfile::tempdir().unwrap();
    let (exec, engine) = boot(&dir.path().join("spots.json"));
    engine.spots().set("ok", Point::new(50, 60)).unwrap();

    engine.run("ok click").unwrap();
    assert_eq!(
        exec.events(),
        vec![
            InputEvent::Move { to: Point::new(50, 60) },
            InputEvent::Click {
                button: sniper::core::types::MouseButton::Left
            },
        ]
    );
}

#[test]
fn test_attack_after_restart() {
    let dir = tempfile::tempdir().unwrap();
    let spot_file = dir.path().join("spots.json");
    {
        let (exec, engine) = boot(&spot_file);
        exec.nudge_cursor(Point::new(700, 80));
        engine.run("remember left").unwrap();
    }

    // "left" is a command, so the spot is only reachable through attack
    let (exec, engine) = boot(&spot_file);
    engine.run("attack left").unwrap();
    assert_eq!(exec.cursor(), Point::new(700, 80));
}
