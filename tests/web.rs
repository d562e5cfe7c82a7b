// Browser tests for the DOM layer: `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

#[wasm_bindgen_test]
fn mount_creates_board_score_and_start_button() {
    doodle_jump::mount().unwrap();
    let doc = document();
    assert!(doc.query_selector(".board").unwrap().is_some());
    assert!(doc.get_element_by_id("startBtn").is_some());
    assert_eq!(
        doc.get_element_by_id("score").unwrap().text_content().as_deref(),
        Some("score 0")
    );
}

#[wasm_bindgen_test]
fn start_draws_platforms_and_doodle() {
    doodle_jump::start_game().unwrap();
    let board = document().query_selector(".board").unwrap().unwrap();
    // five platforms plus the doodle
    assert_eq!(board.child_element_count(), 6);
    assert!(board.query_selector(".doodle").unwrap().is_some());
    let snapshot = doodle_jump::game_snapshot().unwrap();
    assert!(snapshot.contains("\"score\":0"));
    assert!(snapshot.contains("\"game_over\":false"));
}

#[wasm_bindgen_test]
fn start_hook_installs_console_logger_once() {
    // the start hook already ran when the module loaded
    doodle_jump::wasm_start();
    assert_eq!(log::max_level(), log::LevelFilter::Debug);
    log::debug!("console logger reachable");
}
