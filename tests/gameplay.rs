// Host integration tests for the simulation. They drive `GameState` the way
// the browser frame loop does and never touch wasm/browser APIs.

use doodle_jump::{Command, Doodle, GameConfig, GameError, GameEvent, GameState};

const FRAME_MS: f64 = 16.0;

/// Doodle on a platform at (0,100); the second platform's left is chosen by
/// the test, the rest sit far to the right.
fn ladder(second_left: f64) -> GameState {
    let layout = [(0.0, 100.0), (second_left, 220.0), (300.0, 340.0), (300.0, 460.0), (300.0, 580.0)];
    GameState::with_layout(GameConfig::default(), &layout, 3).unwrap()
}

#[test]
fn idle_game_ends_when_the_first_platform_scrolls_away() {
    let mut game = GameState::new(GameConfig::default(), 7).unwrap();
    let mut events = Vec::new();
    let mut elapsed = 0.0;
    while !game.is_game_over() && elapsed < 10_000.0 {
        events.extend(game.advance(FRAME_MS));
        assert_eq!(game.platforms().len(), 5);
        elapsed += FRAME_MS;
    }
    assert!(game.is_game_over());
    // 34 scroll steps take the first platform below 0, one recycle, then 5 more
    assert!((3_900.0..4_200.0).contains(&elapsed), "ended after {elapsed} ms");
    assert_eq!(game.score(), 0);
    assert!(game.doodle().is_none());
    let game_overs = events.iter().filter(|e| matches!(e, GameEvent::GameOver { .. })).count();
    assert_eq!(game_overs, 1);
    assert!(events.iter().any(|e| matches!(e, GameEvent::PlatformRecycled { .. })));
}

#[test]
fn grounded_doodle_moves_with_the_platforms() {
    let mut game = GameState::new(GameConfig::default(), 11).unwrap();
    for _ in 0..10 {
        let doodle_before = game.doodle().unwrap().bottom();
        let platform_before = game.platforms().next().unwrap().bottom();
        game.advance(100.0);
        let doodle_delta = game.doodle().unwrap().bottom() - doodle_before;
        let platform_delta = game.platforms().next().unwrap().bottom() - platform_before;
        assert_eq!(doodle_delta, -3.0);
        assert_eq!(doodle_delta, platform_delta);
        assert!(game.is_grounded());
    }
}

#[test]
fn jump_and_land_on_the_next_platform_while_scrolling() {
    let mut game = ladder(0.0);
    game.apply(Command::Jump);
    let mut events = Vec::new();
    for _ in 0..500 {
        events.extend(game.advance(5.0));
        if game.score() > 0 {
            break;
        }
    }
    assert_eq!(game.score(), 1);
    assert!(game.is_grounded());
    let motion: Vec<&GameEvent> = events
        .iter()
        .filter(|e| !matches!(e, GameEvent::PlatformRecycled { .. }))
        .collect();
    assert_eq!(
        motion,
        vec![
            &GameEvent::JumpStarted,
            &GameEvent::FallStarted,
            &GameEvent::Landed { platform: 1, score: 1 },
        ]
    );
    let platform = game.platforms().nth(1).unwrap();
    assert_eq!(game.doodle().unwrap().bottom(), platform.bottom() + 15.0);
}

#[test]
fn doodle_at_left_zero_lands_on_full_overlap_only() {
    for (second_left, expected_platform) in [(0.0, 1), (370.0, 0)] {
        let mut game = ladder(second_left);
        assert!(game.jump());
        while game.is_jumping() {
            game.jump_tick();
        }
        game.take_events();
        while game.is_falling() {
            game.fall_tick();
        }
        assert_eq!(
            game.take_events(),
            vec![GameEvent::Landed { platform: expected_platform, score: 1 }],
            "second platform at left={second_left}"
        );
    }
}

#[test]
fn platform_count_and_score_hold_for_a_whole_session() {
    let mut game = GameState::new(GameConfig::default(), 2024).unwrap();
    let pattern = [Command::Jump, Command::MoveRight, Command::MoveRight, Command::Jump, Command::MoveLeft];
    let mut last_score = 0;
    for frame in 0..4_000usize {
        if frame % 20 == 0 {
            game.apply(pattern[(frame / 20) % pattern.len()]);
        }
        game.advance(FRAME_MS);
        assert_eq!(game.platforms().len(), 5);
        assert!(game.score() >= last_score);
        last_score = game.score();
        assert_eq!(game.is_game_over(), game.doodle().is_none());
        if game.is_game_over() {
            break;
        }
    }
    if game.is_game_over() {
        let frozen = game.snapshot();
        game.apply(Command::Jump);
        assert!(game.advance(1_000.0).is_empty());
        assert_eq!(game.snapshot(), frozen);
    }
}

#[test]
fn construction_errors_fail_fast() {
    assert_eq!(
        GameState::with_layout(GameConfig::default(), &[], 1).err(),
        Some(GameError::NoPlatforms)
    );
    assert!(matches!(Doodle::new(f64::NAN, 0.0), Err(GameError::InvalidPosition { .. })));
    let bad = GameConfig { platform_speed: 0.0, ..GameConfig::default() };
    assert!(matches!(GameState::new(bad, 1).err(), Some(GameError::InvalidConfig(_))));
}

#[test]
fn same_seed_same_board() {
    let a = GameState::new(GameConfig::default(), 5).unwrap();
    let b = GameState::new(GameConfig::default(), 5).unwrap();
    assert_eq!(a.snapshot(), b.snapshot());
}
