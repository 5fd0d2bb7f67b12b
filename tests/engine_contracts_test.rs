//! Contract tests for placement legality, turn alternation, termination,
//! status text, and reset.

use fading_tictactoe::{Cell, GameEngine, GameEvent, GameMode, Mark, Outcome, RandomCpu};

fn place_all(engine: &mut GameEngine, moves: &[usize]) {
    for &index in moves {
        assert!(engine.place_move(index), "move at {index} should be accepted");
    }
}

/// X takes the 0-4-8 diagonal while O fills 1 and 2.
fn play_diagonal_win(engine: &mut GameEngine) {
    place_all(engine, &[0, 1, 4, 2, 8]);
}

#[test]
fn x_moves_first_and_marks_alternate() {
    let mut engine = GameEngine::seeded(1);
    assert_eq!(engine.current_mark(), Mark::X);
    assert!(engine.place_move(0));
    assert_eq!(engine.current_mark(), Mark::O);
    assert!(engine.place_move(1));
    assert_eq!(engine.current_mark(), Mark::X);
}

#[test]
fn occupied_cell_is_a_silent_no_op() {
    let mut engine = GameEngine::seeded(1);
    assert!(engine.place_move(4));
    let mark_before = engine.current_mark();
    assert!(!engine.place_move(4));
    assert_eq!(engine.current_mark(), mark_before);
    assert_eq!(engine.history().len(), 1);
}

#[test]
fn off_board_index_is_a_silent_no_op() {
    let mut engine = GameEngine::seeded(1);
    assert!(!engine.place_move(9));
    assert!(!engine.place_move(usize::MAX));
    assert_eq!(engine.current_mark(), Mark::X);
    assert!(engine.history().is_empty());
}

#[test]
fn diagonal_win_for_x() {
    let mut engine = GameEngine::seeded(1);
    play_diagonal_win(&mut engine);
    assert_eq!(engine.outcome(), Outcome::Win(Mark::X));
    assert_eq!(engine.outcome().winner(), Some(Mark::X));
    for index in [0, 4, 8] {
        assert_eq!(engine.board().get(index), Some(Cell::Occupied(Mark::X)));
    }
}

#[test]
fn no_placements_after_a_win() {
    let mut engine = GameEngine::seeded(1);
    play_diagonal_win(&mut engine);
    assert!(!engine.place_move(5));
    assert_eq!(engine.outcome(), Outcome::Win(Mark::X));
    // The turn did not pass on the winning move, and a rejected placement
    // leaves it alone too.
    assert_eq!(engine.current_mark(), Mark::X);
    assert_eq!(engine.history().len(), 5);
}

#[test]
fn out_of_turn_placement_rejected_in_cpu_mode() {
    let mut engine = GameEngine::seeded(1);
    engine.set_mode(GameMode::VsCpu);
    assert!(engine.place_move(0), "human holds the opening turn");
    assert!(!engine.place_move(1), "now it is the CPU's turn");
    assert_eq!(engine.history().len(), 1);
    assert_eq!(engine.current_mark(), engine.cpu_mark());
}

#[test]
fn pvp_mode_accepts_both_marks_from_one_caller() {
    let mut engine = GameEngine::seeded(1);
    engine.set_mode(GameMode::Pvp);
    place_all(&mut engine, &[0, 1, 2, 3]);
    assert_eq!(engine.history().len(), 4);
}

#[test]
fn reset_restores_the_initial_state() {
    let mut engine = GameEngine::seeded(3);
    play_diagonal_win(&mut engine);
    engine.reset();
    assert_eq!(engine.outcome(), Outcome::InProgress);
    assert_eq!(engine.current_mark(), Mark::X);
    assert_eq!(engine.player_mark(), Mark::X);
    assert_eq!(engine.cpu_mark(), Mark::O);
    assert!(engine.history().is_empty());
    assert!(engine.board().cells().iter().all(|c| *c == Cell::Empty));
}

#[test]
fn reset_and_randomize_bump_the_epoch() {
    let mut engine = GameEngine::seeded(3);
    let epoch = engine.epoch();
    engine.reset();
    assert!(engine.epoch() > epoch);

    let epoch = engine.epoch();
    engine.randomize_starting_player();
    assert!(engine.epoch() > epoch);
}

#[test]
fn set_mode_resets_even_to_the_same_mode() {
    let mut engine = GameEngine::seeded(3);
    assert!(engine.place_move(0));
    engine.set_mode(GameMode::Pvp);
    assert!(engine.history().is_empty());
    assert_eq!(engine.mode(), GameMode::Pvp);
}

#[test]
fn randomize_assigns_opposing_marks_in_cpu_mode() {
    let mut engine = GameEngine::seeded(5);
    engine.set_mode(GameMode::VsCpu);
    for _ in 0..20 {
        engine.randomize_starting_player();
        assert_eq!(engine.player_mark(), engine.cpu_mark().opponent());
    }
}

#[test]
fn randomize_keeps_mark_assignment_in_pvp_mode() {
    let mut engine = GameEngine::seeded(5);
    engine.set_mode(GameMode::Pvp);
    for _ in 0..20 {
        engine.randomize_starting_player();
        assert_eq!(engine.player_mark(), Mark::X);
        assert_eq!(engine.cpu_mark(), Mark::O);
    }
}

#[test]
fn status_reports_turns_and_the_winner() {
    let mut engine = GameEngine::seeded(1);
    assert_eq!(engine.status_text(), "Player X's turn");
    assert!(engine.place_move(0));
    assert_eq!(engine.status_text(), "Player O's turn");
    place_all(&mut engine, &[1, 4, 2, 8]);
    assert_eq!(engine.status_text(), "Player X wins!");
}

#[test]
fn status_distinguishes_cpu_and_human_turns() {
    let mut engine = GameEngine::seeded(1);
    engine.set_mode(GameMode::VsCpu);
    assert_eq!(engine.status_text(), "Your turn (X)");
    assert!(engine.place_move(0));
    assert_eq!(engine.status_text(), "CPU's turn (O)");
}

#[test]
fn cpu_plays_through_the_standard_path() {
    let mut engine = GameEngine::seeded(1);
    let mut policy = RandomCpu::seeded(9);
    engine.set_mode(GameMode::VsCpu);
    assert!(engine.place_move(4));

    let index = engine.apply_cpu_move(&mut policy).expect("CPU should move");
    assert_ne!(index, 4);
    assert_eq!(engine.board().get(index), Some(Cell::Occupied(Mark::O)));
    assert_eq!(engine.current_mark(), engine.player_mark());
    assert_eq!(engine.history().len(), 2);
}

#[test]
fn cpu_declines_once_the_game_is_over() {
    let mut engine = GameEngine::seeded(1);
    play_diagonal_win(&mut engine);
    let mut policy = RandomCpu::seeded(9);
    assert_eq!(engine.apply_cpu_move(&mut policy), None);
    assert_eq!(engine.history().len(), 5);
}

#[test]
fn events_flow_to_the_observer() {
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let mut engine = GameEngine::seeded(1).with_events(tx);

    assert!(engine.place_move(0));
    assert_eq!(
        rx.try_recv(),
        Ok(GameEvent::MoveApplied {
            mark: Mark::X,
            index: 0
        })
    );

    engine.set_mode(GameMode::VsCpu);
    assert_eq!(rx.try_recv(), Ok(GameEvent::GameReset));
    assert_eq!(rx.try_recv(), Ok(GameEvent::ModeChanged(GameMode::VsCpu)));
}

#[test]
fn game_over_event_carries_the_outcome() {
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let mut engine = GameEngine::seeded(1).with_events(tx);
    play_diagonal_win(&mut engine);

    let mut saw_game_over = false;
    while let Ok(event) = rx.try_recv() {
        if let GameEvent::GameOver { outcome } = event {
            assert_eq!(outcome, Outcome::Win(Mark::X));
            saw_game_over = true;
        }
    }
    assert!(saw_game_over);
}

#[test]
fn snapshot_serializes_for_a_rendering_shell() {
    let mut engine = GameEngine::seeded(1);
    assert!(engine.place_move(0));

    let snapshot = engine.snapshot();
    let value = serde_json::to_value(&snapshot).expect("snapshot serializes");
    assert_eq!(value["status"], "Player O's turn");
    assert_eq!(value["board"].as_array().map(Vec::len), Some(9));
    assert_eq!(value["history"][0]["index"], 0);
    assert_eq!(value["history"][0]["mark"], "X");
    assert_eq!(value["mode"], "pvp");
    assert!(value["fading"].is_null());
}
