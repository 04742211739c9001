//! Integration tests for gomcts
//!
//! These drive the public API the way a game loop does: vertices in,
//! legality results and scores out, and full searches on small boards.

use gomcts::board::{Board, Color};
use gomcts::constants::{DEFAULT_BOARD_SIZE, PASS_LIMIT};
use gomcts::error::MoveError;
use gomcts::game::{GameState, Move, Winner, parse_move};
use gomcts::mcts::{SearchConfig, SearchTree, Searcher, search_best_move};

// =============================================================================
// Helper functions for setting up test positions
// =============================================================================

/// Play a sequence of vertices on a fresh default-size board.
/// Moves alternate between Black and White; "pass" can be used to pass.
fn setup_game(moves: &[&str]) -> GameState {
    let mut game = GameState::default();
    for mv in moves {
        let parsed = parse_move(mv, game.size()).unwrap();
        if let Err(e) = game.make_move(parsed) {
            panic!("Illegal move {mv} in setup_game: {e}");
        }
    }
    game
}

/// Build a position from text rows with Black to move.
fn from_rows(rows: &[&str]) -> GameState {
    GameState::from_board(Board::from_rows(rows).unwrap())
}

/// Board with a ko shape around (1,1)/(1,2); Black to move can take at (1,2).
fn ko_position() -> GameState {
    from_rows(&[
        ".XO...", //
        "XO.O..", //
        ".XO...", //
        "......", //
        "......", //
        "......",
    ])
}

// =============================================================================
// Valid move enumeration
// =============================================================================

#[test]
fn test_valid_moves_empty_board() {
    let game = GameState::new(6);
    let moves = game.valid_moves();
    assert_eq!(moves.len(), 37, "36 board points + pass");
    assert_eq!(moves[0], Move::Pass, "pass is listed first");
    for row in 0..6 {
        for col in 0..6 {
            assert!(moves.contains(&Move::at(row, col)));
        }
    }
}

#[test]
fn test_valid_moves_filled_board() {
    let game = from_rows(&["XXXXXX"; 6]);
    assert_eq!(game.valid_moves(), vec![Move::Pass]);
}

#[test]
fn test_valid_moves_some_positions_filled() {
    let game = from_rows(&[
        "X.....", //
        "......", //
        "......", //
        "......", //
        "......", //
        ".....O",
    ]);
    let moves = game.valid_moves();
    assert_eq!(moves.len(), 35, "34 board points + pass");
    assert!(!moves.contains(&Move::at(0, 0)));
    assert!(!moves.contains(&Move::at(5, 5)));
}

#[test]
fn test_valid_moves_excludes_suicide_and_ko() {
    let mut game = ko_position();
    game.make_move(Move::at(1, 2)).unwrap();
    let moves = game.valid_moves();
    assert!(!moves.contains(&Move::at(1, 1)), "ko recapture must be excluded");
    assert!(!moves.contains(&Move::at(0, 0)), "suicide must be excluded");
}

#[test]
fn test_valid_moves_leaves_state_unchanged() {
    let game = setup_game(&["C3", "D4", "C4", "pass"]);
    let before = game.clone();
    let _ = game.valid_moves();
    assert_eq!(game, before);
}

// =============================================================================
// Captures
// =============================================================================

#[test]
fn test_surround_capture() {
    let mut game = GameState::new(6);
    game.make_move(Move::at(0, 1)).unwrap(); // B
    game.make_move(Move::at(1, 1)).unwrap(); // W
    game.make_move(Move::at(1, 0)).unwrap(); // B
    game.make_move(Move::Pass).unwrap(); // W
    game.make_move(Move::at(1, 2)).unwrap(); // B
    game.make_move(Move::Pass).unwrap(); // W
    let captured = game.make_move(Move::at(2, 1)).unwrap(); // B

    assert_eq!(captured, vec![(1, 1)]);
    assert_eq!(game.board().get((1, 1)), None, "White stone should be removed");
    assert_eq!(game.captures(Color::Black), 1);
    assert_eq!(game.captures(Color::White), 0);
}

#[test]
fn test_corner_capture_from_vertices() {
    // On a 6x6 board A6 is the top-left corner (0,0).
    let game = setup_game(&["B6", "A6", "A5"]);
    assert_eq!(game.board().get((0, 0)), None);
    assert_eq!(game.captures(Color::Black), 1);
    assert_eq!(game.current_player(), Color::White);
}

#[test]
fn test_group_capture() {
    let mut game = from_rows(&[
        "OO....", //
        "XX....", //
        "......", //
        "......", //
        "......", //
        "......",
    ]);
    let captured = game.make_move(Move::at(0, 2)).unwrap();
    assert_eq!(captured.len(), 2);
    assert!(captured.contains(&(0, 0)) && captured.contains(&(0, 1)));
    assert_eq!(game.captures(Color::Black), 2);
    assert_eq!(game.potential_ko(), None, "multi-stone captures never set ko");
}

#[test]
fn test_stone_conservation_over_random_game() {
    let mut game = GameState::new(6);
    let mut rng = fastrand::Rng::with_seed(2024);
    for _ in 0..150 {
        if game.is_over() {
            break;
        }
        let moves = game.valid_moves();
        let mv = moves[rng.usize(..moves.len())];
        game.make_move(mv).unwrap();

        let removed = game.captures(Color::Black) + game.captures(Color::White);
        assert_eq!(
            game.board().stone_count() + removed,
            game.moves().len(),
            "stones on board plus captures must equal placements"
        );
    }
}

// =============================================================================
// Rejections
// =============================================================================

#[test]
fn test_self_capture_leaves_board_unchanged() {
    let mut game = from_rows(&[
        ".X....", //
        "X.....", //
        "......", //
        "......", //
        "......", //
        "......",
    ]);
    game.make_move(Move::Pass).unwrap();
    let before = game.clone();

    assert_eq!(game.make_move(Move::at(0, 0)), Err(MoveError::SelfCapture));
    assert_eq!(game.board(), before.board());
    assert_eq!(game, before, "rejection must restore the full state");
}

#[test]
fn test_ko_enforcement() {
    let mut game = ko_position();

    // Black takes the ko.
    let captured = game.make_move(Move::at(1, 2)).unwrap();
    assert_eq!(captured, vec![(1, 1)]);
    assert_eq!(game.potential_ko(), Some((1, 2)));
    let after_take = game.clone();

    // White may not retake immediately.
    assert_eq!(game.make_move(Move::at(1, 1)), Err(MoveError::Ko));
    assert_eq!(game, after_take);

    // After an exchange elsewhere the retake is legal.
    game.make_move(Move::at(5, 5)).unwrap();
    assert_eq!(game.potential_ko(), None);
    game.make_move(Move::at(5, 0)).unwrap();
    let captured = game.make_move(Move::at(1, 1)).unwrap();
    assert_eq!(captured, vec![(1, 2)]);
    assert_eq!(game.captures(Color::White), 1);
}

#[test]
fn test_pass_clears_ko() {
    let mut game = ko_position();
    game.make_move(Move::at(1, 2)).unwrap();
    game.make_move(Move::Pass).unwrap();
    assert_eq!(game.potential_ko(), None);
}

#[test]
fn test_out_of_bounds_and_occupied() {
    let mut game = GameState::new(6);
    assert_eq!(
        game.make_move(Move::at(6, 0)),
        Err(MoveError::OutOfBounds { row: 6, col: 0 })
    );
    game.make_move(Move::at(3, 3)).unwrap();
    assert_eq!(
        game.make_move(Move::at(3, 3)),
        Err(MoveError::Occupied { row: 3, col: 3 })
    );
    assert_eq!(game.current_player(), Color::White);
}

// =============================================================================
// Passing and game end
// =============================================================================

#[test]
fn test_four_passes_end_game() {
    let mut game = GameState::new(6);
    for i in 1..=PASS_LIMIT {
        assert!(!game.is_over(), "game ended early after {} passes", i - 1);
        game.make_move(Move::Pass).unwrap();
        assert_eq!(game.pass_counter(), i);
    }
    assert!(game.is_over());
    assert_eq!(game.make_move(Move::Pass), Err(MoveError::GameOver));
    assert_eq!(game.make_move(Move::at(0, 0)), Err(MoveError::GameOver));
    assert!(game.valid_moves().is_empty());
}

#[test]
fn test_stone_resets_pass_counter() {
    let mut game = setup_game(&["pass", "pass", "pass", "C3"]);
    assert_eq!(game.pass_counter(), 0);
    for _ in 0..3 {
        game.make_move(Move::Pass).unwrap();
    }
    assert!(!game.is_over());
}

#[test]
fn test_final_score() {
    let game = setup_game(&["A1", "F6", "pass", "pass", "pass", "pass"]);
    assert!(game.is_over());
    let score = game.score();
    assert_eq!(score.winner, Winner::Tie, "both sides border the only region");
    assert_eq!((score.black, score.white), (0, 0));
}

// =============================================================================
// Cloning
// =============================================================================

#[test]
fn test_clone_is_independent() {
    let game = setup_game(&["C3", "D4"]);
    let mut copy = game.clone();
    copy.make_move(Move::at(0, 0)).unwrap();
    assert_eq!(game.moves().len(), 2);
    assert_eq!(copy.moves().len(), 3);
    assert_eq!(game.board().get((0, 0)), None);
}

// =============================================================================
// Search
// =============================================================================

#[test]
fn test_search_does_not_touch_caller_state() {
    let game = GameState::new(4);
    let before = game.clone();
    let mut rng = fastrand::Rng::with_seed(5);
    let mv = search_best_move(&game, 15, &mut rng);
    assert_eq!(game, before);
    assert!(game.valid_moves().contains(&mv));
}

#[test]
fn test_search_deterministic_under_seed() {
    let game = from_rows(&["X...", ".O..", "....", "...."]);
    let config = SearchConfig {
        iterations: 25,
        seed: Some(77),
        verbose: false,
    };
    let a = Searcher::new(config.clone()).search(&game);
    let b = Searcher::new(config).search(&game);
    assert_eq!(a, b);
}

#[test]
fn test_search_tries_every_root_move() {
    let game = from_rows(&["OX.", "...", "..."]);
    let mut tree = SearchTree::new(&game);
    tree.run(200, &mut fastrand::Rng::with_seed(31));
    let best = tree.best_action();
    assert_eq!(tree.root().visits, 200);
    assert!(tree.untried_actions(SearchTree::ROOT).is_empty());
    assert!(game.valid_moves().contains(&best));
}

#[test]
fn test_default_size() {
    assert_eq!(GameState::default().size(), DEFAULT_BOARD_SIZE);
}
