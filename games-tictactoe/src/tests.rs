use super::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

#[test]
fn test_initial_state() {
    let state = State::new();
    assert_eq!(state.board, [0; 9]);
    assert_eq!(state.current_player, 1);
    assert_eq!(state.winner, 0);
    assert!(!state.is_done());
    assert_eq!(state.acting_agent(), PLAYER_X);
}

#[test]
fn test_legal_moves() {
    let state = State::new();
    let legal = state.legal_moves();
    assert_eq!(legal, (0..9).collect::<Vec<_>>());

    // After one move
    let state = state.make_move(4); // Center
    let legal = state.legal_moves();
    assert_eq!(legal.len(), 8);
    assert!(!legal.contains(&4));
}

#[test]
fn test_make_move_switches_player() {
    let state = State::new();
    let new_state = state.make_move(4); // X places in center

    assert_eq!(new_state.board[4], 1);
    assert_eq!(new_state.current_player, 2); // Now O's turn
    assert_eq!(new_state.acting_agent(), PLAYER_O);
    assert!(!new_state.is_done());
}

#[test]
fn test_invalid_move() {
    let state = State::new();
    let state_with_move = state.make_move(4);

    // Try to place in same position
    let invalid_state = state_with_move.make_move(4);
    assert_eq!(invalid_state, state_with_move); // Should be unchanged
}

#[test]
fn test_winning_game() {
    let mut state = State::new();

    // X wins with top row
    state = state.make_move(0); // X
    state = state.make_move(3); // O
    state = state.make_move(1); // X
    state = state.make_move(4); // O
    state = state.make_move(2); // X wins

    assert_eq!(state.winner, 1);
    assert!(state.is_done());
    assert!(state.legal_moves().is_empty());
    assert_eq!(state.winning_agent(), Some(PLAYER_X));
}

#[test]
fn test_draw_game() {
    // Board: X O X / O X O / O X O
    let state = State {
        board: [1, 2, 1, 2, 1, 2, 2, 1, 2],
        current_player: 1, // Doesn't matter since game is over
        winner: 3,
    };

    let detected_winner = State::check_winner(&state.board);
    assert_eq!(detected_winner, 3); // Should be draw
    assert!(state.is_done());
    assert_eq!(state.winning_agent(), None);
}

#[test]
fn test_evaluate_rewards() {
    // X wins on the left column
    let mut state = State::new();
    for cell in [0, 1, 3, 2, 6] {
        state = state.make_move(cell);
    }
    assert_eq!(state.evaluate(), vec![1.0, 0.0]);

    // Draw pays both halves
    let draw = State {
        board: [1, 2, 1, 2, 1, 2, 2, 1, 2],
        current_player: 1,
        winner: 3,
    };
    assert_eq!(draw.evaluate(), vec![0.5, 0.5]);

    // Ongoing game carries no signal
    assert_eq!(State::new().evaluate(), vec![0.0, 0.0]);
}

#[test]
fn test_evaluate_is_idempotent() {
    let mut state = State::new();
    for cell in [0, 3, 1, 4, 2] {
        state = state.make_move(cell);
    }
    assert!(state.is_done());
    assert_eq!(state.evaluate(), state.evaluate());
}

#[test]
fn test_place_once_round_trip() {
    // An action drawn from legal_actions, applied to a clone, is no longer
    // legal in the successor state: placing consumes the cell.
    let state = State::new();
    for action in state.legal_actions() {
        let mut successor = state;
        successor.apply_action(&action);
        assert!(!successor.legal_actions().contains(&action));
    }
}

#[test]
fn test_random_action_draws_legal() {
    let state = State::new().make_move(4).make_move(0);
    let mut rng = ChaCha20Rng::seed_from_u64(42);

    for _ in 0..20 {
        let action = state.random_action(&mut rng).unwrap();
        assert!(state.legal_actions().contains(&action));
    }
}

#[test]
fn test_random_action_none_when_done() {
    let mut state = State::new();
    for cell in [0, 3, 1, 4, 2] {
        state = state.make_move(cell);
    }
    let mut rng = ChaCha20Rng::seed_from_u64(42);
    assert!(state.random_action(&mut rng).is_none());
}

#[test]
fn test_display_board() {
    let state = State::new().make_move(4);
    let rendered = state.to_string();
    assert!(rendered.contains('X'));
    assert!(!rendered.contains('O'));
}
