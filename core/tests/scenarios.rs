use std::collections::BTreeSet;

use seasweeper_core::*;

fn fixed_session(size: Coord2, mines: &[Coord2]) -> GameSession {
    let config = GameConfig::new(size.0, size.1, mines.len() as CellCount).unwrap();
    GameSession::with_generator(config, FixedMineGenerator::new(mines.iter().copied()))
}

#[test]
fn first_reveal_on_beginner_board_is_safe() {
    for seed in 0..50 {
        let config = Difficulty::Easy.preset().unwrap();
        let mut game = GameSession::with_generator(config, RandomMineGenerator::new(seed));

        let outcome = game.reveal((4, 4));

        assert!(
            matches!(outcome, RevealOutcome::Revealed(_) | RevealOutcome::Won(_)),
            "seed {seed}: {outcome:?}"
        );
        assert_eq!(game.mine_positions().len(), 10);
        for pos in Neighbors::block((4, 4), game.size()) {
            assert!(!game.mine_positions().contains(&pos), "seed {seed}: mine at {pos:?}");
        }
        assert_eq!(game.cell_view((4, 4)).and_then(|view| view.adjacent_mines), Some(0));
    }
}

#[test]
fn single_corner_mine_opens_whole_board() {
    let mut game = fixed_session((5, 5), &[(0, 0)]);

    let outcome = game.reveal((4, 4));

    let RevealOutcome::Won(cells) = outcome else {
        panic!("expected instant win, got {outcome:?}");
    };
    assert_eq!(cells.len(), 24);
    assert!(!cells.contains(&(0, 0)));
    assert_eq!(game.state(), SessionState::Won);
    assert_eq!(game.won_by(), Some(WinCondition::AllSafeRevealed));
    assert_eq!(game.revealed_count(), 24);
    assert!(!game.cell_view((0, 0)).unwrap().revealed);
}

#[test]
fn chord_opens_exactly_the_unflagged_neighbors() {
    let mut game = fixed_session((5, 5), &[(0, 0), (2, 0), (0, 3)]);
    game.reveal((4, 4));

    assert_eq!(game.cell_view((1, 1)).unwrap().adjacent_mines, Some(2));
    assert_eq!(game.toggle_flag((0, 0)), MarkOutcome::Flagged);
    assert_eq!(game.toggle_flag((2, 0)), MarkOutcome::Flagged);
    let before = game.revealed_count();

    let outcome = game.chord((1, 1));

    assert_eq!(
        outcome,
        RevealOutcome::Revealed(BTreeSet::from([(1, 0), (0, 1), (0, 2)]))
    );
    assert_eq!(game.revealed_count(), before + 3);
    assert_eq!(game.state(), SessionState::InProgress);
}

#[test]
fn chord_is_ignored_without_matching_flags() {
    let mut game = fixed_session((5, 5), &[(0, 0), (2, 0), (0, 3)]);
    game.reveal((4, 4));
    game.toggle_flag((0, 0));

    let before = game.snapshot();

    assert_eq!(game.chord((1, 1)), RevealOutcome::Ignored);
    assert_eq!(game.snapshot(), before);
}

#[test]
fn chord_through_wrong_flag_loses() {
    let mut game = fixed_session((5, 5), &[(0, 0), (2, 0), (0, 3)]);
    game.reveal((4, 4));
    game.toggle_flag((0, 0));
    game.toggle_flag((1, 0));

    let outcome = game.chord((1, 1));

    assert_eq!(
        outcome,
        RevealOutcome::HitMine {
            mine: (2, 0),
            revealed: BTreeSet::new()
        }
    );
    assert_eq!(game.state(), SessionState::Lost);
}

#[test]
fn losing_chord_keeps_cells_opened_before_the_mine() {
    // a wall of mines on row 4 keeps the first click's cascade in the bottom rows
    let mines = [(0, 2), (0, 4), (1, 4), (2, 4), (3, 4), (4, 4)];
    let mut game = fixed_session((5, 7), &mines);
    game.reveal((4, 6));
    assert_eq!(
        game.reveal((1, 1)),
        RevealOutcome::Revealed(BTreeSet::from([(1, 1)]))
    );
    game.toggle_flag((0, 0));
    let before = game.revealed_count();

    // row-major order reaches the zero cell (1, 0) well before the mine at (0, 2)
    let outcome = game.chord((1, 1));

    let RevealOutcome::HitMine { mine, revealed } = outcome else {
        panic!("expected the chord to hit a mine, got {outcome:?}");
    };
    assert_eq!(mine, (0, 2));
    for pos in [(1, 0), (2, 0), (4, 0), (0, 1), (2, 2), (4, 3)] {
        assert!(revealed.contains(&pos), "{pos:?} not opened");
    }
    assert!(!revealed.contains(&(0, 3)));
    assert!(revealed.iter().all(|&pos| game.cell_view(pos).is_some_and(|view| view.revealed)));
    assert_eq!(game.revealed_count(), before + revealed.len() as CellCount);
    assert_eq!(game.state(), SessionState::Lost);
    assert_eq!(game.triggered_mine(), Some((0, 2)));
}

#[test]
fn reveal_after_loss_changes_nothing() {
    let mut game = fixed_session((5, 5), &[(0, 0), (2, 0), (0, 3)]);
    game.reveal((4, 4));

    let outcome = game.reveal((0, 3));
    assert!(matches!(outcome, RevealOutcome::HitMine { mine: (0, 3), .. }));
    assert_eq!(game.state(), SessionState::Lost);

    let before = game.snapshot();

    assert_eq!(game.reveal((0, 4)), RevealOutcome::Ignored);
    assert_eq!(game.chord((1, 1)), RevealOutcome::Ignored);
    assert_eq!(game.toggle_flag((0, 4)), MarkOutcome::Ignored);
    assert_eq!(game.snapshot(), before);
    assert!(!game.cell_view((0, 4)).unwrap().revealed);
}

#[test]
fn flag_win_needs_no_extra_reveals() {
    let mut game = fixed_session((5, 5), &[(0, 0), (2, 0), (0, 3)]);
    game.reveal((4, 4));

    game.toggle_flag((0, 0));
    game.toggle_flag((2, 0));
    let outcome = game.toggle_flag((0, 3));

    assert_eq!(outcome, MarkOutcome::Won { flagged: true });
    assert_eq!(game.won_by(), Some(WinCondition::AllMinesFlagged));
    assert!(game.revealed_count() < game.config().safe_cells());
}

#[test]
fn out_of_bounds_moves_are_ignored() {
    let mut game = fixed_session((5, 5), &[(0, 0)]);

    assert_eq!(game.reveal((5, 0)), RevealOutcome::Ignored);
    assert_eq!(game.reveal((0, 200)), RevealOutcome::Ignored);
    assert_eq!(game.toggle_flag((9, 9)), MarkOutcome::Ignored);
    assert_eq!(game.state(), SessionState::NotStarted);
    assert!(game.mine_positions().is_empty());
}
