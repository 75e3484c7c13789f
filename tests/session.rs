use log::info;
use tile_swap_wasm::{
    EngineError, IgnoredMove, ImageRef, ManualClock, MoveOutcome, PuzzleEngine, SessionState,
    SessionSummary, SharedEngine, TileRng,
};

fn new_engine(size: usize, seed: u64) -> (PuzzleEngine<ManualClock>, ManualClock) {
    let clock = ManualClock::new(0);
    let engine = PuzzleEngine::with_parts(
        size,
        ImageRef::new("blob:puzzle"),
        TileRng::from_seed(seed),
        clock.clone(),
    )
    .unwrap();
    (engine, clock)
}

#[test_log::test]
fn test_full_session_three_by_three() {
    let (mut engine, clock) = new_engine(3, 314);
    assert_eq!(engine.permutation(), &[0, 1, 2, 3, 4, 5, 6, 7, 8]);

    assert!(engine.start());
    while engine.is_solved() {
        engine.shuffle();
    }
    assert_eq!(engine.session_state(), SessionState::Running);
    assert_eq!(engine.move_count(), 0);
    info!("scrambled board: {:?}", engine.permutation());

    let mut swaps = 0;
    for pos in 0..9u64 {
        clock.advance(1_500);
        let pos = pos as usize;
        if engine.tile_at(pos) == Some(pos) {
            continue;
        }
        let from = engine.position_of(pos).unwrap();
        let outcome = engine.apply_move(pos, from);
        swaps += 1;
        if engine.is_solved() {
            assert_eq!(
                outcome,
                MoveOutcome::Won(SessionSummary {
                    moves: swaps,
                    elapsed_ms: 1_500 * (pos as u64 + 1),
                })
            );
        } else {
            assert_eq!(outcome, MoveOutcome::Accepted);
        }
    }
    info!("solved in {} swaps", swaps);

    assert_eq!(engine.session_state(), SessionState::Won);
    assert_eq!(engine.move_count(), swaps);
    let summary = engine.summary().unwrap();
    assert_eq!(summary.moves, swaps);

    // Frozen after the win.
    clock.advance(30_000);
    assert_eq!(engine.elapsed(), summary.elapsed());
    assert_eq!(
        engine.apply_move(0, 1),
        MoveOutcome::Ignored(IgnoredMove::NotRunning(SessionState::Won))
    );

    engine.reset();
    let snap = engine.snapshot();
    assert_eq!(snap.state, SessionState::Idle);
    assert_eq!(snap.moves, 0);
    assert_eq!(snap.elapsed_ms, 0);
    assert_eq!(snap.permutation, (0..9).collect::<Vec<_>>());
}

#[test_log::test]
fn test_grid_boundary() {
    let (mut engine, _) = new_engine(3, 1);
    assert_eq!(
        engine.configure(1, ImageRef::new("blob:other")),
        Err(EngineError::InvalidConfiguration { grid_size: 1 })
    );
    assert_eq!(engine.grid_size(), 3);

    engine.configure(2, ImageRef::new("blob:other")).unwrap();
    assert_eq!(engine.permutation(), &[0, 1, 2, 3]);
    assert!(PuzzleEngine::new(1, ImageRef::default()).is_err());
}

#[test_log::test]
fn test_difficulty_change_mid_session() {
    let (mut engine, _) = new_engine(3, 2);
    engine.start();
    engine.apply_move(0, 1);
    engine.set_grid_size(5).unwrap();

    assert_eq!(engine.session_state(), SessionState::Idle);
    assert_eq!(engine.move_count(), 0);
    assert_eq!(engine.permutation().len(), 25);
    assert!(engine.is_solved());
    assert_eq!(engine.image().as_str(), "blob:puzzle");
}

#[test_log::test]
fn test_shared_engine_session() {
    let (engine, _) = new_engine(2, 77);
    let shared = SharedEngine::new(engine);
    assert!(shared.start());

    let other = shared.clone();
    let outcome = std::thread::spawn(move || other.apply_move(0, 3))
        .join()
        .unwrap();
    assert!(outcome.is_counted());
    assert_eq!(shared.snapshot().moves, 1);

    shared.reset();
    assert_eq!(shared.snapshot().state, SessionState::Idle);
}
