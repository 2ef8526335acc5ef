//! Four-player scenarios on a 16-space ring (H=4, S=4, six-sided die).

use clovek::board::{BoardSpace, SpaceKind};
use clovek::core::{BoardConfig, GameState, PlayerId, PlayerMap};
use clovek::rules::{MoveContainer, MoveKind, MoveSet};

fn new_game() -> GameState {
    GameState::new(
        &["red", "blue", "green", "yellow"],
        BoardConfig::default().with_section_length(4),
    )
    .unwrap()
}

fn ids(state: &GameState) -> [PlayerId; 4] {
    ["red", "blue", "green", "yellow"].map(|name| state.player(name).unwrap())
}

#[test]
fn test_fresh_game() {
    let state = new_game();
    let [red, ..] = ids(&state);

    assert_eq!(state.waiting_counts(), PlayerMap::with_value(4, 4));
    assert_eq!(state.ring_occupancy(), vec![None; 16]);
    assert!(state.enumerate_moves(1, red).unwrap().is_empty());
}

#[test]
fn test_max_roll_releases_every_waiting_piece() {
    let state = new_game();
    let [red, ..] = ids(&state);

    let sets = state.enumerate_moves(6, red).unwrap();
    assert_eq!(sets.len(), 4);

    let mut sources = Vec::new();
    for set in &sets {
        assert_eq!(set.moves().len(), 1);
        let mv = set.primary();
        assert_eq!(mv.from_space.kind, SpaceKind::Waiting);
        assert_eq!(mv.from_space.owner, Some(red));
        assert_eq!(mv.to_space, Some(BoardSpace::main(0)));
        assert_eq!(mv.kind(), Some(MoveKind::LeaveWaiting));
        sources.push(mv.from_space.index);
    }
    sources.sort_unstable();
    assert_eq!(sources, vec![0, 1, 2, 3]);
}

#[test]
fn test_own_piece_blocks_entry() {
    let mut state = new_game();
    let [red, ..] = ids(&state);

    let sets = state.enumerate_moves(6, red).unwrap();
    state.apply_move_set(&sets[0]).unwrap();
    assert_eq!(state.ring_occupancy()[0], Some(red));

    let sets = state.enumerate_moves(6, red).unwrap();
    assert!(sets
        .iter()
        .all(|set| set.primary().from_space.kind != SpaceKind::Waiting));
    // only the piece on the entry space can move
    assert_eq!(sets.len(), 1);
    assert_eq!(sets[0].primary().to_space, Some(BoardSpace::main(6)));
}

#[test]
fn test_leaving_waiting_captures_opponent_on_entry() {
    let mut state = new_game();
    let [red, blue, ..] = ids(&state);

    state.place(SpaceKind::Waiting, 0, Some(blue), None).unwrap();
    state.place(SpaceKind::Main, 0, None, Some(blue)).unwrap();

    let sets = state.enumerate_moves(6, red).unwrap();
    let set = &sets[0];
    assert_eq!(set.moves().len(), 2);

    let primary = set.primary();
    assert_eq!(primary.from_space.kind, SpaceKind::Waiting);
    assert_eq!(primary.to_space, Some(BoardSpace::main(0).occupied(Some(blue))));

    let capture = set.capture().unwrap();
    assert_eq!(
        *capture,
        MoveContainer::new(
            BoardSpace::main(0).occupied(Some(blue)),
            Some(BoardSpace::waiting(blue, 0)),
        )
    );
    assert_eq!(capture.kind(), Some(MoveKind::ReturnToWaiting));

    state.apply_move_set(set).unwrap();
    assert_eq!(state.ring_occupancy()[0], Some(red));
    assert_eq!(state.waiting_counts()[blue], 4);
    assert_eq!(state.waiting_counts()[red], 3);
}

#[test]
fn test_pre_home_turns_into_home_lane() {
    let mut state = new_game();
    let [red, blue, green, yellow] = ids(&state);

    for (player, pre_home) in [(red, 15), (blue, 3), (green, 7), (yellow, 11)] {
        let before = (pre_home + 15) % 16;
        state.place(SpaceKind::Main, before, None, Some(player)).unwrap();
        let from = state.get_space(SpaceKind::Main, before, None).unwrap().unwrap();

        assert_eq!(
            state.resolve_destination(&from, 1).unwrap(),
            Some(BoardSpace::main(pre_home))
        );
        assert_eq!(
            state.resolve_destination(&from, 2).unwrap(),
            Some(BoardSpace::home(player, 0))
        );

        let at_pre_home = BoardSpace::main(pre_home).occupied(Some(player));
        let destination = state.resolve_destination(&at_pre_home, 1).unwrap();
        assert_eq!(destination, Some(BoardSpace::home(player, 0)));
        assert_eq!(
            MoveContainer::new(at_pre_home, destination).kind(),
            Some(MoveKind::SpaceToHome)
        );

        state.place(SpaceKind::Main, before, None, None).unwrap();
    }
}

#[test]
fn test_full_home_lane_wins() {
    let mut state = new_game();
    let [red, blue, green, yellow] = ids(&state);

    for index in 0..4 {
        state.place(SpaceKind::Waiting, index, Some(yellow), None).unwrap();
        state.place(SpaceKind::Home, index, Some(yellow), Some(yellow)).unwrap();
        if index < 3 {
            assert!(!state.is_winner(yellow));
        }
    }

    assert!(state.is_winner(yellow));
    assert!(!state.is_winner(red));
    assert!(!state.is_winner(blue));
    assert!(!state.is_winner(green));
    assert_eq!(state.winner(), Some(yellow));
}

#[test]
fn test_enumeration_is_stable() {
    let mut state = new_game();
    let [red, blue, ..] = ids(&state);
    state.place(SpaceKind::Main, 3, None, Some(red)).unwrap();
    state.place(SpaceKind::Main, 5, None, Some(blue)).unwrap();

    let first: Vec<MoveSet> = state.enumerate_moves(6, red).unwrap();
    let second: Vec<MoveSet> = state.enumerate_moves(6, red).unwrap();
    assert_eq!(first, second);
}
