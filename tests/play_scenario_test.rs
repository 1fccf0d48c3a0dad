//! End-to-end play-throughs: link in, board played, summary out.

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Instant;
use strictly_connections::{
    ActionOutcome, Difficulty, Group, GroupId, GuessResult, Item, ItemId, LaunchParams, PuzzleAction,
    PuzzleDefinition, PuzzleState, PuzzleStatus, format_summary, share_link,
};
use strictly_connections_cli::{FeedbackKind, PlaySession, default_puzzle, puzzle_for_launch};

/// Groups g1..g4 holding s1..s16 in order.
fn definition() -> PuzzleDefinition {
    let groups = (0..4)
        .map(|g| Group {
            id: GroupId::new(format!("g{}", g + 1)),
            difficulty: Difficulty::ALL[g],
            connection: format!("Connection {}", g + 1),
            members: (0..4).map(|i| ItemId::new(format!("s{}", g * 4 + i + 1))).collect(),
        })
        .collect();
    let items = (0..16)
        .map(|i| Item {
            id: ItemId::new(format!("s{}", i + 1)),
            text: format!("Item {}", i + 1),
            group_id: GroupId::new(format!("g{}", i / 4 + 1)),
            difficulty: Difficulty::ALL[i / 4],
        })
        .collect();
    PuzzleDefinition { groups, items }
}

fn guess(state: &PuzzleState, ids: [&str; 4]) -> PuzzleState {
    ids.iter()
        .fold(state.clone(), |state, id| state.toggle_selection(&ItemId::new(*id)))
        .submit_guess()
        .state
}

#[test]
fn test_losing_play_through() {
    let state = PuzzleState::new_with_rng(definition(), &mut StdRng::seed_from_u64(1));

    let state = guess(&state, ["s1", "s2", "s3", "s4"]);
    assert_eq!(state.solved_group_ids(), &[GroupId::new("g1")]);
    assert_eq!(state.remaining_mistakes(), 4);

    let state = guess(&state, ["s1", "s5", "s9", "s13"]);
    assert_eq!(state.remaining_mistakes(), 3);
    assert_eq!(state.mistake_log().len(), 1);

    let state = guess(&state, ["s2", "s6", "s10", "s14"]);
    let state = guess(&state, ["s3", "s7", "s11", "s15"]);
    let state = guess(&state, ["s4", "s8", "s12", "s16"]);
    assert_eq!(state.remaining_mistakes(), 0);
    assert_eq!(state.status(), PuzzleStatus::Lost);

    let summary = format_summary(&state).unwrap();
    assert_eq!(summary, "Connections\nMistakes: 4/4\n\n🟨🟨🟨🟨");
}

#[test]
fn test_winning_play_through() {
    let state = PuzzleState::new_with_rng(definition(), &mut StdRng::seed_from_u64(2));
    let state = [
        ["s1", "s2", "s3", "s4"],
        ["s5", "s6", "s7", "s8"],
        ["s9", "s10", "s11", "s12"],
        ["s13", "s14", "s15", "s16"],
    ]
    .into_iter()
    .fold(state, |state, ids| guess(&state, ids));

    assert_eq!(state.status(), PuzzleStatus::Won);
    assert_eq!(state.solved_group_ids().len(), 4);
    assert!(format_summary(&state).unwrap().contains("Perfect!"));
}

#[test]
fn test_link_to_finished_session() {
    let url = share_link("https://puzzles.example/play/", &default_puzzle(), false).unwrap();
    let definition = LaunchParams::from_url(&url).puzzle().unwrap();
    assert_eq!(definition, default_puzzle());

    let state = PuzzleState::new_with_rng(definition, &mut StdRng::seed_from_u64(3));
    let mut session = PlaySession::from_state(state, true);
    let now = Instant::now();

    // BASS, FLOUNDER, SALMON with MONET: one away.
    for square in [0, 1, 2, 4] {
        session.dispatch(&PuzzleAction::Toggle(ItemId::positional(square)), now);
    }
    let outcome = session.dispatch(&PuzzleAction::Submit, now);
    assert_eq!(outcome, ActionOutcome::Guess(GuessResult::Incorrect { one_away: true }));
    assert_eq!(session.feedback(now), Some(FeedbackKind::OneAway));

    for group in 0..4 {
        for square in group * 4..group * 4 + 4 {
            session.dispatch(&PuzzleAction::Toggle(ItemId::positional(square)), now);
        }
        session.dispatch(&PuzzleAction::Submit, now);
    }

    let state = session.state();
    assert_eq!(state.status(), PuzzleStatus::Won);
    assert_eq!(
        format_summary(state).unwrap(),
        "Connections\nMistakes: 1/4\n\n🟨🟨🟨🟨\n🟩🟩🟩🟩\n🟦🟦🟦🟦\n🟪🟪🟪🟪"
    );
}

#[test]
fn test_terminal_state_rejects_actions_but_resets() {
    let state = PuzzleState::new_with_rng(definition(), &mut StdRng::seed_from_u64(4));
    let lost = [
        ["s1", "s5", "s9", "s13"],
        ["s2", "s6", "s10", "s14"],
        ["s3", "s7", "s11", "s15"],
        ["s4", "s8", "s12", "s16"],
    ]
    .into_iter()
    .fold(state, |state, ids| guess(&state, ids));
    assert_eq!(lost.status(), PuzzleStatus::Lost);

    for action in [
        PuzzleAction::Toggle(ItemId::new("s1")),
        PuzzleAction::Submit,
        PuzzleAction::Shuffle,
        PuzzleAction::DeselectAll,
    ] {
        let transition = lost.apply(&action);
        assert_eq!(transition.state, lost, "{action} changed a finished puzzle");
    }

    let reset = lost.apply(&PuzzleAction::Reset).state;
    assert_eq!(reset.status(), PuzzleStatus::InProgress);
    assert_eq!(reset.remaining_mistakes(), 4);
}

#[test]
fn test_unbalanced_link_plays_the_built_in_puzzle() {
    let texts: Vec<String> = (0..16).map(|i| format!("\"Item {}\"", i + 1)).collect();
    let json = format!(r#"{{"t":[{}],"g":"0000000000000000"}}"#, texts.join(","));
    let token = lz_str::compress_to_encoded_uri_component(json.as_str());
    let params = LaunchParams::from_link_or_token(&format!("http://localhost/?g={token}"));

    let puzzle = puzzle_for_launch(&params);
    assert_eq!(puzzle, default_puzzle());
    assert!(share_link("http://localhost/", &puzzle, false).is_ok());

    let mut state = PuzzleState::new(puzzle);
    for group in default_puzzle().groups {
        state = group
            .members
            .iter()
            .fold(state, |state, id| state.toggle_selection(id))
            .submit_guess()
            .state;
    }
    assert_eq!(state.status(), PuzzleStatus::Won);
}

#[test]
fn test_valid_link_plays_its_puzzle() {
    let url = share_link("http://localhost/", &definition(), false).unwrap();
    let params = LaunchParams::from_url(&url);
    assert_eq!(puzzle_for_launch(&params), definition());
    assert_eq!(puzzle_for_launch(&LaunchParams::default()), default_puzzle());
}
