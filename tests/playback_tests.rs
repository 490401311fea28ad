// Integration tests for trace playback

use sortscope::engine::Algorithm;
use sortscope::playback::{Player, Speed};
use sortscope::snapshot::Trace;
use sortscope::step::StepKind;
use sortscope::TraceError;

fn player(algorithm: Algorithm, input: &[f64]) -> Player {
    let trace = Trace::materialize(algorithm.run(input).unwrap()).unwrap();
    Player::new(trace)
}

#[test]
fn test_scrub_forward_and_back() {
    let mut player = player(Algorithm::Quick, &[64.0, 25.0, 12.0, 22.0, 11.0]);
    let len = player.len();
    let forward: Vec<_> = (0..len)
        .map(|i| player.seek(i).unwrap().state.clone())
        .collect();

    let mut backward = Vec::new();
    for i in (0..len).rev() {
        backward.push(player.seek(i).unwrap().state.clone());
    }
    backward.reverse();

    assert_eq!(forward, backward);
    assert_eq!(forward[len - 1], vec![11.0, 12.0, 22.0, 25.0, 64.0]);
}

#[test]
fn test_next_and_previous_stop_at_bounds() {
    let mut player = player(Algorithm::Bubble, &[2.0, 1.0]);
    assert!(!player.previous());
    while player.next() {}
    assert!(player.at_end());
    assert_eq!(player.current().unwrap().kind, StepKind::Complete);
    assert_eq!(player.progress(), (player.len(), player.len()));

    player.reset();
    assert_eq!(player.position(), 0);
    assert_eq!(player.current().unwrap().kind, StepKind::Compare);
}

#[test]
fn test_seek_out_of_range() {
    let mut player = player(Algorithm::Merge, &[3.0, 1.0]);
    let len = player.len();
    player.seek(1).unwrap();

    let err = player.seek(len).unwrap_err();
    assert_eq!(err, TraceError::SeekOutOfRange { index: len, len });
    assert_eq!(player.position(), 1);
}

#[test]
fn test_playback_runs_to_the_end_and_stops() {
    let mut player = player(Algorithm::Insertion, &[4.0, 3.0, 2.0, 1.0]);
    player.set_speed(Speed::VeryFast);
    assert!(player.play());

    let mut ticks = 0;
    while player.tick() {
        ticks += 1;
    }

    assert_eq!(ticks, player.len() - 1);
    assert!(!player.is_playing());
    assert!(player.at_end());
    assert!(!player.play());
    assert_eq!(player.speed().interval_ms(), 20);
}

#[test]
fn test_pause_holds_position() {
    let mut player = player(Algorithm::Selection, &[3.0, 2.0, 1.0]);
    player.play();
    player.tick();
    player.pause();

    assert!(!player.tick());
    assert_eq!(player.position(), 1);
}
