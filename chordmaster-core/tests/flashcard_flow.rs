mod common;

use std::time::Instant;

use chordmaster_core::{CardPhase, KeyboardMode};
use chordmaster_types::note_name_of;

use common::{ms, shell_on, RecordingPlayer};

#[test]
fn test_cmaj7_lights_one_key_per_step() {
    let player = RecordingPlayer::default();
    let mut shell = shell_on("Cmaj7", KeyboardMode::SingleOctave);
    let t0 = Instant::now();

    assert_eq!(shell.phase(), CardPhase::Hidden);
    assert!(shell.reveal(t0, &player));
    assert_eq!(player.notes(), ["C4", "E4", "G4", "B4"]);

    let expected: [&[&str]; 4] = [
        &["C4"],
        &["C4", "E4"],
        &["C4", "E4", "G4"],
        &["C4", "E4", "G4", "B4"],
    ];
    for (k, want) in expected.iter().enumerate() {
        shell.tick(t0 + ms(250 * k as u64 + 10));
        assert_eq!(shell.active_notes().names(), *want, "step {k}");
    }
    assert!(!shell.is_playing());
}

#[test]
fn test_fdim_is_folded_and_sharp_spelled() {
    let player = RecordingPlayer::default();
    let mut shell = shell_on("Fdim", KeyboardMode::SingleOctave);

    let view = shell.keyboard_view();
    assert_eq!(note_name_of(view.range.first), "C4");
    assert_eq!(note_name_of(view.range.last), "C5");
    assert_eq!(view.key_names(), ["F4", "G#4", "B4"]);

    let t0 = Instant::now();
    shell.reveal(t0, &player);
    shell.tick(t0 + ms(2000));
    assert_eq!(shell.active_notes().names(), ["F4", "G#4", "B4"]);
    assert_eq!(player.notes(), ["F4", "G#4", "B4"]);
}

#[test]
fn test_wide_keyboard_keeps_chord_octaves() {
    let player = RecordingPlayer::default();
    let mut shell = shell_on("G7", KeyboardMode::Wide);

    let view = shell.keyboard_view();
    assert_eq!(view.key_names(), ["G4", "B4", "D5", "F5"]);
    assert!(view.keys.iter().all(|k| view.range.contains(*k)));

    shell.reveal(Instant::now(), &player);
    assert_eq!(player.notes(), ["G4", "B4", "D5", "F5"]);
}

#[test]
fn test_replay_restarts_the_arpeggio() {
    let player = RecordingPlayer::default();
    let mut shell = shell_on("Am", KeyboardMode::SingleOctave);
    let t0 = Instant::now();

    shell.reveal(t0, &player);
    shell.tick(t0 + ms(600));
    assert_eq!(shell.active_notes().len(), 3);

    let t1 = t0 + ms(600);
    assert!(shell.replay(t1, &player));
    assert_eq!(shell.active_notes().len(), 1);
    assert_eq!(player.calls.borrow().len(), 6);

    // Nothing from the first pass is left to fire.
    shell.tick(t1 + ms(100));
    assert_eq!(shell.active_notes().len(), 1);
    shell.tick(t1 + ms(510));
    assert_eq!(shell.active_notes().len(), 3);
}

#[test]
fn test_advance_mid_arpeggio_leaves_new_card_dark() {
    let player = RecordingPlayer::default();
    let mut shell = shell_on("Cmaj7", KeyboardMode::SingleOctave);
    let start = shell.index();
    let t0 = Instant::now();

    shell.reveal(t0, &player);
    shell.tick(t0 + ms(260));
    assert_eq!(shell.active_notes().len(), 2);

    let next = shell.advance();
    assert_ne!(next, start);
    assert_eq!(shell.phase(), CardPhase::Hidden);
    assert!(shell.active_notes().is_empty());

    assert!(!shell.tick(t0 + ms(5000)));
    assert!(shell.active_notes().is_empty());
}

#[test]
fn test_flip_walks_through_many_cards_without_repeats() {
    let player = RecordingPlayer::default();
    let mut shell = shell_on("C", KeyboardMode::SingleOctave);
    let mut now = Instant::now();

    for _ in 0..50 {
        let before = shell.index();
        shell.flip(now, &player);
        assert_eq!(shell.phase(), CardPhase::Revealing);
        now += ms(1000);
        shell.tick(now);
        assert_eq!(
            shell.active_notes().len(),
            shell.keyboard_view().key_names().len()
        );
        shell.flip(now, &player);
        assert_eq!(shell.phase(), CardPhase::Hidden);
        assert_ne!(shell.index(), before);
    }
}
