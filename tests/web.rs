// Browser-only checks for the storage and audio adapters.
// Run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

use kana_cat::audio::{self, SoundCue, WebAudio};
use kana_cat::storage::{self, HIGH_SCORE_KEY, HighScoreStore, LocalStorageStore};

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn local_storage_round_trips_high_score() {
    let mut store = LocalStorageStore::open().unwrap();
    storage::save_high_score(&mut store, 321);
    assert_eq!(store.read().unwrap().as_deref(), Some("321"));
    assert_eq!(storage::load_high_score(&store), 321);

    store.write("not a number").unwrap();
    assert_eq!(storage::load_high_score(&store), 0);

    let raw = web_sys::window()
        .unwrap()
        .local_storage()
        .unwrap()
        .unwrap();
    raw.remove_item(HIGH_SCORE_KEY).unwrap();
    assert_eq!(storage::load_high_score(&store), 0);
}

#[wasm_bindgen_test]
fn web_audio_plays_every_cue() {
    // Autoplay policies may keep the context suspended; scheduling must still succeed.
    let Ok(mut sink) = WebAudio::new() else {
        return;
    };
    for cue in [
        SoundCue::Keystroke,
        SoundCue::Success,
        SoundCue::Miss,
        SoundCue::CountdownTick,
        SoundCue::Go,
        SoundCue::StageClear,
        SoundCue::AllClear,
        SoundCue::GameOver,
    ] {
        audio::play_cue(&mut sink, cue, false);
    }
}
