// Integration tests (native) for the `kana-cat` crate.
// Whole sessions are driven through the public `Game` API, playing the role of
// the browser shell: timers are delivered from the tickets in `ArmTimer`
// commands and answers are typed from the catalog's spellings.

use kana_cat::audio::SoundCue;
use kana_cat::rng;
use kana_cat::selector::is_drill_question;
use kana_cat::session::{QUESTIONS_PER_STAGE, START_LIVES};
use kana_cat::storage::{self, MemoryStore};
use kana_cat::timer::{TimerKind, TimerTicket};
use kana_cat::{Catalog, Command, Game, GameState, MissKind, Settings};

fn new_game(settings: Settings, high_score: u32, seed: u64) -> Game {
    Game::new(
        Catalog::builtin().unwrap(),
        settings,
        high_score,
        Box::new(rng::seeded(seed)),
    )
    .unwrap()
}

fn armed(cmds: &[Command], kind: TimerKind) -> Option<TimerTicket> {
    cmds.iter().find_map(|c| match c {
        Command::ArmTimer { ticket, .. } if ticket.kind == kind => Some(*ticket),
        _ => None,
    })
}

/// Run a countdown to completion from the commands that started it.
fn count_down(game: &mut Game, mut cmds: Vec<Command>, now: f64) -> Vec<Command> {
    while let GameState::Countdown { .. } = game.state() {
        let t = armed(&cmds, TimerKind::Countdown).expect("countdown armed");
        cmds = game.on_timer(t, now);
    }
    cmds
}

/// Type `spelling` key by key, returning the commands from the final key.
fn type_word(game: &mut Game, spelling: &str, now: f64) -> Vec<Command> {
    let mut last = Vec::new();
    for c in spelling.chars() {
        last = game.key_press(&c.to_string(), false, now);
    }
    last
}

fn answer_current(game: &mut Game, now: f64) -> Vec<Command> {
    let character = game.prompt().expect("live prompt").character;
    let spelling = game.catalog().spellings(character)[0];
    type_word(game, spelling, now)
}

fn play_stage(game: &mut Game) -> Vec<Command> {
    let mut last = Vec::new();
    for _ in 0..QUESTIONS_PER_STAGE {
        last = answer_current(game, 0.0);
    }
    last
}

fn persisted(cmds: &[Command]) -> Vec<u32> {
    cmds.iter()
        .filter_map(|c| match c {
            Command::PersistHighScore(s) => Some(*s),
            _ => None,
        })
        .collect()
}

#[test]
fn prompt_sequence_follows_drill_and_no_repeat_rules() {
    let mut game = new_game(Settings::default(), 0, 99);
    let cmds = game.start();
    count_down(&mut game, cmds, 0.0);

    let anchors = game.catalog().anchors();
    let mut previous: Option<&str> = None;
    for q in 0..QUESTIONS_PER_STAGE {
        let prompt = game.prompt().unwrap().character;
        assert_eq!(game.session().unwrap().question_count, q);
        if is_drill_question(q) {
            assert!(anchors.contains(&prompt), "question {} should drill an anchor", q);
        } else {
            assert!(!anchors.contains(&prompt), "anchor {} outside a drill", prompt);
            assert_ne!(Some(prompt), previous, "repeated prompt at question {}", q);
        }
        previous = Some(prompt);
        answer_current(&mut game, 0.0);
    }
    assert_eq!(game.state(), GameState::Clear);
}

#[test]
fn every_alternate_spelling_is_accepted() {
    let settings = Settings {
        selected_stages: vec![7],
        ..Settings::default()
    };
    let mut game = new_game(settings, 0, 3);
    let cmds = game.start();
    count_down(&mut game, cmds, 0.0);

    for _ in 0..QUESTIONS_PER_STAGE {
        let character = game.prompt().unwrap().character;
        let spellings = game.catalog().spellings(character);
        let longest = spellings.iter().max_by_key(|s| s.len()).unwrap();
        let cmds = type_word(&mut game, longest, 0.0);
        assert!(cmds.contains(&Command::Sound(SoundCue::Success)));
    }
    assert_eq!(game.session().unwrap().lives, START_LIVES);
    assert_eq!(game.state(), GameState::Clear);
}

#[test]
fn partial_input_only_clicks() {
    let settings = Settings {
        selected_stages: vec![6],
        ..Settings::default()
    };
    let mut game = new_game(settings, 0, 5);
    let cmds = game.start();
    count_down(&mut game, cmds, 0.0);

    // first prompt of a kana stage is never an anchor, so every spelling has two letters
    let character = game.prompt().unwrap().character;
    let first = game.catalog().spellings(character)[0].chars().next().unwrap();
    let cmds = game.key_press(&first.to_ascii_lowercase().to_string(), false, 0.0);
    assert_eq!(cmds, vec![Command::Sound(SoundCue::Keystroke)]);
    assert_eq!(game.typed(), first.to_string());
    assert_eq!(game.prompt().unwrap().character, character);

    // IME composition is ignored entirely
    assert!(game.key_press("A", true, 0.0).is_empty());
    assert_eq!(game.typed(), first.to_string());
}

#[test]
fn running_out_of_lives_ends_the_game_once() {
    let mut game = new_game(Settings::default(), 0, 11);
    let cmds = game.start();
    let mut cmds = count_down(&mut game, cmds, 0.0);

    let mut misses = 0;
    let mut game_overs = 0;
    let mut now = 0.0;
    while game.state() == GameState::Playing {
        now += 10_000.0;
        let t = armed(&cmds, TimerKind::PromptTimeout).expect("prompt timer");
        cmds = game.on_timer(t, now);
        misses += cmds
            .iter()
            .filter(|c| **c == Command::Missed(MissKind::Timeout))
            .count();
        game_overs += cmds
            .iter()
            .filter(|c| **c == Command::Sound(SoundCue::GameOver))
            .count();
    }
    assert_eq!(game.state(), GameState::GameOver);
    assert_eq!(misses, START_LIVES as usize);
    assert_eq!(game_overs, 1);
    assert!(armed(&cmds, TimerKind::PromptTimeout).is_none());
    assert!(game.prompt().is_none());

    let snap = game.snapshot();
    assert_eq!(snap.lives, 0);
    assert_eq!(snap.prompt, None);
}

#[test]
fn fixed_selection_plays_each_stage_in_order() {
    let settings = Settings {
        selected_stages: vec![2, 5, 3],
        ..Settings::default()
    };
    let mut game = new_game(settings, 0, 21);
    let cmds = game.start();
    count_down(&mut game, cmds, 0.0);

    for (i, expected) in [2u8, 5, 3].iter().enumerate() {
        assert_eq!(game.session().unwrap().stage_id, *expected);
        let cmds = play_stage(&mut game);
        if i < 2 {
            assert_eq!(game.state(), GameState::StageClear);
            assert!(cmds.contains(&Command::Sound(SoundCue::StageClear)));
            let cmds = game.continue_stage();
            count_down(&mut game, cmds, 0.0);
        } else {
            assert_eq!(game.state(), GameState::Clear);
            assert!(cmds.contains(&Command::Sound(SoundCue::AllClear)));
        }
    }
    assert_eq!(game.session().unwrap().total_stages_completed, 3);
    // two stage clears, lives were full to begin with
    assert_eq!(game.session().unwrap().lives, START_LIVES + 2);
}

#[test]
fn random_mode_clears_after_target_stages() {
    let settings = Settings {
        selected_stages: vec![1, 2],
        random_mode: true,
        random_target: 3,
        ..Settings::default()
    };
    let mut game = new_game(settings, 0, 8);
    let cmds = game.start();
    count_down(&mut game, cmds, 0.0);

    let mut stage_ids = Vec::new();
    for _ in 0..2 {
        stage_ids.push(game.session().unwrap().stage_id);
        play_stage(&mut game);
        assert_eq!(game.state(), GameState::StageClear);
        let cmds = game.continue_stage();
        count_down(&mut game, cmds, 0.0);
    }
    stage_ids.push(game.session().unwrap().stage_id);
    play_stage(&mut game);

    assert_eq!(game.state(), GameState::Clear);
    assert_eq!(game.session().unwrap().total_stages_completed, 3);
    // stage backgrounds never repeat back to back when there is a choice
    assert!(stage_ids.windows(2).all(|w| w[0] != w[1]));
}

#[test]
fn high_score_is_persisted_only_when_beaten() {
    let mut store = MemoryStore::default();
    assert_eq!(storage::load_high_score(&store), 0);

    // a fast answer at speed 1 is worth 10 points
    let mut game = new_game(Settings::default(), storage::load_high_score(&store), 1);
    let cmds = game.start();
    count_down(&mut game, cmds, 0.0);
    let cmds = answer_current(&mut game, 0.0);
    for score in persisted(&cmds) {
        storage::save_high_score(&mut store, score);
    }
    assert_eq!(store.value(), Some("10"));

    // a slow answer only scores 1 and never touches the store
    let mut replay = new_game(Settings::default(), storage::load_high_score(&store), 2);
    assert_eq!(replay.high_score(), 10);
    let cmds = replay.start();
    count_down(&mut replay, cmds, 0.0);
    let cmds = answer_current(&mut replay, 9_000.0);
    assert!(persisted(&cmds).is_empty());
    assert_eq!(replay.session().unwrap().score, 1);
    assert_eq!(replay.high_score(), 10);
}

#[test]
fn reset_from_stage_clear_returns_to_start() {
    let settings = Settings {
        selected_stages: vec![1, 2],
        ..Settings::default()
    };
    let mut game = new_game(settings, 0, 4);
    let cmds = game.start();
    count_down(&mut game, cmds, 0.0);
    play_stage(&mut game);
    assert_eq!(game.state(), GameState::StageClear);

    game.reset();
    assert_eq!(game.state(), GameState::Start);
    assert!(game.session().is_none());
    assert!(game.set_settings(Settings::default()).is_ok());
    assert!(!game.start().is_empty());
}

#[test]
fn snapshot_serializes_for_the_page() {
    let mut game = new_game(Settings::default(), 42, 6);
    let json = serde_json::to_value(game.snapshot()).unwrap();
    assert_eq!(json["state"]["kind"], "start");
    assert_eq!(json["highScore"], 42);

    let cmds = game.start();
    count_down(&mut game, cmds, 0.0);
    let json = serde_json::to_value(game.snapshot()).unwrap();
    assert_eq!(json["state"]["kind"], "playing");
    assert_eq!(json["stageName"], "Home Row");
    assert_eq!(json["questionsPerStage"], 20);
    assert!(json["prompt"].is_string());
}

#[test]
fn repeated_stage_ids_are_rejected_before_play() {
    let catalog = Catalog::builtin().unwrap();
    let settings =
        Settings::from_json(r#"{"selectedStages":[1,1],"randomMode":true,"randomTarget":2}"#).unwrap();
    assert!(settings.validate(&catalog).is_err());
    assert!(
        Game::new(catalog, settings, 0, Box::new(rng::seeded(1))).is_err(),
        "a game must not start with a repeated stage"
    );
}
