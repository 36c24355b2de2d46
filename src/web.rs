//! Browser shell around the sans-IO `Game`.
//!
//! Owns everything the state machine refuses to: the canvas, DOM overlays,
//! the keydown listener, real `setTimeout` handles behind `Command::ArmTimer`,
//! Web Audio playback, local storage and the effect list. The shell lives in a
//! thread-local so timer and event callbacks can reach it; every callback
//! borrows it, feeds the game, then applies the returned commands.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent, window};

use crate::audio::{self, SoundCue, WebAudio};
use crate::catalog::Catalog;
use crate::effects::{EffectKind, EffectList, EffectRequest};
use crate::error::GameError;
use crate::game::{Command, Game, GameState, MissKind, Snapshot};
use crate::performance_now;
use crate::rng;
use crate::session::MAX_LIVES;
use crate::settings::Settings;
use crate::storage::{self, HighScoreStore, LocalStorageStore, MemoryStore};
use crate::timer::{TimerKind, TimerTicket};

const CANVAS_W: f64 = 640.0;
const CANVAS_H: f64 = 480.0;
const DEFAULT_BACKGROUND: &str = "#181818";
const MISS_BANNER_MS: f64 = 700.0;

struct Shell {
    game: Game,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    effects: EffectList,
    store: Box<dyn HighScoreStore>,
    // Created lazily on the first key press; browsers keep contexts made
    // before a user gesture suspended.
    audio: Option<WebAudio>,
    timers: PendingTimers<Closure<dyn FnMut()>>,
    muted: bool,
    show_hands: bool,
    last_miss: Option<(MissKind, f64)>,
}

/// A pending `setTimeout` and the callback it will run.
struct ArmedTimer<C> {
    ticket: TimerTicket,
    handle: i32,
    _callback: C,
}

/// Owns the callback of every armed timer so clearing one drops (and frees)
/// its closure. The callback of the last delivered timer is parked in `fired`
/// until the next delivery because it may still be running.
struct PendingTimers<C> {
    armed: HashMap<TimerKind, ArmedTimer<C>>,
    fired: Option<ArmedTimer<C>>,
}

impl<C> Default for PendingTimers<C> {
    fn default() -> Self {
        Self {
            armed: HashMap::new(),
            fired: None,
        }
    }
}

impl<C> PendingTimers<C> {
    fn insert(&mut self, ticket: TimerTicket, handle: i32, callback: C) {
        self.armed.insert(
            ticket.kind,
            ArmedTimer {
                ticket,
                handle,
                _callback: callback,
            },
        );
    }

    /// Forget `kind`, dropping its callback; returns the handle to clear.
    fn remove(&mut self, kind: TimerKind) -> Option<i32> {
        self.armed.remove(&kind).map(|armed| armed.handle)
    }

    /// Move the live entry for `ticket` to the fired slot.
    fn mark_fired(&mut self, ticket: TimerTicket) {
        if self.armed.get(&ticket.kind).is_some_and(|t| t.ticket == ticket) {
            self.fired = self.armed.remove(&ticket.kind);
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.armed.len() + usize::from(self.fired.is_some())
    }
}

thread_local! {
    static SHELL: RefCell<Option<Shell>> = RefCell::new(None);
    static LISTENING: Cell<bool> = Cell::new(false);
}

/// Build (or rebuild) the shell and start the render loop.
pub fn start(settings_json: Option<&str>) -> Result<(), GameError> {
    let win = window().ok_or_else(|| GameError::Js("no window".into()))?;
    let doc = win
        .document()
        .ok_or_else(|| GameError::Js("no document".into()))?;

    let catalog = Catalog::builtin()?;
    let settings = parse_settings(settings_json, &catalog);

    let store: Box<dyn HighScoreStore> = match LocalStorageStore::open() {
        Ok(store) => Box::new(store),
        Err(err) => {
            log::warn!("{}; high score kept in memory only", err);
            Box::new(MemoryStore::default())
        }
    };
    let high_score = storage::load_high_score(store.as_ref());

    let canvas = ensure_canvas(&doc, settings.scale)?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(GameError::js)?
        .ok_or_else(|| GameError::Js("2d context unavailable".into()))?
        .dyn_into()
        .map_err(|_| GameError::Js("2d context has unexpected type".into()))?;
    ctx.set_text_align("center");

    let muted = settings.muted;
    let show_hands = settings.show_hands;
    let game = Game::new(catalog, settings, high_score, Box::new(rng::from_entropy()))?;
    let shell = Shell {
        game,
        canvas,
        ctx,
        effects: EffectList::new(performance_now() as u64),
        store,
        audio: None,
        timers: PendingTimers::default(),
        muted,
        show_hands,
        last_miss: None,
    };

    // A second start replaces the first; its pending timers must not fire into the new game.
    SHELL.with(|cell| {
        if let Some(old) = cell.borrow_mut().as_mut() {
            let cmds = old.game.teardown();
            apply(old, cmds, performance_now());
        }
        cell.replace(Some(shell));
    });

    ensure_overlays(&doc)?;
    if !LISTENING.with(|l| l.replace(true)) {
        install_key_listener(&doc)?;
        start_render_loop();
    }
    log::info!("kana-cat: initialized (high score {})", high_score);
    Ok(())
}

/// Return to the start screen.
pub fn reset() {
    with_shell(|shell, now| {
        let cmds = shell.game.reset();
        shell.effects.clear();
        apply(shell, cmds, now);
    });
}

/// Clear every pending timer; the shell stays on its current screen.
pub fn stop() {
    with_shell(|shell, now| {
        let cmds = shell.game.teardown();
        apply(shell, cmds, now);
    });
}

pub fn set_muted(muted: bool) {
    with_shell(|shell, _| shell.muted = muted);
}

pub fn snapshot_json() -> Result<String, GameError> {
    let snap = SHELL.with(|cell| cell.borrow().as_ref().map(|s| s.game.snapshot()));
    match snap {
        Some(snap) => Ok(serde_json::to_string(&snap)?),
        None => Err(GameError::Js("game not started".into())),
    }
}

fn with_shell(f: impl FnOnce(&mut Shell, f64)) {
    let now = performance_now();
    SHELL.with(|cell| {
        if let Some(shell) = cell.borrow_mut().as_mut() {
            f(shell, now);
        }
    });
}

fn parse_settings(json: Option<&str>, catalog: &Catalog) -> Settings {
    let Some(json) = json else {
        return Settings::default();
    };
    match Settings::from_json(json).and_then(|s| s.validate(catalog).map(|_| s)) {
        Ok(settings) => settings,
        Err(err) => {
            log::warn!("settings rejected ({}), using defaults", err);
            Settings::default()
        }
    }
}

// --- Commands ---------------------------------------------------------------

fn apply(shell: &mut Shell, cmds: Vec<Command>, now: f64) {
    for cmd in cmds {
        match cmd {
            Command::ArmTimer { ticket, delay_ms } => shell.arm_timer(ticket, delay_ms),
            Command::CancelTimer(kind) => shell.clear_timer(kind),
            Command::Sound(cue) => shell.play(cue),
            Command::Effect(request) => shell.spawn_effect(request, now),
            Command::PersistHighScore(score) => {
                storage::save_high_score(shell.store.as_mut(), score)
            }
            Command::Missed(kind) => shell.last_miss = Some((kind, now)),
        }
    }
}

fn deliver_timer(ticket: TimerTicket) {
    with_shell(|shell, now| {
        shell.timers.mark_fired(ticket);
        let cmds = shell.game.on_timer(ticket, now);
        apply(shell, cmds, now);
    });
}

impl Shell {
    fn arm_timer(&mut self, ticket: TimerTicket, delay_ms: f64) {
        self.clear_timer(ticket.kind);
        let Some(win) = window() else {
            return;
        };
        let callback = Closure::wrap(Box::new(move || deliver_timer(ticket)) as Box<dyn FnMut()>);
        match win.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            delay_ms.round() as i32,
        ) {
            Ok(handle) => self.timers.insert(ticket, handle, callback),
            Err(err) => log::warn!("could not arm {:?} timer: {:?}", ticket.kind, err),
        }
    }

    fn clear_timer(&mut self, kind: TimerKind) {
        if let Some(handle) = self.timers.remove(kind) {
            if let Some(win) = window() {
                win.clear_timeout_with_handle(handle);
            }
        }
    }

    fn play(&mut self, cue: SoundCue) {
        if self.muted {
            return;
        }
        if self.audio.is_none() {
            match WebAudio::new() {
                Ok(sink) => self.audio = Some(sink),
                Err(err) => {
                    log::warn!("audio disabled: {}", err);
                    self.muted = true;
                    return;
                }
            }
        }
        if let Some(sink) = self.audio.as_mut() {
            audio::play_cue(sink, cue, self.muted);
        }
    }

    fn spawn_effect(&mut self, request: EffectRequest, now: f64) {
        let (x, y) = match request {
            EffectRequest::ScorePopup { .. } => (CANVAS_W / 2.0, CANVAS_H / 2.0 - 90.0),
            _ => (CANVAS_W / 2.0, CANVAS_H / 2.0 - 20.0),
        };
        self.effects.spawn(request, x, y, now);
    }
}

/// What Enter / Space does on each screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EnterAction {
    Start,
    Continue,
    Return,
}

impl EnterAction {
    fn for_state(state: GameState) -> Option<Self> {
        match state {
            GameState::Start => Some(EnterAction::Start),
            GameState::StageClear => Some(EnterAction::Continue),
            GameState::Clear | GameState::GameOver => Some(EnterAction::Return),
            GameState::Countdown { .. } | GameState::Playing => None,
        }
    }

    /// On-canvas instruction for the screen this action belongs to.
    fn caption(self) -> &'static str {
        match self {
            EnterAction::Start => "Press Enter to start",
            EnterAction::Continue => "Enter to continue",
            EnterAction::Return => "Enter to return to the start screen",
        }
    }
}

// --- DOM setup ----------------------------------------------------------------

fn ensure_canvas(doc: &Document, scale: f64) -> Result<HtmlCanvasElement, GameError> {
    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id("kc-canvas") {
        el.dyn_into()
            .map_err(|_| GameError::Js("#kc-canvas is not a canvas".into()))?
    } else {
        let c: HtmlCanvasElement = doc
            .create_element("canvas")
            .map_err(GameError::js)?
            .dyn_into()
            .map_err(|_| GameError::Js("created element is not a canvas".into()))?;
        c.set_id("kc-canvas");
        c.set_width(CANVAS_W as u32);
        c.set_height(CANVAS_H as u32);
        doc.body()
            .ok_or_else(|| GameError::Js("no body".into()))?
            .append_child(&c)
            .map_err(GameError::js)?;
        c
    };
    canvas
        .set_attribute(
            "style",
            &format!(
                "position:fixed; left:50%; top:45%; transform:translate(-50%,-50%) scale({}); \
                 box-shadow:0 0 32px 0 rgba(0,0,0,0.18); border-radius:18px; border:2px solid #222; z-index:20;",
                scale
            ),
        )
        .ok();
    Ok(canvas)
}

fn ensure_overlays(doc: &Document) -> Result<(), GameError> {
    let Some(body) = doc.body() else {
        return Ok(());
    };
    let overlays = [
        ("kc-score", "top:10px; left:12px; color:#ffd166;"),
        ("kc-lives", "top:10px; left:230px; color:#ff4d4d;"),
        ("kc-hint", "bottom:40px; left:50%; transform:translateX(-50%); color:#a8dadc;"),
    ];
    for (id, placement) in overlays {
        if doc.get_element_by_id(id).is_some() {
            continue;
        }
        let div = doc.create_element("div").map_err(GameError::js)?;
        div.set_id(id);
        div.set_attribute(
            "style",
            &format!(
                "position:fixed; {} font-family:'Fira Code', monospace; font-size:15px; padding:4px 8px; \
                 background:rgba(0,0,0,0.42); border:1px solid #333; border-radius:6px; z-index:45;",
                placement
            ),
        )
        .ok();
        body.append_child(&div).map_err(GameError::js)?;
    }
    Ok(())
}

fn install_key_listener(doc: &Document) -> Result<(), GameError> {
    let closure = Closure::wrap(Box::new(move |evt: KeyboardEvent| {
        if evt.repeat() {
            return;
        }
        let key = evt.key();
        let composing = evt.is_composing();
        with_shell(|shell, now| {
            let cmds = match key.as_str() {
                "Escape" => {
                    shell.effects.clear();
                    shell.game.reset()
                }
                "Enter" | " " => match EnterAction::for_state(shell.game.state()) {
                    Some(EnterAction::Start) => shell.game.start(),
                    Some(EnterAction::Continue) => shell.game.continue_stage(),
                    Some(EnterAction::Return) => shell.game.reset(),
                    None => Vec::new(),
                },
                other => shell.game.key_press(other, composing, now),
            };
            if !cmds.is_empty() {
                evt.prevent_default();
            }
            apply(shell, cmds, now);
        });
    }) as Box<dyn FnMut(_)>);
    doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
        .map_err(GameError::js)?;
    closure.forget();
    Ok(())
}

// --- Frame loop -----------------------------------------------------------------

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_render_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        SHELL.with(|cell| {
            if let Some(shell) = cell.borrow_mut().as_mut() {
                frame(shell, ts);
            }
        });
        if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let (Some(w), Some(cb)) = (window(), g.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

fn frame(shell: &mut Shell, now: f64) {
    shell.effects.prune(now);
    let snap = shell.game.snapshot();
    render(shell, &snap, now);
    update_overlays(&snap, shell.show_hands);
}

fn render(shell: &Shell, snap: &Snapshot, now: f64) {
    let ctx = &shell.ctx;
    let (w, h) = (shell.canvas.width() as f64, shell.canvas.height() as f64);
    ctx.set_global_alpha(1.0);
    ctx.set_fill_style_str(snap.background.unwrap_or(DEFAULT_BACKGROUND));
    ctx.fill_rect(0.0, 0.0, w, h);

    ctx.set_fill_style_str("#ffffff");
    match snap.state {
        GameState::Start => {
            text(ctx, "32px 'Fira Code', monospace", EnterAction::Start.caption(), w / 2.0, h / 2.0);
            text(
                ctx,
                "18px 'Fira Code', monospace",
                &format!("High score {}", snap.high_score),
                w / 2.0,
                h / 2.0 + 44.0,
            );
        }
        GameState::Countdown { remaining } => {
            text(ctx, "120px 'Fira Code', monospace", &remaining.to_string(), w / 2.0, h / 2.0 + 40.0);
        }
        GameState::Playing => {
            if let Some(prompt) = snap.prompt {
                text(ctx, "140px 'Noto Sans JP', sans-serif", prompt, w / 2.0, h / 2.0 + 30.0);
            }
            ctx.set_fill_style_str("#ffd166");
            text(ctx, "28px 'Fira Code', monospace", &snap.typed, w / 2.0, h / 2.0 + 100.0);
            if let Some(deadline) = snap.deadline_ms {
                let total = crate::scorer::timeout_ms(shell.game.settings().speed);
                let left = ((deadline - now) / total).clamp(0.0, 1.0);
                ctx.set_fill_style_str("rgba(255,255,255,0.7)");
                ctx.fill_rect(40.0, h - 30.0, (w - 80.0) * left, 8.0);
            }
            text(
                ctx,
                "16px 'Fira Code', monospace",
                &format!("{} / {}", snap.question + 1, snap.questions_per_stage),
                w / 2.0,
                40.0,
            );
        }
        GameState::StageClear => {
            text(ctx, "40px 'Fira Code', monospace", "Stage clear!", w / 2.0, h / 2.0);
            text(ctx, "18px 'Fira Code', monospace", EnterAction::Continue.caption(), w / 2.0, h / 2.0 + 44.0);
        }
        GameState::Clear | GameState::GameOver => {
            let title = if snap.state == GameState::Clear { "All clear!" } else { "Game over" };
            text(ctx, "44px 'Fira Code', monospace", title, w / 2.0, h / 2.0);
            text(
                ctx,
                "18px 'Fira Code', monospace",
                &format!("Score {}", snap.score),
                w / 2.0,
                h / 2.0 + 44.0,
            );
            text(ctx, "16px 'Fira Code', monospace", EnterAction::Return.caption(), w / 2.0, h / 2.0 + 76.0);
        }
    }

    if let Some((kind, at)) = shell.last_miss {
        if now - at < MISS_BANNER_MS {
            let label = match kind {
                MissKind::Mismatch => "Miss!",
                MissKind::Timeout => "Too slow!",
            };
            ctx.set_fill_style_str("#ff6b6b");
            text(ctx, "24px 'Fira Code', monospace", label, w / 2.0, 90.0);
        }
    }

    render_effects(ctx, &shell.effects, w, h, now);
    ctx.set_global_alpha(1.0);
}

fn render_effects(ctx: &CanvasRenderingContext2d, effects: &EffectList, w: f64, h: f64, now: f64) {
    for e in effects.iter() {
        ctx.set_global_alpha(e.alpha(now));
        let (x, y) = e.position(now);
        match e.kind {
            EffectKind::Particle { hue, .. } => {
                ctx.set_fill_style_str(&format!("hsl({:.0},90%,65%)", hue));
                ctx.begin_path();
                if ctx.arc(x, y, 4.0, 0.0, std::f64::consts::TAU).is_ok() {
                    ctx.fill();
                }
            }
            EffectKind::ScorePopup { points } => {
                ctx.set_fill_style_str("#ffd166");
                text(ctx, "26px 'Fira Code', monospace", &format!("+{}", points), x, y);
            }
            EffectKind::MissFlash => {
                ctx.set_fill_style_str("rgba(255,60,60,0.35)");
                ctx.fill_rect(0.0, 0.0, w, h);
            }
        }
    }
}

fn text(ctx: &CanvasRenderingContext2d, font: &str, s: &str, x: f64, y: f64) {
    ctx.set_font(font);
    ctx.fill_text(s, x, y).ok();
}

fn update_overlays(snap: &Snapshot, show_hands: bool) {
    let Some(doc) = window().and_then(|w| w.document()) else {
        return;
    };
    if let Some(el) = doc.get_element_by_id("kc-score") {
        el.set_text_content(Some(&format!("Score: {}  Best: {}", snap.score, snap.high_score)));
    }
    if let Some(el) = doc.get_element_by_id("kc-lives") {
        let filled = snap.lives.min(MAX_LIVES) as usize;
        el.set_text_content(Some(&format!(
            "{}{}",
            "♥".repeat(filled),
            "♡".repeat(MAX_LIVES as usize - filled)
        )));
    }
    if let Some(el) = doc.get_element_by_id("kc-hint") {
        let hint = match (show_hands, snap.next_key, snap.finger) {
            (true, Some(key), Some(finger)) => format!("{} · {}", key, finger.label()),
            _ => String::new(),
        };
        el.set_text_content(Some(&hint));
    }
}
