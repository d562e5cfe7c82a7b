//! Browser side: DOM nodes for the board, keyboard input and the frame loop.
//!
//! The game state lives in a thread-local owned by this module. Each
//! animation frame applies buffered key presses, advances the simulation by
//! the elapsed time and then moves the nodes to match.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, KeyboardEvent, MouseEvent, window};

use crate::config::GameConfig;
use crate::game::{GameEvent, GameState, rng};
use crate::input::{Command, CommandBuffer};

const BOARD_SELECTOR: &str = ".board";
const SCORE_ID: &str = "score";
const START_BUTTON_ID: &str = "startBtn";

struct Session {
    game: GameState,
    view: View,
    input: CommandBuffer,
    last_frame_ms: Option<f64>,
    /// Frame loops belonging to an older session stop when this changes.
    generation: u32,
}

impl Session {
    /// One animation frame. Returns whether the loop should keep running.
    fn frame(&mut self, now_ms: f64) -> bool {
        let elapsed = self.last_frame_ms.map_or(0.0, |last| now_ms - last);
        self.last_frame_ms = Some(now_ms);
        for command in self.input.drain() {
            self.game.apply(command);
        }
        let events = self.game.advance(elapsed);
        if let Err(err) = self.view.sync(&self.game, &events) {
            log::error!("failed to render frame: {err:?}");
        }
        if self.game.is_game_over() {
            self.input.clear();
            return false;
        }
        true
    }
}

/// Buffer `command` for the next frame. A finished game takes no input;
/// its frame loop has stopped and would never drain the buffer.
fn queue_command(game: &GameState, input: &mut CommandBuffer, command: Command) -> bool {
    if game.is_game_over() {
        return false;
    }
    input.push(command);
    true
}

thread_local! {
    static SESSION: RefCell<Option<Session>> = RefCell::new(None);
    static GENERATION: Cell<u32> = Cell::new(0);
    static KEYS_BOUND: Cell<bool> = Cell::new(false);
}

fn document() -> Result<Document, JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    win.document().ok_or_else(|| JsValue::from_str("no document"))
}

fn px(value: f64) -> String {
    format!("{value}px")
}

/// Absolutely positioned `div` of the given class and size.
fn sized_div(doc: &Document, class: &str, width: f64, height: f64) -> Result<HtmlElement, JsValue> {
    let el: HtmlElement = doc.create_element("div")?.dyn_into()?;
    el.set_class_name(class);
    let style = el.style();
    style.set_property("position", "absolute")?;
    style.set_property("width", &px(width))?;
    style.set_property("height", &px(height))?;
    Ok(el)
}

fn place(el: &HtmlElement, left: f64, bottom: f64) -> Result<(), JsValue> {
    let style = el.style();
    style.set_property("left", &px(left))?;
    style.set_property("bottom", &px(bottom))
}

/// Reuse the host page's `.board` or create one, sized from the config.
fn ensure_board(doc: &Document, config: &GameConfig) -> Result<HtmlElement, JsValue> {
    let board: HtmlElement = match doc.query_selector(BOARD_SELECTOR)? {
        Some(el) => el.dyn_into()?,
        None => {
            let el: HtmlElement = doc.create_element("div")?.dyn_into()?;
            el.set_class_name("board");
            let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;
            body.append_child(&el)?;
            el
        }
    };
    let style = board.style();
    style.set_property("position", "relative")?;
    style.set_property("overflow", "hidden")?;
    style.set_property("width", &px(config.board_width))?;
    style.set_property("height", &px(config.board_height))?;
    Ok(board)
}

fn ensure_score(doc: &Document) -> Result<Element, JsValue> {
    if let Some(el) = doc.get_element_by_id(SCORE_ID) {
        return Ok(el);
    }
    let el = doc.create_element("div")?;
    el.set_id(SCORE_ID);
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;
    body.append_child(&el)?;
    Ok(el)
}

/// DOM mirror of a [`GameState`]. One node per platform, keyed by id.
struct View {
    doc: Document,
    board: HtmlElement,
    score: Element,
    doodle: Option<HtmlElement>,
    platforms: HashMap<u64, HtmlElement>,
}

impl View {
    fn new(doc: &Document, game: &GameState) -> Result<Self, JsValue> {
        let config = game.config();
        let board = ensure_board(doc, config)?;
        // leftovers from a previous round, including the game over banner
        board.set_inner_html("");
        let score = ensure_score(doc)?;
        let doodle = match game.doodle() {
            Some(_) => {
                let el = sized_div(doc, "doodle", config.doodle_width, config.doodle_height)?;
                board.append_child(&el)?;
                Some(el)
            }
            None => None,
        };
        let mut view = Self {
            doc: doc.clone(),
            board,
            score,
            doodle,
            platforms: HashMap::with_capacity(config.platform_count),
        };
        view.set_score(game.score());
        view.sync(game, &[])?;
        Ok(view)
    }

    fn set_score(&self, score: u32) {
        self.score.set_text_content(Some(&format!("score {score}")));
    }

    fn show_game_over(&self) -> Result<(), JsValue> {
        let banner = self.doc.create_element("h2")?;
        banner.set_class_name("gameOver");
        banner.set_text_content(Some("GAME OVER"));
        self.board.append_child(&banner)?;
        Ok(())
    }

    fn sync(&mut self, game: &GameState, events: &[GameEvent]) -> Result<(), JsValue> {
        for event in events {
            match event {
                GameEvent::PlatformRecycled { removed, .. } => {
                    if let Some(el) = self.platforms.remove(removed) {
                        el.remove();
                    }
                }
                GameEvent::Landed { score, .. } => self.set_score(*score),
                GameEvent::GameOver { .. } => {
                    if let Some(el) = self.doodle.take() {
                        el.remove();
                    }
                    self.show_game_over()?;
                }
                GameEvent::JumpStarted | GameEvent::FallStarted => {}
            }
        }

        let config = game.config();
        for platform in game.platforms() {
            let el = match self.platforms.get(&platform.id()) {
                Some(el) => el.clone(),
                None => {
                    let el = sized_div(&self.doc, "platform", config.platform_width, config.platform_height)?;
                    self.board.append_child(&el)?;
                    self.platforms.insert(platform.id(), el.clone());
                    el
                }
            };
            place(&el, platform.left(), platform.bottom())?;
        }

        if let (Some(el), Some(doodle)) = (&self.doodle, game.doodle()) {
            place(el, doodle.left(), doodle.bottom())?;
        }
        Ok(())
    }
}

/// Start a fresh game right away, replacing any running one.
pub fn start(config: GameConfig) -> Result<(), JsValue> {
    let doc = document()?;
    let game = GameState::new(config, rng::entropy_seed())?;
    let view = View::new(&doc, &game)?;
    let generation = GENERATION.with(|g| {
        g.set(g.get().wrapping_add(1));
        g.get()
    });

    SESSION.with(|s| {
        s.replace(Some(Session {
            game,
            view,
            input: CommandBuffer::new(),
            last_frame_ms: None,
            generation,
        }))
    });

    bind_keys(&doc)?;
    start_frame_loop(generation);
    Ok(())
}

/// Prepare the board and a start button that removes itself and starts the game.
pub fn mount(config: GameConfig) -> Result<(), JsValue> {
    config.validate()?;
    let doc = document()?;
    ensure_board(&doc, &config)?;
    ensure_score(&doc)?.set_text_content(Some("score 0"));

    let button = match doc.get_element_by_id(START_BUTTON_ID) {
        Some(el) => el,
        None => {
            let el = doc.create_element("button")?;
            el.set_id(START_BUTTON_ID);
            el.set_text_content(Some("Start"));
            let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;
            body.append_child(&el)?;
            el
        }
    };

    let button_click = button.clone();
    let closure = Closure::wrap(Box::new(move |_evt: MouseEvent| {
        button_click.remove();
        if let Err(err) = start(config.clone()) {
            log::error!("failed to start game: {err:?}");
        }
    }) as Box<dyn FnMut(_)>);
    button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Keydown → command buffer. Installed once per page.
fn bind_keys(doc: &Document) -> Result<(), JsValue> {
    if KEYS_BOUND.with(|b| b.replace(true)) {
        return Ok(());
    }
    let closure = Closure::wrap(Box::new(move |evt: KeyboardEvent| {
        let Some(command) = Command::from_key(&evt.key()).or_else(|| Command::from_key_code(evt.key_code()))
        else {
            return;
        };
        SESSION.with(|cell| {
            if let Some(session) = cell.borrow_mut().as_mut() {
                if queue_command(&session.game, &mut session.input, command) {
                    // arrows would otherwise scroll the page
                    evt.prevent_default();
                }
            }
        });
    }) as Box<dyn FnMut(_)>);
    doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_frame_loop(generation: u32) {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        let running = SESSION.with(|cell| match cell.borrow_mut().as_mut() {
            Some(session) if session.generation == generation => session.frame(ts),
            _ => false,
        });
        if running {
            request_frame(&f);
        }
    }) as Box<dyn FnMut(f64)>));
    request_frame(&g);
}

fn request_frame(callback: &FrameCallback) {
    let Some(win) = window() else { return };
    if let Some(cb) = callback.borrow().as_ref() {
        if let Err(err) = win.request_animation_frame(cb.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {err:?}");
        }
    }
}

/// JSON of the running game's snapshot.
#[cfg(feature = "serde_json")]
pub fn snapshot_json() -> Result<String, JsValue> {
    SESSION.with(|cell| {
        let session = cell.borrow();
        let session = session.as_ref().ok_or_else(|| JsValue::from_str("game not started"))?;
        serde_json::to_string(&session.game.snapshot()).map_err(|e| JsValue::from_str(&e.to_string()))
    })
}
