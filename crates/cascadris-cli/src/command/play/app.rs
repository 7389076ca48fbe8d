use std::{
    fs::File,
    io::{BufWriter, Write},
};

use cascadris_engine::{Command, GameSession};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};
use ratatui_runtime::{App, Quantum, RenderMode, Runtime};

use crate::{
    record::SessionRecorder,
    ui::widgets::{KeyBinding, KeyBindingDisplay, SessionDisplay},
};

const RENDER_RATE: f64 = 60.0;

const PLAYING_BINDINGS: &[KeyBinding] = &[
    (&["←", "a"], "Left"),
    (&["→", "d"], "Right"),
    (&["↓", "s"], "Drop"),
    (&["↑", "w"], "Rotate"),
    (&["q", "Esc"], "Quit"),
];
const GAME_OVER_BINDINGS: &[KeyBinding] = &[(&["q", "Esc"], "Quit")];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyAction {
    /// An engine input symbol.
    Input(char),
    Quit,
}

fn key_action(key: KeyEvent) -> Option<KeyAction> {
    let command = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Some(KeyAction::Quit);
        }
        KeyCode::Char('q') | KeyCode::Esc => return Some(KeyAction::Quit),
        KeyCode::Left => Command::MoveLeft,
        KeyCode::Right => Command::MoveRight,
        KeyCode::Down => Command::SoftDrop,
        KeyCode::Up => Command::Rotate,
        KeyCode::Char(c) => Command::from_symbol(c.to_ascii_lowercase())?,
        _ => return None,
    };
    Some(KeyAction::Input(command.symbol()))
}

/// Interactive game driven by the runtime's quanta.
///
/// Committed engine events are streamed to the recorder after every quantum.
/// A recorder failure ends the game; the error is returned by
/// [`finish`](Self::finish).
#[derive(Debug)]
pub struct PlayApp<W = BufWriter<File>> {
    session: GameSession,
    recorder: Option<SessionRecorder<W>>,
    error: Option<anyhow::Error>,
    force_redraw: bool,
    is_exiting: bool,
}

impl<W> PlayApp<W>
where
    W: Write,
{
    pub fn new(session: GameSession, recorder: Option<SessionRecorder<W>>) -> Self {
        Self {
            session,
            recorder,
            error: None,
            force_redraw: true,
            is_exiting: false,
        }
    }

    pub fn finish(self) -> anyhow::Result<(GameSession, Option<SessionRecorder<W>>)> {
        if let Some(error) = self.error {
            return Err(error);
        }
        Ok((self.session, self.recorder))
    }

    fn record_events(&mut self) {
        let Some(recorder) = &mut self.recorder else {
            return;
        };
        let tick = self.session.stats().ticks();
        if let Err(error) = recorder.write_events(tick, self.session.drain_events()) {
            self.error = Some(error);
            self.is_exiting = true;
        }
    }
}

impl<W> App for PlayApp<W>
where
    W: Write,
{
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_interval(Some(self.session.config().tick_period));
        runtime.set_render_mode(RenderMode::throttled_from_rate(RENDER_RATE));
        self.session.start();
        self.record_events();
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn update(&mut self, _runtime: &mut Runtime, quantum: Quantum) {
        let mut symbols = vec![];
        for event in &quantum.events {
            if matches!(event, Event::Resize(..)) {
                self.force_redraw = true;
            }
            let key = event
                .as_key_event()
                .filter(|key| key.kind == KeyEventKind::Press);
            match key.and_then(key_action) {
                Some(KeyAction::Input(symbol)) => symbols.push(symbol),
                Some(KeyAction::Quit) => self.is_exiting = true,
                None => {}
            }
        }
        if self.is_exiting {
            return;
        }

        self.session.apply_input(symbols);
        for _ in 0..quantum.ticks {
            self.session.tick();
        }
        self.record_events();
    }

    fn needs_redraw(&mut self) -> bool {
        self.session.take_dirty() | std::mem::take(&mut self.force_redraw)
    }

    fn draw(&self, frame: &mut Frame) {
        let bindings = if self.session.state().is_game_over() {
            GAME_OVER_BINDINGS
        } else {
            PLAYING_BINDINGS
        };
        let [main_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());
        frame.render_widget(SessionDisplay::new(&self.session), main_area);
        frame.render_widget(KeyBindingDisplay::new(bindings), help_area);
    }
}

#[cfg(test)]
mod tests {
    use cascadris_engine::{GameConfig, PieceRng, PieceSeed};

    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn new_app() -> PlayApp<Vec<u8>> {
        let rng = PieceRng::with_seed(PieceSeed::from_u128(0xc0ffee));
        let session = GameSession::new(GameConfig::default(), rng).unwrap();
        let recorder = SessionRecorder::new(Vec::new(), "memory".to_owned());
        PlayApp::new(session, Some(recorder))
    }

    #[test]
    fn test_key_actions() {
        let cases = [
            (KeyCode::Left, Some(KeyAction::Input('a'))),
            (KeyCode::Char('a'), Some(KeyAction::Input('a'))),
            (KeyCode::Right, Some(KeyAction::Input('d'))),
            (KeyCode::Char('D'), Some(KeyAction::Input('d'))),
            (KeyCode::Down, Some(KeyAction::Input('s'))),
            (KeyCode::Up, Some(KeyAction::Input('w'))),
            (KeyCode::Char('q'), Some(KeyAction::Quit)),
            (KeyCode::Esc, Some(KeyAction::Quit)),
            (KeyCode::Char('x'), None),
            (KeyCode::Enter, None),
        ];
        for (code, action) in cases {
            assert_eq!(
                key_action(KeyEvent::new(code, KeyModifiers::NONE)),
                action,
                "{code:?}"
            );
        }
        assert_eq!(
            key_action(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(KeyAction::Quit)
        );
    }

    #[test]
    fn test_update_applies_input_and_records() {
        let mut app = new_app();
        let mut runtime = Runtime::new();
        app.init(&mut runtime);
        assert!(app.needs_redraw());
        assert!(!app.needs_redraw());

        let origin = app.session.active_piece().unwrap().origin();
        app.update(
            &mut runtime,
            Quantum {
                ticks: 1,
                events: vec![key(KeyCode::Down), key(KeyCode::Char('x'))],
            },
        );
        assert_eq!(app.session.active_piece().unwrap().origin().y, origin.y + 1);
        assert_eq!(app.session.stats().ticks(), 1);
        assert!(app.needs_redraw());
        assert!(!app.should_exit());

        let (session, recorder) = app.finish().unwrap();
        let recorder = recorder.unwrap();
        // the first spawn
        assert_eq!(recorder.event_count(), 1);
        assert!(session.state().is_falling());
    }

    #[test]
    fn test_quit_key_exits() {
        let mut app = new_app();
        let mut runtime = Runtime::new();
        app.init(&mut runtime);
        app.update(
            &mut runtime,
            Quantum {
                ticks: 0,
                events: vec![key(KeyCode::Char('q'))],
            },
        );
        assert!(app.should_exit());
    }

    #[test]
    fn test_resize_forces_redraw() {
        let mut app = new_app();
        let mut runtime = Runtime::new();
        app.init(&mut runtime);
        app.needs_redraw();
        app.update(
            &mut runtime,
            Quantum {
                ticks: 0,
                events: vec![Event::Resize(80, 24)],
            },
        );
        assert!(app.needs_redraw());
    }
}
