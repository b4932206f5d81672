#![forbid(unsafe_code)]

//! Deterministic program simulator for testing.
//!
//! `ProgramSimulator` runs a [`Model`] without a real terminal. Events are
//! injected, frames captured, and every [`Cmd`] the model returns is
//! executed in-process: links end up in a [`RecordingUriOpener`] and log
//! commands in [`logs`](ProgramSimulator::logs).
//!
//! ```ignore
//! let mut sim = ProgramSimulator::new(app);
//! sim.init();
//! sim.inject_event(Event::Resize { width: 120, height: 40 });
//! let buf = sim.capture_frame(120, 40);
//! ```

use crate::host::{RecordingUriOpener, UriOpener};
use crate::program::{Cmd, Model};
use folio_core::event::Event;
use folio_render::buffer::Buffer;
use folio_render::frame::Frame;

/// Record of a command that was executed during simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CmdRecord {
    None,
    Quit,
    Msg,
    Batch(usize),
    Log(String),
    OpenUri(String),
}

/// Deterministic simulator for [`Model`] testing.
pub struct ProgramSimulator<M: Model> {
    model: M,
    frames: Vec<Buffer>,
    command_log: Vec<CmdRecord>,
    running: bool,
    logs: Vec<String>,
    opener: RecordingUriOpener,
}

impl<M: Model> ProgramSimulator<M> {
    /// Create a new simulator with the given model.
    ///
    /// The model is not initialized until [`init`](Self::init) is called.
    pub fn new(model: M) -> Self {
        Self {
            model,
            frames: Vec::new(),
            command_log: Vec::new(),
            running: true,
            logs: Vec::new(),
            opener: RecordingUriOpener::new(),
        }
    }

    /// Call `Model::init()` and execute the returned commands.
    pub fn init(&mut self) {
        let cmd = self.model.init();
        self.execute_cmd(cmd);
    }

    /// Inject terminal events into the model, stopping once it quits.
    pub fn inject_events(&mut self, events: &[Event]) {
        for event in events {
            if !self.running {
                break;
            }
            let msg = M::Message::from(event.clone());
            let cmd = self.model.update(msg);
            self.execute_cmd(cmd);
        }
    }

    pub fn inject_event(&mut self, event: Event) {
        self.inject_events(&[event]);
    }

    /// Send a specific message to the model.
    pub fn send(&mut self, msg: M::Message) {
        if !self.running {
            return;
        }
        let cmd = self.model.update(msg);
        self.execute_cmd(cmd);
    }

    /// Render the model into a fresh frame (with a hit grid) and keep the
    /// buffer.
    pub fn capture_frame(&mut self, width: u16, height: u16) -> &Buffer {
        let mut frame = Frame::with_hit_grid(width, height);
        self.model.view(&mut frame);
        self.frames.push(frame.buffer);
        &self.frames[self.frames.len() - 1]
    }

    pub fn frames(&self) -> &[Buffer] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&Buffer> {
        self.frames.last()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Messages emitted through `Cmd::Log`.
    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    /// URIs the model asked the host to open, oldest first.
    pub fn opened_uris(&self) -> &[String] {
        self.opener.requests()
    }

    pub fn command_log(&self) -> &[CmdRecord] {
        &self.command_log
    }

    pub fn clear_frames(&mut self) {
        self.frames.clear();
    }

    fn execute_cmd(&mut self, cmd: Cmd<M::Message>) {
        match cmd {
            Cmd::None => self.command_log.push(CmdRecord::None),
            Cmd::Quit => {
                self.running = false;
                self.command_log.push(CmdRecord::Quit);
            }
            Cmd::Msg(m) => {
                self.command_log.push(CmdRecord::Msg);
                let cmd = self.model.update(m);
                self.execute_cmd(cmd);
            }
            Cmd::Batch(cmds) => {
                self.command_log.push(CmdRecord::Batch(cmds.len()));
                for c in cmds {
                    self.execute_cmd(c);
                    if !self.running {
                        break;
                    }
                }
            }
            Cmd::Log(text) => {
                self.command_log.push(CmdRecord::Log(text.clone()));
                self.logs.push(text);
            }
            Cmd::OpenUri(uri) => {
                self.opener.open_uri(&uri);
                self.command_log.push(CmdRecord::OpenUri(uri));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::event::{KeyCode, KeyEvent};
    use folio_core::geometry::Rect;
    use folio_render::cell::Cell;
    use folio_render::frame::{HitId, HitRegion};

    struct Linker {
        presses: u32,
        size: (u16, u16),
    }

    #[derive(Debug)]
    enum LinkerMsg {
        Press,
        Open,
        Resize(u16, u16),
        Quit,
        Noop,
    }

    impl From<Event> for LinkerMsg {
        fn from(event: Event) -> Self {
            match event {
                Event::Key(k) if k.code == KeyCode::Char('p') => LinkerMsg::Press,
                Event::Key(k) if k.code == KeyCode::Char('o') => LinkerMsg::Open,
                Event::Key(k) if k.code == KeyCode::Char('q') => LinkerMsg::Quit,
                Event::Resize { width, height } => LinkerMsg::Resize(width, height),
                _ => LinkerMsg::Noop,
            }
        }
    }

    impl Model for Linker {
        type Message = LinkerMsg;

        fn init(&mut self) -> Cmd<Self::Message> {
            Cmd::log("ready")
        }

        fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message> {
            match msg {
                LinkerMsg::Press => {
                    self.presses += 1;
                    Cmd::none()
                }
                LinkerMsg::Open => Cmd::batch(vec![
                    Cmd::open_uri("https://example.com"),
                    Cmd::msg(LinkerMsg::Press),
                ]),
                LinkerMsg::Resize(w, h) => {
                    self.size = (w, h);
                    Cmd::none()
                }
                LinkerMsg::Quit => Cmd::quit(),
                LinkerMsg::Noop => Cmd::none(),
            }
        }

        fn view(&self, frame: &mut Frame) {
            let digit = char::from_digit(self.presses % 10, 10).unwrap_or('?');
            frame.buffer.set(0, 0, Cell::from_char(digit));
            frame.register_hit(Rect::new(0, 0, 1, 1), HitId::new(1), HitRegion::Button, 0);
        }
    }

    fn linker() -> ProgramSimulator<Linker> {
        ProgramSimulator::new(Linker {
            presses: 0,
            size: (0, 0),
        })
    }

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c)))
    }

    #[test]
    fn init_executes_commands() {
        let mut sim = linker();
        sim.init();
        assert_eq!(sim.logs(), ["ready"]);
        assert!(sim.is_running());
    }

    #[test]
    fn open_uri_is_recorded_once() {
        let mut sim = linker();
        sim.inject_event(key('o'));

        assert_eq!(sim.opened_uris(), ["https://example.com"]);
        assert_eq!(sim.model().presses, 1);
        assert_eq!(
            sim.command_log(),
            [
                CmdRecord::Batch(2),
                CmdRecord::OpenUri("https://example.com".into()),
                CmdRecord::Msg,
                CmdRecord::None,
            ]
        );
    }

    #[test]
    fn events_after_quit_are_ignored() {
        let mut sim = linker();
        sim.inject_events(&[key('p'), key('q'), key('p')]);
        assert!(!sim.is_running());
        assert_eq!(sim.model().presses, 1);

        sim.send(LinkerMsg::Press);
        assert_eq!(sim.model().presses, 1);
    }

    #[test]
    fn resize_reaches_model() {
        let mut sim = linker();
        sim.inject_event(Event::Resize {
            width: 90,
            height: 30,
        });
        assert_eq!(sim.model().size, (90, 30));
    }

    #[test]
    fn capture_frame_renders_view() {
        let mut sim = linker();
        sim.inject_events(&[key('p'), key('p')]);
        let buf = sim.capture_frame(4, 2);
        assert_eq!(buf.get(0, 0).and_then(|c| c.content.as_char()), Some('2'));

        sim.capture_frame(4, 2);
        assert_eq!(sim.frame_count(), 2);
        assert_eq!(sim.frames()[0], sim.frames()[1]);

        sim.clear_frames();
        assert!(sim.last_frame().is_none());
    }
}
