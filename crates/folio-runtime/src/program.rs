#![forbid(unsafe_code)]

//! Elm-style program runtime.
//!
//! A [`Model`] owns application state. Terminal events are converted into
//! messages, fed through [`Model::update`], and the returned [`Cmd`] is
//! executed by the runtime. After any update the model is asked to redraw
//! itself into a [`Frame`] and only the changed cells are written out.
//!
//! ```ignore
//! use folio_runtime::{Cmd, Model, Program, ProgramConfig, SystemUriOpener};
//!
//! let mut program = Program::new(app, ProgramConfig::default(), Box::new(SystemUriOpener))?;
//! program.run()?;
//! ```

use folio_core::event::Event;
use folio_render::frame::Frame;
use std::time::Duration;

/// The Model trait defines application state and behavior.
pub trait Model: Sized {
    /// The message type for this model.
    ///
    /// Must be convertible from terminal events.
    type Message: From<Event> + Send + 'static;

    /// Called once when the program starts.
    fn init(&mut self) -> Cmd<Self::Message> {
        Cmd::none()
    }

    /// Update the model in response to a message.
    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message>;

    /// Render the current state to a frame.
    fn view(&self, frame: &mut Frame);
}

/// Side effects requested by the model.
#[derive(Default)]
pub enum Cmd<M> {
    /// No operation.
    #[default]
    None,
    /// Quit the application.
    Quit,
    /// Execute commands in order, stopping early on quit.
    Batch(Vec<Cmd<M>>),
    /// Send a message back to the model.
    Msg(M),
    /// Emit a log line through the host's logger.
    Log(String),
    /// Ask the host to open an external link.
    OpenUri(String),
}

impl<M: std::fmt::Debug> std::fmt::Debug for Cmd<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Quit => write!(f, "Quit"),
            Self::Batch(cmds) => f.debug_tuple("Batch").field(cmds).finish(),
            Self::Msg(m) => f.debug_tuple("Msg").field(m).finish(),
            Self::Log(s) => f.debug_tuple("Log").field(s).finish(),
            Self::OpenUri(uri) => f.debug_tuple("OpenUri").field(uri).finish(),
        }
    }
}

impl<M: PartialEq> PartialEq for Cmd<M> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::None, Self::None) | (Self::Quit, Self::Quit) => true,
            (Self::Batch(a), Self::Batch(b)) => a == b,
            (Self::Msg(a), Self::Msg(b)) => a == b,
            (Self::Log(a), Self::Log(b)) | (Self::OpenUri(a), Self::OpenUri(b)) => a == b,
            _ => false,
        }
    }
}

impl<M> Cmd<M> {
    #[inline]
    pub fn none() -> Self {
        Self::None
    }

    #[inline]
    pub fn quit() -> Self {
        Self::Quit
    }

    #[inline]
    pub fn msg(m: M) -> Self {
        Self::Msg(m)
    }

    #[inline]
    pub fn log(msg: impl Into<String>) -> Self {
        Self::Log(msg.into())
    }

    #[inline]
    pub fn open_uri(uri: impl Into<String>) -> Self {
        Self::OpenUri(uri.into())
    }

    /// Combine commands; empty and single-element batches collapse.
    pub fn batch(mut cmds: Vec<Self>) -> Self {
        match cmds.len() {
            0 => Self::None,
            1 => cmds.pop().unwrap_or(Self::None),
            _ => Self::Batch(cmds),
        }
    }

    /// Return a stable name for tracing.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Quit => "Quit",
            Self::Batch(_) => "Batch",
            Self::Msg(_) => "Msg",
            Self::Log(_) => "Log",
            Self::OpenUri(_) => "OpenUri",
        }
    }

    /// Whether this is [`Cmd::None`].
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Runtime configuration for the terminal program.
#[derive(Debug, Clone)]
pub struct ProgramConfig {
    /// Window title set on startup.
    pub title: Option<String>,
    /// Capture mouse clicks and wheel events.
    pub mouse: bool,
    /// Quit automatically after this long.
    pub exit_after: Option<Duration>,
    /// Input poll interval.
    pub poll_interval: Duration,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            title: None,
            mouse: true,
            exit_after: None,
            poll_interval: Duration::from_millis(100),
        }
    }
}

impl ProgramConfig {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn mouse(mut self, enabled: bool) -> Self {
        self.mouse = enabled;
        self
    }

    pub fn exit_after(mut self, after: Option<Duration>) -> Self {
        self.exit_after = after;
        self
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use terminal::Program;

#[cfg(not(target_arch = "wasm32"))]
mod terminal {
    use super::{Cmd, Model, ProgramConfig};
    use crate::host::UriOpener;
    use folio_core::event::Event;
    use folio_core::terminal_session::{SessionOptions, TerminalSession};
    use folio_render::buffer::Buffer;
    use folio_render::diff::BufferDiff;
    use folio_render::frame::Frame;
    use folio_render::presenter::Presenter;
    use std::io::{self, Stdout};
    use std::time::{Duration, Instant};
    use tracing::{debug, info, info_span};

    /// Blocking terminal program.
    ///
    /// Owns the [`TerminalSession`]; dropping the program restores the
    /// terminal.
    pub struct Program<M: Model> {
        model: M,
        config: ProgramConfig,
        opener: Box<dyn UriOpener>,
        presenter: Presenter<Stdout>,
        previous: Option<Buffer>,
        width: u16,
        height: u16,
        running: bool,
        dirty: bool,
        // Declared last so the presenter flushes before the session tears down.
        session: TerminalSession,
    }

    impl<M: Model> Program<M> {
        /// Enter the terminal session and prepare the model.
        ///
        /// # Errors
        ///
        /// Returns an error if the terminal cannot be put into raw mode or
        /// its size cannot be read.
        pub fn new(model: M, config: ProgramConfig, opener: Box<dyn UriOpener>) -> io::Result<Self> {
            let session = TerminalSession::new(SessionOptions {
                alternate_screen: true,
                mouse_capture: config.mouse,
                focus_events: false,
                title: config.title.clone(),
            })?;
            let (width, height) = session.size()?;
            info!(width, height, title = ?config.title, "program started");
            Ok(Self {
                model,
                config,
                opener,
                presenter: Presenter::new(io::stdout()),
                previous: None,
                width,
                height,
                running: true,
                dirty: true,
                session,
            })
        }

        pub fn model(&self) -> &M {
            &self.model
        }

        /// Run until the model quits or the exit timer fires.
        ///
        /// # Errors
        ///
        /// Propagates terminal I/O errors.
        pub fn run(&mut self) -> io::Result<()> {
            let started = Instant::now();
            let cmd = {
                let _span = info_span!("folio.program.init").entered();
                self.model.init()
            };
            self.execute_cmd(cmd);

            // The model learns its size through the same path as later resizes.
            self.handle_event(Event::Resize {
                width: self.width,
                height: self.height,
            })?;
            self.render_if_dirty()?;

            while self.running {
                let timeout = match self.config.exit_after {
                    Some(limit) => {
                        let elapsed = started.elapsed();
                        if elapsed >= limit {
                            info!(?limit, "exit timer elapsed");
                            break;
                        }
                        (limit - elapsed).min(self.config.poll_interval)
                    }
                    None => self.config.poll_interval,
                };

                if self.session.poll_event(timeout)? {
                    loop {
                        if let Some(event) = self.session.read_event()? {
                            self.handle_event(event)?;
                        }
                        if !self.running || !self.session.poll_event(Duration::ZERO)? {
                            break;
                        }
                    }
                }
                self.render_if_dirty()?;
            }
            info!("program finished");
            Ok(())
        }

        fn handle_event(&mut self, event: Event) -> io::Result<()> {
            if let Event::Resize { width, height } = event {
                self.width = width;
                self.height = height;
                self.previous = None;
                self.presenter.clear_screen()?;
            }
            let cmd = self.model.update(M::Message::from(event));
            self.execute_cmd(cmd);
            self.dirty = true;
            Ok(())
        }

        fn execute_cmd(&mut self, cmd: Cmd<M::Message>) {
            match cmd {
                Cmd::None => {}
                Cmd::Quit => {
                    debug!("quit requested");
                    self.running = false;
                }
                Cmd::Batch(cmds) => {
                    for cmd in cmds {
                        self.execute_cmd(cmd);
                        if !self.running {
                            break;
                        }
                    }
                }
                Cmd::Msg(msg) => {
                    let cmd = self.model.update(msg);
                    self.execute_cmd(cmd);
                }
                Cmd::Log(text) => info!(target: "folio::model", "{text}"),
                Cmd::OpenUri(uri) => {
                    info!(uri = %uri, "opening link");
                    self.opener.open_uri(&uri);
                }
            }
        }

        fn render_if_dirty(&mut self) -> io::Result<()> {
            if !self.dirty || !self.running {
                return Ok(());
            }
            let _span = tracing::debug_span!("folio.program.render", width = self.width, height = self.height)
                .entered();

            let mut frame = Frame::with_hit_grid(self.width, self.height);
            self.model.view(&mut frame);

            let diff = match &self.previous {
                Some(previous) => BufferDiff::compute(previous, &frame.buffer),
                None => BufferDiff::full(frame.width(), frame.height()),
            };
            if !diff.is_empty() {
                self.presenter.present(&frame.buffer, &diff)?;
            }
            self.previous = Some(frame.buffer);
            self.dirty = false;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_collapses() {
        assert!(Cmd::<()>::batch(vec![]).is_none());
        assert_eq!(Cmd::<()>::batch(vec![Cmd::Quit]), Cmd::Quit);
        assert_eq!(
            Cmd::<()>::batch(vec![Cmd::Quit, Cmd::log("x")]).type_name(),
            "Batch"
        );
    }

    #[test]
    fn constructors() {
        assert_eq!(Cmd::<()>::open_uri("https://x"), Cmd::OpenUri("https://x".into()));
        assert_eq!(Cmd::<()>::log("hi"), Cmd::Log("hi".into()));
        assert_eq!(Cmd::msg(3u8), Cmd::Msg(3));
        assert_eq!(Cmd::<()>::default(), Cmd::None);
    }

    #[test]
    fn debug_names_uri() {
        let text = format!("{:?}", Cmd::<()>::open_uri("https://x"));
        assert_eq!(text, "OpenUri(\"https://x\")");
    }

    #[test]
    fn config_builders() {
        let config = ProgramConfig::default()
            .title("folio")
            .mouse(false)
            .exit_after(Some(Duration::from_millis(5)));
        assert_eq!(config.title.as_deref(), Some("folio"));
        assert!(!config.mouse);
        assert_eq!(config.exit_after, Some(Duration::from_millis(5)));
    }
}
