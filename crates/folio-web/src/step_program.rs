#![forbid(unsafe_code)]

//! Step-based program runner for the browser.
//!
//! [`StepProgram`] drives a [`Model`] through init / event / update / view
//! cycles without threads or blocking. The host controls the loop:
//!
//! 1. Push events via [`StepProgram::push_event`], or handle them at once
//!    via [`StepProgram::dispatch`].
//! 2. Call [`StepProgram::step`] to process queued events and render.
//! 3. Read the frame and open requests via [`StepProgram::take_outputs`].
//!
//! ```ignore
//! let mut prog = StepProgram::new(app, 120, 40);
//! prog.init()?;
//! prog.push_event(Event::Resize { width: 90, height: 40 });
//! let result = prog.step()?;
//! if result.rendered {
//!     let cells = prog.outputs().flat_cells();
//! }
//! ```

use std::collections::VecDeque;

use folio_core::event::Event;
use folio_render::buffer::Buffer;
use folio_render::diff::BufferDiff;
use folio_render::frame::Frame;
use folio_runtime::{Cmd, Model, RecordingUriOpener, UriOpener};
use tracing::{debug, info};

use crate::{WebBackendError, WebOutputs};

/// Result of a single [`StepProgram::step`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Whether the program is still running (false after `Cmd::Quit`).
    pub running: bool,
    /// Whether a frame was rendered during this step.
    pub rendered: bool,
    /// Number of events processed during this step.
    pub events_processed: u32,
    /// Current frame index (monotonically increasing).
    pub frame_idx: u64,
}

/// Host-driven, non-blocking program runner.
///
/// Link requests from the model go through a [`RecordingUriOpener`] and are
/// moved into [`WebOutputs::open_requests`] at the end of every init,
/// dispatch or step, where the page picks them up.
pub struct StepProgram<M: Model> {
    model: M,
    events: VecDeque<Event>,
    outputs: WebOutputs,
    opener: RecordingUriOpener,
    running: bool,
    initialized: bool,
    dirty: bool,
    frame_idx: u64,
    width: u16,
    height: u16,
    prev_buffer: Option<Buffer>,
}

impl<M: Model> StepProgram<M> {
    /// Create a new step program with the given model and initial grid size.
    #[must_use]
    pub fn new(model: M, width: u16, height: u16) -> Self {
        Self {
            model,
            events: VecDeque::new(),
            outputs: WebOutputs::default(),
            opener: RecordingUriOpener::new(),
            running: true,
            initialized: false,
            dirty: true,
            frame_idx: 0,
            width,
            height,
            prev_buffer: None,
        }
    }

    /// Initialize the model, tell it the grid size, and render the first
    /// frame.
    ///
    /// # Errors
    ///
    /// Returns [`WebBackendError::Unsupported`] when called a second time.
    pub fn init(&mut self) -> Result<(), WebBackendError> {
        if self.initialized {
            return Err(WebBackendError::Unsupported("init called twice"));
        }
        self.initialized = true;
        let cmd = self.model.init();
        self.execute_cmd(cmd);
        if self.running {
            self.handle_event(Event::Resize {
                width: self.width,
                height: self.height,
            });
        }
        if self.running {
            self.render_frame();
        }
        self.collect_open_requests();
        info!(width = self.width, height = self.height, "step program initialized");
        Ok(())
    }

    /// Process all pending events and render if anything changed.
    ///
    /// # Errors
    ///
    /// Returns [`WebBackendError::Unsupported`] before [`init`](Self::init).
    pub fn step(&mut self) -> Result<StepResult, WebBackendError> {
        if !self.initialized {
            return Err(WebBackendError::Unsupported("step before init"));
        }

        if !self.running {
            return Ok(StepResult {
                running: false,
                rendered: false,
                events_processed: 0,
                frame_idx: self.frame_idx,
            });
        }

        let events_processed = self.drain_events();
        let rendered = if self.running && self.dirty {
            self.render_frame();
            true
        } else {
            false
        };
        self.collect_open_requests();

        Ok(StepResult {
            running: self.running,
            rendered,
            events_processed,
            frame_idx: self.frame_idx,
        })
    }

    /// Handle `event` now, after anything already queued, without rendering.
    ///
    /// Link requests it raises are in [`WebOutputs::open_requests`] on
    /// return, so the host can open them while the input gesture that caused
    /// them is still active. The next [`step`](Self::step) draws the frame.
    ///
    /// # Errors
    ///
    /// Returns [`WebBackendError::Unsupported`] before [`init`](Self::init).
    pub fn dispatch(&mut self, event: Event) -> Result<u32, WebBackendError> {
        if !self.initialized {
            return Err(WebBackendError::Unsupported("dispatch before init"));
        }
        self.push_event(event);
        let processed = if self.running { self.drain_events() } else { 0 };
        self.collect_open_requests();
        Ok(processed)
    }

    fn drain_events(&mut self) -> u32 {
        let mut processed: u32 = 0;
        while let Some(event) = self.events.pop_front() {
            processed += 1;
            self.handle_event(event);
            if !self.running {
                break;
            }
        }
        processed
    }

    /// Queue an event for the next [`step`](Self::step).
    ///
    /// A resize updates the tracked size right away.
    pub fn push_event(&mut self, event: Event) {
        if let Event::Resize { width, height } = &event {
            self.width = *width;
            self.height = *height;
        }
        self.events.push_back(event);
    }

    /// Queue a resize of the cell grid.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.push_event(Event::Resize { width, height });
    }

    /// Take the captured outputs, leaving empty defaults.
    pub fn take_outputs(&mut self) -> WebOutputs {
        std::mem::take(&mut self.outputs)
    }

    /// Take only the pending open requests, keeping the last frame.
    pub fn take_open_requests(&mut self) -> Vec<String> {
        std::mem::take(&mut self.outputs.open_requests)
    }

    /// Read the captured outputs without consuming them.
    pub fn outputs(&self) -> &WebOutputs {
        &self.outputs
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Whether the program is still running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Current frame index.
    pub fn frame_idx(&self) -> u64 {
        self.frame_idx
    }

    /// Current grid dimensions.
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Resize { width, height } = &event {
            self.width = *width;
            self.height = *height;
            // Sizes may differ; no diff baseline.
            self.prev_buffer = None;
        }
        let msg = M::Message::from(event);
        let cmd = self.model.update(msg);
        self.dirty = true;
        self.execute_cmd(cmd);
    }

    fn render_frame(&mut self) {
        let mut frame = Frame::with_hit_grid(self.width, self.height);
        self.model.view(&mut frame);

        let buf = frame.buffer;
        let (dirty_cells, full_repaint) = match self.prev_buffer.as_ref() {
            Some(prev) => (BufferDiff::compute(prev, &buf).len(), false),
            None => (buf.cells().len(), true),
        };

        self.prev_buffer = Some(buf.clone());
        self.outputs.last_buffer = Some(buf);
        self.outputs.last_dirty_cells = dirty_cells;
        self.outputs.last_full_repaint_hint = full_repaint;

        self.dirty = false;
        self.frame_idx += 1;
        debug!(frame = self.frame_idx, dirty_cells, full_repaint, "frame rendered");
    }

    fn collect_open_requests(&mut self) {
        if !self.opener.is_empty() {
            self.outputs.open_requests.extend(self.opener.drain());
        }
    }

    fn execute_cmd(&mut self, cmd: Cmd<M::Message>) {
        match cmd {
            Cmd::None => {}
            Cmd::Quit => {
                self.running = false;
            }
            Cmd::Msg(m) => {
                let cmd = self.model.update(m);
                self.execute_cmd(cmd);
            }
            Cmd::Batch(cmds) => {
                for c in cmds {
                    self.execute_cmd(c);
                    if !self.running {
                        break;
                    }
                }
            }
            Cmd::Log(text) => {
                self.outputs.logs.push(text);
            }
            Cmd::OpenUri(uri) => {
                info!(target: "folio::host", uri = %uri, "open requested");
                self.opener.open_uri(&uri);
            }
        }
    }
}
