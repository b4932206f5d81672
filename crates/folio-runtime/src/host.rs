#![forbid(unsafe_code)]

//! Host capabilities injected into the runtime.
//!
//! The view layer never navigates by itself. Following a link is expressed
//! as a request handed to a [`UriOpener`] owned by the host shell: the
//! desktop binary launches the platform opener, the web host forwards to
//! `window.open`, and tests record the requests.

/// Fire-and-forget capability for opening an external URI.
///
/// Implementations must not report failures back to the caller; they log
/// them instead.
pub trait UriOpener {
    /// Ask the host to open `uri`.
    fn open_uri(&mut self, uri: &str);
}

/// Opener that records every request in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingUriOpener {
    requests: Vec<String>,
}

impl RecordingUriOpener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests seen so far, oldest first.
    pub fn requests(&self) -> &[String] {
        &self.requests
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Remove and return all pending requests.
    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.requests)
    }
}

impl UriOpener for RecordingUriOpener {
    fn open_uri(&mut self, uri: &str) {
        self.requests.push(uri.to_owned());
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use system::SystemUriOpener;

#[cfg(not(target_arch = "wasm32"))]
mod system {
    use super::UriOpener;
    use std::process::{Command, Stdio};

    /// Opens URIs with the platform's default handler.
    ///
    /// `open` on macOS, `cmd /C start` on Windows and `xdg-open` elsewhere.
    /// The child's stdio is detached so it cannot write over the UI.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemUriOpener;

    impl SystemUriOpener {
        pub fn new() -> Self {
            Self
        }
    }

    fn opener_command(uri: &str) -> Command {
        #[cfg(target_os = "macos")]
        {
            let mut cmd = Command::new("open");
            cmd.arg(uri);
            cmd
        }
        #[cfg(target_os = "windows")]
        {
            let mut cmd = Command::new("cmd");
            // Empty title argument; otherwise `start` treats a quoted URI as the title.
            cmd.args(["/C", "start", "", uri]);
            cmd
        }
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(uri);
            cmd
        }
    }

    impl UriOpener for SystemUriOpener {
        fn open_uri(&mut self, uri: &str) {
            if uri.is_empty() || uri.starts_with('-') {
                tracing::warn!(uri, "refusing to open malformed uri");
                return;
            }
            let spawned = opener_command(uri)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn();
            match spawned {
                Ok(child) => tracing::info!(uri, pid = child.id(), "launched system opener"),
                Err(err) => tracing::warn!(uri, error = %err, "failed to launch system opener"),
            }
        }
    }
}
