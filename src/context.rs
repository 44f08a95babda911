//! Service context bundling all port trait objects.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::adapters::replaying::{
    ReplayingBreachLookup, ReplayingClock, ReplayingDirectory, ReplayingFileSystem,
    ReplayingShellExecutor,
};
use crate::cassette::config::CassetteConfig;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::ports::{
    BreachLookup, Clock, Directory, FileSystem, PortFuture, ShellExecutor, ShellOutput,
    SleepFuture,
};

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors
/// wire up different adapter implementations (live, replaying, recording).
pub struct ServiceContext {
    /// Clock for timestamps and request pacing.
    pub clock: Box<dyn Clock>,
    /// Filesystem for report output.
    pub fs: Box<dyn FileSystem>,
    /// Shell executor for the PDF export browser.
    pub shell: Box<dyn ShellExecutor>,
    /// Directory service for groups and users.
    pub directory: Box<dyn Directory>,
    /// Breach-intelligence lookup.
    pub breaches: Box<dyn BreachLookup>,
}

impl ServiceContext {
    /// Creates a live context talking to Microsoft Graph and Have I Been Pwned.
    #[must_use]
    pub fn live(graph_token: &str) -> Self {
        use crate::adapters::live::breach::LiveBreachLookup;
        use crate::adapters::live::clock::LiveClock;
        use crate::adapters::live::directory::LiveDirectory;
        use crate::adapters::live::filesystem::LiveFileSystem;
        use crate::adapters::live::shell::LiveShellExecutor;

        Self {
            clock: Box::new(LiveClock),
            fs: Box::new(LiveFileSystem),
            shell: Box::new(LiveShellExecutor),
            directory: Box::new(LiveDirectory::new(graph_token)),
            breaches: Box::new(LiveBreachLookup::new()),
        }
    }

    /// Creates a live context whose ports record to per-port cassettes.
    ///
    /// The cassettes are written by [`RecordingSession::finish`] once the
    /// context has been dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette directory cannot be created.
    pub fn recording_at(
        dir: PathBuf,
        graph_token: &str,
    ) -> Result<(Self, RecordingSession), String> {
        let session = RecordingSession::in_dir(dir)?;
        let ctx = Self::live(graph_token).recording_into(&session);
        Ok((ctx, session))
    }

    /// Wraps every port in a recording adapter feeding `session`.
    #[must_use]
    pub fn recording_into(self, session: &RecordingSession) -> Self {
        use crate::adapters::recording::{
            RecordingBreachLookup, RecordingClock, RecordingDirectory, RecordingFileSystem,
            RecordingShellExecutor,
        };

        Self {
            clock: Box::new(RecordingClock::new(self.clock, Arc::clone(&session.clock))),
            fs: Box::new(RecordingFileSystem::new(self.fs, Arc::clone(&session.fs))),
            shell: Box::new(RecordingShellExecutor::new(self.shell, Arc::clone(&session.shell))),
            directory: Box::new(RecordingDirectory::new(
                self.directory,
                Arc::clone(&session.directory),
            )),
            breaches: Box::new(RecordingBreachLookup::new(
                self.breaches,
                Arc::clone(&session.breaches),
            )),
        }
    }

    /// Creates a replaying context from a monolithic cassette file.
    ///
    /// All ports are served by a single cassette; each port/method pair
    /// is dispatched to the right interaction stream automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let shared = Arc::new(Mutex::new(CassetteConfig::load_monolithic(path)?));

        Ok(Self {
            clock: Box::new(ReplayingClock::new(Arc::clone(&shared))),
            fs: Box::new(ReplayingFileSystem::new(Arc::clone(&shared))),
            shell: Box::new(ReplayingShellExecutor::new(Arc::clone(&shared))),
            directory: Box::new(ReplayingDirectory::new(Arc::clone(&shared))),
            breaches: Box::new(ReplayingBreachLookup::new(shared)),
        })
    }

    /// Creates a replaying context from per-port cassette files.
    ///
    /// Ports without a configured cassette file use a panicking adapter
    /// that fails with a clear message when called.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn replaying_from(config: &CassetteConfig) -> Result<Self, String> {
        let replayers = config.load_all()?;
        let shared = |r: CassetteReplayer| Arc::new(Mutex::new(r));

        Ok(Self {
            clock: match replayers.clock {
                Some(r) => Box::new(ReplayingClock::new(shared(r))),
                None => Box::new(PanickingClock),
            },
            fs: match replayers.fs {
                Some(r) => Box::new(ReplayingFileSystem::new(shared(r))),
                None => Box::new(PanickingFileSystem),
            },
            shell: match replayers.shell {
                Some(r) => Box::new(ReplayingShellExecutor::new(shared(r))),
                None => Box::new(PanickingShellExecutor),
            },
            directory: match replayers.directory {
                Some(r) => Box::new(ReplayingDirectory::new(shared(r))),
                None => Box::new(PanickingDirectory),
            },
            breaches: match replayers.breaches {
                Some(r) => Box::new(ReplayingBreachLookup::new(shared(r))),
                None => Box::new(PanickingBreachLookup),
            },
        })
    }

    /// Replaces the clock port.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Replaces the filesystem port.
    #[must_use]
    pub fn with_fs(mut self, fs: impl FileSystem + 'static) -> Self {
        self.fs = Box::new(fs);
        self
    }

    /// Replaces the shell port.
    #[must_use]
    pub fn with_shell(mut self, shell: impl ShellExecutor + 'static) -> Self {
        self.shell = Box::new(shell);
        self
    }

    /// Replaces the directory port.
    #[must_use]
    pub fn with_directory(mut self, directory: impl Directory + 'static) -> Self {
        self.directory = Box::new(directory);
        self
    }

    /// Replaces the breach lookup port.
    #[must_use]
    pub fn with_breaches(mut self, breaches: impl BreachLookup + 'static) -> Self {
        self.breaches = Box::new(breaches);
        self
    }
}

// --- Panicking adapters for unspecified ports ---

struct PanickingClock;
impl Clock for PanickingClock {
    fn now(&self) -> chrono::DateTime<chrono::Utc> {
        panic!("Clock port not configured in CassetteConfig: no cassette loaded for clock");
    }
    fn sleep(&self, _duration: Duration) -> SleepFuture<'_> {
        panic!("Clock port not configured in CassetteConfig: no cassette loaded for clock");
    }
}

struct PanickingFileSystem;
impl FileSystem for PanickingFileSystem {
    fn write(
        &self,
        _path: &Path,
        _contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        panic!("FileSystem port not configured in CassetteConfig: no cassette loaded for fs");
    }
}

struct PanickingShellExecutor;
impl ShellExecutor for PanickingShellExecutor {
    fn run(
        &self,
        _program: &str,
        _args: &[String],
    ) -> Result<ShellOutput, Box<dyn std::error::Error + Send + Sync>> {
        panic!(
            "ShellExecutor port not configured in CassetteConfig: no cassette loaded for shell"
        );
    }
}

struct PanickingDirectory;
impl PanickingDirectory {
    fn unconfigured() -> ! {
        panic!(
            "Directory port not configured in CassetteConfig: no cassette loaded for directory"
        );
    }
}
impl Directory for PanickingDirectory {
    fn connect(&self) -> PortFuture<'_, ()> {
        Self::unconfigured()
    }
    fn resolve_group(&self, _id: &str) -> PortFuture<'_, crate::model::GroupRef> {
        Self::unconfigured()
    }
    fn find_groups_by_display_name(
        &self,
        _name: &str,
    ) -> PortFuture<'_, Vec<crate::model::GroupRef>> {
        Self::unconfigured()
    }
    fn list_all_groups(&self) -> PortFuture<'_, Vec<crate::model::GroupRef>> {
        Self::unconfigured()
    }
    fn list_group_members(
        &self,
        _group_id: &str,
    ) -> PortFuture<'_, Vec<crate::model::DirectoryMember>> {
        Self::unconfigured()
    }
    fn resolve_user(&self, _id: &str) -> PortFuture<'_, crate::model::DirectoryUser> {
        Self::unconfigured()
    }
}

struct PanickingBreachLookup;
impl BreachLookup for PanickingBreachLookup {
    fn check_breaches(
        &self,
        _email: &str,
        _api_key: &str,
    ) -> PortFuture<'_, Vec<crate::model::BreachRecord>> {
        panic!(
            "BreachLookup port not configured in CassetteConfig: no cassette loaded for breaches"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use chrono::Utc;
    use serde_json::json;

    fn write_cassette(path: &Path, interactions: Vec<Interaction>) {
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            version: "0.1.0".into(),
            interactions,
        };
        let yaml = serde_yaml::to_string(&cassette).unwrap();
        std::fs::write(path, yaml).unwrap();
    }

    #[tokio::test]
    async fn replaying_context_from_monolithic_cassette() {
        let dir = std::env::temp_dir().join("breachscan_ctx_test_mono");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("full.cassette.yaml");

        write_cassette(
            &path,
            vec![
                Interaction {
                    seq: 0,
                    port: "clock".into(),
                    method: "now".into(),
                    input: json!({}),
                    output: json!("2024-06-15T10:30:00Z"),
                },
                Interaction {
                    seq: 1,
                    port: "directory".into(),
                    method: "resolve_group".into(),
                    input: json!({"id": "g-1"}),
                    output: json!({"ok": {"id": "g-1", "display_name": "Sales"}}),
                },
            ],
        );

        let ctx = ServiceContext::replaying(&path).unwrap();
        let time = ctx.clock.now();
        assert_eq!(time.to_rfc3339(), "2024-06-15T10:30:00+00:00");
        let group = ctx.directory.resolve_group("g-1").await.unwrap();
        assert_eq!(group.display_name, "Sales");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn replaying_from_per_port_cassettes() {
        let dir = std::env::temp_dir().join("breachscan_ctx_test_ports");
        std::fs::create_dir_all(&dir).unwrap();

        let clock_path = dir.join("clock.cassette.yaml");
        write_cassette(
            &clock_path,
            vec![Interaction {
                seq: 0,
                port: "clock".into(),
                method: "now".into(),
                input: json!({}),
                output: json!("2024-01-01T00:00:00Z"),
            }],
        );

        let config = CassetteConfig { clock: Some(clock_path), ..CassetteConfig::default() };
        let ctx = ServiceContext::replaying_from(&config).unwrap();
        let time = ctx.clock.now();
        assert_eq!(time.to_rfc3339(), "2024-01-01T00:00:00+00:00");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    #[should_panic(expected = "not configured in CassetteConfig")]
    fn unspecified_port_panics_with_clear_message() {
        let config = CassetteConfig::panic_on_unspecified();
        let ctx = ServiceContext::replaying_from(&config).unwrap();
        let _ = ctx.clock.now();
    }
}
