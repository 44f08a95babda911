//! In-memory port implementations shared by unit tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};

use crate::cassette::config::CassetteConfig;
use crate::context::ServiceContext;
use crate::error::{PortError, PortResult};
use crate::model::{BreachRecord, DirectoryMember, DirectoryUser, GroupRef, MemberType};
use crate::ports::{
    BreachLookup, Clock, Directory, FileSystem, PortFuture, ShellExecutor, ShellOutput,
    SleepFuture,
};

/// Starts from panicking defaults; tests swap in the ports they need.
pub fn make_test_context() -> ServiceContext {
    ServiceContext::replaying_from(&CassetteConfig::panic_on_unspecified())
        .expect("panic config should always succeed")
}

/// Directory built from an in-memory graph. Every call is logged as
/// `method:argument` (or just `method` when there is no argument).
#[derive(Default)]
pub struct FakeDirectory {
    groups: Vec<GroupRef>,
    users: HashMap<String, DirectoryUser>,
    members: HashMap<String, Vec<DirectoryMember>>,
    searchable: bool,
    calls: Arc<Mutex<Vec<String>>>,
}

impl FakeDirectory {
    pub fn new() -> Self {
        Self { searchable: true, ..Self::default() }
    }

    pub fn with_group(mut self, id: &str, name: &str) -> Self {
        self.groups.push(GroupRef { id: id.into(), display_name: name.into() });
        self
    }

    pub fn with_user(mut self, id: &str, name: &str, mail: Option<&str>) -> Self {
        self.users.insert(
            id.into(),
            DirectoryUser {
                id: id.into(),
                display_name: name.into(),
                user_principal_name: mail.map(Into::into),
                mail: mail.map(Into::into),
                job_title: None,
                department: Some("Engineering".into()),
                account_enabled: Some(true),
            },
        );
        self
    }

    pub fn with_members(mut self, group_id: &str, members: &[(&str, MemberType)]) -> Self {
        let members = members
            .iter()
            .map(|(id, member_type)| DirectoryMember {
                id: (*id).to_string(),
                member_type: member_type.clone(),
            })
            .collect();
        self.members.insert(group_id.into(), members);
        self
    }

    /// Makes the display-name search return nothing.
    pub fn without_search(mut self) -> Self {
        self.searchable = false;
        self
    }

    pub fn calls(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.calls)
    }

    fn log(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn ready<T: Send + 'static>(value: PortResult<T>) -> PortFuture<'static, T> {
        Box::pin(async move { value })
    }
}

impl Directory for FakeDirectory {
    fn connect(&self) -> PortFuture<'_, ()> {
        self.log("connect".into());
        Self::ready(Ok(()))
    }

    fn resolve_group(&self, id: &str) -> PortFuture<'_, GroupRef> {
        self.log(format!("resolve_group:{id}"));
        let found = self.groups.iter().find(|g| g.id == id).cloned();
        Self::ready(found.ok_or_else(|| PortError::NotFound(format!("group {id}"))))
    }

    fn find_groups_by_display_name(&self, name: &str) -> PortFuture<'_, Vec<GroupRef>> {
        self.log(format!("find_groups_by_display_name:{name}"));
        let found = if self.searchable {
            self.groups.iter().filter(|g| g.display_name.eq_ignore_ascii_case(name)).cloned().collect()
        } else {
            Vec::new()
        };
        Self::ready(Ok(found))
    }

    fn list_all_groups(&self) -> PortFuture<'_, Vec<GroupRef>> {
        self.log("list_all_groups".into());
        Self::ready(Ok(self.groups.clone()))
    }

    fn list_group_members(&self, group_id: &str) -> PortFuture<'_, Vec<DirectoryMember>> {
        self.log(format!("list_group_members:{group_id}"));
        let found = self.members.get(group_id).cloned();
        Self::ready(found.ok_or_else(|| PortError::NotFound(format!("members of {group_id}"))))
    }

    fn resolve_user(&self, id: &str) -> PortFuture<'_, DirectoryUser> {
        self.log(format!("resolve_user:{id}"));
        let found = self.users.get(id).cloned();
        Self::ready(found.ok_or_else(|| PortError::NotFound(format!("user {id}"))))
    }
}

/// Breach lookup answering from a table; unknown emails are clean.
#[derive(Default)]
pub struct FakeBreaches {
    results: HashMap<String, PortResult<Vec<BreachRecord>>>,
    calls: Arc<Mutex<Vec<String>>>,
    keys: Arc<Mutex<Vec<String>>>,
}

impl FakeBreaches {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_result(mut self, email: &str, result: PortResult<Vec<BreachRecord>>) -> Self {
        self.results.insert(email.into(), result);
        self
    }

    /// Emails looked up, in order.
    pub fn calls(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.calls)
    }

    /// API keys passed with each lookup.
    pub fn keys(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.keys)
    }
}

impl BreachLookup for FakeBreaches {
    fn check_breaches(&self, email: &str, api_key: &str) -> PortFuture<'_, Vec<BreachRecord>> {
        self.calls.lock().unwrap().push(email.into());
        self.keys.lock().unwrap().push(api_key.into());
        let result = self.results.get(email).cloned().unwrap_or_else(|| Ok(Vec::new()));
        Box::pin(async move { result })
    }
}

/// Clock frozen at a fixed instant that records requested sleeps.
pub struct ManualClock {
    now: DateTime<Utc>,
    sleeps: Arc<Mutex<Vec<Duration>>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap(),
            sleeps: Arc::default(),
        }
    }

    pub fn sleeps(&self) -> Arc<Mutex<Vec<Duration>>> {
        Arc::clone(&self.sleeps)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn sleep(&self, duration: Duration) -> SleepFuture<'_> {
        self.sleeps.lock().unwrap().push(duration);
        Box::pin(async {})
    }
}

/// In-memory filesystem.
#[derive(Default)]
pub struct MemFs {
    files: Arc<Mutex<HashMap<PathBuf, String>>>,
}

impl MemFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> Arc<Mutex<HashMap<PathBuf, String>>> {
        Arc::clone(&self.files)
    }
}

impl FileSystem for MemFs {
    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.files.lock().unwrap().insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}

/// Shell that records invocations and answers with a fixed exit code.
pub struct FakeShell {
    exit_code: Option<i32>,
    calls: Arc<Mutex<Vec<(String, Vec<String>)>>>,
}

impl FakeShell {
    pub fn exiting(exit_code: i32) -> Self {
        Self { exit_code: Some(exit_code), calls: Arc::default() }
    }

    /// Behaves as if the program is not installed.
    pub fn missing() -> Self {
        Self { exit_code: None, calls: Arc::default() }
    }

    pub fn calls(&self) -> Arc<Mutex<Vec<(String, Vec<String>)>>> {
        Arc::clone(&self.calls)
    }
}

impl ShellExecutor for FakeShell {
    fn run(
        &self,
        program: &str,
        args: &[String],
    ) -> Result<ShellOutput, Box<dyn std::error::Error + Send + Sync>> {
        self.calls.lock().unwrap().push((program.to_string(), args.to_vec()));
        match self.exit_code {
            Some(exit_code) => Ok(ShellOutput {
                exit_code,
                stdout: String::new(),
                stderr: if exit_code == 0 { String::new() } else { "print failed".into() },
            }),
            None => Err(format!("{program}: command not found").into()),
        }
    }
}
