//! Recording adapter for the `Directory` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde_json::json;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{Directory, PortFuture};

/// Records directory interactions while delegating to an inner implementation.
pub struct RecordingDirectory {
    inner: Box<dyn Directory>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingDirectory {
    /// Creates a new recording directory wrapping the given implementation.
    pub fn new(inner: Box<dyn Directory>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }

    fn wrap<'a, T>(
        &'a self,
        method: &'static str,
        input: serde_json::Value,
        call: PortFuture<'a, T>,
    ) -> PortFuture<'a, T>
    where
        T: Serialize + Send + 'a,
    {
        let recorder = Arc::clone(&self.recorder);
        Box::pin(async move {
            let result = call.await;
            record_result(&recorder, "directory", method, &input, &result);
            result
        })
    }
}

impl Directory for RecordingDirectory {
    fn connect(&self) -> PortFuture<'_, ()> {
        self.wrap("connect", json!({}), self.inner.connect())
    }

    fn resolve_group(&self, id: &str) -> PortFuture<'_, crate::model::GroupRef> {
        self.wrap("resolve_group", json!({ "id": id }), self.inner.resolve_group(id))
    }

    fn find_groups_by_display_name(
        &self,
        name: &str,
    ) -> PortFuture<'_, Vec<crate::model::GroupRef>> {
        self.wrap(
            "find_groups_by_display_name",
            json!({ "name": name }),
            self.inner.find_groups_by_display_name(name),
        )
    }

    fn list_all_groups(&self) -> PortFuture<'_, Vec<crate::model::GroupRef>> {
        self.wrap("list_all_groups", json!({}), self.inner.list_all_groups())
    }

    fn list_group_members(
        &self,
        group_id: &str,
    ) -> PortFuture<'_, Vec<crate::model::DirectoryMember>> {
        self.wrap(
            "list_group_members",
            json!({ "group_id": group_id }),
            self.inner.list_group_members(group_id),
        )
    }

    fn resolve_user(&self, id: &str) -> PortFuture<'_, crate::model::DirectoryUser> {
        self.wrap("resolve_user", json!({ "id": id }), self.inner.resolve_user(id))
    }
}
