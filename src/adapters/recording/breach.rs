//! Recording adapter for the `BreachLookup` port.

use std::sync::{Arc, Mutex};

use serde_json::json;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::model::BreachRecord;
use crate::ports::{BreachLookup, PortFuture};

/// Records breach lookups while delegating to an inner implementation.
///
/// The API key is never written to the cassette.
pub struct RecordingBreachLookup {
    inner: Box<dyn BreachLookup>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingBreachLookup {
    /// Creates a new recording breach lookup wrapping the given implementation.
    pub fn new(inner: Box<dyn BreachLookup>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl BreachLookup for RecordingBreachLookup {
    fn check_breaches(&self, email: &str, api_key: &str) -> PortFuture<'_, Vec<BreachRecord>> {
        let call = self.inner.check_breaches(email, api_key);
        let input = json!({ "email": email });
        let recorder = Arc::clone(&self.recorder);
        Box::pin(async move {
            let result = call.await;
            record_result(&recorder, "breaches", "check_breaches", &input, &result);
            result
        })
    }
}
