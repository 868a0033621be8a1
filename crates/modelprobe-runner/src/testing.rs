//! Scripted probe client shared by the runner tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use modelprobe_client::{ClientError, ProbeClient, ProbeRequest};
use modelprobe_core::{ProbeTask, ProviderHandle};

/// What the scripted client does for one (provider, model).
#[derive(Debug, Clone)]
pub enum Step {
    Reply(Duration, &'static str),
    Fail(Duration, &'static str),
    ClientTimeout(Duration),
    Hang,
    Panic,
}

/// Looks up each request by `(base_url, model)`; `None` base_url is the default path.
#[derive(Default)]
pub struct ScriptedClient {
    script: HashMap<(Option<String>, String), Step>,
    fallback: Option<Step>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    calls: Mutex<Vec<(Option<String>, String)>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, provider: &str, model: &str, step: Step) -> Self {
        self.script
            .insert((Some(base_url(provider)), model.to_string()), step);
        self
    }

    pub fn on_default(mut self, model: &str, step: Step) -> Self {
        self.script.insert((None, model.to_string()), step);
        self
    }

    pub fn otherwise(mut self, step: Step) -> Self {
        self.fallback = Some(step);
        self
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<(Option<String>, String)> {
        self.calls.lock().unwrap().clone()
    }
}

struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ProbeClient for ScriptedClient {
    async fn invoke(&self, request: &ProbeRequest) -> Result<String, ClientError> {
        let key = (
            request.provider.as_ref().map(|h| h.base_url.clone()),
            request.model.clone(),
        );
        self.calls.lock().unwrap().push(key.clone());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        let _guard = InFlight(&self.in_flight);

        let step = self
            .script
            .get(&key)
            .or(self.fallback.as_ref())
            .cloned()
            .unwrap_or(Step::Fail(Duration::ZERO, "unscripted"));

        match step {
            Step::Reply(delay, text) => {
                tokio::time::sleep(delay).await;
                Ok(text.to_string())
            }
            Step::Fail(delay, message) => {
                tokio::time::sleep(delay).await;
                Err(ClientError::MalformedResponse(message.to_string()))
            }
            Step::ClientTimeout(delay) => {
                tokio::time::sleep(delay).await;
                Err(ClientError::Timeout)
            }
            Step::Hang => std::future::pending().await,
            Step::Panic => panic!("scripted panic"),
        }
    }
}

pub fn base_url(provider: &str) -> String {
    format!("http://{provider}.test/v1")
}

pub fn task(provider: &str, model: &str) -> ProbeTask {
    ProbeTask::new(provider, ProviderHandle::new(base_url(provider)), model)
}
