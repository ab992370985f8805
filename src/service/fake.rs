//! In-memory stand-ins for the network seams, used by service tests.

use std::{
    collections::{HashMap, VecDeque},
    sync::{
        atomic::{AtomicU64, Ordering},
        Mutex,
    },
    time::Duration,
};

use serenity::async_trait;

use crate::{
    error::{delivery::DeliveryError, resolve::ResolveError},
    model::embed::AnnouncementEmbed,
    service::{
        fanout::{AnnouncementSink, FanoutProgress, ProgressReporter},
        url_watcher::LinkResolver,
    },
};

/// A reqwest error that never touched the network.
fn request_error() -> reqwest::Error {
    reqwest::Client::new()
        .get("http://[::1")
        .build()
        .unwrap_err()
}

/// Resolver that plays back scripted answers, then repeats a fallback forever.
pub struct ScriptedResolver {
    script: Mutex<VecDeque<Result<String, ResolveError>>>,
    fallback: String,
    requested: Mutex<Vec<String>>,
}

impl ScriptedResolver {
    pub fn new(fallback: &str) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: fallback.to_string(),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn then_ok(self, target: &str) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Ok(target.to_string()));
        self
    }

    pub fn then_disconnect(self) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Err(ResolveError::PeerDisconnected {
                url: "scripted".to_string(),
                source: request_error(),
            }));
        self
    }

    pub fn then_hard_error(self) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Err(ResolveError::Request {
                url: "scripted".to_string(),
                source: request_error(),
            }));
        self
    }

    pub fn calls(&self) -> usize {
        self.requested.lock().unwrap().len()
    }

    /// Distinct urls asked for, in first-seen order.
    pub fn requested(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for url in self.requested.lock().unwrap().iter() {
            if !seen.contains(url) {
                seen.push(url.clone());
            }
        }
        seen
    }
}

#[async_trait]
impl LinkResolver for ScriptedResolver {
    async fn resolve_one_hop(&self, url: &str) -> Result<String, ResolveError> {
        self.requested.lock().unwrap().push(url.to_string());

        let next = self.script.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(self.fallback.clone()))
    }
}

/// Resolver that maps known urls and leaves everything else alone.
pub struct MapResolver(pub HashMap<String, String>);

#[async_trait]
impl LinkResolver for MapResolver {
    async fn resolve_one_hop(&self, url: &str) -> Result<String, ResolveError> {
        Ok(self.0.get(url).cloned().unwrap_or_else(|| url.to_string()))
    }
}

/// A call the fake sink received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkCall {
    Post { channel_id: u64 },
    Edit { channel_id: u64, message_id: u64 },
}

/// Sink that answers per channel, optionally taking `latency` per call.
pub struct FakeSink {
    failures: HashMap<u64, DeliveryError>,
    latency: Duration,
    next_message_id: AtomicU64,
    calls: Mutex<Vec<SinkCall>>,
}

impl FakeSink {
    pub fn new() -> Self {
        Self {
            failures: HashMap::new(),
            latency: Duration::ZERO,
            next_message_id: AtomicU64::new(1000),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(mut self, channel_id: u64, err: DeliveryError) -> Self {
        self.failures.insert(channel_id, err);
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn calls(&self) -> Vec<SinkCall> {
        self.calls.lock().unwrap().clone()
    }

    async fn answer(&self, channel_id: u64, call: SinkCall) -> Result<(), DeliveryError> {
        self.calls.lock().unwrap().push(call);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        match self.failures.get(&channel_id) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AnnouncementSink for FakeSink {
    async fn post_message(
        &self,
        channel_id: u64,
        _embed: &AnnouncementEmbed,
    ) -> Result<u64, DeliveryError> {
        self.answer(channel_id, SinkCall::Post { channel_id })
            .await?;
        Ok(self.next_message_id.fetch_add(1, Ordering::SeqCst))
    }

    async fn edit_message(
        &self,
        channel_id: u64,
        message_id: u64,
        _embed: &AnnouncementEmbed,
    ) -> Result<(), DeliveryError> {
        self.answer(
            channel_id,
            SinkCall::Edit {
                channel_id,
                message_id,
            },
        )
        .await
    }
}

/// Reporter that keeps every progress snapshot it is handed.
#[derive(Default)]
pub struct RecordingReporter {
    reports: Mutex<Vec<FanoutProgress>>,
}

impl RecordingReporter {
    pub fn reports(&self) -> Vec<FanoutProgress> {
        self.reports.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProgressReporter for RecordingReporter {
    async fn report(&self, progress: &FanoutProgress) {
        self.reports.lock().unwrap().push(progress.clone());
    }
}
