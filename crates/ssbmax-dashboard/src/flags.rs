//! Cloud content flags with a single writer
//!
//! Collaborators that fetch study content hold a [`ContentFlagsReader`];
//! only the [`ContentFlagsOwner`] can change the flags.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tokio::sync::watch;

/// Whether study content is fetched from the cloud, globally and per topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentFlags {
    /// Global toggle for cloud content
    #[serde(default)]
    pub cloud_enabled: bool,

    /// Per-topic overrides, keyed by upper-case topic name
    #[serde(default)]
    pub topic_overrides: BTreeMap<String, bool>,

    /// Fall back to bundled content when a cloud load fails
    #[serde(default = "default_fallback")]
    pub fallback_to_local_on_error: bool,
}

fn default_fallback() -> bool {
    true
}

impl Default for ContentFlags {
    fn default() -> Self {
        Self {
            cloud_enabled: false,
            topic_overrides: BTreeMap::new(),
            fallback_to_local_on_error: default_fallback(),
        }
    }
}

fn topic_key(topic: &str) -> String {
    topic.trim().to_uppercase()
}

impl ContentFlags {
    /// Resolve the flag for a topic: an override wins over the global toggle
    pub fn is_cloud_enabled_for(&self, topic: &str) -> bool {
        self.topic_overrides
            .get(&topic_key(topic))
            .copied()
            .unwrap_or(self.cloud_enabled)
    }
}

/// Sole writer of the content flags
pub struct ContentFlagsOwner {
    sender: watch::Sender<ContentFlags>,
}

impl Default for ContentFlagsOwner {
    fn default() -> Self {
        Self::new(ContentFlags::default())
    }
}

impl ContentFlagsOwner {
    /// Create an owner with initial flags
    pub fn new(initial: ContentFlags) -> Self {
        let (sender, _receiver) = watch::channel(initial);
        Self { sender }
    }

    /// Turn cloud content on or off globally
    pub fn set_cloud_enabled(&mut self, enabled: bool) {
        self.sender.send_modify(|flags| flags.cloud_enabled = enabled);
        tracing::info!(enabled, "Cloud content toggled");
    }

    /// Force a topic on or off regardless of the global toggle
    pub fn set_topic_override(&mut self, topic: &str, enabled: bool) {
        let key = topic_key(topic);
        tracing::info!(topic = %key, enabled, "Topic override set");
        self.sender.send_modify(|flags| {
            flags.topic_overrides.insert(key, enabled);
        });
    }

    /// Remove a topic override so the topic follows the global toggle again
    pub fn clear_topic_override(&mut self, topic: &str) {
        let key = topic_key(topic);
        self.sender.send_if_modified(|flags| flags.topic_overrides.remove(&key).is_some());
    }

    /// Set whether failed cloud loads fall back to bundled content
    pub fn set_fallback_to_local(&mut self, enabled: bool) {
        self.sender
            .send_modify(|flags| flags.fallback_to_local_on_error = enabled);
    }

    /// Current flags
    pub fn flags(&self) -> ContentFlags {
        self.sender.borrow().clone()
    }

    /// Hand out a read-only handle
    pub fn reader(&self) -> ContentFlagsReader {
        ContentFlagsReader {
            receiver: self.sender.subscribe(),
        }
    }
}

/// Read-only view of the content flags
#[derive(Clone)]
pub struct ContentFlagsReader {
    receiver: watch::Receiver<ContentFlags>,
}

impl ContentFlagsReader {
    /// Current flags
    pub fn current(&self) -> ContentFlags {
        self.receiver.borrow().clone()
    }

    /// Resolve the flag for a topic against the latest flags
    pub fn is_cloud_enabled_for(&self, topic: &str) -> bool {
        self.receiver.borrow().is_cloud_enabled_for(topic)
    }

    /// Whether failed cloud loads should fall back to bundled content
    pub fn fallback_to_local_on_error(&self) -> bool {
        self.receiver.borrow().fallback_to_local_on_error
    }

    /// Wait for the next change
    ///
    /// Returns `false` once the owner has been dropped.
    pub async fn changed(&mut self) -> bool {
        self.receiver.changed().await.is_ok()
    }
}
