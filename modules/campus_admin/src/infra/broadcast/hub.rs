use dashmap::DashMap;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::broadcast;

const MIN_CAPACITY: usize = 1;

/// One message delivered to topic subscribers
#[derive(Debug, Clone, PartialEq)]
pub struct TopicMessage {
    pub topic: String,
    pub payload: serde_json::Value,
}

/// Topic-keyed fan-out over `tokio::sync::broadcast` channels
///
/// Channels are created on first subscription. Slow subscribers lag and lose
/// the oldest messages once `capacity` is exceeded.
#[derive(Debug, Clone)]
pub struct TopicHub {
    capacity: usize,
    topics: Arc<DashMap<String, broadcast::Sender<Arc<TopicMessage>>>>,
}

impl Default for TopicHub {
    fn default() -> Self {
        Self::new(128)
    }
}

impl TopicHub {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(MIN_CAPACITY),
            topics: Arc::new(DashMap::new()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Subscribe to a topic, creating its channel when absent
    pub fn subscribe(&self, topic: &str) -> broadcast::Receiver<Arc<TopicMessage>> {
        self.topics
            .entry(topic.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .subscribe()
    }

    /// Serialize `payload` and send it to the topic
    ///
    /// Returns the number of subscribers that received the message. Failures
    /// are logged and reported as zero deliveries.
    pub fn publish<T: Serialize + ?Sized>(&self, topic: &str, payload: &T) -> usize {
        let payload = match serde_json::to_value(payload) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!(topic, error = %e, "failed to serialize broadcast payload");
                return 0;
            }
        };

        let Some(sender) = self.topics.get(topic).map(|s| s.clone()) else {
            tracing::trace!(topic, "no subscribers, message dropped");
            return 0;
        };

        let message = Arc::new(TopicMessage {
            topic: topic.to_string(),
            payload,
        });
        match sender.send(message) {
            Ok(delivered) => {
                tracing::debug!(topic, delivered, "broadcast message sent");
                delivered
            }
            Err(_) => {
                tracing::trace!(topic, "all subscribers gone, message dropped");
                0
            }
        }
    }

    /// Current subscriber count of a topic
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.topics
            .get(topic)
            .map(|s| s.receiver_count())
            .unwrap_or(0)
    }

    /// Topics that have been subscribed to, sorted
    pub fn topics(&self) -> Vec<String> {
        let mut names: Vec<String> = self.topics.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }
}
