//! Broadcast Exchange
//!
//! Publish/subscribe fan-out over Redis channels. Each conversation id
//! is a routing tag; the channel name is the configured prefix plus the
//! id. Delivery is fire-and-forget: there is no persistence, subscribers
//! connected after a publish never see it, and no ordering is guaranteed
//! across publishers.
//!
//! Publishing happens after the message has been durably committed, so
//! publish failures are logged and swallowed rather than converting a
//! successful write into a failed response.

use std::pin::Pin;

use futures::{Stream, StreamExt};
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use tracing::{info, instrument, warn};

use crate::config::BroadcastSettings;
use crate::infrastructure::metrics;
use crate::shared::error::AppError;

/// Fan-out exchange for newly created messages.
///
/// The publish side shares one long-lived managed connection; each
/// subscriber gets a dedicated pub/sub connection from the same client.
#[derive(Clone)]
pub struct MessageExchange {
    client: Client,
    publisher: ConnectionManager,
    settings: BroadcastSettings,
}

impl MessageExchange {
    /// Connect the exchange. Called once at process startup.
    #[instrument(skip(settings), fields(url = %settings.url))]
    pub async fn connect(settings: &BroadcastSettings) -> Result<Self, redis::RedisError> {
        info!("Connecting to broadcast exchange...");
        let client = Client::open(settings.url.as_str())?;
        let publisher = ConnectionManager::new(client.clone()).await?;
        info!("Broadcast exchange connection established");

        Ok(Self {
            client,
            publisher,
            settings: settings.clone(),
        })
    }

    /// Publish a payload tagged with the conversation id.
    ///
    /// Best-effort: failures never propagate to the caller because the
    /// message is already committed by the time this runs.
    pub async fn publish(&self, conversation_id: i64, payload: &[u8]) {
        let channel = self.settings.channel_for(conversation_id);
        let mut conn = self.publisher.clone();

        match conn.publish::<_, _, ()>(&channel, payload).await {
            Ok(()) => {
                metrics::MESSAGES_PUBLISHED_TOTAL.inc();
            }
            Err(e) => {
                metrics::PUBLISH_FAILURES_TOTAL.inc();
                warn!(
                    conversation_id = conversation_id,
                    error = %e,
                    "Broadcast publish failed; message is already committed"
                );
            }
        }
    }

    /// Subscribe to one conversation's tag.
    pub async fn subscribe(&self, conversation_id: i64) -> Result<Subscription, AppError> {
        let channel = self.settings.channel_for(conversation_id);
        let mut pubsub = self.client.get_async_pubsub().await?;
        pubsub.subscribe(&channel).await?;

        Ok(Subscription {
            stream: Box::pin(pubsub.into_on_message()),
        })
    }
}

/// A live subscription filtered to one conversation's channel.
pub struct Subscription {
    stream: Pin<Box<dyn Stream<Item = redis::Msg> + Send>>,
}

impl Subscription {
    /// Next published payload, or None once the connection closes.
    pub async fn next(&mut self) -> Option<Vec<u8>> {
        let msg = self.stream.next().await?;
        msg.get_payload::<Vec<u8>>().ok()
    }
}
