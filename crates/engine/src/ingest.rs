//! Webhook ingestion pipeline.
//!
//! A delivery moves through received → verified → stored → routed →
//! processed. Verification happens before any state mutation, so a
//! forged delivery leaves no trace. Storage happens before routing, so
//! a crash between the two is recoverable by replaying unprocessed
//! events. A routing failure leaves the stored event unprocessed and
//! propagates, which surfaces as a non-2xx response and makes the
//! vendor redeliver.

use std::sync::Arc;

use serde_json::Value;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use shopsync_core::error::CoreError;
use shopsync_core::signature::verify_hmac_base64;
use shopsync_core::types::DbId;
use shopsync_core::webhook::{normalize_order, route_topic, WebhookRoute};
use shopsync_db::models::order::UpsertOrder;
use shopsync_db::models::platform::Platform;
use shopsync_db::models::webhook_event::CreateWebhookEvent;
use shopsync_db::repositories::order_repo::OrderRepo;
use shopsync_db::repositories::webhook_event_repo::WebhookEventRepo;

use crate::engine::SyncEngine;
use crate::error::EngineError;

/// What happened to an accepted delivery.
#[derive(Debug, Clone, Copy)]
pub struct IngestOutcome {
    /// The stored event's id.
    pub event_id: DbId,
    /// How the topic was routed.
    pub route: WebhookRoute,
}

/// Verifies, stores, routes, and processes inbound platform webhooks.
#[derive(Clone)]
pub struct WebhookIngestor {
    pool: PgPool,
    engine: Arc<SyncEngine>,
}

impl WebhookIngestor {
    pub fn new(pool: PgPool, engine: Arc<SyncEngine>) -> Self {
        Self { pool, engine }
    }

    /// Run one delivery through the pipeline.
    ///
    /// `raw_body` must be the exact bytes the vendor sent; the signature
    /// covers them, not any reserialization.
    pub async fn ingest(
        &self,
        platform: &Platform,
        topic: &str,
        resource: Option<&str>,
        raw_body: &[u8],
        signature_header: &str,
        secret: &str,
    ) -> Result<IngestOutcome, EngineError> {
        // verified — nothing is stored for a delivery that fails here
        if !verify_hmac_base64(secret, raw_body, signature_header) {
            tracing::warn!(platform_id = platform.id, topic, "Rejected webhook signature");
            return Err(EngineError::SignatureInvalid);
        }

        let payload: Value = serde_json::from_slice(raw_body)
            .map_err(|_| CoreError::Validation("Webhook body is not valid JSON".to_string()))?;

        // stored
        let event = WebhookEventRepo::insert(
            &self.pool,
            &CreateWebhookEvent {
                platform_id: platform.id,
                event_type: topic.to_string(),
                event_data: payload.clone(),
            },
        )
        .await?;

        // routed
        let route = route_topic(platform.platform_type()?, topic, resource);
        tracing::info!(
            platform_id = platform.id,
            event_id = event.id,
            topic,
            route = ?route,
            "Stored webhook event"
        );

        match route {
            WebhookRoute::OrderUpsert => {
                let order = normalize_order(&payload)?;
                let input = UpsertOrder::from_normalized(platform.user_id, platform.id, order);
                let stored = OrderRepo::upsert(&self.pool, &input).await?;
                if stored.is_none() {
                    // Out-of-order redelivery; the newer snapshot stays.
                    tracing::debug!(event_id = event.id, "Stale order delivery discarded");
                }
            }
            WebhookRoute::InventoryChanged => {
                // The event carries no authoritative quantity; reconcile
                // the whole active set in the background, on the same lock
                // table every other sync path uses.
                let engine = Arc::clone(&self.engine);
                let user_id = platform.user_id;
                tokio::spawn(async move {
                    let cancel = CancellationToken::new();
                    if let Err(error) = engine.sync_all(user_id, &cancel).await {
                        tracing::warn!(
                            %error,
                            user_id,
                            "Webhook-triggered reconciliation did not run"
                        );
                    }
                });
            }
            WebhookRoute::Ignored => {
                tracing::debug!(event_id = event.id, topic, "Topic not acted on");
            }
        }

        // processed
        if !WebhookEventRepo::mark_processed(&self.pool, event.id).await? {
            tracing::debug!(event_id = event.id, "Event was already processed");
        }

        Ok(IngestOutcome {
            event_id: event.id,
            route,
        })
    }
}
