use crate::domain::events::EscrowEvent;
use crate::domain::ports::EventSink;
use tokio::sync::mpsc::UnboundedSender;

/// Publishes every notification as an `info` level tracing event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&mut self, event: EscrowEvent) {
        match serde_json::to_string(&event) {
            Ok(payload) => {
                tracing::info!(
                    target: "escrow_ledger::events",
                    event = event.name(),
                    tx_id = event.transaction_id(),
                    %payload,
                    "escrow event"
                );
            }
            Err(e) => {
                tracing::warn!(event = event.name(), error = %e, "failed to encode escrow event");
            }
        }
    }
}

/// Forwards notifications to a channel consumer.
///
/// A dropped receiver is not an error for the engine: notifications are
/// best-effort, so the event is discarded.
impl EventSink for UnboundedSender<EscrowEvent> {
    fn emit(&mut self, event: EscrowEvent) {
        if let Err(e) = self.send(event) {
            tracing::debug!(event = e.0.name(), "event receiver dropped");
        }
    }
}
