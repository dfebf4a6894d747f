/**
 * Stock Update Broadcaster
 *
 * A single hub owning the connection registry and the event queue. It is
 * constructed once at startup and shared by reference with every WebSocket
 * handler; there is no ambient global state.
 *
 * # Processing
 *
 * Events are drained by one worker task in FIFO order, one at a time, so no
 * two stock mutations are ever applied concurrently. Per event the worker
 * loads the komik, applies the delta (zero floor on decrement), persists the
 * result and only then broadcasts the full updated komik to every registered
 * connection. An event for a missing komik is logged and dropped; a failed
 * save is logged and suppresses the broadcast.
 *
 * # Delivery
 *
 * Fan-out is best-effort: a connection whose channel send fails is removed
 * from the registry on the spot and delivery continues to the rest. Because
 * each connection's channel is unbounded, a send only fails once the
 * connection's writer task has stopped, i.e. the socket is gone.
 */

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::ws::Message;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::stock::protocol::StockUpdate;
use crate::stock::store::StockStore;

/// Outbound channel for one registered viewer connection.
pub type ClientSender = mpsc::UnboundedSender<Message>;

/// The stock update hub: connection registry plus event queue.
pub struct StockBroadcaster {
    store: Arc<dyn StockStore>,
    /// Registry of open connections. One lock guards registration,
    /// deregistration and broadcast iteration.
    clients: Mutex<HashMap<Uuid, ClientSender>>,
    queue: mpsc::UnboundedSender<StockUpdate>,
}

impl StockBroadcaster {
    /// Create the hub and spawn its worker task.
    pub fn new(store: Arc<dyn StockStore>) -> Arc<Self> {
        let (queue, rx) = mpsc::unbounded_channel();

        let hub = Arc::new(Self {
            store,
            clients: Mutex::new(HashMap::new()),
            queue,
        });

        tokio::spawn(Arc::clone(&hub).process(rx));

        hub
    }

    /// Enqueue a stock-change event for sequential processing. Never blocks
    /// the submitting connection.
    pub fn submit(&self, update: StockUpdate) {
        if self.queue.send(update).is_err() {
            // Only possible if the worker task died.
            tracing::error!("Stock queue is closed; dropping update");
        }
    }

    /// Register a viewer connection. Returns the id used to deregister it.
    pub fn register(&self, sender: ClientSender) -> Uuid {
        let id = Uuid::new_v4();
        let mut clients = self.clients.lock().unwrap();
        clients.insert(id, sender);
        tracing::info!("Viewer {} connected ({} total)", id, clients.len());
        id
    }

    /// Remove a connection from the registry. Events it already submitted
    /// stay on the queue and are still processed.
    pub fn unregister(&self, id: Uuid) {
        let mut clients = self.clients.lock().unwrap();
        if clients.remove(&id).is_some() {
            tracing::info!("Viewer {} disconnected ({} total)", id, clients.len());
        }
    }

    /// Number of currently registered connections.
    pub fn client_count(&self) -> usize {
        self.clients.lock().unwrap().len()
    }

    /// Worker loop: drains the queue strictly in submission order.
    async fn process(self: Arc<Self>, mut rx: mpsc::UnboundedReceiver<StockUpdate>) {
        while let Some(update) = rx.recv().await {
            self.handle_update(update).await;
        }
        tracing::info!("Stock queue closed; worker exiting");
    }

    /// Apply one stock-change event and broadcast the resulting state.
    pub(crate) async fn handle_update(&self, update: StockUpdate) {
        let mut komik = match self.store.find_komik(update.komik_id).await {
            Ok(Some(komik)) => komik,
            Ok(None) => {
                tracing::warn!(
                    "Komik {} not found; discarding stock update from user {}",
                    update.komik_id,
                    update.user_id
                );
                return;
            }
            Err(e) => {
                tracing::error!("Failed to load komik {}: {}", update.komik_id, e);
                return;
            }
        };

        komik.stok = update.action.apply(komik.stok);

        // Broadcast only after the new state is confirmed persisted.
        if let Err(e) = self.store.save_stok(&komik).await {
            tracing::error!(
                "Failed to persist stock for komik {}: {}; skipping broadcast",
                komik.id,
                e
            );
            return;
        }

        match serde_json::to_string(&komik) {
            Ok(payload) => self.broadcast(payload),
            Err(e) => tracing::error!("Failed to serialize komik {}: {}", komik.id, e),
        }
    }

    /// Push a payload to every registered connection, pruning any connection
    /// whose delivery fails.
    fn broadcast(&self, payload: String) {
        let mut clients = self.clients.lock().unwrap();
        clients.retain(|id, sender| {
            match sender.send(Message::Text(payload.clone().into())) {
                Ok(()) => true,
                Err(_) => {
                    tracing::warn!("Dropping viewer {}: delivery failed", id);
                    false
                }
            }
        });
    }
}
