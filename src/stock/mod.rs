/**
 * Stock Update Broadcaster
 *
 * Live stock feed for the catalog. Clients connect over WebSocket at
 * `GET /komik/updates` (behind the authentication gate), submit stock-change
 * events, and receive the full updated komik after every applied mutation.
 *
 * # Architecture
 *
 * ```text
 * WebSocket connections --> submit() --> event queue (FIFO)
 *                                            |
 *                                     single worker task
 *                                            |
 *                          load komik -> apply delta -> persist
 *                                            |
 *                              broadcast to connection registry
 * ```
 *
 * One worker draining one queue is the concurrency control: every stock
 * mutation funnels through a single serialization point, so no per-item
 * locking is needed and events apply in submission order.
 */

pub mod broadcaster;
pub mod protocol;
pub mod store;
pub mod ws;

pub use broadcaster::StockBroadcaster;
pub use protocol::{StockAction, StockUpdate};
pub use store::StockStore;
