/**
 * Komik Backend Library
 *
 * Backend for a comic-book catalog with user comments, role-based access
 * control and a live stock-update feed over WebSocket.
 *
 * # Modules
 *
 * - `auth` - Login/registration handlers, JWT token issuance, user storage
 * - `middleware` - Bearer-token authentication gate and role extractors
 * - `komik` - Catalog CRUD handlers and database operations
 * - `comments` - Comment CRUD handlers with per-role visibility rules
 * - `stock` - Stock update broadcaster (connection registry, event queue, worker)
 * - `routes` - Router wiring
 * - `server` - Configuration, shared state and application bootstrap
 * - `error` - Error taxonomy and HTTP response mapping
 */

pub mod auth;
pub mod comments;
pub mod error;
pub mod komik;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod stock;
