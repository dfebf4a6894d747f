/**
 * Komik Catalog
 *
 * CRUD handlers and database operations for catalog items. The stock
 * counter on each komik is additionally mutated by the stock broadcaster
 * (see `crate::stock`).
 */

pub mod db;
pub mod handlers;

pub use db::Komik;
