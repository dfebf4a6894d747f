/**
 * Persistence Seam for the Stock Broadcaster
 *
 * The broadcaster only ever needs two operations from the catalog store:
 * fetch a komik by id and persist its stock counter. Keeping them behind a
 * trait lets the broadcaster run against an in-memory store in tests.
 */

use async_trait::async_trait;
use sqlx::PgPool;

use crate::komik::db::{self, Komik};

/// The persistence operations the stock broadcaster consumes.
#[async_trait]
pub trait StockStore: Send + Sync {
    /// Fetch a komik by id; `None` when it does not exist.
    async fn find_komik(&self, id: i64) -> Result<Option<Komik>, sqlx::Error>;

    /// Persist the komik's stock counter.
    async fn save_stok(&self, komik: &Komik) -> Result<(), sqlx::Error>;
}

#[async_trait]
impl StockStore for PgPool {
    async fn find_komik(&self, id: i64) -> Result<Option<Komik>, sqlx::Error> {
        db::get_komik_by_id(self, id).await
    }

    async fn save_stok(&self, komik: &Komik) -> Result<(), sqlx::Error> {
        db::save_stok(self, komik.id, komik.stok).await
    }
}
