/// Key/value storage queries
///
/// The storage table behaves like browser local storage: string keys,
/// string values, and every write replaces the whole value.

use crate::db::Database;
use crate::error::Result;

const UPSERT_ITEM: &str = r#"
    INSERT INTO storage (key, value, updated_at)
    VALUES (?, ?, CURRENT_TIMESTAMP)
    ON CONFLICT(key) DO UPDATE SET
        value = excluded.value,
        updated_at = excluded.updated_at
"#;

impl Database {
    /// Read the value stored under `key`
    ///
    /// # Returns
    /// * `Ok(Some(value))` - The stored value
    /// * `Ok(None)` - Nothing stored under this key
    pub async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM storage WHERE key = ?")
            .bind(key)
            .fetch_optional(self.pool())
            .await?;

        Ok(value)
    }

    /// Store `value` under `key`, replacing any previous value
    pub async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(UPSERT_ITEM)
            .bind(key)
            .bind(value)
            .execute(self.pool())
            .await?;

        Ok(())
    }

    /// Store several key/value pairs atomically
    ///
    /// Either every pair is written or none are.
    pub async fn set_items(&self, items: &[(&str, &str)]) -> Result<()> {
        let mut tx = self.pool().begin().await?;

        for (key, value) in items {
            sqlx::query(UPSERT_ITEM)
                .bind(*key)
                .bind(*value)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    /// Delete the value stored under `key`
    ///
    /// Removing a missing key is not an error.
    pub async fn remove_item(&self, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM storage WHERE key = ?")
            .bind(key)
            .execute(self.pool())
            .await?;

        Ok(())
    }

    /// List all stored keys in lexical order
    pub async fn keys(&self) -> Result<Vec<String>> {
        let keys = sqlx::query_scalar::<_, String>("SELECT key FROM storage ORDER BY key")
            .fetch_all(self.pool())
            .await?;

        Ok(keys)
    }
}
