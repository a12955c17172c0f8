use crate::db::models::ClientSetting;
use crate::error::AppResult;
use sqlx::SqlitePool;

pub async fn get_setting(pool: &SqlitePool, key: &str) -> AppResult<Option<ClientSetting>> {
    let setting = sqlx::query_as::<_, ClientSetting>(
        "SELECT key, value, updated_at FROM client_settings WHERE key = ?",
    )
    .bind(key)
    .fetch_optional(pool)
    .await?;

    Ok(setting)
}

// Overwrites any previous value under the same key
pub async fn put_setting(pool: &SqlitePool, key: &str, value: String) -> AppResult<()> {
    let setting = ClientSetting::new(key, value);

    sqlx::query(
        "INSERT INTO client_settings (key, value, updated_at)
         VALUES (?, ?, ?)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
    )
    .bind(&setting.key)
    .bind(&setting.value)
    .bind(&setting.updated_at)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn delete_setting(pool: &SqlitePool, key: &str) -> AppResult<()> {
    sqlx::query("DELETE FROM client_settings WHERE key = ?")
        .bind(key)
        .execute(pool)
        .await?;

    Ok(())
}
