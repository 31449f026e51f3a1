//! Redis store client.
//!
//! Thin typed layer over a shared [`ConnectionManager`]: JSON records in
//! hashes, sorted-set indexes and lists. Every call clones the manager,
//! which multiplexes onto one connection and reconnects on failure.

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client, RedisError};
use serde::{de::DeserializeOwned, Serialize};

use crate::config::Config;
use crate::errors::{AppError, AppResult};

/// Store reachability check used by the health endpoint.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn ping(&self) -> AppResult<()>;
}

/// Redis client wrapper with connection management.
#[derive(Clone)]
pub struct Cache {
    connection: ConnectionManager,
}

impl Cache {
    /// Connect to Redis.
    pub async fn connect(config: &Config) -> Result<Self, RedisError> {
        let client = Client::open(config.redis_url.as_str())?;
        let connection = ConnectionManager::new(client).await?;

        tracing::info!("Redis store connected");

        Ok(Self { connection })
    }

    // =========================================================================
    // Hash Operations
    // =========================================================================

    /// Read one JSON record from a hash field.
    pub async fn hget_json<T: DeserializeOwned>(&self, key: &str, field: &str) -> AppResult<Option<T>> {
        let mut conn = self.connection.clone();
        let value: Option<String> = conn.hget(key, field).await.map_err(cache_error)?;

        value.map(|json| decode(&json)).transpose()
    }

    /// Read several JSON records from a hash; missing fields are skipped.
    pub async fn hmget_json<T: DeserializeOwned>(&self, key: &str, fields: &[String]) -> AppResult<Vec<T>> {
        if fields.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.connection.clone();
        let values: Vec<Option<String>> = redis::cmd("HMGET")
            .arg(key)
            .arg(fields)
            .query_async(&mut conn)
            .await
            .map_err(cache_error)?;

        values.into_iter().flatten().map(|json| decode(&json)).collect()
    }

    /// Read every record of a hash (field order is whatever Redis returns).
    pub async fn hvals_json<T: DeserializeOwned>(&self, key: &str) -> AppResult<Vec<T>> {
        let mut conn = self.connection.clone();
        let values: Vec<String> = conn.hvals(key).await.map_err(cache_error)?;

        values.iter().map(|json| decode(json)).collect()
    }

    /// Write a JSON record into a hash field, replacing any previous value.
    pub async fn hset_json<T: Serialize>(&self, key: &str, field: &str, value: &T) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let json = encode(value)?;

        let _: () = conn.hset(key, field, json).await.map_err(cache_error)?;
        Ok(())
    }

    /// Write a JSON record only if the field is absent (`HSETNX`).
    ///
    /// Returns `false` when the field already existed; the stored value is
    /// left untouched in that case.
    pub async fn hset_nx_json<T: Serialize>(&self, key: &str, field: &str, value: &T) -> AppResult<bool> {
        let mut conn = self.connection.clone();
        let json = encode(value)?;

        let written: bool = conn.hset_nx(key, field, json).await.map_err(cache_error)?;
        Ok(written)
    }

    /// Add `delta` to a numeric member of the JSON record in a hash field.
    ///
    /// Decode, increment and write back run as one Lua script, so concurrent
    /// callers never overwrite each other. Returns the updated record, or
    /// `None` when the field does not exist.
    pub async fn hincr_json<T: DeserializeOwned>(
        &self,
        key: &str,
        field: &str,
        member: &str,
        delta: i64,
    ) -> AppResult<Option<T>> {
        let mut conn = self.connection.clone();

        let script = r#"
            local raw = redis.call("HGET", KEYS[1], ARGV[1])
            if not raw then
                return false
            end
            local record = cjson.decode(raw)
            record[ARGV[2]] = (tonumber(record[ARGV[2]]) or 0) + tonumber(ARGV[3])
            local updated = cjson.encode(record)
            redis.call("HSET", KEYS[1], ARGV[1], updated)
            return updated
        "#;

        let value: Option<String> = redis::cmd("EVAL")
            .arg(script)
            .arg(1)
            .arg(key)
            .arg(field)
            .arg(member)
            .arg(delta)
            .query_async(&mut conn)
            .await
            .map_err(cache_error)?;

        value.map(|json| decode(&json)).transpose()
    }

    // =========================================================================
    // Sorted Set Operations
    // =========================================================================

    /// Add (or rescore) a member of a sorted set.
    pub async fn zadd(&self, key: &str, member: &str, score: i64) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let _: () = conn.zadd(key, member, score).await.map_err(cache_error)?;
        Ok(())
    }

    /// All members of a sorted set, highest score first.
    pub async fn zrevrange_all(&self, key: &str) -> AppResult<Vec<String>> {
        let mut conn = self.connection.clone();
        let members: Vec<String> = conn.zrevrange(key, 0, -1).await.map_err(cache_error)?;
        Ok(members)
    }

    // =========================================================================
    // List Operations
    // =========================================================================

    /// Append a JSON record to a list.
    pub async fn rpush_json<T: Serialize>(&self, key: &str, value: &T) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let json = encode(value)?;

        let _: () = conn.rpush(key, json).await.map_err(cache_error)?;
        Ok(())
    }

    /// Read a whole list of JSON records in insertion order.
    pub async fn lrange_json<T: DeserializeOwned>(&self, key: &str) -> AppResult<Vec<T>> {
        let mut conn = self.connection.clone();
        let values: Vec<String> = conn.lrange(key, 0, -1).await.map_err(cache_error)?;

        values.iter().map(|json| decode(json)).collect()
    }
}

#[async_trait]
impl HealthCheck for Cache {
    async fn ping(&self) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(cache_error)?;
        Ok(())
    }
}

fn encode<T: Serialize>(value: &T) -> AppResult<String> {
    serde_json::to_string(value)
        .map_err(|e| AppError::internal(format!("Store serialization error: {}", e)))
}

fn decode<T: DeserializeOwned>(json: &str) -> AppResult<T> {
    serde_json::from_str(json)
        .map_err(|e| AppError::internal(format!("Store deserialization error: {}", e)))
}

/// Convert Redis error to AppError.
fn cache_error(e: RedisError) -> AppError {
    tracing::error!("Redis error: {}", e);
    AppError::Store(e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::User;

    #[test]
    fn test_json_round_trip_of_stored_record() {
        let user = User::new("alice", "pw");
        let json = encode(&user).unwrap();
        let back: User = decode(&json).unwrap();
        assert_eq!(back, user);
    }

    #[test]
    fn test_corrupt_record_is_internal_error() {
        let result: AppResult<User> = decode("{not json");
        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
