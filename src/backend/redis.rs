//! Redis Backend
//!
//! Adapter implementing the [`Backend`] trait over a Redis server, issuing
//! the raw commands the trait maps onto (SET, SETEX, GET, INCR, RPUSH,
//! LRANGE, FLUSHDB) through a multiplexed async connection.
//!
//! TTL expiry is handled entirely by the server's expiring-key mechanism.

use async_trait::async_trait;
use tracing::info;

use crate::backend::Backend;
use crate::error::Result;

// == Redis Backend ==
/// Backing store adapter over a Redis server.
///
/// The client is cheap to clone; each operation obtains a multiplexed
/// connection from it. No pooling or retry logic is layered on top.
#[derive(Debug, Clone)]
pub struct RedisBackend {
    client: redis::Client,
}

impl RedisBackend {
    /// Connects to a Redis server and verifies the connection with PING.
    ///
    /// Connection failures surface immediately rather than on first use, so
    /// callers get a defined open-at-startup lifecycle.
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url)?;
        let mut conn = client.get_multiplexed_async_connection().await?;
        redis::cmd("PING").query_async::<()>(&mut conn).await?;
        info!("Connected to backing store at {}", url);
        Ok(Self { client })
    }

    async fn conn(&self) -> Result<redis::aio::MultiplexedConnection> {
        Ok(self.client.get_multiplexed_async_connection().await?)
    }
}

#[async_trait]
impl Backend for RedisBackend {
    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut conn = self.conn().await?;
        redis::cmd("SET")
            .arg(key)
            .arg(value)
            .query_async::<()>(&mut conn)
            .await?;
        Ok(())
    }

    async fn set_ex(&self, key: &str, value: &[u8], ttl_seconds: u64) -> Result<()> {
        let mut conn = self.conn().await?;
        redis::cmd("SETEX")
            .arg(key)
            .arg(ttl_seconds)
            .arg(value)
            .query_async::<()>(&mut conn)
            .await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn().await?;
        let value: Option<Vec<u8>> = redis::cmd("GET").arg(key).query_async(&mut conn).await?;
        Ok(value)
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let mut conn = self.conn().await?;
        let value: i64 = redis::cmd("INCR").arg(key).query_async(&mut conn).await?;
        Ok(value)
    }

    async fn rpush(&self, key: &str, value: &[u8]) -> Result<i64> {
        let mut conn = self.conn().await?;
        let length: i64 = redis::cmd("RPUSH")
            .arg(key)
            .arg(value)
            .query_async(&mut conn)
            .await?;
        Ok(length)
    }

    async fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<Vec<u8>>> {
        let mut conn = self.conn().await?;
        let items: Vec<Vec<u8>> = redis::cmd("LRANGE")
            .arg(key)
            .arg(start)
            .arg(stop)
            .query_async(&mut conn)
            .await?;
        Ok(items)
    }

    async fn flush(&self) -> Result<()> {
        let mut conn = self.conn().await?;
        redis::cmd("FLUSHDB").query_async::<()>(&mut conn).await?;
        Ok(())
    }
}
