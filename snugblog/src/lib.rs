//! Blogging with likes, connections, direct messages and a user directory.
//!
//! [`service::SocialService`] holds the operations. It runs over any
//! [`store::SocialStore`]: [`store::RedisStore`] keeps everything in Redis Stack
//! and mutates through Lua scripts, [`store::MemoryStore`] keeps it in process.
//! [`routes`] wraps the operations in redirect-and-flash replies.

pub mod config;
pub mod errors;
pub mod forms;
pub mod id;
pub mod keys;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod service;
pub mod store;
pub mod types;
pub mod validators;

pub use config::AppConfig;
pub use errors::*;
pub use models::*;
pub use service::{SocialService, UserListKind};
pub use store::{MemoryStore, RedisStore, SocialStore};
pub use types::{MemberSet, Relationship};

pub use redis;
pub use redis::aio::ConnectionManager;

/// Deletes every key matching `pattern` with SCAN + DEL, returning how many went.
pub async fn purge_keys(conn: &mut ConnectionManager, pattern: &str) -> Result<u64, SocialError> {
    const SCAN_BATCH: usize = 500;
    let mut cursor: u64 = 0;
    let mut removed: u64 = 0;

    loop {
        let (next, keys): (u64, Vec<String>) = redis::cmd("SCAN")
            .arg(cursor)
            .arg("MATCH")
            .arg(pattern)
            .arg("COUNT")
            .arg(SCAN_BATCH)
            .query_async(conn)
            .await?;

        if !keys.is_empty() {
            let count: u64 = redis::cmd("DEL").arg(&keys).query_async(conn).await?;
            removed += count;
        }

        if next == 0 {
            return Ok(removed);
        }
        cursor = next;
    }
}
