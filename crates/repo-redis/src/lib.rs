// SPDX-FileCopyrightText: Copyright (C) 2018 Navith
// SPDX-License-Identifier: AGPL-3.0-or-later

//! [`DocumentStore`] on top of Redis.
//!
//! Layout of a collection `<c>`:
//!
//! - `<c>:<key>`: hash with the fields of a document, JSON encoded for the
//!   [structured fields](genreguide_repo::structured_fields) and plain strings otherwise
//! - `<c>`: set with the keys of all documents
//! - `<c>:by:<field>`: sorted set with the keys of all documents, scored by `<field>`
//!
//! Date strings (`YYYY-MM-DD`) are scored as the integer `YYYYMMDD`.

use std::collections::HashMap;

use bb8::{Pool, RunError};
use bb8_redis::RedisConnectionManager;
use redis::{AsyncCommands as _, RedisError};
use serde_json::Value;

use genreguide_repo::prelude::*;

pub type ConnectionPool = Pool<RedisConnectionManager>;

#[derive(Debug, Clone)]
pub struct RedisStore {
    pool: ConnectionPool,
}

fn document_key(collection: &str, key: &str) -> String {
    format!("{collection}:{key}")
}

fn index_key(collection: &str, field: &str) -> String {
    format!("{collection}:by:{field}")
}

fn redis_error(err: RedisError) -> RepoError {
    RepoError::Other(err.into())
}

fn pool_error(err: RunError<RedisError>) -> RepoError {
    match err {
        RunError::User(err) => redis_error(err),
        RunError::TimedOut => RepoError::Aborted,
    }
}

/// Numeric score of a field value in a range index.
fn score_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => date_score(text),
        _ => None,
    }
}

fn date_score(text: &str) -> Option<f64> {
    let mut parts = text.splitn(3, '-');
    let year = parts.next()?;
    let month = parts.next()?;
    let day = parts.next()?;
    if year.len() != 4 || month.len() != 2 || day.len() != 2 {
        return None;
    }
    let year: u32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    let day: u32 = day.parse().ok()?;
    Some(f64::from(year * 10_000 + month * 100 + day))
}

fn score_bound(bound: Option<&Value>, unbounded: &str) -> RepoResult<String> {
    let Some(value) = bound else {
        return Ok(unbounded.to_owned());
    };
    score_of(value)
        .map(|score| score.to_string())
        .ok_or_else(|| RepoError::Other(anyhow::anyhow!("unsupported range bound {value}")))
}

/// Decode the field values of a hash.
///
/// Only structured fields are parsed as JSON. Everything else is
/// taken verbatim, e.g. a name `null` remains the string `"null"`.
fn decode_fields(
    collection: &str,
    key: &str,
    hash: HashMap<String, String>,
) -> RepoResult<Fields> {
    let structured = genreguide_repo::structured_fields(collection);
    hash.into_iter()
        .map(|(name, raw)| {
            if !structured.contains(&name.as_str()) {
                return Ok((name, Value::String(raw)));
            }
            let value = serde_json::from_str(&raw).map_err(|err| {
                RepoError::Other(anyhow::anyhow!(
                    "invalid JSON in field {name} of {document}: {err}",
                    document = document_key(collection, key),
                ))
            })?;
            Ok((name, value))
        })
        .collect()
}

impl RedisStore {
    #[must_use]
    pub const fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    pub async fn connect(url: &str, pool_max_size: u32) -> anyhow::Result<Self> {
        log::info!("Connecting to Redis with a pool of max. size {pool_max_size}");
        let manager = RedisConnectionManager::new(url)?;
        let pool = Pool::builder()
            .max_size(pool_max_size)
            .build(manager)
            .await?;
        Ok(Self::new(pool))
    }

    async fn load_documents(&self, collection: &str, keys: Vec<String>) -> RepoResult<Vec<Document>> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }
        let mut pipe = redis::pipe();
        for key in &keys {
            pipe.hgetall(document_key(collection, key));
        }
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let hashes: Vec<HashMap<String, String>> =
            pipe.query_async(&mut *conn).await.map_err(redis_error)?;
        debug_assert_eq!(keys.len(), hashes.len());
        keys.into_iter()
            .zip(hashes)
            .map(|(key, hash)| {
                let fields = decode_fields(collection, &key, hash)?;
                Ok(Document::new(key, fields))
            })
            .collect()
    }
}

impl DocumentStore for RedisStore {
    async fn load_document(&self, collection: &str, key: &str) -> RepoResult<Document> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let hash: HashMap<String, String> = conn
            .hgetall(document_key(collection, key))
            .await
            .map_err(redis_error)?;
        if hash.is_empty() {
            // Redis does not distinguish between empty and missing hashes
            return Err(RepoError::NotFound);
        }
        let fields = decode_fields(collection, key, hash)?;
        Ok(Document::new(key, fields))
    }

    async fn query_range(&self, collection: &str, query: &RangeQuery) -> RepoResult<Vec<Document>> {
        if query.limit == 0 {
            return Ok(Vec::new());
        }
        let min = score_bound(query.min.as_ref(), "-inf")?;
        let max = score_bound(query.max.as_ref(), "+inf")?;
        let mut cmd = redis::cmd("ZRANGE");
        cmd.arg(index_key(collection, query.order_by));
        match query.direction {
            SortDirection::Ascending => {
                cmd.arg(&min).arg(&max).arg("BYSCORE");
            }
            SortDirection::Descending => {
                cmd.arg(&max).arg(&min).arg("BYSCORE").arg("REV");
            }
        }
        // A negative count returns all remaining elements
        let count = i64::try_from(query.limit).unwrap_or(-1);
        cmd.arg("LIMIT").arg(0).arg(count);
        let keys: Vec<String> = {
            let mut conn = self.pool.get().await.map_err(pool_error)?;
            cmd.query_async(&mut *conn).await.map_err(redis_error)?
        };
        log::debug!(
            "Range query on {collection} by {order_by} returned {num_keys} key(s)",
            order_by = query.order_by,
            num_keys = keys.len(),
        );
        // Dangling index entries are returned as empty documents
        self.load_documents(collection, keys).await
    }

    async fn load_all_documents(&self, collection: &str) -> RepoResult<Vec<Document>> {
        let keys: Vec<String> = {
            let mut conn = self.pool.get().await.map_err(pool_error)?;
            conn.smembers(collection).await.map_err(redis_error)?
        };
        let documents = self.load_documents(collection, keys).await?;
        Ok(documents
            .into_iter()
            .filter(|document| !document.is_empty())
            .collect())
    }
}
