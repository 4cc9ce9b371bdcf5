//! Shared cache implementation on Redis

mod redis_client;

pub use redis_client::RedisClient;
