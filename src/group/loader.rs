//! Data source abstraction consulted on a full miss.

use std::future::Future;

use async_trait::async_trait;

// == Loader ==
/// Source of truth for a group's values.
///
/// Any error is treated as a failed load for that key; the group does not
/// retry.
#[async_trait]
pub trait Loader: Send + Sync {
    async fn load(&self, key: &str) -> anyhow::Result<Vec<u8>>;
}

// == Loader Fn ==
/// Adapts an async closure `Fn(String) -> Future<Output = anyhow::Result<Vec<u8>>>`
/// into a `Loader`.
pub struct LoaderFn<F>(F);

#[async_trait]
impl<F, Fut> Loader for LoaderFn<F>
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<Vec<u8>>> + Send,
{
    async fn load(&self, key: &str) -> anyhow::Result<Vec<u8>> {
        (self.0)(key.to_string()).await
    }
}

/// Wraps a closure as a `Loader`.
pub fn loader_fn<F, Fut>(f: F) -> LoaderFn<F>
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<Vec<u8>>> + Send,
{
    LoaderFn(f)
}
