//! Consistent Hash Ring
//!
//! Maps keys to owning peers through `replicas` virtual points per peer.

use std::fmt;

/// Hash function used to place owners and keys on the ring.
pub type HashFn = fn(&[u8]) -> u32;

/// Default number of virtual points per owner.
pub const DEFAULT_REPLICAS: usize = 50;

// == Ring Point ==
/// One virtual node: a position on the ring and the real owner behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingPoint {
    pub hash: u32,
    pub owner: String,
}

// == Hash Ring ==
/// Sorted set of ring points treated as a circle.
///
/// Point placement depends only on the owner name, replica index and hash
/// function, so the same owner set always yields the same ring.
#[derive(Clone)]
pub struct HashRing {
    hash: HashFn,
    replicas: usize,
    points: Vec<RingPoint>,
}

impl HashRing {
    // == Constructor ==
    /// Creates an empty ring. `hash` defaults to CRC-32C.
    pub fn new(replicas: usize, hash: Option<HashFn>) -> Self {
        Self {
            hash: hash.unwrap_or(crc32c::crc32c),
            replicas,
            points: Vec::new(),
        }
    }

    // == Add ==
    /// Places `replicas` points for each owner, seeded by `"{i}{owner}"`.
    pub fn add<I, S>(&mut self, owners: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for owner in owners {
            let owner = owner.as_ref();
            for i in 0..self.replicas {
                let seed = format!("{}{}", i, owner);
                self.points.push(RingPoint {
                    hash: (self.hash)(seed.as_bytes()),
                    owner: owner.to_string(),
                });
            }
        }
        self.points
            .sort_by(|a, b| a.hash.cmp(&b.hash).then_with(|| a.owner.cmp(&b.owner)));
    }

    // == Remove ==
    /// Drops every point belonging to `owner`.
    pub fn remove(&mut self, owner: &str) {
        self.points.retain(|point| point.owner != owner);
    }

    // == Get ==
    /// Returns the owner of the first point clockwise from `hash(key)`.
    pub fn get(&self, key: &str) -> Option<&str> {
        if self.points.is_empty() {
            return None;
        }

        let hash = (self.hash)(key.as_bytes());
        let idx = self.points.partition_point(|point| point.hash < hash);
        // Past the last point wraps to the first
        let point = &self.points[idx % self.points.len()];
        Some(point.owner.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn points(&self) -> &[RingPoint] {
        &self.points
    }
}

impl fmt::Debug for HashRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashRing")
            .field("replicas", &self.replicas)
            .field("points", &self.points.len())
            .finish()
    }
}
