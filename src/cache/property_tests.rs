//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the byte budget and recency ordering of `LruStore`.

use proptest::prelude::*;
use std::collections::{HashSet, VecDeque};

use crate::cache::{ByteView, LruStore};

// == Strategies ==
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9]{1,12}"
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,48}"
}

#[derive(Debug, Clone)]
enum StoreOp {
    Add { key: String, value: String },
    Get { key: String },
}

fn store_op_strategy() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        (key_strategy(), value_strategy()).prop_map(|(key, value)| StoreOp::Add { key, value }),
        key_strategy().prop_map(|key| StoreOp::Get { key }),
    ]
}

/// Straightforward reference model: front = most recent.
#[derive(Default)]
struct Model {
    order: VecDeque<(String, String)>,
    max_bytes: usize,
}

impl Model {
    fn used(&self) -> usize {
        self.order.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    fn add(&mut self, key: &str, value: &str) {
        self.order.retain(|(k, _)| k != key);
        self.order.push_front((key.to_string(), value.to_string()));
        while self.max_bytes != 0 && self.used() > self.max_bytes {
            self.order.pop_back();
        }
    }

    fn get(&mut self, key: &str) -> Option<String> {
        let pos = self.order.iter().position(|(k, _)| k == key)?;
        let entry = self.order.remove(pos)?;
        let value = entry.1.clone();
        self.order.push_front(entry);
        Some(value)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Tracked size never exceeds the budget once an add returns.
    #[test]
    fn prop_byte_budget_enforced(
        max_bytes in 1usize..200,
        ops in prop::collection::vec(store_op_strategy(), 1..120)
    ) {
        let mut store = LruStore::new(max_bytes, None);

        for op in ops {
            match op {
                StoreOp::Add { key, value } => {
                    store.add(&key, ByteView::from(value.as_str()));
                    prop_assert!(
                        store.used_bytes() <= max_bytes,
                        "used {} exceeds budget {}",
                        store.used_bytes(),
                        max_bytes
                    );
                }
                StoreOp::Get { key } => {
                    let before = store.used_bytes();
                    let _ = store.get(&key);
                    prop_assert_eq!(store.used_bytes(), before);
                }
            }
        }
    }

    // The store agrees with a naive recency-ordered model on every lookup.
    #[test]
    fn prop_matches_reference_model(
        max_bytes in prop_oneof![Just(0usize), 1usize..160],
        ops in prop::collection::vec(store_op_strategy(), 1..150)
    ) {
        let mut store = LruStore::new(max_bytes, None);
        let mut model = Model { max_bytes, ..Model::default() };

        for op in ops {
            match op {
                StoreOp::Add { key, value } => {
                    store.add(&key, ByteView::from(value.as_str()));
                    model.add(&key, &value);
                }
                StoreOp::Get { key } => {
                    let got = store.get(&key).map(|v| v.to_string());
                    prop_assert_eq!(got, model.get(&key));
                }
            }
            prop_assert_eq!(store.len(), model.order.len());
            prop_assert_eq!(store.used_bytes(), model.used());
        }
    }

    // A key read just before an overflowing add survives; the oldest other key goes.
    #[test]
    fn prop_access_protects_from_eviction(
        keys in prop::collection::hash_set("[a-z]{4}", 3..8)
    ) {
        let keys: Vec<String> = keys.into_iter().collect();
        let entry_size = 4 + 4;
        let mut store = LruStore::new(entry_size * keys.len(), None);

        for key in &keys {
            store.add(key, ByteView::from("vvvv"));
        }
        store.get(&keys[0]);
        store.add("zzzzz", ByteView::from("vvv"));

        prop_assert!(store.contains(&keys[0]));
        prop_assert!(!store.contains(&keys[1]));
        let survivors: HashSet<&String> = keys.iter().skip(2).collect();
        for key in survivors {
            prop_assert!(store.contains(key));
        }
    }
}

// == Property Test for Error Responses ==
proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    // Error bodies are the plain-text message; status follows the variant.
    #[test]
    fn prop_error_response_is_plain_text(msg in "[a-zA-Z0-9 _-]{1,60}") {
        use crate::error::CacheError;
        use axum::body::to_bytes;
        use axum::response::IntoResponse;

        let rt = tokio::runtime::Runtime::new().unwrap();
        let variants = vec![
            CacheError::InvalidRequest(msg.clone()),
            CacheError::GroupNotFound(msg.clone()),
            CacheError::Loader(msg.clone()),
            CacheError::Internal(msg.clone()),
        ];

        for error in variants {
            let expected = error.to_string();
            let status = error.status_code();
            let response = error.into_response();
            prop_assert_eq!(response.status(), status);

            let content_type = response
                .headers()
                .get("content-type")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            prop_assert!(content_type.starts_with("text/plain"));

            let bytes = rt.block_on(async { to_bytes(response.into_body(), usize::MAX).await.unwrap() });
            prop_assert_eq!(String::from_utf8_lossy(&bytes).to_string(), expected);
        }
    }
}
