//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 读写同步器集成测试

use crate::common::{setup_logging, FailingStore, TestUser};
use oxsync::backend::MemoryStore;
use oxsync::key::compose_key;
use oxsync::serialization::{Codec, CodecEnum, JsonCodec};
use oxsync::{SyncedStore, Target};
use serde_json::json;

#[path = "../common/mod.rs"]
mod common;

fn new_client() -> SyncedStore<MemoryStore> {
    SyncedStore::new(MemoryStore::new(), CodecEnum::Json(JsonCodec::new()))
}

#[test]
fn test_key_composition() {
    assert_eq!(compose_key("user", &json!(7)), "user.7");
    assert_eq!(compose_key("order", &json!("a1")), "order.a1");
}

#[tokio::test]
async fn test_write_then_raw_read_round_trip() {
    setup_logging();
    let client = new_client();
    let user = TestUser::full(7, "Ann", "ann@example.com");

    client
        .add_object("user", "id", Target::one(&user))
        .await
        .expect("Add should succeed");

    let key_bytes = client.codec().key_to_bytes("user.7");
    let raw = client.store().raw(&key_bytes).expect("Key should exist");
    let map = client.codec().value_from_bytes(&raw).unwrap();
    assert_eq!(map.get("id"), Some(&json!(7)));
    assert_eq!(map.get("name"), Some(&json!("Ann")));
}

#[tokio::test]
async fn test_select_merges_cached_attributes() {
    setup_logging();
    let client = new_client();
    client
        .add_object(
            "user",
            "id",
            Target::one(&TestUser::full(7, "Ann", "ann@example.com")),
        )
        .await
        .unwrap();

    // 目标已持有name，缓存不得覆盖；email缺失，应被填充
    let mut hydrated = TestUser {
        id: Some(7),
        name: Some("Override".to_string()),
        email: None,
    };
    client
        .select("user", "id", &[], Target::one(&mut hydrated))
        .await
        .unwrap();

    assert_eq!(hydrated.id, Some(7));
    assert_eq!(hydrated.name, Some("Override".to_string()));
    assert_eq!(hydrated.email, Some("ann@example.com".to_string()));
}

#[tokio::test]
async fn test_select_with_filter_restricts_merge() {
    setup_logging();
    let client = new_client();
    client
        .add_object(
            "user",
            "id",
            Target::one(&TestUser::full(7, "Ann", "ann@example.com")),
        )
        .await
        .unwrap();

    let mut hydrated = TestUser::with_id(7);
    client
        .select("user", "id", &["name"], Target::one(&mut hydrated))
        .await
        .unwrap();

    assert_eq!(hydrated.name, Some("Ann".to_string()));
    assert_eq!(hydrated.email, None);
}

#[tokio::test]
async fn test_select_miss_merges_nothing() {
    setup_logging();
    let client = new_client();

    let mut hydrated = TestUser::with_id(404);
    client
        .select("user", "id", &[], Target::one(&mut hydrated))
        .await
        .expect("Miss is not an error");

    assert_eq!(hydrated, TestUser::with_id(404));
}

#[tokio::test]
async fn test_null_identifier_write_is_inert() {
    setup_logging();
    let client = new_client();
    let user = TestUser {
        id: None,
        name: Some("Ann".to_string()),
        email: None,
    };

    client
        .add_object("user", "id", Target::one(&user))
        .await
        .unwrap();

    assert_eq!(client.store().set_calls(), 0);
    assert_eq!(client.store().entry_count(), 0);
}

#[tokio::test]
async fn test_blank_alias_never_invokes_set() {
    setup_logging();
    let client = new_client();
    let user = TestUser::full(7, "Ann", "ann@example.com");

    client.add_object("", "id", Target::one(&user)).await.unwrap();
    client
        .add_object("   ", "id", Target::one(&user))
        .await
        .unwrap();

    assert_eq!(client.store().set_calls(), 0);
}

#[tokio::test]
async fn test_null_identifier_read_never_invokes_get() {
    setup_logging();
    let client = new_client();

    let mut hydrated = TestUser {
        id: None,
        name: None,
        email: None,
    };
    client
        .select("user", "id", &[], Target::one(&mut hydrated))
        .await
        .unwrap();

    assert_eq!(client.store().get_calls(), 0);
}

#[tokio::test]
async fn test_absent_target_is_noop() {
    setup_logging();
    let client = new_client();

    client
        .add_object::<TestUser>("user", "id", Target::One(None))
        .await
        .unwrap();
    let mut_target: Target<&mut TestUser> = Target::One(None);
    client.select("user", "id", &[], mut_target).await.unwrap();

    assert_eq!(client.store().set_calls(), 0);
    assert_eq!(client.store().get_calls(), 0);
}

#[tokio::test]
async fn test_collection_write_equals_individual_writes() {
    setup_logging();
    let users = vec![
        TestUser::full(1, "A", "a@example.com"),
        TestUser::full(2, "B", "b@example.com"),
        TestUser::full(3, "C", "c@example.com"),
    ];

    let collection_client = new_client();
    collection_client
        .add_object("user", "id", Target::from(&users[..]))
        .await
        .unwrap();

    let individual_client = new_client();
    for user in &users {
        individual_client
            .add_object("user", "id", Target::one(user))
            .await
            .unwrap();
    }

    for id in 1..=3u64 {
        let key_bytes = collection_client
            .codec()
            .key_to_bytes(&compose_key("user", &json!(id)));
        assert_eq!(
            collection_client.store().raw(&key_bytes),
            individual_client.store().raw(&key_bytes),
            "Store state must match for id {}",
            id
        );
        assert!(collection_client.store().raw(&key_bytes).is_some());
    }
}

#[tokio::test]
async fn test_collection_select_hydrates_each_item() {
    setup_logging();
    let client = new_client();
    let users = vec![
        TestUser::full(1, "A", "a@example.com"),
        TestUser::full(2, "B", "b@example.com"),
    ];
    client
        .add_object("user", "id", Target::from(&users[..]))
        .await
        .unwrap();

    let mut hydrated = vec![TestUser::with_id(1), TestUser::with_id(2)];
    client
        .select("user", "id", &[], Target::from(&mut hydrated[..]))
        .await
        .unwrap();

    assert_eq!(hydrated[0].name, Some("A".to_string()));
    assert_eq!(hydrated[1].name, Some("B".to_string()));
}

#[tokio::test]
async fn test_collection_skips_items_without_identifier() {
    setup_logging();
    let client = new_client();
    let users = vec![
        TestUser::full(1, "A", "a@example.com"),
        TestUser {
            id: None,
            name: Some("B".to_string()),
            email: None,
        },
    ];

    client
        .add_object("user", "id", Target::from(&users[..]))
        .await
        .unwrap();

    // 只有带标识符的那一项落库，另一项静默跳过
    assert_eq!(client.store().entry_count(), 1);
    assert_eq!(client.store().set_calls(), 1);
}

#[tokio::test]
async fn test_transport_failure_propagates_on_write() {
    setup_logging();
    let client = SyncedStore::new(FailingStore, CodecEnum::Json(JsonCodec::new()));
    let user = TestUser::full(7, "Ann", "ann@example.com");

    let result = client.add_object("user", "id", Target::one(&user)).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_transport_failure_propagates_on_read() {
    setup_logging();
    let client = SyncedStore::new(FailingStore, CodecEnum::Json(JsonCodec::new()));

    let mut hydrated = TestUser::with_id(7);
    let result = client
        .select("user", "id", &[], Target::one(&mut hydrated))
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_rewrite_is_last_writer_wins() {
    setup_logging();
    let client = new_client();
    let first = TestUser::full(7, "Ann", "ann@example.com");
    let second = TestUser::full(7, "Ann", "new@example.com");

    client.add_object("user", "id", Target::one(&first)).await.unwrap();
    client
        .add_object("user", "id", Target::one(&second))
        .await
        .unwrap();

    let key_bytes = client.codec().key_to_bytes("user.7");
    let map = client
        .codec()
        .value_from_bytes(&client.store().raw(&key_bytes).unwrap())
        .unwrap();
    assert_eq!(map.get("email"), Some(&json!("new@example.com")));
    assert_eq!(client.store().entry_count(), 1);
}
