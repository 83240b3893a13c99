//! Data manager behavior against the in-memory store.

use std::collections::HashSet;
use std::sync::Arc;

use ferrous_model::{Client, ClientType, Realm, User};
use ferrous_store::{DataManager, KeySpace, KvStore, MemoryKvStore};
use serde_json::json;
use uuid::Uuid;

fn manager() -> (Arc<MemoryKvStore>, DataManager<Arc<MemoryKvStore>>) {
    let store = Arc::new(MemoryKvStore::new());
    let mn = DataManager::new(store.clone(), KeySpace::new("test"));
    (store, mn)
}

fn public_client(name: &str) -> Client {
    Client::new(name, ClientType::Public).with_secret(Uuid::new_v4().to_string())
}

fn alice() -> User {
    User::new(json!({"preferred_username": "alice", "email": "alice@example.com"}))
}

#[tokio::test]
async fn realm_round_trip_returns_seeded_clients() {
    let (_, mn) = manager();
    let c1 = public_client("app1");
    let c2 = public_client("app2");
    let realm = Realm::new("acme", 3600, 1800)
        .with_client(c1.clone())
        .with_client(c2.clone());

    mn.create_realm(&realm).await.unwrap();

    let back = mn.get_realm("acme").await.unwrap();
    assert_eq!(back.name, "acme");
    assert_eq!(back.token_expiration, 3600);
    assert_eq!(back.refresh_token_expiration, 1800);

    let got: HashSet<(Uuid, String)> = mn
        .get_clients_from_realm("acme")
        .await
        .unwrap()
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();
    let expected: HashSet<(Uuid, String)> =
        [(c1.id, c1.name), (c2.id, c2.name)].into_iter().collect();
    assert_eq!(got, expected);
}

#[tokio::test]
async fn create_realm_twice_is_a_collision() {
    let (_, mn) = manager();
    mn.create_realm(&Realm::new("acme", 3600, 1800)).await.unwrap();

    let err = mn
        .create_realm(&Realm::new("acme", 60, 30))
        .await
        .unwrap_err();
    assert!(err.is_already_exists());

    // Original record untouched.
    assert_eq!(mn.get_realm("acme").await.unwrap().token_expiration, 3600);
}

#[tokio::test]
async fn create_client_collision_leaves_store_unchanged() {
    let (store, mn) = manager();
    let client = public_client("app1");
    let realm = Realm::new("acme", 3600, 1800).with_client(client.clone());
    mn.create_realm(&realm).await.unwrap();

    let before = store
        .list_read(&mn.keys().realm_clients("acme"))
        .await
        .unwrap();

    let err = mn
        .create_client("acme", &public_client("app1"))
        .await
        .unwrap_err();
    assert!(err.is_already_exists());

    let after = store
        .list_read(&mn.keys().realm_clients("acme"))
        .await
        .unwrap();
    assert_eq!(before, after);
    assert_eq!(mn.get_client("acme", "app1").await.unwrap().id, client.id);
}

#[tokio::test]
async fn create_client_requires_the_realm() {
    let (_, mn) = manager();
    let err = mn
        .create_client("missing", &public_client("app1"))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn delete_client_is_idempotent_on_missing_membership() {
    let (_, mn) = manager();
    mn.create_realm(&Realm::new("acme", 3600, 1800)).await.unwrap();

    // Client list absent: still a success.
    mn.delete_client("acme", "nothing-here").await.unwrap();
}

#[tokio::test]
async fn membership_follows_create_and_delete() {
    let (_, mn) = manager();
    let realm = Realm::new("acme", 3600, 1800).with_client(public_client("keeper"));
    mn.create_realm(&realm).await.unwrap();

    let client = public_client("app1");
    mn.create_client("acme", &client).await.unwrap();
    assert_eq!(mn.get_clients_from_realm("acme").await.unwrap().len(), 2);

    mn.delete_client("acme", "app1").await.unwrap();

    let remaining = mn.get_clients_from_realm("acme").await.unwrap();
    assert!(remaining.iter().all(|c| c.name != "app1"));
    assert!(mn.get_client("acme", "app1").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn delete_preserves_order_of_remaining_members() {
    let (store, mn) = manager();
    let realm = Realm::new("acme", 3600, 1800)
        .with_client(public_client("a"))
        .with_client(public_client("b"))
        .with_client(public_client("c"));
    mn.create_realm(&realm).await.unwrap();

    mn.delete_client("acme", "b").await.unwrap();

    let entries = store
        .list_read(&mn.keys().realm_clients("acme"))
        .await
        .unwrap();
    let names: Vec<String> = entries
        .iter()
        .map(|e| serde_json::from_str::<serde_json::Value>(e).unwrap()["name"]
            .as_str()
            .unwrap()
            .to_string())
        .collect();
    assert_eq!(names, vec!["a", "c"]);
}

#[tokio::test]
async fn rename_moves_the_client() {
    let (_, mn) = manager();
    let old = public_client("old-name");
    let realm = Realm::new("acme", 3600, 1800).with_client(old.clone());
    mn.create_realm(&realm).await.unwrap();

    let renamed = Client {
        name: "new-name".to_string(),
        ..old
    };
    mn.update_client("acme", "old-name", &renamed).await.unwrap();

    assert!(mn
        .get_client("acme", "old-name")
        .await
        .unwrap_err()
        .is_not_found());
    let back = mn.get_client("acme", "new-name").await.unwrap();
    assert_eq!(back, renamed);

    let clients = mn.get_clients_from_realm("acme").await.unwrap();
    assert_eq!(clients.len(), 1);
}

#[tokio::test]
async fn in_place_update_keeps_membership_entry() {
    let (store, mn) = manager();
    let client = public_client("app1");
    let realm = Realm::new("acme", 3600, 1800).with_client(client.clone());
    mn.create_realm(&realm).await.unwrap();

    let before = store
        .list_read(&mn.keys().realm_clients("acme"))
        .await
        .unwrap();

    let updated = Client {
        client_type: ClientType::Confidential,
        ..client
    };
    mn.update_client("acme", "app1", &updated).await.unwrap();

    let after = store
        .list_read(&mn.keys().realm_clients("acme"))
        .await
        .unwrap();
    assert_eq!(before, after);
    assert_eq!(
        mn.get_client("acme", "app1").await.unwrap().client_type,
        ClientType::Confidential
    );
}

#[tokio::test]
async fn empty_client_list_is_a_distinct_alarm() {
    let (_, mn) = manager();
    mn.create_realm(&Realm::new("acme", 3600, 1800)).await.unwrap();

    let err = mn.get_clients_from_realm("acme").await.unwrap_err();
    assert!(err.is_zero_length());
    assert!(!err.is_not_found());
}

#[tokio::test]
async fn user_lifecycle_round_trip() {
    let (_, mn) = manager();
    mn.create_realm(&Realm::new("acme", 3600, 1800)).await.unwrap();

    mn.create_user("acme", &alice()).await.unwrap();
    let err = mn.create_user("acme", &alice()).await.unwrap_err();
    assert!(err.is_already_exists());

    let user = mn.get_user("acme", "alice").await.unwrap();
    assert_eq!(user.username(), Some("alice"));
    assert_eq!(user.document()["email"], "alice@example.com");

    mn.delete_user("acme", "alice").await.unwrap();
    assert!(mn.get_user("acme", "alice").await.unwrap_err().is_not_found());
    assert!(mn.get_users("acme").await.unwrap_err().is_zero_length());

    // Second delete is a non-error.
    mn.delete_user("acme", "alice").await.unwrap();
}

#[tokio::test]
async fn scenario_acme() {
    let (_, mn) = manager();
    let realm = Realm::new("acme", 3600, 1800)
        .with_client(Client::new("app1", ClientType::Public))
        .with_user(User::new(json!({"preferred_username": "alice"})));

    mn.create_realm(&realm).await.unwrap();

    assert_eq!(mn.get_realm("acme").await.unwrap().name, "acme");
    assert_eq!(mn.get_clients_from_realm("acme").await.unwrap().len(), 1);
    assert_eq!(mn.get_users("acme").await.unwrap().len(), 1);

    mn.delete_realm("acme").await.unwrap();

    assert!(mn.get_realm("acme").await.unwrap_err().is_not_found());
    assert!(mn.get_client("acme", "app1").await.unwrap_err().is_not_found());
    assert!(mn.get_user("acme", "alice").await.unwrap_err().is_not_found());
}
