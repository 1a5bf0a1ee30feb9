//! End-to-end backup tests against a mock store server

use custodian::adapters::store::HttpStoreClient;
use custodian::config::{secret_string, BackupConfig, CollectionMapping, StoreConfig};
use custodian::core::export::BackupCoordinator;
use mockito::{Matcher, Server, ServerGuard};
use std::sync::Arc;

fn store_config(endpoint: &str) -> StoreConfig {
    StoreConfig {
        endpoint: endpoint.to_string(),
        project_id: "proj".to_string(),
        api_key: secret_string("key".to_string()),
        database_id: "db".to_string(),
        timeout_seconds: 5,
    }
}

fn backup_config(output_dir: &str, collections: Vec<(&str, &str)>) -> BackupConfig {
    BackupConfig {
        output_dir: output_dir.to_string(),
        max_pages: 1000,
        collections: collections
            .into_iter()
            .map(|(name, id)| CollectionMapping {
                name: name.to_string(),
                id: id.to_string(),
            })
            .collect(),
    }
}

fn page_matcher(offset: &str) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("limit".into(), "100".into()),
        Matcher::UrlEncoded("offset".into(), offset.into()),
    ])
}

async fn mock_single_page(server: &mut ServerGuard, collection_id: &str, body: &str) {
    server
        .mock(
            "GET",
            format!("/databases/db/collections/{collection_id}/documents").as_str(),
        )
        .match_query(page_matcher("0"))
        .with_status(200)
        .with_body(body)
        .create_async()
        .await;
}

#[tokio::test]
async fn test_backup_three_collections_one_empty() {
    let mut server = Server::new_async().await;

    mock_single_page(
        &mut server,
        "col-user",
        r#"{"total": 2, "documents": [
            {"$id": "u1", "email": "a@example.com", "profile": {"role": "admin"}},
            {"$id": "u2", "email": "b@example.com", "profile": {"role": "viewer"}}
        ]}"#,
    )
    .await;
    mock_single_page(&mut server, "col-empty", r#"{"total": 0, "documents": []}"#).await;
    mock_single_page(
        &mut server,
        "col-forms",
        r#"{"total": 1, "documents": [
            {"$id": "f1", "customerName": "Acme, Inc.", "tags": ["a", "b"]}
        ]}"#,
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(HttpStoreClient::new(store_config(&server.url())));
    let coordinator = BackupCoordinator::new(
        store,
        backup_config(
            dir.path().to_str().unwrap(),
            vec![
                ("user", "col-user"),
                ("evalForm", "col-empty"),
                ("createForm", "col-forms"),
            ],
        ),
    );

    let summary = coordinator.execute_backup().await.unwrap();

    // Exactly 2 summary entries and 2 files on disk
    assert_eq!(summary.artifacts.len(), 2);
    assert_eq!(summary.skipped, vec!["evalForm"]);
    assert!(summary.is_successful());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);

    // Nested fields flattened into the header, arrays stringified in rows
    let (_, user_artifact) = &summary.artifacts[0];
    let user_csv = std::fs::read_to_string(&user_artifact.filepath).unwrap();
    assert!(user_csv.lines().next().unwrap().contains("profile_role"));
    assert_eq!(user_artifact.record_count, 2);

    let (_, forms_artifact) = &summary.artifacts[1];
    let forms_csv = std::fs::read_to_string(&forms_artifact.filepath).unwrap();
    assert!(forms_csv.contains("\"Acme, Inc.\""));
    assert!(forms_csv.contains("[\"\"a\"\",\"\"b\"\"]"));
}

#[tokio::test]
async fn test_backup_paginates_until_short_page() {
    let mut server = Server::new_async().await;

    // First page: 100 documents, second page: 3
    let first_page: Vec<String> = (0..100)
        .map(|n| format!(r#"{{"$id": "d{n}", "n": {n}}}"#))
        .collect();
    let first_body = format!(
        r#"{{"total": 103, "documents": [{}]}}"#,
        first_page.join(",")
    );
    let second_body = r#"{"total": 103, "documents": [
        {"$id": "d100", "n": 100}, {"$id": "d101", "n": 101}, {"$id": "d102", "n": 102}
    ]}"#;

    let first = server
        .mock("GET", "/databases/db/collections/col-big/documents")
        .match_query(page_matcher("0"))
        .with_status(200)
        .with_body(first_body)
        .create_async()
        .await;
    let second = server
        .mock("GET", "/databases/db/collections/col-big/documents")
        .match_query(page_matcher("100"))
        .with_status(200)
        .with_body(second_body)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(HttpStoreClient::new(store_config(&server.url())));
    let coordinator = BackupCoordinator::new(
        store,
        backup_config(dir.path().to_str().unwrap(), vec![("big", "col-big")]),
    );

    let summary = coordinator.execute_backup().await.unwrap();

    first.assert_async().await;
    second.assert_async().await;
    assert_eq!(summary.artifacts[0].1.record_count, 103);

    let csv = std::fs::read_to_string(&summary.artifacts[0].1.filepath).unwrap();
    // Header plus one row per record
    assert_eq!(csv.lines().count(), 104);
}

#[tokio::test]
async fn test_failing_collection_isolated_from_the_rest() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/databases/db/collections/col-broken/documents")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body(r#"{"message": "internal error"}"#)
        .create_async()
        .await;
    mock_single_page(
        &mut server,
        "col-ok",
        r#"{"total": 1, "documents": [{"$id": "d1", "v": 1}]}"#,
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(HttpStoreClient::new(store_config(&server.url())));
    let coordinator = BackupCoordinator::new(
        store,
        backup_config(
            dir.path().to_str().unwrap(),
            vec![("broken", "col-broken"), ("healthy", "col-ok")],
        ),
    );

    let summary = coordinator.execute_backup().await.unwrap();

    assert_eq!(summary.errors.len(), 1);
    assert_eq!(summary.errors[0].collection, "broken");
    assert_eq!(summary.artifacts.len(), 1);
    assert_eq!(summary.artifacts[0].0, "healthy");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}
