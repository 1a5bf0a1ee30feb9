//! Pending-reminder scan
//!
//! Finds forms that have sat in the pending state past their reminder date,
//! e-mails the owning user, and marks each form so it is not re-notified.
//! Records move through `pending -> reminder-due -> reminder-sent`; a record
//! whose processing fails stays reminder-due and is picked up again on the
//! next scan. Reminders are at-least-once: the sent flag is only written
//! after the provider accepts the message, so a failed state update can
//! produce a duplicate send but never a silently dropped one.

use crate::adapters::directory::UserDirectory;
use crate::adapters::mail::Mailer;
use crate::adapters::store::DocumentStore;
use crate::config::ReminderConfig;
use crate::core::fetch::PAGE_SIZE;
use crate::core::reminder::owner::resolve_owner;
use crate::core::reminder::template::{render_reminder, ReminderContext, REMINDER_SUBJECT};
use crate::domain::ids::CollectionId;
use crate::domain::{CustodianError, Document, Filter, Result};
use chrono::{DateTime, Utc};
use serde_json::Map;
use std::sync::Arc;

/// Field holding the evaluation outcome; "pending" marks an open form
const RESULT_FIELD: &str = "result";

/// Boolean flag set once a reminder has gone out
const REMINDER_SENT_FIELD: &str = "reminderSent";

/// Timestamp a reminder becomes due
const REMINDER_DATE_FIELD: &str = "reminderDate";

/// Timestamp the reminder was actually delivered
const REMINDER_SENT_DATE_FIELD: &str = "reminderSentDate";

/// Outcome of one scan run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Records matched by the due-reminder query
    pub processed: usize,

    /// Reminders actually delivered
    pub sent: usize,

    /// Records skipped because a per-record step failed
    pub skipped: usize,
}

/// Pending-reminder scanner
pub struct ReminderScanner {
    store: Arc<dyn DocumentStore>,
    directory: Arc<dyn UserDirectory>,
    mailer: Arc<dyn Mailer>,
    config: ReminderConfig,
    system_name: String,
}

impl ReminderScanner {
    /// Create a new scanner
    pub fn new(
        store: Arc<dyn DocumentStore>,
        directory: Arc<dyn UserDirectory>,
        mailer: Arc<dyn Mailer>,
        config: ReminderConfig,
        system_name: impl Into<String>,
    ) -> Self {
        Self {
            store,
            directory,
            mailer,
            config,
            system_name: system_name.into(),
        }
    }

    /// Scan for due reminders and notify their owners
    ///
    /// The selection filter is `result == "pending" AND reminderSent ==
    /// false AND reminderDate <= now`; records outside it are untouched,
    /// which also makes re-running idempotent for anything already marked
    /// sent. Matched records are processed strictly sequentially. A failure
    /// in the outer query is fatal; every per-record failure is logged and
    /// skipped.
    pub async fn scan_and_remind(&self, now: DateTime<Utc>) -> Result<ScanSummary> {
        tracing::info!(now = %now, "Starting pending reminder scan");

        let collection_id = CollectionId::new(self.config.collection_id.clone())
            .map_err(CustodianError::Configuration)?;

        let filters = [
            Filter::equal(RESULT_FIELD, "pending"),
            Filter::equal(REMINDER_SENT_FIELD, false),
            Filter::less_than_equal(REMINDER_DATE_FIELD, now.to_rfc3339()),
        ];

        let page = self
            .store
            .list_documents(&collection_id, &filters, PAGE_SIZE, 0)
            .await?;

        let mut summary = ScanSummary {
            processed: page.documents.len(),
            ..Default::default()
        };

        tracing::info!(matched = summary.processed, "Found forms requiring reminders");

        for document in &page.documents {
            match self.remind(document, &collection_id, now).await {
                Ok(()) => {
                    summary.sent += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        document_id = %document.id,
                        error = %e,
                        "Skipping record, eligible again on the next scan"
                    );
                    summary.skipped += 1;
                }
            }
        }

        tracing::info!(
            processed = summary.processed,
            sent = summary.sent,
            skipped = summary.skipped,
            "Pending reminder scan complete"
        );

        Ok(summary)
    }

    /// Notify the owner of one due record and mark it sent
    async fn remind(
        &self,
        document: &Document,
        collection_id: &CollectionId,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let related_collection = CollectionId::new(self.config.related_collection_id.clone())
            .map_err(CustodianError::Configuration)?;

        // The related record carries the ownership metadata and the
        // customer/project details shown in the e-mail.
        let related = self
            .store
            .get_document(&related_collection, &document.id)
            .await?;

        let owner = resolve_owner(&related).ok_or_else(|| {
            CustodianError::Other(format!(
                "No owner reference on related record {}",
                document.id
            ))
        })?;

        let user = self.directory.get_user(&owner).await?;

        let form_link = format!("{}?id={}", self.config.form_base_url, document.id);
        let html = render_reminder(&ReminderContext {
            user_name: user.display_name(),
            customer_name: related.get_str("customerName").unwrap_or("N/A"),
            project_name: related.get_str("projectName").unwrap_or("N/A"),
            form_link: &form_link,
            system_name: &self.system_name,
        });

        self.mailer.send(&user.email, REMINDER_SUBJECT, &html).await?;

        // Mark sent only after the provider accepted the message. If this
        // patch fails the record stays eligible and the next scan sends a
        // duplicate - the acceptable side of at-least-once.
        let mut patch = Map::new();
        patch.insert(REMINDER_SENT_FIELD.to_string(), true.into());
        patch.insert(
            REMINDER_SENT_DATE_FIELD.to_string(),
            now.to_rfc3339().into(),
        );

        if let Err(e) = self
            .store
            .update_document(collection_id, &document.id, patch)
            .await
        {
            tracing::warn!(
                document_id = %document.id,
                error = %e,
                "Reminder delivered but sent-flag update failed; duplicate send possible on next scan"
            );
            return Ok(());
        }

        tracing::info!(
            document_id = %document.id,
            to = %user.email,
            "Reminder sent"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::{DocumentId, UserId};
    use crate::domain::{DirectoryError, DocumentList, MailError, StoreError, UserProfile};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory store with a reminder collection, a related collection,
    /// and recorded update patches.
    struct MemoryStore {
        reminder_collection: String,
        due: Vec<Document>,
        related: HashMap<String, Document>,
        updates: Mutex<Vec<(String, Map<String, Value>)>>,
        fail_query: bool,
        fail_update: bool,
    }

    impl MemoryStore {
        fn new(due: Vec<Value>, related: Vec<Value>) -> Self {
            let due = due
                .into_iter()
                .map(|v| serde_json::from_value(v).unwrap())
                .collect();
            let related: HashMap<String, Document> = related
                .into_iter()
                .map(|v| {
                    let doc: Document = serde_json::from_value(v).unwrap();
                    (doc.id.to_string(), doc)
                })
                .collect();
            Self {
                reminder_collection: "reminders".to_string(),
                due,
                related,
                updates: Mutex::new(Vec::new()),
                fail_query: false,
                fail_update: false,
            }
        }

        fn updates(&self) -> Vec<(String, Map<String, Value>)> {
            self.updates.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DocumentStore for MemoryStore {
        async fn list_documents(
            &self,
            collection_id: &CollectionId,
            filters: &[Filter],
            _limit: usize,
            _offset: usize,
        ) -> Result<DocumentList> {
            if self.fail_query {
                return Err(CustodianError::Store(StoreError::ConnectionFailed(
                    "store unreachable".to_string(),
                )));
            }
            assert_eq!(collection_id.as_str(), self.reminder_collection);
            assert_eq!(filters.len(), 3);
            Ok(DocumentList {
                total: self.due.len() as u64,
                documents: self.due.clone(),
            })
        }

        async fn get_document(
            &self,
            _collection_id: &CollectionId,
            document_id: &DocumentId,
        ) -> Result<Document> {
            self.related
                .get(document_id.as_str())
                .cloned()
                .ok_or_else(|| {
                    CustodianError::Store(StoreError::DocumentNotFound(document_id.to_string()))
                })
        }

        async fn update_document(
            &self,
            _collection_id: &CollectionId,
            document_id: &DocumentId,
            patch: Map<String, Value>,
        ) -> Result<Document> {
            if self.fail_update {
                return Err(CustodianError::Store(StoreError::UpdateFailed(
                    "write denied".to_string(),
                )));
            }
            self.updates
                .lock()
                .unwrap()
                .push((document_id.to_string(), patch));
            self.related
                .get(document_id.as_str())
                .cloned()
                .ok_or_else(|| {
                    CustodianError::Store(StoreError::DocumentNotFound(document_id.to_string()))
                })
        }
    }

    struct MemoryDirectory {
        users: HashMap<String, UserProfile>,
    }

    impl MemoryDirectory {
        fn with_user(id: &str, email: &str, name: &str) -> Self {
            let user: UserProfile = serde_json::from_value(json!({
                "$id": id,
                "email": email,
                "name": name,
            }))
            .unwrap();
            let mut users = HashMap::new();
            users.insert(id.to_string(), user);
            Self { users }
        }

        fn empty() -> Self {
            Self {
                users: HashMap::new(),
            }
        }
    }

    #[async_trait]
    impl UserDirectory for MemoryDirectory {
        async fn get_user(&self, user_id: &UserId) -> Result<UserProfile> {
            self.users.get(user_id.as_str()).cloned().ok_or_else(|| {
                CustodianError::Directory(DirectoryError::UserNotFound(user_id.to_string()))
            })
        }
    }

    #[derive(Default)]
    struct MemoryMailer {
        sent: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    impl MemoryMailer {
        fn failing() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn sent(&self) -> Vec<(String, String)> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Mailer for MemoryMailer {
        async fn send(&self, to: &str, subject: &str, _html_body: &str) -> Result<()> {
            if self.fail {
                return Err(CustodianError::Mail(MailError::Rejected {
                    status: 503,
                    message: "provider down".to_string(),
                }));
            }
            self.sent
                .lock()
                .unwrap()
                .push((to.to_string(), subject.to_string()));
            Ok(())
        }
    }

    fn reminder_config() -> ReminderConfig {
        ReminderConfig {
            collection_id: "reminders".to_string(),
            related_collection_id: "forms".to_string(),
            form_base_url: "https://forms.example.com/posteval.html".to_string(),
        }
    }

    fn due_record(id: &str) -> Value {
        json!({
            "$id": id,
            "result": "pending",
            "reminderSent": false,
            "reminderDate": "2025-09-14T00:00:00Z"
        })
    }

    fn related_record(id: &str, owner: &str) -> Value {
        json!({
            "$id": id,
            "ownerId": owner,
            "customerName": "Acme",
            "projectName": "Rollout"
        })
    }

    fn now() -> DateTime<Utc> {
        "2025-09-15T12:00:00Z".parse().unwrap()
    }

    fn scanner(
        store: Arc<MemoryStore>,
        directory: Arc<MemoryDirectory>,
        mailer: Arc<MemoryMailer>,
    ) -> ReminderScanner {
        ReminderScanner::new(store, directory, mailer, reminder_config(), "Evaluation System")
    }

    #[tokio::test]
    async fn test_due_record_sends_one_email_and_marks_sent() {
        let store = Arc::new(MemoryStore::new(
            vec![due_record("d1")],
            vec![related_record("d1", "u1")],
        ));
        let directory = Arc::new(MemoryDirectory::with_user("u1", "kim@example.com", "Kim"));
        let mailer = Arc::new(MemoryMailer::default());

        let summary = scanner(store.clone(), directory, mailer.clone())
            .scan_and_remind(now())
            .await
            .unwrap();

        assert_eq!(summary, ScanSummary { processed: 1, sent: 1, skipped: 0 });

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "kim@example.com");
        assert_eq!(sent[0].1, REMINDER_SUBJECT);

        let updates = store.updates();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].0, "d1");
        assert_eq!(updates[0].1["reminderSent"], json!(true));
        assert_eq!(
            updates[0].1["reminderSentDate"],
            json!(now().to_rfc3339())
        );
    }

    #[tokio::test]
    async fn test_unknown_user_skips_record_but_continues() {
        let store = Arc::new(MemoryStore::new(
            vec![due_record("d1"), due_record("d2")],
            vec![related_record("d1", "ghost"), related_record("d2", "u1")],
        ));
        let directory = Arc::new(MemoryDirectory::with_user("u1", "kim@example.com", "Kim"));
        let mailer = Arc::new(MemoryMailer::default());

        let summary = scanner(store.clone(), directory, mailer.clone())
            .scan_and_remind(now())
            .await
            .unwrap();

        assert_eq!(summary, ScanSummary { processed: 2, sent: 1, skipped: 1 });
        assert_eq!(mailer.sent().len(), 1);
        // Only the delivered record was marked
        assert_eq!(store.updates().len(), 1);
        assert_eq!(store.updates()[0].0, "d2");
    }

    #[tokio::test]
    async fn test_send_failure_leaves_record_unmarked() {
        let store = Arc::new(MemoryStore::new(
            vec![due_record("d1")],
            vec![related_record("d1", "u1")],
        ));
        let directory = Arc::new(MemoryDirectory::with_user("u1", "kim@example.com", "Kim"));
        let mailer = Arc::new(MemoryMailer::failing());

        let summary = scanner(store.clone(), directory, mailer)
            .scan_and_remind(now())
            .await
            .unwrap();

        assert_eq!(summary, ScanSummary { processed: 1, sent: 0, skipped: 1 });
        // No state mutation, so the record is matched again next scan
        assert!(store.updates().is_empty());
    }

    #[tokio::test]
    async fn test_update_failure_after_send_is_not_fatal() {
        let mut store = MemoryStore::new(
            vec![due_record("d1")],
            vec![related_record("d1", "u1")],
        );
        store.fail_update = true;
        let store = Arc::new(store);
        let directory = Arc::new(MemoryDirectory::with_user("u1", "kim@example.com", "Kim"));
        let mailer = Arc::new(MemoryMailer::default());

        let summary = scanner(store.clone(), directory, mailer.clone())
            .scan_and_remind(now())
            .await
            .unwrap();

        // The e-mail went out; the record stays eligible for a duplicate
        assert_eq!(summary, ScanSummary { processed: 1, sent: 1, skipped: 0 });
        assert_eq!(mailer.sent().len(), 1);
        assert!(store.updates().is_empty());
    }

    #[tokio::test]
    async fn test_missing_related_record_skips() {
        let store = Arc::new(MemoryStore::new(vec![due_record("d1")], vec![]));
        let directory = Arc::new(MemoryDirectory::empty());
        let mailer = Arc::new(MemoryMailer::default());

        let summary = scanner(store, directory, mailer.clone())
            .scan_and_remind(now())
            .await
            .unwrap();

        assert_eq!(summary, ScanSummary { processed: 1, sent: 0, skipped: 1 });
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn test_outer_query_failure_is_fatal() {
        let mut store = MemoryStore::new(vec![], vec![]);
        store.fail_query = true;
        let store = Arc::new(store);
        let directory = Arc::new(MemoryDirectory::empty());
        let mailer = Arc::new(MemoryMailer::default());

        let result = scanner(store, directory, mailer)
            .scan_and_remind(now())
            .await;

        assert!(matches!(
            result,
            Err(CustodianError::Store(StoreError::ConnectionFailed(_)))
        ));
    }

    #[tokio::test]
    async fn test_no_due_records_is_a_quiet_success() {
        let store = Arc::new(MemoryStore::new(vec![], vec![]));
        let directory = Arc::new(MemoryDirectory::empty());
        let mailer = Arc::new(MemoryMailer::default());

        let summary = scanner(store, directory, mailer)
            .scan_and_remind(now())
            .await
            .unwrap();

        assert_eq!(summary, ScanSummary::default());
    }
}
