use axum::http::StatusCode;
use sambaza::db::{SourceTable, store};
use sambaza::error::SambazaError;
use sambaza::gateway::{RecipientStatus, SmsGateway, SmsMessageData, SmsResponse};
use sambaza::service::dispatcher::{self, DispatchSummary};
use sqlx::SqlitePool;
use std::{
    fs,
    path::PathBuf,
    sync::Mutex,
    time::{SystemTime, UNIX_EPOCH},
};

struct RecordingGateway {
    batches: Mutex<Vec<Vec<String>>>,
    /// 1-based call index that should fail, if any.
    fail_on: Option<usize>,
}

impl RecordingGateway {
    fn new(fail_on: Option<usize>) -> Self {
        Self {
            batches: Mutex::new(Vec::new()),
            fail_on,
        }
    }

    fn recorded(&self) -> Vec<Vec<String>> {
        self.batches.lock().expect("batches lock").clone()
    }
}

#[async_trait::async_trait]
impl SmsGateway for RecordingGateway {
    async fn send(
        &self,
        _message: &str,
        recipients: &[String],
    ) -> Result<SmsResponse, SambazaError> {
        let call_index = {
            let mut batches = self.batches.lock().expect("batches lock");
            batches.push(recipients.to_vec());
            batches.len()
        };

        if self.fail_on == Some(call_index) {
            return Err(SambazaError::UpstreamStatus(
                StatusCode::INTERNAL_SERVER_ERROR,
            ));
        }

        Ok(SmsResponse {
            message_data: SmsMessageData {
                message: format!("Sent to {0}/{0}", recipients.len()),
                recipients: recipients
                    .iter()
                    .map(|number| RecipientStatus {
                        number: number.clone(),
                        status: "Success".to_string(),
                        status_code: 101,
                        cost: "KES 0.8000".to_string(),
                    })
                    .collect(),
            },
        })
    }
}

async fn temp_pool(tag: &str) -> (SqlitePool, PathBuf) {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut temp_path = std::env::temp_dir();
    temp_path.push(format!(
        "sambaza-{tag}-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));

    let database_url = format!("sqlite:{}", temp_path.display());
    let pool = store::connect(&database_url).await.expect("db connect");
    (pool, temp_path)
}

async fn seed_customers(pool: &SqlitePool, numbers: &[String]) {
    sqlx::query("CREATE TABLE IF NOT EXISTS customers (phone_number TEXT NOT NULL)")
        .execute(pool)
        .await
        .expect("create customers table");
    for number in numbers {
        sqlx::query("INSERT INTO customers (phone_number) VALUES (?)")
            .bind(number)
            .execute(pool)
            .await
            .expect("insert customer number");
    }
}

#[tokio::test]
async fn splits_recipients_into_sequential_batches_of_100() {
    let (pool, temp_path) = temp_pool("dispatch-batches").await;

    // 0712000000 .. 0712000249: all valid Safaricom numbers.
    let numbers: Vec<String> = (0..250).map(|i| format!("07120{i:05}")).collect();
    seed_customers(&pool, &numbers).await;

    let gateway = RecordingGateway::new(None);
    let summary =
        dispatcher::dispatch_sms(&pool, &gateway, "Habari!", SourceTable::Customers).await;

    assert_eq!(
        summary,
        DispatchSummary {
            recipients: 250,
            batches_sent: 3,
            batches_failed: 0,
        }
    );

    let batches = gateway.recorded();
    let sizes: Vec<usize> = batches.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![100, 100, 50]);

    // Original order preserved across the batch boundary.
    let dispatched: Vec<String> = batches.into_iter().flatten().collect();
    assert_eq!(dispatched[0], "+254712000000");
    assert_eq!(dispatched[249], "+254712000249");
    let expected: Vec<String> = (0..250).map(|i| format!("+2547120{i:05}")).collect();
    assert_eq!(dispatched, expected);

    // One receipt per call, not per batch.
    let receipts = store::list_receipts(&pool).await.expect("list receipts");
    assert_eq!(receipts.len(), 1);
    assert!(receipts[0].response_code.starts_with("SMS-"));
    let stored: SmsResponse =
        serde_json::from_str(&receipts[0].response_body).expect("stored receipt is JSON");
    assert_eq!(stored.message_data.recipients.len(), 50);

    let _ = fs::remove_file(&temp_path);
}

#[tokio::test]
async fn invalid_numbers_are_filtered_before_batching() {
    let (pool, temp_path) = temp_pool("dispatch-filter").await;

    let numbers = vec![
        "0712345678".to_string(),
        "12345".to_string(),
        "+254733000000".to_string(),
        "not a number".to_string(),
    ];
    seed_customers(&pool, &numbers).await;

    let gateway = RecordingGateway::new(None);
    let summary =
        dispatcher::dispatch_sms(&pool, &gateway, "Habari!", SourceTable::Customers).await;

    assert_eq!(summary.recipients, 2);
    let batches = gateway.recorded();
    assert_eq!(
        batches,
        vec![vec![
            "+254712345678".to_string(),
            "+254733000000".to_string()
        ]]
    );

    let _ = fs::remove_file(&temp_path);
}

#[tokio::test]
async fn empty_source_sends_nothing() {
    let (pool, temp_path) = temp_pool("dispatch-empty").await;
    seed_customers(&pool, &[]).await;

    let gateway = RecordingGateway::new(None);
    let summary =
        dispatcher::dispatch_sms(&pool, &gateway, "Habari!", SourceTable::Customers).await;

    assert_eq!(summary, DispatchSummary::default());
    assert!(gateway.recorded().is_empty());
    assert!(
        store::list_receipts(&pool)
            .await
            .expect("list receipts")
            .is_empty()
    );

    let _ = fs::remove_file(&temp_path);
}

#[tokio::test]
async fn missing_source_table_is_treated_as_no_recipients() {
    let (pool, temp_path) = temp_pool("dispatch-missing").await;

    // `staff` was never created; the fetch error collapses to an empty list.
    let gateway = RecordingGateway::new(None);
    let summary = dispatcher::dispatch_sms(&pool, &gateway, "Habari!", SourceTable::Staff).await;

    assert_eq!(summary, DispatchSummary::default());
    assert!(gateway.recorded().is_empty());

    let _ = fs::remove_file(&temp_path);
}

#[tokio::test]
async fn failed_batch_is_logged_and_the_loop_continues() {
    let (pool, temp_path) = temp_pool("dispatch-failure").await;

    let numbers: Vec<String> = (0..150).map(|i| format!("07330{i:05}")).collect();
    seed_customers(&pool, &numbers).await;

    let gateway = RecordingGateway::new(Some(1));
    let summary =
        dispatcher::dispatch_sms(&pool, &gateway, "Habari!", SourceTable::Customers).await;

    assert_eq!(
        summary,
        DispatchSummary {
            recipients: 150,
            batches_sent: 1,
            batches_failed: 1,
        }
    );
    // Both batches were attempted despite the first failing.
    assert_eq!(gateway.recorded().len(), 2);

    // The surviving batch still produced a receipt.
    let receipts = store::list_receipts(&pool).await.expect("list receipts");
    assert_eq!(receipts.len(), 1);

    let _ = fs::remove_file(&temp_path);
}
