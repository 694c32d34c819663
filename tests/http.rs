use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct Record {
    day: u32,
    quantity: f64,
    date: String,
}

#[derive(Debug, Deserialize)]
struct Summary {
    average: f64,
    total: f64,
}

#[derive(Debug, Deserialize)]
struct LedgerView {
    records: Vec<Record>,
    summary: Summary,
}

#[derive(Debug, Deserialize)]
struct MutationResponse {
    message: String,
    view: LedgerView,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("egg_ledger_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/records")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_path = unique_data_path();
    let child = Command::new(env!("CARGO_BIN_EXE_egg_ledger"))
        .env("PORT", port.to_string())
        .env("HARVEST_DATA_PATH", data_path)
        .env("HARVEST_LOCALE", "pt-BR")
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn reset(client: &Client, base_url: &str) {
    let response = client
        .delete(format!("{base_url}/api/records"))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
}

async fn add(client: &Client, base_url: &str, quantity: serde_json::Value) -> reqwest::Response {
    client
        .post(format!("{base_url}/api/records"))
        .json(&serde_json::json!({ "quantity": quantity }))
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_add_updates_records_and_summary() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    reset(&client, &server.base_url).await;

    for quantity in [serde_json::json!(10), serde_json::json!("20"), serde_json::json!(30)] {
        let response = add(&client, &server.base_url, quantity).await;
        assert!(response.status().is_success());
    }

    let view: LedgerView = client
        .get(format!("{}/api/records", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(view.records.len(), 3);
    assert_eq!(view.records[1].day, 2);
    assert_eq!(view.records[1].quantity, 20.0);
    assert!(!view.records[0].date.is_empty());
    assert_eq!(view.summary.total, 60.0);
    assert_eq!(view.summary.average, 20.0);
}

#[tokio::test]
async fn http_add_rejects_invalid_quantity() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    reset(&client, &server.base_url).await;

    let response = add(&client, &server.base_url, serde_json::json!("abc")).await;
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    assert_eq!(response.text().await.unwrap(), "Digite um número válido de ovos!");

    let response = add(&client, &server.base_url, serde_json::json!(-4)).await;
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    let view: LedgerView = client
        .get(format!("{}/api/records", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(view.records.is_empty());
}

#[tokio::test]
async fn http_edit_and_remove_keep_days_dense() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    reset(&client, &server.base_url).await;

    add(&client, &server.base_url, serde_json::json!(5)).await;
    add(&client, &server.base_url, serde_json::json!(7)).await;

    let edited: MutationResponse = client
        .put(format!("{}/api/records/1", server.base_url))
        .json(&serde_json::json!({ "quantity": "abc" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(edited.view.records[1].quantity, 0.0);

    let removed: MutationResponse = client
        .delete(format!("{}/api/records/0", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(removed.message, "Dia removido com sucesso!");
    assert_eq!(removed.view.records.len(), 1);
    assert_eq!(removed.view.records[0].day, 1);
    assert_eq!(removed.view.records[0].quantity, 0.0);

    let missing = client
        .delete(format!("{}/api/records/5", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), reqwest::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn http_export_requires_records() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    reset(&client, &server.base_url).await;

    let empty = client
        .get(format!("{}/api/export", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(empty.status(), reqwest::StatusCode::BAD_REQUEST);

    add(&client, &server.base_url, serde_json::json!(12)).await;
    let response = client
        .get(format!("{}/api/export", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let disposition = response
        .headers()
        .get(reqwest::header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("colheita-ovos-"));
    assert!(!disposition.contains('/'));

    let report = response.text().await.unwrap();
    assert!(report.starts_with("RELATÓRIO DE COLHEITA DE OVOS\n"));
    assert!(report.contains("Total de ovos coletados: 12\n"));
    assert!(report.contains("): 12 ovos\n"));
}

#[tokio::test]
async fn http_index_shows_empty_state() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    reset(&client, &server.base_url).await;

    let html = client
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("Nenhuma colheita registrada"));
}

#[tokio::test]
async fn http_form_add_redirects_on_success_and_failure() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();
    reset(&client, &server.base_url).await;

    for quantity in ["12", "abc"] {
        let response = client
            .post(format!("{}/days/add", server.base_url))
            .form(&[("quantity", quantity)])
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(reqwest::header::LOCATION).unwrap(),
            "/"
        );
    }

    let view: LedgerView = client
        .get(format!("{}/api/records", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(view.records.len(), 1);
    assert_eq!(view.records[0].quantity, 12.0);
}
