use chrono::{Duration, Local};
use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration as StdDuration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct SubscriptionResponse {
    active: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DailyNutrition {
    date: String,
    protein: f64,
    water: f64,
    protein_goal: f64,
    water_goal: f64,
}

#[derive(Debug, Deserialize)]
struct TodayResponse {
    nutrition: DailyNutrition,
    protein_percent: i64,
    water_percent: i64,
}

#[derive(Debug, Deserialize)]
struct InjectionRecord {
    id: String,
    date: String,
    photo: Option<String>,
    notes: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RoutineSchedule {
    frequency_days: u32,
    preferred_time: String,
    reminder_lead_hours: u32,
    active: bool,
    next_injection_date: String,
}

#[derive(Debug, Deserialize)]
struct RoutineResponse {
    routine: Option<RoutineSchedule>,
    days_until_next: Option<i64>,
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
    use std::sync::Once;
    use std::sync::atomic::{AtomicI32, Ordering};

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

fn unique_data_dir() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("oz_tracker_http_{}_{}", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + StdDuration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/subscription")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(StdDuration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_dir = unique_data_dir();
    let child = Command::new(env!("CARGO_BIN_EXE_oz_tracker"))
        .env("PORT", port.to_string())
        .env("OZ_DATA_DIR", data_dir)
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

async fn ensure_subscribed(client: &Client, base_url: &str) {
    let response = client
        .post(format!("{base_url}/api/checkout"))
        .json(&serde_json::json!({
            "email": "paciente@example.com",
            "card_number": "4242 4242 4242 4242",
            "card_name": "Paciente Teste",
            "expiry_date": "12/30",
            "cvv": "123"
        }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
}

#[tokio::test]
async fn http_tracker_is_locked_until_checkout() {
    let _guard = TEST_LOCK.lock().await;
    // Dedicated server: the gate must be observed before any checkout.
    let server = spawn_server().await;
    let client = Client::new();

    let locked = client
        .get(format!("{}/api/today", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(locked.status(), StatusCode::PAYMENT_REQUIRED);

    let status: SubscriptionResponse = client
        .get(format!("{}/api/subscription", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(!status.active);

    ensure_subscribed(&client, &server.base_url).await;

    let status: SubscriptionResponse = client
        .get(format!("{}/api/subscription", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(status.active);

    let unlocked = client
        .get(format!("{}/api/today", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(unlocked.status().is_success());
}

#[tokio::test]
async fn http_checkout_rejects_incomplete_payment_details() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/checkout", server.base_url))
        .json(&serde_json::json!({
            "email": "not-an-email",
            "card_number": "4242 4242 4242 4242",
            "card_name": "Paciente Teste",
            "expiry_date": "12/30",
            "cvv": "123"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_nutrition_update_clamps_and_persists_today() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    ensure_subscribed(&client, &server.base_url).await;

    // Drive protein to a known floor, then add a known amount.
    let floored: TodayResponse = client
        .post(format!("{}/api/nutrition", server.base_url))
        .json(&serde_json::json!({ "counter": "protein", "delta": -100000.0 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(floored.nutrition.protein, 0.0);
    assert_eq!(floored.protein_percent, 0);

    let updated: TodayResponse = client
        .post(format!("{}/api/nutrition", server.base_url))
        .json(&serde_json::json!({ "counter": "protein", "delta": 25.0 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(updated.nutrition.protein, 25.0);
    assert_eq!(updated.nutrition.protein_goal, 100.0);
    assert_eq!(updated.protein_percent, 25);

    let today: TodayResponse = client
        .get(format!("{}/api/today", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(today.nutrition.protein, 25.0);
    assert_eq!(today.nutrition.date, Local::now().date_naive().to_string());
    assert_eq!(today.nutrition.water_goal, 2000.0);
    assert!(today.water_percent >= 0);
    assert!(!today.nutrition.water.is_nan());
}

#[tokio::test]
async fn http_nutrition_rejects_unknown_counter() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    ensure_subscribed(&client, &server.base_url).await;

    let response = client
        .post(format!("{}/api/nutrition", server.base_url))
        .json(&serde_json::json!({ "counter": "caffeine", "delta": 1.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_injection_add_and_remove_round_trip() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    ensure_subscribed(&client, &server.base_url).await;

    let record: InjectionRecord = client
        .post(format!("{}/api/injections", server.base_url))
        .json(&serde_json::json!({
            "date": "2024-02-01",
            "notes": "coxa esquerda"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(!record.id.is_empty());
    assert_eq!(record.date, "2024-02-01");
    assert_eq!(record.notes.as_deref(), Some("coxa esquerda"));
    assert!(record.photo.is_none());

    let log: Vec<InjectionRecord> = client
        .get(format!("{}/api/injections", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(log[0].id, record.id);

    let deleted = client
        .delete(format!("{}/api/injections/{}", server.base_url, record.id))
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    // Deleting the same id again is a silent no-op.
    let deleted_again = client
        .delete(format!("{}/api/injections/{}", server.base_url, record.id))
        .send()
        .await
        .unwrap();
    assert_eq!(deleted_again.status(), StatusCode::NO_CONTENT);

    let log: Vec<InjectionRecord> = client
        .get(format!("{}/api/injections", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(log.iter().all(|entry| entry.id != record.id));
}

#[tokio::test]
async fn http_routine_lifecycle_anchored_on_last_injection() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    ensure_subscribed(&client, &server.base_url).await;

    let anchor = Local::now().date_naive() - Duration::days(3);
    let injection: InjectionRecord = client
        .post(format!("{}/api/injections", server.base_url))
        .json(&serde_json::json!({ "date": anchor.to_string() }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let saved: RoutineResponse = client
        .put(format!("{}/api/routine", server.base_url))
        .json(&serde_json::json!({
            "frequency_days": 7,
            "preferred_time": "09:00",
            "reminder_lead_hours": 24
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let routine = saved.routine.expect("routine should be configured");
    assert!(routine.active);
    assert_eq!(routine.frequency_days, 7);
    assert_eq!(routine.preferred_time, "09:00:00");
    assert_eq!(routine.reminder_lead_hours, 24);
    assert_eq!(
        routine.next_injection_date,
        (anchor + Duration::days(7)).to_string()
    );
    assert_eq!(saved.days_until_next, Some(4));

    let toggled: RoutineResponse = client
        .post(format!("{}/api/routine/toggle", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let paused = toggled.routine.expect("routine survives toggling");
    assert!(!paused.active);
    assert_eq!(paused.next_injection_date, routine.next_injection_date);

    let deleted = client
        .delete(format!("{}/api/routine", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let after: RoutineResponse = client
        .get(format!("{}/api/routine", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(after.routine.is_none());
    assert!(after.days_until_next.is_none());

    let cleanup = client
        .delete(format!("{}/api/injections/{}", server.base_url, injection.id))
        .send()
        .await
        .unwrap();
    assert_eq!(cleanup.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn http_routine_rejects_zero_frequency() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    ensure_subscribed(&client, &server.base_url).await;

    let response = client
        .put(format!("{}/api/routine", server.base_url))
        .json(&serde_json::json!({
            "frequency_days": 0,
            "preferred_time": "09:00",
            "reminder_lead_hours": 24
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
