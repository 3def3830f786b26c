use std::{
    env,
    io::{self, BufRead, Write},
    path::PathBuf,
};

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Debug, Clone)]
struct ClientConfig {
    gateway_url: String,
}

#[derive(Debug, Deserialize, Default)]
struct FileConfig {
    gateway_url: Option<String>,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct PingReply {
    #[serde(rename = "goResponse")]
    go_response: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Pending,
}

/// Local screen state: the form fields, the displayed message, and the
/// id of the latest login attempt.
#[derive(Debug)]
struct LoginScreen {
    username: String,
    password: String,
    message: String,
    phase: Phase,
    attempt: u64,
}

impl LoginScreen {
    fn new() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            message: String::new(),
            phase: Phase::Idle,
            attempt: 0,
        }
    }

    fn begin_attempt(&mut self, username: String, password: String) -> u64 {
        self.username = username;
        self.password = password;
        self.phase = Phase::Pending;
        self.attempt += 1;
        self.attempt
    }

    // Only the latest attempt may update the screen; stale outcomes are dropped.
    fn apply_outcome(&mut self, attempt: u64, message: String) -> bool {
        if attempt != self.attempt {
            tracing::debug!(attempt, latest = self.attempt, "dropping stale login outcome");
            return false;
        }
        self.message = message;
        self.phase = Phase::Idle;
        true
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn resolve_config_path() -> PathBuf {
    if let Ok(path) = env::var("CONSOLE_CONFIG_PATH") {
        return PathBuf::from(path);
    }

    let repo_path = PathBuf::from("client/console/config.toml");
    if repo_path.exists() {
        return repo_path;
    }

    // Fall back to a local config next to the executable.
    PathBuf::from("config.toml")
}

fn load_config() -> Result<ClientConfig, String> {
    let config_path = resolve_config_path();

    let file_config = if config_path.exists() {
        let content =
            std::fs::read_to_string(&config_path).map_err(|err| format!("read config: {err}"))?;
        toml::from_str::<FileConfig>(&content).map_err(|err| format!("parse config: {err}"))?
    } else {
        FileConfig::default()
    };

    let gateway_url = env::var("GATEWAY_URL")
        .ok()
        .or(file_config.gateway_url)
        .unwrap_or_else(|| "http://localhost:3001".to_string());

    Ok(ClientConfig { gateway_url })
}

/// Pulls a `message` out of a reply body. A body that is not valid JSON is
/// itself the message; valid JSON without a string `message` field has none.
fn extract_message(body: &str) -> Option<String> {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => value
            .get("message")
            .and_then(|message| message.as_str())
            .map(str::to_string),
        Err(_) => Some(body.to_string()),
    }
}

fn displayed_message(success: bool, body: &str) -> String {
    let message = extract_message(body);
    if success {
        message.unwrap_or_else(|| "login success".to_string())
    } else {
        format!(
            "Error: {}",
            message.unwrap_or_else(|| "request failed".to_string())
        )
    }
}

fn failure_message(err: &reqwest::Error) -> String {
    let description = err.to_string();
    if description.is_empty() {
        "Error: request failed".to_string()
    } else {
        format!("Error: {description}")
    }
}

async fn perform_login(
    client: &Client,
    gateway_url: &str,
    username: &str,
    password: &str,
) -> String {
    let url = format!("{gateway_url}/login");
    let response = client
        .post(url)
        .json(&LoginRequest { username, password })
        .send()
        .await;

    match response {
        Ok(response) => {
            let success = response.status().is_success();
            let body = response.text().await.unwrap_or_default();
            displayed_message(success, &body)
        }
        Err(err) => failure_message(&err),
    }
}

async fn check_gateway(client: &Client, gateway_url: &str) -> String {
    let url = format!("{gateway_url}/ping");
    match client.get(url).send().await {
        Ok(response) if response.status().is_success() => {
            match response.json::<PingReply>().await {
                Ok(reply) => format!("Backend says: {}", reply.go_response),
                Err(err) => failure_message(&err),
            }
        }
        Ok(response) => {
            let body = response.text().await.unwrap_or_default();
            displayed_message(false, &body)
        }
        Err(err) => failure_message(&err),
    }
}

fn prompt(lines: &mut io::Lines<io::StdinLock<'_>>, label: &str) -> Option<String> {
    print!("{label}");
    let _ = io::stdout().flush();
    match lines.next() {
        Some(Ok(line)) => Some(line.trim().to_string()),
        _ => None,
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "failed to load config");
            return;
        }
    };

    tracing::info!(gateway = %config.gateway_url, "console client starting");
    let client = Client::new();

    println!("{}", check_gateway(&client, &config.gateway_url).await);

    let mut screen = LoginScreen::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let username = match prompt(&mut lines, "username: ") {
            Some(value) if !value.is_empty() => value,
            _ => break,
        };
        let password = match prompt(&mut lines, "password: ") {
            Some(value) => value,
            None => break,
        };

        let attempt = screen.begin_attempt(username, password);
        tracing::debug!(attempt, phase = ?screen.phase, "login attempt started");
        let outcome =
            perform_login(&client, &config.gateway_url, &screen.username, &screen.password).await;
        screen.apply_outcome(attempt, outcome);
        println!("{}", screen.message);
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::{displayed_message, perform_login, LoginScreen, Phase};

    #[test]
    fn success_reply_shows_its_message() {
        assert_eq!(displayed_message(true, r#"{"message":"welcome"}"#), "welcome");
    }

    #[test]
    fn failure_reply_is_prefixed() {
        assert_eq!(
            displayed_message(false, r#"{"message":"bad credentials"}"#),
            "Error: bad credentials"
        );
    }

    #[test]
    fn raw_text_body_is_the_message() {
        assert_eq!(displayed_message(true, "boom"), "boom");
        assert_eq!(displayed_message(false, "boom"), "Error: boom");
    }

    #[test]
    fn json_without_message_falls_back_to_defaults() {
        assert_eq!(displayed_message(true, r#"{"status":"ok"}"#), "login success");
        assert_eq!(
            displayed_message(false, r#"{"status":"no"}"#),
            "Error: request failed"
        );
    }

    #[test]
    fn stale_outcome_is_ignored() {
        let mut screen = LoginScreen::new();
        let first = screen.begin_attempt("alice".to_string(), "pw".to_string());
        let second = screen.begin_attempt("alice".to_string(), "pw2".to_string());

        assert!(!screen.apply_outcome(first, "stale".to_string()));
        assert_eq!(screen.phase, Phase::Pending);
        assert!(screen.apply_outcome(second, "welcome".to_string()));
        assert_eq!(screen.message, "welcome");
        assert_eq!(screen.phase, Phase::Idle);
    }

    #[tokio::test]
    async fn login_round_trip_against_mock_gateway() {
        let gateway = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .and(body_json(
                serde_json::json!({"username": "alice", "password": "pw"}),
            ))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"message": "welcome"})),
            )
            .expect(1)
            .mount(&gateway)
            .await;

        let client = reqwest::Client::new();
        let message = perform_login(&client, &gateway.uri(), "alice", "pw").await;
        assert_eq!(message, "welcome");
    }

    #[tokio::test]
    async fn rejected_login_is_shown_as_error() {
        let gateway = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid credentials"))
            .mount(&gateway)
            .await;

        let client = reqwest::Client::new();
        let message = perform_login(&client, &gateway.uri(), "alice", "nope").await;
        assert_eq!(message, "Error: invalid credentials");
    }

    #[tokio::test]
    async fn unreachable_gateway_is_shown_as_error() {
        let client = reqwest::Client::new();
        let message = perform_login(&client, "http://127.0.0.1:1", "alice", "pw").await;
        assert!(message.starts_with("Error: "), "got: {message}");
    }
}
