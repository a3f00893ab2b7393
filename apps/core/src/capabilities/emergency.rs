use crate::capabilities::traits::EmergencyEscalation;
use crate::config::{RouterConfig, TelephonyConfig};
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tokio::time::timeout;
use tracing::{error, info, warn};
use url::Url;

pub const SIMULATION_MESSAGE: &str = "✅ Demo: Emergency call triggered (simulation). \
In real deployment, this would place a call to the configured emergency contact.";

pub const INCOMPLETE_CONFIG_MESSAGE: &str = "⚠️ Twilio call is enabled but configuration is incomplete. \
Please set TWILIO_ACCOUNT_SID, TWILIO_AUTH_TOKEN, TWILIO_FROM_NUMBER, EMERGENCY_CONTACT.";

/// Subset of the Twilio call resource we care about.
#[derive(Debug, Deserialize)]
struct CallResource {
    sid: String,
}

/// Emergency escalation through Twilio's voice API.
///
/// Real calls happen only when demo mode is off, calling is explicitly
/// enabled, and every credential is present. Every other combination is
/// answered with a descriptive message and no network traffic.
pub struct TwilioEscalation {
    client: Client,
    demo_mode: bool,
    config: TelephonyConfig,
}

impl TwilioEscalation {
    pub fn new(router: &RouterConfig, config: &TelephonyConfig) -> Self {
        Self {
            client: Client::new(),
            demo_mode: router.demo_mode,
            config: config.clone(),
        }
    }

    fn calls_endpoint(&self) -> Result<Url, AppError> {
        let base = Url::parse(&self.config.api_base)?;
        Ok(base.join(&format!(
            "/2010-04-01/Accounts/{}/Calls.json",
            self.config.account_sid
        ))?)
    }

    async fn place_call(&self) -> Result<String, AppError> {
        let endpoint = self.calls_endpoint()?;
        // The deadline covers the body as well as the headers.
        timeout(self.config.timeout, self.exchange(endpoint)).await?
    }

    async fn exchange(&self, endpoint: Url) -> Result<String, AppError> {
        let form = [
            ("To", self.config.emergency_contact.as_str()),
            ("From", self.config.from_number.as_str()),
            ("Url", self.config.twiml_url.as_str()),
        ];

        let res = self
            .client
            .post(endpoint)
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&form)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(AppError::Provider(format!(
                "call request failed with status {}: {}",
                status, body
            )));
        }

        let call: CallResource = res
            .json()
            .await
            .map_err(|e| AppError::Provider(e.to_string()))?;
        Ok(call.sid)
    }
}

#[async_trait]
impl EmergencyEscalation for TwilioEscalation {
    async fn trigger(&self) -> String {
        if self.demo_mode || !self.config.enable_call {
            info!(demo_mode = self.demo_mode, "Emergency call simulated");
            return SIMULATION_MESSAGE.to_string();
        }

        if !self.config.is_complete() {
            warn!("Emergency calling enabled without full Twilio configuration");
            return INCOMPLETE_CONFIG_MESSAGE.to_string();
        }

        match self.place_call().await {
            Ok(sid) => {
                info!(call_sid = %sid, "Emergency call placed");
                format!("📞 Emergency call placed successfully. Call SID: {}", sid)
            }
            Err(e) => {
                error!("Emergency call failed: {}", e);
                format!("❌ Failed to place call via Twilio: {}", e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use wiremock::matchers::{body_string_contains, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Accepts one connection, sends headers and one body byte, then goes quiet.
    async fn spawn_stalling_server(status_line: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let head = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: 100\r\n\r\n{{",
                status_line
            );
            socket.write_all(head.as_bytes()).await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
            drop(socket);
        });
        format!("http://{}", addr)
    }

    fn live_config(api_base: String) -> TelephonyConfig {
        TelephonyConfig {
            enable_call: true,
            account_sid: "AC123".to_string(),
            auth_token: "secret".to_string(),
            from_number: "+15550001111".to_string(),
            emergency_contact: "+15550002222".to_string(),
            api_base,
            twiml_url: "http://demo.twilio.com/docs/voice.xml".to_string(),
            timeout: Duration::from_secs(2),
        }
    }

    const LIVE: RouterConfig = RouterConfig { demo_mode: false };

    #[tokio::test]
    async fn test_successful_call_reports_sid() {
        // 1. Arrange
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/2010-04-01/Accounts/AC123/Calls.json"))
            .and(header_exists("authorization"))
            .and(body_string_contains("To=%2B15550002222"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "sid": "CA999",
                "status": "queued"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;
        let escalation = TwilioEscalation::new(&LIVE, &live_config(mock_server.uri()));

        // 2. Act
        let message = escalation.trigger().await;

        // 3. Assert
        assert_eq!(message, "📞 Emergency call placed successfully. Call SID: CA999");
    }

    #[tokio::test]
    async fn test_provider_rejection_is_reported_not_raised() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Authenticate"))
            .mount(&mock_server)
            .await;
        let escalation = TwilioEscalation::new(&LIVE, &live_config(mock_server.uri()));

        let message = escalation.trigger().await;

        assert!(message.starts_with("❌ Failed to place call via Twilio:"));
        assert!(message.contains("401"));
    }

    #[tokio::test]
    async fn test_demo_mode_never_calls_provider() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "sid": "CA1" })))
            .expect(0)
            .mount(&mock_server)
            .await;
        let escalation = TwilioEscalation::new(
            &RouterConfig { demo_mode: true },
            &live_config(mock_server.uri()),
        );

        assert_eq!(escalation.trigger().await, SIMULATION_MESSAGE);
    }

    #[tokio::test]
    async fn test_disabled_calls_simulate_outside_demo_mode() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "sid": "CA1" })))
            .expect(0)
            .mount(&mock_server)
            .await;
        let mut config = live_config(mock_server.uri());
        config.enable_call = false;
        let escalation = TwilioEscalation::new(&LIVE, &config);

        assert!(config.is_complete());
        assert_eq!(escalation.trigger().await, SIMULATION_MESSAGE);
    }

    #[tokio::test]
    async fn test_stalled_body_reports_timeout() {
        let api_base = spawn_stalling_server("HTTP/1.1 201 Created").await;
        let mut config = live_config(api_base);
        config.timeout = Duration::from_millis(200);
        let escalation = TwilioEscalation::new(&LIVE, &config);

        let message = tokio::time::timeout(Duration::from_secs(3), escalation.trigger())
            .await
            .expect("trigger() must not outlive its own timeout");

        assert!(message.starts_with("❌ Failed to place call via Twilio:"));
        assert!(message.contains("timed out"));
    }
}
