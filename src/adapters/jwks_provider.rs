use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::jwk::JwkSet;
use reqwest::header;
use tokio::sync::{mpsc, oneshot};

const DEFAULT_TTL_MINUTES: i64 = 10;

#[derive(Debug, Clone)]
struct CachedJwks {
    jwks: JwkSet,
    expires: DateTime<Utc>,
}

async fn fetch_jwks(client: &reqwest::Client, url: &str) -> anyhow::Result<CachedJwks> {
    let res = client.get(url).send().await?.error_for_status()?;
    let expires = match res.headers().get(header::EXPIRES) {
        Some(value) => DateTime::parse_from_rfc2822(value.to_str()?)?.with_timezone(&Utc),
        None => Utc::now() + Duration::minutes(DEFAULT_TTL_MINUTES),
    };
    let jwks = res.json::<JwkSet>().await?;

    Ok(CachedJwks { jwks, expires })
}

/// Owns the identity provider's signing keys and refreshes them once expired.
#[derive(Debug)]
pub struct JwksProvider {
    client: reqwest::Client,
    url: String,
    data: Option<CachedJwks>,
}

impl JwksProvider {
    pub fn spawn(url: String) -> mpsc::Sender<JwksProviderCommand> {
        let (sender, receiver) = mpsc::channel(32);
        tokio::spawn(Self::run(url, receiver));
        sender
    }

    pub async fn run(url: String, mut command_receiver: mpsc::Receiver<JwksProviderCommand>) {
        let mut provider = JwksProvider {
            client: reqwest::Client::new(),
            url,
            data: None,
        };
        while let Some(command) = command_receiver.recv().await {
            match command {
                JwksProviderCommand::Get { resp } => {
                    let _ = resp.send(provider.get().await);
                }
            }
        }
    }

    async fn get(&mut self) -> anyhow::Result<JwkSet> {
        if let Some(data) = self.data.as_ref().filter(|key| key.expires > Utc::now()) {
            Ok(data.jwks.clone())
        } else {
            tracing::info!("fetch jwks from {}", self.url);
            let fetched = fetch_jwks(&self.client, &self.url)
                .await
                .context("fetch jwks")?;
            self.data = Some(fetched.clone());
            Ok(fetched.jwks)
        }
    }
}

#[derive(Debug)]
pub enum JwksProviderCommand {
    Get {
        resp: oneshot::Sender<anyhow::Result<JwkSet>>,
    },
}
