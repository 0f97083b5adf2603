use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response, Url};
use tracing::debug;

use highscore_codec::Checksummer;
use highscore_store::Document;
use highscore_types::{Topic, TopicKind};

use crate::error::{ClientError, ClientResult};
use crate::transport::TopicTransport;

/// Transport to a highscore server's `/api/{highscore,pack}` routes.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    base: Url,
    client: Client,
    checksummer: Checksummer,
}

impl HttpTransport {
    /// Transport for a server at `base`, e.g. `http://127.0.0.1:10000`.
    pub fn new(base: &str, checksummer: Checksummer) -> ClientResult<Self> {
        let invalid = |reason: String| ClientError::InvalidUrl {
            url: base.to_string(),
            reason,
        };
        let url = Url::parse(base).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
        }
        Ok(Self {
            base: url,
            client: Client::new(),
            checksummer,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn kind_url(&self, kind: TopicKind) -> String {
        format!("{}/api/{}", self.base.as_str().trim_end_matches('/'), kind.prefix())
    }

    fn topic_url(&self, topic: &Topic) -> String {
        format!("{}/{}", self.kind_url(topic.kind()), topic.name())
    }
}

/// Body of a successful response, or the server's error message.
async fn body_text(response: Response) -> ClientResult<String> {
    let status = response.status();
    let body = response.text().await?;
    if status.is_success() {
        return Ok(body);
    }
    let message = body.trim_end().to_string();
    let status = status.as_u16();
    if (400..500).contains(&status) {
        Err(ClientError::Refused { status, message })
    } else {
        Err(ClientError::Server { status, message })
    }
}

#[async_trait]
impl TopicTransport for HttpTransport {
    async fn fetch(&self, topic: &Topic) -> ClientResult<Document> {
        let url = self.topic_url(topic);
        debug!(%topic, %url, "fetching topic");
        let response = self.client.get(&url).send().await?;
        let text = body_text(response).await?;
        Ok(Document::decode(topic.kind(), &text, &self.checksummer))
    }

    async fn submit(&self, topic: &Topic, line: &str) -> ClientResult<Document> {
        let url = self.topic_url(topic);
        debug!(%topic, %url, "submitting entry");
        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(line.to_string())
            .send()
            .await?;
        let text = body_text(response).await?;
        Ok(Document::decode(topic.kind(), &text, &self.checksummer))
    }

    async fn list(&self, kind: TopicKind) -> ClientResult<Vec<Topic>> {
        let response = self.client.get(self.kind_url(kind)).send().await?;
        let text = body_text(response).await?;
        text.lines()
            .filter(|name| !name.is_empty())
            .map(|name| Topic::new(kind, name).map_err(ClientError::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(base: &str) -> HttpTransport {
        HttpTransport::new(base, Checksummer::DEFAULT).unwrap()
    }

    #[test]
    fn topic_urls() {
        let t = transport("http://127.0.0.1:10000");
        assert_eq!(
            t.topic_url(&Topic::leaderboard("tetris").unwrap()),
            "http://127.0.0.1:10000/api/highscore/tetris"
        );
        assert_eq!(
            t.topic_url(&Topic::pack("news").unwrap()),
            "http://127.0.0.1:10000/api/pack/news"
        );
        assert_eq!(t.kind_url(TopicKind::Pack), "http://127.0.0.1:10000/api/pack");
    }

    #[test]
    fn base_path_is_kept() {
        let t = transport("http://example.org/scores/");
        assert_eq!(
            t.topic_url(&Topic::leaderboard("a").unwrap()),
            "http://example.org/scores/api/highscore/a"
        );
    }

    #[test]
    fn invalid_urls() {
        for base in ["not a url", "ftp://example.org", "127.0.0.1:10000"] {
            let err = HttpTransport::new(base, Checksummer::DEFAULT).unwrap_err();
            assert!(matches!(err, ClientError::InvalidUrl { .. }), "{base}");
        }
    }
}
