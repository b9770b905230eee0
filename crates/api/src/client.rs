//! Game collection HTTP client.
//!
//! Async client using `reqwest`. Every call returns the decoded body on
//! success; a non-success status becomes [`ApiError::Server`] carrying the
//! body's `message` field when the server sent one. No retries, no timeouts.

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ApiError;
use crate::service::{ApiFuture, CollectionApi, ImageLookup};
use crate::types::{Ack, FormFields, GameId, GameRecord, ImageAnswer, NewGame, SearchFilter};

/// HTTP client for the game collection server.
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    /// Creates a client for the server at `base_url` (e.g. `http://127.0.0.1:5000`).
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base = base_url.trim().trim_end_matches('/');
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }

        let http = reqwest::Client::builder().build()?;

        Ok(Self {
            http,
            base_url: base.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a server path. Already-absolute URLs pass through.
    fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/{}", self.base_url, path.trim_start_matches('/'))
        }
    }

    /// Sends a request and returns the raw success body.
    async fn send(&self, req: reqwest::RequestBuilder) -> Result<Vec<u8>, ApiError> {
        let resp = req.send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;

        if !status.is_success() {
            return Err(ApiError::Server {
                status: status.as_u16(),
                message: extract_message(&body),
            });
        }

        Ok(body.to_vec())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!(%url, "GET");
        let body = self.send(self.http.get(&url).query(params)).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// `GET /games`.
    pub async fn list_games(&self) -> Result<Vec<GameRecord>, ApiError> {
        self.get_json("/games", &[]).await
    }

    /// `GET /search`. Only non-empty criteria are sent.
    pub async fn search_games(&self, filter: &SearchFilter) -> Result<Vec<GameRecord>, ApiError> {
        self.get_json("/search", &filter.to_params()).await
    }

    /// `POST /add`.
    pub async fn add_game(&self, game: &NewGame) -> Result<Ack, ApiError> {
        let url = self.url("/add");
        debug!(%url, name = %game.name, platform = %game.platform, "POST");
        let body = self.send(self.http.post(&url).json(game)).await?;
        Ok(decode_ack(&body))
    }

    /// `DELETE /delete/:id`, with `{"deletion_code": ...}` when a code is given.
    pub async fn delete_game(
        &self,
        id: &GameId,
        deletion_code: Option<&str>,
    ) -> Result<(), ApiError> {
        let encoded = utf8_percent_encode(id.as_str(), NON_ALPHANUMERIC).to_string();
        let url = self.url(&format!("/delete/{encoded}"));
        debug!(%url, with_code = deletion_code.is_some(), "DELETE");

        let mut req = self.http.delete(&url);
        if let Some(code) = deletion_code {
            req = req.json(&serde_json::json!({ "deletion_code": code }));
        }
        self.send(req).await?;
        Ok(())
    }

    /// `POST` the edit form fields to `action` as a JSON object.
    pub async fn submit_form(&self, action: &str, fields: &FormFields) -> Result<Ack, ApiError> {
        let url = self.url(action);
        debug!(%url, fields = fields.len(), "POST form");
        let body = self.send(self.http.post(&url).json(fields)).await?;
        Ok(decode_ack(&body))
    }

    /// `GET /game-image?name=`.
    pub async fn game_image(&self, name: &str) -> Result<Option<String>, ApiError> {
        let answer: ImageAnswer = self
            .get_json("/game-image", &[("name", name.to_string())])
            .await?;
        Ok(answer.image)
    }
}

impl CollectionApi for HttpClient {
    fn list(&self) -> ApiFuture<'_, Vec<GameRecord>> {
        Box::pin(self.list_games())
    }

    fn search<'a>(&'a self, filter: &'a SearchFilter) -> ApiFuture<'a, Vec<GameRecord>> {
        Box::pin(self.search_games(filter))
    }

    fn create<'a>(&'a self, game: &'a NewGame) -> ApiFuture<'a, Ack> {
        Box::pin(self.add_game(game))
    }

    fn delete<'a>(
        &'a self,
        id: &'a GameId,
        deletion_code: Option<&'a str>,
    ) -> ApiFuture<'a, ()> {
        Box::pin(self.delete_game(id, deletion_code))
    }

    fn save_form<'a>(&'a self, action: &'a str, fields: &'a FormFields) -> ApiFuture<'a, Ack> {
        Box::pin(self.submit_form(action, fields))
    }
}

impl ImageLookup for HttpClient {
    fn find_image<'a>(&'a self, name: &'a str) -> ApiFuture<'a, Option<String>> {
        Box::pin(self.game_image(name))
    }
}

/// Pulls a non-empty `message` field out of an error body.
fn extract_message(body: &[u8]) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        #[serde(default)]
        message: Option<String>,
    }

    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
}

/// Decodes a write acknowledgement. The status already decided success, so a
/// body that is not JSON (plain text, a redirected HTML page) is kept as text.
fn decode_ack(body: &[u8]) -> Ack {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ack::Null;
    }
    serde_json::from_slice(body).unwrap_or_else(|_| {
        let text = String::from_utf8_lossy(body).trim().to_string();
        debug!(len = text.len(), "non-JSON acknowledgement");
        Ack::String(text)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Starts a one-shot mock HTTP server answering with `status` and `body`.
    ///
    /// The join handle yields the raw request (head and body) it received.
    async fn mock_server(status: u16, body: &str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let url = format!("http://127.0.0.1:{port}");
        let body = body.to_string();

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let request = read_request(&mut stream).await;

            let resp = format!(
                "HTTP/1.1 {status} Mock\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            let _ = stream.write_all(resp.as_bytes()).await;
            let _ = stream.shutdown().await;
            request
        });

        (url, handle)
    }

    /// Reads one request: the head, then `Content-Length` bytes of body.
    async fn read_request(stream: &mut tokio::net::TcpStream) -> String {
        let mut data = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = stream.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            data.extend_from_slice(&buf[..n]);

            let text = String::from_utf8_lossy(&data).to_string();
            if let Some(head_end) = text.find("\r\n\r\n") {
                let content_length = text[..head_end]
                    .lines()
                    .find_map(|l| {
                        let (k, v) = l.split_once(':')?;
                        k.trim()
                            .eq_ignore_ascii_case("content-length")
                            .then(|| v.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if data.len() >= head_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&data).to_string()
    }

    fn request_line(raw: &str) -> &str {
        raw.lines().next().unwrap_or_default()
    }

    fn request_body(raw: &str) -> serde_json::Value {
        let body = raw.split_once("\r\n\r\n").map(|(_, b)| b).unwrap_or_default();
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn new_rejects_non_http_url() {
        assert!(matches!(
            HttpClient::new("ftp://example.com"),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn new_trims_trailing_slash() {
        let client = HttpClient::new("http://127.0.0.1:5000/").unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:5000");
        assert_eq!(client.url("/games"), "http://127.0.0.1:5000/games");
        assert_eq!(client.url("edit/1"), "http://127.0.0.1:5000/edit/1");
        assert_eq!(client.url("https://other/x"), "https://other/x");
    }

    #[tokio::test]
    async fn list_games_decodes_records() {
        let json = r#"[
            {"_id":{"$oid":"a1"},"name":"Halo","platform":"Xbox"},
            {"_id":{"$oid":"b2"},"name":"Zelda","platform":"Switch","image_url":"https://img/z.png"}
        ]"#;
        let (url, handle) = mock_server(200, json).await;

        let client = HttpClient::new(&url).unwrap();
        let games = client.list_games().await.unwrap();

        assert_eq!(games.len(), 2);
        assert_eq!(games[0].id.as_str(), "a1");
        assert_eq!(games[0].name, "Halo");
        assert_eq!(games[1].explicit_image(), Some("https://img/z.png"));

        let raw = handle.await.unwrap();
        assert!(request_line(&raw).starts_with("GET /games "));
    }

    #[tokio::test]
    async fn search_sends_only_non_empty_params() {
        let (url, handle) = mock_server(200, "[]").await;

        let client = HttpClient::new(&url).unwrap();
        let filter = SearchFilter::new("", "PC");
        let games = client.search_games(&filter).await.unwrap();
        assert!(games.is_empty());

        let raw = handle.await.unwrap();
        assert!(
            request_line(&raw).starts_with("GET /search?platform=PC "),
            "unexpected request line: {}",
            request_line(&raw)
        );
    }

    #[tokio::test]
    async fn search_encodes_query() {
        let (url, handle) = mock_server(200, "[]").await;

        let client = HttpClient::new(&url).unwrap();
        client
            .search_games(&SearchFilter::new("mario kart", "Switch"))
            .await
            .unwrap();

        let raw = handle.await.unwrap();
        assert!(
            request_line(&raw).starts_with("GET /search?query=mario+kart&platform=Switch "),
            "unexpected request line: {}",
            request_line(&raw)
        );
    }

    #[tokio::test]
    async fn add_game_posts_json_body() {
        let (url, handle) = mock_server(201, r#"{"message":"Game added successfully!"}"#).await;

        let client = HttpClient::new(&url).unwrap();
        let ack = client.add_game(&NewGame::new("Halo", "Xbox")).await.unwrap();
        assert_eq!(ack["message"], "Game added successfully!");

        let raw = handle.await.unwrap();
        assert!(request_line(&raw).starts_with("POST /add "));
        assert_eq!(
            request_body(&raw),
            serde_json::json!({"name": "Halo", "platform": "Xbox", "image_url": null})
        );
    }

    #[tokio::test]
    async fn add_game_surfaces_server_message() {
        let (url, handle) =
            mock_server(400, r#"{"status":"error","message":"Game already exists"}"#).await;

        let client = HttpClient::new(&url).unwrap();
        let err = client
            .add_game(&NewGame::new("Halo", "Xbox"))
            .await
            .unwrap_err();

        match &err {
            ApiError::Server { status, message } => {
                assert_eq!(*status, 400);
                assert_eq!(message.as_deref(), Some("Game already exists"));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        handle.abort();
    }

    #[tokio::test]
    async fn error_without_json_has_no_message() {
        let (url, handle) = mock_server(500, "Internal Server Error").await;

        let client = HttpClient::new(&url).unwrap();
        let err = client.list_games().await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Server {
                status: 500,
                message: None
            }
        ));

        handle.abort();
    }

    #[tokio::test]
    async fn delete_without_code_has_no_body() {
        let (url, handle) = mock_server(200, "").await;

        let client = HttpClient::new(&url).unwrap();
        client.delete_game(&GameId::new("a1"), None).await.unwrap();

        let raw = handle.await.unwrap();
        assert!(request_line(&raw).starts_with("DELETE /delete/a1 "));
        assert!(raw.ends_with("\r\n\r\n"));
    }

    #[tokio::test]
    async fn delete_with_code_sends_body_and_encodes_id() {
        let (url, handle) = mock_server(200, "{}").await;

        let client = HttpClient::new(&url).unwrap();
        client
            .delete_game(&GameId::new("a b"), Some("s3cret"))
            .await
            .unwrap();

        let raw = handle.await.unwrap();
        assert!(request_line(&raw).starts_with("DELETE /delete/a%20b "));
        assert_eq!(
            request_body(&raw),
            serde_json::json!({"deletion_code": "s3cret"})
        );
    }

    #[tokio::test]
    async fn submit_form_posts_fields_to_action() {
        let (url, handle) = mock_server(200, r#"{"status":"success"}"#).await;

        let client = HttpClient::new(&url).unwrap();
        let mut fields = FormFields::new();
        fields.insert("name".into(), "Halo 2".into());
        fields.insert("platform".into(), "Xbox".into());
        client.submit_form("/edit/a1", &fields).await.unwrap();

        let raw = handle.await.unwrap();
        assert!(request_line(&raw).starts_with("POST /edit/a1 "));
        assert_eq!(
            request_body(&raw),
            serde_json::json!({"name": "Halo 2", "platform": "Xbox"})
        );
    }

    #[tokio::test]
    async fn game_image_returns_url_or_none() {
        let (url, handle) = mock_server(200, r#"{"image":"https://img/halo.jpg"}"#).await;
        let client = HttpClient::new(&url).unwrap();
        assert_eq!(
            client.game_image("Halo").await.unwrap().as_deref(),
            Some("https://img/halo.jpg")
        );
        let raw = handle.await.unwrap();
        assert!(request_line(&raw).starts_with("GET /game-image?name=Halo "));

        let (url, handle) = mock_server(200, r#"{"image":null}"#).await;
        let client = HttpClient::new(&url).unwrap();
        assert!(client.game_image("Unknown").await.unwrap().is_none());
        handle.abort();
    }

    #[test]
    fn extract_message_variants() {
        assert_eq!(
            extract_message(br#"{"message":"nope"}"#).as_deref(),
            Some("nope")
        );
        assert!(extract_message(br#"{"message":""}"#).is_none());
        assert!(extract_message(br#"{"status":"error"}"#).is_none());
        assert!(extract_message(b"<html>").is_none());
        assert!(extract_message(b"[1,2]").is_none());
    }

    #[test]
    fn decode_ack_empty_body_is_null() {
        assert_eq!(decode_ack(b""), Ack::Null);
        assert_eq!(decode_ack(b"  \n"), Ack::Null);
        assert_eq!(decode_ack(br#"{"ok":true}"#)["ok"], true);
    }

    #[test]
    fn decode_ack_keeps_non_json_text() {
        assert_eq!(decode_ack(b"Created\n"), Ack::String("Created".into()));
        assert_eq!(
            decode_ack(b"<html>Saved</html>"),
            Ack::String("<html>Saved</html>".into())
        );
    }

    #[tokio::test]
    async fn submit_form_accepts_html_success_body() {
        let (url, handle) = mock_server(200, "<html>Saved</html>").await;

        let client = HttpClient::new(&url).unwrap();
        let ack = client
            .submit_form("/edit/a1", &FormFields::from([("name".into(), "Halo 2".into())]))
            .await
            .unwrap();
        assert_eq!(ack, Ack::String("<html>Saved</html>".into()));

        let raw = handle.await.unwrap();
        assert!(request_line(&raw).starts_with("POST /edit/a1 "));
    }

    #[tokio::test]
    async fn add_game_accepts_plain_text_success_body() {
        let (url, _handle) = mock_server(201, "Created").await;

        let client = HttpClient::new(&url).unwrap();
        let ack = client.add_game(&NewGame::new("Halo", "Xbox")).await.unwrap();
        assert_eq!(ack, Ack::String("Created".into()));
    }
}
