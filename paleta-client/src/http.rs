use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use url::Url;

use crate::errors::RemoteError;
use crate::model::{ColorCandidate, ColorEntry, ColorId, Envelope, ErrorBody};
use crate::service::RemoteColorService;

const COLLECTION: &str = "colores";
const JSON: &str = "application/json";

/// [`RemoteColorService`] backed by the REST API.
#[derive(Debug, Clone)]
pub struct HttpColorService {
    client: Client,
    base: Url,
}

impl HttpColorService {
    /// Create a service rooted at the API base, e.g.
    /// `http://localhost:3001/api`.
    pub fn new(base: Url) -> Result<Self, RemoteError> {
        Self::with_client(Client::new(), base)
    }

    pub fn with_client(client: Client, base: Url) -> Result<Self, RemoteError> {
        if base.cannot_be_a_base() {
            return Err(RemoteError::transport(format!(
                "API base URL cannot carry a path: {base}"
            )));
        }
        Ok(Self { client, base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, id: Option<&ColorId>) -> Url {
        let mut url = self.base.clone();
        // `new` rejected cannot-be-a-base URLs.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(COLLECTION);
            if let Some(id) = id {
                segments.push(&id.to_string());
            }
        }
        url
    }

    /// Start a JSON request against the collection or one of its items.
    fn request(&self, method: Method, id: Option<&ColorId>) -> RequestBuilder {
        let url = self.endpoint(id);
        log::debug!("{method} {url}");
        self.client
            .request(method, url)
            .header(CONTENT_TYPE, JSON)
            .header(ACCEPT, JSON)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<Option<T>, RemoteError> {
        let body = self.exchange(request).await?;
        let envelope: Envelope<T> = serde_json::from_slice(&body)?;
        Ok(envelope.data)
    }

    /// Perform the request and return the raw body of a 2xx response.
    async fn exchange(
        &self,
        request: RequestBuilder,
    ) -> Result<Vec<u8>, RemoteError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();

        if status.is_success() {
            return Ok(body);
        }

        let message = serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .and_then(ErrorBody::into_message);
        let err = RemoteError::from_status(status.as_u16(), message);
        log::warn!("remote answered {status}: {err}");
        Err(err)
    }

    async fn send_entry(
        &self,
        request: RequestBuilder,
    ) -> Result<ColorEntry, RemoteError> {
        self.send(request)
            .await?
            .ok_or_else(|| RemoteError::transport("response carried no data"))
    }
}

#[async_trait]
impl RemoteColorService for HttpColorService {
    async fn list(&self) -> Result<Vec<ColorEntry>, RemoteError> {
        let entries: Option<Vec<ColorEntry>> =
            self.send(self.request(Method::GET, None)).await?;
        Ok(entries.unwrap_or_default())
    }

    async fn get(&self, id: &ColorId) -> Result<ColorEntry, RemoteError> {
        self.send_entry(self.request(Method::GET, Some(id))).await
    }

    async fn create(
        &self,
        candidate: &ColorCandidate,
    ) -> Result<ColorEntry, RemoteError> {
        let request = self.request(Method::POST, None).json(candidate);
        self.send_entry(request).await
    }

    async fn update(
        &self,
        id: &ColorId,
        candidate: &ColorCandidate,
    ) -> Result<ColorEntry, RemoteError> {
        let request = self.request(Method::PUT, Some(id)).json(candidate);
        self.send_entry(request).await
    }

    async fn delete(&self, id: &ColorId) -> Result<(), RemoteError> {
        self.exchange(self.request(Method::DELETE, Some(id))).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;
    use crate::errors::GENERIC_FAILURE;

    fn service(base: &str) -> HttpColorService {
        let base = Url::parse(base).expect("valid url");
        HttpColorService::new(base).expect("should accept base")
    }

    /// Answer a single request on a loopback port with a canned response
    /// and return a service rooted at that port.
    async fn serve_once(status: &str, body: &'static str) -> HttpColorService {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("loopback bind");
        let addr = listener.local_addr().expect("local address");
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\n\
             Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );

        tokio::spawn(async move {
            let (mut socket, _) =
                listener.accept().await.expect("incoming request");
            let mut request = Vec::new();
            let mut chunk = [0_u8; 1024];
            while !request.windows(4).any(|window| window == b"\r\n\r\n") {
                let read = socket.read(&mut chunk).await.expect("read request");
                if read == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..read]);
            }
            socket
                .write_all(response.as_bytes())
                .await
                .expect("write response");
            let _ = socket.shutdown().await;
        });

        let client = Client::builder()
            .no_proxy()
            .build()
            .expect("client should build");
        let base = Url::parse(&format!("http://{addr}/api")).expect("valid url");
        HttpColorService::with_client(client, base).expect("should accept base")
    }

    #[tokio::test]
    async fn given_404_with_mensaje_when_fetched_then_not_found_carries_it() {
        let service =
            serve_once("404 Not Found", r#"{"mensaje":"Color no encontrado"}"#)
                .await;

        let err = service
            .get(&ColorId::Number(9))
            .await
            .expect_err("missing color must fail");

        assert_eq!(err, RemoteError::not_found("Color no encontrado"));
    }

    #[tokio::test]
    async fn given_error_without_message_when_listed_then_generic_is_used() {
        let service =
            serve_once("500 Internal Server Error", "<html>oops</html>").await;

        let err = service.list().await.expect_err("server error must fail");

        assert_eq!(err, RemoteError::rejected(500, GENERIC_FAILURE));
    }

    #[tokio::test]
    async fn given_success_with_non_json_body_when_listed_then_transport_error()
    {
        let service = serve_once("200 OK", "<html>not json</html>").await;

        let err = service.list().await.expect_err("html body must fail");

        assert!(matches!(err, RemoteError::Transport { .. }));
    }

    #[tokio::test]
    async fn given_success_without_data_when_listed_then_palette_is_empty() {
        let service = serve_once("200 OK", "{}").await;

        assert_eq!(service.list().await, Ok(Vec::new()));
    }

    #[tokio::test]
    async fn given_document_id_when_fetched_then_text_id_is_returned() {
        let service = serve_once(
            "200 OK",
            r##"{"data":{"_id":"ab","nombre":"Rosa","hex":"#ffc0cb"}}"##,
        )
        .await;

        let entry = service
            .get(&ColorId::from("ab"))
            .await
            .expect("entry should be returned");

        assert_eq!(entry.id, ColorId::from("ab"));
        assert_eq!(entry.name, "Rosa");
        assert_eq!(entry.hex(), Some("#ffc0cb"));
    }

    #[test]
    fn given_api_base_when_endpoint_built_then_collection_is_appended() {
        let service = service("http://localhost:3001/api");
        assert_eq!(
            service.endpoint(None).as_str(),
            "http://localhost:3001/api/colores"
        );
    }

    #[test]
    fn given_trailing_slash_when_endpoint_built_then_no_empty_segment() {
        let service = service("http://localhost:3001/api/");
        assert_eq!(
            service.endpoint(Some(&ColorId::Number(7))).as_str(),
            "http://localhost:3001/api/colores/7"
        );
    }

    #[test]
    fn given_text_id_when_endpoint_built_then_id_is_escaped() {
        let service = service("http://example.com/api");
        assert_eq!(
            service.endpoint(Some(&ColorId::from("a b"))).as_str(),
            "http://example.com/api/colores/a%20b"
        );
    }

    #[test]
    fn given_opaque_url_when_service_created_then_it_is_rejected() {
        let base = Url::parse("mailto:colors@example.com").expect("valid url");
        assert!(matches!(
            HttpColorService::new(base),
            Err(RemoteError::Transport { .. })
        ));
    }
}
