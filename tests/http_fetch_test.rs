//! Integration tests for the reqwest-backed fetcher
//!
//! A minimal HTTP/1.1 server on a local port answers each path with a
//! canned status and body.

#[cfg(feature = "async")]
mod tests {
    use asset_resolver::prelude::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    struct TestServer {
        base_url: String,
        shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    }

    impl TestServer {
        async fn new(routes: Vec<(&'static str, u16, Vec<u8>)>) -> Self {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            let routes: Arc<HashMap<&'static str, (u16, Vec<u8>)>> = Arc::new(
                routes
                    .into_iter()
                    .map(|(path, status, body)| (path, (status, body)))
                    .collect(),
            );

            let (shutdown_tx, mut shutdown_rx) = tokio::sync::oneshot::channel::<()>();

            tokio::spawn(async move {
                loop {
                    tokio::select! {
                        _ = &mut shutdown_rx => break,
                        accepted = listener.accept() => {
                            let Ok((stream, _)) = accepted else { break };
                            let routes = Arc::clone(&routes);
                            tokio::spawn(async move {
                                let _ = serve(stream, &routes).await;
                            });
                        }
                    }
                }
            });

            Self {
                base_url: format!("http://{}", addr),
                shutdown_tx: Some(shutdown_tx),
            }
        }

        fn url(&self, path: &str) -> String {
            format!("{}{}", self.base_url, path)
        }
    }

    impl Drop for TestServer {
        fn drop(&mut self) {
            if let Some(shutdown_tx) = self.shutdown_tx.take() {
                let _ = shutdown_tx.send(());
            }
        }
    }

    async fn serve(
        mut stream: TcpStream,
        routes: &HashMap<&'static str, (u16, Vec<u8>)>,
    ) -> std::io::Result<()> {
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).await?;
            if n == 0 {
                return Ok(());
            }
            request.extend_from_slice(&buf[..n]);
        }

        let head = String::from_utf8_lossy(&request);
        let path = head.split_whitespace().nth(1).unwrap_or("/").to_string();
        let (status, body) = routes.get(path.as_str()).cloned().unwrap_or((404, Vec::new()));

        let header = format!(
            "HTTP/1.1 {} X\r\nContent-Length: {}\r\nContent-Type: application/octet-stream\r\nConnection: close\r\n\r\n",
            status,
            body.len()
        );
        stream.write_all(header.as_bytes()).await?;
        stream.write_all(&body).await?;
        stream.shutdown().await
    }

    /// URL of a local port with nothing listening on it
    async fn refused_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}/", addr)
    }

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(&HttpOptions {
            timeout: Duration::from_secs(5),
            user_agent: "asset-resolver-tests".to_string(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_binary_body_untouched() {
        let body: Vec<u8> = vec![0x00, 0xff, 0xfe, 0x89, b'P', b'N', b'G', 0x0d, 0x0a];
        let server = TestServer::new(vec![("/img.png", 200, body.clone())]).await;

        let response = fetcher().fetch(&server.url("/img.png")).await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, body);
    }

    #[tokio::test]
    async fn test_error_status_is_a_response() {
        let server = TestServer::new(vec![("/broken", 500, b"oops".to_vec())]).await;

        let response = fetcher().fetch(&server.url("/broken")).await.unwrap();
        assert_eq!(response.status, 500);
        assert_eq!(response.body, b"oops".to_vec());

        let missing = fetcher().fetch(&server.url("/nothing")).await.unwrap();
        assert!(missing.is_not_found());
    }

    #[tokio::test]
    async fn test_refused_connection_is_transport_error() {
        let url = refused_url().await;
        let err = fetcher().fetch(&url).await.unwrap_err();
        assert!(matches!(
            err,
            TransportError::Connect(_) | TransportError::Request(_)
        ));
    }

    #[tokio::test]
    async fn test_resolver_over_http() {
        let primary = TestServer::new(vec![("/assets/abc.wav", 503, Vec::new())]).await;
        let mirror = TestServer::new(vec![("/abc.wav", 200, b"RIFF".to_vec())]).await;
        let dead = refused_url().await;

        let config = ResolverConfig {
            timeout_secs: 5,
            sources: vec![
                SourceConfig {
                    types: vec!["Sound".to_string()],
                    url: format!("{}{{asset_id}}.{{data_format}}", dead),
                },
                SourceConfig {
                    types: vec!["Sound".to_string()],
                    url: primary.url("/assets/{asset_id}.{data_format}"),
                },
                SourceConfig {
                    types: vec!["ImageBitmap".to_string()],
                    url: primary.url("/never/{asset_id}"),
                },
                SourceConfig {
                    types: vec!["Sound".to_string()],
                    url: primary.url("/missing/{asset_id}"),
                },
                SourceConfig {
                    types: vec!["Sound".to_string()],
                    url: mirror.url("/{asset_id}.{data_format}"),
                },
            ],
            ..ResolverConfig::default()
        };

        let resolver = AssetResolver::with_registry(
            config.build_registry().unwrap(),
            HttpFetcher::new(&config.http_options()).unwrap(),
        );

        let asset = resolver.load(&AssetType::SOUND, "abc").await.unwrap().unwrap();
        assert_eq!(asset.data(), Some(&b"RIFF"[..]));
        assert_eq!(asset.data_format(), Some(DataFormat::Wav));

        let err = resolver.load(&AssetType::SOUND, "zzz").await.unwrap_err();
        let failures = err.failures().unwrap();
        // only the refused connection is recorded, every other source answers 404
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].source_index, 0);
        assert!(matches!(failures[0].cause, FailureCause::Transport(_)));

        let image = resolver.load(&AssetType::IMAGE_BITMAP, "abc").await.unwrap();
        assert!(image.is_none());
    }
}
