use blind_score::keypair::KeyPair;
use lazy_static::lazy_static;
use score_server::config::Config;
use std::net::SocketAddr;
use tokio::net::TcpListener;

lazy_static! {
    /// Client-side key pair shared by the tests; small so the suite stays fast.
    #[allow(dead_code)]
    pub static ref CLIENT_KEYS: KeyPair = KeyPair::generate(512).unwrap();
}

pub struct TestServer {
    pub url: String,
    #[allow(dead_code)]
    pub addr: SocketAddr,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with(Config {
            port: 0, // OS assigns port
            ..Config::default()
        })
        .await
    }

    pub async fn start_with(config: Config) -> Self {
        let state = score_server::state::AppState::new(&config).unwrap();
        let app = score_server::routes::router(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give server a moment to start
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        Self {
            url: format!("http://{addr}"),
            addr,
        }
    }
}
