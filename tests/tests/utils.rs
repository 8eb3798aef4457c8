use mock_service::{Faults, MockService, RunningMock};
use std::net::SocketAddr;
use std::sync::OnceLock;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[allow(unused)]
pub fn init() {
    static ONCE_LOCK: OnceLock<()> = OnceLock::new();

    ONCE_LOCK.get_or_init(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            default_panic(info);
            error!("Panic occurred: {info:?}");
        }));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("socialdrive=debug,mock_service=debug"))
            .with_test_writer()
            .try_init();
    });
}

#[allow(unused)]
pub async fn spawn_mock(faults: Faults) -> RunningMock {
    let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
    MockService::new(faults).spawn(addr).await.unwrap()
}
