use url::Url;
use wiremock::MockServer;

use crate::{Client, ClientConfig};

/// A client whose API and upload hosts both point at `server`.
pub(crate) fn test_client(server: &MockServer) -> Client {
    let base: Url = server.uri().parse().unwrap();
    Client::new(
        ClientConfig::new("sk_test_123")
            .with_api_base(base.clone())
            .with_files_base(base),
    )
    .unwrap()
}
