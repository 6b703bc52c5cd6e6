use std::time::Duration;

use threads_api::{
    request::{ProfileLookup, UserThreads},
    request_options::{CursorPagination, MediaField, ProfileField},
    user::UserId,
    AsyncClient, ClientConfig, Unauthenticated,
};
use threads_api_tests::{mock_config, sign_in};
use threads_mock::{MockConfig, MockServer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Use an already-running mock if THREADS_API_BASE_URL points at one, otherwise start our own.
    let env_config = ClientConfig::from_env()?;
    let (config, _server) = if env_config.get_api_base_url().scheme() == "http" {
        (env_config, None)
    } else {
        let server = MockServer::start(MockConfig::new()).await?;
        (mock_config(&server.base_url())?, Some(server))
    };

    let client = AsyncClient::with_config(
        Unauthenticated,
        config.timeout(Duration::from_secs(30)),
    )?;

    let client = sign_in(client).await?;
    println!("signed in as user {}", client.user_id());

    let profile = client
        .get_user_profile(&ProfileLookup::new(UserId::me()).fields([
            ProfileField::Id,
            ProfileField::Username,
            ProfileField::Biography,
        ]))
        .await?;
    println!("{:?}", profile);

    let threads = client
        .get_user_threads(
            &UserThreads::new(UserId::me())
                .fields([MediaField::Id, MediaField::Text, MediaField::Timestamp])
                .pagination(CursorPagination::new().limit(10)),
        )
        .await?;

    for thread in &threads.data {
        println!("{:?}", thread);
    }

    Ok(())
}
