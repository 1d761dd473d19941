use lambda_runtime::{service_fn, Error, LambdaEvent};
use resize_once::{
    config::ResizeConfig,
    edge::{self, EdgeEvent},
    fetch::HttpFetcher,
    init,
    pipeline::ResizeSummary,
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    init::init();
    lambda_runtime::run(service_fn(handler)).await
}

async fn handler(event: LambdaEvent<EdgeEvent>) -> Result<ResizeSummary, Error> {
    let (event, context) = event.into_parts();
    tracing::info!(invocation = %context.request_id, "edge invocation");

    // the blocking HTTP client must stay off the async worker threads
    let summary = tokio::task::spawn_blocking(move || {
        let config = ResizeConfig::load()?;
        let fetcher = HttpFetcher::new(config.timeout())?;
        edge::handle(&event, &config, &fetcher)
    })
    .await??;

    Ok(summary)
}
