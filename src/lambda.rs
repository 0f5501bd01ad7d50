use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use lead_intake::core::relay::{FunctionEvent, RelayResponse};
use lead_intake::utils::logger;
use lead_intake::{NotificationRelay, RelayConfig};
use tracing::Instrument;

async fn function_handler(
    client: &reqwest::Client,
    event: LambdaEvent<FunctionEvent>,
) -> Result<RelayResponse, Error> {
    let span = logger::relay_span(&event.context.request_id);

    async move {
        tracing::info!("Notification relay invoked with {}", event.payload.http_method);

        // 每次呼叫重新讀取環境變數，憑證不會快取在程式內
        let relay = NotificationRelay::new(client.clone(), RelayConfig::from_env());
        let response = relay.handle_event(&event.payload).await;

        tracing::info!(status = response.status_code, "Notification relay responded");
        Ok(response)
    }
    .instrument(span)
    .await
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let client = reqwest::Client::new();
    let shared_client = &client;
    run(service_fn(move |event: LambdaEvent<FunctionEvent>| async move {
        function_handler(shared_client, event).await
    }))
    .await
}
