use wasm_bindgen_futures::spawn_local;

use crate::api::ApiClient;
use crate::config::Config;
use crate::model::{CompletionRecord, Session};

/// Fire-and-forget result submission. Failures are logged; game state never
/// depends on the outcome and nothing is retried.
pub(crate) fn submit_completion(session: Session, record: CompletionRecord) {
    let client = ApiClient::from_config(&Config::new());
    spawn_local(async move {
        match client.submit_round(&session, &record).await {
            Ok(()) => log::info!(
                "recorded result for activity {}: {} points",
                record.activity_id,
                record.score
            ),
            Err(err) => log::error!("failed to record round result: {err}"),
        }
    });
}
