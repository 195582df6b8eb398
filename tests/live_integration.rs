use postgrest_lite::{Client, ClientConfig, PostgrestError};
use serde_json::json;

/// Reads `SUPABASE_URL` / `SUPABASE_KEY` plus the table to exercise.
fn load_live_target() -> Result<(ClientConfig, String), String> {
    let config = ClientConfig::from_env().map_err(|err| err.to_string())?;
    let table = std::env::var("SUPABASE_LIVE_TABLE")
        .map_err(|_| "SUPABASE_LIVE_TABLE is required for the live test".to_owned())?;
    Ok((config, table))
}

#[tokio::test]
async fn live_select_and_unknown_table() {
    let (config, table) = match load_live_target() {
        Ok(values) => values,
        Err(reason) => {
            eprintln!("skipping live test: {reason}");
            return;
        }
    };

    let client = Client::from_config(config).expect("client must build");

    let rows = client
        .from(&table)
        .limit(1)
        .select("*")
        .await
        .into_result()
        .expect("select must succeed");
    assert!(matches!(rows, Some(serde_json::Value::Array(_))));

    let missing = client
        .from("postgrest_lite_missing_table")
        .select("*")
        .await;
    assert!(missing.data.is_none());
    match missing.error {
        Some(PostgrestError::Http { status, body }) => {
            assert!(status >= 400);
            assert_ne!(body, json!(null));
        }
        other => panic!("expected http error, got {other:?}"),
    }
}
