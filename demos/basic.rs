use postgrest_lite::{Client, ClientConfig};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
struct Profile {
    email_id: String,
    full_name: Option<String>,
}

#[derive(Serialize)]
struct NewUser<'a> {
    email_id: &'a str,
    full_name: &'a str,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = Client::from_config(ClientConfig::from_env()?)?;
    let users = client.from("users");

    let existing = users
        .eq("email_id", "kit@example.com")
        .select("id")
        .await
        .into_result()?;
    let registered = matches!(existing, Some(serde_json::Value::Array(rows)) if !rows.is_empty());

    if !registered {
        let created = users
            .clone()
            .insert(&NewUser {
                email_id: "kit@example.com",
                full_name: "Kit",
            })
            .await;
        if let Some(err) = created.error {
            anyhow::bail!("signup failed: {err}");
        }
    }

    let profile: Option<Profile> = users
        .or("email_id.eq.kit@example.com,user_name.eq.kit")
        .eq("is_active", true)
        .limit(1)
        .single()
        .select("email_id,full_name")
        .await
        .deserialize()?;
    println!("{profile:?}");

    let vouchers = client
        .with_schema("reporting")
        .from("voucher")
        .eq("voucher_type", "Sales")
        .order_by([("date", false), ("voucher_number", true)])
        .select("*")
        .await;
    println!("{:?}", vouchers.data);

    Ok(())
}
