use langfuse_http::{Config, LangfuseClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let client = LangfuseClient::new(&config);

    let project = client.projects().get().await?;
    println!("project: {}", serde_json::Value::Object(project));

    let prompts = client.prompts().list().await?;
    if let Some(data) = prompts.get("data").and_then(|data| data.as_array()) {
        for prompt in data {
            println!(
                "prompt: {} (versions: {})",
                prompt["name"].as_str().unwrap_or("<unnamed>"),
                prompt["versions"]
            );
        }
    }

    Ok(())
}
