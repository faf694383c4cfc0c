use langfuse_http::{ChatMessage, GetPromptOptions, LangfuseClient, Prompt, PromptContent};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = LangfuseClient::from_env()?;

    let draft = Prompt::chat(
        "example-chat-prompt",
        vec![
            ChatMessage::system("You are a helpful assistant."),
            ChatMessage::user("Hello, how are you?"),
        ],
    )
    .with_labels(["staging"])
    .with_tags(["chat", "example"])
    .with_commit_message("Initial version of example chat prompt");

    let created = client.prompts().create(&draft).await?;
    let version = created
        .version
        .ok_or_else(|| anyhow::anyhow!("server did not assign a version"))?;
    println!("created {} v{version}", created.name);

    let fetched = client
        .prompts()
        .get(&created.name, GetPromptOptions::version(version))
        .await?;
    if let PromptContent::Chat(messages) = &fetched.content {
        for message in messages {
            println!("  {message:?}");
        }
    }

    let promoted = client
        .prompts()
        .update_version_labels(&created.name, version, &["production".to_owned()])
        .await?;
    println!("labels now: {:?}", promoted.labels);

    Ok(())
}
