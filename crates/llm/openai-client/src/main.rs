//! One-shot completion from the command line: `openai-client <prompt>`.

use openai_client::{CompletionParams, OpenAIClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let api_key = std::env::var("OPENAI_API_KEY")
        .map_err(|_| anyhow::anyhow!("OPENAI_API_KEY environment variable not set"))?;

    let client = match std::env::var("OPENAI_BASE_URL") {
        Ok(base_url) => OpenAIClient::with_base_url(api_key, base_url),
        Err(_) => OpenAIClient::new(api_key),
    };

    let prompt = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if prompt.trim().is_empty() {
        anyhow::bail!("usage: openai-client <prompt>");
    }

    let params = CompletionParams {
        model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "text-davinci-002".to_string()),
        max_tokens: 1024,
        temperature: 0.5,
    };

    let response = client.completion(&prompt, &params).await?;
    println!("{}", response);

    Ok(())
}
