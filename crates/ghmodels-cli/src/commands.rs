//! Subcommand implementations.

use anyhow::Context;
use ghmodels::{ChatRequest, Message, ModelsClient, RateLimitInfo};

use crate::TRACING_TARGET_CLI;
use crate::config::{ChatArgs, ModelsArgs};

pub async fn list_models(client: &ModelsClient, args: &ModelsArgs) -> anyhow::Result<()> {
    let models = client
        .list_models()
        .await
        .context("failed to list models")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&models)?);
        return Ok(());
    }

    for model in &models {
        if model.name.is_empty() {
            println!("{}", model.id);
        } else {
            println!("{}\t{}", model.id, model.name);
        }
    }

    Ok(())
}

pub async fn chat(client: &ModelsClient, args: &ChatArgs) -> anyhow::Result<()> {
    let request = build_request(args);

    let result = match args.org.as_deref() {
        Some(org) => client.org_chat_completion(org, &request).await,
        None => client.chat_completion(&request).await,
    };

    let response = match result {
        Ok(response) => response,
        Err(error) => {
            if let Some(rate_limit) = error.rate_limit() {
                log_rate_limit(&rate_limit);
            }
            return Err(error).context("chat completion failed");
        }
    };

    tracing::info!(
        target: TRACING_TARGET_CLI,
        id = %response.id,
        prompt_tokens = response.usage.prompt_tokens,
        completion_tokens = response.usage.completion_tokens,
        total_tokens = response.usage.total_tokens,
        "chat completion finished"
    );
    log_rate_limit(&response.rate_limit);

    let content = response
        .content()
        .context("response contained no choices")?;
    println!("{content}");

    Ok(())
}

/// Formats an error with its whole cause chain, so status codes and response
/// bodies from the client are not hidden behind the outermost context.
pub fn error_report(error: &anyhow::Error) -> String {
    format!("{error:#}")
}

fn build_request(args: &ChatArgs) -> ChatRequest {
    let system = args.system.iter().map(Message::system);
    ChatRequest::new(&args.model)
        .with_messages(system)
        .with_message(Message::user(&args.prompt))
}

fn log_rate_limit(info: &RateLimitInfo) {
    tracing::info!(
        target: TRACING_TARGET_CLI,
        limit = info.limit,
        remaining = info.remaining,
        reset_at = ?info.reset_at(),
        retry_after_secs = info.retry_after,
        "rate limit"
    );
}

#[cfg(test)]
mod tests {
    use ghmodels::{Error, Role};

    use super::*;

    #[test]
    fn test_build_request_with_system_prompt() {
        let args = ChatArgs {
            model: "openai/gpt-4.1".to_string(),
            system: Some("be brief".to_string()),
            org: None,
            prompt: "hello".to_string(),
        };

        let request = build_request(&args);
        assert_eq!(request.model, "openai/gpt-4.1");
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, Role::System);
        assert_eq!(request.messages[1], Message::user("hello"));
    }

    #[test]
    fn test_build_request_without_system_prompt() {
        let args = ChatArgs {
            model: "m".to_string(),
            system: None,
            org: None,
            prompt: "hi".to_string(),
        };

        let request = build_request(&args);
        assert_eq!(request.messages, vec![Message::user("hi")]);
    }

    #[test]
    fn test_error_report_includes_status_and_body() {
        let result: Result<(), Error> = Err(Error::UnexpectedStatus {
            status: 429,
            body: Some("slow down".to_string()),
            partial: None,
        });
        let error = result.context("chat completion failed").unwrap_err();

        let report = error_report(&error);
        assert!(report.starts_with("chat completion failed: "));
        assert!(report.contains("429"));
        assert!(report.contains("slow down"));
    }

    #[test]
    fn test_error_report_includes_decode_body() {
        let source = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let result: Result<(), Error> = Err(Error::Decode {
            source,
            body: "{oops".to_string(),
        });
        let error = result.context("failed to list models").unwrap_err();

        assert!(error_report(&error).contains("{oops"));
    }
}
