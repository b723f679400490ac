//! @ai:module:intent Runnable walkthroughs of the agent API: Q&A bot, tool agent, specialist team
//! @ai:module:layer application
//! @ai:module:public_api chat_client, qa, tool_agent, team

pub mod qa;
pub mod team;
pub mod tool_agent;

pub use qa::{qa_agent, run_qa_session, tell_story};
pub use team::{run_team, specialists, Team, TeamMode, Turn};
pub use tool_agent::{offline_tool_script, run_tool_demo, run_tool_session, tool_assistant};

use crate::config::ApiConfig;
use crate::frameworks::client::{ChatMessage, LlmClient, MockLlmClient, OpenAiClient};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

/// @ai:intent Chat backend for a walkthrough: the configured API when live, a scripted mock otherwise
/// @ai:pre live requires the API key variable to be set
/// @ai:effects pure
pub fn chat_client(
    config: &ApiConfig,
    live: bool,
    offline_script: Vec<ChatMessage>,
) -> Result<Arc<dyn LlmClient>> {
    if live {
        let key = config
            .api_key()
            .with_context(|| format!("--live requires {} to be set", config.api_key_env))?;
        info!(model = %config.model, "Using live chat-completions backend");
        Ok(Arc::new(OpenAiClient::new(config.clone(), key)?))
    } else {
        info!("Using offline mock backend");
        Ok(Arc::new(MockLlmClient::new(offline_script)))
    }
}

/// @ai:intent First `limit` characters of text, with "..." when cut
/// @ai:effects pure
pub fn preview(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// @ai:intent True for the words that end an interactive session
/// @ai:effects pure
pub(crate) fn is_quit(input: &str) -> bool {
    matches!(input.to_lowercase().as_str(), "quit" | "exit" | "q")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_cuts_on_char_boundary() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("exactly", 7), "exactly");
        assert_eq!(preview("héllo wörld", 4), "héll...");
    }

    #[test]
    fn test_quit_words() {
        assert!(is_quit("QUIT"));
        assert!(is_quit("q"));
        assert!(!is_quit("quite"));
    }

    #[test]
    fn test_live_client_needs_key() {
        let config = ApiConfig {
            api_key_env: "NIFLHEIM_BENCH_TEST_UNSET_KEY".to_string(),
            ..ApiConfig::default()
        };
        let err = chat_client(&config, true, Vec::new()).err().unwrap();
        assert!(err.to_string().contains("NIFLHEIM_BENCH_TEST_UNSET_KEY"));
        assert!(chat_client(&config, false, Vec::new()).is_ok());
    }
}
