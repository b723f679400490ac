//! @ai:module:intent Conversational Q&A bot with buffer memory
//! @ai:module:layer application
//! @ai:module:public_api qa_agent, run_qa_session, tell_story

use super::is_quit;
use crate::frameworks::{Agent, AgentSpec, LlmAgent, LlmClient, MemoryBackend};
use anyhow::Result;
use std::io::{BufRead, Write};
use std::sync::Arc;

const QA_PROMPT: &str =
    "You are a knowledgeable assistant that provides helpful, accurate answers to questions.";

const STORY_PROMPT: &str = "You are a creative storyteller.";

pub const STORY_QUESTION: &str = "Tell me a short story about a robot learning to paint";

/// @ai:intent The "QA Bot" agent
/// @ai:effects pure
pub fn qa_agent(client: Arc<dyn LlmClient>, model: &str) -> LlmAgent {
    LlmAgent::new(
        client,
        model,
        AgentSpec::new("QA Bot", QA_PROMPT).with_memory(MemoryBackend::Buffer),
    )
}

/// @ai:intent Answer questions read line by line until quit or end of input
/// @ai:post returns the number of questions answered; chat errors are printed and the session goes on
/// @ai:effects network, io
pub async fn run_qa_session<R, W>(agent: &mut dyn Agent, input: R, out: &mut W) -> Result<usize>
where
    R: BufRead,
    W: Write,
{
    writeln!(out, "Q&A Bot initialized! Ask me anything (type 'quit' to exit)")?;
    writeln!(out, "{}", "-".repeat(50))?;

    let mut answered = 0;
    let mut lines = input.lines();
    loop {
        write!(out, "\nYou: ")?;
        out.flush()?;

        let Some(line) = lines.next().transpose()? else {
            writeln!(out)?;
            break;
        };
        let question = line.trim();
        if is_quit(question) {
            writeln!(out, "Goodbye!")?;
            break;
        }
        if question.is_empty() {
            continue;
        }

        match agent.chat(question).await {
            Ok(answer) => {
                writeln!(out, "Bot: {}", answer)?;
                answered += 1;
            }
            Err(e) => writeln!(out, "Error: {}", e)?,
        }
    }
    Ok(answered)
}

/// @ai:intent Ask a fresh storyteller agent for the robot story
/// @ai:effects network, io
pub async fn tell_story<W: Write>(client: Arc<dyn LlmClient>, model: &str, out: &mut W) -> Result<()> {
    let mut agent = LlmAgent::new(client, model, AgentSpec::new("Storyteller", STORY_PROMPT));

    writeln!(out, "Story Example")?;
    writeln!(out, "{}", "-".repeat(30))?;
    writeln!(out, "Question: {}", STORY_QUESTION)?;
    let story = agent.chat(STORY_QUESTION).await?;
    writeln!(out, "Story: {}", story)?;
    writeln!(out, "\nStory complete!")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frameworks::{ChatMessage, MockLlmClient};
    use std::io::Cursor;

    #[tokio::test]
    async fn test_session_answers_until_quit() {
        let client = Arc::new(MockLlmClient::default());
        let mut agent = qa_agent(client.clone(), "m");
        let input = Cursor::new("What is Rust?\n\n   \nAnd Cargo?\nquit\nnever asked\n");
        let mut out = Vec::new();

        let answered = run_qa_session(&mut agent, input, &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(answered, 2);
        assert!(text.contains("Bot: Demo response to: What is Rust?"));
        assert!(text.contains("Goodbye!"));
        assert!(!text.contains("never asked"));
        // buffer memory replays the first exchange with the second question
        assert_eq!(client.requests()[1].len(), 4);
    }

    #[tokio::test]
    async fn test_session_ends_at_end_of_input() {
        let mut agent = qa_agent(Arc::new(MockLlmClient::default()), "m");
        let mut out = Vec::new();

        let answered = run_qa_session(&mut agent, Cursor::new("hi"), &mut out).await.unwrap();

        assert_eq!(answered, 1);
        assert!(!String::from_utf8(out).unwrap().contains("Goodbye!"));
    }

    #[tokio::test]
    async fn test_story() {
        let client = Arc::new(MockLlmClient::new(vec![ChatMessage::assistant("Once upon a time")]));
        let mut out = Vec::new();

        tell_story(client, "m", &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Story: Once upon a time"));
        assert!(text.contains(STORY_QUESTION));
    }
}
