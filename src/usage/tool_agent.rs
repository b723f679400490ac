//! @ai:module:intent Tool assistant with calculator, weather, search, notes and clock tools
//! @ai:module:layer application
//! @ai:module:public_api tool_assistant, run_tool_demo, run_tool_session, offline_tool_script

use super::is_quit;
use crate::frameworks::client::{ChatMessage, FunctionCall, ToolCall};
use crate::frameworks::{calculator, Agent, AgentSpec, LlmAgent, LlmClient, MemoryBackend, Tool};
use anyhow::Result;
use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::json;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const TOOL_PROMPT: &str = "You are a helpful assistant with access to various tools. \
You can help with calculations, weather information, web searches, note-taking, and time queries. \
Always use the appropriate tool when the user asks for something you have a tool for.";

const WEATHER_CONDITIONS: [&str; 5] = ["sunny", "cloudy", "rainy", "snowy", "foggy"];

/// Demo prompts, with the tool and input the offline backend answers each one with
pub const DEMO_PROMPTS: [(&str, &str, &str); 7] = [
    ("What's 25 * 4 + 15?", "calc", "25 * 4 + 15"),
    ("What's the weather like in Tokyo?", "weather", "Tokyo"),
    ("Search for information about machine learning", "search", "machine learning"),
    (
        "Save a note titled 'Meeting Ideas' with content 'Discuss project timeline and budget allocation'",
        "note",
        "Meeting Ideas | Discuss project timeline and budget allocation",
    ),
    ("What time is it?", "time", ""),
    (
        "Can you calculate the area of a circle with radius 5? Use 3.14159 for pi.",
        "calc",
        "3.14159 * 5 * 5",
    ),
    ("Search for recent news about artificial intelligence", "search", "artificial intelligence"),
];

/// @ai:intent Mock weather report for a city
/// @ai:effects random, time
pub fn weather_tool() -> Tool {
    Tool::new("weather", "Get weather information for a city", |city| {
        let mut rng = rand::thread_rng();
        json!({
            "city": city.trim(),
            "temperature": rng.gen_range(-10..=35),
            "condition": WEATHER_CONDITIONS.choose(&mut rng).copied().unwrap_or("sunny"),
            "humidity": rng.gen_range(30..=90),
            "wind_speed": rng.gen_range(0..=30),
            "timestamp": chrono::Local::now().to_rfc3339(),
        })
        .to_string()
    })
}

/// @ai:intent Mock web search returning three canned results
/// @ai:effects pure
pub fn search_tool() -> Tool {
    Tool::new("search", "Search the web for information", |query| {
        let query = query.trim();
        let results = vec![
            json!({
                "title": format!("Result about {} - Article 1", query),
                "url": format!("https://example.com/article1?q={}", query),
                "snippet": format!("This is a comprehensive article about {} with detailed information...", query),
            }),
            json!({
                "title": format!("{} - Wikipedia", query),
                "url": format!("https://en.wikipedia.org/wiki/{}", query.replace(' ', "_")),
                "snippet": format!("Wikipedia article providing encyclopedic information about {}...", query),
            }),
            json!({
                "title": format!("Latest news about {}", query),
                "url": format!("https://news.example.com/{}", query),
                "snippet": format!("Breaking news and updates related to {}...", query),
            }),
        ];
        json!({
            "query": query,
            "total_found": results.len(),
            "results": results,
            "search_time": 0.1,
        })
        .to_string()
    })
}

/// @ai:intent File name a note title is saved under
/// @ai:effects pure
pub fn note_file_name(title: &str) -> String {
    format!("note_{}.txt", title.replace(' ', "_").to_lowercase())
}

/// @ai:intent Save "title | content" notes as text files in notes_dir
/// @ai:post write failures are reported in the tool output, not raised
/// @ai:effects fs:write, time
pub fn note_tool(notes_dir: PathBuf) -> Tool {
    Tool::new("note", "Save a note with title and content (input: title | content)", move |input| {
        let (title, content) = input.split_once('|').unwrap_or((input, ""));
        let (title, content) = (title.trim(), content.trim());
        let name = note_file_name(title);
        let body = format!(
            "Title: {}\nCreated: {}\nContent:\n{}",
            title,
            chrono::Local::now().to_rfc3339(),
            content
        );

        match std::fs::create_dir_all(&notes_dir).and_then(|_| std::fs::write(notes_dir.join(&name), body)) {
            Ok(()) => format!("Note saved successfully as {}", name),
            Err(e) => format!("Failed to save note: {}", e),
        }
    })
}

/// @ai:intent Current local date and time
/// @ai:effects time
pub fn time_tool() -> Tool {
    Tool::new("time", "Get current date and time", |_| {
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
    })
}

/// @ai:intent The "Tool Assistant" agent with all five tools
/// @ai:effects pure
pub fn tool_assistant(client: Arc<dyn LlmClient>, model: &str, notes_dir: &Path) -> LlmAgent {
    let spec = AgentSpec::new("Tool Assistant", TOOL_PROMPT)
        .with_memory(MemoryBackend::Buffer)
        .with_tool(calculator())
        .with_tool(weather_tool())
        .with_tool(search_tool())
        .with_tool(note_tool(notes_dir.to_path_buf()))
        .with_tool(time_tool());
    LlmAgent::new(client, model, spec)
}

/// @ai:intent Scripted replies that make the offline backend call each demo tool
/// @ai:effects pure
pub fn offline_tool_script() -> Vec<ChatMessage> {
    let mut script = Vec::new();
    for (i, (_, tool, input)) in DEMO_PROMPTS.iter().enumerate() {
        script.push(ChatMessage {
            role: "assistant".to_string(),
            content: None,
            tool_calls: Some(vec![ToolCall {
                id: format!("call_{}", i + 1),
                call_type: "function".to_string(),
                function: FunctionCall {
                    name: tool.to_string(),
                    arguments: json!({ "input": input }).to_string(),
                },
            }]),
            tool_call_id: None,
        });
        script.push(ChatMessage::assistant(format!("Offline answer from the {} tool", tool)));
    }
    script
}

fn write_tools<W: Write>(agent: &LlmAgent, out: &mut W) -> Result<()> {
    for name in agent.tools().names() {
        let description = agent.tools().get(&name).map_or("", |t| t.description.as_str());
        writeln!(out, "  - {}: {}", name, description)?;
    }
    Ok(())
}

/// @ai:intent Run every demo prompt, printing answers and the tools each one used
/// @ai:post returns the number of prompts answered without error
/// @ai:effects network, io
pub async fn run_tool_demo<W: Write>(agent: &mut LlmAgent, out: &mut W) -> Result<usize> {
    writeln!(out, "Tool-Using Agent Demo")?;
    writeln!(out, "{}", "=".repeat(40))?;
    writeln!(out, "\nAvailable tools: {}", agent.tools().names().join(", "))?;
    writeln!(out, "{}", "-".repeat(40))?;

    let mut answered = 0;
    for (i, (prompt, _, _)) in DEMO_PROMPTS.iter().enumerate() {
        writeln!(out, "\nExample {}: {}", i + 1, prompt)?;
        match agent.chat(prompt).await {
            Ok(answer) => {
                writeln!(out, "Assistant: {}", answer)?;
                if !agent.last_tool_calls().is_empty() {
                    writeln!(out, "   Used tools: {}", agent.last_tool_calls().join(", "))?;
                }
                answered += 1;
            }
            Err(e) => writeln!(out, "Error: {}", e)?,
        }
        writeln!(out, "{}", "-".repeat(40))?;
    }
    Ok(answered)
}

/// @ai:intent Interactive tool session; "tools" lists the tools again
/// @ai:post returns the number of messages answered
/// @ai:effects network, io
pub async fn run_tool_session<R, W>(agent: &mut LlmAgent, input: R, out: &mut W) -> Result<usize>
where
    R: BufRead,
    W: Write,
{
    writeln!(out, "Interactive Tool Assistant")?;
    writeln!(out, "{}", "=".repeat(40))?;
    writeln!(out, "\nI have access to these tools:")?;
    write_tools(agent, out)?;
    writeln!(out, "\nType 'quit' to exit, 'tools' to see available tools again.")?;
    writeln!(out, "{}", "-".repeat(40))?;

    let mut answered = 0;
    let mut lines = input.lines();
    loop {
        write!(out, "\nYou: ")?;
        out.flush()?;

        let Some(line) = lines.next().transpose()? else {
            writeln!(out)?;
            break;
        };
        let message = line.trim();
        if is_quit(message) {
            writeln!(out, "Goodbye!")?;
            break;
        }
        if message.eq_ignore_ascii_case("tools") {
            writeln!(out, "\nAvailable tools:")?;
            write_tools(agent, out)?;
            continue;
        }
        if message.is_empty() {
            continue;
        }

        match agent.chat(message).await {
            Ok(answer) => {
                writeln!(out, "Assistant: {}", answer)?;
                if !agent.last_tool_calls().is_empty() {
                    writeln!(out, "   Tools used: {}", agent.last_tool_calls().join(", "))?;
                }
                answered += 1;
            }
            Err(e) => writeln!(out, "Error: {}", e)?,
        }
    }
    Ok(answered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frameworks::MockLlmClient;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn test_search_and_weather_output() {
        let results: serde_json::Value = serde_json::from_str(&search_tool().call("rust lang")).unwrap();
        assert_eq!(results["total_found"], 3);
        assert_eq!(results["results"][1]["url"], "https://en.wikipedia.org/wiki/rust_lang");

        let weather: serde_json::Value = serde_json::from_str(&weather_tool().call(" Oslo ")).unwrap();
        assert_eq!(weather["city"], "Oslo");
        let temperature = weather["temperature"].as_i64().unwrap();
        assert!((-10..=35).contains(&temperature));
        assert!(WEATHER_CONDITIONS.contains(&weather["condition"].as_str().unwrap()));
    }

    #[test]
    fn test_note_tool_writes_file() {
        let temp = TempDir::new().unwrap();
        let note = note_tool(temp.path().to_path_buf());

        let reply = note.call("Meeting Ideas | Discuss budget");

        assert_eq!(reply, "Note saved successfully as note_meeting_ideas.txt");
        let saved = std::fs::read_to_string(temp.path().join("note_meeting_ideas.txt")).unwrap();
        assert!(saved.starts_with("Title: Meeting Ideas\nCreated: "));
        assert!(saved.ends_with("Content:\nDiscuss budget"));
    }

    #[tokio::test]
    async fn test_offline_demo_uses_every_tool() {
        let temp = TempDir::new().unwrap();
        let client = Arc::new(MockLlmClient::new(offline_tool_script()));
        let mut agent = tool_assistant(client.clone(), "m", temp.path());
        let mut out = Vec::new();

        let answered = run_tool_demo(&mut agent, &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(answered, DEMO_PROMPTS.len());
        assert!(text.contains("Available tools: calc, weather, search, note, time"));
        assert!(text.contains("Assistant: Offline answer from the calc tool\n   Used tools: calc"));
        assert!(temp.path().join("note_meeting_ideas.txt").exists());

        // the calculator result travels back to the model as a tool message
        let tool_reply = client.requests()[1].last().cloned().unwrap();
        assert_eq!(tool_reply.role, "tool");
        assert_eq!(tool_reply.content.as_deref(), Some("115"));
    }

    #[tokio::test]
    async fn test_interactive_session_lists_tools() {
        let temp = TempDir::new().unwrap();
        let mut agent = tool_assistant(Arc::new(MockLlmClient::default()), "m", temp.path());
        let input = Cursor::new("tools\nhello\nexit\n");
        let mut out = Vec::new();

        let answered = run_tool_session(&mut agent, input, &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(answered, 1);
        assert_eq!(text.matches("  - time: Get current date and time").count(), 2);
        assert!(text.contains("Assistant: Demo response to: hello"));
        assert!(!text.contains("Tools used"));
    }
}
