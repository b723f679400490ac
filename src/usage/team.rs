//! @ai:module:intent Team of specialist agents that collaborate, discuss and debate
//! @ai:module:layer application
//! @ai:module:public_api Team, Turn, TeamMode, specialists
//! @ai:module:stateless false

use super::{is_quit, preview};
use crate::error::{AgentError, AgentResult};
use crate::frameworks::{AgentFramework, AgentSpec, BoxedAgent};
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt::Write as FmtWrite;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

pub const RESEARCHER: &str = "Dr. Research";
pub const CREATIVE: &str = "Alex Creative";
pub const PRAGMATIST: &str = "Sam Practical";
pub const CRITIC: &str = "Chris Critic";

pub const COLLABORATION_TASK: &str = "Our startup needs to create a mobile app that helps people reduce food waste. \
We need to brainstorm features, consider technical constraints, identify potential problems, \
and create an actionable plan for development.";

pub const DISCUSSION_TOPIC: &str = "Should companies prioritize remote work or return to office?";

pub const DEBATE_PROPOSITION: &str = "Artificial Intelligence will create more jobs than it eliminates";

/// @ai:intent The four specialist personas
/// @ai:effects pure
pub fn specialists() -> Vec<AgentSpec> {
    [
        (
            RESEARCHER,
            "You are Dr. Research, a thorough research specialist. You approach problems analytically, \
             cite evidence, and prefer data-driven solutions. You're detail-oriented and always consider \
             multiple perspectives before reaching conclusions.",
        ),
        (
            CREATIVE,
            "You are Alex Creative, an innovative creative thinker. You think outside the box, propose \
             unconventional solutions, and see possibilities others miss. You love brainstorming and \
             aren't afraid to suggest bold, imaginative ideas.",
        ),
        (
            PRAGMATIST,
            "You are Sam Practical, a results-oriented problem solver. You focus on what works in the \
             real world, consider constraints like budget and time, and prefer simple, proven solutions \
             over complex theoretical approaches.",
        ),
        (
            CRITIC,
            "You are Chris Critic, a sharp critical thinker. You identify potential problems, challenge \
             assumptions, and play devil's advocate. You help teams avoid pitfalls by pointing out \
             weaknesses in plans and ideas.",
        ),
    ]
    .into_iter()
    .map(|(name, prompt)| AgentSpec::new(name, prompt))
    .collect()
}

/// @ai:intent Which team walkthrough to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamMode {
    Collaborate,
    Discuss,
    Debate,
    Interactive,
}

impl FromStr for TeamMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "collaborate" | "collaboration" => Ok(TeamMode::Collaborate),
            "discuss" | "discussion" => Ok(TeamMode::Discuss),
            "debate" => Ok(TeamMode::Debate),
            "interactive" => Ok(TeamMode::Interactive),
            other => Err(format!(
                "unknown team mode '{}' (expected collaborate, discuss, debate or interactive)",
                other
            )),
        }
    }
}

/// @ai:intent One agent reply within a team conversation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Turn {
    pub turn_number: usize,
    pub agent_name: String,
    /// Role of the turn, e.g. "Round 1 PRO" or "Contribution"
    pub label: String,
    pub content: String,
}

struct Member {
    name: String,
    agent: BoxedAgent,
}

/// @ai:intent Named agents sharing one transcript
pub struct Team {
    members: Vec<Member>,
    transcript: Vec<Turn>,
}

impl Team {
    /// @ai:intent Build one agent per spec through the framework
    /// @ai:effects network
    pub async fn assemble(framework: &dyn AgentFramework, specs: Vec<AgentSpec>) -> AgentResult<Self> {
        let mut members = Vec::with_capacity(specs.len());
        for spec in specs {
            let name = spec.name.clone();
            let agent = framework.create_agent(spec).await?;
            members.push(Member { name, agent });
        }
        Ok(Self {
            members,
            transcript: Vec::new(),
        })
    }

    pub fn names(&self) -> Vec<&str> {
        self.members.iter().map(|m| m.name.as_str()).collect()
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    fn index_of(&self, name: &str) -> AgentResult<usize> {
        self.members
            .iter()
            .position(|m| m.name == name)
            .ok_or_else(|| AgentError::Task(format!("no team member named '{}'", name)))
    }

    /// @ai:intent Send one message to a member and record the reply
    /// @ai:effects network, state:write
    async fn ask(&mut self, index: usize, label: &str, message: &str) -> AgentResult<Turn> {
        let member = &mut self.members[index];
        let content = member.agent.chat(message).await?;
        let turn = Turn {
            turn_number: self.transcript.len() + 1,
            agent_name: member.name.clone(),
            label: label.to_string(),
            content,
        };
        self.transcript.push(turn.clone());
        Ok(turn)
    }

    /// @ai:intent Every other member contributes, then the coordinator synthesizes a plan
    /// @ai:post returns the coordinator's turn; unknown coordinators fail before any message is sent
    /// @ai:effects network, state:write
    pub async fn collaborate(&mut self, task: &str, coordinator: &str) -> AgentResult<Turn> {
        let lead = self.index_of(coordinator)?;

        let mut contributions = Vec::new();
        for index in (0..self.members.len()).filter(|i| *i != lead) {
            let message = format!(
                "Task: {}\n\nShare your perspective on this task as {}.",
                task, self.members[index].name
            );
            let turn = self.ask(index, "Contribution", &message).await?;
            contributions.push(format!("- {}: {}", turn.agent_name, turn.content));
        }

        let message = format!(
            "Task: {}\n\nTeam input:\n{}\n\nAs coordinator, combine these into one actionable plan.",
            task,
            contributions.join("\n")
        );
        self.ask(lead, "Synthesis", &message).await
    }

    /// @ai:intent Round-robin discussion; each member answers the previous turn
    /// @ai:effects network, state:write
    pub async fn discuss(&mut self, topic: &str, rounds: usize) -> AgentResult<Vec<Turn>> {
        let mut turns: Vec<Turn> = Vec::new();
        for round in 1..=rounds {
            for index in 0..self.members.len() {
                let message = match turns.last() {
                    None => topic.to_string(),
                    Some(previous) => format!(
                        "Discussion topic: {}\n\n{} said: {}\n\nRespond with your own view.",
                        topic, previous.agent_name, previous.content
                    ),
                };
                turns.push(self.ask(index, &format!("Round {}", round), &message).await?);
            }
        }
        Ok(turns)
    }

    /// @ai:intent Moderated debate: opening, PRO and CON per round, then a verdict
    /// @ai:effects network, state:write
    pub async fn debate(
        &mut self,
        proposition: &str,
        rounds: usize,
        pro: &str,
        con: &str,
        moderator: &str,
    ) -> AgentResult<Vec<Turn>> {
        let (pro, con, moderator) = (self.index_of(pro)?, self.index_of(con)?, self.index_of(moderator)?);
        let mut turns = Vec::with_capacity(2 * rounds + 2);

        let opening = format!("Open a debate on the proposition: {}", proposition);
        turns.push(self.ask(moderator, "Opening", &opening).await?);

        for round in 1..=rounds {
            let last = turns.last().map(|t: &Turn| t.content.clone()).unwrap_or_default();
            let argue = format!(
                "Proposition: {}\n\nPrevious statement: {}\n\nArgue FOR the proposition.",
                proposition, last
            );
            let for_turn = self.ask(pro, &format!("Round {} PRO", round), &argue).await?;

            let rebut = format!(
                "Proposition: {}\n\nPRO argued: {}\n\nArgue AGAINST the proposition.",
                proposition, for_turn.content
            );
            turns.push(for_turn);
            turns.push(self.ask(con, &format!("Round {} CON", round), &rebut).await?);
        }

        let closing = format!(
            "Summarize the debate on '{}' and give a balanced verdict.",
            proposition
        );
        turns.push(self.ask(moderator, "Verdict", &closing).await?);
        Ok(turns)
    }

    /// @ai:intent Total turns and the number of distinct members who spoke
    /// @ai:effects pure
    pub fn summary(&self) -> (usize, usize) {
        let speakers: BTreeSet<&str> = self.transcript.iter().map(|t| t.agent_name.as_str()).collect();
        (self.transcript.len(), speakers.len())
    }

    /// @ai:intent Markdown export of the whole transcript
    /// @ai:effects pure
    pub fn export_markdown(&self, title: &str) -> Result<String> {
        let mut md = String::new();
        writeln!(md, "# {}\n", title)?;
        writeln!(md, "Participants: {}\n", self.names().join(", "))?;
        for turn in &self.transcript {
            writeln!(md, "## Turn {}: {} ({})\n", turn.turn_number, turn.agent_name, turn.label)?;
            writeln!(md, "{}\n", turn.content)?;
        }
        Ok(md)
    }

    /// @ai:intent Write the Markdown export to output_dir/file_name
    /// @ai:effects fs:write
    pub fn save_export(&self, title: &str, output_dir: &Path, file_name: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create {}", output_dir.display()))?;
        let path = output_dir.join(file_name);
        std::fs::write(&path, self.export_markdown(title)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), "Conversation exported");
        Ok(path)
    }
}

/// @ai:intent Run one team walkthrough, printing to out and exporting transcripts to output_dir
/// @ai:effects network, io, fs:write
pub async fn run_team<R, W>(team: &mut Team, mode: TeamMode, input: R, out: &mut W, output_dir: &Path) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    match mode {
        TeamMode::Collaborate => {
            writeln!(out, "Multi-Agent Collaboration Demo")?;
            writeln!(out, "{}", "=".repeat(50))?;
            writeln!(out, "Task: {}", COLLABORATION_TASK)?;
            let result = team.collaborate(COLLABORATION_TASK, RESEARCHER).await?;
            writeln!(out, "\nFinal Collaborative Result:")?;
            writeln!(out, "Coordinator: {}", result.agent_name)?;
            writeln!(out, "Response: {}", result.content)?;
            let (turns, agents) = team.summary();
            writeln!(out, "\nCollaboration Stats:")?;
            writeln!(out, "Total interactions: {}", turns)?;
            writeln!(out, "Agents participated: {}", agents)?;
        }
        TeamMode::Discuss => {
            writeln!(out, "Multi-Agent Discussion Demo")?;
            writeln!(out, "{}", "=".repeat(50))?;
            writeln!(out, "Discussion Topic: {}", DISCUSSION_TOPIC)?;
            let turns = team.discuss(DISCUSSION_TOPIC, 2).await?;
            writeln!(out, "\nDiscussion Summary:")?;
            for turn in &turns {
                writeln!(out, "\n{} (Turn {}):", turn.agent_name, turn.turn_number)?;
                writeln!(out, "  {}", preview(&turn.content, 200))?;
            }
            let path = team.save_export(DISCUSSION_TOPIC, output_dir, "discussion_export.md")?;
            writeln!(out, "\nFull conversation exported to {}", path.display())?;
        }
        TeamMode::Debate => {
            writeln!(out, "Structured Debate Demo")?;
            writeln!(out, "{}", "=".repeat(50))?;
            writeln!(out, "Debate Proposition: {}", DEBATE_PROPOSITION)?;
            writeln!(out, "PRO: {}", CREATIVE)?;
            writeln!(out, "CON: {}", CRITIC)?;
            writeln!(out, "Moderator: {}", RESEARCHER)?;
            let turns = team.debate(DEBATE_PROPOSITION, 2, CREATIVE, CRITIC, RESEARCHER).await?;
            writeln!(out, "\nDebate Summary:")?;
            for turn in &turns {
                writeln!(out, "\n{} - {}:", turn.label, turn.agent_name)?;
                writeln!(out, "  {}", preview(&turn.content, 300))?;
            }
            let path = team.save_export(DEBATE_PROPOSITION, output_dir, "debate_export.md")?;
            writeln!(out, "\nFull debate exported to {}", path.display())?;
        }
        TeamMode::Interactive => {
            writeln!(out, "Interactive Multi-Agent Session")?;
            writeln!(out, "{}", "=".repeat(50))?;
            writeln!(out, "Meet your team of specialists: {}", team.names().join(", "))?;
            writeln!(out, "Type 'quit' to exit.")?;
            for line in input.lines() {
                let line = line?;
                let question = line.trim();
                if is_quit(question) {
                    writeln!(out, "Session ended!")?;
                    break;
                }
                if question.is_empty() {
                    continue;
                }
                match team.collaborate(&format!("User question: {}", question), RESEARCHER).await {
                    Ok(result) => writeln!(out, "\nTeam Response:\n{}", result.content)?,
                    Err(e) => writeln!(out, "Error: {}", e)?,
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::frameworks::{LiveFramework, MockLlmClient};
    use pretty_assertions::assert_eq;
    use std::io::Cursor;
    use std::sync::Arc;
    use tempfile::TempDir;

    async fn team() -> (Team, Arc<MockLlmClient>) {
        let client = Arc::new(MockLlmClient::default());
        let framework = LiveFramework::with_client(ApiConfig::default(), client.clone());
        (Team::assemble(&framework, specialists()).await.unwrap(), client)
    }

    #[test]
    fn test_team_mode_parsing() {
        assert_eq!("Debate".parse::<TeamMode>().unwrap(), TeamMode::Debate);
        assert_eq!("discussion".parse::<TeamMode>().unwrap(), TeamMode::Discuss);
        assert!("vote".parse::<TeamMode>().is_err());
    }

    #[tokio::test]
    async fn test_collaboration_ends_with_coordinator() {
        let (mut team, client) = team().await;

        let result = team.collaborate("Plan a launch", RESEARCHER).await.unwrap();

        assert_eq!(result.agent_name, RESEARCHER);
        assert_eq!(result.label, "Synthesis");
        assert_eq!(team.summary(), (4, 4));
        let names: Vec<&str> = team.transcript().iter().map(|t| t.agent_name.as_str()).collect();
        assert_eq!(names, vec![CREATIVE, PRAGMATIST, CRITIC, RESEARCHER]);

        let synthesis_prompt = client.requests()[3].last().and_then(|m| m.content.clone()).unwrap();
        assert!(synthesis_prompt.contains("- Chris Critic: Demo response to:"));
    }

    #[tokio::test]
    async fn test_unknown_coordinator_sends_nothing() {
        let (mut team, client) = team().await;

        let err = team.collaborate("task", "Nobody").await.unwrap_err();

        assert!(matches!(err, AgentError::Task(_)));
        assert!(client.requests().is_empty());
    }

    #[tokio::test]
    async fn test_discussion_rounds() {
        let (mut team, _) = team().await;

        let turns = team.discuss("Tabs or spaces?", 2).await.unwrap();

        assert_eq!(turns.len(), 8);
        assert_eq!(turns[0].content, "Demo response to: Tabs or spaces?");
        assert!(turns[1].content.contains("Dr. Research said:"));
        assert_eq!(turns[7].label, "Round 2");
        assert_eq!(turns[7].turn_number, 8);
    }

    #[tokio::test]
    async fn test_debate_structure_and_export() {
        let temp = TempDir::new().unwrap();
        let (mut team, _) = team().await;

        let turns = team.debate("Rust is fun", 2, CREATIVE, CRITIC, RESEARCHER).await.unwrap();

        let labels: Vec<&str> = turns.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Opening", "Round 1 PRO", "Round 1 CON", "Round 2 PRO", "Round 2 CON", "Verdict"]
        );
        assert_eq!(turns[1].agent_name, CREATIVE);
        assert_eq!(turns[2].agent_name, CRITIC);
        assert_eq!(team.summary(), (6, 3));

        let path = team.save_export("Rust is fun", temp.path(), "debate_export.md").unwrap();
        let md = std::fs::read_to_string(path).unwrap();
        assert!(md.starts_with("# Rust is fun\n"));
        assert!(md.contains("## Turn 6: Dr. Research (Verdict)"));
    }

    #[tokio::test]
    async fn test_interactive_mode_answers_each_question() {
        let temp = TempDir::new().unwrap();
        let (mut team, _) = team().await;
        let mut out = Vec::new();

        run_team(&mut team, TeamMode::Interactive, Cursor::new("Why Rust?\n\nq\nignored\n"), &mut out, temp.path())
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("Team Response:").count(), 1);
        assert!(text.contains("Session ended!"));
        assert_eq!(team.summary(), (4, 4));
    }
}
