//! Session loop
//!
//! A [`Session`] owns one conversation history, one tool registry and one
//! provider handle. It pulls external inputs one at a time and, for each,
//! drives the model until it produces a reply without a tool call.
//!
//! Per input:
//! - in reasoning mode, run the reasoning pass and record the trace
//! - append the input as a user message
//! - ask the model; dispatch tool calls and ask again until a plain reply
//! - stop early on a provider failure or when the tool-call budget is spent
//!
//! Nothing in a turn terminates the session. Only exhaustion of the input
//! source ends [`Session::run`].

use super::conversation::Conversation;
use super::dispatcher::{DispatchOutcome, Dispatcher};
use super::input::{InputSource, SessionStatus};
use super::protocol::{format_tool_error, parse_tool_call};
use super::reasoning::{self, TRACE_MESSAGE_PREFIX};
use crate::agent_mode::AgentMode;
use crate::config::AgentConfig;
use crate::console::Console;
use crate::error::{Result, ThinkloopError};
use crate::providers::Provider;
use crate::tools::{ToolDescriptor, ToolRegistry};
use chrono::Local;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// How one external input ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The model produced a reply without a tool call
    Answered(String),
    /// A model call failed; the turn was abandoned
    ProviderFailed(String),
    /// The model kept calling tools past the per-input budget
    ForcedStop {
        /// Budget that was exhausted
        limit: usize,
    },
    /// The reasoning pass failed; the input was skipped
    ReasoningFailed(String),
}

/// A conversational agent session
pub struct Session {
    provider: Arc<dyn Provider>,
    conversation: Conversation,
    registry: ToolRegistry,
    descriptors: Vec<ToolDescriptor>,
    config: AgentConfig,
    mode: AgentMode,
    console: Arc<dyn Console>,
}

impl Session {
    /// Create a session with an empty history
    ///
    /// # Errors
    ///
    /// Returns `ThinkloopError::Config` if the tool-call budget is zero or
    /// the agent mode is unknown.
    pub fn new(
        provider: Arc<dyn Provider>,
        registry: ToolRegistry,
        config: AgentConfig,
        console: Arc<dyn Console>,
    ) -> Result<Self> {
        if config.max_tool_iterations == 0 {
            return Err(ThinkloopError::Config(
                "max_tool_iterations must be greater than 0".to_string(),
            )
            .into());
        }
        let mode = config.agent_mode()?;
        let descriptors = registry.descriptors();

        info!(
            "Session ready: provider={}, mode={}, tools={}",
            provider.name(),
            mode,
            registry.len()
        );

        Ok(Self {
            provider,
            conversation: Conversation::new(),
            registry,
            descriptors,
            config,
            mode,
            console,
        })
    }

    /// Create a session from a boxed provider
    ///
    /// # Errors
    ///
    /// Same as [`Session::new`].
    pub fn new_boxed(
        provider: Box<dyn Provider>,
        registry: ToolRegistry,
        config: AgentConfig,
        console: Arc<dyn Console>,
    ) -> Result<Self> {
        Self::new(Arc::from(provider), registry, config, console)
    }

    /// Process inputs until `input` is exhausted
    ///
    /// Turn failures are reported on the console and never end the loop.
    pub async fn run(&mut self, input: &mut dyn InputSource) -> Result<()> {
        loop {
            input.observe(&self.status());
            let text = match input.next_input() {
                Some(text) => text,
                None => break,
            };
            if let Some(mode) = input.take_mode_switch() {
                self.set_mode(mode);
            }
            let outcome = self.process_input(&text).await;
            debug!("Turn finished: {:?}", outcome);
        }
        info!(
            "Input exhausted; session ends with {} messages",
            self.conversation.len()
        );
        Ok(())
    }

    /// Handle one external input
    pub async fn process_input(&mut self, input: &str) -> TurnOutcome {
        info!("Processing input ({} bytes)", input.len());

        if self.mode == AgentMode::Reasoning {
            if let Err(message) = self.reasoning_pass(input).await {
                return TurnOutcome::ReasoningFailed(message);
            }
        }

        self.conversation.add_user_message(input);

        let limit = self.config.max_tool_iterations;
        let mut dispatched = 0usize;

        loop {
            self.console.print_processing();
            let reply = match self
                .provider
                .generate_response(self.conversation.messages(), &self.descriptors)
                .await
            {
                Ok(reply) => reply,
                Err(e) => {
                    let message = e.to_string();
                    warn!("Model call failed: {}", message);
                    self.console.print_error(&message);
                    return TurnOutcome::ProviderFailed(message);
                }
            };

            let Some(call) = parse_tool_call(&reply) else {
                self.conversation.add_assistant_message(reply.clone());
                self.console.print_answer(&reply);
                return TurnOutcome::Answered(reply);
            };

            if dispatched >= limit {
                warn!(
                    "Tool-call budget of {} exhausted; stopping at {}",
                    limit, call.tool_name
                );
                let notice = format!(
                    "Tool-call limit of {} reached for this request. Tool '{}' was not executed.",
                    limit, call.tool_name
                );
                self.conversation.add_assistant_message(reply);
                self.conversation
                    .add_user_message(format_tool_error(&notice));
                self.console.print_warning(&notice);
                return TurnOutcome::ForcedStop { limit };
            }

            let dispatcher = Dispatcher::new(
                &self.registry,
                self.console.as_ref(),
                self.config.tools.max_output_size,
            );
            let outcome = dispatcher
                .dispatch(&reply, &call, &mut self.conversation)
                .await;
            dispatched += 1;

            if outcome == DispatchOutcome::ToolMissing {
                debug!("Letting the model retry after unknown tool {}", call.tool_name);
            }
        }
    }

    async fn reasoning_pass(&mut self, input: &str) -> std::result::Result<(), String> {
        let trace = match reasoning::extract_trace(
            self.provider.as_ref(),
            input,
            self.conversation.messages(),
            &self.descriptors,
        )
        .await
        {
            Ok(trace) => trace,
            Err(e) => {
                let message = format!("Reasoning failed: {}", e);
                warn!("{}", message);
                self.console.print_error(&message);
                return Err(message);
            }
        };

        if trace.is_empty() {
            return Ok(());
        }

        let rendered =
            reasoning::format_trace_for_display(&trace, &self.config.reasoning, Local::now());
        self.console.print_reasoning(&rendered);

        if self.config.reasoning.inject_into_history {
            self.conversation
                .add_system_message(format!("{}{}", TRACE_MESSAGE_PREFIX, trace));
        }
        Ok(())
    }

    /// Conversation history so far
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Registered tools
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Active agent mode
    pub fn mode(&self) -> AgentMode {
        self.mode
    }

    /// Switch mode; applies from the next input on
    pub fn set_mode(&mut self, mode: AgentMode) {
        if self.mode != mode {
            info!("Switching agent mode: {} -> {}", self.mode, mode);
            self.mode = mode;
        }
    }

    /// Name of the backing provider
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Per-input tool-call budget
    pub fn max_tool_iterations(&self) -> usize {
        self.config.max_tool_iterations
    }

    /// Snapshot for status displays and input sources
    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            mode: self.mode,
            provider: self.provider_name().to_string(),
            tool_count: self.registry.len(),
            max_tool_iterations: self.config.max_tool_iterations,
            message_count: self.conversation.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::input::ScriptedInput;
    use crate::providers::{Message, Role};
    use crate::test_utils::{RecordingConsole, ScriptedProvider};
    use crate::tools::{Capability, ToolError, ToolExecutor};
    use async_trait::async_trait;

    struct Echo;

    #[async_trait]
    impl ToolExecutor for Echo {
        async fn execute(&self, raw_args: &str) -> std::result::Result<String, ToolError> {
            Ok(format!("echo {}", raw_args))
        }
    }

    fn registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry
            .register("echo", "Echoes its arguments", Capability::Custom(Arc::new(Echo)))
            .unwrap();
        registry
    }

    fn session_with(
        provider: Arc<ScriptedProvider>,
        config: AgentConfig,
    ) -> (Session, Arc<RecordingConsole>) {
        let console = Arc::new(RecordingConsole::new());
        let session = Session::new(provider, registry(), config, console.clone()).unwrap();
        (session, console)
    }

    #[test]
    fn test_zero_budget_is_rejected() {
        let config = AgentConfig {
            max_tool_iterations: 0,
            ..AgentConfig::default()
        };
        let result = Session::new(
            Arc::new(ScriptedProvider::default()),
            registry(),
            config,
            Arc::new(RecordingConsole::new()),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let config = AgentConfig {
            mode: "dreaming".to_string(),
            ..AgentConfig::default()
        };
        let result = Session::new(
            Arc::new(ScriptedProvider::default()),
            registry(),
            config,
            Arc::new(RecordingConsole::new()),
        );
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_plain_reply_is_final_answer() {
        let provider = Arc::new(ScriptedProvider::new(["Hello there"]));
        let (mut session, console) = session_with(provider.clone(), AgentConfig::default());

        let outcome = session.process_input("hi").await;

        assert_eq!(outcome, TurnOutcome::Answered("Hello there".to_string()));
        assert_eq!(
            session.conversation().messages(),
            &[Message::user("hi"), Message::assistant("Hello there")]
        );
        assert_eq!(console.texts("answer"), vec!["Hello there".to_string()]);
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_tool_call_then_answer() {
        let provider = Arc::new(ScriptedProvider::new([
            "TOOL_CALL: echo({\"x\": 1})",
            "Done.",
        ]));
        let (mut session, _console) = session_with(provider.clone(), AgentConfig::default());

        let outcome = session.process_input("go").await;

        assert_eq!(outcome, TurnOutcome::Answered("Done.".to_string()));
        let messages = session.conversation().messages();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[1], Message::assistant("TOOL_CALL: echo({\"x\": 1})"));
        assert_eq!(messages[2], Message::user("TOOL_RESULT: echo {\"x\": 1}"));
        assert_eq!(messages[3], Message::assistant("Done."));

        let second_request = &provider.requests()[1];
        assert_eq!(second_request.len(), 3);
    }

    #[tokio::test]
    async fn test_unknown_tool_continues_cycle() {
        let provider = Arc::new(ScriptedProvider::new(["TOOL_CALL: ghost({})", "Sorry."]));
        let (mut session, _console) = session_with(provider, AgentConfig::default());

        let outcome = session.process_input("go").await;

        assert_eq!(outcome, TurnOutcome::Answered("Sorry.".to_string()));
        assert_eq!(
            session.conversation().messages()[2],
            Message::user("TOOL_ERROR: Tool 'ghost' not found.")
        );
    }

    #[tokio::test]
    async fn test_provider_failure_abandons_turn_only() {
        let provider = Arc::new(ScriptedProvider::with_results(vec![
            Err("connection refused".to_string()),
            Ok("Back online".to_string()),
        ]));
        let (mut session, console) = session_with(provider, AgentConfig::default());
        let mut input = ScriptedInput::new(["first", "second"]);

        session.run(&mut input).await.unwrap();

        assert_eq!(console.texts("error").len(), 1);
        assert!(console.texts("error")[0].contains("connection refused"));
        assert_eq!(
            session.conversation().messages(),
            &[
                Message::user("first"),
                Message::user("second"),
                Message::assistant("Back online"),
            ]
        );
    }

    /// Yields two inputs and asks for reasoning mode with the second
    #[derive(Default)]
    struct SwitchingInput {
        seen: Vec<SessionStatus>,
        served: usize,
    }

    impl InputSource for SwitchingInput {
        fn next_input(&mut self) -> Option<String> {
            self.served += 1;
            match self.served {
                1 => Some("first".to_string()),
                2 => Some("second".to_string()),
                _ => None,
            }
        }

        fn observe(&mut self, status: &SessionStatus) {
            self.seen.push(status.clone());
        }

        fn take_mode_switch(&mut self) -> Option<AgentMode> {
            (self.served == 2).then_some(AgentMode::Reasoning)
        }
    }

    #[tokio::test]
    async fn test_run_applies_mode_switch_from_input_source() {
        let provider = Arc::new(ScriptedProvider::new([
            "one",
            "<think>plan</think>",
            "two",
        ]));
        let (mut session, _console) = session_with(provider.clone(), AgentConfig::default());
        let mut input = SwitchingInput::default();

        session.run(&mut input).await.unwrap();

        assert_eq!(session.mode(), AgentMode::Reasoning);
        assert_eq!(provider.call_count(), 3);
        let modes: Vec<AgentMode> = input.seen.iter().map(|s| s.mode).collect();
        assert_eq!(
            modes,
            vec![AgentMode::Standard, AgentMode::Standard, AgentMode::Reasoning]
        );
        assert_eq!(input.seen[0].message_count, 0);
        assert_eq!(input.seen[1].message_count, 2);
        assert_eq!(input.seen[0].tool_count, 1);
        assert_eq!(input.seen[0].provider, "scripted");
    }

    #[tokio::test]
    async fn test_budget_forces_stop() {
        let provider = Arc::new(ScriptedProvider::new([
            "TOOL_CALL: echo({})",
            "TOOL_CALL: echo({})",
            "TOOL_CALL: echo({})",
        ]));
        let config = AgentConfig {
            max_tool_iterations: 2,
            ..AgentConfig::default()
        };
        let (mut session, console) = session_with(provider.clone(), config);

        let outcome = session.process_input("loop forever").await;

        assert_eq!(outcome, TurnOutcome::ForcedStop { limit: 2 });
        assert_eq!(provider.call_count(), 3);
        let last = session.conversation().last().unwrap();
        assert_eq!(last.role, Role::User);
        assert!(last.content.starts_with("TOOL_ERROR: Tool-call limit of 2 reached"));
        assert_eq!(console.texts("warning").len(), 1);
        assert_eq!(console.texts("tool_result").len(), 2);
    }

    #[tokio::test]
    async fn test_exhausted_input_appends_nothing() {
        let provider = Arc::new(ScriptedProvider::default());
        let (mut session, _console) = session_with(provider.clone(), AgentConfig::default());

        session.run(&mut ScriptedInput::default()).await.unwrap();

        assert!(session.conversation().is_empty());
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_reasoning_mode_records_trace_before_input() {
        let provider = Arc::new(ScriptedProvider::new([
            "<think>OBJECTIVE: greet</think>",
            "Hello!",
        ]));
        let mut config = AgentConfig {
            mode: "reasoning".to_string(),
            ..AgentConfig::default()
        };
        config.reasoning.show_timestamp = false;
        config.reasoning.highlight_sections = false;
        let (mut session, console) = session_with(provider.clone(), config);

        let outcome = session.process_input("hi").await;

        assert_eq!(outcome, TurnOutcome::Answered("Hello!".to_string()));
        assert_eq!(
            session.conversation().messages(),
            &[
                Message::system("Reasoning for solution:\nOBJECTIVE: greet"),
                Message::user("hi"),
                Message::assistant("Hello!"),
            ]
        );
        assert_eq!(console.texts("reasoning"), vec!["OBJECTIVE: greet".to_string()]);

        let reasoning_request = &provider.requests()[0];
        assert_eq!(reasoning_request.last(), Some(&Message::user("hi")));
        assert_eq!(reasoning_request[0].role, Role::System);
    }

    #[tokio::test]
    async fn test_reasoning_trace_not_injected_when_disabled() {
        let provider = Arc::new(ScriptedProvider::new(["<think>plan</think>", "ok"]));
        let mut config = AgentConfig {
            mode: "reasoning".to_string(),
            ..AgentConfig::default()
        };
        config.reasoning.inject_into_history = false;
        let (mut session, console) = session_with(provider, config);

        session.process_input("hi").await;

        assert_eq!(session.conversation().count_role(Role::System), 0);
        assert_eq!(console.texts("reasoning").len(), 1);
    }

    #[tokio::test]
    async fn test_reasoning_failure_skips_input() {
        let provider = Arc::new(ScriptedProvider::with_results(vec![Err(
            "timeout".to_string(),
        )]));
        let config = AgentConfig {
            mode: "reasoning".to_string(),
            ..AgentConfig::default()
        };
        let (mut session, console) = session_with(provider, config);

        let outcome = session.process_input("hi").await;

        assert!(matches!(outcome, TurnOutcome::ReasoningFailed(ref m) if m.contains("timeout")));
        assert!(session.conversation().is_empty());
        assert_eq!(console.texts("error").len(), 1);
    }

    #[tokio::test]
    async fn test_switching_to_reasoning_adds_pass() {
        let provider = Arc::new(ScriptedProvider::new(["first", "<think>t</think>", "second"]));
        let (mut session, _console) = session_with(provider.clone(), AgentConfig::default());

        session.process_input("a").await;
        session.set_mode(AgentMode::Reasoning);
        let outcome = session.process_input("b").await;

        assert_eq!(outcome, TurnOutcome::Answered("second".to_string()));
        assert_eq!(provider.call_count(), 3);
        assert_eq!(session.conversation().count_role(Role::System), 1);
    }

    #[test]
    fn test_accessors() {
        let (session, _console) =
            session_with(Arc::new(ScriptedProvider::default()), AgentConfig::default());
        assert_eq!(session.mode(), AgentMode::Standard);
        assert_eq!(session.provider_name(), "scripted");
        assert_eq!(session.registry().len(), 1);
        assert_eq!(session.max_tool_iterations(), 25);
    }
}
