//! Tool-call text protocol
//!
//! A model asks for a tool by replying with
//! `TOOL_CALL: ToolName({"arg": "value"})`. Outcomes are returned to it as
//! user messages prefixed with [`TOOL_RESULT_PREFIX`] or [`TOOL_ERROR_PREFIX`].
//!
//! The parser is a hand-written scanner:
//! 1. find a `TOOL_CALL:` token,
//! 2. skip whitespace and read an identifier of `[A-Za-z0-9_]+`,
//! 3. require `(` immediately after the identifier,
//! 4. capture everything up to the last `)` in the rest of the reply.
//!
//! A token where steps 2 to 4 fail is skipped and the next one is tried, so
//! the first complete call wins. Step 4 is greedy, so text after the call that itself contains `)` is
//! captured too. The payload is not validated as JSON here; tools do that.

/// Token that introduces a tool call
pub const TOOL_CALL_TOKEN: &str = "TOOL_CALL:";

/// Prefix of a user message carrying a successful tool result
pub const TOOL_RESULT_PREFIX: &str = "TOOL_RESULT: ";

/// Prefix of a user message carrying a tool failure
pub const TOOL_ERROR_PREFIX: &str = "TOOL_ERROR: ";

/// Tool invocation extracted from a model reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCallExpression {
    /// Identifier between the token and `(`
    pub tool_name: String,
    /// Raw text between `(` and the last `)`
    pub argument_payload: String,
}

/// Extract a tool call from `reply`
///
/// Returns `None` when the reply is a plain answer: no token is followed by
/// an identifier, an immediate `(` and a later `)`.
///
/// # Examples
///
/// ```
/// use thinkloop::agent::protocol::parse_tool_call;
///
/// let call = parse_tool_call(r#"TOOL_CALL: read_file({"path": "a.txt"})"#).unwrap();
/// assert_eq!(call.tool_name, "read_file");
/// assert_eq!(call.argument_payload, r#"{"path": "a.txt"}"#);
///
/// assert!(parse_tool_call("The answer is 42.").is_none());
/// ```
pub fn parse_tool_call(reply: &str) -> Option<ToolCallExpression> {
    reply
        .match_indices(TOOL_CALL_TOKEN)
        .find_map(|(token_at, _)| {
            parse_call_after(&reply[token_at + TOOL_CALL_TOKEN.len()..])
        })
}

/// Parse `name(payload)` from the text that follows a token
fn parse_call_after(text: &str) -> Option<ToolCallExpression> {
    let rest = text.trim_start();

    let name_len = rest
        .find(|c: char| !is_identifier_char(c))
        .unwrap_or(rest.len());
    if name_len == 0 {
        return None;
    }
    let (tool_name, after_name) = rest.split_at(name_len);

    let inside = after_name.strip_prefix('(')?;
    let close = inside.rfind(')')?;

    Some(ToolCallExpression {
        tool_name: tool_name.to_string(),
        argument_payload: inside[..close].to_string(),
    })
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Message body reporting a successful tool run
pub fn format_tool_result(output: &str) -> String {
    format!("{}{}", TOOL_RESULT_PREFIX, output)
}

/// Message body reporting a failed tool run
pub fn format_tool_error(message: &str) -> String {
    format!("{}{}", TOOL_ERROR_PREFIX, message)
}

/// Message body reporting a call to an unregistered tool
pub fn format_tool_not_found(tool_name: &str) -> String {
    format_tool_error(&format!("Tool '{}' not found.", tool_name))
}
