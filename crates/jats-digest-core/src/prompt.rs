//! Prompt composition for the text-generation step.
//!
//! The generator receives a configurable instruction prefix followed by the
//! digest. Only the text is produced here; running the generator is left to
//! the caller.

/// Header placed between the instruction prefix and the digest.
pub const SUMMARY_REQUEST_HEADER: &str = "Summarize this XML:";

/// Compose the full generation prompt.
///
/// Layout: trimmed instruction, blank line, [`SUMMARY_REQUEST_HEADER`],
/// newline, digest. An empty instruction drops the prefix and blank line.
///
/// # Examples
///
/// ```rust
/// use jats_digest_core::compose_prompt;
///
/// let prompt = compose_prompt("You are a concise reviewer.\n", "## Title\nFoo Bar");
/// assert_eq!(
///     prompt,
///     "You are a concise reviewer.\n\nSummarize this XML:\n## Title\nFoo Bar"
/// );
/// ```
#[must_use]
pub fn compose_prompt(instruction: &str, digest: &str) -> String {
    let instruction = instruction.trim();
    if instruction.is_empty() {
        format!("{SUMMARY_REQUEST_HEADER}\n{digest}")
    } else {
        format!("{instruction}\n\n{SUMMARY_REQUEST_HEADER}\n{digest}")
    }
}
