//! Transcript rendering for download and for the feedback prompt.

use crate::interview::session::{Session, Turn};

const RULE_WIDTH: usize = 60;

/// `LABEL: content` lines separated by blank lines, as embedded in the feedback prompt.
pub fn conversation_text(history: &[Turn]) -> String {
    history
        .iter()
        .map(|turn| format!("{}: {}", turn.role.label(), turn.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Human-readable transcript with a metadata header and numbered turns.
pub fn render_transcript(session: &Session) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut transcript = format!(
        "\nAI INTERVIEW PRACTICE - TRANSCRIPT\n{rule}\nRole: {}\nCandidate: {}\nDate: {}\nDuration: {} minutes\n{rule}\n\nCONVERSATION:\n",
        session.role.name,
        session.user_name,
        session.start_time.to_rfc3339(),
        session.role.estimated_time,
    );

    for (i, turn) in session.history().iter().enumerate() {
        transcript.push_str(&format!(
            "\n[{}] {}:\n{}\n",
            i + 1,
            turn.role.label(),
            turn.content
        ));
    }

    transcript
}
