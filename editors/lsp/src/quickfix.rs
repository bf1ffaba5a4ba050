//! Quick fixes offered for norminette diagnostics.
//!
//! Every error gets two actions, both executed by the editor extension:
//! open the documentation page for the rule, and search the web for the
//! message within the document's language.

use norminette_core::diagnostics::docs::{search_url, FALLBACK_URL};
use serde_json::Value;
use tower_lsp::lsp_types::{
    CodeAction, CodeActionKind, CodeActionOrCommand, Command, Diagnostic, DiagnosticSeverity,
};

/// Opens the URL passed as the only argument.
pub const SEARCH_DOCS_COMMAND: &str = "42-norminette.searchOnNorminette";
/// Arguments: the diagnostic message, then a ready-made search URL.
pub const SEARCH_WEB_COMMAND: &str = "42-norminette.searchOnStackOverflow";

pub const DEFAULT_LANGUAGE_ID: &str = "c";

/// Text shown in the action titles: the first related message, if any.
fn action_subject(diagnostic: &Diagnostic) -> &str {
    diagnostic
        .related_information
        .as_ref()
        .and_then(|related| related.first())
        .map_or(diagnostic.message.as_str(), |info| info.message.as_str())
}

fn quickfix(title: String, diagnostic: &Diagnostic, command: Command) -> CodeActionOrCommand {
    CodeActionOrCommand::CodeAction(CodeAction {
        title,
        kind: Some(CodeActionKind::QUICKFIX),
        diagnostics: Some(vec![diagnostic.clone()]),
        command: Some(command),
        ..Default::default()
    })
}

/// Build the quick fixes for the diagnostics in a code-action request.
pub fn code_actions(diagnostics: &[Diagnostic], language_id: &str) -> Vec<CodeActionOrCommand> {
    diagnostics
        .iter()
        .filter(|d| d.severity == Some(DiagnosticSeverity::ERROR))
        .flat_map(|diagnostic| {
            let subject = action_subject(diagnostic);
            let docs_href = diagnostic
                .code_description
                .as_ref()
                .map_or_else(|| FALLBACK_URL.to_string(), |c| c.href.to_string());

            [
                quickfix(
                    format!("Search error at norminette docs: {}", subject),
                    diagnostic,
                    Command {
                        title: "View norminette".to_string(),
                        command: SEARCH_DOCS_COMMAND.to_string(),
                        arguments: Some(vec![Value::String(docs_href)]),
                    },
                ),
                quickfix(
                    format!("Search error at StackOverflow: {}", subject),
                    diagnostic,
                    Command {
                        title: "View stack".to_string(),
                        command: SEARCH_WEB_COMMAND.to_string(),
                        arguments: Some(vec![
                            Value::String(subject.to_string()),
                            Value::String(search_url(language_id, subject)),
                        ]),
                    },
                ),
            ]
        })
        .collect()
}
