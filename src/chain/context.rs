use crate::schemas::Document;

/// Separator between the snippets of a context block.
pub const CONTEXT_SEPARATOR: &str = "\n\n";

/// Builds the context block handed to the model.
///
/// Each document contributes its `example` metadata, or its `answer` when
/// `example` is missing or null, or an empty string when both are. An
/// `example` that is an empty string is still taken and does not fall
/// through to `answer`. The snippets are joined with a blank line; empty
/// snippets still take part in the join.
pub fn build_context(docs: &[Document]) -> String {
    docs.iter()
        .map(|doc| {
            doc.metadata_text("example")
                .or_else(|| doc.metadata_text("answer"))
                .unwrap_or_default()
        })
        .collect::<Vec<_>>()
        .join(CONTEXT_SEPARATOR)
}
