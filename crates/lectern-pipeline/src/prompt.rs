//! Grounded prompt rendering

/// Builds the prompt that asks the model to answer from the context
pub struct PromptBuilder<'a> {
    context: &'a str,
    query: &'a str,
    header: bool,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(context: &'a str, query: &'a str) -> Self {
        Self {
            context,
            query,
            header: false,
        }
    }

    /// Prepend [`GROUNDING_INSTRUCTIONS`] to the prompt
    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    /// Build the complete prompt
    ///
    /// Context and query are embedded verbatim; nothing is escaped or
    /// truncated.
    pub fn build(&self) -> String {
        let mut prompt = String::with_capacity(
            self.context.len() + self.query.len() + GROUNDING_INSTRUCTIONS.len() + 32,
        );

        if self.header {
            prompt.push_str(GROUNDING_INSTRUCTIONS);
            prompt.push_str("\n\n");
        }

        prompt.push_str("Context: ");
        prompt.push_str(self.context);
        prompt.push_str("\n\nQuestion: ");
        prompt.push_str(self.query);
        prompt.push_str("\nAnswer:");
        prompt
    }
}

/// Instruction header restricting the model to the supplied context
pub const GROUNDING_INSTRUCTIONS: &str = concat!(
    "You answer questions about a single document. ",
    "Use only the information in the context below; do not rely on outside knowledge. ",
    "If the context does not contain the answer, reply exactly: ",
    "\"Information not found in the provided documents.\""
);
