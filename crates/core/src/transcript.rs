//! Transcript — the append-only history of a single run.
//!
//! The transcript is both the growing prompt context (via [`Transcript::render`])
//! and the audit trail a caller inspects after the run. Entries are
//! immutable once appended and insertion order is the conversation order.

use serde::{Deserialize, Serialize};

use crate::capability::Arguments;

/// One entry in the run history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TranscriptEntry {
    /// The question that started the run.
    Question { text: String },

    /// A reasoning fragment produced by the reasoning port.
    Thought { text: String },

    /// A capability invocation the parser extracted from a thought.
    Invocation {
        capability: String,
        arguments: Arguments,
    },

    /// The textual result (success or failure) of an invocation, or the
    /// recovery note appended when a response was inconclusive.
    Observation { text: String },

    /// The terminal answer.
    FinalAnswer { text: String },
}

impl TranscriptEntry {
    /// The fixed label used when rendering this entry into a prompt.
    fn label(&self) -> &'static str {
        match self {
            TranscriptEntry::Question { .. } => "Question:",
            TranscriptEntry::Thought { .. } => "Thought:",
            TranscriptEntry::Invocation { .. } => "Action:",
            TranscriptEntry::Observation { .. } => "Observation:",
            TranscriptEntry::FinalAnswer { .. } => "Final Answer:",
        }
    }

    fn body(&self) -> String {
        match self {
            TranscriptEntry::Question { text }
            | TranscriptEntry::Thought { text }
            | TranscriptEntry::Observation { text }
            | TranscriptEntry::FinalAnswer { text } => text.clone(),
            TranscriptEntry::Invocation {
                capability,
                arguments,
            } => {
                let args: Vec<String> = arguments
                    .iter()
                    .map(|(k, v)| format!("{k}=\"{v}\""))
                    .collect();
                format!("{capability}({})", args.join(", "))
            }
        }
    }
}

/// The ordered, append-only log of one run.
///
/// Created per run, grows monotonically, and is handed back to the caller
/// inside the run result. There is no persistence: the transcript lives
/// and dies with the run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. O(1), never fails.
    pub fn append(&mut self, entry: TranscriptEntry) {
        self.entries.push(entry);
    }

    /// Read-only view of the entries in insertion order.
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// Number of `Invocation` entries so far.
    pub fn invocation_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, TranscriptEntry::Invocation { .. }))
            .count()
    }

    /// Deterministically serialize the history into the textual form the
    /// reasoning port expects: one labeled line per entry, in insertion
    /// order.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(entry.label());
            out.push(' ');
            out.push_str(&entry.body());
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(pairs: &[(&str, &str)]) -> Arguments {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn append_preserves_order() {
        let mut t = Transcript::new();
        t.append(TranscriptEntry::Question {
            text: "q".into(),
        });
        t.append(TranscriptEntry::Thought {
            text: "t".into(),
        });
        assert_eq!(t.entries().len(), 2);
        assert!(matches!(t.entries()[0], TranscriptEntry::Question { .. }));
        assert!(matches!(t.entries()[1], TranscriptEntry::Thought { .. }));
    }

    #[test]
    fn render_uses_fixed_labels() {
        let mut t = Transcript::new();
        t.append(TranscriptEntry::Question {
            text: "capital of France?".into(),
        });
        t.append(TranscriptEntry::Thought {
            text: "I should search.".into(),
        });
        t.append(TranscriptEntry::Invocation {
            capability: "search".into(),
            arguments: args(&[("query", "capital of France")]),
        });
        t.append(TranscriptEntry::Observation {
            text: "Paris".into(),
        });
        t.append(TranscriptEntry::FinalAnswer {
            text: "Paris".into(),
        });

        let rendered = t.render();
        assert_eq!(
            rendered,
            "Question: capital of France?\n\
             Thought: I should search.\n\
             Action: search(query=\"capital of France\")\n\
             Observation: Paris\n\
             Final Answer: Paris\n"
        );
    }

    #[test]
    fn render_sorts_arguments_deterministically() {
        let mut t = Transcript::new();
        t.append(TranscriptEntry::Invocation {
            capability: "lookup".into(),
            arguments: args(&[("zeta", "1"), ("alpha", "2")]),
        });
        // BTreeMap ordering: alpha before zeta, regardless of insertion.
        assert_eq!(t.render(), "Action: lookup(alpha=\"2\", zeta=\"1\")\n");
    }

    #[test]
    fn invocation_count_counts_only_invocations() {
        let mut t = Transcript::new();
        t.append(TranscriptEntry::Question { text: "q".into() });
        t.append(TranscriptEntry::Invocation {
            capability: "a".into(),
            arguments: Arguments::new(),
        });
        t.append(TranscriptEntry::Observation { text: "o".into() });
        t.append(TranscriptEntry::Invocation {
            capability: "b".into(),
            arguments: Arguments::new(),
        });
        assert_eq!(t.invocation_count(), 2);
    }

    #[test]
    fn serializes_to_tagged_json() {
        let entry = TranscriptEntry::Observation {
            text: "Paris".into(),
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"kind\":\"observation\""));
        assert!(json.contains("Paris"));
    }
}
