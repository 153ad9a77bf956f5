//! Search capability — keyword lookup over a canned fact corpus.
//!
//! A stand-in for a real search backend: the corpus is a fixed list of
//! `(keyword, fact)` pairs and a query matches the first keyword it
//! contains. Keeps demo runs fully offline and deterministic.

use async_trait::async_trait;
use reagent_core::capability::{Arguments, Capability};
use tracing::debug;

pub struct SearchCapability {
    corpus: Vec<(String, String)>,
}

impl SearchCapability {
    pub fn new(corpus: Vec<(String, String)>) -> Self {
        Self { corpus }
    }
}

impl Default for SearchCapability {
    fn default() -> Self {
        let corpus = [
            ("capital of france", "Paris"),
            (
                "python",
                "Python is a high-level programming language known for readability.",
            ),
            (
                "rust",
                "Rust is a systems programming language focused on safety and performance.",
            ),
            (
                "ai",
                "Artificial intelligence is the simulation of human intelligence by machines.",
            ),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        Self::new(corpus)
    }
}

#[async_trait]
impl Capability for SearchCapability {
    fn name(&self) -> &str {
        "search"
    }

    fn description(&self) -> &str {
        "Search for a fact by 'query'"
    }

    async fn invoke(&self, arguments: &Arguments) -> Result<String, String> {
        let query = arguments
            .get("query")
            .ok_or_else(|| "missing 'query' argument".to_string())?;

        let needle = query.to_lowercase();
        for (keyword, fact) in &self.corpus {
            if needle.contains(keyword.as_str()) {
                debug!(%query, %keyword, "search hit");
                return Ok(fact.clone());
            }
        }
        Ok(format!("no result found for '{query}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(q: &str) -> Arguments {
        let mut args = Arguments::new();
        args.insert("query".into(), q.into());
        args
    }

    #[tokio::test]
    async fn finds_known_fact() {
        let cap = SearchCapability::default();
        assert_eq!(cap.invoke(&query("capital of France")).await.unwrap(), "Paris");
    }

    #[tokio::test]
    async fn match_is_case_insensitive_substring() {
        let cap = SearchCapability::default();
        let out = cap.invoke(&query("tell me about RUST please")).await.unwrap();
        assert!(out.contains("systems programming"));
    }

    #[tokio::test]
    async fn unknown_query_reports_no_result() {
        let cap = SearchCapability::default();
        let out = cap.invoke(&query("quantum llamas")).await.unwrap();
        assert!(out.contains("no result"));
    }

    #[tokio::test]
    async fn missing_query_is_an_error() {
        let cap = SearchCapability::default();
        assert!(cap.invoke(&Arguments::new()).await.is_err());
    }
}
