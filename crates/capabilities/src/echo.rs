//! Echo capability — returns its input, useful for smoke-testing a loop.

use async_trait::async_trait;
use reagent_core::capability::{Arguments, Capability};

pub struct EchoCapability;

#[async_trait]
impl Capability for EchoCapability {
    fn name(&self) -> &str {
        "echo"
    }

    fn description(&self) -> &str {
        "Echo back the 'text' argument verbatim"
    }

    async fn invoke(&self, arguments: &Arguments) -> Result<String, String> {
        arguments
            .get("text")
            .cloned()
            .ok_or_else(|| "missing 'text' argument".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn echoes_text() {
        let mut args = Arguments::new();
        args.insert("text".into(), "hello".into());
        assert_eq!(EchoCapability.invoke(&args).await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn missing_text_is_an_error() {
        assert!(EchoCapability.invoke(&Arguments::new()).await.is_err());
    }
}
