//! Clock capability — reports the current UTC time.

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use reagent_core::capability::{Arguments, Capability};

pub struct ClockCapability;

#[async_trait]
impl Capability for ClockCapability {
    fn name(&self) -> &str {
        "clock"
    }

    fn description(&self) -> &str {
        "Get the current date and time (UTC, RFC 3339); takes no arguments"
    }

    async fn invoke(&self, _arguments: &Arguments) -> Result<String, String> {
        Ok(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[tokio::test]
    async fn returns_valid_rfc3339() {
        let out = ClockCapability.invoke(&Arguments::new()).await.unwrap();
        assert!(DateTime::parse_from_rfc3339(&out).is_ok());
    }
}
