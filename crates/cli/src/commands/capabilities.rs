//! The `capabilities` command — list the built-in capabilities.

use reagent_capabilities::default_registry;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let registry = default_registry()?;
    for (name, description) in registry.describe_all() {
        println!("{name:<12} {description}");
    }
    Ok(())
}
