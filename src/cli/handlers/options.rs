//! Option vocabulary listing

use apprise_dispatch::options::OptionSchema;

/// Handler for the `options` command
pub struct OptionsHandler;

impl OptionsHandler {
    pub fn new() -> Self {
        Self
    }

    /// One line per supported option: name, rule, description
    pub fn render(&self) -> Vec<String> {
        let width = OptionSchema::specs()
            .iter()
            .map(|spec| spec.name.len())
            .max()
            .unwrap_or(0);

        OptionSchema::specs()
            .iter()
            .map(|spec| {
                format!(
                    "{:<width$}  {:<38}  {}",
                    spec.name,
                    spec.rule.to_string(),
                    spec.description,
                    width = width
                )
            })
            .collect()
    }

    pub fn handle_list(&self) {
        println!("Supported apprise options:");
        for line in self.render() {
            println!("  {line}");
        }
    }
}

impl Default for OptionsHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_lists_every_option() {
        let lines = OptionsHandler::new().render();
        assert_eq!(lines.len(), 16);
        assert!(lines[0].starts_with("plugin-path"));
        assert!(lines.iter().any(|line| line.contains("one of {auto, flush, memory}")));
    }
}
