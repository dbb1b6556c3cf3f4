use anyhow::Result;
use colored::Colorize;
use nodeterm::TerminalService;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ListFormat {
    Json,
    Text,
}

pub fn list_command(service: &TerminalService, format: ListFormat) -> Result<()> {
    match format {
        ListFormat::Json => {
            let response = service.list_commands()?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        ListFormat::Text => {
            let descriptors = service.describe_commands()?;
            println!("Commands:");

            if descriptors.is_empty() {
                println!("  (none)");
            } else {
                let width = descriptors.iter().map(|d| d.name.len()).max().unwrap_or(0);
                for descriptor in descriptors {
                    let name = format!("{:<width$}", descriptor.name);
                    println!("  {}  {}", name.green().bold(), descriptor.description);
                    println!("  {:<width$}  {}", "", descriptor.usage.dimmed());
                }
            }
        }
    }

    Ok(())
}
