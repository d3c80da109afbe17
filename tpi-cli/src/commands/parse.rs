//! Parse command - Check a test plan item body locally

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tpi_core::{parse_test_plan_item, ParsedTestPlanItem};

/// Arguments for the parse command
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// File containing the issue body, or "-" for stdin
    #[arg(required = true)]
    pub file: PathBuf,

    /// Issue author handle (without @)
    #[arg(short, long, default_value = "")]
    pub author: String,

    /// Print the parsed item as JSON
    #[arg(long)]
    pub json: bool,
}

impl ParseArgs {
    /// Execute the parse command
    pub fn execute(&self, verbose: bool) -> anyhow::Result<()> {
        let body = self.read_body()?;

        if verbose {
            tracing::info!(file = %self.file.display(), bytes = body.len(), "Parsing test plan item");
        }

        let item = parse_test_plan_item(&body, &self.author)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&item)?);
        } else {
            print_summary(&body, &item);
        }

        Ok(())
    }

    fn read_body(&self) -> anyhow::Result<String> {
        if self.file.as_os_str() == "-" {
            let mut body = String::new();
            std::io::stdin()
                .read_to_string(&mut body)
                .context("Failed to read body from stdin")?;
            return Ok(body);
        }

        std::fs::read_to_string(&self.file)
            .with_context(|| format!("Failed to read {}", self.file.display()))
    }
}

fn print_summary(body: &str, item: &ParsedTestPlanItem) {
    println!("Valid test plan item");
    println!();
    println!("Complexity: {}", item.complexity);

    if !item.issue_refs.is_empty() {
        let refs: Vec<String> = item.issue_refs.iter().map(|r| r.to_string()).collect();
        println!("Refs: {}", refs.join(", "));
    }

    println!("Authors: {}", item.authors.join(", "));

    if let Some(roles) = &item.roles {
        let roles: Vec<&str> = roles.iter().map(|r| r.name()).collect();
        println!("Roles: {}", roles.join(", "));
    }

    println!();
    println!("Assignments ({}):", item.assignments.len());
    for assignment in &item.assignments {
        let mark = if assignment.checked { "x" } else { " " };
        let user = assignment
            .user
            .as_deref()
            .map(|u| format!("@{}", u))
            .unwrap_or_else(|| "(unassigned)".to_string());
        println!(
            "  [{}] {:<8} {:<16} {}",
            mark,
            assignment.platform.name(),
            user,
            body[assignment.range.clone()].trim()
        );
    }
}
