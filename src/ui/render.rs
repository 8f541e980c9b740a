//! Rendering of dispatch results and registry listings.

use crate::types::{ResultMap, ToolDescriptor, ToolOutcome};
use anyhow::Result;
use colored::Colorize;
use std::io::Write;

/// Render each result as a heading followed by its pretty-printed JSON.
pub fn render_results(
    out: &mut impl Write,
    category: &str,
    query: &str,
    results: &ResultMap,
) -> Result<()> {
    if results.is_empty() {
        writeln!(
            out,
            "{} No tools registered for category '{}'",
            "!!!".yellow().bold(),
            category
        )?;
        return Ok(());
    }

    writeln!(out)?;
    writeln!(out, "{}", format!("=== Results for '{}' ({}) ===", query, category).bold())?;

    for (name, outcome, elapsed) in results.iter_timed() {
        writeln!(out)?;
        match elapsed {
            Some(elapsed) => writeln!(
                out,
                "{} {} {}",
                heading_marker(outcome),
                name.bold(),
                format!("({} ms)", elapsed.as_millis()).dimmed()
            )?,
            None => writeln!(out, "{} {}", heading_marker(outcome), name.bold())?,
        }
        writeln!(out, "{}", serde_json::to_string_pretty(outcome)?)?;
    }

    writeln!(out)?;
    let errors = results.error_count();
    let summary = format!("{} tools, {} failed", results.len(), errors);
    if errors == 0 {
        writeln!(out, "{}", summary.green())?;
    } else {
        writeln!(out, "{}", summary.yellow())?;
    }
    Ok(())
}

/// Render the whole result map as a single JSON object.
pub fn render_results_json(out: &mut impl Write, results: &ResultMap) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(results)?)?;
    Ok(())
}

fn heading_marker(outcome: &ToolOutcome) -> colored::ColoredString {
    match outcome {
        ToolOutcome::Json(_) | ToolOutcome::Link { .. } => ">>>".green().bold(),
        ToolOutcome::Error { .. } => ">>>".red().bold(),
        ToolOutcome::Unsupported => ">>>".dimmed(),
    }
}

/// List tool descriptors, one per line.
pub fn render_tools(out: &mut impl Write, tools: &[ToolDescriptor]) -> Result<()> {
    if tools.is_empty() {
        writeln!(out, "No tools registered.")?;
        return Ok(());
    }

    for tool in tools {
        writeln!(
            out,
            "  {:<24} {:<10} {:<5} {}",
            tool.name.bold(),
            tool.category,
            tool.integration.method,
            tool.integration.url.dimmed()
        )?;
        if let Some(description) = &tool.description {
            writeln!(out, "    {}", description)?;
        }
    }
    Ok(())
}

/// List category names, one per line.
pub fn render_categories(out: &mut impl Write, categories: &[String]) -> Result<()> {
    for category in categories {
        writeln!(out, "  {}", category)?;
    }
    Ok(())
}
