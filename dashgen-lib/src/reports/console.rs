use crate::Result;
use crate::generation::OutputModel;
use core::fmt::Write;
use owo_colors::OwoColorize;

const KIND_WIDTH: usize = 9;

/// Summarize a generation run for the terminal.
pub fn generate<W: Write>(model: &OutputModel, use_colors: bool, writer: &mut W) -> Result<()> {
    heading(writer, &format!("Metrics ({})", model.metrics.len()), use_colors)?;

    let name_width = model.metrics.iter().map(|m| m.fully_qualified_name.len()).max().unwrap_or(0);

    for metric in &model.metrics {
        let kind = format!("{:<KIND_WIDTH$}", metric.kind.to_string());
        let kind = if use_colors { kind.cyan().to_string() } else { kind };

        if metric.grouping.is_empty() {
            writeln!(writer, "  {kind}  {}", metric.fully_qualified_name)?;
        } else {
            writeln!(
                writer,
                "  {kind}  {:<name_width$}{}",
                metric.fully_qualified_name, metric.grouping
            )?;
        }
    }

    if !model.extra_series.is_empty() {
        writeln!(writer)?;
        heading(writer, &format!("Extra series ({})", model.extra_series.len()), use_colors)?;

        for series in &model.extra_series {
            writeln!(writer, "  {}  {}{{{}}}", series.title, series.fully_qualified_name, series.label_filter)?;
        }
    }

    writeln!(writer)?;
    if model.rules.rules.is_empty() {
        heading(writer, "No alert rules", use_colors)?;
    } else {
        heading(writer, &format!("Alert rules: {}", model.rules.group_name), use_colors)?;

        for rule in &model.rules.rules {
            if use_colors {
                writeln!(writer, "  {}", rule.name.bold())?;
            } else {
                writeln!(writer, "  {}", rule.name)?;
            }
            writeln!(writer, "    expr: {}", rule.expression)?;
            writeln!(writer, "    for:  {}", rule.duration)?;
        }
    }

    writeln!(writer)?;
    let summary = format!(
        "{} alert rule(s), {} unique metric(s)",
        model.summary.alert_rules, model.summary.unique_metrics
    );

    if use_colors {
        writeln!(writer, "{}", summary.green())?;
    } else {
        writeln!(writer, "{summary}")?;
    }

    Ok(())
}

fn heading<W: Write>(writer: &mut W, text: &str, use_colors: bool) -> Result<()> {
    if use_colors {
        writeln!(writer, "{}", text.bold())?;
    } else {
        writeln!(writer, "{text}")?;
    }

    Ok(())
}
