use crate::config::{ReportConfig, Section};
use crate::db;
use crate::layout::FigureLayout;
use crate::metrics::ScenarioSet;
use crate::plot::Backend;
use color_eyre::eyre::WrapErr;
use color_eyre::Report;
use std::io::Write;
use std::path::PathBuf;

/// Generates every figure in `config`, writing status lines to `out`.
/// Returns the images written, in order.
///
/// Scenarios whose results file is missing are skipped with a warning; a
/// section where nothing could be loaded produces no image.
pub fn run<B, W>(
    config: &ReportConfig,
    backend: &mut B,
    out: &mut W,
) -> Result<Vec<PathBuf>, Report>
where
    B: Backend,
    W: Write,
{
    config.validate().wrap_err("invalid report config")?;

    let mut generated = Vec::new();
    for section in config.sections.iter() {
        run_section(section, backend, out, &mut generated)?;
    }
    Ok(generated)
}

fn run_section<B, W>(
    section: &Section,
    backend: &mut B,
    out: &mut W,
    generated: &mut Vec<PathBuf>,
) -> Result<(), Report>
where
    B: Backend,
    W: Write,
{
    let loaded = db::load(&section.scenarios).wrap_err("load scenarios")?;
    let (scenarios, absent) = ScenarioSet::from_loaded(loaded)?;
    for path in absent {
        writeln!(out, "Warning: {} not found. Skipping.", path.display())?;
    }

    if scenarios.is_empty() {
        writeln!(out, "No data found.")?;
        return Ok(());
    }

    for figure in section.figures.iter() {
        let layout = FigureLayout::new(figure, &scenarios);
        backend.draw(&layout).wrap_err_with(|| {
            format!("draw figure {}", figure.output.display())
        })?;
        tracing::info!(
            output = %figure.output.display(),
            scenarios = scenarios.len(),
            charts = layout.charts.len(),
            "figure drawn"
        );
        writeln!(out, "Generated {}", figure.output.display())?;
        generated.push(figure.output.clone());
    }
    Ok(())
}
