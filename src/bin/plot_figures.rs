use bench_plot::{Matplotlib, ReportConfig};
use color_eyre::Report;

// Plots the latency (fig06), abort rate (fig07) and throughput scalability
// (fig08) figures from the recorded benchmark numbers.
fn main() -> Result<(), Report> {
    // init logging
    bench_plot::init_tracing();

    let config = ReportConfig::paper_figures()?;
    let stdout = std::io::stdout();
    bench_plot::run(&config, &mut Matplotlib, &mut stdout.lock())?;
    Ok(())
}
