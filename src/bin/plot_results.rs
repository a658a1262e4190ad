use bench_plot::{Matplotlib, ReportConfig};
use color_eyre::Report;

// Plots throughput and abort rate of the uniform and hot-spot workloads from
// `results_uniform.json` and `results_hotspot.json` into
// `benchmark_results.png`.
fn main() -> Result<(), Report> {
    // init logging
    bench_plot::init_tracing();

    let config = ReportConfig::benchmark_results()?;
    let stdout = std::io::stdout();
    bench_plot::run(&config, &mut Matplotlib, &mut stdout.lock())?;
    Ok(())
}
