use bench_plot::{Matplotlib, ReportConfig};
use color_eyre::Report;

fn main() -> Result<(), Report> {
    // init logging
    bench_plot::init_tracing();

    let config = ReportConfig::summary()?;
    let stdout = std::io::stdout();
    bench_plot::run(&config, &mut Matplotlib, &mut stdout.lock())?;
    Ok(())
}
