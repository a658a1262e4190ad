use bench_plot::{
    Backend, ChartKind, ChartSpec, FigureLayout, FigureSpec, Metric,
    ReportConfig, ScenarioSpec, Section, Series, Values,
};
use color_eyre::Report;
use std::path::{Path, PathBuf};

#[derive(Default)]
struct Recorder {
    drawn: Vec<FigureLayout>,
}

impl Backend for Recorder {
    fn draw(&mut self, figure: &FigureLayout) -> Result<(), Report> {
        self.drawn.push(figure.clone());
        Ok(())
    }
}

fn results_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir()
        .join(format!("bench_plot_it_{}_{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_results(dir: &Path, file: &str, json: &str) -> PathBuf {
    let path = dir.join(file);
    std::fs::write(&path, json).unwrap();
    path
}

// Same charts as `ReportConfig::benchmark_results`, reading from `dir`.
fn results_config(dir: &Path) -> ReportConfig {
    let charts = vec![
        ChartSpec::new(
            "System Throughput",
            ChartKind::Bar,
            Metric::Throughput,
            "Transactions Per Second (TPS)",
            "%.0f",
        )
        .unwrap(),
        ChartSpec::new(
            "Transaction Abort Rate",
            ChartKind::Bar,
            Metric::AbortRate,
            "Abort Rate (%)",
            "%.1f%%",
        )
        .unwrap()
        .y_max(100.0),
    ];
    ReportConfig::new(vec![Section {
        scenarios: vec![
            ScenarioSpec::file("Uniform", dir.join("results_uniform.json")),
            ScenarioSpec::file("Hot-Spot", dir.join("results_hotspot.json")),
        ],
        figures: vec![FigureSpec::new(
            dir.join("benchmark_results.png"),
            charts,
        )
        .dpi(300)],
    }])
}

fn bar_heights(series: &Series) -> Vec<f64> {
    match series {
        Series::Bars { heights, .. } => heights.clone(),
        Series::Line { .. } => panic!("expected bars"),
    }
}

fn labels(layout: &FigureLayout, chart: usize) -> Vec<String> {
    layout.charts[chart]
        .annotations
        .iter()
        .map(|annotation| annotation.text.clone())
        .collect()
}

#[test]
fn both_workloads() {
    let dir = results_dir("both");
    write_results(
        &dir,
        "results_uniform.json",
        r#"{"throughput_tps": 326.5, "abort_rate_pct": 1.79}"#,
    );
    write_results(
        &dir,
        "results_hotspot.json",
        r#"{"throughput_tps": 527.2, "abort_rate_pct": 87.40}"#,
    );

    let mut backend = Recorder::default();
    let mut out = Vec::new();
    let generated =
        bench_plot::run(&results_config(&dir), &mut backend, &mut out)
            .unwrap();

    let output = dir.join("benchmark_results.png");
    assert_eq!(generated, vec![output.clone()]);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        format!("Generated {}\n", output.display())
    );

    assert_eq!(backend.drawn.len(), 1);
    let figure = &backend.drawn[0];
    assert_eq!(figure.dpi, Some(300));
    assert_eq!(figure.charts.len(), 2);

    let throughput = &figure.charts[0];
    assert_eq!(throughput.tick_labels, vec!["Uniform", "Hot-Spot"]);
    assert_eq!(throughput.element_count(), 2);
    assert_eq!(bar_heights(&throughput.series[0]), vec![326.5, 527.2]);
    assert_eq!(labels(figure, 0)[1], "527");

    let abort = &figure.charts[1];
    assert_eq!(abort.element_count(), 2);
    assert_eq!(bar_heights(&abort.series[0]), vec![1.79, 87.40]);
    assert_eq!(labels(figure, 1), vec!["1.8%", "87.4%"]);
}

#[test]
fn missing_workload_is_skipped() {
    let dir = results_dir("missing");
    write_results(
        &dir,
        "results_hotspot.json",
        r#"{"throughput_tps": 527.2}"#,
    );

    let mut backend = Recorder::default();
    let mut out = Vec::new();
    let generated =
        bench_plot::run(&results_config(&dir), &mut backend, &mut out)
            .unwrap();
    assert_eq!(generated.len(), 1);

    let expected = format!(
        "Warning: {} not found. Skipping.\nGenerated {}\n",
        dir.join("results_uniform.json").display(),
        dir.join("benchmark_results.png").display(),
    );
    assert_eq!(String::from_utf8(out).unwrap(), expected);

    // only the hot-spot bar is left, and its missing key defaults to zero
    let figure = &backend.drawn[0];
    assert_eq!(figure.charts[0].tick_labels, vec!["Hot-Spot"]);
    assert_eq!(bar_heights(&figure.charts[0].series[0]), vec![527.2]);
    assert_eq!(bar_heights(&figure.charts[1].series[0]), vec![0.0]);
    assert_eq!(labels(figure, 1), vec!["0.0%"]);
}

#[test]
fn no_workloads() {
    let dir = results_dir("none");

    let mut backend = Recorder::default();
    let mut out = Vec::new();
    let generated =
        bench_plot::run(&results_config(&dir), &mut backend, &mut out)
            .unwrap();

    assert!(generated.is_empty());
    assert!(backend.drawn.is_empty());
    let expected = format!(
        "Warning: {} not found. Skipping.\n\
         Warning: {} not found. Skipping.\n\
         No data found.\n",
        dir.join("results_uniform.json").display(),
        dir.join("results_hotspot.json").display(),
    );
    assert_eq!(String::from_utf8(out).unwrap(), expected);
    assert!(!dir.join("benchmark_results.png").exists());
}

#[test]
fn malformed_workload_fails() {
    let dir = results_dir("malformed");
    write_results(&dir, "results_uniform.json", r#"{"throughput_tps": "#);
    write_results(&dir, "results_hotspot.json", r#"{}"#);

    let mut backend = Recorder::default();
    let mut out = Vec::new();
    let result =
        bench_plot::run(&results_config(&dir), &mut backend, &mut out);
    assert!(result.is_err());
    assert!(backend.drawn.is_empty());
}

#[test]
fn reruns_target_the_same_files() {
    let config = ReportConfig::paper_figures().unwrap();

    let mut outputs = Vec::new();
    for _ in 0..2 {
        let mut backend = Recorder::default();
        let mut out = Vec::new();
        let generated = bench_plot::run(&config, &mut backend, &mut out)
            .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Generated fig06_latency.png\n\
             Generated fig07_abort.png\n\
             Generated fig08_throughput.png\n"
        );
        outputs.push(generated);
    }
    assert_eq!(outputs[0], outputs[1]);
}

#[test]
fn paper_figures_contents() {
    let config = ReportConfig::paper_figures().unwrap();
    let mut backend = Recorder::default();
    bench_plot::run(&config, &mut backend, &mut std::io::sink()).unwrap();

    let latency = &backend.drawn[0];
    assert_eq!(latency.output, PathBuf::from("fig06_latency.png"));
    assert_eq!(labels(latency, 0), vec!["41.3 ms", "23.8 ms"]);
    assert_eq!(latency.charts[0].y_max, Some(60.0));

    let abort = &backend.drawn[1];
    assert_eq!(labels(abort, 0), vec!["1.8%", "87.4%"]);

    // one point per concurrency level, in order
    let scalability = &backend.drawn[2];
    let chart = &scalability.charts[0];
    assert_eq!(chart.tick_labels, vec!["1", "5", "10", "25", "50"]);
    assert_eq!(chart.x_label.as_deref(), Some("Concurrent Workers"));
    match &chart.series[0] {
        Series::Line { y, .. } => {
            assert_eq!(y, &vec![48.7, 201.3, 326.5, 402.9, 418.2])
        }
        Series::Bars { .. } => panic!("expected a line"),
    }
}

#[test]
fn summary_contents() {
    let config = ReportConfig::summary().unwrap();
    let mut backend = Recorder::default();
    let mut out = Vec::new();
    bench_plot::run(&config, &mut backend, &mut out).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Generated benchmark_summary.png\n"
    );
    let figure = &backend.drawn[0];
    assert_eq!(figure.dpi, None);
    let titles: Vec<_> = figure
        .charts
        .iter()
        .map(|chart| chart.title.as_str())
        .collect();
    assert_eq!(
        titles,
        vec!["System Throughput", "p95 Latency", "Transaction Abort Rate"]
    );
}

#[test]
fn embedded_scenarios_without_a_metric() {
    let chart = ChartSpec::new(
        "p95",
        ChartKind::Bar,
        Metric::P95Latency,
        "ms",
        "%.1f",
    )
    .unwrap();
    let config = ReportConfig::new(vec![Section {
        scenarios: vec![
            ScenarioSpec::embedded(
                "Uniform",
                Values {
                    p95_latency_ms: Some(41.3),
                    ..Values::default()
                },
            ),
            ScenarioSpec::embedded(
                "Hot-Spot",
                Values {
                    throughput: Some(527.2),
                    ..Values::default()
                },
            ),
        ],
        figures: vec![FigureSpec::new("p95.png", vec![chart])],
    }]);

    let mut backend = Recorder::default();
    bench_plot::run(&config, &mut backend, &mut std::io::sink()).unwrap();

    // both scenarios keep their slot, but only one has a bar
    let chart = &backend.drawn[0].charts[0];
    assert_eq!(chart.tick_labels, vec!["Uniform", "Hot-Spot"]);
    assert_eq!(chart.element_count(), 1);
    assert_eq!(labels(&backend.drawn[0], 0), vec!["41.3"]);
}
