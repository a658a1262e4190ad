use crate::layout::{ChartLayout, FigureLayout, Series};
use crate::plot::axes::Axes;
use crate::plot::pyplot::PyPlot;
use crate::plot::Backend;
use crate::{pydict, pytry};
use color_eyre::Report;
use pyo3::prelude::*;
use pyo3::types::PyDict;

/// Draws figures with `matplotlib.pyplot`.
#[derive(Debug, Default)]
pub struct Matplotlib;

impl Backend for Matplotlib {
    fn draw(&mut self, figure: &FigureLayout) -> Result<(), Report> {
        Python::with_gil(|py| draw_figure(py, figure))
    }
}

fn draw_figure(py: Python<'_>, layout: &FigureLayout) -> Result<(), Report> {
    let plt = pytry!(py, PyPlot::new(py));
    let kwargs = pytry!(py, pydict!(py, ("figsize", layout.size)));
    let fig = pytry!(py, plt.figure(Some(kwargs)));

    // charts go side by side
    let ncols = layout.charts.len();
    for (index, chart) in layout.charts.iter().enumerate() {
        let ax = pytry!(py, plt.subplot(1, ncols, index + 1, None));
        draw_chart(py, &ax, chart)?;
    }
    pytry!(py, plt.tight_layout());

    // save figure, at the default resolution unless one is given
    let kwargs = PyDict::new(py);
    if let Some(dpi) = layout.dpi {
        pytry!(py, kwargs.set_item("dpi", dpi));
    }
    let path = layout.output.to_string_lossy();
    pytry!(py, plt.savefig(&path, Some(kwargs)));
    pytry!(py, plt.close(fig));
    Ok(())
}

fn draw_chart(
    py: Python<'_>,
    ax: &Axes<'_>,
    chart: &ChartLayout,
) -> Result<(), Report> {
    for series in chart.series.iter() {
        match series {
            Series::Bars {
                label,
                x,
                heights,
                width,
                colors,
            } => {
                let kwargs = pytry!(
                    py,
                    pydict!(
                        py,
                        ("label", label),
                        ("width", *width),
                        ("color", colors),
                    )
                );
                pytry!(py, ax.bar(x.clone(), heights.clone(), Some(kwargs)));
            }
            Series::Line { label, x, y, color } => {
                let kwargs = pytry!(
                    py,
                    pydict!(py, ("label", label), ("color", color))
                );
                pytry!(
                    py,
                    ax.plot(x.clone(), y.clone(), Some("o-"), Some(kwargs))
                );
            }
        }
    }

    // value labels, centred right above each bar or point
    for annotation in chart.annotations.iter() {
        let kwargs =
            pytry!(py, pydict!(py, ("ha", "center"), ("va", "bottom")));
        pytry!(
            py,
            ax.text(annotation.x, annotation.y, &annotation.text, Some(kwargs))
        );
    }

    pytry!(py, ax.set_title(&chart.title));
    if let Some(x_label) = &chart.x_label {
        pytry!(py, ax.set_xlabel(x_label));
    }
    pytry!(py, ax.set_ylabel(&chart.y_label));
    pytry!(py, ax.set_xticks(chart.ticks.clone()));
    pytry!(py, ax.set_xticklabels(chart.tick_labels.clone()));

    let kwargs = pytry!(py, pydict!(py, ("bottom", 0.0)));
    if let Some(y_max) = chart.y_max {
        pytry!(py, kwargs.set_item("top", y_max));
    }
    pytry!(py, ax.set_ylim(Some(kwargs)));

    if chart.legend {
        pytry!(py, ax.legend(None));
    }
    Ok(())
}
