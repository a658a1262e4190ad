use crate::plot::axes::Axes;
use crate::plot::figure::Figure;
use pyo3::prelude::*;
use pyo3::types::PyDict;

// images are only ever written to files
const MATPLOTLIB_BACKEND: &str = "Agg";

pub struct PyPlot<'p> {
    plt: &'p PyModule,
}

impl<'p> PyPlot<'p> {
    pub fn new(py: Python<'p>) -> PyResult<Self> {
        // the backend must be selected before `pyplot` is imported
        let matplotlib = PyModule::import(py, "matplotlib")?;
        matplotlib.getattr("use")?.call1((MATPLOTLIB_BACKEND,))?;
        let plt = PyModule::import(py, "matplotlib.pyplot")?;
        Ok(Self { plt })
    }

    pub fn figure(&self, kwargs: Option<&PyDict>) -> PyResult<Figure<'_>> {
        let result = self.plt.getattr("figure")?.call((), kwargs)?;
        Ok(Figure::new(result))
    }

    pub fn subplot(
        &self,
        nrows: usize,
        ncols: usize,
        index: usize,
        kwargs: Option<&PyDict>,
    ) -> PyResult<Axes<'_>> {
        let result = self
            .plt
            .getattr("subplot")?
            .call((nrows, ncols, index), kwargs)?;
        Ok(Axes::new(result))
    }

    pub fn tight_layout(&self) -> PyResult<()> {
        self.plt.getattr("tight_layout")?.call0()?;
        Ok(())
    }

    pub fn savefig(&self, path: &str, kwargs: Option<&PyDict>) -> PyResult<()> {
        self.plt.getattr("savefig")?.call((path,), kwargs)?;
        Ok(())
    }

    pub fn close(&self, figure: Figure<'_>) -> PyResult<()> {
        self.plt.getattr("close")?.call1((figure.fig(),))?;
        Ok(())
    }
}
