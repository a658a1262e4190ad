#[cfg(feature = "pyo3")]
pub mod axes;
#[cfg(feature = "pyo3")]
pub mod figure;
#[cfg(feature = "pyo3")]
mod matplotlib;
#[cfg(feature = "pyo3")]
pub mod pyplot;

// Re-exports.
#[cfg(feature = "pyo3")]
pub use matplotlib::Matplotlib;

use crate::layout::FigureLayout;
use color_eyre::Report;

/// Something that can turn a laid out figure into an image file.
pub trait Backend {
    /// Draws `figure` and writes it to `figure.output`, overwriting any
    /// existing file.
    fn draw(&mut self, figure: &FigureLayout) -> Result<(), Report>;
}
