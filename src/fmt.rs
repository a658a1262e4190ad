use color_eyre::eyre;
use color_eyre::Report;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
enum Piece {
    Literal(String),
    // `%.Nf`
    Fixed(usize),
    // `%d`
    Integer,
}

/// A printf-style format for value labels, e.g. `%.0f` or `%.1f%%`.
///
/// Supported conversions are `%f` (6 decimals), `%.Nf` (N decimals), `%d`
/// (truncated towards zero) and the `%%` escape. The string must contain at
/// least one conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelFmt {
    spec: String,
    pieces: Vec<Piece>,
}

impl LabelFmt {
    pub fn parse(spec: &str) -> Result<Self, Report> {
        let mut pieces = Vec::new();
        let mut literal = String::new();
        let mut conversions = 0;
        let mut chars = spec.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '%' {
                literal.push(c);
                continue;
            }

            let conversion = match chars.next() {
                Some('%') => {
                    literal.push('%');
                    continue;
                }
                Some('f') => Piece::Fixed(6),
                Some('d') => Piece::Integer,
                Some('.') => {
                    let mut digits = String::new();
                    while let Some(&d) = chars.peek() {
                        if !d.is_ascii_digit() {
                            break;
                        }
                        digits.push(d);
                        chars.next();
                    }
                    match chars.next() {
                        Some('f') if !digits.is_empty() => {
                            let precision = digits.parse().map_err(|e| {
                                eyre::eyre!(
                                    "invalid precision in {:?}: {}",
                                    spec,
                                    e
                                )
                            })?;
                            Piece::Fixed(precision)
                        }
                        _ => eyre::bail!(
                            "unsupported conversion in label format {:?}",
                            spec
                        ),
                    }
                }
                _ => eyre::bail!(
                    "unsupported conversion in label format {:?}",
                    spec
                ),
            };

            if !literal.is_empty() {
                pieces.push(Piece::Literal(std::mem::take(&mut literal)));
            }
            pieces.push(conversion);
            conversions += 1;
        }
        if !literal.is_empty() {
            pieces.push(Piece::Literal(literal));
        }

        eyre::ensure!(
            conversions > 0,
            "label format {:?} has no conversion",
            spec
        );
        Ok(Self {
            spec: spec.to_string(),
            pieces,
        })
    }

    pub fn format(&self, value: f64) -> String {
        let mut label = String::new();
        for piece in self.pieces.iter() {
            match piece {
                Piece::Literal(text) => label.push_str(text),
                Piece::Fixed(precision) => {
                    label.push_str(&format!("{:.*}", *precision, value))
                }
                Piece::Integer => {
                    label.push_str(&format!("{}", value.trunc() as i64))
                }
            }
        }
        label
    }
}

impl fmt::Display for LabelFmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.spec)
    }
}

pub struct PlotFmt;

impl PlotFmt {
    // first two entries are the uniform and hot-spot colors
    const PALETTE: [&'static str; 6] = [
        "#40826D", "#D9534F", "#3498DB", "#F0AD4E", "#8E44AD", "#7F8C8D",
    ];

    /// Color of the `index`-th series; wraps around the palette.
    pub fn color(index: usize) -> &'static str {
        Self::PALETTE[index % Self::PALETTE.len()]
    }

    pub fn colors(count: usize) -> Vec<&'static str> {
        (0..count).map(Self::color).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn label_formats() {
        let fmt = LabelFmt::parse("%.0f").unwrap();
        assert_eq!(fmt.format(527.2), "527");
        assert_eq!(fmt.format(326.4), "326");

        let fmt = LabelFmt::parse("%.1f%%").unwrap();
        assert_eq!(fmt.format(1.79), "1.8%");
        assert_eq!(fmt.format(87.40), "87.4%");
        assert_eq!(fmt.format(0.0), "0.0%");

        let fmt = LabelFmt::parse("%.1f ms").unwrap();
        assert_eq!(fmt.format(41.26), "41.3 ms");
        assert_eq!(fmt.format(7.0), "7.0 ms");

        let fmt = LabelFmt::parse("%d tps").unwrap();
        assert_eq!(fmt.format(527.9), "527 tps");

        let fmt = LabelFmt::parse("~%f").unwrap();
        assert_eq!(fmt.format(1.5), "~1.500000");
        assert_eq!(fmt.to_string(), "~%f");
    }

    #[test]
    fn unsupported_label_formats() {
        assert!(LabelFmt::parse("").is_err());
        assert!(LabelFmt::parse("tps").is_err());
        assert!(LabelFmt::parse("100%%").is_err());
        assert!(LabelFmt::parse("%s").is_err());
        assert!(LabelFmt::parse("%.f").is_err());
        assert!(LabelFmt::parse("%.2e").is_err());
        assert!(LabelFmt::parse("%").is_err());
    }

    #[test]
    fn palette_wraps() {
        assert_eq!(PlotFmt::color(0), "#40826D");
        assert_eq!(PlotFmt::color(1), "#D9534F");
        assert_eq!(PlotFmt::color(6), PlotFmt::color(0));
        assert_eq!(PlotFmt::colors(2), vec!["#40826D", "#D9534F"]);
    }

    // The label depends only on the format: the same value always gives the
    // same label, and the number of decimals never depends on the magnitude.
    #[quickcheck]
    fn fixed_precision_is_independent_of_magnitude(
        value: u32,
        scale: u8,
    ) -> bool {
        let value = value as f64 / 10f64.powi(scale as i32 % 6);
        let fmt = LabelFmt::parse("%.1f%%").unwrap();
        let label = fmt.format(value);
        let decimals = label
            .trim_end_matches('%')
            .split('.')
            .nth(1)
            .map(|decimals| decimals.len());
        label == fmt.format(value)
            && label.ends_with('%')
            && decimals == Some(1)
    }
}
