use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::errs::AggregationError;

/// Summary statistic computed over the per-sample values of a record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum StatKind {
    #[default]
    Mean,
    Median,
    Min,
    Max,
}

impl StatKind {
    pub fn parse(raw: &str) -> Result<Self, AggregationError> {
        match raw {
            "mean" | "average" => Ok(Self::Mean),
            "median" => Ok(Self::Median),
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            _ => Err(AggregationError::UnknownStatKind(raw.to_owned())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::Median => "median",
            Self::Min => "min",
            Self::Max => "max",
        }
    }

    /// Returns `None` when `values` is empty. May reorder `values`.
    pub fn compute(&self, values: &mut [f64]) -> Option<f64> {
        match self {
            Self::Mean => mean(values),
            Self::Median => median(values),
            Self::Min => min(values),
            Self::Max => max(values),
        }
    }
}

impl Display for StatKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for StatKind {
    type Err = AggregationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Selection median: the element that lands at index `n / 2` once the values
/// are ordered. For an even number of values this is the upper of the two
/// middle elements, they are not averaged.
pub fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mid = values.len() / 2;
    let (_, nth, _) = values.select_nth_unstable_by(mid, |a, b| a.total_cmp(b));
    Some(*nth)
}

pub fn min(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

pub fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

/// Formats `x` the way a default C++ output stream prints a double: six
/// significant digits, trailing zeros removed, scientific notation for very
/// small or large magnitudes (`15`, `4.5`, `0.333333`, `1.23457e+06`).
pub fn format_float(x: f64) -> String {
    const SIG_DIGITS: i32 = 6;

    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        let repr = if x.is_sign_negative() { "-inf" } else { "inf" };
        return repr.to_string();
    }
    if x == 0f64 {
        let repr = if x.is_sign_negative() { "-0" } else { "0" };
        return repr.to_string();
    }

    // rounding to the significant digits first decides the exponent, e.g.
    // 999999.7 is printed as 1e+06
    let scientific = format!("{:.*e}", (SIG_DIGITS - 1) as usize, x);
    let Some((mantissa, exponent)) = scientific
        .split_once('e')
        .and_then(|(m, e)| e.parse::<i32>().ok().map(|e| (m, e)))
    else {
        return scientific;
    };

    if exponent < -4 || exponent >= SIG_DIGITS {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_fraction(mantissa), exponent.abs())
    } else {
        let decimals = (SIG_DIGITS - 1 - exponent) as usize;
        let fixed = format!("{x:.decimals$}");
        trim_fraction(&fixed).to_string()
    }
}

#[cfg(test)]
mod stats_tests {
    use assert_approx_eq::assert_approx_eq;

    use super::{format_float, max, mean, median, min, StatKind};
    use crate::errs::AggregationError;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[10f64, 20f64]), Some(15f64));
        assert_approx_eq!(mean(&[1f64, 2f64, 2f64]).unwrap(), 5f64 / 3f64);
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_median_takes_index_half_of_ordered_values() {
        let mut xs = vec![4f64, 1f64, 3f64, 2f64];
        assert_eq!(median(&mut xs), Some(3f64));
        let mut xs = vec![20f64, 10f64];
        assert_eq!(median(&mut xs), Some(20f64));
        let mut xs = vec![8f64, 3f64, 4f64];
        assert_eq!(median(&mut xs), Some(4f64));
        let mut xs = vec![7f64];
        assert_eq!(median(&mut xs), Some(7f64));
        let mut xs: Vec<f64> = Vec::new();
        assert_eq!(median(&mut xs), None);
    }

    #[test]
    fn test_min_max() {
        let xs = [3f64, -1.5f64, 12f64, 0f64];
        assert_eq!(min(&xs), Some(-1.5f64));
        assert_eq!(max(&xs), Some(12f64));
        assert!(xs.contains(&min(&xs).unwrap()));
        assert!(xs.contains(&max(&xs).unwrap()));
        assert_eq!(min(&[]), None);
        assert_eq!(max(&[]), None);
    }

    #[test]
    fn test_stat_kind_dispatch() {
        let values = [10f64, 20f64, 30f64, 40f64];
        let expected = [
            (StatKind::Mean, 25f64),
            (StatKind::Median, 30f64),
            (StatKind::Min, 10f64),
            (StatKind::Max, 40f64),
        ];
        for (kind, exp) in expected {
            let mut xs = values.to_vec();
            assert_eq!(kind.compute(&mut xs), Some(exp), "{kind}");
        }
    }

    #[test]
    fn test_stat_kind_parse() {
        assert_eq!(StatKind::parse("median").unwrap(), StatKind::Median);
        assert_eq!("max".parse::<StatKind>().unwrap(), StatKind::Max);
        assert_eq!(StatKind::default(), StatKind::Mean);
        for kind in
            [StatKind::Mean, StatKind::Median, StatKind::Min, StatKind::Max]
        {
            assert_eq!(StatKind::parse(kind.name()).unwrap(), kind);
        }
        assert!(matches!(
            StatKind::parse("mode"),
            Err(AggregationError::UnknownStatKind(raw)) if raw == "mode"
        ));
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(15f64), "15");
        assert_eq!(format_float(4.5f64), "4.5");
        assert_eq!(format_float(1f64 / 3f64), "0.333333");
        assert_eq!(format_float(2f64 / 3f64), "0.666667");
        assert_eq!(format_float(-12.25f64), "-12.25");
        assert_eq!(format_float(0f64), "0");
        assert_eq!(format_float(100000f64), "100000");
        assert_eq!(format_float(1234567f64), "1.23457e+06");
        assert_eq!(format_float(999999.7f64), "1e+06");
        assert_eq!(format_float(0.0001f64), "0.0001");
        assert_eq!(format_float(0.00001f64), "1e-05");
        assert_eq!(format_float(f64::NAN), "nan");
        assert_eq!(format_float(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn test_formatted_values_parse_back() {
        for x in [15f64, 4.5f64, 1f64 / 3f64, 1234567f64, 0.00001f64] {
            let parsed = format_float(x).parse::<f64>().unwrap();
            assert_approx_eq!(parsed, x, x.abs() * 1e-5);
        }
    }
}
