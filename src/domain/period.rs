// Period keys for incidence series
use std::fmt;

/// Time resolution of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Annual,
    Monthly,
}

/// Ordered key of one sample: a bare year, or a year-month pair.
///
/// A series always carries a single key shape; mixed payloads are rejected
/// at the input boundary before they reach any chart logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Period {
    Year(i32),
    Month { year: i32, month: u32 },
}

impl Period {
    pub fn granularity(&self) -> Granularity {
        match self {
            Period::Year(_) => Granularity::Annual,
            Period::Month { .. } => Granularity::Monthly,
        }
    }

    /// Axis/export label: `2020` for annual keys, `2020-05` for monthly keys.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Year(year) => write!(f, "{}", year),
            Period::Month { year, month } => write!(f, "{:04}-{:02}", year, month),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(Period::Year(2020).label(), "2020");
        assert_eq!(Period::Month { year: 2020, month: 5 }.label(), "2020-05");
        assert_eq!(Period::Month { year: 2021, month: 12 }.label(), "2021-12");
    }

    #[test]
    fn test_ordering() {
        assert!(Period::Year(2020) < Period::Year(2021));
        assert!(
            Period::Month { year: 2020, month: 12 } < Period::Month { year: 2021, month: 1 }
        );
        assert!(
            Period::Month { year: 2020, month: 4 } < Period::Month { year: 2020, month: 5 }
        );
    }

    #[test]
    fn test_granularity() {
        assert_eq!(Period::Year(1999).granularity(), Granularity::Annual);
        assert_eq!(
            Period::Month { year: 1999, month: 1 }.granularity(),
            Granularity::Monthly
        );
    }
}
