//! Demand-factor tables for load estimation.
//!
//! Table 6.3 gives the active-power demand factor Кр for supply networks up
//! to 1000 V, keyed by the exact effective equipment count. Table 6.4 gives
//! Кр at the low-voltage busbars of workshop transformers, keyed by a count
//! range. Both are scanned linearly in row order; the first matching row
//! wins, which preserves the deliberate overlaps at the range boundaries.
//!
//! Columns are keyed by the group utilization rate rounded to one decimal.
//! The keys are stored as integer hundredths so the lookup never compares
//! floats for equality; a miss yields a fixed default, not an error.

/// Row of the exact-count table: matches one effective equipment count.
#[derive(Debug, Clone, Copy)]
pub struct ExactRow {
    pub count: u32,
    pub coefficients: &'static [(u32, f64)],
}

/// Row of the range table: matches `start ≤ count ≤ end`, with `end: None`
/// meaning unbounded.
#[derive(Debug, Clone, Copy)]
pub struct RangeRow {
    pub start: u32,
    pub end: Option<u32>,
    pub coefficients: &'static [(u32, f64)],
}

/// Returned when no feeder-table row matches.
pub const FEEDER_DEFAULT: f64 = 1.25;

/// Returned when no busbar-table row matches.
pub const BUSBAR_DEFAULT: f64 = 0.7;

/// Table 6.3 — demand factors Кр for networks up to 1000 V.
pub static FEEDER_TABLE: &[ExactRow] = &[
    ExactRow {
        count: 1,
        coefficients: &[
            (10, 8.00),
            (15, 5.33),
            (20, 4.00),
            (30, 2.67),
            (40, 2.00),
            (50, 1.60),
            (60, 1.33),
            (70, 1.14),
            (80, 1.0),
        ],
    },
    ExactRow {
        count: 2,
        coefficients: &[
            (10, 6.22),
            (15, 4.33),
            (20, 3.39),
            (30, 2.45),
            (40, 1.98),
            (50, 1.60),
            (60, 1.33),
            (70, 1.14),
            (80, 1.0),
        ],
    },
    ExactRow {
        count: 3,
        coefficients: &[
            (10, 4.06),
            (15, 2.89),
            (20, 2.31),
            (30, 1.74),
            (40, 1.45),
            (50, 1.34),
            (60, 1.22),
            (70, 1.14),
            (80, 1.0),
        ],
    },
    ExactRow {
        count: 4,
        coefficients: &[
            (10, 3.23),
            (15, 2.29),
            (20, 1.83),
            (30, 1.39),
            (40, 1.21),
            (50, 1.13),
            (60, 1.08),
            (70, 1.03),
            (80, 1.0),
        ],
    },
    ExactRow {
        count: 5,
        coefficients: &[
            (10, 2.84),
            (15, 2.06),
            (20, 1.65),
            (30, 1.31),
            (40, 1.15),
            (50, 1.10),
            (60, 1.05),
            (70, 1.01),
            (80, 1.0),
        ],
    },
    ExactRow {
        count: 6,
        coefficients: &[
            (10, 2.64),
            (15, 1.96),
            (20, 1.62),
            (30, 1.28),
            (40, 1.14),
            (50, 1.13),
            (60, 1.06),
            (70, 1.01),
            (80, 1.0),
        ],
    },
    ExactRow {
        count: 7,
        coefficients: &[
            (10, 2.49),
            (15, 1.86),
            (20, 1.54),
            (30, 1.23),
            (40, 1.12),
            (50, 1.10),
            (60, 1.04),
            (70, 1.0),
            (80, 1.0),
        ],
    },
    ExactRow {
        count: 8,
        coefficients: &[
            (10, 2.37),
            (15, 1.78),
            (20, 1.48),
            (30, 1.19),
            (40, 1.10),
            (50, 1.08),
            (60, 1.02),
            (70, 1.0),
            (80, 1.0),
        ],
    },
    ExactRow {
        count: 9,
        coefficients: &[
            (10, 2.27),
            (15, 1.71),
            (20, 1.43),
            (30, 1.16),
            (40, 1.09),
            (50, 1.07),
            (60, 1.01),
            (70, 1.0),
            (80, 1.0),
        ],
    },
    ExactRow {
        count: 10,
        coefficients: &[
            (10, 2.18),
            (15, 1.65),
            (20, 1.39),
            (30, 1.13),
            (40, 1.07),
            (50, 1.05),
            (60, 1.0),
            (70, 1.0),
            (80, 1.0),
        ],
    },
    ExactRow {
        count: 12,
        coefficients: &[
            (10, 2.04),
            (15, 1.56),
            (20, 1.32),
            (30, 1.08),
            (40, 1.05),
            (50, 1.03),
            (60, 1.0),
            (70, 1.0),
            (80, 1.0),
        ],
    },
    ExactRow {
        count: 14,
        coefficients: &[
            (10, 1.94),
            (15, 1.49),
            (20, 1.27),
            (30, 1.05),
            (40, 1.02),
            (50, 1.0),
            (60, 1.0),
            (70, 1.0),
            (80, 1.0),
        ],
    },
    ExactRow {
        count: 16,
        coefficients: &[
            (10, 1.85),
            (15, 1.43),
            (20, 1.23),
            (30, 1.02),
            (40, 1.0),
            (50, 1.0),
            (60, 1.0),
            (70, 1.0),
            (80, 1.0),
        ],
    },
    ExactRow {
        count: 18,
        coefficients: &[
            (10, 1.78),
            (15, 1.39),
            (20, 1.19),
            (30, 1.0),
            (40, 1.0),
            (50, 1.0),
            (60, 1.0),
            (70, 1.0),
            (80, 1.0),
        ],
    },
    ExactRow {
        count: 20,
        coefficients: &[
            (10, 1.72),
            (15, 1.35),
            (20, 1.16),
            (30, 1.0),
            (40, 1.0),
            (50, 1.0),
            (60, 1.0),
            (70, 1.0),
            (80, 1.0),
        ],
    },
    ExactRow {
        count: 25,
        coefficients: &[
            (10, 1.60),
            (15, 1.27),
            (20, 1.10),
            (30, 1.0),
            (40, 1.0),
            (50, 1.0),
            (60, 1.0),
            (70, 1.0),
            (80, 1.0),
        ],
    },
    ExactRow {
        count: 30,
        coefficients: &[
            (10, 1.51),
            (15, 1.21),
            (20, 1.05),
            (30, 1.0),
            (40, 1.0),
            (50, 1.0),
            (60, 1.0),
            (70, 1.0),
            (80, 1.0),
        ],
    },
    ExactRow {
        count: 35,
        coefficients: &[
            (10, 1.44),
            (15, 1.16),
            (20, 1.0),
            (30, 1.0),
            (40, 1.0),
            (50, 1.0),
            (60, 1.0),
            (70, 1.0),
            (80, 1.0),
        ],
    },
    ExactRow {
        count: 40,
        coefficients: &[
            (10, 1.40),
            (15, 1.13),
            (20, 1.0),
            (30, 1.0),
            (40, 1.0),
            (50, 1.0),
            (60, 1.0),
            (70, 1.0),
            (80, 1.0),
        ],
    },
    ExactRow {
        count: 50,
        coefficients: &[
            (10, 1.30),
            (15, 1.07),
            (20, 1.0),
            (30, 1.0),
            (40, 1.0),
            (50, 1.0),
            (60, 1.0),
            (70, 1.0),
            (80, 1.0),
        ],
    },
    ExactRow {
        count: 60,
        coefficients: &[
            (10, 1.25),
            (15, 1.03),
            (20, 1.0),
            (30, 1.0),
            (40, 1.0),
            (50, 1.0),
            (60, 1.0),
            (70, 1.0),
            (80, 1.0),
        ],
    },
    ExactRow {
        count: 80,
        coefficients: &[
            (10, 1.16),
            (15, 1.0),
            (20, 1.0),
            (30, 1.0),
            (40, 1.0),
            (50, 1.0),
            (60, 1.0),
            (70, 1.0),
            (80, 1.0),
        ],
    },
    ExactRow {
        count: 100,
        coefficients: &[
            (10, 1.0),
            (15, 1.0),
            (20, 1.0),
            (30, 1.0),
            (40, 1.0),
            (50, 1.0),
            (60, 1.0),
            (70, 1.0),
            (80, 1.0),
        ],
    },
];

/// Table 6.4 — demand factors Кр at low-voltage transformer busbars and
/// trunk busways.
pub static BUSBAR_TABLE: &[RangeRow] = &[
    RangeRow {
        start: 1,
        end: Some(1),
        coefficients: &[
            (10, 8.00),
            (15, 5.33),
            (20, 4.00),
            (30, 2.67),
            (40, 2.00),
            (50, 1.60),
            (60, 1.33),
            (70, 1.14),
        ],
    },
    RangeRow {
        start: 2,
        end: Some(2),
        coefficients: &[
            (10, 5.01),
            (15, 3.44),
            (20, 2.69),
            (30, 1.90),
            (40, 1.52),
            (50, 1.24),
            (60, 1.11),
            (70, 1.0),
        ],
    },
    RangeRow {
        start: 3,
        end: Some(3),
        coefficients: &[
            (10, 2.40),
            (15, 2.17),
            (20, 1.80),
            (30, 1.42),
            (40, 1.23),
            (50, 1.14),
            (60, 1.08),
            (70, 1.0),
        ],
    },
    RangeRow {
        start: 4,
        end: Some(4),
        coefficients: &[
            (10, 2.28),
            (15, 1.73),
            (20, 1.46),
            (30, 1.19),
            (40, 1.06),
            (50, 1.04),
            (60, 1.0),
            (70, 0.97),
        ],
    },
    RangeRow {
        start: 5,
        end: Some(5),
        coefficients: &[
            (10, 1.31),
            (15, 1.12),
            (20, 1.02),
            (30, 1.0),
            (40, 0.98),
            (50, 0.96),
            (60, 0.94),
            (70, 0.93),
        ],
    },
    RangeRow {
        start: 6,
        end: Some(8),
        coefficients: &[
            (10, 1.20),
            (15, 1.0),
            (20, 0.96),
            (30, 0.95),
            (40, 0.94),
            (50, 0.93),
            (60, 0.92),
            (70, 0.91),
        ],
    },
    RangeRow {
        start: 9,
        end: Some(10),
        coefficients: &[
            (10, 1.10),
            (15, 0.97),
            (20, 0.91),
            (30, 0.90),
            (40, 0.90),
            (50, 0.90),
            (60, 0.90),
            (70, 0.90),
        ],
    },
    RangeRow {
        start: 10,
        end: Some(25),
        coefficients: &[
            (10, 0.80),
            (15, 0.80),
            (20, 0.80),
            (30, 0.85),
            (40, 0.85),
            (50, 0.85),
            (60, 0.90),
            (70, 0.90),
        ],
    },
    RangeRow {
        start: 25,
        end: Some(50),
        coefficients: &[
            (10, 0.75),
            (15, 0.75),
            (20, 0.75),
            (30, 0.75),
            (40, 0.75),
            (50, 0.80),
            (60, 0.85),
            (70, 0.85),
        ],
    },
    RangeRow {
        start: 50,
        end: None,
        coefficients: &[
            (10, 0.65),
            (15, 0.65),
            (20, 0.65),
            (30, 0.70),
            (40, 0.70),
            (50, 0.75),
            (60, 0.80),
            (70, 0.80),
        ],
    },
];

fn rate_key(utilization_rate: f64) -> u32 {
    (utilization_rate * 100.0).round() as u32
}

fn column(coefficients: &[(u32, f64)], key: u32) -> Option<f64> {
    coefficients
        .iter()
        .find(|(rate, _)| *rate == key)
        .map(|(_, value)| *value)
}

/// Look up Кр in an exact-count table. `utilization_rate` must already be
/// rounded to one decimal by the caller.
pub fn find_coefficient(
    count: u32,
    utilization_rate: f64,
    table: &[ExactRow],
    default: f64,
) -> f64 {
    let key = rate_key(utilization_rate);
    for row in table {
        if row.count == count {
            if let Some(value) = column(row.coefficients, key) {
                return value;
            }
        }
    }
    default
}

/// Look up Кр in a range-keyed table. First matching row wins.
pub fn find_coefficient_range(
    count: u32,
    utilization_rate: f64,
    table: &[RangeRow],
    default: f64,
) -> f64 {
    let key = rate_key(utilization_rate);
    for row in table {
        if count >= row.start && row.end.map_or(true, |end| count <= end) {
            if let Some(value) = column(row.coefficients, key) {
                return value;
            }
        }
    }
    default
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 0.1, 8.00)]
    #[case(1, 0.8, 1.0)]
    #[case(4, 0.3, 1.39)]
    #[case(14, 0.2, 1.27)]
    #[case(100, 0.1, 1.0)]
    fn feeder_table_spot_checks(#[case] count: u32, #[case] rate: f64, #[case] expected: f64) {
        assert_eq!(
            find_coefficient(count, rate, FEEDER_TABLE, FEEDER_DEFAULT),
            expected
        );
    }

    #[rstest]
    #[case(99, 0.1)] // no row for this count
    #[case(11, 0.2)] // gap between rows 10 and 12
    #[case(1, 0.9)] // count matches but no such column
    fn feeder_misses_fall_back_to_default(#[case] count: u32, #[case] rate: f64) {
        assert_eq!(
            find_coefficient(count, rate, FEEDER_TABLE, FEEDER_DEFAULT),
            FEEDER_DEFAULT
        );
    }

    #[rstest]
    #[case(6, 0.1, 1.20)]
    #[case(7, 0.1, 1.20)]
    #[case(8, 0.1, 1.20)]
    fn busbar_range_rows_cover_spans(#[case] count: u32, #[case] rate: f64, #[case] expected: f64) {
        assert_eq!(
            find_coefficient_range(count, rate, BUSBAR_TABLE, BUSBAR_DEFAULT),
            expected
        );
    }

    #[test]
    fn busbar_open_ended_row_matches_any_large_count() {
        assert_eq!(
            find_coefficient_range(51, 0.1, BUSBAR_TABLE, BUSBAR_DEFAULT),
            0.65
        );
        assert_eq!(
            find_coefficient_range(10_000, 0.3, BUSBAR_TABLE, BUSBAR_DEFAULT),
            0.70
        );
    }

    #[test]
    fn overlapping_ranges_resolve_to_first_row() {
        // 10 is covered by both the 9-10 and 10-25 rows; 25 by 10-25 and
        // 25-50; 50 by 25-50 and the open row. Scan order decides.
        assert_eq!(
            find_coefficient_range(10, 0.1, BUSBAR_TABLE, BUSBAR_DEFAULT),
            1.10
        );
        assert_eq!(
            find_coefficient_range(25, 0.1, BUSBAR_TABLE, BUSBAR_DEFAULT),
            0.80
        );
        assert_eq!(
            find_coefficient_range(50, 0.1, BUSBAR_TABLE, BUSBAR_DEFAULT),
            0.75
        );
    }

    #[test]
    fn busbar_miss_falls_back_to_default() {
        assert_eq!(
            find_coefficient_range(0, 0.1, BUSBAR_TABLE, BUSBAR_DEFAULT),
            BUSBAR_DEFAULT
        );
        assert_eq!(
            find_coefficient_range(5, 0.8, BUSBAR_TABLE, BUSBAR_DEFAULT),
            BUSBAR_DEFAULT
        );
    }
}
