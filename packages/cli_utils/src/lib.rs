#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared CLI utilities for the heat retrofit toolchain.
//!
//! [`init_logger`] sets up `pretty_env_logger` from `RUST_LOG`. The
//! remaining helpers format dollar amounts, signed deltas, and alignment
//! matrices for terminal output.

use heat_retrofit_impact_models::{AlignmentMatrix, Era};
use heat_retrofit_reference_models::Dimension;

/// Width of the dimension column in [`format_alignment_matrix`].
const DIMENSION_COLUMN_WIDTH: usize = 16;
/// Width of each era column in [`format_alignment_matrix`].
const ERA_COLUMN_WIDTH: usize = 12;

/// Initializes the global logger from `RUST_LOG`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logger() {
    let logger = pretty_env_logger::formatted_builder()
        .parse_env("RUST_LOG")
        .build();
    let level = logger.filter();

    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(level);
    }
}

/// Formats a dollar amount with thousands separators, e.g. `$12,443,400`.
#[must_use]
pub fn format_usd(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Formats a signed delta with an explicit sign, e.g. `-26°F` or `+12%`.
#[must_use]
pub fn format_delta(value: i32, unit: &str) -> String {
    if value > 0 {
        format!("+{value}{unit}")
    } else {
        format!("{value}{unit}")
    }
}

/// Renders `matrix` as a text table with one row per dimension and one
/// column per era.
#[must_use]
pub fn format_alignment_matrix(matrix: &AlignmentMatrix) -> String {
    let header: String = Era::all()
        .iter()
        .map(|era| format!("{:<ERA_COLUMN_WIDTH$}", era.label()))
        .collect();
    let mut out = format!("{:<DIMENSION_COLUMN_WIDTH$}{header}\n", "");

    for dimension in Dimension::all() {
        let cells: String = matrix
            .row(*dimension)
            .iter()
            .map(|status| format!("{:<ERA_COLUMN_WIDTH$}", status.label()))
            .collect();
        out.push_str(&format!(
            "{:<DIMENSION_COLUMN_WIDTH$}{cells}\n",
            dimension.to_string()
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use heat_retrofit_impact_models::AlignmentStatus;

    #[test]
    fn usd_groups_thousands() {
        assert_eq!(format_usd(0), "$0");
        assert_eq!(format_usd(999), "$999");
        assert_eq!(format_usd(1000), "$1,000");
        assert_eq!(format_usd(12_443_400), "$12,443,400");
        assert_eq!(format_usd(100_000), "$100,000");
    }

    #[test]
    fn delta_has_explicit_sign() {
        assert_eq!(format_delta(-26, "°F"), "-26°F");
        assert_eq!(format_delta(12, "%"), "+12%");
        assert_eq!(format_delta(0, "%"), "0%");
    }

    #[test]
    fn matrix_has_header_and_one_line_per_dimension() {
        let matrix = AlignmentMatrix {
            statuses: [[AlignmentStatus::Aligned; 4]; 3],
        };
        let text = format_alignment_matrix(&matrix);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 1 + Dimension::all().len());
        assert!(lines[0].contains("Today"));
        assert!(lines[1].starts_with("thermal"));
        assert_eq!(lines[3].matches("Aligned").count(), 4);
    }

    #[test]
    fn matrix_cells_follow_era_order() {
        use AlignmentStatus::{Aligned, Misaligned, Strained};

        let matrix = AlignmentMatrix {
            statuses: [[Aligned, Strained, Misaligned, Strained]; 3],
        };
        let text = format_alignment_matrix(&matrix);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0].trim_end(),
            format!("{:16}{:12}{:12}{:12}{}", "", "Design era", "+40 years", "Today", "2050s")
        );
        assert_eq!(
            lines[1].trim_end(),
            format!("{:16}{:12}{:12}{:12}{}", "thermal", "Aligned", "Strained", "Misaligned", "Strained")
        );
    }

    #[test]
    fn init_logger_twice_is_harmless() {
        init_logger();
        init_logger();
    }
}
