//! Aggregate statistics over a pool snapshot.

use serde::Serialize;
use std::io::{self, Write};

use super::Burrow;

/// Minimum width of each column in the tabular rendering.
const MIN_CELL_WIDTH: usize = 15;

/// Summary of the pool built from one status snapshot.
///
/// Only strictly positive volumes take part in the min/max tracking, so a burrow
/// whose volume is exactly zero is never named as the smallest one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    pub total_depth: f64,
    pub num_available: usize,
    pub volume_min: f64,
    pub volume_min_name: Option<String>,
    pub volume_max: f64,
    pub volume_max_name: Option<String>,
}

impl Report {
    /// Builds the summary for a set of snapshots in any order.
    pub fn from_burrows<'a>(burrows: impl IntoIterator<Item = &'a Burrow>) -> Self {
        let mut report = Self::default();

        for burrow in burrows {
            report.total_depth += burrow.depth;

            if burrow.is_available() {
                report.num_available += 1;
            }

            let volume = burrow.volume();
            if volume > 0.0 && (report.volume_min_name.is_none() || volume < report.volume_min) {
                report.volume_min = volume;
                report.volume_min_name = Some(burrow.name.clone());
            }

            if report.volume_max < volume {
                report.volume_max = volume;
                report.volume_max_name = Some(burrow.name.clone());
            }
        }

        report
    }

    /// Renders the report as right-aligned, dot-padded rows:
    ///
    /// ```text
    /// .....TotalDepth|.........10.234|
    /// ...NumAvailable|............145|
    /// ..VolumeMinName|.......Burrow 3|
    /// ..VolumeMaxName|.....Burrow 123|
    /// ```
    ///
    /// Each column is at least 15 characters wide and widens to fit its longest
    /// cell, so long burrow names keep the separators aligned.
    pub fn write_table<W: Write>(&self, mut w: W) -> io::Result<()> {
        let rows = [
            ("TotalDepth", format!("{:.3}", self.total_depth)),
            ("NumAvailable", self.num_available.to_string()),
            ("VolumeMinName", self.volume_min_name.clone().unwrap_or_default()),
            ("VolumeMaxName", self.volume_max_name.clone().unwrap_or_default()),
        ];

        let label_width = column_width(rows.iter().map(|(label, _)| *label));
        let value_width = column_width(rows.iter().map(|(_, value)| value.as_str()));

        for (label, value) in rows {
            writeln!(w, "{label:.>label_width$}|{value:.>value_width$}|")?;
        }
        w.flush()
    }
}

fn column_width<'a>(cells: impl Iterator<Item = &'a str>) -> usize {
    cells
        .map(|cell| cell.chars().count())
        .fold(MIN_CELL_WIDTH, usize::max)
}
