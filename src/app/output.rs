//! Table rendering.

use std::time::Duration;

use colored::Colorize;

use crate::catalog::{City, Continent, Country, Region, ServerRecord};
use crate::config::SNAPSHOT_STALE_AFTER_DAYS;

const SECS_PER_DAY: u64 = 24 * 60 * 60;

/// Lays out `rows` under `headers` with columns padded to their widest cell.
///
/// The first returned line is the header. Trailing padding is trimmed.
pub(crate) fn render_table(headers: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| -> String {
        let padded: Vec<String> = cells
            .into_iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect();
        padded.join("  ").trim_end().to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(line(headers.to_vec()));
    for row in rows {
        lines.push(line(row.iter().map(String::as_str).collect()));
    }
    lines
}

/// Prints a table, header in bold.
pub(crate) fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let mut lines = render_table(headers, rows).into_iter();
    if let Some(header) = lines.next() {
        println!("{}", header.bold());
    }
    for line in lines {
        println!("{}", line);
    }
}

/// Status line for a snapshot of the given age, `None` while it is fresh.
pub(crate) fn snapshot_status(age: Duration) -> Option<String> {
    let days = age.as_secs() / SECS_PER_DAY;
    if days < SNAPSHOT_STALE_AFTER_DAYS {
        return None;
    }
    Some(format!(
        "Server catalog is {} days old; run `vanish update --scope catalog` to refresh it",
        days
    ))
}

pub(crate) fn format_rtt(rtt: Option<f64>) -> String {
    match rtt {
        Some(ms) => format!("{:.1} ms", ms),
        None => "-".to_string(),
    }
}

pub(crate) fn server_rows(servers: &[ServerRecord], with_rtt: bool) -> Vec<Vec<String>> {
    servers
        .iter()
        .map(|s| {
            let mut row = vec![
                s.hostname.clone(),
                s.ip.clone(),
                s.city.clone(),
                s.region.clone(),
                s.country_code.clone(),
                s.continent_code.clone(),
            ];
            if with_rtt {
                row.push(format_rtt(s.rtt));
            }
            row
        })
        .collect()
}

pub(crate) fn continent_rows(continents: &[Continent]) -> Vec<Vec<String>> {
    continents
        .iter()
        .map(|c| vec![c.code.clone(), c.name.clone()])
        .collect()
}

pub(crate) fn country_rows(countries: &[Country]) -> Vec<Vec<String>> {
    countries
        .iter()
        .map(|c| vec![c.code.clone(), c.name.clone(), c.continent.clone()])
        .collect()
}

pub(crate) fn region_rows(regions: &[Region]) -> Vec<Vec<String>> {
    regions
        .iter()
        .map(|r| vec![r.code.clone(), r.name.clone(), r.country.clone()])
        .collect()
}

pub(crate) fn city_rows(cities: &[City]) -> Vec<Vec<String>> {
    cities
        .iter()
        .map(|c| vec![c.name.clone(), c.country.clone(), c.continent.clone()])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_table_aligns_columns() {
        let rows = vec![
            vec!["EU".to_string(), "Europe".to_string()],
            vec!["NA".to_string(), "North America".to_string()],
        ];
        let lines = render_table(&["CODE", "NAME"], &rows);
        assert_eq!(
            lines,
            vec!["CODE  NAME", "EU    Europe", "NA    North America"]
        );
    }

    #[test]
    fn test_render_table_empty_rows() {
        let lines = render_table(&["NAME", "COUNTRY"], &[]);
        assert_eq!(lines, vec!["NAME  COUNTRY"]);
    }

    #[test]
    fn test_render_table_counts_chars_not_bytes() {
        let rows = vec![
            vec!["Zürich".to_string(), "CH".to_string()],
            vec!["Bern".to_string(), "CH".to_string()],
        ];
        let lines = render_table(&["CITY", "CC"], &rows);
        assert_eq!(lines[1], "Zürich  CH");
        assert_eq!(lines[2], "Bern    CH");
    }

    #[test]
    fn test_empty_region_cell_keeps_alignment() {
        let rows = vec![
            vec!["lon-a01".to_string(), String::new(), "UK".to_string()],
            vec!["nyc-a01".to_string(), "New York".to_string(), "US".to_string()],
        ];
        let lines = render_table(&["HOST", "REGION", "CC"], &rows);
        assert_eq!(lines[1], "lon-a01            UK");
        assert_eq!(lines[2], "nyc-a01  New York  US");
    }

    #[test]
    fn test_snapshot_status() {
        assert_eq!(snapshot_status(Duration::from_secs(60)), None);
        assert_eq!(snapshot_status(Duration::from_secs(6 * SECS_PER_DAY)), None);
        let status = snapshot_status(Duration::from_secs(9 * SECS_PER_DAY + 5)).unwrap();
        assert!(status.starts_with("Server catalog is 9 days old"));
        assert!(status.contains("vanish update --scope catalog"));
    }

    #[test]
    fn test_format_rtt() {
        assert_eq!(format_rtt(Some(12.345)), "12.3 ms");
        assert_eq!(format_rtt(None), "-");
    }
}
