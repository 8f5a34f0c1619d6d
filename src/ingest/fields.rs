use std::collections::BTreeMap;

pub const DATE: &str = "Date";
pub const TIME: &str = "Time";
pub const SATS: &str = "Sats";
pub const GPS: &str = "GPS";
pub const GPS_ALT: &str = "GPS Alt(m)";
pub const VARIO_ALT: &str = "Vario Alt(m)";

pub const REQUIRED: [&str; 4] = [DATE, TIME, SATS, GPS];

/// Give repeated or ambiguous header cells their canonical names.
///
/// The header is scanned right to left; each cell listed in `mappings`
/// takes the last unused name of its list. Cells without a mapping, or
/// whose list has run out, keep their text.
pub fn remap_fieldnames(header: &[String], mappings: &BTreeMap<String, Vec<String>>) -> Vec<String> {
    let mut remaining = mappings.clone();
    let mut names: Vec<String> = header
        .iter()
        .rev()
        .map(|field| {
            remaining
                .get_mut(field)
                .and_then(|candidates| candidates.pop())
                .unwrap_or_else(|| field.clone())
        })
        .collect();
    names.reverse();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use rstest::rstest;

    fn header(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[rstest]
    #[case(&["Date", "Time", "Alt(m)", "Sats"], &["Date", "Time", "GPS Alt(m)", "Sats"])]
    #[case(
        &["Date", "Alt(m)", "GPS", "Alt(m)"],
        &["Date", "Vario Alt(m)", "GPS", "GPS Alt(m)"]
    )]
    #[case(
        &["Alt(m)", "Alt(m)", "Alt(m)"],
        &["Alt(m)", "Vario Alt(m)", "GPS Alt(m)"]
    )]
    #[case(&["Date", "Time"], &["Date", "Time"])]
    fn remaps_with_default_mappings(#[case] raw: &[&str], #[case] expected: &[&str]) {
        let settings = Settings::default();
        assert_eq!(remap_fieldnames(&header(raw), &settings.field_mappings), header(expected));
    }

    #[test]
    fn mappings_are_not_consumed_across_calls() {
        let settings = Settings::default();
        let raw = header(&["Alt(m)"]);
        assert_eq!(remap_fieldnames(&raw, &settings.field_mappings), header(&["GPS Alt(m)"]));
        assert_eq!(remap_fieldnames(&raw, &settings.field_mappings), header(&["GPS Alt(m)"]));
    }
}
