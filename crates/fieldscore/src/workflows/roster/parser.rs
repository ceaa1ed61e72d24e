use std::io::Read;

use serde::Deserialize;

use crate::workflows::scorecard::CompanyName;

pub(crate) struct RosterEntry {
    pub(crate) company: CompanyName,
    pub(crate) stations: u32,
}

pub(crate) fn parse_entries<R: Read>(reader: R) -> Result<Vec<RosterEntry>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut entries = Vec::new();

    for record in csv_reader.deserialize::<RosterRow>() {
        let row = record?;
        // Rows whose name is blank after normalization never reach the scorer.
        let company = match CompanyName::new(&row.company) {
            Ok(company) => company,
            Err(_) => continue,
        };

        entries.push(RosterEntry {
            company,
            stations: row.stations,
        });
    }

    Ok(entries)
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(rename = "Company")]
    company: String,
    #[serde(rename = "Stations")]
    stations: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn trims_and_normalizes_names() {
        let csv = "Company,Stations\n\u{feff}  Gaz   Service  ,47\n";
        let entries = parse_entries(Cursor::new(csv)).expect("rows parse");

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].company.as_str(), "Gaz Service");
        assert_eq!(entries[0].stations, 47);
    }

    #[test]
    fn keeps_duplicate_rows_in_order() {
        let csv = "Company,Stations\nGazService,47\nGazService,50\n";
        let entries = parse_entries(Cursor::new(csv)).expect("rows parse");

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].stations, 47);
        assert_eq!(entries[1].stations, 50);
    }

    #[test]
    fn filters_blank_names() {
        let csv = "Company,Stations\n,10\n\u{200b},11\n";
        let entries = parse_entries(Cursor::new(csv)).expect("rows parse");
        assert!(entries.is_empty());
    }
}
