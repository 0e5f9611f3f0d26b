//! CSV-to-dataset normalization.
//!
//! Turns one fetched CSV body into the canonical [`IncidentDataset`]:
//! column names are rewritten to lowercase before any field is read, rows
//! missing `lat`/`lon` are silently dropped (and counted in one log line),
//! `date_rptd` is parsed into a structured date, and the surviving records
//! are stable-sorted by report date, newest first.

use crime_dash_models::{IncidentDataset, IncidentRecord};

use crate::LoadError;
use crate::parsing::{
    optional_text, parse_code_char, parse_coordinates, parse_int_field, parse_report_date,
};

/// Resolved indices of the consumed columns within the (lowercased) header
/// row. Missing any of these is load-fatal.
struct Columns {
    dr_no: usize,
    date_rptd: usize,
    date_occ: usize,
    area: usize,
    area_name: usize,
    crm_cd: usize,
    crm_cd_desc: usize,
    vict_age: usize,
    vict_sex: usize,
    vict_descent: usize,
    premis_desc: usize,
    lat: usize,
    lon: usize,
}

impl Columns {
    fn resolve(headers: &[String]) -> Result<Self, LoadError> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or(LoadError::MissingColumn { name })
        };

        Ok(Self {
            dr_no: find("dr_no")?,
            date_rptd: find("date_rptd")?,
            date_occ: find("date_occ")?,
            area: find("area")?,
            area_name: find("area_name")?,
            crm_cd: find("crm_cd")?,
            crm_cd_desc: find("crm_cd_desc")?,
            vict_age: find("vict_age")?,
            vict_sex: find("vict_sex")?,
            vict_descent: find("vict_descent")?,
            premis_desc: find("premis_desc")?,
            lat: find("lat")?,
            lon: find("lon")?,
        })
    }
}

/// Parses a CSV body into a canonical, sorted [`IncidentDataset`].
///
/// # Errors
///
/// Returns [`LoadError::Csv`] on malformed CSV, [`LoadError::MissingColumn`]
/// when the header row lacks a projected column, and
/// [`LoadError::DateParse`] when any row's `date_rptd` does not parse —
/// date failures abort the whole load.
pub fn parse_dataset(csv_bytes: &[u8]) -> Result<IncidentDataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(csv_bytes);

    // Canonical casing: every column name is lowercased before reads.
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();
    let columns = Columns::resolve(&headers)?;

    let mut records: Vec<IncidentRecord> = Vec::new();
    let mut dropped: usize = 0;

    for result in reader.records() {
        let row = result?;
        match build_record(&row, &columns)? {
            Some(record) => records.push(record),
            None => dropped += 1,
        }
    }

    // Stable sort: ties keep source order.
    records.sort_by(|a, b| b.date_reported.cmp(&a.date_reported));

    log::info!(
        "Normalized {} incidents ({dropped} rows dropped for missing coordinates)",
        records.len()
    );
    Ok(IncidentDataset::new(records))
}

fn build_record(
    row: &csv::StringRecord,
    columns: &Columns,
) -> Result<Option<IncidentRecord>, LoadError> {
    let field = |index: usize| row.get(index).unwrap_or("");

    // Rows without coordinates never become records.
    let Some((latitude, longitude)) = parse_coordinates(field(columns.lat), field(columns.lon))
    else {
        return Ok(None);
    };

    let date_value = field(columns.date_rptd).trim();
    let date_reported = parse_report_date(date_value).ok_or_else(|| LoadError::DateParse {
        value: date_value.to_owned(),
    })?;

    Ok(Some(IncidentRecord {
        report_id: field(columns.dr_no).trim().to_owned(),
        date_reported,
        date_occurred: optional_text(field(columns.date_occ)),
        area_code: parse_int_field(field(columns.area)),
        area_name: field(columns.area_name).trim().to_owned(),
        crime_code: optional_text(field(columns.crm_cd)),
        crime_code_description: field(columns.crm_cd_desc).trim().to_owned(),
        premise_description: optional_text(field(columns.premis_desc)),
        victim_age: parse_int_field(field(columns.vict_age)),
        victim_sex: parse_code_char(field(columns.vict_sex)),
        victim_descent: parse_code_char(field(columns.vict_descent)),
        latitude,
        longitude,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "dr_no,date_rptd,date_occ,area,area_name,crm_cd,crm_cd_desc,vict_age,vict_sex,vict_descent,premis_desc,lat,lon";

    fn csv_body(rows: &[&str]) -> Vec<u8> {
        let mut body = String::from(HEADER);
        for row in rows {
            body.push('\n');
            body.push_str(row);
        }
        body.push('\n');
        body.into_bytes()
    }

    #[test]
    fn sorts_by_report_date_descending() {
        let body = csv_body(&[
            "1,2024-01-01T00:00:00.000,,1,Central,510,VEHICLE - STOLEN,30,M,H,STREET,34.0,-118.2",
            "2,2024-03-01T00:00:00.000,,2,Rampart,510,VEHICLE - STOLEN,40,F,W,DRIVEWAY,34.1,-118.3",
            "3,2024-02-01T00:00:00.000,,3,Southwest,510,VEHICLE - STOLEN,50,M,B,ALLEY,34.2,-118.4",
        ]);
        let dataset = parse_dataset(&body).unwrap();
        let ids: Vec<&str> = dataset.iter().map(|r| r.report_id.as_str()).collect();
        assert_eq!(ids, ["2", "3", "1"]);

        for pair in dataset.records.windows(2) {
            assert!(pair[0].date_reported >= pair[1].date_reported);
        }
    }

    #[test]
    fn sort_is_stable_on_equal_dates() {
        let body = csv_body(&[
            "a,2024-01-01T00:00:00.000,,1,Central,510,VEHICLE - STOLEN,30,M,H,STREET,34.0,-118.2",
            "b,2024-01-01T00:00:00.000,,2,Rampart,510,VEHICLE - STOLEN,40,F,W,DRIVEWAY,34.1,-118.3",
        ]);
        let dataset = parse_dataset(&body).unwrap();
        let ids: Vec<&str> = dataset.iter().map(|r| r.report_id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn drops_rows_missing_coordinates() {
        let body = csv_body(&[
            "1,2024-01-01T00:00:00.000,,1,Central,510,VEHICLE - STOLEN,30,M,H,STREET,34.0,-118.2",
            "2,2024-01-02T00:00:00.000,,2,Rampart,510,VEHICLE - STOLEN,40,F,W,DRIVEWAY,,-118.3",
            "3,2024-01-03T00:00:00.000,,3,Southwest,510,VEHICLE - STOLEN,50,M,B,ALLEY,34.2,",
        ]);
        let dataset = parse_dataset(&body).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records[0].report_id, "1");
    }

    #[test]
    fn every_record_has_numeric_coordinates() {
        let body = csv_body(&[
            "1,2024-01-01T00:00:00.000,,1,Central,510,VEHICLE - STOLEN,30,M,H,STREET,34.0,-118.2",
            "2,2024-01-02T00:00:00.000,,2,Rampart,510,VEHICLE - STOLEN,40,F,W,DRIVEWAY,0.0,0.0",
        ]);
        let dataset = parse_dataset(&body).unwrap();
        assert_eq!(dataset.len(), 2);
        for record in &dataset {
            assert!(record.latitude.is_finite());
            assert!(record.longitude.is_finite());
        }
    }

    #[test]
    fn lowercases_shouting_headers() {
        let body = csv_body(&[
            "1,2024-01-01T00:00:00.000,,7,Wilshire,510,VEHICLE - STOLEN,30,M,H,STREET,34.0,-118.2",
        ]);
        let shouted = String::from_utf8(body).unwrap().replacen(
            HEADER,
            &HEADER.to_uppercase(),
            1,
        );
        let dataset = parse_dataset(shouted.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records[0].area_code, Some(7));
    }

    #[test]
    fn unparseable_report_date_fails_whole_load() {
        let body = csv_body(&[
            "1,2024-01-01T00:00:00.000,,1,Central,510,VEHICLE - STOLEN,30,M,H,STREET,34.0,-118.2",
            "2,garbage,,2,Rampart,510,VEHICLE - STOLEN,40,F,W,DRIVEWAY,34.1,-118.3",
        ]);
        let err = parse_dataset(&body).unwrap_err();
        assert!(matches!(err, LoadError::DateParse { value } if value == "garbage"));
    }

    #[test]
    fn missing_projected_column_fails_load() {
        let body = b"dr_no,date_rptd\n1,2024-01-01T00:00:00.000\n";
        let err = parse_dataset(body).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn { .. }));
    }

    #[test]
    fn lenient_fields_become_none() {
        let body = csv_body(&[
            "1,2024-01-01T00:00:00.000,,not-a-number,Central,510,VEHICLE - STOLEN,,, ,,34.0,-118.2",
        ]);
        let dataset = parse_dataset(&body).unwrap();
        let record = &dataset.records[0];
        assert_eq!(record.area_code, None);
        assert_eq!(record.victim_age, None);
        assert_eq!(record.victim_sex, None);
        assert_eq!(record.victim_descent, None);
        assert_eq!(record.premise_description, None);
    }

    #[test]
    fn empty_body_yields_empty_dataset() {
        let dataset = parse_dataset(format!("{HEADER}\n").as_bytes()).unwrap();
        assert!(dataset.is_empty());
    }
}
