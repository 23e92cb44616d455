//! Month-by-month history of a run and its report formats.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::calendar::SimDate;
use crate::error::SimResult;
use crate::state::StateSnapshot;

pub const CSV_HEADER: [&str; 7] = [
    "Month",
    "Year",
    "Temp",
    "Precip",
    "Height",
    "Deer",
    "WeedDensity",
];

/// One completed month as reported. `month` is one-based (January = 1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthRecord {
    #[serde(rename = "Month")]
    pub month: u8,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Temp")]
    pub temperature: f32,
    #[serde(rename = "Precip")]
    pub precipitation: f32,
    #[serde(rename = "Height")]
    pub height: f32,
    #[serde(rename = "Deer")]
    pub population: u32,
    #[serde(rename = "WeedDensity")]
    pub weed_density: f32,
}

impl MonthRecord {
    /// Zero-based date. A deserialized `Month` of 0 reads as January.
    pub fn date(&self) -> SimDate {
        SimDate::new(self.year, self.month.saturating_sub(1))
    }

    fn csv_fields(&self) -> [String; 7] {
        [
            self.month.to_string(),
            self.year.to_string(),
            format!("{:.2}", self.temperature),
            format!("{:.2}", self.precipitation),
            format!("{:.2}", self.height),
            self.population.to_string(),
            format!("{:.2}", self.weed_density),
        ]
    }
}

impl From<StateSnapshot> for MonthRecord {
    fn from(snapshot: StateSnapshot) -> Self {
        Self {
            month: snapshot.date.month + 1,
            year: snapshot.date.year,
            temperature: snapshot.weather.temperature,
            precipitation: snapshot.weather.precipitation,
            height: snapshot.height,
            population: snapshot.population,
            weed_density: snapshot.weed_density,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Csv,
    Json,
}

/// Append-only, chronological.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryLog {
    records: Vec<MonthRecord>,
}

impl HistoryLog {
    pub fn push(&mut self, record: MonthRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[MonthRecord] {
        &self.records
    }

    pub fn last(&self) -> Option<&MonthRecord> {
        self.records.last()
    }

    pub fn write_report<W: Write>(&self, format: ReportFormat, writer: W) -> SimResult<()> {
        match format {
            ReportFormat::Csv => self.write_csv(writer),
            ReportFormat::Json => self.write_json(writer),
        }
    }

    /// Header line then one line per month, floats to two decimals.
    pub fn write_csv<W: Write>(&self, writer: W) -> SimResult<()> {
        let mut csv = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);
        csv.write_record(CSV_HEADER)?;
        for record in &self.records {
            csv.write_record(record.csv_fields())?;
        }
        csv.flush()?;
        Ok(())
    }

    pub fn write_json<W: Write>(&self, mut writer: W) -> SimResult<()> {
        serde_json::to_writer_pretty(&mut writer, &self.records)?;
        writeln!(writer)?;
        Ok(())
    }

    pub fn to_csv_string(&self) -> SimResult<String> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
