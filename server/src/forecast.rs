use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use chrono_tz::Tz;
use serde::Serialize;

use crate::compass::{self, CompassSector};
use crate::models::{ForecastError, RawRecord};
use crate::sky::{self, SkyCondition};

/// Alternating marker grouping forecast rows by calendar day.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowColor {
    Green,
    Yellow,
}

impl RowColor {
    fn toggled(self) -> RowColor {
        match self {
            RowColor::Green => RowColor::Yellow,
            RowColor::Yellow => RowColor::Green,
        }
    }
}

/// Calendar labeling state threaded across one chronological scan.
///
/// The marker starts at green and toggles on every new local date, the
/// first record included, so the first rendered day is always yellow.
pub struct DayGrouper {
    timezone: Tz,
    last_date: Option<String>,
    color: RowColor,
}

pub struct DayLabel {
    pub date: String,
    pub time: String,
    pub week_day: String,
    pub color: RowColor,
}

impl DayGrouper {
    pub fn new(timezone: Tz) -> Self {
        Self {
            timezone,
            last_date: None,
            color: RowColor::Green,
        }
    }

    /// Label one timestamp with its civil date, time and weekday, toggling
    /// the color whenever the local calendar date changes. Callers must
    /// feed timestamps in chronological order.
    pub fn label(&mut self, time: DateTime<Utc>) -> DayLabel {
        let local = time.with_timezone(&self.timezone);
        let date = local.format("%d/%m/%Y").to_string();

        if self.last_date.as_deref() != Some(date.as_str()) {
            self.last_date = Some(date.clone());
            self.color = self.color.toggled();
        }

        DayLabel {
            date,
            time: local.format("%H:%M:%S").to_string(),
            week_day: week_day_abbr(local.weekday()).to_string(),
            color: self.color,
        }
    }
}

fn week_day_abbr(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "SEG",
        Weekday::Tue => "TER",
        Weekday::Wed => "QUA",
        Weekday::Thu => "QUI",
        Weekday::Fri => "SEX",
        Weekday::Sat => "SÁB",
        Weekday::Sun => "DOM",
    }
}

/// Current conditions, derived from the record matching the present hour.
#[derive(Debug)]
pub struct DaySnapshot {
    pub wave_direction: &'static CompassSector,
    pub wind_direction: &'static CompassSector,
    pub air_temperature: String,
    pub wave_height: String,
    pub wind_speed: String,
    pub condition: &'static SkyCondition,
}

/// One row of the multi-day forecast table.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastEntry {
    pub date: String,
    pub time: String,
    pub week_day: String,
    pub current_temp: String,
    pub wave_direction: &'static str,
    pub wave_direction_icon: &'static str,
    pub wave_height: String,
    pub wind_direction: &'static str,
    pub wind_direction_icon: &'static str,
    pub wind_speed: String,
    pub color: RowColor,
    pub condition: &'static SkyCondition,
}

/// The `/forecast` response body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPayload {
    pub current_temp: String,
    pub condition: &'static str,
    pub condition_icon: &'static str,
    pub wave_height: String,
    pub wave_direction: &'static str,
    pub wave_direction_icon: &'static str,
    pub wind_speed: String,
    pub wind_direction: &'static str,
    pub wind_direction_icon: &'static str,
    pub forecast: Vec<ForecastEntry>,
}

impl ForecastPayload {
    /// Flatten the current-hour snapshot over the week sequence, degrading
    /// to the no-data placeholders when the present hour has no document.
    pub fn assemble(snapshot: Option<DaySnapshot>, forecast: Vec<ForecastEntry>) -> Self {
        match snapshot {
            Some(today) => Self {
                current_temp: today.air_temperature,
                condition: today.condition.label,
                condition_icon: today.condition.icon,
                wave_height: today.wave_height,
                wave_direction: today.wave_direction.name,
                wave_direction_icon: today.wave_direction.icon,
                wind_speed: today.wind_speed,
                wind_direction: today.wind_direction.name,
                wind_direction_icon: today.wind_direction.icon,
                forecast,
            },
            None => Self {
                current_temp: "0".to_string(),
                condition: "Sem Dados",
                condition_icon: sky::NO_FORECAST.icon,
                wave_height: "0.0".to_string(),
                wave_direction: "N/A",
                wave_direction_icon: sky::NO_FORECAST.icon,
                wind_speed: "0.0".to_string(),
                wind_direction: "N/A",
                wind_direction_icon: sky::NO_FORECAST.icon,
                forecast,
            },
        }
    }
}

/// Snapshot of the record whose hour matches `now`, if any.
pub fn today_snapshot(
    records: &[RawRecord],
    now: DateTime<Utc>,
) -> Result<Option<DaySnapshot>, ForecastError> {
    let current = records
        .iter()
        .find(|record| hour_bucket(record.time) == hour_bucket(now));

    let Some(record) = current else {
        return Ok(None);
    };

    Ok(Some(DaySnapshot {
        wave_direction: compass::resolve(record.wave_direction.value("waveDirection")?),
        wind_direction: compass::resolve(record.wind_direction.value("windDirection")?),
        air_temperature: format!("{:.0}", record.air_temperature.value("airTemperature")?),
        wave_height: format!("{:.1}", record.wave_height.value("waveHeight")?),
        wind_speed: format!("{:.1}", record.wind_speed.value("windSpeed")?),
        condition: classify_record(record)?,
    }))
}

/// Label every record from `now` onwards, in chronological order.
pub fn week_sequence(
    records: &[RawRecord],
    now: DateTime<Utc>,
    timezone: Tz,
) -> Result<Vec<ForecastEntry>, ForecastError> {
    let mut upcoming: Vec<&RawRecord> = records.iter().filter(|r| r.time >= now).collect();
    upcoming.sort_by_key(|r| r.time);

    let mut grouper = DayGrouper::new(timezone);
    upcoming
        .into_iter()
        .map(|record| {
            let label = grouper.label(record.time);
            let wave_direction = compass::resolve(record.wave_direction.value("waveDirection")?);
            let wind_direction = compass::resolve(record.wind_direction.value("windDirection")?);

            Ok(ForecastEntry {
                date: label.date,
                time: label.time,
                week_day: label.week_day,
                current_temp: format!("{:.0}", record.air_temperature.value("airTemperature")?),
                wave_direction: wave_direction.name,
                wave_direction_icon: wave_direction.icon,
                wave_height: format!("{:.1}", record.wave_height.value("waveHeight")?),
                wind_direction: wind_direction.name,
                wind_direction_icon: wind_direction.icon,
                wind_speed: format!("{:.1}", record.wind_speed.value("windSpeed")?),
                color: label.color,
                condition: classify_record(record)?,
            })
        })
        .collect()
}

/// Hour-granularity bucket of an instant: minutes and seconds zeroed.
fn hour_bucket(time: DateTime<Utc>) -> i64 {
    time.timestamp().div_euclid(3600)
}

fn classify_record(record: &RawRecord) -> Result<&'static SkyCondition, ForecastError> {
    Ok(sky::classify(
        record.cloud_cover.value("cloudCover")?,
        record.precipitation.value("precipitation")?,
        record.time.hour(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Measurement;

    fn utc(time: &str) -> DateTime<Utc> {
        time.parse().unwrap()
    }

    fn sao_paulo() -> Tz {
        chrono_tz::America::Sao_Paulo
    }

    fn record(time: &str) -> RawRecord {
        RawRecord {
            time: utc(time),
            air_temperature: Measurement::Scalar(24.3),
            wave_height: Measurement::Scalar(1.24),
            wave_direction: Measurement::Scalar(180.0),
            wind_speed: Measurement::Scalar(3.46),
            wind_direction: Measurement::Scalar(90.0),
            cloud_cover: Measurement::Scalar(20.0),
            precipitation: Measurement::Scalar(0.0),
        }
    }

    #[test]
    fn snapshot_picks_the_record_matching_the_hour() {
        let records = vec![record("2023-06-01T11:00:00Z"), record("2023-06-01T12:00:00Z")];
        let snapshot = today_snapshot(&records, utc("2023-06-01T12:34:56Z"))
            .unwrap()
            .expect("a record matches the current hour");

        assert_eq!(snapshot.air_temperature, "24");
        assert_eq!(snapshot.wave_height, "1.2");
        assert_eq!(snapshot.wind_speed, "3.5");
        assert_eq!(snapshot.wave_direction.name, "Sul");
        assert_eq!(snapshot.wind_direction.name, "Leste");
        // 20% cover at noon UTC: partially cloudy, day icon set.
        assert_eq!(snapshot.condition.label, "Parcialmente Nublado");
        assert_eq!(snapshot.condition.icon, "⛅");
    }

    #[test]
    fn snapshot_is_none_without_an_hour_match() {
        let records = vec![record("2023-06-01T11:00:00Z")];
        let snapshot = today_snapshot(&records, utc("2023-06-01T12:05:00Z")).unwrap();
        assert!(snapshot.is_none());
    }

    #[test]
    fn snapshot_propagates_missing_measurements() {
        let mut broken = record("2023-06-01T12:00:00Z");
        broken.wind_speed = Measurement::BySource(Default::default());

        let err = today_snapshot(&[broken], utc("2023-06-01T12:00:00Z")).unwrap_err();
        assert!(matches!(err, ForecastError::MissingValue { field: "windSpeed" }));
    }

    #[test]
    fn week_sequence_of_nothing_is_empty() {
        let entries = week_sequence(&[], utc("2023-06-01T12:00:00Z"), sao_paulo()).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn week_sequence_drops_past_records_and_sorts() {
        let records = vec![
            record("2023-06-01T18:00:00Z"),
            record("2023-06-01T09:00:00Z"), // already past
            record("2023-06-01T15:00:00Z"),
        ];
        let entries = week_sequence(&records, utc("2023-06-01T12:00:00Z"), sao_paulo()).unwrap();

        let times: Vec<&str> = entries.iter().map(|e| e.time.as_str()).collect();
        // 15:00 and 18:00 UTC are 12:00 and 15:00 in São Paulo.
        assert_eq!(times, vec!["12:00:00", "15:00:00"]);
    }

    #[test]
    fn color_toggles_once_per_local_date() {
        let records = vec![
            record("2023-06-01T12:00:00Z"),
            record("2023-06-01T18:00:00Z"),
            record("2023-06-02T12:00:00Z"),
            record("2023-06-02T18:00:00Z"),
            record("2023-06-03T12:00:00Z"),
        ];
        let entries = week_sequence(&records, utc("2023-06-01T00:00:00Z"), sao_paulo()).unwrap();

        let colors: Vec<RowColor> = entries.iter().map(|e| e.color).collect();
        assert_eq!(
            colors,
            vec![
                RowColor::Yellow,
                RowColor::Yellow,
                RowColor::Green,
                RowColor::Green,
                RowColor::Yellow,
            ]
        );
    }

    #[test]
    fn grouping_follows_the_local_date_not_the_utc_date() {
        // 01:00 UTC on June 2nd is still June 1st in São Paulo (UTC-3).
        let records = vec![record("2023-06-02T01:00:00Z"), record("2023-06-02T13:00:00Z")];
        let entries = week_sequence(&records, utc("2023-06-01T00:00:00Z"), sao_paulo()).unwrap();

        assert_eq!(entries[0].date, "01/06/2023");
        assert_eq!(entries[0].time, "22:00:00");
        assert_eq!(entries[0].week_day, "QUI");
        assert_eq!(entries[1].date, "02/06/2023");
        assert_eq!(entries[1].week_day, "SEX");
        assert_ne!(entries[0].color, entries[1].color);
    }

    #[test]
    fn entry_classification_uses_the_record_hour() {
        // 22:00 UTC is night: clear sky renders the moon icon.
        let mut night = record("2023-06-01T22:00:00Z");
        night.cloud_cover = Measurement::Scalar(5.0);

        let entries = week_sequence(&[night], utc("2023-06-01T00:00:00Z"), sao_paulo()).unwrap();
        assert_eq!(entries[0].condition.icon, "🌙");
        assert_eq!(entries[0].condition.label, "Sol");
    }

    #[test]
    fn payload_flattens_the_snapshot() {
        let records = vec![record("2023-06-01T12:00:00Z")];
        let now = utc("2023-06-01T12:00:00Z");
        let snapshot = today_snapshot(&records, now).unwrap();
        let entries = week_sequence(&records, now, sao_paulo()).unwrap();
        let payload = ForecastPayload::assemble(snapshot, entries);

        assert_eq!(payload.current_temp, "24");
        assert_eq!(payload.condition, "Parcialmente Nublado");
        assert_eq!(payload.wave_direction, "Sul");
        assert_eq!(payload.wave_direction_icon, "⬆️");
        assert_eq!(payload.forecast.len(), 1);
    }

    #[test]
    fn payload_degrades_without_current_data() {
        let records = vec![record("2023-06-01T15:00:00Z")];
        let now = utc("2023-06-01T12:00:00Z");
        let entries = week_sequence(&records, now, sao_paulo()).unwrap();
        let payload = ForecastPayload::assemble(None, entries);

        assert_eq!(payload.condition, "Sem Dados");
        assert_eq!(payload.condition_icon, "❓");
        assert_eq!(payload.current_temp, "0");
        assert_eq!(payload.wave_height, "0.0");
        assert_eq!(payload.wave_direction, "N/A");
        assert_eq!(payload.wind_direction_icon, "❓");
        // The week sequence still ships alongside the placeholders.
        assert_eq!(payload.forecast.len(), 1);
    }

    #[test]
    fn payload_serializes_in_wire_format() {
        let records = vec![record("2023-06-01T12:00:00Z")];
        let now = utc("2023-06-01T12:00:00Z");
        let payload = ForecastPayload::assemble(
            today_snapshot(&records, now).unwrap(),
            week_sequence(&records, now, sao_paulo()).unwrap(),
        );

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["currentTemp"], "24");
        assert_eq!(json["conditionIcon"], "⛅");
        assert_eq!(json["waveDirectionIcon"], "⬆️");

        let entry = &json["forecast"][0];
        assert_eq!(entry["weekDay"], "QUI");
        assert_eq!(entry["currentTemp"], "24");
        assert_eq!(entry["color"], "yellow");
        assert_eq!(entry["condition"]["label"], "Parcialmente Nublado");
        assert_eq!(entry["windDirectionIcon"], "⬅️");
    }
}
