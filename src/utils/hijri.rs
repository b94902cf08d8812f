use anyhow::Result;
use chrono::{Datelike, Days, NaiveDate};
use hijri_date::HijriDate;

/// Islamic month names in English (index 0 = Muharram = month 1)
const HIJRI_MONTH_NAMES: &[&str] = &[
    "Muharram",
    "Safar",
    "Rabi' al-Awwal",
    "Rabi' al-Thani",
    "Jumada al-Awwal",
    "Jumada al-Thani",
    "Rajab",
    "Sha'ban",
    "Ramadan",
    "Shawwal",
    "Dhu al-Qi'dah",
    "Dhu al-Hijjah",
];

fn hijri_month_name(month: usize) -> &'static str {
    if (1..=12).contains(&month) {
        HIJRI_MONTH_NAMES[month - 1]
    } else {
        "Unknown"
    }
}

pub struct HijriInfo {
    pub day: usize,
    pub year: usize,
    pub month_name: String,
}

impl HijriInfo {
    pub fn formatted(&self) -> String {
        format!("{} {} {} AH", self.day, self.month_name, self.year)
    }
}

/// Gregorian years the tabular converter covers.
const SUPPORTED_YEARS: std::ops::RangeInclusive<i32> = 1938..=2076;

pub fn to_hijri(date: NaiveDate) -> Result<HijriInfo> {
    if !SUPPORTED_YEARS.contains(&date.year()) {
        anyhow::bail!("{} is outside the supported Hijri range", date);
    }
    let hd = HijriDate::from_gr(
        date.year() as usize,
        date.month() as usize,
        date.day() as usize,
    )
    .map_err(|e| anyhow::anyhow!("Hijri conversion error: {}", e))?;

    Ok(HijriInfo {
        day: hd.day(),
        year: hd.year(),
        month_name: hijri_month_name(hd.month()).to_string(),
    })
}

/// Hijri rendering of a Gregorian date, shifted by `offset_days` for local
/// moon sighting. `None` when the date is outside the converter's range.
pub fn hijri_string(date: NaiveDate, offset_days: i32) -> Option<String> {
    let shift = Days::new(u64::from(offset_days.unsigned_abs()));
    let adjusted = if offset_days < 0 {
        date.checked_sub_days(shift)?
    } else {
        date.checked_add_days(shift)?
    };

    match to_hijri(adjusted) {
        Ok(info) => Some(info.formatted()),
        Err(e) => {
            log::debug!("No Hijri date for {}: {}", adjusted, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_names() {
        assert_eq!(hijri_month_name(1), "Muharram");
        assert_eq!(hijri_month_name(9), "Ramadan");
        assert_eq!(hijri_month_name(13), "Unknown");
    }

    #[test]
    fn converts_dates_in_range() {
        let date = NaiveDate::from_ymd_opt(2027, 7, 23).unwrap();
        let info = to_hijri(date).unwrap();
        assert_eq!(info.month_name, "Safar");
        assert!((1..=30).contains(&info.day));
        assert_eq!(info.year, 1449);
        assert!(hijri_string(date, -1).unwrap().ends_with("AH"));
    }

    #[test]
    fn far_future_has_no_hijri_date() {
        let date = NaiveDate::from_ymd_opt(2600, 1, 1).unwrap();
        assert_eq!(hijri_string(date, 0), None);
    }
}
