//! Timezones
//!
//! Users store a numeric timezone id; server timestamps are UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

pub const UTC_ID: u32 = 1;

/// `(id, IANA name, display name)`
const TIMEZONES: &[(u32, &str, &str)] = &[
    (1, "UTC", "UTC"),
    (2, "America/New_York", "Americas - New York (EST/EDT)"),
    (3, "America/Chicago", "Americas - Chicago (CST/CDT)"),
    (4, "America/Denver", "Americas - Denver (MST/MDT)"),
    (5, "America/Los_Angeles", "Americas - Los Angeles (PST/PDT)"),
    (6, "America/Anchorage", "Americas - Anchorage (AKST/AKDT)"),
    (7, "America/Adak", "Americas - Hawaii (HST)"),
    (8, "America/Toronto", "Americas - Toronto (EST/EDT)"),
    (9, "America/Vancouver", "Americas - Vancouver (PST/PDT)"),
    (10, "America/Mexico_City", "Americas - Mexico City (CST/CDT)"),
    (11, "America/Sao_Paulo", "Americas - São Paulo (BRT/BRST)"),
    (12, "America/Argentina/Buenos_Aires", "Americas - Buenos Aires (ART)"),
    (13, "America/Lima", "Americas - Lima (PET)"),
    (14, "America/Bogota", "Americas - Bogotá (COT)"),
    (15, "America/Caracas", "Americas - Caracas (VET)"),
    (16, "America/Santiago", "Americas - Santiago (CLT/CLST)"),
    (17, "Europe/London", "Europe - London (GMT/BST)"),
    (18, "Europe/Paris", "Europe - Paris (CET/CEST)"),
    (19, "Europe/Berlin", "Europe - Berlin (CET/CEST)"),
    (20, "Europe/Madrid", "Europe - Madrid (CET/CEST)"),
    (21, "Europe/Rome", "Europe - Rome (CET/CEST)"),
    (22, "Europe/Amsterdam", "Europe - Amsterdam (CET/CEST)"),
    (23, "Europe/Zurich", "Europe - Zurich (CET/CEST)"),
    (24, "Europe/Vienna", "Europe - Vienna (CET/CEST)"),
    (25, "Europe/Stockholm", "Europe - Stockholm (CET/CEST)"),
    (26, "Europe/Oslo", "Europe - Oslo (CET/CEST)"),
    (27, "Europe/Copenhagen", "Europe - Copenhagen (CET/CEST)"),
    (28, "Europe/Helsinki", "Europe - Helsinki (EET/EEST)"),
    (29, "Europe/Moscow", "Europe - Moscow (MSK)"),
    (30, "Europe/Warsaw", "Europe - Warsaw (CET/CEST)"),
    (31, "Europe/Prague", "Europe - Prague (CET/CEST)"),
    (32, "Europe/Budapest", "Europe - Budapest (CET/CEST)"),
    (33, "Europe/Bucharest", "Europe - Bucharest (EET/EEST)"),
    (34, "Europe/Athens", "Europe - Athens (EET/EEST)"),
    (35, "Europe/Istanbul", "Europe - Istanbul (TRT)"),
    (36, "Europe/Kiev", "Europe - Kiev (EET/EEST)"),
    (37, "Asia/Tokyo", "Asia/Pacific - Tokyo (JST)"),
    (38, "Asia/Seoul", "Asia/Pacific - Seoul (KST)"),
    (39, "Asia/Shanghai", "Asia/Pacific - Shanghai (CST)"),
    (40, "Asia/Shanghai", "Asia/Pacific - Beijing (CST)"),
    (41, "Asia/Hong_Kong", "Asia/Pacific - Hong Kong (HKT)"),
    (42, "Asia/Taipei", "Asia/Pacific - Taipei (CST)"),
    (43, "Asia/Singapore", "Asia/Pacific - Singapore (SGT)"),
    (44, "Asia/Kuala_Lumpur", "Asia/Pacific - Kuala Lumpur (MYT)"),
    (45, "Asia/Jakarta", "Asia/Pacific - Jakarta (WIB)"),
    (46, "Asia/Bangkok", "Asia/Pacific - Bangkok (ICT)"),
    (47, "Asia/Ho_Chi_Minh", "Asia/Pacific - Ho Chi Minh (ICT)"),
    (48, "Asia/Manila", "Asia/Pacific - Manila (PHT)"),
    (49, "Asia/Dhaka", "Asia/Pacific - Dhaka (BST)"),
    (50, "Asia/Kolkata", "Asia/Pacific - Mumbai (IST)"),
    (51, "Asia/Karachi", "Asia/Pacific - Karachi (PKT)"),
    (52, "Asia/Tashkent", "Asia/Pacific - Tashkent (UZT)"),
    (53, "Asia/Dubai", "Asia/Pacific - Dubai (GST)"),
    (54, "Asia/Tehran", "Asia/Pacific - Tehran (IRST/IRDT)"),
    (55, "Asia/Riyadh", "Asia/Pacific - Riyadh (AST)"),
    (56, "Asia/Kuwait", "Asia/Pacific - Kuwait (AST)"),
    (57, "Asia/Qatar", "Asia/Pacific - Doha (AST)"),
    (58, "Asia/Muscat", "Asia/Pacific - Muscat (GST)"),
    (59, "Asia/Baku", "Asia/Pacific - Baku (AZT)"),
    (60, "Asia/Yerevan", "Asia/Pacific - Yerevan (AMT)"),
    (61, "Asia/Tbilisi", "Asia/Pacific - Tbilisi (GET)"),
    (62, "Asia/Almaty", "Asia/Pacific - Almaty (ALMT)"),
    (63, "Asia/Novosibirsk", "Asia/Pacific - Novosibirsk (NOVT)"),
    (64, "Asia/Krasnoyarsk", "Asia/Pacific - Krasnoyarsk (KRAT)"),
    (65, "Asia/Irkutsk", "Asia/Pacific - Irkutsk (IRKT)"),
    (66, "Asia/Yakutsk", "Asia/Pacific - Yakutsk (YAKT)"),
    (67, "Asia/Vladivostok", "Asia/Pacific - Vladivostok (VLAT)"),
    (68, "Asia/Magadan", "Asia/Pacific - Magadan (MAGT)"),
    (69, "Africa/Cairo", "Africa - Cairo (EET/EEST)"),
    (70, "Africa/Johannesburg", "Africa - Johannesburg (SAST)"),
    (71, "Africa/Nairobi", "Africa - Nairobi (EAT)"),
    (72, "Africa/Lagos", "Africa - Lagos (WAT)"),
    (73, "Africa/Casablanca", "Africa - Casablanca (WET/WEST)"),
    (74, "Africa/Algiers", "Africa - Algiers (CET)"),
    (75, "Africa/Tunis", "Africa - Tunis (CET)"),
    (76, "Africa/Addis_Ababa", "Africa - Addis Ababa (EAT)"),
    (77, "Africa/Dar_es_Salaam", "Africa - Dar es Salaam (EAT)"),
    (78, "Africa/Accra", "Africa - Accra (GMT)"),
    (79, "Africa/Abidjan", "Africa - Abidjan (GMT)"),
    (80, "Australia/Sydney", "Asia/Pacific - Sydney (AEST/AEDT)"),
    (81, "Australia/Melbourne", "Asia/Pacific - Melbourne (AEST/AEDT)"),
    (82, "Australia/Brisbane", "Asia/Pacific - Brisbane (AEST)"),
    (83, "Australia/Perth", "Asia/Pacific - Perth (AWST)"),
    (84, "Australia/Adelaide", "Asia/Pacific - Adelaide (ACST/ACDT)"),
    (85, "Australia/Darwin", "Asia/Pacific - Darwin (ACST)"),
    (86, "Pacific/Auckland", "Asia/Pacific - Auckland (NZST/NZDT)"),
    (87, "Pacific/Fiji", "Asia/Pacific - Fiji (FJT/FJST)"),
    (88, "Pacific/Tahiti", "Asia/Pacific - Tahiti (TAHT)"),
    (89, "Pacific/Honolulu", "Asia/Pacific - Honolulu (HST)"),
    (90, "Pacific/Guam", "Asia/Pacific - Guam (ChST)"),
    (91, "Atlantic/Azores", "Atlantic - Azores (AZOT/AZOST)"),
    (92, "Atlantic/Cape_Verde", "Atlantic - Cape Verde (CVT)"),
    (93, "Indian/Maldives", "Asia/Pacific - Maldives (MVT)"),
    (94, "Indian/Mauritius", "Asia/Pacific - Mauritius (MUT)"),
];

fn entry(id: u32) -> Option<&'static (u32, &'static str, &'static str)> {
    TIMEZONES.iter().find(|(tz_id, _, _)| *tz_id == id)
}

/// Zone for `id`; unknown ids are UTC.
pub fn zone(id: u32) -> Tz {
    entry(id)
        .and_then(|(_, name, _)| name.parse::<Tz>().ok())
        .unwrap_or(Tz::UTC)
}

pub fn display_name(id: u32) -> &'static str {
    entry(id).map(|(_, _, label)| *label).unwrap_or("UTC")
}

/// Server timestamps come either with an offset or naive (meaning UTC).
fn parse_utc(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// `YYYY/MM/DD HH:MM:SS` in the given timezone. Unparseable input is
/// returned unchanged.
pub fn format_timestamp(raw: &str, tz_id: u32) -> String {
    match parse_utc(raw) {
        Some(dt) => dt.with_timezone(&zone(tz_id)).format("%Y/%m/%d %H:%M:%S").to_string(),
        None => raw.to_string(),
    }
}

/// `YYYY/MM/DD` in the given timezone
pub fn format_date(raw: &str, tz_id: u32) -> String {
    match parse_utc(raw) {
        Some(dt) => dt.with_timezone(&zone(tz_id)).format("%Y/%m/%d").to_string(),
        None => raw.to_string(),
    }
}

/// Offset from UTC at `at`, e.g. `+09:00`
pub fn offset_label(tz_id: u32, at: DateTime<Utc>) -> String {
    let seconds = zone(tz_id)
        .offset_from_utc_datetime(&at.naive_utc())
        .fix()
        .local_minus_utc();
    let sign = if seconds < 0 { '-' } else { '+' };
    let minutes = seconds.abs() / 60;
    format!("{}{:02}:{:02}", sign, minutes / 60, minutes % 60)
}

/// Select options `(id, "Name (UTC+hh:mm)")` for every known timezone
pub fn options(at: DateTime<Utc>) -> Vec<(u32, String)> {
    TIMEZONES
        .iter()
        .map(|(id, _, label)| (*id, format!("{} (UTC{})", label, offset_label(*id, at))))
        .collect()
}

/// Case-insensitive filter for the timezone picker
pub fn search<'a>(options: &'a [(u32, String)], query: &str) -> Vec<&'a (u32, String)> {
    let query = query.trim().to_lowercase();
    options
        .iter()
        .filter(|(_, label)| query.is_empty() || label.to_lowercase().contains(&query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_covers_every_id() {
        assert_eq!(TIMEZONES.len(), 94);
        for (i, (id, name, _)) in TIMEZONES.iter().enumerate() {
            assert_eq!(*id as usize, i + 1);
            assert!(name.parse::<Tz>().is_ok(), "unknown zone {}", name);
        }
    }

    #[test]
    fn test_format_in_user_timezone() {
        assert_eq!(format_timestamp("2025-08-25T12:00:00", UTC_ID), "2025/08/25 12:00:00");
        assert_eq!(format_timestamp("2025-08-25T20:30:00Z", 37), "2025/08/26 05:30:00");
        assert_eq!(format_timestamp("2025-08-25T12:00:00.123456+00:00", 37), "2025/08/25 21:00:00");
        assert_eq!(format_date("2025-08-25T20:30:00", 37), "2025/08/26");
    }

    #[test]
    fn test_unknown_id_falls_back_to_utc() {
        assert_eq!(format_timestamp("2025-01-01T00:00:00", 999), "2025/01/01 00:00:00");
        assert_eq!(display_name(0), "UTC");
    }

    #[test]
    fn test_unparseable_input_passes_through() {
        assert_eq!(format_timestamp("", 1), "");
        assert_eq!(format_timestamp("yesterday", 1), "yesterday");
    }

    #[test]
    fn test_offset_label() {
        let winter = Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap();
        assert_eq!(offset_label(37, winter), "+09:00");
        assert_eq!(offset_label(2, winter), "-05:00");
        assert_eq!(offset_label(50, winter), "+05:30");
        assert_eq!(offset_label(UTC_ID, winter), "+00:00");
    }

    #[test]
    fn test_search_options() {
        let opts = options(Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap());
        assert_eq!(opts.len(), 94);
        let hits = search(&opts, "tokyo");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].1, "Asia/Pacific - Tokyo (JST) (UTC+09:00)");
        assert_eq!(search(&opts, "  ").len(), 94);
    }
}
