use time::{Date, OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// Today's date in `canonical_timezone`, or in UTC if the timezone is not known.
pub fn local_today(canonical_timezone: &str) -> Date {
    let offset = get_local_offset(canonical_timezone).unwrap_or_else(|| {
        tracing::warn!("Unknown timezone {canonical_timezone:?}, using UTC instead");
        UtcOffset::UTC
    });

    OffsetDateTime::now_utc().to_offset(offset).date()
}

#[cfg(test)]
mod tests {
    use time::UtcOffset;

    use super::get_local_offset;

    #[test]
    fn utc_has_zero_offset() {
        assert_eq!(get_local_offset("Etc/UTC"), Some(UtcOffset::UTC));
    }

    #[test]
    fn unknown_timezone_has_no_offset() {
        assert_eq!(get_local_offset("Not/AZone"), None);
    }
}
