// genversion: Release tag and version artifact generator.
// Copyright (C) 2024 International Digital Economy Academy
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//
// For inquiries, you can contact us via e-mail at jichuruanjian@idea.edu.cn.

use chrono::{DateTime, Datelike, Timelike, Utc};

use crate::{GenVersionError, VersionRecord};

/// The moment a release is cut, and the strings derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleaseStamp {
    instant: DateTime<Utc>,
}

impl ReleaseStamp {
    pub fn now() -> Self {
        Self::at(Utc::now())
    }

    pub fn at(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }

    /// Pin the stamp to a Unix timestamp, the way reproducible builds use
    /// `SOURCE_DATE_EPOCH`.
    pub fn from_source_date_epoch(secs: i64) -> Result<Self, GenVersionError> {
        DateTime::from_timestamp(secs, 0)
            .map(Self::at)
            .ok_or(GenVersionError::InvalidEpoch(secs))
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    /// Release tag, e.g. `RELEASE.Mon-Jun-01-10-15-30-GMT-2015`.
    ///
    /// Day and clock fields are zero-padded to two digits, the year is not
    /// padded at all.
    pub fn tag(&self) -> String {
        format!(
            "RELEASE.{}-GMT-{}",
            self.instant.format("%a-%b-%d-%H-%M-%S"),
            self.instant.year()
        )
    }

    /// HTTP IMF-fixdate, e.g. `Mon, 01 Jun 2015 10:15:30 GMT`.
    pub fn http_date(&self) -> String {
        format!(
            "{} {:04} {} GMT",
            self.instant.format("%a, %d %b"),
            self.instant.year(),
            self.instant.format("%H:%M:%S")
        )
    }

    /// RFC3339 with up to nine fractional digits. Trailing zeros of the
    /// fraction are dropped, and whole seconds carry no fraction at all.
    pub fn rfc3339_nano(&self) -> String {
        // chrono's `%Y` signs years past 9999
        let mut out = format!(
            "{:04}-{}",
            self.instant.year(),
            self.instant.format("%m-%dT%H:%M:%S")
        );
        // leap seconds are encoded as nanos >= 1e9
        let nanos = self.instant.nanosecond() % 1_000_000_000;
        if nanos != 0 {
            let fraction = format!("{nanos:09}");
            out.push('.');
            out.push_str(fraction.trim_end_matches('0'));
        }
        out.push('Z');
        out
    }

    pub fn version(&self) -> VersionRecord {
        VersionRecord {
            date: self.rfc3339_nano(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use expect_test::expect;

    fn stamp(s: &str) -> ReleaseStamp {
        ReleaseStamp::at(s.parse::<DateTime<Utc>>().unwrap())
    }

    #[test]
    fn formats_all_three_strings() {
        let s = stamp("2015-06-01T10:15:30.123456789Z");
        expect!["RELEASE.Mon-Jun-01-10-15-30-GMT-2015"].assert_eq(&s.tag());
        expect!["Mon, 01 Jun 2015 10:15:30 GMT"].assert_eq(&s.http_date());
        expect!["2015-06-01T10:15:30.123456789Z"].assert_eq(&s.rfc3339_nano());
    }

    #[test]
    fn pads_day_and_clock_fields() {
        let s = ReleaseStamp::at(Utc.with_ymd_and_hms(2009, 1, 5, 3, 4, 5).unwrap());
        expect!["RELEASE.Mon-Jan-05-03-04-05-GMT-2009"].assert_eq(&s.tag());
        expect!["Mon, 05 Jan 2009 03:04:05 GMT"].assert_eq(&s.http_date());
    }

    #[test]
    fn year_is_not_padded() {
        let s = ReleaseStamp::at(Utc.with_ymd_and_hms(999, 12, 31, 23, 59, 59).unwrap());
        assert!(s.tag().ends_with("-12-31-23-59-59-GMT-999"), "{}", s.tag());
    }

    #[test]
    fn five_digit_year_has_no_sign() {
        let s = ReleaseStamp::from_source_date_epoch(253_402_300_800).unwrap();
        expect!["RELEASE.Sat-Jan-01-00-00-00-GMT-10000"].assert_eq(&s.tag());
        expect!["Sat, 01 Jan 10000 00:00:00 GMT"].assert_eq(&s.http_date());
        expect!["10000-01-01T00:00:00Z"].assert_eq(&s.rfc3339_nano());
    }

    #[test]
    fn small_year_is_four_digits_outside_the_tag() {
        let s = ReleaseStamp::at(Utc.with_ymd_and_hms(999, 12, 31, 23, 59, 59).unwrap());
        assert!(s.http_date().ends_with(" 0999 23:59:59 GMT"), "{}", s.http_date());
        expect!["0999-12-31T23:59:59Z"].assert_eq(&s.rfc3339_nano());
    }

    #[test]
    fn fraction_drops_trailing_zeros() {
        expect!["2015-06-01T10:15:30Z"].assert_eq(&stamp("2015-06-01T10:15:30Z").rfc3339_nano());
        expect!["2015-06-01T10:15:30.1Z"]
            .assert_eq(&stamp("2015-06-01T10:15:30.100Z").rfc3339_nano());
        expect!["2015-06-01T10:15:30.000000001Z"]
            .assert_eq(&stamp("2015-06-01T10:15:30.000000001Z").rfc3339_nano());
    }

    #[test]
    fn non_utc_input_is_normalized() {
        let s = stamp("2015-06-01T12:15:30+02:00");
        expect!["RELEASE.Mon-Jun-01-10-15-30-GMT-2015"].assert_eq(&s.tag());
    }

    #[test]
    fn source_date_epoch() {
        let s = ReleaseStamp::from_source_date_epoch(1_433_153_730).unwrap();
        assert_eq!(s, stamp("2015-06-01T10:15:30Z"));

        let err = ReleaseStamp::from_source_date_epoch(i64::MAX).unwrap_err();
        assert!(matches!(err, GenVersionError::InvalidEpoch(i64::MAX)));
    }

    #[test]
    fn version_record_carries_rfc3339() {
        let s = stamp("2015-06-01T10:15:30.123456789Z");
        assert_eq!(s.version().date, "2015-06-01T10:15:30.123456789Z");
    }
}
