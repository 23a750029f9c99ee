use crate::calendar::CountSource;
use crate::YMD_FMT;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use time::Date;

/// Contribution counts read from a plain-text log.
///
/// Each non-blank line not starting with `#` holds a `YYYY-MM-DD` date,
/// optionally followed by whitespace and a count (default 1).  Counts for
/// the same date are added together.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct CountLog(BTreeMap<Date, u32>);

impl CountLog {
    pub(crate) fn load(path: &Path) -> Result<CountLog, CountLogError> {
        let src = fs::read_to_string(path).map_err(|source| CountLogError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let log = CountLog::parse(&src)?;
        tracing::info!(path = %path.display(), dates = log.0.len(), "loaded contribution log");
        Ok(log)
    }

    pub(crate) fn parse(src: &str) -> Result<CountLog, CountLogError> {
        let mut counts = BTreeMap::new();
        for (lineno, line) in std::iter::zip(1usize.., src.lines()) {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut words = line.split_whitespace();
            let (Some(datestr), count, None) = (words.next(), words.next(), words.next()) else {
                return Err(CountLogError::Syntax { lineno });
            };
            let date = Date::parse(datestr, &YMD_FMT).map_err(|_| CountLogError::Date {
                lineno,
                value: datestr.to_owned(),
            })?;
            let count = match count {
                Some(s) => parse_count(s, lineno)?,
                None => 1,
            };
            let total: &mut u32 = counts.entry(date).or_default();
            *total = total.saturating_add(count);
        }
        Ok(CountLog(counts))
    }
}

fn parse_count(s: &str, lineno: usize) -> Result<u32, CountLogError> {
    match s.parse::<i64>() {
        Ok(n) if n < 0 => Err(CountLogError::NegativeCount { lineno, count: n }),
        Ok(n) => u32::try_from(n).map_err(|_| CountLogError::Count {
            lineno,
            value: s.to_owned(),
        }),
        Err(_) => Err(CountLogError::Count {
            lineno,
            value: s.to_owned(),
        }),
    }
}

impl CountSource for CountLog {
    fn count(&self, date: Date) -> u32 {
        self.0.get(&date).copied().unwrap_or_default()
    }
}

#[derive(Debug, Error)]
pub(crate) enum CountLogError {
    #[error("failed to read {path}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("line {lineno}: expected a date optionally followed by a count")]
    Syntax { lineno: usize },
    #[error("line {lineno}: invalid date {value:?}; expected YYYY-MM-DD")]
    Date { lineno: usize, value: String },
    #[error("line {lineno}: invalid count {value:?}")]
    Count { lineno: usize, value: String },
    #[error("line {lineno}: contribution count cannot be negative (got {count})")]
    NegativeCount { lineno: usize, count: i64 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use time::macros::date;

    #[test]
    fn test_parse() {
        let log = CountLog::parse(concat!(
            "# morning runs\n",
            "2025-01-20\n",
            "\n",
            "2025-01-21 3\n",
            "  2025-01-20   2  \n",
            "2025-01-22 0\n",
        ))
        .unwrap();
        assert_eq!(log.count(date!(2025 - 01 - 19)), 0);
        assert_eq!(log.count(date!(2025 - 01 - 20)), 3);
        assert_eq!(log.count(date!(2025 - 01 - 21)), 3);
        assert_eq!(log.count(date!(2025 - 01 - 22)), 0);
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(CountLog::parse("").unwrap(), CountLog::default());
    }

    #[test]
    fn test_negative_count() {
        let r = CountLog::parse("2025-01-20 1\n2025-01-21 -2\n");
        assert!(matches!(
            r,
            Err(CountLogError::NegativeCount {
                lineno: 2,
                count: -2
            })
        ));
    }

    #[test]
    fn test_bad_date() {
        let r = CountLog::parse("2025-02-30\n");
        assert!(matches!(r, Err(CountLogError::Date { lineno: 1, .. })));
        let r = CountLog::parse("\n\nyesterday 4\n");
        assert!(matches!(r, Err(CountLogError::Date { lineno: 3, .. })));
    }

    #[test]
    fn test_bad_count() {
        let r = CountLog::parse("2025-01-20 lots\n");
        assert!(matches!(r, Err(CountLogError::Count { lineno: 1, .. })));
        let r = CountLog::parse("2025-01-20 99999999999\n");
        assert!(matches!(r, Err(CountLogError::Count { lineno: 1, .. })));
    }

    #[test]
    fn test_trailing_garbage() {
        let r = CountLog::parse("2025-01-20 1 2\n");
        assert!(matches!(r, Err(CountLogError::Syntax { lineno: 1 })));
    }

    #[test]
    fn test_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "2024-02-29 4").unwrap();
        writeln!(file, "2024-03-01").unwrap();
        file.flush().unwrap();
        let log = CountLog::load(file.path()).unwrap();
        assert_eq!(log.count(date!(2024 - 02 - 29)), 4);
        assert_eq!(log.count(date!(2024 - 03 - 01)), 1);
    }

    #[test]
    fn test_load_missing() {
        let dir = tempfile::tempdir().unwrap();
        let r = CountLog::load(&dir.path().join("nonexistent.log"));
        assert!(matches!(r, Err(CountLogError::Read { .. })));
    }
}
