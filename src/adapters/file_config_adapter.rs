//! INI configuration read through `configparser`.
//!
//! Section and key names are case-insensitive; values keep their case.

use crate::domain::error::SmacrossError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

#[derive(Debug)]
pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SmacrossError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config
            .load(path)
            .map_err(|reason| SmacrossError::ConfigParse {
                file: path.display().to_string(),
                reason,
            })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, SmacrossError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|reason| SmacrossError::ConfigParse {
                file: "<inline>".to_string(),
                reason,
            })?;
        Ok(Self { config })
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn reads_backtest_ini() {
        let adapter = FileConfigAdapter::from_string(
            "[data]\ndirectory = /srv/prices\n\n[strategy]\nname = Golden Cross\nfast_window = 50\n",
        )
        .unwrap();

        assert_eq!(
            adapter.get_string("data", "directory").as_deref(),
            Some("/srv/prices")
        );
        assert_eq!(
            adapter.get_string("strategy", "name").as_deref(),
            Some("Golden Cross")
        );
        assert!(adapter.has_key("strategy", "fast_window"));
        assert!(!adapter.has_key("strategy", "slow_window"));
        assert_eq!(adapter.get_string("report", "output"), None);
    }

    #[test]
    fn section_and_key_names_ignore_case() {
        let adapter = FileConfigAdapter::from_string("[Backtest]\nSymbol = nsei\n").unwrap();
        assert_eq!(
            adapter.get_string("backtest", "symbol").as_deref(),
            Some("nsei")
        );
    }

    #[test]
    fn window_falls_back_only_when_unparseable_or_absent() {
        let adapter = FileConfigAdapter::from_string(
            "[strategy]\nslow_window = 200\nfast_window = abc\n",
        )
        .unwrap();
        assert_eq!(adapter.get_int("strategy", "slow_window", 0), 200);
        assert_eq!(adapter.get_int("strategy", "fast_window", 50), 50);
        assert_eq!(adapter.get_int("strategy", "volume_window", 30), 30);
    }

    #[test]
    fn from_file_reads_report_section() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[report]\noutput = /tmp/annotated.csv\n").unwrap();

        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("report", "output").as_deref(),
            Some("/tmp/annotated.csv")
        );
    }

    #[test]
    fn missing_file_is_config_parse_error() {
        let err = FileConfigAdapter::from_file("/nonexistent/smacross.ini").unwrap_err();
        assert!(
            matches!(err, SmacrossError::ConfigParse { file, .. } if file == "/nonexistent/smacross.ini")
        );
    }
}
