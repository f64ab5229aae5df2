//! MOTChallenge seqinfo.ini metadata parser.

use crate::{Error, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

/// Metadata of a MOTChallenge sequence, read from a `seqinfo.ini` file:
///
/// ```ini
/// [Sequence]
/// name=MOT17-02-FRCNN
/// imDir=img1
/// frameRate=30
/// seqLength=600
/// imWidth=1920
/// imHeight=1080
/// imExt=.jpg
/// ```
///
/// Section headers, blank lines, and `;` comments are ignored; every
/// `key=value` pair is kept. Values are validated lazily, when an
/// accessor asks for them.
#[derive(Debug, Clone)]
pub struct SequenceInfo {
    path: String,
    values: HashMap<String, String>,
}

impl SequenceInfo {
    /// Read a `seqinfo.ini` file.
    ///
    /// # Errors
    /// Fails only if the file cannot be opened or read; missing keys
    /// surface later, from the accessor that needs them.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let display = path.as_ref().to_string_lossy().to_string();
        let file = File::open(&path).map_err(|e| {
            Error::IoError(std::io::Error::new(
                e.kind(),
                format!("failed to open sequence info file '{}': {}", display, e),
            ))
        })?;

        let reader = BufReader::new(file);
        let mut values = HashMap::new();
        for line in reader.lines() {
            let line = line.map_err(Error::IoError)?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('[') || line.starts_with(';') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                values.insert(key.trim().to_string(), value.trim().to_string());
            }
        }

        Ok(Self {
            path: display,
            values,
        })
    }

    /// Look up a raw value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Look up a value by key, or fail with the key and file path.
    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key).ok_or_else(|| Error::MissingKey {
            key: key.to_string(),
            path: self.path.clone(),
        })
    }

    /// Look up a value and parse it as an integer.
    pub fn require_int(&self, key: &str) -> Result<i64> {
        self.require_parsed(key)
    }

    fn require_parsed<T: FromStr>(&self, key: &str) -> Result<T> {
        let value = self.require(key)?;
        value.parse().map_err(|_| Error::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            path: self.path.clone(),
        })
    }

    /// Sequence name (`name`).
    pub fn name(&self) -> Result<&str> {
        self.require("name")
    }

    /// Image directory relative to the sequence root (`imDir`).
    pub fn im_dir(&self) -> Result<&str> {
        self.require("imDir")
    }

    /// Image file extension (`imExt`).
    pub fn im_ext(&self) -> Result<&str> {
        self.require("imExt")
    }

    /// Number of frames in the sequence (`seqLength`).
    pub fn seq_length(&self) -> Result<usize> {
        self.require_parsed("seqLength")
    }

    /// Capture frame rate (`frameRate`).
    pub fn frame_rate(&self) -> Result<f64> {
        self.require_parsed("frameRate")
    }

    /// Frame width in pixels (`imWidth`).
    pub fn im_width(&self) -> Result<u32> {
        self.require_parsed("imWidth")
    }

    /// Frame height in pixels (`imHeight`).
    pub fn im_height(&self) -> Result<u32> {
        self.require_parsed("imHeight")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_seqinfo() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[Sequence]").unwrap();
        writeln!(file, "name=MOT17-02-FRCNN").unwrap();
        writeln!(file, "imDir=img1").unwrap();
        writeln!(file, "frameRate=30").unwrap();
        writeln!(file, "seqLength=600").unwrap();
        writeln!(file, "imWidth=1920").unwrap();
        writeln!(file, "imHeight=1080").unwrap();
        writeln!(file, "imExt=.jpg").unwrap();
        file
    }

    #[test]
    fn test_typed_accessors() {
        let file = create_temp_seqinfo();
        let info = SequenceInfo::from_path(file.path()).unwrap();

        assert_eq!(info.name().unwrap(), "MOT17-02-FRCNN");
        assert_eq!(info.im_dir().unwrap(), "img1");
        assert_eq!(info.im_ext().unwrap(), ".jpg");
        assert_eq!(info.seq_length().unwrap(), 600);
        assert_eq!(info.frame_rate().unwrap(), 30.0);
        assert_eq!(info.im_width().unwrap(), 1920);
        assert_eq!(info.im_height().unwrap(), 1080);
    }

    #[test]
    fn test_generic_lookup() {
        let file = create_temp_seqinfo();
        let info = SequenceInfo::from_path(file.path()).unwrap();

        assert_eq!(info.get("seqLength"), Some("600"));
        assert_eq!(info.get("nonexistent"), None);
        assert_eq!(info.require_int("imWidth").unwrap(), 1920);
    }

    #[test]
    fn test_missing_key() {
        let file = create_temp_seqinfo();
        let info = SequenceInfo::from_path(file.path()).unwrap();

        let err = info.require("nonexistent").unwrap_err();
        assert!(matches!(err, Error::MissingKey { .. }));
        assert!(err.to_string().contains("nonexistent"));
    }

    #[test]
    fn test_invalid_value() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "seqLength=many").unwrap();

        let info = SequenceInfo::from_path(file.path()).unwrap();
        let err = info.seq_length().unwrap_err();
        assert!(matches!(err, Error::InvalidValue { .. }));
        assert!(err.to_string().contains("many"));
    }

    #[test]
    fn test_ignores_sections_comments_blanks() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[Sequence]").unwrap();
        writeln!(file, "; capture metadata").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "seqLength = 42").unwrap();

        let info = SequenceInfo::from_path(file.path()).unwrap();
        assert_eq!(info.seq_length().unwrap(), 42);
        assert_eq!(info.get("[Sequence]"), None);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SequenceInfo::from_path("/no/such/seqinfo.ini").unwrap_err();
        assert!(matches!(err, Error::IoError(_)));
        assert!(err.to_string().contains("seqinfo.ini"));
    }
}
