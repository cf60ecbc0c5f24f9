//! Capture filename classification and metadata extraction.
//!
//! The Switch names every capture `yyyymmddhhmmssXX-<32 char game id>.<ext>`,
//! 53 characters in total, so all metadata can be read from the filename alone.

use std::ops::Range;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};

/// Total length of a valid capture filename, including the extension.
pub const CAPTURE_NAME_LENGTH: usize = 53;

/// Byte range of the 32 character game id within a capture filename.
pub const GAME_ID_RANGE: Range<usize> = 17..49;

/// Capture type, determined by the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureKind {
    Image,
    Video,
}

impl CaptureKind {
    /// Classify a filename, returning `None` for anything that is not a capture file.
    #[must_use]
    pub fn from_filename(name: &str) -> Option<Self> {
        if name.len() != CAPTURE_NAME_LENGTH {
            return None;
        }
        if name.ends_with(".jpg") {
            Some(Self::Image)
        } else if name.ends_with(".mp4") {
            Some(Self::Video)
        } else {
            None
        }
    }
}

/// A file that passed classification and is queued for organizing.
#[derive(Debug, Clone)]
pub struct CaptureFile {
    pub path: PathBuf,
    pub filename: String,
    pub kind: CaptureKind,
}

impl CaptureFile {
    /// Wrap a path if its filename matches the capture naming convention.
    #[must_use]
    pub fn new(path: PathBuf) -> Option<Self> {
        let filename = crate::path_to_filename_string(&path);
        let kind = CaptureKind::from_filename(&filename)?;
        Some(Self { path, filename, kind })
    }
}

/// Metadata parsed from a capture filename.
///
/// `month` is zero-based (January is 0), matching the capture timestamp encoding.
#[derive(Debug, Clone)]
pub struct Capture {
    pub file: CaptureFile,
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub game_id: String,
}

impl Capture {
    /// Parse the timestamp fields and game id from a classified capture file.
    ///
    /// # Errors
    /// Returns an error if a fixed-offset field does not contain valid digits.
    /// This should not happen for filenames that passed classification.
    pub fn parse(file: &CaptureFile) -> Result<Self> {
        let name = &file.filename;
        let year = digits(name, 0..4)? as u16;
        let month = digits(name, 4..6)?
            .checked_sub(1)
            .with_context(|| format!("Month out of range in capture filename: {name}"))? as u8;
        let day = digits(name, 6..8)? as u8;
        let hour = digits(name, 8..10)? as u8;
        let minute = digits(name, 10..12)? as u8;
        let second = digits(name, 12..14)? as u8;
        let game_id = name
            .get(GAME_ID_RANGE)
            .with_context(|| format!("Missing game id in capture filename: {name}"))?
            .to_string();

        Ok(Self {
            file: file.clone(),
            year,
            month,
            day,
            hour,
            minute,
            second,
            game_id,
        })
    }

    /// Capture timestamp as a [`NaiveDateTime`].
    /// Returns `None` if the parsed fields do not form a valid date.
    #[must_use]
    pub fn datetime(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(
            i32::from(self.year),
            u32::from(self.month) + 1,
            u32::from(self.day),
        )
        .and_then(|date| {
            date.and_hms_opt(
                u32::from(self.hour),
                u32::from(self.minute),
                u32::from(self.second),
            )
        })
    }
}

/// Parse a fixed-offset digit field from a capture filename.
fn digits(name: &str, range: Range<usize>) -> Result<u32> {
    let field = name
        .get(range.clone())
        .with_context(|| format!("Capture filename too short for offsets {range:?}: {name}"))?;
    field
        .parse::<u32>()
        .with_context(|| format!("Invalid digits '{field}' in capture filename: {name}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GAME_ID: &str = "0123456789abcdef0123456789abcdef";

    fn capture_name(stamp: &str, game_id: &str, extension: &str) -> String {
        format!("{stamp}00-{game_id}.{extension}")
    }

    fn capture_file(name: &str) -> CaptureFile {
        CaptureFile::new(PathBuf::from(name)).expect("should classify as capture")
    }

    #[test]
    fn test_classify_image_and_video() {
        let image = capture_name("20230615103045", GAME_ID, "jpg");
        let video = capture_name("20230615103045", GAME_ID, "mp4");
        assert_eq!(image.len(), CAPTURE_NAME_LENGTH);
        assert_eq!(CaptureKind::from_filename(&image), Some(CaptureKind::Image));
        assert_eq!(CaptureKind::from_filename(&video), Some(CaptureKind::Video));
    }

    #[test]
    fn test_classify_rejects_wrong_length() {
        let short = format!("2023061510304500-{}.jpg", &GAME_ID[..31]);
        let long = format!("20230615103045000-{GAME_ID}.jpg");
        assert_eq!(short.len(), CAPTURE_NAME_LENGTH - 1);
        assert_eq!(long.len(), CAPTURE_NAME_LENGTH + 1);
        assert_eq!(CaptureKind::from_filename(&short), None);
        assert_eq!(CaptureKind::from_filename(&long), None);
    }

    #[test]
    fn test_classify_rejects_wrong_extension() {
        let png = capture_name("20230615103045", GAME_ID, "png");
        assert_eq!(png.len(), CAPTURE_NAME_LENGTH);
        assert_eq!(CaptureKind::from_filename(&png), None);
        assert_eq!(CaptureKind::from_filename("not a capture.jpg"), None);
    }

    #[test]
    fn test_parse_timestamp_fields() {
        let file = capture_file(&capture_name("20230615103045", GAME_ID, "jpg"));
        let capture = Capture::parse(&file).expect("should parse");
        assert_eq!(capture.year, 2023);
        // Month is zero-based: June is 5
        assert_eq!(capture.month, 5);
        assert_eq!(capture.day, 15);
        assert_eq!(capture.hour, 10);
        assert_eq!(capture.minute, 30);
        assert_eq!(capture.second, 45);
        assert_eq!(capture.game_id, GAME_ID);
    }

    #[test]
    fn test_parse_game_id_window_ignores_other_offsets() {
        let first = capture_file(&capture_name("20230615103045", GAME_ID, "jpg"));
        let second = capture_file(&capture_name("20241231235959", GAME_ID, "mp4"));
        let a = Capture::parse(&first).expect("should parse");
        let b = Capture::parse(&second).expect("should parse");
        assert_eq!(a.game_id, b.game_id);
    }

    #[test]
    fn test_parse_rejects_zero_month() {
        let file = capture_file(&capture_name("20230015103045", GAME_ID, "jpg"));
        assert!(Capture::parse(&file).is_err());
    }

    #[test]
    fn test_parse_rejects_non_digit_fields() {
        let name = capture_name("2023O615103045", GAME_ID, "jpg");
        let file = CaptureFile {
            path: PathBuf::from(&name),
            filename: name,
            kind: CaptureKind::Image,
        };
        assert!(Capture::parse(&file).is_err());
    }

    #[test]
    fn test_datetime() {
        let file = capture_file(&capture_name("20230615103045", GAME_ID, "jpg"));
        let capture = Capture::parse(&file).expect("should parse");
        let datetime = capture.datetime().expect("should be a valid datetime");
        assert_eq!(datetime.format("%Y-%m-%d %H:%M:%S").to_string(), "2023-06-15 10:30:45");
    }

    #[test]
    fn test_datetime_invalid_day() {
        let file = capture_file(&capture_name("20230699103045", GAME_ID, "jpg"));
        let capture = Capture::parse(&file).expect("should parse fields");
        assert!(capture.datetime().is_none());
    }
}
