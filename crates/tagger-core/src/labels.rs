//! Machine label parsing.
//!
//! Detector output is one YOLO text file per image: `class cx cy w h [extra...]`
//! per line, all geometry normalized. Only the four geometry values are kept.
//! Lines that cannot be used are skipped with a warning so a single bad row
//! never hides the rest of the file.

use crate::error::Result;
use crate::models::LabelBox;
use crate::store::read_if_exists;
use std::path::Path;
use tracing::{debug, warn};

/// Class token plus four geometry values.
const MIN_TOKENS: usize = 5;

/// Read and parse the machine label file for an image.
///
/// A missing file is not an error and yields no boxes.
pub fn read_machine_labels(path: &Path) -> Result<Vec<LabelBox>> {
    let Some(contents) = read_if_exists(path)? else {
        debug!("No machine labels at {}", path.display());
        return Ok(Vec::new());
    };
    Ok(parse_machine_labels(&contents, path))
}

/// Parse label bytes, skipping blank, short, undecodable and malformed lines.
///
/// Each line is decoded on its own, so a stray non-UTF-8 byte only costs
/// the line it sits on. Output order follows line order.
pub fn parse_machine_labels(contents: &[u8], source: &Path) -> Vec<LabelBox> {
    contents
        .split(|&b| b == b'\n')
        .enumerate()
        .filter_map(|(idx, raw)| {
            let parsed = std::str::from_utf8(raw)
                .map_err(|e| format!("not valid UTF-8 ({e})"))
                .and_then(parse_label_line);
            match parsed {
                Ok(parsed) => parsed,
                Err(message) => {
                    warn!(
                        "Skipping label line {} in {}: {}",
                        idx + 1,
                        source.display(),
                        message
                    );
                    None
                }
            }
        })
        .collect()
}

/// Count non-blank lines without parsing or decoding them.
///
/// Listings use this as the box count of images nobody has curated yet.
pub fn count_label_lines(path: &Path) -> Result<usize> {
    Ok(read_if_exists(path)?
        .map(|contents| {
            contents
                .split(|&b| b == b'\n')
                .filter(|line| !line.iter().all(u8::is_ascii_whitespace))
                .count()
        })
        .unwrap_or(0))
}

/// Parse one line. `Ok(None)` means the line is silently ignorable.
fn parse_label_line(line: &str) -> std::result::Result<Option<LabelBox>, String> {
    let tokens: Vec<&str> = line.split_whitespace().take(MIN_TOKENS).collect();
    if tokens.is_empty() {
        return Ok(None);
    }
    if tokens.len() < MIN_TOKENS {
        debug!("Ignoring short label line ({} tokens)", tokens.len());
        return Ok(None);
    }

    let mut yolo = [0.0f64; 4];
    for (slot, raw) in yolo.iter_mut().zip(&tokens[1..MIN_TOKENS]) {
        *slot = raw
            .parse::<f64>()
            .map_err(|_| format!("invalid coordinate '{raw}'"))?;
    }

    let label_box = LabelBox::unlabeled(yolo);
    label_box.validate_geometry()?;
    Ok(Some(label_box))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BoxStatus;
    use tempfile::TempDir;

    fn parse(text: &str) -> Vec<LabelBox> {
        parse_machine_labels(text.as_bytes(), Path::new("cow001.txt"))
    }

    #[test]
    fn test_parses_valid_line() {
        let boxes = parse("0 0.50 0.50 0.20 0.30\n");
        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].yolo, [0.5, 0.5, 0.2, 0.3]);
        assert_eq!(boxes[0].status, BoxStatus::Unknown);
        assert_eq!(boxes[0].cow_id, None);
    }

    #[test]
    fn test_malformed_line_is_skipped() {
        let boxes = parse("0 0.1 0.2 0.3 0.4\n0 bad\n");
        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].yolo, [0.1, 0.2, 0.3, 0.4]);
    }

    #[test]
    fn test_bad_number_skips_only_that_line() {
        let boxes = parse("0 0.1 0.2 0.3 0.4\n0 0.1 x 0.3 0.4\n1 0.6 0.7 0.1 0.1\n");
        assert_eq!(boxes.len(), 2);
        assert_eq!(boxes[1].yolo, [0.6, 0.7, 0.1, 0.1]);
    }

    #[test]
    fn test_trailing_values_are_ignored() {
        let boxes = parse("0 0.5 0.5 0.2 0.3 0.51 0.49 2 0.48 0.52 2\n");
        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].yolo, [0.5, 0.5, 0.2, 0.3]);
    }

    #[test]
    fn test_blank_lines_and_order() {
        let boxes = parse("\n0 0.1 0.1 0.1 0.1\n   \n0 0.9 0.9 0.1 0.1\n\n");
        let centers: Vec<f64> = boxes.iter().map(|b| b.yolo[0]).collect();
        assert_eq!(centers, vec![0.1, 0.9]);
    }

    #[test]
    fn test_degenerate_geometry_is_skipped() {
        let boxes = parse("0 0.5 0.5 0 0.3\n0 0.5 0.5 0.2 0.3\n0 nan 0.5 0.2 0.3\n");
        assert_eq!(boxes.len(), 1);
    }

    #[test]
    fn test_undecodable_line_is_skipped() {
        let bytes = b"0 0.1 0.2 0.3 0.4\n# note \xff\n1 0.6 0.7 0.1 0.1\r\n";
        let boxes = parse_machine_labels(bytes, Path::new("cow001.txt"));
        let centers: Vec<f64> = boxes.iter().map(|b| b.yolo[0]).collect();
        assert_eq!(centers, vec![0.1, 0.6]);
    }

    #[test]
    fn test_count_label_lines_tolerates_bad_bytes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cow001.txt");
        std::fs::write(&path, b"0 0.1 0.1 0.1 0.1\n\n# note \xff").unwrap();

        assert_eq!(count_label_lines(&path).unwrap(), 2);
        assert_eq!(read_machine_labels(&path).unwrap().len(), 1);
    }

    #[test]
    fn test_missing_file_yields_no_boxes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.txt");
        assert!(read_machine_labels(&path).unwrap().is_empty());
        assert_eq!(count_label_lines(&path).unwrap(), 0);
    }

    #[test]
    fn test_count_label_lines_counts_non_blank() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cow001.txt");
        std::fs::write(&path, "0 0.1 0.1 0.1 0.1\n\n0 bad\n  \n").unwrap();

        assert_eq!(count_label_lines(&path).unwrap(), 2);
        assert_eq!(read_machine_labels(&path).unwrap().len(), 1);
    }
}
