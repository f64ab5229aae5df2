//! Frame-indexed store for MOTChallenge detection files.

use crate::record::Detection;
use crate::{Error, Result};
use log::{debug, info};
use nalgebra::DMatrix;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// In-memory index from frame id to the detections of that frame.
///
/// Built once from a detection file in CSV form:
/// `frame,id,bb_left,bb_top,bb_width,bb_height,conf,x,y,z`
/// where only the frame, box geometry, and confidence columns are used.
/// Parsing is permissive: comment lines (first field starting with `#`),
/// lines with fewer than seven fields, and lines with unparseable numeric
/// fields contribute nothing and never abort the load. A file that cannot
/// be opened or read at all is the only construction failure.
///
/// After construction the store is immutable, so it can be shared across
/// threads freely; queries never mutate it.
#[derive(Debug, Default, Clone)]
pub struct DetectionStore {
    frames: HashMap<usize, Vec<Detection>>,
}

/// Per-load accounting, reported through the `log` facade only.
#[derive(Debug, Default)]
struct LoadStats {
    records: usize,
    skipped: usize,
}

impl DetectionStore {
    /// Load a detection file from disk.
    ///
    /// # Arguments
    /// * `path` - Path to the detection file (conventionally `det/det.txt`)
    ///
    /// # Errors
    /// Fails only if the file cannot be opened or read. Content
    /// malformation is handled by skipping the offending lines.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            Error::IoError(std::io::Error::new(
                e.kind(),
                format!("failed to open detection file '{}': {}", path.display(), e),
            ))
        })?;

        let (store, stats) = Self::load(BufReader::new(file))?;
        info!(
            "loaded {} detections across {} frames from '{}' ({} lines skipped)",
            stats.records,
            store.num_frames(),
            path.display(),
            stats.skipped
        );
        store.log_probe_counts();
        Ok(store)
    }

    /// Parse detection records from any buffered reader.
    ///
    /// Same per-line behavior as [`from_path`](Self::from_path); only read
    /// failures surface as errors.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let (store, _) = Self::load(reader)?;
        store.log_probe_counts();
        Ok(store)
    }

    fn load<R: BufRead>(reader: R) -> Result<(Self, LoadStats)> {
        let mut frames: HashMap<usize, Vec<Detection>> = HashMap::new();
        let mut stats = LoadStats::default();

        for line in reader.lines() {
            let line = line.map_err(Error::IoError)?;
            match parse_line(&line) {
                Some((frame, det)) => {
                    frames.entry(frame).or_default().push(det);
                    stats.records += 1;
                }
                None => stats.skipped += 1,
            }
        }

        Ok((Self { frames }, stats))
    }

    /// Detection counts for a few probe frames, for operator visibility.
    /// The later probes are only reported when frame 1 is present.
    fn log_probe_counts(&self) {
        if let Some(first) = self.frames.get(&1) {
            debug!("frame 1 detections: {}", first.len());
            for probe in [30, 50, 100] {
                if let Some(dets) = self.frames.get(&probe) {
                    debug!("frame {} detections: {}", probe, dets.len());
                }
            }
        }
    }

    /// Get the detections of a frame as an `(N, 5)` array.
    ///
    /// Rows are `[x1, y1, x2, y2, score]` in file-encounter order. A frame
    /// with no records yields a `(0, 5)` array, never an absent result, so
    /// callers handle empty and non-empty frames uniformly. Each call
    /// materializes a fresh copy; repeated calls return equal arrays.
    pub fn get(&self, frame_id: usize) -> DMatrix<f32> {
        match self.frames.get(&frame_id) {
            Some(records) if !records.is_empty() => {
                let mut data = Vec::with_capacity(records.len() * 5);
                for det in records {
                    data.extend_from_slice(&det.to_row());
                }
                DMatrix::from_row_slice(records.len(), 5, &data)
            }
            _ => DMatrix::zeros(0, 5),
        }
    }

    /// Borrow the detections of a frame without copying.
    ///
    /// Unknown frames yield an empty slice.
    pub fn records(&self, frame_id: usize) -> &[Detection] {
        self.frames
            .get(&frame_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of frames holding at least one detection.
    pub fn num_frames(&self) -> usize {
        self.frames.len()
    }

    /// Total number of detection records in the store.
    pub fn num_detections(&self) -> usize {
        self.frames.values().map(Vec::len).sum()
    }

    /// True if no line of the input produced a record.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Highest frame id holding a detection, if any.
    pub fn max_frame(&self) -> Option<usize> {
        self.frames.keys().copied().max()
    }

    /// Frame ids holding detections, in ascending order.
    pub fn frame_ids(&self) -> Vec<usize> {
        let mut ids: Vec<usize> = self.frames.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Iterate frames `1..=max_frame`, yielding every frame's array
    /// including `(0, 5)` arrays for frames with no records.
    ///
    /// An empty store yields nothing.
    pub fn frames(&self) -> Frames<'_> {
        self.frames_to(self.max_frame().unwrap_or(0))
    }

    /// Iterate frames `1..=last` regardless of file content, for driving
    /// a sequence of known length.
    pub fn frames_to(&self, last: usize) -> Frames<'_> {
        Frames {
            store: self,
            next: 1,
            remaining: last,
        }
    }
}

/// Borrowing iterator over per-frame detection arrays.
///
/// Yields `(frame_id, array)` pairs; see [`DetectionStore::frames`].
#[derive(Debug)]
pub struct Frames<'a> {
    store: &'a DetectionStore,
    next: usize,
    remaining: usize,
}

impl Iterator for Frames<'_> {
    type Item = (usize, DMatrix<f32>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let frame = self.next;
        self.next = self.next.wrapping_add(1);
        self.remaining -= 1;
        Some((frame, self.store.get(frame)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Frames<'_> {}

/// Parse one detection line, or `None` for any line that contributes no
/// record: empty lines, comments, short lines, and unparseable fields.
///
/// Expected fields: `frame,id,x,y,w,h,score` with anything after the
/// seventh field ignored. The second field (track id) is ignored too.
fn parse_line(line: &str) -> Option<(usize, Detection)> {
    if line.is_empty() {
        return None;
    }

    let fields: Vec<&str> = line.split(',').collect();
    // Comment convention: '#' opening the first raw field.
    if fields[0].starts_with('#') {
        return None;
    }
    if fields.len() < 7 {
        return None;
    }

    let frame = parse_frame_id(fields[0])?;
    let x = parse_float(fields[2])?;
    let y = parse_float(fields[3])?;
    let w = parse_float(fields[4])?;
    let h = parse_float(fields[5])?;
    let score = parse_float(fields[6])?;

    Some((frame, Detection::from_tlwh(x, y, w, h, score)))
}

/// Parse a frame id, tolerating a floating-point textual form ("5.0" is
/// frame 5, truncated toward zero). Negative, non-finite, and
/// out-of-range values are malformed.
fn parse_frame_id(field: &str) -> Option<usize> {
    let field = field.trim();
    if let Ok(id) = field.parse::<usize>() {
        return Some(id);
    }

    let value = field.parse::<f64>().ok()?;
    if !value.is_finite() {
        return None;
    }

    let truncated = value.trunc();
    if truncated < 0.0 || truncated >= usize::MAX as f64 {
        return None;
    }
    Some(truncated as usize)
}

fn parse_float(field: &str) -> Option<f64> {
    field.trim().parse::<f64>().ok()
}
