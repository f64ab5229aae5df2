//! A MOTChallenge sequence: metadata plus its detection file.

use crate::seqinfo::SequenceInfo;
use crate::store::{DetectionStore, Frames};
use crate::Result;
use std::path::Path;

/// A sequence directory bound to its detections.
///
/// The MOTChallenge layout is assumed:
///
/// ```text
/// MOT17-02-FRCNN/
///   seqinfo.ini
///   det/det.txt
///   img1/...
/// ```
///
/// The declared `seqLength` drives dense frame iteration, so a tracker
/// sees every frame of the sequence, including frames with no detections.
#[derive(Debug, Clone)]
pub struct Sequence {
    info: SequenceInfo,
    store: DetectionStore,
    length: usize,
}

impl Sequence {
    /// Open a sequence directory, reading `seqinfo.ini` and `det/det.txt`.
    ///
    /// # Errors
    /// Either file failing to open or read is an I/O error. A missing or
    /// non-numeric `seqLength` is a metadata error; the length is needed
    /// to drive iteration.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let info = SequenceInfo::from_path(dir.join("seqinfo.ini"))?;
        let store = DetectionStore::from_path(dir.join("det").join("det.txt"))?;
        Self::from_parts(info, store)
    }

    /// Assemble a sequence from already-loaded parts, for layouts that
    /// keep detections somewhere other than `det/det.txt`.
    pub fn from_parts(info: SequenceInfo, store: DetectionStore) -> Result<Self> {
        let length = info.seq_length()?;
        Ok(Self {
            info,
            store,
            length,
        })
    }

    /// The sequence metadata.
    pub fn info(&self) -> &SequenceInfo {
        &self.info
    }

    /// The frame-indexed detection store.
    pub fn detections(&self) -> &DetectionStore {
        &self.store
    }

    /// Declared number of frames (`seqLength`).
    pub fn num_frames(&self) -> usize {
        self.length
    }

    /// Iterate frames `1..=seqLength`, yielding `(frame_id, array)` for
    /// every frame of the sequence, empty frames included.
    pub fn frames(&self) -> Frames<'_> {
        self.store.frames_to(self.length)
    }
}
