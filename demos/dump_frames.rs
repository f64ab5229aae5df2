//! Dump per-frame detection counts from a MOT detection file.
//!
//! Usage:
//!     cargo run --example dump_frames -- path/to/det.txt
//!
//! Set RUST_LOG=debug to see the loader's own diagnostics.

use motstore::DetectionStore;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .ok_or("expected a detection file path")?;

    let store = DetectionStore::from_path(&path)?;
    println!(
        "{}: {} detections across {} frames (max frame {})",
        path,
        store.num_detections(),
        store.num_frames(),
        store.max_frame().unwrap_or(0)
    );

    for (frame, boxes) in store.frames() {
        if boxes.nrows() > 0 {
            println!("frame {:>6}: {:>4} detections", frame, boxes.nrows());
        }
    }

    Ok(())
}
