//! Progress event types for conversion and packaging.
//!
//! Provides callback-based progress reporting that decouples the conversion
//! logic from presentation (the CLI drives an indicatif bar from these).

use crate::face::CubeFace;

/// Progress events emitted while a conversion runs.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// The source image was decoded.
    Decoded {
        /// Source width in pixels.
        width: u32,
        /// Source height in pixels.
        height: u32,
    },

    /// One face has been resampled and encoded.
    FaceExtracted {
        /// Which face completed.
        face: CubeFace,
        /// Overall extraction progress, `0.0..=100.0`.
        percent: f64,
    },

    /// The pack archive has been serialized.
    ArchiveWritten {
        /// Number of entries in the archive.
        entries: usize,
        /// Size of the archive in bytes.
        bytes: usize,
    },
}

impl ProgressEvent {
    /// Extraction percentage carried by this event, if any.
    pub fn percent(&self) -> Option<f64> {
        match self {
            Self::FaceExtracted { percent, .. } => Some(*percent),
            _ => None,
        }
    }
}

/// Callback type for receiving progress events.
pub type ProgressCallback = Box<dyn Fn(ProgressEvent) + Send + Sync>;

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn callback_receives_events_in_order() {
        let events: Arc<Mutex<Vec<ProgressEvent>>> = Arc::new(Mutex::new(Vec::new()));
        let events_clone = Arc::clone(&events);

        let callback: ProgressCallback = Box::new(move |event| {
            let Ok(mut guard) = events_clone.lock() else {
                return;
            };
            guard.push(event);
        });

        callback(ProgressEvent::Decoded {
            width: 400,
            height: 200,
        });
        callback(ProgressEvent::FaceExtracted {
            face: CubeFace::Left,
            percent: 16.67,
        });
        callback(ProgressEvent::ArchiveWritten {
            entries: 8,
            bytes: 1024,
        });

        let guard = events.lock().unwrap_or_else(|e| e.into_inner());
        assert_eq!(guard.len(), 3);
        assert!(matches!(guard[0], ProgressEvent::Decoded { width: 400, .. }));
        assert_eq!(guard[1].percent(), Some(16.67));
        assert_eq!(guard[2].percent(), None);
    }
}
