// AudioFrame - one fixed-size read of signed 16-bit mono samples
//
// Frames carry no timestamp; arrival order is the only ordering signal.

/// Ordered block of PCM samples delivered by one stream read
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AudioFrame {
    samples: Vec<i16>,
}

impl AudioFrame {
    pub fn new(samples: Vec<i16>) -> Self {
        Self { samples }
    }

    /// All-zero frame of `len` samples
    pub fn silent(len: usize) -> Self {
        Self {
            samples: vec![0; len],
        }
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl From<Vec<i16>> for AudioFrame {
    fn from(samples: Vec<i16>) -> Self {
        Self::new(samples)
    }
}

impl AsRef<[i16]> for AudioFrame {
    fn as_ref(&self) -> &[i16] {
        &self.samples
    }
}
