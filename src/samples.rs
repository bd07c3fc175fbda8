//! Reference measurement data used as benchmark input.
//!
//! Two specimens, P and Q, measured across a sweep from 400 to 700 in steps
//! of 10.

/// First point of the sweep.
pub const SWEEP_START: u32 = 400;

/// Distance between two consecutive points of the sweep.
pub const SWEEP_STEP: u32 = 10;

/// Number of points per specimen.
pub const SAMPLE_LEN: usize = 31;

/// A named series of measurements over the sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Specimen {
    pub name: &'static str,
    values: [f64; SAMPLE_LEN],
}

impl Specimen {
    /// Measured values in sweep order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Position of each value on the sweep (400, 410, ..., 700).
    pub fn sweep(&self) -> impl Iterator<Item = u32> {
        (0..SAMPLE_LEN as u32).map(|idx| SWEEP_START + idx * SWEEP_STEP)
    }

    /// `(sweep position, value)` pairs.
    pub fn measurements(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.sweep().zip(self.values.iter().copied())
    }

    /// Value measured at `position`, if it lies on the sweep.
    pub fn value_at(&self, position: u32) -> Option<f64> {
        if position < SWEEP_START || (position - SWEEP_START) % SWEEP_STEP != 0 {
            return None;
        }

        let idx = ((position - SWEEP_START) / SWEEP_STEP) as usize;
        self.values.get(idx).copied()
    }
}

/// Specimen P.
pub const SPECIMEN_P: Specimen = Specimen {
    name: "P",
    values: [
        17.38, 17.98, 18.58, 20.63, 22.67, 24.10, 25.53, 26.08, 26.63, 26.60, 26.57, 26.30,
        26.02, 25.93, 25.84, 25.71, 25.68, 24.63, 23.57, 21.72, 19.77, 17.63, 15.48, 13.60,
        11.71, 14.42, 17.13, 26.37, 35.61, 47.27, 58.92,
    ],
};

/// Specimen Q.
pub const SPECIMEN_Q: Specimen = Specimen {
    name: "Q",
    values: [
        14.63, 15.77, 16.90, 18.79, 20.68, 23.58, 26.47, 29.75, 33.03, 33.14, 33.25, 30.97,
        28.69, 26.40, 24.11, 22.54, 20.97, 20.03, 19.09, 18.76, 18.42, 19.91, 21.40, 22.40,
        23.57, 26.97, 30.36, 38.14, 45.92, 54.59, 63.26,
    ],
};
