//! Pitch constants.

/// Concert pitch A4.
pub const A4: f64 = 440.0;

/// Semitone offsets of a major scale, root to octave.
pub const MAJOR_SCALE_STEPS: [i32; 8] = [0, 2, 4, 5, 7, 9, 11, 12];

/// Returns the frequency `semitones` above (or below) `root_hz` in
/// twelve-tone equal temperament.
pub fn semitone(root_hz: f64, semitones: i32) -> f64 {
    root_hz * 2f64.powf(semitones as f64 / 12.0)
}

/// Returns the eight frequencies of the major scale on `root_hz`, ascending.
pub fn major_scale_frequencies(root_hz: f64) -> [f64; 8] {
    MAJOR_SCALE_STEPS.map(|step| semitone(root_hz, step))
}
