//! Scripted demo session shared by the offline and live modes.
//!
//! Synthesizes hand-landmark frames through the real extraction path and
//! pairs them with a scripted classifier, so a checkout with no camera or
//! model still walks the full window → classify → stabilize chain.

use anyhow::Result;
use signpipe::classifier::{ScriptedClassifier, ScriptedStep};
use signpipe::labels::LabelCatalog;
use signpipe::landmarks::{frame_features, HandPoints, LANDMARKS_PER_HAND};
use signpipe::pipeline::FrameSample;

const DEMO_LABELS: [&str; 5] = ["hello", "thanks", "yes", "no", "please"];

pub(crate) fn demo_catalog() -> Result<LabelCatalog> {
    LabelCatalog::from_labels(DEMO_LABELS.iter().map(|label| label.to_string()).collect())
}

/// One detection session: a held first sign, a wobble, a low-confidence
/// reset, a tracking dropout, then a clean switch to the second sign with a
/// transient classifier failure on the way.
pub(crate) fn demo_script(catalog: &LabelCatalog) -> Vec<ScriptedStep> {
    let first = catalog.name_for(0);
    let second = catalog.name_for(1);
    vec![
        ScriptedStep::predict(&first, 0.9),
        ScriptedStep::predict(&first, 0.8),
        ScriptedStep::predict(&second, 0.7),
        ScriptedStep::predict(&first, 0.85),
        ScriptedStep::predict(&first, 0.3),
        ScriptedStep::NoDetection,
        ScriptedStep::predict(&second, 0.8),
        ScriptedStep::predict(&second, 0.9),
        ScriptedStep::Fail("scripted inference hiccup".into()),
        ScriptedStep::predict(&second, 0.85),
        ScriptedStep::predict(&second, 0.9),
    ]
}

pub(crate) fn demo_classifier(catalog: &LabelCatalog) -> ScriptedClassifier {
    ScriptedClassifier::new(demo_script(catalog))
}

/// Frame samples sized so the scripted steps line up with completed windows:
/// `window_frames` pushes fill the window, then one step is consumed per
/// push. A tracking dropout is inserted partway through so the skip policy
/// shows up in the session output.
pub(crate) fn demo_samples(window_frames: usize, script_len: usize) -> Vec<FrameSample> {
    let total_frames = window_frames.saturating_sub(1) + script_len;
    let mut samples = Vec::with_capacity(total_frames + 1);
    for tick in 0..total_frames {
        if tick == window_frames + 2 {
            samples.push(FrameSample::NoDetection);
        }
        samples.push(synthetic_sample(tick));
    }
    samples
}

fn synthetic_sample(tick: usize) -> FrameSample {
    let phase = tick as f32 * 0.25;
    let left = synthetic_hand(phase);
    // The right hand leaves the frame on a cadence, exercising zero-fill.
    let right = (tick % 3 != 0).then(|| synthetic_hand(phase + 1.5));
    match frame_features(Some(&left), right.as_ref()) {
        Some(features) => FrameSample::Features(features),
        None => FrameSample::NoDetection,
    }
}

fn synthetic_hand(phase: f32) -> HandPoints {
    let mut points = [[0.0_f32; 3]; LANDMARKS_PER_HAND];
    for (index, point) in points.iter_mut().enumerate() {
        let t = phase + index as f32 * 0.05;
        point[0] = 0.5 + 0.3 * t.sin();
        point[1] = 0.5 + 0.3 * t.cos();
        point[2] = 0.05 * (t * 2.0).sin();
    }
    points
}
