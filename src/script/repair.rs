use std::{collections::BTreeSet, fs::File, io::BufReader, path::Path};

use crate::{
    foundation::error::{PapercastError, PapercastResult},
    script::model::{AnimationStep, NarrationSegment, Pacing},
    script::text::{estimate_duration, extract_emphasis, normalize_sentence, split_sentences},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
/// Tuning knobs for segment repair.
pub struct RepairOpts {
    /// Speaking rate used to estimate durations.
    pub words_per_minute: f64,
    /// Floor for estimated segment durations, seconds.
    pub min_segment_secs: f64,
    /// Highlight phrases kept per step when synthesizing narration.
    pub max_highlight_phrases: usize,
    /// Emphasis words kept per segment.
    pub max_emphasis: usize,
}

impl Default for RepairOpts {
    fn default() -> Self {
        Self {
            words_per_minute: 150.0,
            min_segment_secs: 2.5,
            max_highlight_phrases: 3,
            max_emphasis: 2,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// A section as proposed by the content generator, before alignment.
pub struct RawSection {
    /// Identifier of the section.
    pub section_id: String,
    /// Human title.
    #[serde(default)]
    pub title: String,
    /// Concept the section explains.
    #[serde(default)]
    pub concept: String,
    /// Full narration text.
    #[serde(default)]
    pub full_text: String,
    /// Proposed narration segments, possibly misaligned with `steps`.
    #[serde(default)]
    pub segments: Vec<NarrationSegment>,
    /// Visual steps in order.
    #[serde(default)]
    pub steps: Vec<AnimationStep>,
}

impl RawSection {
    /// Parse a raw section from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> PapercastResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| PapercastError::serde(format!("parse raw section JSON: {e}")))
    }

    /// Parse a raw section from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> PapercastResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PapercastError::validation(format!(
                "open raw section JSON '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Segments aligned 1:1 with this section's steps.
    pub fn repaired_segments(&self, opts: &RepairOpts) -> Vec<NarrationSegment> {
        repair_section_segments(self, opts)
    }
}

/// Align a section's narration segments with its steps.
///
/// With at least one step the result has exactly one non-empty segment per step. Aligned
/// input (same length, more than one distinct text) is only re-synced: step ids and
/// durations are overwritten. Anything else is regenerated from the narration text and
/// the steps themselves. With zero steps the segments pass through untouched.
#[tracing::instrument(skip(raw, opts), fields(section = %raw.section_id))]
pub fn repair_section_segments(raw: &RawSection, opts: &RepairOpts) -> Vec<NarrationSegment> {
    if raw.steps.is_empty() {
        tracing::warn!(
            segments = raw.segments.len(),
            "section has no steps, segments left as-is"
        );
        return raw.segments.clone();
    }

    if is_aligned(&raw.segments, &raw.steps) {
        tracing::debug!(steps = raw.steps.len(), "segments aligned, re-syncing");
        return raw
            .segments
            .iter()
            .zip(&raw.steps)
            .map(|(seg, step)| NarrationSegment {
                step_id: step.id.clone(),
                estimated_duration: step_duration(step, &seg.text, opts),
                ..seg.clone()
            })
            .collect();
    }

    tracing::debug!(
        segments = raw.segments.len(),
        steps = raw.steps.len(),
        "segments misaligned, regenerating"
    );
    regenerate(raw, opts)
}

fn is_aligned(segments: &[NarrationSegment], steps: &[AnimationStep]) -> bool {
    if segments.len() != steps.len() || segments.iter().any(|s| s.text.trim().is_empty()) {
        return false;
    }
    let distinct: BTreeSet<String> = segments
        .iter()
        .map(|s| s.text.trim().to_lowercase())
        .collect();
    distinct.len() > 1
}

fn step_duration(step: &AnimationStep, text: &str, opts: &RepairOpts) -> f64 {
    step.authored_duration()
        .unwrap_or_else(|| estimate_duration(text, opts.words_per_minute, opts.min_segment_secs))
}

fn regenerate(raw: &RawSection, opts: &RepairOpts) -> Vec<NarrationSegment> {
    let source = if raw.full_text.trim().is_empty() {
        raw.segments
            .iter()
            .map(|s| s.text.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        raw.full_text.clone()
    };
    let sentences = split_sentences(&source);

    let mut used: BTreeSet<String> = BTreeSet::new();
    let mut out = Vec::with_capacity(raw.steps.len());
    for (i, step) in raw.steps.iter().enumerate() {
        let phrases = highlight_phrases(step, opts.max_highlight_phrases);

        let candidates = [
            sentences.get(i).map(|s| normalize_sentence(s)),
            spotlight_sentence(&phrases, raw),
            Some(normalize_sentence(&step.description)),
        ];
        let text = candidates
            .into_iter()
            .flatten()
            .find(|t| !t.is_empty() && !used.contains(&t.to_lowercase()))
            .unwrap_or_else(|| ordinal_sentence(i + 1, raw));
        used.insert(text.to_lowercase());

        out.push(NarrationSegment {
            id: format!("seg-{}-{}", raw.section_id, i + 1),
            emphasis: extract_emphasis(&phrases, &text, opts.max_emphasis),
            step_id: step.id.clone(),
            estimated_duration: step_duration(step, &text, opts),
            start_time: 0.0,
            end_time: 0.0,
            pacing: Pacing::Normal,
            text,
        });
    }
    out
}

fn highlight_phrases(step: &AnimationStep, max: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for phrase in step.elements.iter().filter_map(|e| e.highlight_phrase()) {
        if out.len() >= max {
            break;
        }
        if !out.iter().any(|p| p.eq_ignore_ascii_case(phrase)) {
            out.push(phrase.to_owned());
        }
    }
    out
}

fn topic<'a>(raw: &'a RawSection, fallback: &'a str) -> &'a str {
    [raw.concept.trim(), raw.title.trim()]
        .into_iter()
        .find(|s| !s.is_empty())
        .unwrap_or(fallback)
}

fn spotlight_sentence(phrases: &[String], raw: &RawSection) -> Option<String> {
    let list = match phrases {
        [] => return None,
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    };
    Some(normalize_sentence(&format!(
        "We spotlight {list} to show how it connects to {}.",
        topic(raw, "this idea")
    )))
}

fn ordinal_sentence(n: usize, raw: &RawSection) -> String {
    normalize_sentence(&format!(
        "Step {n} walks through another part of {}.",
        topic(raw, "this section")
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/script/repair.rs"]
mod tests;
