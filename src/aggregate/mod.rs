//! Detection aggregation.
//!
//! Overlapping analysis clips detect the same vocalisation several times.
//! This stage turns per-clip score vectors into a deduplicated detection
//! list: threshold and noise filtering first, then merging of overlapping
//! same-species intervals into one detection carrying the peak confidence.

use crate::constants::NOISE_CLASS_COUNT;
use crate::error::{Error, Result};
use crate::inference::SegmentScores;
use crate::output::Detection;
use crate::utils::SpeciesList;
use std::cmp::Ordering;

/// Aggregate per-clip scores into the final detection list.
///
/// `scores` may arrive in any order; the output is sorted by start time and
/// scientific name, and no two detections of the same species overlap.
pub fn aggregate(
    scores: &[SegmentScores],
    species: &SpeciesList,
    threshold: f32,
    include_noise: bool,
) -> Result<Vec<Detection>> {
    let mut candidates = collect_candidates(scores, species, threshold, include_noise)?;
    merge_overlapping(&mut candidates);

    candidates.sort_by(|a, b| {
        a.start_secs
            .partial_cmp(&b.start_secs)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.scientific_name.cmp(&b.scientific_name))
    });

    Ok(candidates)
}

/// One detection per clip/species pair above the threshold.
fn collect_candidates(
    scores: &[SegmentScores],
    species: &SpeciesList,
    threshold: f32,
    include_noise: bool,
) -> Result<Vec<Detection>> {
    let mut candidates = Vec::new();

    for segment in scores {
        for (class_index, &confidence) in segment.scores.iter().enumerate() {
            let is_noise = class_index < NOISE_CLASS_COUNT;
            if is_noise && !include_noise {
                continue;
            }
            if confidence < threshold {
                continue;
            }

            let entry = species.get(class_index).ok_or_else(|| Error::Internal {
                message: format!("no species entry for class index {class_index}"),
            })?;

            candidates.push(Detection {
                scientific_name: entry.scientific_name.clone(),
                common_name: entry.common_name.clone(),
                start_secs: segment.start_secs,
                end_secs: segment.end_secs,
                confidence,
                is_noise,
            });
        }
    }

    Ok(candidates)
}

/// Merge overlapping or touching intervals of the same species in place.
///
/// The merged interval is the union of the inputs and keeps the highest
/// confidence seen. Distinct species never merge, however much they overlap.
fn merge_overlapping(candidates: &mut Vec<Detection>) {
    candidates.sort_by(|a, b| {
        a.scientific_name.cmp(&b.scientific_name).then_with(|| {
            a.start_secs
                .partial_cmp(&b.start_secs)
                .unwrap_or(Ordering::Equal)
        })
    });

    let mut merged: Vec<Detection> = Vec::with_capacity(candidates.len());
    for candidate in candidates.drain(..) {
        match merged.last_mut() {
            Some(last)
                if last.scientific_name == candidate.scientific_name
                    && candidate.start_secs <= last.end_secs =>
            {
                last.end_secs = last.end_secs.max(candidate.end_secs);
                last.confidence = last.confidence.max(candidate.confidence);
            }
            _ => merged.push(candidate),
        }
    }

    *candidates = merged;
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::utils::Species;

    fn species_list() -> SpeciesList {
        SpeciesList::from_entries(vec![
            Species {
                scientific_name: "Noise".into(),
                common_name: "Noise".into(),
            },
            Species {
                scientific_name: "Human".into(),
                common_name: "Human".into(),
            },
            Species {
                scientific_name: "Turdus merula".into(),
                common_name: "Eurasian Blackbird".into(),
            },
            Species {
                scientific_name: "Parus major".into(),
                common_name: "Great Tit".into(),
            },
        ])
    }

    fn segment(start: f64, scores: Vec<f32>) -> SegmentScores {
        SegmentScores {
            start_secs: start,
            end_secs: start + 3.0,
            scores,
        }
    }

    #[test]
    fn test_threshold_filters_low_confidence() {
        let scores = vec![segment(0.0, vec![0.0, 0.0, 0.4, 0.9])];
        let detections = aggregate(&scores, &species_list(), 0.5, false).unwrap();
        assert_eq!(detections.len(), 1);
        assert_eq!(detections[0].scientific_name, "Parus major");
    }

    #[test]
    fn test_noise_classes_excluded_by_default() {
        let scores = vec![segment(0.0, vec![0.99, 0.99, 0.0, 0.0])];
        assert!(aggregate(&scores, &species_list(), 0.5, false).unwrap().is_empty());

        let detections = aggregate(&scores, &species_list(), 0.5, true).unwrap();
        assert_eq!(detections.len(), 2);
        assert!(detections.iter().all(|d| d.is_noise));
    }

    #[test]
    fn test_overlapping_same_species_merge_to_peak() {
        // Clips at 0, 2, 4 s: consecutive pairs overlap by 1 s.
        let scores = vec![
            segment(0.0, vec![0.0, 0.0, 0.6, 0.0]),
            segment(2.0, vec![0.0, 0.0, 0.9, 0.0]),
            segment(4.0, vec![0.0, 0.0, 0.7, 0.0]),
        ];
        let detections = aggregate(&scores, &species_list(), 0.5, false).unwrap();
        assert_eq!(detections.len(), 1);
        assert_eq!(detections[0].start_secs, 0.0);
        assert_eq!(detections[0].end_secs, 7.0);
        assert_eq!(detections[0].confidence, 0.9);
    }

    #[test]
    fn test_gap_keeps_detections_separate() {
        let scores = vec![
            segment(0.0, vec![0.0, 0.0, 0.8, 0.0]),
            segment(10.0, vec![0.0, 0.0, 0.8, 0.0]),
        ];
        let detections = aggregate(&scores, &species_list(), 0.5, false).unwrap();
        assert_eq!(detections.len(), 2);
    }

    #[test]
    fn test_different_species_never_merge() {
        let scores = vec![segment(0.0, vec![0.0, 0.0, 0.8, 0.9])];
        let detections = aggregate(&scores, &species_list(), 0.5, false).unwrap();
        assert_eq!(detections.len(), 2);
        // Same start: ordered by scientific name.
        assert_eq!(detections[0].scientific_name, "Parus major");
        assert_eq!(detections[1].scientific_name, "Turdus merula");
    }

    #[test]
    fn test_output_sorted_by_start_time() {
        let scores = vec![
            segment(30.0, vec![0.0, 0.0, 0.8, 0.0]),
            segment(0.0, vec![0.0, 0.0, 0.0, 0.8]),
        ];
        let detections = aggregate(&scores, &species_list(), 0.5, false).unwrap();
        assert_eq!(detections[0].start_secs, 0.0);
        assert_eq!(detections[1].start_secs, 30.0);
    }

    #[test]
    fn test_aggregation_is_idempotent_on_merged_output() {
        let scores = vec![
            segment(0.0, vec![0.0, 0.0, 0.6, 0.0]),
            segment(2.0, vec![0.0, 0.0, 0.9, 0.0]),
        ];
        let first = aggregate(&scores, &species_list(), 0.5, false).unwrap();

        // No pair of same-species detections overlaps after aggregation.
        for a in &first {
            for b in &first {
                if std::ptr::eq(a, b) || a.scientific_name != b.scientific_name {
                    continue;
                }
                assert!(a.end_secs <= b.start_secs || b.end_secs <= a.start_secs);
            }
        }
    }

    #[test]
    fn test_raising_threshold_never_adds_detections() {
        let scores = vec![
            segment(0.0, vec![0.0, 0.0, 0.55, 0.75]),
            segment(10.0, vec![0.0, 0.0, 0.65, 0.45]),
            segment(20.0, vec![0.0, 0.0, 0.85, 0.95]),
        ];
        let mut previous = usize::MAX;
        for threshold in [0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0] {
            let count = aggregate(&scores, &species_list(), threshold, false)
                .unwrap()
                .len();
            assert!(count <= previous);
            previous = count;
        }
    }

    #[test]
    fn test_missing_species_entry_is_an_error() {
        let scores = vec![segment(0.0, vec![0.0, 0.0, 0.0, 0.0, 0.9])];
        let result = aggregate(&scores, &species_list(), 0.5, false);
        assert!(matches!(result, Err(Error::Internal { .. })));
    }
}
