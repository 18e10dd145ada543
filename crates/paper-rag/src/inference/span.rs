//! Answer span decoding from start/end logits.
//!
//! A span `(s, e)` scores `p_start[s] * p_end[e]`, where both distributions
//! are softmaxes over the context tokens plus `[CLS]` at index 0. `[CLS]`
//! only absorbs probability mass: it is never part of a span, so scores of
//! windows with a confident "no answer" come out lower. Valid spans have
//! `s <= e` and at most `max_answer_len` tokens.

/// The best span of one window, in token indices (inclusive).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpanCandidate {
    /// First token of the span.
    pub start: usize,
    /// Last token of the span.
    pub end: usize,
    /// Span probability.
    pub score: f32,
}

/// Softmax over the positions where `mask` is true; masked-out positions get 0.
///
/// Returns all zeros when nothing is selected.
#[must_use]
pub fn masked_softmax(logits: &[f32], mask: &[bool]) -> Vec<f32> {
    let max = logits
        .iter()
        .zip(mask)
        .filter(|&(_, &keep)| keep)
        .map(|(&l, _)| l)
        .fold(f32::NEG_INFINITY, f32::max);

    if !max.is_finite() {
        return vec![0.0; logits.len()];
    }

    let exps: Vec<f32> = logits
        .iter()
        .zip(mask)
        .map(|(&l, &keep)| if keep { (l - max).exp() } else { 0.0 })
        .collect();
    let sum: f32 = exps.iter().sum();

    exps.into_iter().map(|e| e / sum).collect()
}

/// Pick the highest-probability span among context tokens.
///
/// Index 0 is taken to be `[CLS]`: it joins the softmax normalisation but is
/// never selected. Returns `None` when the window contains no context tokens.
#[must_use]
pub fn best_span(
    start_logits: &[f32],
    end_logits: &[f32],
    context_mask: &[bool],
    max_answer_len: usize,
) -> Option<SpanCandidate> {
    let len = start_logits.len().min(end_logits.len()).min(context_mask.len());
    if len == 0 || max_answer_len == 0 {
        return None;
    }

    let mut mask = context_mask[..len].to_vec();
    mask[0] = false;

    let mut norm_mask = mask.clone();
    norm_mask[0] = true;
    let p_start = masked_softmax(&start_logits[..len], &norm_mask);
    let p_end = masked_softmax(&end_logits[..len], &norm_mask);

    let mut best: Option<SpanCandidate> = None;
    for s in (0..len).filter(|&i| mask[i]) {
        let last = (s + max_answer_len).min(len);
        for e in (s..last).filter(|&j| mask[j]) {
            let score = p_start[s] * p_end[e];
            if best.is_none_or(|b| score > b.score) {
                best = Some(SpanCandidate { start: s, end: e, score });
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masked_softmax_sums_to_one() {
        let p = masked_softmax(&[1.0, 2.0, 3.0, 4.0], &[false, true, true, true]);
        assert_eq!(p[0], 0.0);
        let sum: f32 = p.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        assert!(p[3] > p[2] && p[2] > p[1]);
    }

    #[test]
    fn test_masked_softmax_all_masked() {
        assert_eq!(masked_softmax(&[1.0, 2.0], &[false, false]), vec![0.0, 0.0]);
    }

    #[test]
    fn test_best_span_picks_peak() {
        // [CLS] q [SEP] c0 c1 c2 [SEP]
        let mask = [false, false, false, true, true, true, false];
        let start = [9.0, 9.0, 0.0, 0.0, 5.0, 0.0, 9.0];
        let end = [9.0, 9.0, 0.0, 0.0, 0.0, 5.0, 9.0];

        let span = best_span(&start, &end, &mask, 15).unwrap();
        assert_eq!((span.start, span.end), (4, 5));
        assert!(span.score > 0.0 && span.score <= 1.0);
    }

    #[test]
    fn test_cls_takes_probability_but_is_never_selected() {
        // [CLS] q [SEP] c0 c1 [SEP]
        let mask = [false, false, false, true, true, false];
        let start = [0.0, 9.0, 9.0, 0.0, 0.0, 9.0];
        let end = [0.0, 9.0, 9.0, 0.0, 0.0, 9.0];

        // Uniform over [CLS], c0, c1: each position gets 1/3.
        let span = best_span(&start, &end, &mask, 15).unwrap();
        assert_eq!((span.start, span.end), (3, 3));
        assert!((span.score - 1.0 / 9.0).abs() < 1e-5);
    }

    #[test]
    fn test_confident_no_answer_window_scores_lower() {
        let mask = [false, false, false, true, true, false];
        let unsure = [0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        let no_answer = [8.0, 0.0, 0.0, 0.0, 0.0, 0.0];

        let a = best_span(&unsure, &unsure, &mask, 15).unwrap();
        let b = best_span(&no_answer, &no_answer, &mask, 15).unwrap();
        assert!(b.score < a.score);
    }

    #[test]
    fn test_best_span_never_ends_before_start() {
        let mask = [false, true, true, true];
        let start = [0.0, 0.0, 0.0, 10.0];
        let end = [0.0, 10.0, 0.0, 0.0];

        let span = best_span(&start, &end, &mask, 15).unwrap();
        assert!(span.start <= span.end);
    }

    #[test]
    fn test_best_span_respects_max_length() {
        let mut mask = [true; 7];
        mask[0] = false;
        let start = [0.0, 10.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        let end = [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 10.0];

        let span = best_span(&start, &end, &mask, 3).unwrap();
        assert!(span.end - span.start < 3);
    }

    #[test]
    fn test_best_span_without_context() {
        assert_eq!(best_span(&[1.0, 2.0], &[1.0, 2.0], &[false, false], 15), None);
        assert_eq!(best_span(&[], &[], &[], 15), None);
    }
}
