//! Bitap scoring
//!
//! Bit-parallel approximate matching with a location penalty. The error budget
//! is not fixed: each error level is only explored while
//! `errors / pattern_len` can still beat the best score found so far, and the
//! scanned window shrinks as the threshold tightens.
//!
//! Patterns longer than [`MAX_BITS`] are split into word-sized chunks that are
//! scored independently and averaged.

use super::SearchParams;
use std::collections::HashMap;

/// Width of the bit vector a single chunk is matched with.
pub const MAX_BITS: usize = 32;

/// Scores never reach zero unless the strings are equal.
const MIN_SCORE: f64 = 0.001;

/// A compiled query, reusable across every name in the catalog.
#[derive(Debug, Clone)]
pub struct Pattern {
    text: Vec<char>,
    chunks: Vec<Chunk>,
}

#[derive(Debug, Clone)]
struct Chunk {
    pattern: Vec<char>,
    alphabet: HashMap<char, u64>,
    start_index: usize,
}

impl Chunk {
    fn new(pattern: &[char], start_index: usize) -> Self {
        let len = pattern.len();
        let mut alphabet = HashMap::with_capacity(len);
        for (i, c) in pattern.iter().enumerate() {
            *alphabet.entry(*c).or_insert(0) |= 1u64 << (len - i - 1);
        }
        Self {
            pattern: pattern.to_vec(),
            alphabet,
            start_index,
        }
    }
}

struct ChunkResult {
    is_match: bool,
    score: f64,
}

impl Pattern {
    /// Compile an already-normalized (trimmed, lower-cased, non-empty) query.
    pub fn new(query: &str) -> Self {
        let text: Vec<char> = query.chars().collect();
        let len = text.len();
        let mut chunks = Vec::new();

        if len <= MAX_BITS {
            chunks.push(Chunk::new(&text, 0));
        } else {
            let remainder = len % MAX_BITS;
            let end = len - remainder;
            let mut i = 0;
            while i < end {
                chunks.push(Chunk::new(&text[i..i + MAX_BITS], i));
                i += MAX_BITS;
            }
            if remainder > 0 {
                let start = len - MAX_BITS;
                chunks.push(Chunk::new(&text[start..], start));
            }
        }

        Self { text, chunks }
    }

    /// Score `text` (lower-cased); `None` when it does not match.
    pub fn search_in(&self, text: &[char], params: &SearchParams) -> Option<f64> {
        if self.text.as_slice() == text {
            return Some(0.0);
        }

        let mut total = 0.0;
        let mut has_matches = false;
        for chunk in &self.chunks {
            let result = search_chunk(text, chunk, chunk.start_index, params);
            has_matches |= result.is_match;
            total += result.score;
        }

        if has_matches {
            Some(total / self.chunks.len() as f64)
        } else {
            None
        }
    }
}

fn compute_score(
    pattern_len: usize,
    errors: usize,
    current_location: usize,
    expected_location: usize,
    distance: usize,
) -> f64 {
    let accuracy = errors as f64 / pattern_len as f64;
    let proximity = current_location.abs_diff(expected_location);

    if distance == 0 {
        return if proximity > 0 { 1.0 } else { accuracy };
    }

    accuracy + proximity as f64 / distance as f64
}

fn search_chunk(
    text: &[char],
    chunk: &Chunk,
    location: usize,
    params: &SearchParams,
) -> ChunkResult {
    let pattern = &chunk.pattern;
    let pattern_len = pattern.len();
    let text_len = text.len();
    let distance = params.distance;
    let expected = location.min(text_len);

    let compute_matches = params.min_match_len > 1;
    let mut match_mask = if compute_matches {
        vec![false; text_len]
    } else {
        Vec::new()
    };

    let mut current_threshold = params.threshold;

    // Exact occurrences tighten the threshold before the bit-parallel scan.
    let mut from = expected;
    while let Some(index) = find(text, pattern, from) {
        let score = compute_score(pattern_len, 0, index, expected, distance);
        current_threshold = current_threshold.min(score);
        from = index + pattern_len;

        if compute_matches {
            for slot in match_mask.iter_mut().skip(index).take(pattern_len) {
                *slot = true;
            }
        }
    }

    // (location, score) of the best accepted match
    let mut best: Option<(usize, f64)> = None;
    let mut last_bits: Vec<u64> = Vec::new();
    let mut bin_max = pattern_len + text_len;
    let mask = 1u64 << (pattern_len - 1);

    for errors in 0..pattern_len {
        // Widest window this error level could still score within threshold.
        let mut bin_min = 0;
        let mut bin_mid = bin_max;
        while bin_min < bin_mid {
            let score =
                compute_score(pattern_len, errors, expected + bin_mid, expected, distance);
            if score <= current_threshold {
                bin_min = bin_mid;
            } else {
                bin_max = bin_mid;
            }
            bin_mid = (bin_max - bin_min) / 2 + bin_min;
        }
        bin_max = bin_mid;

        let mut start = (expected + 1).saturating_sub(bin_mid).max(1);
        let finish = (expected + bin_mid).min(text_len) + pattern_len;

        let mut bits = vec![0u64; finish + 2];
        bits[finish + 1] = (1u64 << errors) - 1;

        let mut j = finish;
        while j >= start {
            let current_location = j - 1;
            let char_match = text
                .get(current_location)
                .and_then(|c| chunk.alphabet.get(c))
                .copied()
                .unwrap_or(0);

            if compute_matches {
                if let Some(slot) = match_mask.get_mut(current_location) {
                    *slot = char_match != 0;
                }
            }

            bits[j] = ((bits[j + 1] << 1) | 1) & char_match;

            if errors > 0 {
                let prev = last_bits.get(j).copied().unwrap_or(0);
                let prev_next = last_bits.get(j + 1).copied().unwrap_or(0);
                bits[j] |= ((prev_next | prev) << 1) | 1 | prev_next;
            }

            if bits[j] & mask != 0 {
                let score =
                    compute_score(pattern_len, errors, current_location, expected, distance);

                if score <= current_threshold {
                    current_threshold = score;
                    best = Some((current_location, score));

                    if current_location <= expected {
                        break;
                    }

                    start = (2 * expected).saturating_sub(current_location).max(1);
                }
            }

            j -= 1;
        }

        // One more error can't do better than the current best.
        let score = compute_score(pattern_len, errors + 1, expected, expected, distance);
        if score > current_threshold {
            break;
        }

        last_bits = bits;
    }

    let mut is_match = best.is_some();
    if compute_matches && !has_run(&match_mask, params.min_match_len) {
        is_match = false;
    }

    let score = best.map_or(1.0, |(_, score)| score);
    ChunkResult {
        is_match,
        score: f64::max(MIN_SCORE, score),
    }
}

/// First exact occurrence of `pattern` in `text` at or after `from`.
fn find(text: &[char], pattern: &[char], from: usize) -> Option<usize> {
    if pattern.is_empty() || from >= text.len() || pattern.len() > text.len() - from {
        return None;
    }
    text[from..]
        .windows(pattern.len())
        .position(|w| w == pattern)
        .map(|pos| pos + from)
}

/// Whether the mask holds a run of matched characters at least `min_len` long.
fn has_run(mask: &[bool], min_len: usize) -> bool {
    let mut run = 0;
    for &matched in mask {
        if matched {
            run += 1;
            if run >= min_len {
                return true;
            }
        } else {
            run = 0;
        }
    }
    false
}
