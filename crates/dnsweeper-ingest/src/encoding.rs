//! Character encoding detection and decoding.
//!
//! A byte-order mark always wins. Without one, each candidate encoding is
//! scored from byte patterns and the best score is reported as the
//! confidence. Candidates are tried in a fixed order and only a strictly
//! better score replaces the current best, so ties resolve to UTF-8.

use std::borrow::Cow;

use dnsweeper_core::{EncodingInfo, Reliability};
use encoding_rs::{Encoding, SHIFT_JIS, UTF_16LE, UTF_8, WINDOWS_1252};
use tracing::{debug, warn};

/// Encoding used when nothing better fits
pub const DEFAULT_FALLBACK: &Encoding = WINDOWS_1252;

const SCORE_UTF8_MULTIBYTE: f64 = 0.95;
const SCORE_UTF8_ASCII: f64 = 0.9;
const SCORE_UTF8_WITH_NUL: f64 = 0.4;
const SCORE_UTF8_INVALID_MAX: f64 = 0.2;
const SCORE_SHIFT_JIS: f64 = 0.8;
const SCORE_SHIFT_JIS_INVALID: f64 = 0.1;
const SCORE_FALLBACK_ASCII: f64 = 0.5;
const SCORE_FALLBACK: f64 = 0.3;

/// An encoding decision plus the [`Encoding`] to decode with
#[derive(Debug, Clone)]
pub struct DetectedEncoding {
    /// Reportable detection outcome
    pub info: EncodingInfo,
    /// Decoder to use
    pub encoding: &'static Encoding,
}

impl DetectedEncoding {
    /// Decode `bytes`, stripping a BOM and replacing malformed sequences
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Cow<'a, str> {
        let (text, actual, had_errors) = self.encoding.decode(bytes);
        if had_errors {
            warn!(
                encoding = actual.name(),
                "input contained malformed sequences, replaced with U+FFFD"
            );
        }
        text
    }
}

/// Detect the encoding of `bytes`.
///
/// Never fails; weak evidence shows up as low confidence instead.
pub fn detect_encoding(bytes: &[u8], fallback: &'static Encoding) -> DetectedEncoding {
    if bytes.is_empty() {
        return DetectedEncoding {
            info: EncodingInfo {
                detected_encoding: UTF_8.name().to_string(),
                confidence: 0.0,
                reliability: Reliability::Low,
                bom_present: false,
            },
            encoding: UTF_8,
        };
    }

    if let Some((encoding, _bom_len)) = Encoding::for_bom(bytes) {
        debug!(encoding = encoding.name(), "byte-order mark found");
        return DetectedEncoding {
            info: EncodingInfo {
                detected_encoding: encoding.name().to_string(),
                confidence: 1.0,
                reliability: Reliability::High,
                bom_present: true,
            },
            encoding,
        };
    }

    let candidates: [(&'static Encoding, f64); 4] = [
        (UTF_8, score_utf8(bytes)),
        (UTF_16LE, score_utf16le(bytes)),
        (SHIFT_JIS, score_shift_jis(bytes)),
        (fallback, score_fallback(bytes)),
    ];

    let (encoding, score) = best_candidate(&candidates);

    let confidence = score.clamp(0.0, 1.0);
    debug!(
        encoding = encoding.name(),
        confidence, "encoding detected heuristically"
    );

    DetectedEncoding {
        info: EncodingInfo {
            detected_encoding: encoding.name().to_string(),
            confidence,
            reliability: Reliability::from_confidence(confidence),
            bom_present: false,
        },
        encoding,
    }
}

/// Highest-scoring candidate; an equal score never displaces an earlier one
/// and an empty slice gives UTF-8.
fn best_candidate(candidates: &[(&'static Encoding, f64)]) -> (&'static Encoding, f64) {
    candidates
        .iter()
        .copied()
        .fold((UTF_8, f64::MIN), |best, candidate| {
            if candidate.1 > best.1 {
                candidate
            } else {
                best
            }
        })
}

/// Resolve a WHATWG label such as `latin1` or `sjis`
pub fn encoding_for_label(label: &str) -> Option<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
}

fn score_utf8(bytes: &[u8]) -> f64 {
    match std::str::from_utf8(bytes) {
        Ok(text) if text.contains('\0') => SCORE_UTF8_WITH_NUL,
        Ok(text) if text.is_ascii() => SCORE_UTF8_ASCII,
        Ok(_) => SCORE_UTF8_MULTIBYTE,
        Err(_) => SCORE_UTF8_INVALID_MAX * valid_utf8_fraction(bytes),
    }
}

#[allow(clippy::cast_precision_loss)]
fn valid_utf8_fraction(bytes: &[u8]) -> f64 {
    let mut valid = 0usize;
    let mut rest = bytes;
    while !rest.is_empty() {
        match std::str::from_utf8(rest) {
            Ok(_) => {
                valid += rest.len();
                break;
            }
            Err(e) => {
                valid += e.valid_up_to();
                let skip = e.error_len().unwrap_or(rest.len() - e.valid_up_to());
                rest = &rest[e.valid_up_to() + skip..];
            }
        }
    }
    valid as f64 / bytes.len() as f64
}

/// ASCII text in UTF-16LE has a zero high byte at every odd offset.
#[allow(clippy::cast_precision_loss)]
fn score_utf16le(bytes: &[u8]) -> f64 {
    let units = bytes.len() / 2;
    if units == 0 {
        return 0.0;
    }

    let (even_zero, odd_zero) = bytes
        .chunks_exact(2)
        .fold((0usize, 0usize), |(even, odd), pair| {
            (even + usize::from(pair[0] == 0), odd + usize::from(pair[1] == 0))
        });

    let odd_ratio = odd_zero as f64 / units as f64;
    let even_ratio = even_zero as f64 / units as f64;

    if odd_ratio >= 0.5 && even_ratio < 0.1 {
        0.5 + odd_ratio / 2.0
    } else {
        0.0
    }
}

fn score_shift_jis(bytes: &[u8]) -> f64 {
    if bytes.is_ascii() {
        return 0.0;
    }
    let (_, had_errors) = SHIFT_JIS.decode_without_bom_handling(bytes);
    if had_errors {
        SCORE_SHIFT_JIS_INVALID
    } else {
        SCORE_SHIFT_JIS
    }
}

fn score_fallback(bytes: &[u8]) -> f64 {
    if bytes.is_ascii() {
        SCORE_FALLBACK_ASCII
    } else {
        SCORE_FALLBACK
    }
}
