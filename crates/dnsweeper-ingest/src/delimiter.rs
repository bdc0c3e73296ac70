//! Field delimiter sniffing.

use dnsweeper_core::DelimiterInfo;
use tracing::debug;

/// Delimiters considered, in preference order
pub const CANDIDATES: [char; 4] = [',', ';', '\t', '|'];

/// Delimiter used when no candidate clearly wins
pub const DEFAULT_DELIMITER: char = ',';

/// Lines sampled by default
pub const DEFAULT_SAMPLE_LINES: usize = 10;

/// Pick the delimiter of `text` from the first `sample_lines` non-empty lines.
///
/// Only candidates present on the header line take part. A candidate is
/// consistent when every sampled line has the header's count of it, and any
/// consistent candidate outranks an inconsistent one. After that the
/// candidate agreeing with the header on more lines wins, then the one with
/// the higher header count. A tie at the top, or no candidate at all, falls
/// back to [`DEFAULT_DELIMITER`]. Occurrences inside double quotes are ignored.
pub fn detect_delimiter(text: &str, sample_lines: usize) -> DelimiterInfo {
    let lines: Vec<&str> = text
        .lines()
        .map(|l| l.trim_end_matches('\r'))
        .filter(|l| !l.trim().is_empty())
        .take(sample_lines.max(1))
        .collect();

    let mut tallies: Vec<Tally> = CANDIDATES
        .iter()
        .filter_map(|&candidate| Tally::of(&lines, candidate))
        .collect();
    // Stable sort keeps preference order among equal keys.
    tallies.sort_by(|a, b| b.key().cmp(&a.key()));

    let used = match tallies.as_slice() {
        [] => DEFAULT_DELIMITER,
        [only] => only.delimiter,
        [first, second, ..] if first.key() > second.key() => first.delimiter,
        _ => DEFAULT_DELIMITER,
    };

    debug!(
        delimiter = ?used,
        candidates = tallies.len(),
        consistent = tallies.iter().filter(|t| t.consistent).count(),
        sampled = lines.len(),
        "delimiter detected"
    );

    DelimiterInfo {
        detected: tallies.into_iter().map(|t| t.delimiter).collect(),
        used,
    }
}

/// How one candidate splits the sampled lines
#[derive(Debug, Clone, Copy)]
struct Tally {
    delimiter: char,
    /// Occurrences on the header line
    header: usize,
    /// Lines whose count equals the header's
    agreeing: usize,
    consistent: bool,
}

impl Tally {
    /// `None` when the header line does not contain `delimiter`.
    fn of(lines: &[&str], delimiter: char) -> Option<Self> {
        let header = count_unquoted(lines.first()?, delimiter);
        if header == 0 {
            return None;
        }
        let agreeing = lines
            .iter()
            .filter(|line| count_unquoted(line, delimiter) == header)
            .count();
        Some(Self {
            delimiter,
            header,
            agreeing,
            consistent: agreeing == lines.len(),
        })
    }

    const fn key(&self) -> (bool, usize, usize) {
        (self.consistent, self.agreeing, self.header)
    }
}

fn count_unquoted(line: &str, delimiter: char) -> usize {
    line.chars()
        .fold((0usize, false), |(count, quoted), c| match c {
            '"' => (count, !quoted),
            c if c == delimiter && !quoted => (count + 1, quoted),
            _ => (count, quoted),
        })
        .0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_common_delimiters() {
        assert_eq!(detect_delimiter("a,b,c\nd,e,f", 10).used, ',');
        assert_eq!(detect_delimiter("a;b;c\nd;e;f", 10).used, ';');
        assert_eq!(detect_delimiter("a\tb\tc\nd\te\tf", 10).used, '\t');
        assert_eq!(detect_delimiter("a|b|c\nd|e|f", 10).used, '|');
    }

    #[test]
    fn consistency_beats_frequency() {
        // Commas are frequent but uneven; semicolons are steady.
        let text = "name;type;value\na,b,c,d;A;1\ne;A;2,3\n";
        let info = detect_delimiter(text, 10);
        assert_eq!(info.used, ';');
        assert_eq!(info.detected, vec![';']);
    }

    #[test]
    fn quoted_delimiters_are_ignored() {
        let text = "name,type,content\nexample.com,TXT,\"v=spf1 a; b; c\"\n";
        let info = detect_delimiter(text, 10);
        assert_eq!(info.used, ',');
        assert_eq!(info.detected, vec![',']);
    }

    #[test]
    fn tie_defaults_to_comma() {
        let info = detect_delimiter("a;b|c\nd;e|f", 10);
        assert_eq!(info.used, ',');
        assert_eq!(info.detected, vec![';', '|']);
    }

    #[test]
    fn short_row_keeps_semicolon() {
        let text = "domain;record_type;value;ttl\n\
                    a.example.com;A;192.0.2.1;300\n\
                    b.example.com;A;192.0.2.2;300\n\
                    broken.example.com;A\n";
        let info = detect_delimiter(text, 10);
        assert_eq!(info.used, ';');
        assert_eq!(info.detected, vec![';']);
    }

    #[test]
    fn consistent_outranks_inconsistent() {
        // Pipes agree with the header on every line, semicolons do not.
        let text = "a;b;c|d\ne;f|g\nh;i;j;k|l\n";
        let info = detect_delimiter(text, 10);
        assert_eq!(info.used, '|');
        assert_eq!(info.detected, vec!['|', ';']);
    }

    #[test]
    fn inconsistent_candidates_rank_by_agreement() {
        // Neither is steady; tabs match the header on more lines.
        let text = "a\tb\tc|d|e|f\ng\th\ti|j\nk\tl\tm\nn|o|p|q\n";
        let info = detect_delimiter(text, 10);
        assert_eq!(info.used, '\t');
        assert_eq!(info.detected, vec!['\t', '|']);
    }

    #[test]
    fn no_candidate_defaults_to_comma() {
        let info = detect_delimiter("single column\nvalue", 10);
        assert_eq!(info.used, ',');
        assert!(info.detected.is_empty());

        assert_eq!(detect_delimiter("", 10).used, ',');
    }

    #[test]
    fn only_samples_first_lines() {
        let mut text = String::from("a;b\nc;d\n");
        text.push_str("x,y,z;w\n");
        assert_eq!(detect_delimiter(&text, 2).used, ';');
    }

    #[test]
    fn skips_blank_lines() {
        let info = detect_delimiter("a|b\n\n   \nc|d\r\n", 10);
        assert_eq!(info.used, '|');
    }
}
