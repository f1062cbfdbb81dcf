//! "Did you mean ...?" support: Damerau-Levenshtein edit distance over the
//! known keywords, command words, and typedef names.

use crate::data::lex::Keyword;
use crate::typedefs::TypedefRegistry;

/// The true Damerau-Levenshtein distance (with adjacent transpositions)
/// between two strings.
///
/// The zeroth row and column hold an "infinity" sentinel, and there is one
/// extra row and column, so transpositions can never be detected outside the
/// bounds of the strings.
pub fn dam_lev_dist(source: &str, target: &str) -> usize {
    let source: Vec<u8> = source.bytes().collect();
    let target: Vec<u8> = target.bytes().collect();
    let (slen, tlen) = (source.len(), target.len());
    if slen == 0 {
        return tlen;
    }
    if tlen == 0 {
        return slen;
    }

    let inf = slen + tlen;
    let mut matrix = vec![vec![0usize; tlen + 2]; slen + 2];
    matrix[0][0] = inf;
    for i in 0..=slen {
        matrix[i + 1][1] = i;
        matrix[i + 1][0] = inf;
    }
    for j in 0..=tlen {
        matrix[1][j + 1] = j;
        matrix[0][j + 1] = inf;
    }

    // for each byte, the row where it last appeared in `source`
    let mut last_row = [0usize; 256];

    for row in 1..=slen {
        let sc = source[row - 1];
        let mut last_match_col = 0;

        for col in 1..=tlen {
            let tc = target[col - 1];
            let last_match_row = last_row[tc as usize];
            let matches = sc == tc;

            let ins_dist = matrix[row][col + 1] + 1;
            let del_dist = matrix[row + 1][col] + 1;
            let sub_dist = matrix[row][col] + if matches { 0 } else { 1 };
            let xpos_dist = matrix[last_match_row][last_match_col]
                + (row - last_match_row).saturating_sub(1)
                + (col - last_match_col).saturating_sub(1)
                + 1;

            matrix[row + 1][col + 1] = ins_dist.min(del_dist).min(sub_dist).min(xpos_dist);

            if matches {
                last_match_col = col;
            }
        }
        last_row[sc as usize] = row;
    }

    matrix[slen + 1][tlen + 1]
}

fn threshold(a: &str, b: &str) -> usize {
    std::cmp::max(1, std::cmp::min(a.len(), b.len()) / 4)
}

/// Ranks `candidates` by edit distance to `unknown`, closest first, ties
/// broken alphabetically so suggestions are deterministic.
pub fn suggest<I: IntoIterator<Item = String>>(unknown: &str, candidates: I) -> Vec<String> {
    let mut scored: Vec<(usize, String)> = candidates
        .into_iter()
        .filter_map(|c| {
            let dist = dam_lev_dist(unknown, &c);
            if dist > 0 && dist <= threshold(unknown, &c) {
                Some((dist, c))
            } else {
                None
            }
        })
        .collect();
    scored.sort();
    scored.dedup_by(|a, b| a.1 == b.1);
    scored.into_iter().map(|(_, c)| c).take(3).collect()
}

/// Suggestions for an unknown type name: keywords plus everything in the
/// typedef registry.
pub fn suggest_type_name(unknown: &str, reg: &TypedefRegistry) -> Vec<String> {
    let candidates = Keyword::all_spellings()
        .iter()
        .map(|s| s.to_string())
        .chain(reg.names());
    suggest(unknown, candidates)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances() {
        assert_eq!(dam_lev_dist("", "abc"), 3);
        assert_eq!(dam_lev_dist("abc", "abc"), 0);
        assert_eq!(dam_lev_dist("abc", "acb"), 1); // transposition
        assert_eq!(dam_lev_dist("kitten", "sitting"), 3);
        // unlike optimal-string-alignment, real Damerau-Levenshtein may edit
        // between transposed characters: ca -> ac -> abc
        assert_eq!(dam_lev_dist("ca", "abc"), 2);
    }

    #[test]
    fn suggestions_are_ranked_and_bounded() {
        let candidates = ["const", "cost", "conts", "int"]
            .iter()
            .map(|s| s.to_string());
        let got = suggest("canst", candidates);
        assert_eq!(got, vec!["const".to_string()]);
    }

    proptest::proptest! {
        #[test]
        fn distance_is_symmetric(a in "[a-z]{0,8}", b in "[a-z]{0,8}") {
            proptest::prop_assert_eq!(dam_lev_dist(&a, &b), dam_lev_dist(&b, &a));
        }

        #[test]
        fn distance_is_bounded(a in "[a-z]{0,8}", b in "[a-z]{0,8}") {
            proptest::prop_assert!(dam_lev_dist(&a, &b) <= a.len().max(b.len()));
        }
    }

    #[test]
    fn ties_break_alphabetically() {
        let candidates = ["bat", "cat", "art"].iter().map(|s| s.to_string());
        let got = suggest("aat", candidates);
        assert_eq!(got[0], "art".to_string());
    }
}
