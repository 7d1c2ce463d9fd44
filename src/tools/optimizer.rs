//! Content Optimizer: split copy into parts, spread the keyword list
//! across them, then rewrite each part with its keywords woven in at
//! fixed sentence positions. Fully deterministic.

use crate::wizard::{Entry, Requirement, Rule, StepDef, WizardSession};

use super::{FieldSpec, InputKind, StepLayout};

pub static STEPS: &[StepDef] = &[
    StepDef {
        index: 1,
        title: "Content Input",
        description: "Paste your content and keywords",
        required: &[
            Requirement {
                field: "content",
                rule: Rule::NonEmptyText,
            },
            Requirement {
                field: "keywords",
                rule: Rule::NonEmptyText,
            },
        ],
    },
    StepDef {
        index: 2,
        title: "Optimize Parts",
        description: "Rewrite each part with its keywords",
        required: &[Requirement {
            field: "parts",
            rule: Rule::EntriesPopulated {
                required_keys: &["optimized"],
            },
        }],
    },
    StepDef {
        index: 3,
        title: "Final Content",
        description: "Review the optimized result",
        required: &[],
    },
];

const INPUT_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "title",
        label: "Title",
        placeholder: "Working title...",
        kind: InputKind::Line,
    },
    FieldSpec {
        name: "keywords",
        label: "Keywords",
        placeholder: "Enter keywords separated by commas...",
        kind: InputKind::Line,
    },
    FieldSpec {
        name: "content",
        label: "Content",
        placeholder: "Paste the content to optimize...",
        kind: InputKind::Paragraph,
    },
];

pub fn layout(step: usize) -> StepLayout {
    match step {
        1 => StepLayout::Form(INPUT_FIELDS),
        2 => StepLayout::Parts,
        _ => StepLayout::Output,
    }
}

fn keyword_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

/// Spread keywords over `parts` buckets: ceil-sized contiguous slices,
/// with the previous slice's last keyword repeated at the front of each
/// later bucket for distribution overlap.
pub fn distribute_keywords(keywords: &[String], parts: usize) -> Vec<Vec<String>> {
    if parts == 0 {
        return Vec::new();
    }
    let per_part = keywords.len().div_ceil(parts).max(1);
    (0..parts)
        .map(|index| {
            let start = (index * per_part).min(keywords.len());
            let end = (start + per_part).min(keywords.len());
            let mut bucket: Vec<String> = keywords[start..end].to_vec();
            if index > 0 && start > 0 && start <= keywords.len() {
                bucket.insert(0, keywords[start - 1].clone());
            }
            bucket
        })
        .collect()
}

/// Case-insensitive replace of every occurrence of `needle`. Matching
/// compares lowercased characters in place, so offsets always land on
/// char boundaries of the original text even when lowercasing changes
/// byte lengths.
fn replace_ci(haystack: &str, needle: &str, replacement: &str) -> String {
    if needle.is_empty() {
        return haystack.to_string();
    }
    let needle_lower = needle.to_lowercase();
    let mut out = String::with_capacity(haystack.len());
    let mut i = 0;
    while i < haystack.len() {
        if let Some(matched) = ci_prefix_len(&haystack[i..], &needle_lower) {
            out.push_str(replacement);
            i += matched;
        } else if let Some(ch) = haystack[i..].chars().next() {
            out.push(ch);
            i += ch.len_utf8();
        } else {
            break;
        }
    }
    out
}

/// Byte length of the prefix of `text` that lowercases to `needle_lower`,
/// if there is one. A character whose lowercase form expands to several
/// characters (e.g. 'İ') must match the needle in full or not at all.
fn ci_prefix_len(text: &str, needle_lower: &str) -> Option<usize> {
    let mut wanted = needle_lower.chars();
    let mut next = wanted.next();
    let mut len = 0;
    for ch in text.chars() {
        for lc in ch.to_lowercase() {
            match next {
                Some(expected) if expected == lc => next = wanted.next(),
                _ => return None,
            }
        }
        len += ch.len_utf8();
        if next.is_none() {
            return Some(len);
        }
    }
    None
}

fn sentences(text: &str) -> Vec<String> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Rewrite one part with its keywords woven in: generic phrases swapped
/// in the opening sentences, a booster clause mid-text, a closing tie-in,
/// and leftover keywords appended as a short conclusion.
pub fn optimize_text(original: &str, keywords: &[String]) -> String {
    if keywords.is_empty() {
        return original.to_string();
    }

    let mut parts = sentences(original);
    let len = parts.len();
    for (idx, sentence) in parts.iter_mut().enumerate() {
        if idx == 0 {
            let kw = &keywords[0];
            *sentence = replace_ci(sentence, "marketing strategies", &format!("{kw} strategies"));
            *sentence = replace_ci(sentence, "digital channels", &format!("{kw} channels"));
            *sentence = replace_ci(sentence, "businesses", &format!("companies focusing on {kw}"));
        }
        if idx == 1 {
            if let Some(kw) = keywords.get(1) {
                *sentence = replace_ci(
                    sentence,
                    "quality content",
                    &format!("high-quality content optimized for {kw}"),
                );
                *sentence = replace_ci(sentence, "SEO", &format!("{kw} and SEO"));
            }
        }
        if idx == len / 2 {
            if let Some(kw) = keywords.get(2) {
                sentence.push_str(&format!(
                    ". Implementing effective {kw} techniques can significantly boost these results"
                ));
            }
        }
        if idx + 1 == len {
            if let Some(kw) = keywords.get(3) {
                *sentence = replace_ci(sentence, "success", &format!("success through {kw}"));
            }
        }
    }

    let mut optimized = parts.join(". ");
    optimized.push('.');

    let remaining = &keywords[keywords.len().min(4)..];
    if !remaining.is_empty() {
        let lead: Vec<&str> = remaining.iter().take(2).map(String::as_str).collect();
        optimized.push_str(&format!(
            " Furthermore, integrating {} into your strategy will create a comprehensive approach.",
            lead.join(" and ")
        ));
        if remaining.len() > 2 {
            let rest: Vec<&str> = remaining[2..].iter().map(String::as_str).collect();
            optimized.push_str(&format!(
                " Advanced techniques such as {} provide additional competitive advantages in today's market.",
                rest.join(", ")
            ));
        }
    }

    // Guarantee the lead keyword appears somewhere.
    if !optimized
        .to_lowercase()
        .contains(&keywords[0].to_lowercase())
    {
        optimized = format!("In the realm of {}, {}", keywords[0], optimized);
    }

    optimized
}

/// Split the input content into paragraph parts with their keyword
/// buckets. Runs when step 1 is left.
pub fn split_into_parts(session: &mut WizardSession) {
    let paragraphs: Vec<String> = session
        .text("content")
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();
    let keywords = keyword_list(session.text("keywords"));
    let buckets = distribute_keywords(&keywords, paragraphs.len());

    session.update_field("parts", crate::wizard::FieldValue::Entries(Vec::new()));
    for (paragraph, bucket) in paragraphs.into_iter().zip(buckets) {
        let mut entry = Entry::new();
        entry.set("original", paragraph);
        entry.set("keywords", bucket.join(", "));
        entry.set("optimized", "");
        session.push_entry("parts", entry);
    }
}

/// Rewrite a single part in place using its (possibly edited) keywords.
pub fn optimize_part(session: &mut WizardSession, row: usize) {
    let Some(part) = session.entries("parts").get(row) else {
        return;
    };
    let keywords = keyword_list(part.get("keywords"));
    let optimized = optimize_text(part.get("original"), &keywords);
    session.update_entry("parts", row, "optimized", optimized);
}

/// The export body shown on the final step.
pub fn final_content(session: &WizardSession) -> String {
    let joined = session
        .entries("parts")
        .iter()
        .map(|p| p.get("optimized"))
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");
    format!(
        "Title: {}\n\nKeywords: {}\n\nOptimized Content:\n\n{}",
        session.text("title"),
        session.text("keywords"),
        joined
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ToolKind;

    fn kws(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn distribution_is_ceil_sized_with_overlap() {
        let keywords = kws(&["a", "b", "c", "d", "e"]);
        let buckets = distribute_keywords(&keywords, 2);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0], kws(&["a", "b", "c"]));
        // Second bucket starts with the previous bucket's last keyword.
        assert_eq!(buckets[1], kws(&["c", "d", "e"]));
    }

    #[test]
    fn distribution_handles_more_parts_than_keywords() {
        let keywords = kws(&["a"]);
        let buckets = distribute_keywords(&keywords, 3);
        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets[0], kws(&["a"]));
        assert!(buckets[2].iter().all(|k| k == "a") || buckets[2].is_empty());
    }

    #[test]
    fn replace_ci_matches_any_case() {
        assert_eq!(
            replace_ci("SEO matters. seo wins.", "seo", "search"),
            "search matters. search wins."
        );
    }

    #[test]
    fn replace_ci_stays_on_char_boundaries() {
        // 'İ' and '’' lowercase/occupy more bytes than ASCII; offsets
        // found in a lowercased copy would not fit the original.
        assert_eq!(
            replace_ci("İstanbul businesses’ growth", "businesses", "companies"),
            "İstanbul companies’ growth"
        );
        assert_eq!(replace_ci("no match here", "seo", "x"), "no match here");
    }

    #[test]
    fn optimize_text_accepts_multibyte_input() {
        let out = optimize_text("İstanbul businesses’ growth is strong.", &kws(&["seo"]));
        assert!(out.to_lowercase().contains("seo"));
        assert!(out.contains("İstanbul"));
    }

    #[test]
    fn optimize_text_is_deterministic_and_keyword_bearing() {
        let original = "Businesses rely on marketing strategies. Quality content drives SEO. \
                        Success follows consistency.";
        let keywords = kws(&["email marketing", "link building", "analytics", "automation"]);
        let a = optimize_text(original, &keywords);
        let b = optimize_text(original, &keywords);
        assert_eq!(a, b);
        assert!(a.to_lowercase().contains("email marketing"));
        assert!(a.contains("analytics techniques"));
        assert!(a.contains("success through automation"));
    }

    #[test]
    fn lead_keyword_is_prepended_when_absent() {
        let out = optimize_text("Plain sentence without hooks.", &kws(&["gardening"]));
        assert!(out.starts_with("In the realm of gardening, "));
    }

    #[test]
    fn leftover_keywords_land_in_the_conclusion() {
        let out = optimize_text(
            "One. Two. Three.",
            &kws(&["k1", "k2", "k3", "k4", "k5", "k6", "k7"]),
        );
        assert!(out.contains("integrating k5 and k6"));
        assert!(out.contains("such as k7"));
    }

    #[test]
    fn full_flow_gates_until_all_parts_optimized() {
        let mut s = ToolKind::Optimizer.new_session();
        s.set_text("content", "First paragraph here.\n\nSecond paragraph here.");
        s.set_text("keywords", "alpha, beta, gamma, delta");
        assert!(s.can_advance());
        split_into_parts(&mut s);
        assert!(s.advance());
        assert_eq!(s.entries("parts").len(), 2);

        assert!(!s.advance());
        optimize_part(&mut s, 0);
        assert!(!s.advance());
        optimize_part(&mut s, 1);
        assert!(s.advance());
        assert_eq!(s.current_step(), 3);

        let body = final_content(&s);
        assert!(body.starts_with("Title: "));
        assert!(body.contains("Optimized Content:"));
    }
}
