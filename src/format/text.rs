// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of qgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::OnceLock;

use regex::Regex;

pub const BIOLINK_PREFIX: &str = "biolink:";

fn curie_regex() -> &'static Regex {
    static CURIE: OnceLock<Regex> = OnceLock::new();
    CURIE.get_or_init(|| {
        Regex::new(r"^[A-Za-z][A-Za-z0-9_.\-]*:[^\s:][^\s]*$").expect("curie regex is valid")
    })
}

/// `PREFIX:local` with no whitespace, e.g. `MONDO:0005148`.
pub fn is_curie(value: &str) -> bool {
    curie_regex().is_match(value)
}

pub fn strip_biolink(value: &str) -> &str {
    value.strip_prefix(BIOLINK_PREFIX).unwrap_or(value)
}

/// Adds the `biolink:` namespace unless the value already carries a prefix.
pub fn namespaced(value: &str) -> String {
    if value.contains(':') {
        return value.to_owned();
    }
    let mut out = String::with_capacity(BIOLINK_PREFIX.len() + value.len());
    out.push_str(BIOLINK_PREFIX);
    out.push_str(value);
    out
}

/// Splits `SmallMolecule`, `small_molecule`, `small molecule` and `RNAProduct` into words.
pub fn split_words(value: &str) -> Vec<String> {
    let chars: Vec<char> = value.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (idx, &ch) in chars.iter().enumerate() {
        if matches!(ch, '_' | ' ' | '-' | '\t') {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if ch.is_uppercase() && !current.is_empty() {
            let prev = chars[idx - 1];
            let next_is_lower = chars.get(idx + 1).is_some_and(|next| next.is_lowercase());
            // "smallMolecule" splits before M; "RNAProduct" splits before the P only.
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

pub fn snake_case(value: &str) -> String {
    split_words(value)
        .iter()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// `biolink:SmallMolecule` → `Small Molecule`; acronyms keep their case.
pub fn pretty_category(category: &str) -> String {
    split_words(strip_biolink(category))
        .into_iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `biolink:gene_associated_with_condition` → `gene associated with condition`.
pub fn pretty_predicate(predicate: &str) -> String {
    split_words(strip_biolink(predicate))
        .iter()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// English plural for the last word of a label ("Small Molecule" → "Small Molecules").
pub fn pluralize(label: &str) -> String {
    let lower = label.to_lowercase();
    if lower.ends_with("ss") || lower.ends_with('x') || lower.ends_with("ch") || lower.ends_with("sh")
    {
        return format!("{label}es");
    }
    if lower.ends_with('s') {
        return label.to_owned();
    }
    let mut chars = lower.chars().rev();
    if let (Some('y'), Some(before)) = (chars.next(), chars.next()) {
        if !matches!(before, 'a' | 'e' | 'i' | 'o' | 'u') {
            return format!("{}ies", &label[..label.len() - 1]);
        }
    }
    format!("{label}s")
}
