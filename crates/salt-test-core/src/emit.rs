//! Rendering of exclusion plans into pytest arguments.

use crate::plan::ExclusionPlan;
use crate::skiplist::EntrySet;

/// Render `plan` into pytest arguments.
///
/// Ignores come first, then deselects, then one `-k` filter that excludes
/// any test matching one of the keyword expressions. The output depends
/// only on the plan's contents and order.
pub fn emit(plan: &ExclusionPlan) -> Vec<String> {
    emit_with_selection(plan, None)
}

/// Like [`emit`], but folds a caller's own `-k` expression into the filter.
///
/// The resulting filter is `(<selection>) and not (...)`, so the selection
/// still applies and skipped keywords stay excluded.
pub fn emit_with_selection(plan: &ExclusionPlan, selection: Option<&str>) -> Vec<String> {
    let mut args = Vec::with_capacity(plan.files.len() + plan.tests.len() + 2);

    for file in &plan.files {
        args.push(format!("--ignore={}", file));
    }
    for test in &plan.tests {
        args.push(format!("--deselect={}", test));
    }
    if let Some(filter) = combined_filter(selection, &plan.keywords) {
        args.push("-k".to_string());
        args.push(filter);
    }

    args
}

/// Build `not ((a) or (b) ...)` from keyword expressions.
///
/// pytest only honours the last `-k` it sees, so all expressions are
/// combined into one filter. Blank expressions are skipped.
pub fn keyword_filter(keywords: &EntrySet) -> Option<String> {
    let alternatives = keywords
        .iter()
        .filter(|expr| !expr.trim().is_empty())
        .map(|expr| format!("({})", expr))
        .collect::<Vec<_>>();
    if alternatives.is_empty() {
        return None;
    }
    Some(format!("not ({})", alternatives.join(" or ")))
}

fn combined_filter(selection: Option<&str>, keywords: &EntrySet) -> Option<String> {
    let selection = selection.filter(|expr| !expr.trim().is_empty());
    match (selection, keyword_filter(keywords)) {
        (Some(selection), Some(exclusion)) => Some(format!("({}) and {}", selection, exclusion)),
        (Some(selection), None) => Some(selection.to_string()),
        (None, exclusion) => exclusion,
    }
}
