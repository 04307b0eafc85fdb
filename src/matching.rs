//! The active-link rule shared by the server-side layout and the controller.
//!
//! An entry is active for a candidate path when its declared path equals the
//! candidate, or when the declared path is not the root `/` and the candidate
//! begins with it. The prefix test is a literal string prefix, not a
//! segment-aware one: `/rep` is active on `/reports`.
//!
//! The root exclusion keeps `/` from lighting up on every page. Entries that
//! are prefixes of each other (`/reports` and `/reports/q1`) can both be
//! active for a deeper candidate; callers get every match, not just the
//! longest.

/// The root path, which only matches itself.
pub const ROOT_PATH: &str = "/";

/// Returns true when `declared` should be highlighted for `candidate`.
pub fn is_active(declared: &str, candidate: &str) -> bool {
    declared == candidate || (declared != ROOT_PATH && candidate.starts_with(declared))
}

/// Like [`is_active`], for an entry whose declared path may be missing.
/// A missing path never matches.
pub fn is_active_opt(declared: Option<&str>, candidate: &str) -> bool {
    declared.is_some_and(|d| is_active(d, candidate))
}

/// Indices of every declared path that is active for `candidate`.
pub fn active_indices<'a, I>(declared: I, candidate: &str) -> Vec<usize>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    declared
        .into_iter()
        .enumerate()
        .filter(|(_, d)| is_active_opt(*d, candidate))
        .map(|(i, _)| i)
        .collect()
}
