/// Maximum number of actions returned to the caller.
pub const MAX_ACTIONS: usize = 5;

const BASELINE_ACTIONS: [&str; 4] = [
    "Review document thoroughly",
    "Consult with attorney if needed",
    "Keep original document safe",
    "Note any important deadlines",
];

/// Keyword triggers, in check order. Each hit is pushed to the front of the
/// list, so later triggers end up ahead of earlier ones.
const TRIGGERS: [(&str, &str); 3] = [
    ("respond", "Prepare written response"),
    ("deadline", "Check all deadlines immediately"),
    ("court", "Prepare for court proceedings"),
];

/// Ordered action list for a legal summary. Never empty, at most `MAX_ACTIONS`.
pub fn derive_actions(summary: &str) -> Vec<String> {
    let lowered = summary.to_lowercase();

    let mut actions: Vec<String> = BASELINE_ACTIONS.iter().map(|a| a.to_string()).collect();
    for (keyword, action) in TRIGGERS {
        if lowered.contains(keyword) {
            actions.insert(0, action.to_string());
        }
    }

    actions.truncate(MAX_ACTIONS);
    actions
}
