//! Shared helper utilities used across setupvisor components.

use std::env;

const DEFAULT_LOG_LIMIT: usize = 160;
const DIAGNOSTIC_LOG_LIMIT: usize = 512;
const DIAGNOSTIC_ENV: &str = "SETUPVISOR_DIAGNOSTIC";

/// Whether `SETUPVISOR_DIAGNOSTIC` asks for longer log snippets.
fn diagnostic_mode() -> bool {
    env::var(DIAGNOSTIC_ENV)
        .map(|value| is_truthy(&value))
        .unwrap_or(false)
}

fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    ["1", "true", "yes", "on"]
        .iter()
        .any(|accepted| value.eq_ignore_ascii_case(accepted))
}

fn log_limit() -> usize {
    if diagnostic_mode() {
        DIAGNOSTIC_LOG_LIMIT
    } else {
        DEFAULT_LOG_LIMIT
    }
}

/// Folds line breaks into spaces and keeps at most `max_chars` characters,
/// marking a cut with `...`.
fn single_line(value: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }
    let cut = value.chars().nth(max_chars).is_some();
    let kept: String = value
        .chars()
        .take(max_chars)
        .map(|ch| if matches!(ch, '\n' | '\r') { ' ' } else { ch })
        .collect();
    let kept = kept.trim();
    if cut {
        format!("{kept}...")
    } else {
        kept.to_string()
    }
}

/// Single-line, length-capped copy of `value` for log fields. The cap grows
/// in diagnostic mode.
pub fn log_snippet(value: &str) -> String {
    single_line(value, log_limit())
}
