use crate::metrics::RecentErrors;

const RULE: &str = "---------------------------------------------";

#[must_use]
pub fn error_lines(errors: &RecentErrors) -> Vec<String> {
    let mut lines = Vec::with_capacity(
        errors
            .http
            .len()
            .saturating_add(errors.other.len())
            .saturating_add(7),
    );
    lines.push(String::new());
    lines.push("HTTP Errors:".to_owned());
    lines.push(RULE.to_owned());
    lines.extend(errors.http.iter().cloned());
    lines.push(String::new());
    lines.push("Other Errors:".to_owned());
    lines.push(RULE.to_owned());
    lines.extend(errors.other.iter().cloned());
    lines
}
