use similar::TextDiff;

use super::casefold_sorted;

const CONTEXT_RADIUS: usize = 3;

/// Diffs the corrected requirement list against the current one.
///
/// Both sides are sorted case-insensitively first. Returns the unified diff
/// lines, headed `Corrected` and `Current`, or nothing when they match.
#[must_use]
pub fn compare_requirements(new: &[String], current: &[String]) -> Vec<String> {
    let corrected = casefold_sorted(new.to_vec());
    let current = casefold_sorted(current.to_vec());
    if corrected == current {
        return Vec::new();
    }

    let corrected_text = as_lines(&corrected);
    let current_text = as_lines(&current);
    TextDiff::from_lines(&corrected_text, &current_text)
        .unified_diff()
        .context_radius(CONTEXT_RADIUS)
        .header("Corrected", "Current")
        .to_string()
        .lines()
        .map(str::to_owned)
        .collect()
}

fn as_lines(requirements: &[String]) -> String {
    requirements
        .iter()
        .map(|req| format!("{req}\n"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::compare_requirements;

    fn reqs(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| (*item).to_owned()).collect()
    }

    #[test]
    fn identical_lists_produce_no_diff() {
        let new = reqs(&["pandas>=1.1", "Keyring"]);
        let current = reqs(&["Keyring", "pandas>=1.1"]);
        assert!(compare_requirements(&new, &current).is_empty());
    }

    #[test]
    fn changed_pins_show_both_sides() {
        let new = reqs(&["pandas>=1.2", "keyring"]);
        let current = reqs(&["pandas>=1.1", "keyring"]);
        let diff = compare_requirements(&new, &current);

        assert_eq!(diff[0], "--- Corrected");
        assert_eq!(diff[1], "+++ Current");
        assert!(diff.iter().any(|line| line == "-pandas>=1.2"));
        assert!(diff.iter().any(|line| line == "+pandas>=1.1"));
    }
}
