//! Hierarchical sequential code generation
//!
//! Department, job and employee codes all follow the same rule: take the
//! existing codes sharing a prefix, read the numeric part after the prefix,
//! and suggest `max + 1` zero-padded to a fixed width.
//!
//! | Code | Prefix | Width | Example |
//! |------|--------|-------|---------|
//! | department | none | 2 | `"05"` |
//! | job (per department) | none | 2 | `"01"` |
//! | employee | department code + job code | 3 | `"0105003"` |
//!
//! Suggestions are computed over a snapshot and never reserve anything.
//! Two callers reading the same snapshot get the same suggestion; the
//! storage layer's unique constraints decide which insert wins.
//!
//! Prefix matching is textual and case-sensitive. A code belongs to a
//! prefix when it starts with it, so `"0105001"` is counted under the
//! prefix `"010"` too.

/// Fixed-width numeric sequence rendered after a (possibly empty) prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceFormat {
    width: usize,
}

impl SequenceFormat {
    /// Department codes: two digits, global sequence.
    pub const DEPARTMENT: Self = Self::new(2);
    /// Job codes: two digits, one sequence per department.
    pub const JOB: Self = Self::new(2);
    /// Employee serials: three digits after `department_code + job_code`.
    pub const EMPLOYEE_SERIAL: Self = Self::new(3);

    pub const fn new(width: usize) -> Self {
        Self { width }
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    /// Zero-pad `value` to the format width.
    ///
    /// Values wider than the format are rendered in full, never truncated.
    pub fn render(&self, value: u64) -> String {
        format!("{value:0width$}", width = self.width)
    }

    /// Render the successor of `max` (`None` means no codes exist yet).
    ///
    /// `scan` never reports `u64::MAX` as a maximum.
    fn next_after(&self, max: Option<u64>) -> String {
        self.render(max.map_or(1, |max| max + 1))
    }

    /// Collect the numeric maximum of `codes` that start with `prefix`.
    pub fn scan<I>(&self, prefix: &str, codes: I) -> SequenceScan
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut scan = SequenceScan::default();
        for code in codes {
            let code = code.as_ref();
            let Some(suffix) = code.strip_prefix(prefix) else {
                continue;
            };
            match parse_serial(suffix) {
                Some(u64::MAX) => {
                    tracing::warn!(
                        code = %code,
                        prefix = %prefix,
                        "Skipping code whose serial has no successor"
                    );
                    scan.skipped += 1;
                }
                Some(value) => {
                    scan.matched += 1;
                    scan.max = Some(scan.max.map_or(value, |max| max.max(value)));
                }
                None => {
                    tracing::warn!(
                        code = %code,
                        prefix = %prefix,
                        "Skipping code with non-numeric serial"
                    );
                    scan.skipped += 1;
                }
            }
        }
        scan
    }

    /// Suggest the next code under `prefix` given the existing `codes`.
    pub fn next_code<I>(&self, prefix: &str, codes: I) -> String
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let scan = self.scan(prefix, codes);
        format!("{prefix}{}", self.next_after(scan.max))
    }
}

/// Result of scanning existing codes under one prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SequenceScan {
    /// Largest serial found, `None` when nothing matched.
    pub max: Option<u64>,
    /// Codes that matched the prefix and carried a numeric serial.
    pub matched: usize,
    /// Codes that matched the prefix but whose serial was not numeric or
    /// was `u64::MAX`.
    pub skipped: usize,
}

/// Parse an unsigned decimal serial. Empty, signed, or overflowing input is rejected.
fn parse_serial(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Next department code from every stored department code.
pub fn next_department_code<I>(existing_codes: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    SequenceFormat::DEPARTMENT.next_code("", existing_codes)
}

/// Next job code from the codes of a single department.
pub fn next_job_code<I>(department_codes: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    SequenceFormat::JOB.next_code("", department_codes)
}

/// Next employee code under `prefix` (department code + job code).
pub fn next_employee_code<I>(prefix: &str, existing_employee_codes: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    SequenceFormat::EMPLOYEE_SERIAL.next_code(prefix, existing_employee_codes)
}

/// Build the employee code prefix for a department/job pair.
pub fn employee_code_prefix(department_code: &str, job_code: &str) -> String {
    format!("{department_code}{job_code}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    const NONE: [&str; 0] = [];

    #[test]
    fn test_department_code_after_gap() {
        assert_eq!(next_department_code(["01", "02", "04"]), "05");
    }

    #[test]
    fn test_department_code_empty() {
        assert_eq!(next_department_code(NONE), "01");
    }

    #[test]
    fn test_department_code_matches_max_plus_one() {
        let sets: [&[&str]; 4] = [&["07"], &["10", "03"], &["09", "99"], &["1", "2", "3"]];
        for set in sets {
            let max = set.iter().map(|c| c.parse::<u64>().unwrap()).max().unwrap();
            assert_eq!(next_department_code(set), format!("{:02}", max + 1));
        }
    }

    #[test]
    fn test_department_code_past_width() {
        assert_eq!(next_department_code(["99"]), "100");
    }

    #[test]
    fn test_job_code_no_jobs() {
        assert_eq!(next_job_code(Vec::<String>::new()), "01");
    }

    #[test]
    fn test_job_code_unordered_input() {
        let codes: BTreeSet<String> = ["03", "01", "02"].iter().map(|s| s.to_string()).collect();
        assert_eq!(next_job_code(&codes), "04");
    }

    #[test]
    fn test_employee_code_continues_serial() {
        assert_eq!(
            next_employee_code("0105", ["0105001", "0105002"]),
            "0105003"
        );
    }

    #[test]
    fn test_employee_code_first_in_prefix() {
        assert_eq!(next_employee_code("0201", NONE), "0201001");
    }

    #[test]
    fn test_employee_code_ignores_other_prefixes() {
        let codes = ["0105001", "0201007", "0105004", "0301009"];
        assert_eq!(next_employee_code("0105", codes), "0105005");
        assert_eq!(next_employee_code("0201", codes), "0201008");
    }

    #[test]
    fn test_employee_code_prefix_is_case_sensitive() {
        assert_eq!(next_employee_code("A1", ["a1005", "A1002"]), "A1003");
    }

    #[test]
    fn test_employee_code_prefix_is_textual() {
        // "010" is a textual prefix of "0105001": suffix "5001" counts as serial 5001.
        assert_eq!(next_employee_code("010", ["0105001"]), "0105002");
    }

    #[test]
    fn test_employee_serial_past_width() {
        assert_eq!(next_employee_code("0105", ["0105999"]), "01051000");
        assert_eq!(next_employee_code("0105", ["01051000"]), "01051001");
    }

    #[test]
    fn test_malformed_serials_are_skipped() {
        let codes = ["0105001", "0105abc", "0105", "0105-04", "01050x9", "0105002"];
        let scan = SequenceFormat::EMPLOYEE_SERIAL.scan("0105", codes);
        assert_eq!(scan.max, Some(2));
        assert_eq!(scan.matched, 2);
        assert_eq!(scan.skipped, 4);
        assert_eq!(next_employee_code("0105", codes), "0105003");
    }

    #[test]
    fn test_overflowing_serial_is_skipped() {
        let codes = ["0199999999999999999999999", "01003"];
        assert_eq!(next_department_code(codes), "1004");
    }

    #[test]
    fn test_largest_serial_is_skipped() {
        let codes = ["18446744073709551615", "07"];
        let scan = SequenceFormat::DEPARTMENT.scan("", codes);
        assert_eq!(scan.max, Some(7));
        assert_eq!(scan.skipped, 1);
        assert_eq!(next_department_code(codes), "08");
        assert_eq!(next_employee_code("0105", ["010518446744073709551615"]), "0105001");
        assert_eq!(
            next_employee_code("0105", ["010518446744073709551614"]),
            "010518446744073709551615"
        );
    }

    #[test]
    fn test_suggestion_is_idempotent() {
        let codes = vec!["0105001".to_string(), "0105002".to_string()];
        let first = next_employee_code("0105", &codes);
        let second = next_employee_code("0105", &codes);
        assert_eq!(first, second);
    }

    #[test]
    fn test_suggestion_is_monotonic_and_gapless() {
        let mut codes: Vec<String> = Vec::new();
        let mut previous = 0u64;
        for _ in 0..25 {
            let next = next_employee_code("0303", &codes);
            let serial: u64 = next["0303".len()..].parse().unwrap();
            assert_eq!(serial, previous + 1);
            for existing in &codes {
                let existing: u64 = existing["0303".len()..].parse().unwrap();
                assert!(serial > existing);
            }
            previous = serial;
            codes.push(next);
        }
        assert_eq!(codes.last().map(String::as_str), Some("0303025"));
    }

    #[test]
    fn test_render_and_next_after() {
        let format = SequenceFormat::new(4);
        assert_eq!(format.width(), 4);
        assert_eq!(format.render(7), "0007");
        assert_eq!(format.next_after(None), "0001");
        assert_eq!(format.next_after(Some(41)), "0042");
    }

    #[test]
    fn test_employee_code_prefix() {
        assert_eq!(employee_code_prefix("01", "05"), "0105");
    }
}
