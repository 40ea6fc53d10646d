use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Failure,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    pub severity: Severity,
    pub subject: String,
    pub message: String,
}

impl Finding {
    pub fn warning(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            subject: subject.into(),
            message: message.into(),
        }
    }

    pub fn failure(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Failure,
            subject: subject.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            Severity::Warning => "WARN",
            Severity::Failure => "FAIL",
        };
        write!(f, "[{}] {}: {}", tag, self.subject, self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub findings: Vec<Finding>,
    pub n_assets: usize,
    pub n_balances: usize,
}

impl ValidationReport {
    pub fn from_findings(findings: Vec<Finding>, n_assets: usize, n_balances: usize) -> Self {
        Self {
            findings,
            n_assets,
            n_balances,
        }
    }

    pub fn n_failures(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Failure)
            .count()
    }

    pub fn n_warnings(&self) -> usize {
        self.findings.len() - self.n_failures()
    }

    pub fn passed(&self) -> bool {
        self.n_failures() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let report = ValidationReport::from_findings(
            vec![
                Finding::warning("0xa", "zero balance"),
                Finding::failure("0xb", "zero reserve"),
            ],
            2,
            1,
        );
        assert_eq!(report.n_failures(), 1);
        assert_eq!(report.n_warnings(), 1);
        assert!(!report.passed());
        assert_eq!(report.findings[1].to_string(), "[FAIL] 0xb: zero reserve");
    }
}
