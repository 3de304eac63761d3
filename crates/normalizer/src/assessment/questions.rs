//! Review questions about uncertain or plausible dependencies.

use serde::{Deserialize, Serialize};

use crate::dependency::{AttributeSet, Dependency, FunctionalDependency};
use crate::profile::ColumnProfile;

/// Name fragments that commonly imply a dependency: a column whose name
/// contains a determinant fragment often determines a column whose name
/// contains a dependent fragment.
const SEMANTIC_PATTERNS: &[(&[&str], &[&str])] = &[
    (&["zip_code"], &["city", "state"]),
    (&["department_id", "dept_id"], &["department_name", "dept_name", "manager"]),
    (&["country"], &["currency", "country_code"]),
];

/// A question for the user to resolve before normalizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Question {
    /// A discovered dependency held in most but not all groups.
    FdConfirmation {
        fd: Dependency,
        confidence: f64,
        violations: usize,
        question: String,
    },
    /// Column names suggest a dependency that was not discovered.
    SemanticFd { fd: Dependency, question: String },
}

impl Question {
    pub fn fd(&self) -> &Dependency {
        match self {
            Question::FdConfirmation { fd, .. } | Question::SemanticFd { fd, .. } => fd,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Question::FdConfirmation { question, .. } | Question::SemanticFd { question, .. } => question,
        }
    }
}

/// Build review questions: one per needs-review dependency, then one per
/// name-pattern match not already among the discovered dependencies.
pub fn generate_questions(fds: &[FunctionalDependency], profiles: &[ColumnProfile]) -> Vec<Question> {
    let mut questions: Vec<Question> = fds
        .iter()
        .filter(|fd| fd.needs_review())
        .map(|fd| Question::FdConfirmation {
            fd: fd.dependency.clone(),
            confidence: fd.confidence,
            violations: fd.violations,
            question: format!(
                "Does {} hold? ({} violations found, {:.1}% confidence)",
                fd.dependency,
                fd.violations,
                fd.confidence * 100.0
            ),
        })
        .collect();

    for (det_patterns, dep_patterns) in SEMANTIC_PATTERNS {
        for det in profiles.iter().filter(|p| matches_any(&p.name, det_patterns)) {
            for dep in profiles.iter().filter(|p| matches_any(&p.name, dep_patterns)) {
                if det.name == dep.name {
                    continue;
                }
                let determinant: AttributeSet = [det.name.as_str()].into_iter().collect();
                let discovered = fds
                    .iter()
                    .any(|fd| fd.determinant() == &determinant && fd.dependent() == dep.name);
                if discovered {
                    continue;
                }
                questions.push(Question::SemanticFd {
                    fd: Dependency::new_unchecked(determinant, dep.name.as_str()),
                    question: format!(
                        "Does {} determine {}? (Semantic pattern detected)",
                        det.name, dep.name
                    ),
                });
            }
        }
    }

    tracing::debug!(count = questions.len(), "generated review questions");
    questions
}

fn matches_any(name: &str, patterns: &[&str]) -> bool {
    let lower = name.to_lowercase();
    patterns.iter().any(|p| lower.contains(p))
}
