//! Table naming.

use std::collections::HashSet;

use inflector::Inflector;

/// Irregular plurals the inflector gets wrong for column vocabulary.
static IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("person", "people"),
    ("child", "children"),
    ("man", "men"),
    ("woman", "women"),
    ("mouse", "mice"),
    ("leaf", "leaves"),
    ("life", "lives"),
    ("half", "halves"),
    ("analysis", "analyses"),
    ("basis", "bases"),
    ("diagnosis", "diagnoses"),
    ("criterion", "criteria"),
    ("datum", "data"),
    ("medium", "media"),
    ("index", "indices"),
    ("matrix", "matrices"),
    ("vertex", "vertices"),
];

/// Pluralize a word, checking irregulars before the inflector.
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    let lower = word.to_lowercase();
    for (singular, plural) in IRREGULAR_PLURALS {
        if lower == *singular || lower == *plural {
            return plural.to_string();
        }
    }

    word.to_plural()
}

/// Pluralize the last `_`-separated word of a column name.
pub fn pluralize_column(name: &str) -> String {
    match name.rsplit_once('_') {
        Some((head, last)) if !last.is_empty() => format!("{}_{}", head, pluralize(last)),
        _ => pluralize(name),
    }
}

/// Descriptive name for a table with the given key and non-key columns.
///
/// One dependent names the table after the dependent. A single-column key
/// names it after the key with any `_id` suffix dropped. Otherwise the
/// first two key columns are joined.
pub fn table_name(key: &[String], dependents: &[String]) -> String {
    if let [dependent] = dependents {
        return pluralize_column(dependent);
    }
    if let [column] = key {
        let base = column
            .strip_suffix("_id")
            .filter(|b| !b.is_empty())
            .unwrap_or(column);
        return pluralize_column(base);
    }
    key.iter().take(2).cloned().collect::<Vec<_>>().join("_")
}

/// Fallback for a name with no usable characters.
const UNNAMED_TABLE: &str = "table";

/// Map every character outside `[A-Za-z0-9_]` to `_`, so a name is safe
/// both as a file stem and as an SQL identifier.
pub fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if cleaned.is_empty() {
        UNNAMED_TABLE.to_string()
    } else {
        cleaned
    }
}

/// Hands out sanitized table names, suffixing `_2`, `_3`, … on collision.
#[derive(Debug, Default)]
pub struct NameAllocator {
    used: HashSet<String>,
}

impl NameAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self, base: &str) -> String {
        let base = sanitize_name(base);
        let mut name = base.clone();
        let mut n = 2;
        while self.used.contains(&name) {
            name = format!("{}_{}", base, n);
            n += 1;
        }
        self.used.insert(name.clone());
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("city"), "cities");
        assert_eq!(pluralize("name"), "names");
        assert_eq!(pluralize("person"), "people");
        assert_eq!(pluralize(""), "");
    }

    #[test]
    fn test_pluralize_column_inflects_last_word() {
        assert_eq!(pluralize_column("dept_name"), "dept_names");
        assert_eq!(pluralize_column("home_city"), "home_cities");
        assert_eq!(pluralize_column("emp"), "emps");
    }

    #[test]
    fn test_table_name_single_dependent() {
        assert_eq!(table_name(&strings(&["dept_id"]), &strings(&["dept_name"])), "dept_names");
    }

    #[test]
    fn test_table_name_single_key() {
        assert_eq!(
            table_name(&strings(&["emp_id"]), &strings(&["emp_name", "dept_id"])),
            "emps"
        );
        assert_eq!(table_name(&strings(&["city"]), &strings(&["a", "b"])), "cities");
    }

    #[test]
    fn test_table_name_composite_key() {
        assert_eq!(
            table_name(&strings(&["student", "course", "term"]), &strings(&[])),
            "student_course"
        );
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("price/units"), "price_units");
        assert_eq!(sanitize_name("../up"), "___up");
        assert_eq!(sanitize_name("dept names"), "dept_names");
        assert_eq!(sanitize_name(""), "table");
        assert_eq!(sanitize_name("emps_2"), "emps_2");
    }

    #[test]
    fn test_allocator_sanitizes_before_suffixing() {
        let mut names = NameAllocator::new();
        assert_eq!(names.allocate("a/b"), "a_b");
        assert_eq!(names.allocate("a b"), "a_b_2");
    }

    #[test]
    fn test_allocator_suffixes_collisions() {
        let mut names = NameAllocator::new();
        assert_eq!(names.allocate("main"), "main");
        assert_eq!(names.allocate("main"), "main_2");
        assert_eq!(names.allocate("main"), "main_3");
        assert_eq!(names.allocate("other"), "other");
    }
}
