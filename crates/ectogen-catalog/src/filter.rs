use regex::Regex;

use crate::error::FilterError;

/// Include/exclude regular expressions applied to table names.
#[derive(Debug, Clone, Default)]
pub struct TableFilter {
    include: Option<Regex>,
    exclude: Option<Regex>,
}

impl TableFilter {
    pub fn new(include: Option<&str>, exclude: Option<&str>) -> Result<Self, FilterError> {
        Ok(Self {
            include: compile("include", include)?,
            exclude: compile("exclude", exclude)?,
        })
    }

    /// Exclude wins over include; no include means every table.
    pub fn allows(&self, table: &str) -> bool {
        if self.exclude.as_ref().is_some_and(|re| re.is_match(table)) {
            return false;
        }
        self.include.as_ref().is_none_or(|re| re.is_match(table))
    }
}

fn compile(field: &'static str, pattern: Option<&str>) -> Result<Option<Regex>, FilterError> {
    pattern
        .map(|p| {
            Regex::new(p).map_err(|source| FilterError::InvalidPattern {
                field,
                pattern: p.to_string(),
                source,
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn empty_filter_allows_everything() {
        let filter = TableFilter::default();
        assert!(filter.allows("users"));
        assert!(filter.allows("schema_migrations"));
    }

    #[rstest]
    #[case("pub_orders", true)]
    #[case("pub_orders_archive", false)]
    #[case("orders", false)]
    #[case("orders_archive", false)]
    fn exclude_overrides_include(#[case] table: &str, #[case] allowed: bool) {
        let filter = TableFilter::new(Some("^pub_"), Some("_archive$")).unwrap();
        assert_eq!(filter.allows(table), allowed);
    }

    #[test]
    fn exclude_only() {
        let filter = TableFilter::new(None, Some("^schema_migrations$")).unwrap();
        assert!(!filter.allows("schema_migrations"));
        assert!(filter.allows("users"));
    }

    #[test]
    fn invalid_pattern_names_the_field() {
        let err = TableFilter::new(Some("("), None).unwrap_err();
        let FilterError::InvalidPattern { field, pattern, .. } = &err;
        assert_eq!(*field, "include");
        assert_eq!(pattern, "(");
        assert!(err.to_string().starts_with("invalid include pattern '('"));
    }
}
