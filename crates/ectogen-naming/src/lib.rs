//! Naming conventions and helpers for ectogen code generation.
//!
//! Turns snake_case table and column names into singular Elixir module
//! names, and resolves configured table-name prefixes into module
//! namespaces.

use inflector::Inflector;

// ============================================================================
// Inflection
// ============================================================================

/// Singularize the last underscore-separated segment of a snake_case name.
///
/// Words ending in `series` lose only their trailing `s`, which the
/// inflection rules would otherwise treat as uncountable.
///
/// # Examples
/// ```
/// use ectogen_naming::singularize;
///
/// assert_eq!(singularize("order_items"), "order_item");
/// assert_eq!(singularize("categories"), "category");
/// assert_eq!(singularize("time_series"), "time_serie");
/// ```
pub fn singularize(name: &str) -> String {
    let (head, last) = match name.rfind('_') {
        Some(idx) => name.split_at(idx + 1),
        None => ("", name),
    };

    if last.is_empty() {
        return name.to_string();
    }

    let singular = if let Some(stem) = last.strip_suffix("series") {
        format!("{stem}serie")
    } else {
        last.to_singular()
    };

    format!("{head}{singular}")
}

/// Convert snake_case to PascalCase.
///
/// # Examples
/// ```
/// use ectogen_naming::to_pascal_case;
///
/// assert_eq!(to_pascal_case("hello_world"), "HelloWorld");
/// assert_eq!(to_pascal_case("order_item"), "OrderItem");
/// assert_eq!(to_pascal_case("user"), "User");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    let mut result = String::new();
    let mut capitalize = true;
    for c in s.chars() {
        if c == '_' || c == '-' {
            capitalize = true;
            continue;
        }
        if capitalize {
            result.push(c.to_ascii_uppercase());
        } else {
            result.push(c);
        }
        capitalize = false;
    }
    result
}

/// Convert a module-style name (`MyApp`) to snake_case (`my_app`).
pub fn to_snake_case(s: &str) -> String {
    s.to_snake_case()
}

/// Singular PascalCase module name for a table or association.
///
/// # Examples
/// ```
/// use ectogen_naming::module_name;
///
/// assert_eq!(module_name("order_items"), "OrderItem");
/// assert_eq!(module_name("time_series"), "TimeSerie");
/// assert_eq!(module_name("customer"), "Customer");
/// ```
pub fn module_name(name: &str) -> String {
    to_pascal_case(&singularize(name))
}

// ============================================================================
// Namespaces
// ============================================================================

/// Split a configured prefix off a table or association name.
///
/// Returns the matching prefix and the remainder when `name` starts with
/// `{prefix}_` and something is left after it. The first matching prefix
/// wins.
///
/// # Examples
/// ```
/// use ectogen_naming::split_namespace;
///
/// let prefixes = vec!["crm".to_string()];
/// assert_eq!(split_namespace("crm_orders", &prefixes), (Some("crm"), "orders"));
/// assert_eq!(split_namespace("orders", &prefixes), (None, "orders"));
/// assert_eq!(split_namespace("crm_", &prefixes), (None, "crm_"));
/// ```
pub fn split_namespace<'a>(name: &'a str, prefixes: &'a [String]) -> (Option<&'a str>, &'a str) {
    for prefix in prefixes {
        if prefix.is_empty() {
            continue;
        }
        if let Some(rest) = name
            .strip_prefix(prefix.as_str())
            .and_then(|r| r.strip_prefix('_'))
            && !rest.is_empty()
        {
            return (Some(prefix.as_str()), rest);
        }
    }
    (None, name)
}

/// Join the application, optional namespace and module into a
/// fully-qualified Elixir module path.
///
/// # Examples
/// ```
/// use ectogen_naming::qualified_module;
///
/// assert_eq!(qualified_module("MyApp", None, "User"), "MyApp.User");
/// assert_eq!(qualified_module("MyApp", Some("crm"), "Order"), "MyApp.Crm.Order");
/// ```
pub fn qualified_module(app: &str, namespace: Option<&str>, module: &str) -> String {
    match namespace {
        Some(ns) => format!("{}.{}.{}", app, to_pascal_case(ns), module),
        None => format!("{}.{}", app, module),
    }
}
