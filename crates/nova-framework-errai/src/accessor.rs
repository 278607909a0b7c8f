//! JavaBeans accessor naming (`getFoo` / `setFoo` / `isFoo` <-> `foo`).

/// Canonical property name for an accessor method name.
///
/// `getFirstName` and `setFirstName` map to `firstName`, `isActive` to
/// `active`. Only the first character after the prefix is lower-cased, so
/// `setURL` maps to `uRL`. Names that are not accessors are returned
/// unchanged; callers compare the result with the input to tell the two
/// apart.
pub fn property_from_accessor(accessor: &str) -> String {
    let chars: Vec<char> = accessor.chars().collect();

    if chars.len() > 3 && chars[1] == 'e' && chars[2] == 't' {
        if matches!(chars[0], 'g' | 's') {
            return decapitalize(&chars[3..]);
        }
        return accessor.to_string();
    }

    if chars.len() > 2 && chars[0] == 'i' && chars[1] == 's' {
        return decapitalize(&chars[2..]);
    }

    accessor.to_string()
}

fn decapitalize(rest: &[char]) -> String {
    let mut out = String::with_capacity(rest.len());
    if let Some((first, tail)) = rest.split_first() {
        out.push(first.to_ascii_lowercase());
        out.extend(tail);
    }
    out
}

/// `method` reads `property` (`get<Property>` or `is<Property>`, any case).
pub fn is_getter_name(method: &str, property: &str) -> bool {
    prefixed_eq_ignore_case(method, "get", property)
        || prefixed_eq_ignore_case(method, "is", property)
}

/// `method` writes `property` (`set<Property>`, any case).
pub fn is_setter_name(method: &str, property: &str) -> bool {
    prefixed_eq_ignore_case(method, "set", property)
}

fn prefixed_eq_ignore_case(method: &str, prefix: &str, property: &str) -> bool {
    let Some(head) = method.get(..prefix.len()) else {
        return false;
    };
    head.eq_ignore_ascii_case(prefix) && eq_ignore_case(&method[prefix.len()..], property)
}

/// Unicode case-insensitive equality (`getÉtat` reads `état`).
fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}
