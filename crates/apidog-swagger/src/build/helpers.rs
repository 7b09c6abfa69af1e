//! Shared naming helpers used across builder modules.

/// Upper-case the first ASCII character, leaving the rest untouched.
///
/// `user` → `User`, `userId` → `UserId`, `` → ``
pub fn ucfirst(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(s.len());
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

/// Strip path-template braces.
///
/// `/user/{id}` → `/user/id`
pub fn clean_path(path: &str) -> String {
    path.chars().filter(|c| !matches!(c, '{' | '}')).collect()
}

/// Join `/`-separated segments of a clean path, each with its first
/// character capitalized.
///
/// `/user/id` → `UserId`
pub fn path_model_name(clean_path: &str) -> String {
    clean_path.split('/').map(ucfirst).collect()
}

/// Drop underscores from an example key before deriving a nested name.
///
/// `created_at` → `createdat`
pub fn clean_key(key: &str) -> String {
    key.replace('_', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ucfirst_basic() {
        assert_eq!(ucfirst("user"), "User");
        assert_eq!(ucfirst("User"), "User");
        assert_eq!(ucfirst("get"), "Get");
        assert_eq!(ucfirst(""), "");
        assert_eq!(ucfirst("1st"), "1st");
    }

    #[test]
    fn clean_path_strips_braces() {
        assert_eq!(clean_path("/user/{id}"), "/user/id");
        assert_eq!(clean_path("/a/{b}/{c}/d"), "/a/b/c/d");
        assert_eq!(clean_path("/plain"), "/plain");
    }

    #[test]
    fn path_model_name_joins_segments() {
        assert_eq!(path_model_name("/user/id"), "UserId");
        assert_eq!(path_model_name("user/id"), "UserId");
        assert_eq!(path_model_name("/order/list/detail"), "OrderListDetail");
        assert_eq!(path_model_name("/user-info"), "User-info");
    }

    #[test]
    fn clean_key_drops_underscores() {
        assert_eq!(clean_key("created_at"), "createdat");
        assert_eq!(clean_key("__meta__"), "meta");
        assert_eq!(clean_key("plain"), "plain");
    }
}
