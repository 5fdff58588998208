/// Split a comma-separated list, trimming items and dropping empty ones.
///
/// # Examples
///
/// ```
/// use apidocs_util::strings::split_list;
///
/// assert_eq!(split_list(" Order, User ,,"), vec!["Order", "User"]);
/// assert!(split_list("").is_empty());
/// ```
pub fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list_single() {
        assert_eq!(split_list("Order"), vec!["Order"]);
    }

    #[test]
    fn test_split_list_whitespace_only() {
        assert!(split_list(" ,  , ").is_empty());
    }

    #[test]
    fn test_split_list_keeps_inner_spaces() {
        assert_eq!(split_list("a b, c"), vec!["a b", "c"]);
    }
}
