/// Pick the first `{prefix}{n}` (n = 1, 2, …) for which `taken` is false.
///
/// # Examples
///
/// ```
/// use apidocs_util::unique_name;
///
/// let existing = ["property1", "property3"];
/// let name = unique_name("property", |n| existing.contains(&n));
/// assert_eq!(name, "property2");
/// ```
pub fn unique_name(prefix: &str, taken: impl Fn(&str) -> bool) -> String {
    let mut n: u64 = 1;
    loop {
        let candidate = format!("{prefix}{n}");
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
