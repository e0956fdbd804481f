pub const REVIEW_SEPARATOR: &str = "\n\n";

/// Joins review bodies in the order given. Contents are copied verbatim.
pub fn aggregate_reviews<S: AsRef<str>>(contents: &[S]) -> String {
    let capacity = contents
        .iter()
        .map(|content| content.as_ref().len())
        .sum::<usize>()
        + REVIEW_SEPARATOR.len() * contents.len().saturating_sub(1);

    let mut combined = String::with_capacity(capacity);
    for (index, content) in contents.iter().enumerate() {
        if index > 0 {
            combined.push_str(REVIEW_SEPARATOR);
        }
        combined.push_str(content.as_ref());
    }
    combined
}
