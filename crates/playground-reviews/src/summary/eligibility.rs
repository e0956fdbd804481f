use std::fmt;

pub const MIN_REVIEW_COUNT: usize = 3;
pub const MIN_TOTAL_CHARS: usize = 300;

/// Outcome of the summarization gate for one facility's review set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Eligible,
    Ineligible(IneligibleReason),
}

/// Why a review set cannot be summarized, with the figure that failed the rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IneligibleReason {
    TooFewReviews { count: usize },
    InsufficientLength { total_chars: usize },
}

impl IneligibleReason {
    /// User-facing explanation returned with the 400 response.
    pub fn message(&self) -> &'static str {
        match self {
            IneligibleReason::TooFewReviews { .. } => "口コミが3件未満のため、要約できません。",
            IneligibleReason::InsufficientLength { .. } => {
                "口コミの合計文字数が300文字未満のため、要約できません。"
            }
        }
    }
}

impl fmt::Display for IneligibleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Combined length of `contents` in characters.
pub fn total_chars<S: AsRef<str>>(contents: &[S]) -> usize {
    contents
        .iter()
        .map(|content| content.as_ref().chars().count())
        .sum()
}

/// Applies the count rule, then the combined-length rule. Lengths are counted
/// in characters, not bytes. Order of `contents` does not matter.
pub fn check_eligibility<S: AsRef<str>>(contents: &[S]) -> Eligibility {
    let count = contents.len();
    if count < MIN_REVIEW_COUNT {
        return Eligibility::Ineligible(IneligibleReason::TooFewReviews { count });
    }

    let total_chars = total_chars(contents);
    if total_chars < MIN_TOTAL_CHARS {
        return Eligibility::Ineligible(IneligibleReason::InsufficientLength { total_chars });
    }

    Eligibility::Eligible
}
