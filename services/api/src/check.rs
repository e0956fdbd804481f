use clap::Args;
use playground_reviews::error::AppError;
use playground_reviews::reviews::{FacilityId, RepositoryError, ReviewCsvImporter, ReviewStore};
use playground_reviews::summary::{
    aggregate_reviews, check_eligibility, total_chars, Eligibility, MIN_REVIEW_COUNT,
    MIN_TOTAL_CHARS,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    /// Facility export (id,name,prefecture,address)
    #[arg(long)]
    pub(crate) facilities_csv: PathBuf,
    /// Review export (facility_id,author,rating,content,created_at)
    #[arg(long)]
    pub(crate) reviews_csv: PathBuf,
    /// Facility to inspect
    #[arg(long)]
    pub(crate) facility_id: u64,
    /// Print the combined text that would be sent to the summarizer
    #[arg(long)]
    pub(crate) show_text: bool,
}

pub(crate) fn run_check(args: CheckArgs) -> Result<(), AppError> {
    let store = ReviewCsvImporter::from_paths(&args.facilities_csv, Some(&args.reviews_csv))?;
    let report = render_check(&store, FacilityId(args.facility_id), args.show_text)?;
    print!("{report}");
    Ok(())
}

pub(crate) fn render_check<S: ReviewStore>(
    store: &S,
    facility_id: FacilityId,
    show_text: bool,
) -> Result<String, RepositoryError> {
    let Some(facility) = store.get_facility(facility_id)? else {
        return Ok(format!("Facility {facility_id} not found\n"));
    };

    let reviews = store.list_reviews(&facility)?;
    let contents: Vec<&str> = reviews.iter().map(|review| review.content.as_str()).collect();

    let mut out = format!("Facility {}: {}\n", facility.id, facility.name);
    out.push_str(&format!(
        "Reviews: {} (minimum {MIN_REVIEW_COUNT})\n",
        contents.len()
    ));
    out.push_str(&format!(
        "Combined length: {} characters (minimum {MIN_TOTAL_CHARS})\n",
        total_chars(&contents)
    ));

    match check_eligibility(&contents) {
        Eligibility::Eligible => {
            out.push_str("Eligible for summary\n");
            if show_text {
                out.push('\n');
                out.push_str(&aggregate_reviews(&contents));
                out.push('\n');
            }
        }
        Eligibility::Ineligible(reason) => {
            out.push_str(&format!("Not eligible: {}\n", reason.message()));
        }
    }

    Ok(out)
}
