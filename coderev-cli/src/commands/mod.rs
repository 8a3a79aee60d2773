//! CLI command implementations

mod analyze;
mod history;

pub use analyze::{AnalyzeArgs, UploadArgs};
pub use history::{DeleteArgs, HistoryArgs, ShowArgs};

use coderev_core::Review;

/// Print one review in full
pub(crate) fn print_review(review: &Review) {
    println!("Review #{} ({})", review.id, review.language);
    println!("Created: {}", review.created_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!();

    print_list("Errors", &review.output.errors);
    print_list("Improvements", &review.output.improvements);
    print_list("Security issues", &review.output.security_issues);
    print_list("Clean code", &review.output.clean_code);

    if !review.output.complexity.is_empty() {
        println!("Complexity:");
        println!("  {}", review.output.complexity);
        println!();
    }

    if !review.output.refactor_code.is_empty() {
        println!("Refactored code:");
        println!("{}", review.output.refactor_code);
        println!();
    }

    if !review.output.summary.is_empty() {
        println!("Summary:");
        println!("  {}", review.output.summary);
    }
}

fn print_list(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }

    println!("{}:", title);
    for item in items {
        println!("  - {}", item);
    }
    println!();
}
