pub mod account;
pub mod message;
pub mod post;
pub mod social;

use snugblog::SocialError;

use crate::output::OutputManager;

/// Prints field issues for a rejected form and hands the error back for `?`.
pub fn report(output: &OutputManager, err: SocialError) -> anyhow::Error {
    if let SocialError::Validation(validation) = &err {
        output.error("The form was not accepted:");
        for issue in &validation.issues {
            output.bullet(&format!("{}: {}", issue.field, issue.message));
        }
    }
    err.into()
}
