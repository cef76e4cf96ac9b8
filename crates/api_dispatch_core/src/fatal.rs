//! Process termination for conditions that must not become a response.
//!
//! Ending the invocation without a reply lets the platform requeue it. Never
//! surfaced as a [`crate::Failure`].

/// Exit status used when the process is terminated (`EX_SOFTWARE`).
pub const FATAL_EXIT_CODE: i32 = 70;

pub fn terminate(reason: &str) -> ! {
    tracing::error!(reason, "terminating process");
    eprintln!("fatal: {reason}");
    std::process::exit(FATAL_EXIT_CODE)
}
