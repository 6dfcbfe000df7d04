//! DocNav CLI — navigation trees for multi-source documentation.
//!
//! Builds the navigation tree of a documentation corpus from its configured
//! sources, flags content pages and applies `.order` overrides.
//!
//! Exit codes: `0` on success, `2` when the corpus itself is inconsistent
//! (ambiguous content or order files), `1` for every other failure.

mod commands;

use std::process::ExitCode;

use clap::Parser;
use color_eyre::eyre::{Report, Result};
use docnav_shared::DocNavError;

use commands::Cli;

/// Exit code for data-integrity faults in the documentation corpus.
const CORPUS_FAULT_EXIT: u8 = 2;

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);

    // A single traversal mutates the tree; one thread is enough.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    match runtime.block_on(commands::run(cli)) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(report) if is_corpus_fault(&report) => {
            eprintln!("Error: {report:?}");
            Ok(ExitCode::from(CORPUS_FAULT_EXIT))
        }
        Err(report) => Err(report),
    }
}

fn is_corpus_fault(report: &Report) -> bool {
    report
        .downcast_ref::<DocNavError>()
        .is_some_and(DocNavError::is_ambiguity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambiguity_is_a_corpus_fault() {
        let report = Report::new(DocNavError::AmbiguousOrder {
            scope: "guide".into(),
            first: "docs:guide/.order".into(),
            second: "docs:guide.order".into(),
        });
        assert!(is_corpus_fault(&report));
    }

    #[test]
    fn config_errors_are_not_corpus_faults() {
        assert!(!is_corpus_fault(&Report::new(DocNavError::config("bad"))));
        assert!(!is_corpus_fault(&color_eyre::eyre::eyre!("plain message")));
    }
}
