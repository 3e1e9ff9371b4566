use std::io::Read;

use crate::cli::open_store;
use crate::error::Result;
use crate::parser::parse_presentbin;
use crate::reconcile::reconcile;

pub fn run(file: &str) -> Result<()> {
    let raw = if file == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(file)?
    };

    // A parse failure aborts here with every violation listed; nothing is
    // persisted from a batch that did not validate in full.
    let candidates = parse_presentbin(&raw)?;
    println!("Parsed {} transactions", candidates.len());

    let store = open_store()?;
    let summary = reconcile(&store, &candidates)?;

    println!(
        "{} imported, {} skipped (duplicates), {} failed",
        summary.imported, summary.skipped_duplicates, summary.failed
    );
    Ok(())
}
