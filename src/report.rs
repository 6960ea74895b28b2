use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use log::debug;

use crate::probabilities::ProbabilityTable;

/// Write one `key: [p0, p1, ...]` line per alternative.
pub fn write_report<W: Write>(table: &ProbabilityTable, mut out: W) -> io::Result<()> {
    for (key, probs) in table.iter() {
        writeln!(out, "{}: {:?}", key, probs)?;
    }
    out.flush()
}

/// Write the report to a file, replacing it if it exists.
pub fn save_report(table: &ProbabilityTable, path: impl AsRef<Path>) -> io::Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_report(table, BufWriter::new(file))?;
    debug!(
        "saved probabilities of {} alternatives to {}",
        table.num_alternatives(),
        path.display()
    );
    Ok(())
}
