use std::io::{self, Write};

use crate::data::aggregate::site_success_breakdown;
use crate::data::model::{ALL_SITES, LaunchDataset, SiteSelection};

/// Plain-text overview: the selector entries, then the mean `class` per site.
pub fn write_summary<W: Write>(out: &mut W, dataset: &LaunchDataset) -> io::Result<()> {
    let mut options = vec![ALL_SITES];
    options.extend(dataset.sites().iter().map(String::as_str));
    writeln!(out, "Sites: {}", options.join(", "))?;
    writeln!(out)?;

    let width = dataset
        .sites()
        .iter()
        .map(|s| s.len())
        .chain(std::iter::once("Launch Site".len()))
        .max()
        .unwrap_or(0);

    writeln!(out, "{:<width$}  {:>8}", "Launch Site", "class")?;
    for seg in site_success_breakdown(dataset, &SiteSelection::AllSites).segments {
        writeln!(out, "{:<width$}  {:>8.6}", seg.label, seg.value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, Outcome};

    #[test]
    fn lists_sites_and_rates() {
        let ds = LaunchDataset::from_records(vec![
            LaunchRecord::new("CCAFS", 500.0, Outcome::Success),
            LaunchRecord::new("CCAFS", 2000.0, Outcome::Failure),
            LaunchRecord::new("KSC", 3000.0, Outcome::Success),
        ])
        .unwrap();

        let mut buf = Vec::new();
        write_summary(&mut buf, &ds).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with("Sites: All Sites, CCAFS, KSC\n"));
        assert!(text.contains("CCAFS        0.500000"));
        assert!(text.contains("KSC          1.000000"));
    }
}
