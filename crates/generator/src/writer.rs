//! Streams sampled records into the seed CSV files.

use std::fs::{self, File};
use std::io::{BufWriter, Write};

use lakehouse_core::{GeneratorConfig, Result, SeedFile};
use tracing::{debug, info};

use crate::sampling::Sampler;
use crate::summary::GenerationSummary;

/// Writes the content catalog. Returns the number of rows written.
pub fn write_content_catalog<W: Write>(sampler: &mut Sampler, out: W) -> Result<u64> {
    let mut wtr = csv::Writer::from_writer(out);
    let count = sampler.config().num_content_items;
    for n in 1..=count {
        let item = sampler.content_item(n);
        wtr.serialize(&item)?;
    }
    wtr.flush()?;
    Ok(u64::from(count))
}

/// Writes one impression stream covering every configured day.
pub fn write_ad_events<W: Write>(sampler: &mut Sampler, out: W) -> Result<u64> {
    let mut wtr = csv::Writer::from_writer(out);
    let start = sampler.impressions();
    for offset in 0..sampler.config().num_days {
        let date = sampler.config().day(offset);
        let daily = sampler.daily_impressions(date);
        debug!(%date, impressions = daily, "Sampling day");
        for _ in 0..daily {
            let event = sampler.impression(date);
            wtr.serialize(&event)?;
        }
    }
    wtr.flush()?;
    Ok(sampler.impressions() - start)
}

/// Writes the conversions stream covering every configured day.
pub fn write_conversions<W: Write>(sampler: &mut Sampler, out: W) -> Result<u64> {
    let mut wtr = csv::Writer::from_writer(out);
    let start = sampler.conversions();
    for offset in 0..sampler.config().num_days {
        let date = sampler.config().day(offset);
        let daily = sampler.daily_conversions();
        for _ in 0..daily {
            let conversion = sampler.conversion(date);
            wtr.serialize(&conversion)?;
        }
    }
    wtr.flush()?;
    Ok(sampler.conversions() - start)
}

/// Generates all three seed files under `config.output_dir`.
///
/// Files are written in catalog, events, conversions order from a single
/// sampler, so the output is byte-identical for identical configs.
pub fn generate_seeds(config: &GeneratorConfig) -> Result<GenerationSummary> {
    config.check()?;
    fs::create_dir_all(&config.output_dir)?;

    let mut sampler = Sampler::new(config);
    let mut summary = GenerationSummary::new(config);

    for seed in SeedFile::ALL {
        let path = seed.path_in(&config.output_dir);
        info!(file = %path.display(), "Generating {}", seed.file_name());

        let out = BufWriter::new(File::create(&path)?);
        let rows = match seed {
            SeedFile::ContentCatalog => write_content_catalog(&mut sampler, out)?,
            SeedFile::AdEvents => write_ad_events(&mut sampler, out)?,
            SeedFile::Conversions => write_conversions(&mut sampler, out)?,
        };
        summary.record(seed, rows);

        info!(file = %path.display(), rows, "Created {}", seed.file_name());
    }

    Ok(summary)
}
