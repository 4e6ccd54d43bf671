//! Result tables.
//!
//! All writers take any `std::io::Write`; [`write_outputs`] creates the usual set
//! of files next to a path prefix.

use std::fmt::Display;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use super::signature::write_signatures;
use crate::cluster::{Item, RarefactionRecord, Sketch, UniqifyFit};
use crate::error::{Error, Result};
use crate::sketch::MinHashSketch;

#[derive(Serialize)]
struct IdentifierRow<'a> {
    identifier: String,
    origin: &'a str,
}

#[derive(Serialize)]
struct ClusterRow<'a> {
    cluster: usize,
    cluster_anchor: &'a str,
    cluster_members: String,
}

#[derive(Serialize)]
struct SummaryRow<'a> {
    origin_path: &'a str,
    name: String,
    filename: &'a str,
    md5sum: String,
    cluster: usize,
    member_type: &'static str,
}

impl<'a> SummaryRow<'a> {
    fn new<S: Sketch + Display>(
        item: &'a Item<S>,
        cluster: usize,
        member_type: &'static str,
    ) -> Self {
        Self {
            origin_path: &item.origin,
            name: item.sketch.to_string(),
            filename: &item.origin,
            md5sum: item.sketch.identifier(),
            cluster,
            member_type,
        }
    }
}

/// One origin per line, no header.
pub fn write_origins<W: Write, S>(out: W, items: &[Item<S>]) -> Result<()> {
    let mut w = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(out);
    for item in items {
        w.write_record([item.origin.as_str()])?;
    }
    w.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// `identifier,origin` CSV.
pub fn write_identifiers<W: Write, S: Sketch>(out: W, items: &[Item<S>]) -> Result<()> {
    let mut w = csv::Writer::from_writer(out);
    for item in items {
        w.serialize(IdentifierRow {
            identifier: item.sketch.identifier(),
            origin: &item.origin,
        })?;
    }
    w.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// `batch,founders,members` CSV.
pub fn write_rarefaction<W: Write>(out: W, records: &[RarefactionRecord]) -> Result<()> {
    let mut w = csv::Writer::from_writer(out);
    for record in records {
        w.serialize(record)?;
    }
    w.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// `cluster,cluster_anchor,cluster_members` CSV, one row per founder.
///
/// `cluster_members` is `;`-joined and starts with the anchor itself.
pub fn write_cluster_table<W: Write, S>(out: W, fit: &UniqifyFit<S>) -> Result<()> {
    let mut w = csv::Writer::from_writer(out);
    for (cluster, (founder, members)) in fit.founders.iter().zip(fit.cluster_members()).enumerate()
    {
        let mut names = Vec::with_capacity(members.len() + 1);
        names.push(founder.origin.as_str());
        names.extend(members.iter().map(|&m| fit.members[m].origin.as_str()));
        w.serialize(ClusterRow {
            cluster,
            cluster_anchor: &founder.origin,
            cluster_members: names.join(";"),
        })?;
    }
    w.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// `origin_path,name,filename,md5sum,cluster,member_type` CSV covering founders
/// then members.
///
/// `filename` is the path the signature was loaded from, so the file can be fed
/// back as a seed cluster CSV (see [`crate::io::read_seed_founders`]).
pub fn write_summary<W: Write, S: Sketch + Display>(out: W, fit: &UniqifyFit<S>) -> Result<()> {
    let mut w = csv::Writer::from_writer(out);
    for (cluster, founder) in fit.founders.iter().enumerate() {
        w.serialize(SummaryRow::new(founder, cluster, "founder"))?;
    }
    for (member, &cluster) in fit.members.iter().zip(&fit.assignments) {
        w.serialize(SummaryRow::new(member, cluster, "member"))?;
    }
    w.flush().map_err(csv::Error::from)?;
    Ok(())
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| Error::io(path, e))
}

/// Write every table for `fit` as `{prefix}.<table>` files. Returns the paths written.
pub fn write_outputs<S: Sketch + Display>(prefix: &str, fit: &UniqifyFit<S>) -> Result<Vec<PathBuf>> {
    let path = |suffix: &str| PathBuf::from(format!("{prefix}.{suffix}"));
    let mut written = Vec::new();

    let p = path("founders.siglist");
    write_origins(create(&p)?, &fit.founders)?;
    written.push(p);

    let p = path("members.siglist");
    write_origins(create(&p)?, &fit.members)?;
    written.push(p);

    let p = path("founders.csv");
    write_identifiers(create(&p)?, &fit.founders)?;
    written.push(p);

    let p = path("members.csv");
    write_identifiers(create(&p)?, &fit.members)?;
    written.push(p);

    let p = path("rarefaction.csv");
    write_rarefaction(create(&p)?, &fit.rarefaction)?;
    written.push(p);

    let p = path("clusters.csv");
    write_cluster_table(create(&p)?, fit)?;
    written.push(p);

    let p = path("summary.csv");
    write_summary(create(&p)?, fit)?;
    written.push(p);

    info!(
        prefix,
        founders = fit.founders.len(),
        members = fit.members.len(),
        "wrote results"
    );
    Ok(written)
}

/// Write `{prefix}.cluster.{n}.founder.sig` for every founder, plus
/// `{prefix}.cluster.{n}.cluster.sig` holding the members of each non-singleton
/// cluster. Returns the paths written.
pub fn write_cluster_signatures(
    prefix: &str,
    fit: &UniqifyFit<MinHashSketch>,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for (cluster, (founder, members)) in fit.founders.iter().zip(fit.cluster_members()).enumerate()
    {
        let p = PathBuf::from(format!("{prefix}.cluster.{cluster}.founder.sig"));
        write_signatures(create(&p)?, &p.display().to_string(), [&founder.sketch])?;
        written.push(p);

        if members.is_empty() {
            continue;
        }
        let p = PathBuf::from(format!("{prefix}.cluster.{cluster}.cluster.sig"));
        let sketches = members.iter().map(|&m| &fit.members[m].sketch);
        write_signatures(create(&p)?, &p.display().to_string(), sketches)?;
        written.push(p);
    }
    info!(prefix, clusters = fit.founders.len(), files = written.len(), "wrote cluster signatures");
    Ok(written)
}
