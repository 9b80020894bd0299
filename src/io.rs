use crate::model::{Day, RosterResult};
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Personne importée avec ses jours d'absence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffRecord {
    pub name: String,
    pub oof_days: BTreeSet<Day>,
}

/// Import du personnel depuis CSV: header `name[,oof_days]`, jours séparés par `;`
pub fn import_staff_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<StaffRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let mut out: Vec<StaffRecord> = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?.trim();
        if name.is_empty() {
            bail!("invalid staff row (empty name)");
        }
        if out.iter().any(|r| r.name == name) {
            bail!("duplicate staff name: {name}");
        }
        let oof_days = match rec.get(1).map(str::trim) {
            Some(raw) if !raw.is_empty() => {
                parse_days(raw).with_context(|| format!("invalid oof_days for {name}"))?
            }
            _ => BTreeSet::new(),
        };
        out.push(StaffRecord {
            name: name.to_string(),
            oof_days,
        });
    }
    Ok(out)
}

fn parse_days(raw: &str) -> anyhow::Result<BTreeSet<Day>> {
    raw.split(';')
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| chunk.parse::<Day>().map_err(anyhow::Error::from))
        .collect()
}

/// Export JSON du résultat (jolie mise en forme)
pub fn export_roster_json<P: AsRef<Path>>(path: P, result: &RosterResult) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(result)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV de la grille: header `staff,<jour>...`
pub fn export_roster_csv<P: AsRef<Path>>(path: P, result: &RosterResult) -> anyhow::Result<()> {
    let file = fs::File::create(path.as_ref())
        .with_context(|| format!("creating {}", path.as_ref().display()))?;
    write_roster_csv(file, result)
}

pub fn write_roster_csv<W: Write>(writer: W, result: &RosterResult) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_writer(writer);
    let mut header = vec!["staff"];
    header.extend(result.days.iter().map(|d| d.as_str()));
    w.write_record(&header)?;
    for row in &result.roster {
        let mut record = vec![row.staff.as_str()];
        record.extend(row.assignment.iter().map(|slot| slot.as_str()));
        w.write_record(&record)?;
    }
    w.flush()?;
    Ok(())
}
