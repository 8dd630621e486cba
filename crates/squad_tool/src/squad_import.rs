//! Squad import - exported squad views → `PlayerSnapshot`s
//!
//! Two inputs are accepted:
//! - CSV with a header row. Identity columns (`Id`/`UID`, `Name`, `Age`,
//!   `CA`, `PA`) are recognised case-insensitively, a handful of descriptive
//!   columns (club, position, wage...) are skipped, and every other column is
//!   read as an attribute named exactly as its header.
//! - JSON array of snapshots in the `squad_core` serde layout.
//!
//! Attribute cells may be blank or `-` (unscouted, left out of the snapshot)
//! or a scouting range such as `12-15` (imported as the floored midpoint).
//! Rows that fail to parse or validate are counted and skipped.

use anyhow::{bail, Context, Result};
use squad_core::{PlayerAttributes, PlayerSnapshot, PlayerValidator};
use std::collections::HashSet;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Descriptive columns that are neither identity nor attributes.
const IGNORED_COLUMNS: &[&str] = &[
    "position",
    "club",
    "nationality",
    "nat",
    "personality",
    "inf",
    "rec",
    "value",
    "wage",
    "height",
    "weight",
    "preferred foot",
    "left foot",
    "right foot",
];

/// CSV parsing statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub total_rows: u32,
    pub parsed: u32,
    pub failed: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Id,
    Name,
    Age,
    CurrentAbility,
    PotentialAbility,
    Attribute,
    Ignored,
}

fn classify_header(header: &str) -> Column {
    match header.trim().to_ascii_lowercase().as_str() {
        "id" | "uid" => Column::Id,
        "name" => Column::Name,
        "age" => Column::Age,
        "ca" | "current ability" => Column::CurrentAbility,
        "pa" | "potential ability" => Column::PotentialAbility,
        other if IGNORED_COLUMNS.contains(&other) => Column::Ignored,
        _ => Column::Attribute,
    }
}

/// Parse one attribute cell.
///
/// - blank / `-` → `None`
/// - `n` → `Some(n)`
/// - `a-b` → `Some((a + b) / 2)`
pub fn parse_attribute_cell(raw: &str) -> Result<Option<u8>> {
    let s = raw.trim();
    if s.is_empty() || s == "-" {
        return Ok(None);
    }
    if let Some((lo, hi)) = s.split_once('-') {
        let lo: u32 = lo.trim().parse().with_context(|| format!("Invalid range start: '{}'", s))?;
        let hi: u32 = hi.trim().parse().with_context(|| format!("Invalid range end: '{}'", s))?;
        if lo > hi {
            bail!("Inverted range: '{}'", s);
        }
        // both halves fit in u32, so the sum fits in u64
        let mid = (u64::from(lo) + u64::from(hi)) / 2;
        let mid = u8::try_from(mid).with_context(|| format!("Range out of scale: '{}'", s))?;
        return Ok(Some(mid));
    }
    let value: u8 = s.parse().with_context(|| format!("Invalid attribute value: '{}'", s))?;
    Ok(Some(value))
}

fn parse_optional_u8(raw: &str, what: &str) -> Result<Option<u8>> {
    let s = raw.trim();
    if s.is_empty() || s == "-" {
        return Ok(None);
    }
    s.parse::<u8>()
        .map(Some)
        .with_context(|| format!("Invalid {} value: '{}'", what, s))
}

fn parse_row(columns: &[(Column, String)], record: &csv::StringRecord, row_id: u32) -> Result<PlayerSnapshot> {
    let mut id = row_id;
    let mut name = None;
    let mut age = None;
    let mut ca = None;
    let mut pa = None;
    let mut attributes = PlayerAttributes::new();

    for ((column, header), cell) in columns.iter().zip(record.iter()) {
        match column {
            Column::Id => {
                id = cell
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid id value: '{}'", cell.trim()))?
            }
            Column::Name => name = Some(cell.trim().to_string()),
            Column::Age => age = parse_optional_u8(cell, "age")?,
            Column::CurrentAbility => ca = parse_optional_u8(cell, "CA")?,
            Column::PotentialAbility => pa = parse_optional_u8(cell, "PA")?,
            Column::Attribute => {
                if let Some(value) =
                    parse_attribute_cell(cell).with_context(|| format!("Column '{}'", header))?
                {
                    attributes.insert(header.clone(), value);
                }
            }
            Column::Ignored => {}
        }
    }

    let mut player = PlayerSnapshot::new(id, name.unwrap_or_default(), attributes);
    player.age = age;
    player.current_ability = ca;
    player.potential_ability = pa;
    PlayerValidator::validate_snapshot(&player)?;
    Ok(player)
}

/// Parse a squad CSV from any reader.
pub fn parse_squad_csv_reader<R: Read>(reader: R) -> Result<(Vec<PlayerSnapshot>, ParseStats)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = reader.headers().context("Failed to read CSV header")?.clone();
    let columns: Vec<(Column, String)> = headers
        .iter()
        .map(|h| (classify_header(h), h.trim().to_string()))
        .collect();
    if !columns.iter().any(|(c, _)| *c == Column::Name) {
        bail!("CSV header has no Name column");
    }

    let mut players = Vec::new();
    let mut stats = ParseStats::default();
    let mut seen_ids = HashSet::new();

    for (idx, record) in reader.records().enumerate() {
        stats.total_rows += 1;
        // header is line 1
        let line = idx + 2;
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                stats.failed += 1;
                tracing::warn!(line, error = %e, "unreadable CSV row");
                continue;
            }
        };

        match parse_row(&columns, &record, idx as u32 + 1) {
            Ok(player) => {
                if !seen_ids.insert(player.id) {
                    stats.failed += 1;
                    tracing::warn!(line, id = player.id, "duplicate player id, row skipped");
                    continue;
                }
                stats.parsed += 1;
                players.push(player);
            }
            Err(e) => {
                stats.failed += 1;
                tracing::warn!(line, error = %format!("{:#}", e), "skipping squad row");
            }
        }
    }

    tracing::info!(
        rows = stats.total_rows,
        parsed = stats.parsed,
        failed = stats.failed,
        "squad CSV parsed"
    );
    Ok((players, stats))
}

pub fn parse_squad_csv(path: &Path) -> Result<(Vec<PlayerSnapshot>, ParseStats)> {
    let file = fs::File::open(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;
    parse_squad_csv_reader(file)
}

/// Parse a JSON array of snapshots.
///
/// Only the outer array has to be well formed. Entries that do not decode
/// (wrong types, values past `u8`) or fail validation are skipped like CSV rows.
pub fn parse_squad_json(text: &str) -> Result<(Vec<PlayerSnapshot>, ParseStats)> {
    let raw: Vec<serde_json::Value> =
        serde_json::from_str(text).context("Failed to parse squad JSON")?;

    let mut stats = ParseStats::default();
    let mut players = Vec::with_capacity(raw.len());
    for (index, entry) in raw.into_iter().enumerate() {
        stats.total_rows += 1;
        let player: PlayerSnapshot = match serde_json::from_value(entry) {
            Ok(p) => p,
            Err(e) => {
                stats.failed += 1;
                tracing::warn!(index, error = %e, "undecodable squad entry");
                continue;
            }
        };
        match PlayerValidator::validate_snapshot(&player) {
            Ok(()) => {
                stats.parsed += 1;
                players.push(player);
            }
            Err(e) => {
                stats.failed += 1;
                tracing::warn!(index, id = player.id, error = %e, "skipping squad entry");
            }
        }
    }
    Ok((players, stats))
}

/// Load a JSON squad file. See [`parse_squad_json`].
pub fn load_squad_json(path: &Path) -> Result<(Vec<PlayerSnapshot>, ParseStats)> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read squad file: {}", path.display()))?;
    parse_squad_json(&text)
}

/// Load a squad file, choosing the parser from the extension.
pub fn load_squad(path: &Path) -> Result<(Vec<PlayerSnapshot>, ParseStats)> {
    match path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase()).as_deref() {
        Some("csv") => parse_squad_csv(path),
        Some("json") => load_squad_json(path),
        _ => bail!("Unsupported squad file (expected .csv or .json): {}", path.display()),
    }
}
