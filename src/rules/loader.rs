//! Load override rules from RUL2 text files
//!
//! One rule per line:
//!
//! ```text
//! ; comment
//! 0x5D540000,1,0,0x5D540000,3,0=0x5D540100,1,0,0x5D540100,3,0
//! ```
//!
//! Ids are hexadecimal (`0x` prefix) or decimal, rotations 0-3, flips 0 or 1.
//! Section headers in square brackets are skipped. A malformed line is
//! reported and skipped; the rest of the file is still loaded.

use nom::branch::alt;
use nom::bytes::complete::tag_no_case;
use nom::character::complete::{char, digit1, hex_digit1, space0};
use nom::combinator::{all_consuming, map_res};
use nom::sequence::{delimited, preceded, separated_pair};
use nom::{IResult, Parser};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::core::error::{EngineError, Result};
use crate::network::rotflip::RotFlip;
use crate::network::tile::Tile;
use crate::rules::rule::OverrideRule;
use crate::rules::store::RuleStore;

/// A rule line that could not be ingested
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {reason}")]
pub struct RuleLoadError {
    pub line: usize,
    pub reason: String,
}

impl From<RuleLoadError> for EngineError {
    fn from(err: RuleLoadError) -> Self {
        EngineError::MalformedRule {
            line: err.line,
            reason: err.reason,
        }
    }
}

/// Outcome of ingesting one or more rule files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Rule lines accepted (before symmetry deduplication)
    pub inserted: usize,
    pub skipped: Vec<RuleLoadError>,
}

impl LoadReport {
    pub fn merge(&mut self, other: LoadReport) {
        self.inserted += other.inserted;
        self.skipped.extend(other.skipped);
    }

    /// Fail on the first skipped line, for callers that want an all-or-nothing feed
    pub fn ensure_clean(&self) -> Result<()> {
        match self.skipped.first() {
            Some(err) => Err(err.clone().into()),
            None => Ok(()),
        }
    }
}

type RawTile = (u32, u8, u8);

fn separator(input: &str) -> IResult<&str, char> {
    delimited(space0, char(','), space0).parse(input)
}

fn tile_id(input: &str) -> IResult<&str, u32> {
    alt((
        map_res(preceded(tag_no_case("0x"), hex_digit1), |hex: &str| {
            u32::from_str_radix(hex, 16)
        }),
        map_res(digit1, |dec: &str| dec.parse::<u32>()),
    ))
    .parse(input)
}

fn small_number(input: &str) -> IResult<&str, u8> {
    map_res(digit1, |dec: &str| dec.parse::<u8>()).parse(input)
}

fn raw_tile(input: &str) -> IResult<&str, RawTile> {
    (
        tile_id,
        preceded(separator, small_number),
        preceded(separator, small_number),
    )
        .parse(input)
}

fn raw_pair(input: &str) -> IResult<&str, (RawTile, RawTile)> {
    separated_pair(raw_tile, separator, raw_tile).parse(input)
}

fn raw_rule(input: &str) -> IResult<&str, ((RawTile, RawTile), (RawTile, RawTile))> {
    all_consuming(delimited(
        space0,
        separated_pair(raw_pair, delimited(space0, char('='), space0), raw_pair),
        space0,
    ))
    .parse(input)
}

fn to_tile((id, rotation, flip): RawTile) -> std::result::Result<Tile, String> {
    if rotation > 3 {
        return Err(format!("rotation {} out of range 0..=3 for 0x{:08X}", rotation, id));
    }
    let flipped = match flip {
        0 => false,
        1 => true,
        other => return Err(format!("flip {} must be 0 or 1 for 0x{:08X}", other, id)),
    };
    Ok(Tile::new(id, RotFlip::new(rotation, flipped)))
}

/// Parse a single rule line (comments already stripped)
pub fn parse_rule_line(line: &str) -> std::result::Result<OverrideRule, String> {
    let (_, ((l1, l2), (r1, r2))) = raw_rule(line).map_err(|err| match err {
        nom::Err::Error(e) | nom::Err::Failure(e) => {
            format!("expected id,rot,flip,id,rot,flip=id,rot,flip,id,rot,flip near `{}`", e.input.trim())
        }
        nom::Err::Incomplete(_) => "incomplete override rule".to_string(),
    })?;
    Ok(OverrideRule::new(
        to_tile(l1)?,
        to_tile(l2)?,
        to_tile(r1)?,
        to_tile(r2)?,
    ))
}

/// Parse a whole RUL2 text, collecting per-line errors instead of stopping
pub fn parse_rul2(text: &str) -> (Vec<OverrideRule>, Vec<RuleLoadError>) {
    let mut rules = Vec::new();
    let mut errors = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let content = raw.split(';').next().unwrap_or("").trim();
        if content.is_empty() || (content.starts_with('[') && content.ends_with(']')) {
            continue;
        }
        match parse_rule_line(content) {
            Ok(rule) => rules.push(rule),
            Err(reason) => errors.push(RuleLoadError {
                line: index + 1,
                reason,
            }),
        }
    }

    (rules, errors)
}

impl RuleStore {
    /// Ingest RUL2 text into the store, skipping malformed lines
    pub fn ingest(&mut self, text: &str) -> LoadReport {
        let (rules, skipped) = parse_rul2(text);
        for err in &skipped {
            tracing::warn!("Skipping malformed override rule at {}", err);
        }
        let inserted = rules.len();
        self.extend(rules);
        LoadReport { inserted, skipped }
    }
}

/// Load one RUL2 file into an existing store
pub fn load_rule_file(store: &mut RuleStore, path: &Path) -> Result<LoadReport> {
    let content = fs::read_to_string(path)?;
    let report = store.ingest(&content);
    tracing::info!(
        "Loaded {} override rules from {} ({} skipped)",
        report.inserted,
        path.display(),
        report.skipped.len()
    );
    Ok(report)
}

/// Load several RUL2 files in order; later files override equivalent earlier rules
pub fn load_rule_files<P: AsRef<Path>>(paths: &[P]) -> Result<(RuleStore, LoadReport)> {
    let mut store = RuleStore::new();
    let mut report = LoadReport::default();
    for path in paths {
        report.merge(load_rule_file(&mut store, path.as_ref())?);
    }
    tracing::info!("Rule store holds {} entries", store.len());
    Ok((store, report))
}
