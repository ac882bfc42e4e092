//! Subcommand implementations
//!
//! Each command writes to the given output so it can be exercised without a
//! process boundary.

use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use dualsub_core::{
    catalog::SubtitleSource,
    cue::format_timestamp,
    engine::millis_from_seconds,
    loader::LoadOutcome,
    parser::{ParsedCues, ParserConfig},
    render::{OverlayModel, TransitionSink},
    CueParser, SubtitleCatalog, SubtitleConfig, SubtitleSession, TrackSlot,
};

use crate::fetcher::FileFetcher;

/// Settings for `replay`
#[derive(Debug, Clone)]
pub struct ReplayOptions {
    pub primary_lang: String,
    pub secondary_lang: String,
    pub step: u64,
    pub from: f64,
    pub until: Option<u64>,
    pub hide_secondary: bool,
}

fn read_document(path: &Path, config: ParserConfig) -> Result<ParsedCues> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(CueParser::with_config(config).parse_document(&raw))
}

/// Print the cues of a file, one per line or as a JSON array
pub fn parse(path: &Path, json: bool, reject_inverted: bool, out: &mut impl Write) -> Result<()> {
    let config = ParserConfig {
        reject_inverted_intervals: reject_inverted,
    };
    let doc = read_document(path, config)?;

    if json {
        serde_json::to_writer_pretty(&mut *out, &doc.cues)?;
        writeln!(out)?;
    } else {
        for cue in &doc.cues {
            writeln!(out, "{cue}")?;
        }
    }
    Ok(())
}

/// Print parse diagnostics and a one-line summary
pub fn issues(path: &Path, deny_warnings: bool, out: &mut impl Write) -> Result<()> {
    let doc = read_document(path, ParserConfig::default())?;

    for issue in &doc.issues {
        writeln!(out, "{issue}")?;
    }
    writeln!(out, "{} cues, {} issues", doc.cues.len(), doc.issues.len())?;

    if deny_warnings && doc.has_warnings() {
        bail!("{} has parse warnings", path.display());
    }
    Ok(())
}

/// Prints transitions as they are applied to the overlay
struct TranscriptSink<'w, W: Write> {
    out: &'w mut W,
    overlay: OverlayModel,
    position: u64,
    error: Option<std::io::Error>,
}

impl<W: Write> TransitionSink for TranscriptSink<'_, W> {
    fn apply(&mut self, transition: &dualsub_core::Transition) {
        self.overlay.apply(transition);
        if transition.slot == TrackSlot::Secondary && !self.overlay.show_secondary() {
            return;
        }
        if self.error.is_none() {
            let stamp = format_timestamp(self.position);
            if let Err(error) = writeln!(self.out, "[{stamp}] {transition}") {
                self.error = Some(error);
            }
        }
    }
}

/// Load two files through a session and tick it from `from` to `until`
pub async fn replay(
    primary: &Path,
    secondary: &Path,
    options: &ReplayOptions,
    out: &mut impl Write,
) -> Result<()> {
    if options.step == 0 {
        bail!("--step must be greater than zero");
    }

    let catalog = SubtitleCatalog::from_sources([
        SubtitleSource::new(&options.primary_lang, primary.to_string_lossy()),
        SubtitleSource::new(&options.secondary_lang, secondary.to_string_lossy()),
    ]);
    let config = SubtitleConfig::new(&options.primary_lang, &options.secondary_lang)?
        .with_show_secondary(!options.hide_secondary);

    let session = SubtitleSession::new(catalog, SubtitleConfig::default());
    let ticket = session.select(config.clone());
    match session.load(&ticket, &FileFetcher).await? {
        LoadOutcome::Applied { .. } | LoadOutcome::AlreadyApplied { .. } => {}
        LoadOutcome::Stale { .. } => bail!("selection was superseded while loading"),
    }

    let start = millis_from_seconds(options.from);
    let end = options
        .until
        .or_else(|| session.span().map(|(_, end)| end.saturating_add(options.step)))
        .unwrap_or(start);

    let mut sink = TranscriptSink {
        out,
        overlay: OverlayModel::from_config(&config),
        position: start,
        error: None,
    };
    let mut position = start;
    while position <= end {
        sink.position = position;
        session.on_tick_into(position, &mut sink);
        if let Some(error) = sink.error.take() {
            return Err(error.into());
        }
        position = match position.checked_add(options.step) {
            Some(next) => next,
            None => break,
        };
    }

    tracing::debug!(transitions = sink.overlay.applied(), "replay finished");
    Ok(())
}

/// Print `code<TAB>location<TAB>label` for every language of a player configuration
pub fn catalog(path: &Path, out: &mut impl Write) -> Result<()> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let catalog = SubtitleCatalog::from_player_config(&json)?;

    for source in catalog.sources() {
        writeln!(
            out,
            "{}\t{}\t{}",
            source.code,
            source.location,
            source.label.as_deref().unwrap_or("")
        )?;
    }
    Ok(())
}
