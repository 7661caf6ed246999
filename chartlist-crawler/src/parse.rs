//! Chart page parsing
//!
//! Each `tbody tr` is one chart row. Rows are parsed independently: a row
//! that cannot be read is logged and skipped without affecting the others.

use crate::error::{Error, Result};
use chartlist_common::ChartEntry;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Placeholder for a title, artist or album the row does not carry
pub const UNKNOWN_FIELD: &str = "Unknown";

/// Separator between multiple artists credited on one row
pub const ARTIST_SEPARATOR: &str = ", ";

/// Row attribute carrying the site's own song number
const SONG_NO_ATTR: &str = "data-song-no";

struct RowSelectors {
    row: Selector,
    rank: Selector,
    title: Selector,
    artists: Selector,
    album: Selector,
}

impl RowSelectors {
    fn new() -> Result<Self> {
        Ok(Self {
            row: compile("tbody tr")?,
            rank: compile(".rank")?,
            title: compile(".ellipsis.rank01 a")?,
            artists: compile(".ellipsis.rank02 > a")?,
            album: compile(".ellipsis.rank03 a")?,
        })
    }
}

fn compile(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::Selector(format!("{}: {}", css, e)))
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Fields read from one row, before an id is assigned
#[derive(Debug)]
struct ParsedRow {
    song_no: Option<i64>,
    rank: i64,
    title: String,
    artist: String,
    album: String,
}

fn parse_row(row: ElementRef<'_>, selectors: &RowSelectors) -> Result<ParsedRow> {
    let rank_text = row
        .select(&selectors.rank)
        .next()
        .map(text_of)
        .ok_or_else(|| Error::Row("missing rank".to_string()))?;
    let rank = rank_text
        .parse::<i64>()
        .map_err(|_| Error::Row(format!("non-numeric rank '{}'", rank_text)))?;

    let title = row
        .select(&selectors.title)
        .next()
        .map(text_of)
        .unwrap_or_else(|| UNKNOWN_FIELD.to_string());

    let artists: Vec<String> = row.select(&selectors.artists).map(text_of).collect();
    let artist = if artists.is_empty() {
        UNKNOWN_FIELD.to_string()
    } else {
        artists.join(ARTIST_SEPARATOR)
    };

    let album = row
        .select(&selectors.album)
        .next()
        .map(text_of)
        .unwrap_or_else(|| UNKNOWN_FIELD.to_string());

    let song_no = row
        .value()
        .attr(SONG_NO_ATTR)
        .and_then(|value| value.trim().parse::<i64>().ok());

    Ok(ParsedRow {
        song_no,
        rank,
        title,
        artist,
        album,
    })
}

/// Extract chart entries from the chart page HTML, in page order
///
/// Each entry's id is the row's song number when present. Rows without one
/// get their 1-based position among accepted rows, bumped past any id already
/// taken or carried by another row. Rows whose song number repeats an earlier
/// row's are skipped.
pub fn parse_chart(html: &str) -> Result<Vec<ChartEntry>> {
    let selectors = RowSelectors::new()?;
    let document = Html::parse_document(html);

    let mut rows = Vec::new();
    for (index, row) in document.select(&selectors.row).enumerate() {
        match parse_row(row, &selectors) {
            Ok(parsed) => rows.push((index + 1, parsed)),
            Err(e) => warn!("Skipping chart row {}: {}", index + 1, e),
        }
    }

    // Fallback ids must not shadow a song number appearing further down
    let song_numbers: HashSet<i64> = rows.iter().filter_map(|(_, row)| row.song_no).collect();

    let mut entries: Vec<ChartEntry> = Vec::with_capacity(rows.len());
    let mut seen_ids = HashSet::new();

    for (row_no, parsed) in rows {
        let id = match parsed.song_no {
            Some(song_no) => song_no,
            None => {
                let mut candidate = entries.len() as i64 + 1;
                while song_numbers.contains(&candidate) || seen_ids.contains(&candidate) {
                    candidate += 1;
                }
                candidate
            }
        };
        if !seen_ids.insert(id) {
            warn!("Skipping chart row {}: duplicate id {}", row_no, id);
            continue;
        }

        debug!("{}: {} - {} ({})", parsed.rank, parsed.title, parsed.artist, parsed.album);
        entries.push(ChartEntry {
            id,
            rank: parsed.rank,
            title: parsed.title,
            artist: parsed.artist,
            album: parsed.album,
        });
    }

    Ok(entries)
}
