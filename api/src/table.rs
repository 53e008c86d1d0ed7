//! Rectangular table model shared by every tab parser.
//!
//! The gviz boundary resolves every cell into a single tagged value
//! (`Number | Text | Empty`) so downstream code never re-derives
//! "is this a number" logic, and header resolution happens in one place
//! instead of being scattered through the entity parsers.

use std::fmt;

/// One spreadsheet cell, already coerced at the wire boundary.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
    #[default]
    Empty,
}

impl Cell {
    /// Numeric view. Text cells are re-parsed accepting a decimal comma
    /// ("12,5") as well as a decimal point; anything unparsable is None.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) if n.is_finite() => Some(*n),
            Cell::Number(_) | Cell::Empty => None,
            Cell::Text(s) => parse_number(s),
        }
    }

    /// Trimmed text view. Numbers render without a trailing ".0" so a
    /// header cell holding 1.0 reads back as "1".
    pub fn as_text(&self) -> String {
        match self {
            Cell::Number(n) => format_number(*n),
            Cell::Text(s) => s.trim().to_string(),
            Cell::Empty => String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

/// Parse a score-like string, accepting "12.5" and "12,5".
pub fn parse_number(s: &str) -> Option<f64> {
    let t = s.trim();
    if t.is_empty() {
        return None;
    }
    t.replace(',', ".").parse::<f64>().ok().filter(|n| n.is_finite())
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

// ---------------------------------------------------------------------------
// RawTable — as fetched, header not yet trusted
// ---------------------------------------------------------------------------

/// One tab as returned by the fetcher: candidate header labels plus data
/// rows, every row padded to the header width.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    /// Determine the true header row.
    ///
    /// The sheet's declared column labels are used when at least one of
    /// them is meaningful. When the sheet has no frozen header row the
    /// gviz endpoint reports blank or placeholder labels ("A", "B", ...)
    /// and the human-readable header sits in row 0 of the data — in that
    /// case row 0 becomes the header and the remaining rows shift up.
    pub fn resolve(self) -> SheetTable {
        let declared_meaningful = self.header.iter().any(|l| !is_placeholder_label(l));
        if declared_meaningful {
            return SheetTable {
                header: self.header.iter().map(|l| l.trim().to_string()).collect(),
                rows: self.rows,
            };
        }

        let mut rows = self.rows;
        if rows.is_empty() {
            return SheetTable { header: self.header, rows };
        }
        let header: Vec<String> = rows.remove(0).iter().map(Cell::as_text).collect();
        SheetTable { header, rows }
    }
}

/// Blank labels and spreadsheet column ids ("A".."ZZ") are what the
/// endpoint emits when the sheet declares no header row.
fn is_placeholder_label(label: &str) -> bool {
    let t = label.trim();
    if t.is_empty() {
        return true;
    }
    t.len() <= 2 && t.chars().all(|c| c.is_ascii_uppercase())
}

// ---------------------------------------------------------------------------
// SheetTable — header resolved, ready for entity parsing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct SheetTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl SheetTable {
    /// Index of the first header matching any of the given aliases.
    /// Comparison is case-, accent- and surrounding-whitespace-insensitive
    /// on both sides.
    pub fn column(&self, aliases: &[&str]) -> Option<usize> {
        self.header.iter().position(|label| {
            let folded = fold(label);
            aliases.iter().any(|a| fold(a) == folded)
        })
    }

    /// Cell at (row, col); Empty when the column index is absent.
    pub fn cell<'a>(&self, row: &'a [Cell], col: Option<usize>) -> &'a Cell {
        static EMPTY: Cell = Cell::Empty;
        col.and_then(|i| row.get(i)).unwrap_or(&EMPTY)
    }
}

/// Canonical column aliases for the player-name column, shared by the
/// Rodadas parser and the ranking join.
pub const PLAYER_ALIASES: &[&str] = &["Jogador", "Jogadores", "Nome", "Player", "Participante"];

/// Lowercase, strip diacritics, trim. The league sheets are pt-BR, so
/// the fold table covers the Latin accents that actually occur
/// ("Função", "Posição", "Competição", "Não", ...).
pub fn fold(s: &str) -> String {
    s.trim()
        .chars()
        .flat_map(|c| c.to_lowercase())
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Round labels
// ---------------------------------------------------------------------------

/// Canonicalize a round column header to "R<n>".
///
/// Accepted spellings: "R1", "r 1", "Rodada 1", and a bare integer
/// 1–99 (a numeric header cell shows up as "1" after first-row header
/// promotion). Leading zeros are dropped by the integer reparse.
pub fn canonical_round(label: &str) -> Option<String> {
    let folded = fold(label);
    let digits = if let Some(rest) = folded.strip_prefix("rodada") {
        rest.trim_start()
    } else if let Some(rest) = folded.strip_prefix('r') {
        rest.trim_start()
    } else {
        folded.as_str()
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let n: u32 = digits.parse().ok()?;
    if n == 0 {
        return None;
    }
    // Bare integers only count as round columns in a sane range; an
    // explicit R/Rodada prefix is trusted as-is.
    let bare = digits.len() == folded.len();
    if bare && n > 99 {
        return None;
    }
    Some(format!("R{n}"))
}

/// Numeric portion of a round label ("R12" → 12, "Rodada 3" → 3).
/// Used for ordering; labels with no digits sort first as 0.
pub fn round_number(label: &str) -> u32 {
    let digits: String = label.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}
