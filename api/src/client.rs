use crate::gviz::{self, GvizResponse};
use crate::table::{self, RawTable, SheetTable, PLAYER_ALIASES};
use crate::{
    ChampionEntry, ChampionsHistory, HighlightItem, Highlights, Player, RoundRecord, TabData,
};
use reqwest::{Client, StatusCode};
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

const DOCS_BASE_URL: &str = "https://docs.google.com";

/// League sheet used when no id is supplied via env/config.
pub const FALLBACK_SHEET_ID: &str = "1LmQLHOR0DlcT_DwuwGm-4fWZ9ZkB4he6G0FO0X2nnBI";

/// Tab names as they exist in the league spreadsheet.
pub const TAB_PLAYERS: &str = "Jogadores";
pub const TAB_ROUNDS: &str = "Rodadas";
pub const TAB_HIGHLIGHTS: &str = "Zoeira";
pub const TAB_CHAMPIONS: &str = "CampeoesData";

/// Google Sheets client backed by the public gviz query endpoint.
/// One GET per tab fetch; no caching, no retry — callers re-issue on
/// manual refresh.
#[derive(Debug, Clone)]
pub struct SheetsClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl Default for SheetsClient {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("ligatui/0.1 (fantasy league dashboard)")
                .build()
                .unwrap_or_default(),
            base_url: DOCS_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Status(StatusCode, String),
    /// Response body carries no JSON payload inside the callback envelope.
    Envelope(String),
    Parsing(serde_json::Error, String),
    /// gviz answered with status:"error" (bad tab name, protected sheet...).
    Query { tab: String, detail: String },
    /// Rounds tab present but no round column detected — there is no
    /// sensible empty state for a ranking without round data.
    NoRoundColumns { tab: String },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Status(code, url) => write!(f, "HTTP {code} for {url}"),
            ApiError::Envelope(url) => {
                write!(f, "No JSON payload in gviz response from {url}")
            }
            ApiError::Parsing(e, url) => write!(f, "Invalid gviz JSON from {url}: {e}"),
            ApiError::Query { tab, detail } => {
                write!(f, "Sheet query failed for tab \"{tab}\": {detail}")
            }
            ApiError::NoRoundColumns { tab } => write!(
                f,
                "No round columns (R1, R2, ...) found in tab \"{tab}\" — check the header row"
            ),
        }
    }
}

impl std::error::Error for ApiError {}

impl SheetsClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client at a different host. Test seam for mock servers.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), ..Self::default() }
    }

    /// Fetch one named tab as a raw rectangular table.
    pub async fn fetch_table(&self, sheet_id: &str, tab: &str) -> ApiResult<RawTable> {
        let url = format!("{}/spreadsheets/d/{sheet_id}/gviz/tq", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("tqx", "out:json"), ("sheet", tab)])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.clone()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status, url));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e, url.clone()))?;
        let json = gviz::unwrap_envelope(&body).ok_or_else(|| ApiError::Envelope(url.clone()))?;
        let parsed: GvizResponse =
            serde_json::from_str(json).map_err(|e| ApiError::Parsing(e, url.clone()))?;

        if parsed.status == "error" {
            let detail = parsed
                .errors
                .first()
                .map(|e| {
                    if e.detailed_message.is_empty() {
                        e.message.clone()
                    } else {
                        e.detailed_message.clone()
                    }
                })
                .unwrap_or_else(|| "unknown gviz error".to_string());
            return Err(ApiError::Query { tab: tab.to_string(), detail });
        }

        Ok(parsed.into_raw_table())
    }

    /// Fetch and parse the Jogadores tab, active players only.
    pub async fn fetch_players(&self, sheet_id: &str) -> ApiResult<Vec<Player>> {
        let table = self.fetch_table(sheet_id, TAB_PLAYERS).await?.resolve();
        Ok(parse_players(&table))
    }

    /// Fetch and parse the Rodadas tab. Fails when the tab has zero
    /// round columns.
    pub async fn fetch_rounds(&self, sheet_id: &str) -> ApiResult<Vec<RoundRecord>> {
        let table = self.fetch_table(sheet_id, TAB_ROUNDS).await?.resolve();
        parse_rounds(&table)
    }

    /// Fetch and parse the Zoeira tab. Missing headers are an expected
    /// configuration state, reported as `TabData::NotConfigured`.
    pub async fn fetch_highlights(&self, sheet_id: &str) -> ApiResult<TabData<Highlights>> {
        let table = self.fetch_table(sheet_id, TAB_HIGHLIGHTS).await?.resolve();
        Ok(parse_highlights(&table))
    }

    /// Fetch and parse the CampeoesData tab. Same soft-failure contract
    /// as the highlights tab.
    pub async fn fetch_champions(&self, sheet_id: &str) -> ApiResult<TabData<ChampionsHistory>> {
        let table = self.fetch_table(sheet_id, TAB_CHAMPIONS).await?.resolve();
        Ok(parse_champions(&table))
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Resolve the spreadsheet id from user-supplied input: a bare id passes
/// through, a full URL has the id extracted from its
/// `spreadsheets/d/<id>` segment, and empty input falls back to the
/// league default. Called once at startup; the result is threaded into
/// every fetch.
pub fn resolve_sheet_id(input: Option<&str>) -> String {
    let v = input.unwrap_or("").trim();
    if v.is_empty() {
        return FALLBACK_SHEET_ID.to_string();
    }

    if let Some(idx) = v.find("spreadsheets/d/") {
        let rest = &v[idx + "spreadsheets/d/".len()..];
        let id: String = rest
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
            .collect();
        if !id.is_empty() {
            return id;
        }
        return FALLBACK_SHEET_ID.to_string();
    }

    if v.len() >= 20
        && !v.contains("http")
        && v.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return v.to_string();
    }

    v.to_string()
}

// ---------------------------------------------------------------------------
// Entity parsers — pure functions over a resolved SheetTable
// ---------------------------------------------------------------------------

/// Parse the Jogadores tab. Rows without a name are dropped; rows whose
/// Ativo field is present and not affirmative are filtered out.
pub fn parse_players(table: &SheetTable) -> Vec<Player> {
    let i_name = table.column(&["Nome", "Jogador", "Player"]);
    let i_photo = table.column(&["FotoURL", "Foto", "PhotoURL", "Avatar"]);
    let i_role = table.column(&["Função", "Funcao", "Cargo", "Role", "Posição"]);
    let i_active = table.column(&["Ativo", "Active", "Status"]);

    table
        .rows
        .iter()
        .filter_map(|row| {
            let name = table.cell(row, i_name).as_text();
            if name.is_empty() {
                return None;
            }

            let active_raw = table.cell(row, i_active).as_text();
            if !is_affirmative_or_blank(&active_raw) {
                return None;
            }

            Some(Player {
                name,
                photo_url: normalize_photo_url(&table.cell(row, i_photo).as_text()),
                role: table.cell(row, i_role).as_text(),
                active: true,
            })
        })
        .collect()
}

/// Absent or blank means active; otherwise only the affirmative token
/// keeps the row.
fn is_affirmative_or_blank(value: &str) -> bool {
    let folded = table::fold(value);
    folded.is_empty() || folded == "sim" || folded == "yes"
}

/// Rewrite Google Drive share links to the stable thumbnail form, which
/// reliably serves an image for public files. Everything else (imgur,
/// raw github, ...) passes through untouched.
pub fn normalize_photo_url(url: &str) -> String {
    let raw = url.trim();
    if raw.is_empty() {
        return String::new();
    }
    match extract_drive_id(raw) {
        Some(id) => format!("https://drive.google.com/thumbnail?id={id}&sz=w200"),
        None => raw.to_string(),
    }
}

/// Pull the file id out of the two Drive link shapes:
/// `.../file/d/FILE_ID/view?...` and `.../uc?export=view&id=FILE_ID`.
fn extract_drive_id(url: &str) -> Option<String> {
    let id_chars = |s: &str| -> String {
        s.chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
            .collect()
    };

    if let Some(idx) = url.find("/file/d/") {
        let id = id_chars(&url[idx + "/file/d/".len()..]);
        if !id.is_empty() {
            return Some(id);
        }
    }

    for marker in ["?id=", "&id="] {
        if let Some(idx) = url.find(marker) {
            let id = id_chars(&url[idx + marker.len()..]);
            if !id.is_empty() {
                return Some(id);
            }
        }
    }

    None
}

/// Parse the Rodadas tab into per-player round score maps.
///
/// The player column is resolved via the shared alias list, defaulting
/// to column 0 when nothing matches. Cells that don't coerce to a number
/// are recorded as absent, not zero, so they never count as a played
/// round.
pub fn parse_rounds(table: &SheetTable) -> ApiResult<Vec<RoundRecord>> {
    let i_player = table.column(PLAYER_ALIASES).unwrap_or(0);

    let round_cols: Vec<(usize, String)> = table
        .header
        .iter()
        .enumerate()
        .filter_map(|(i, label)| table::canonical_round(label).map(|r| (i, r)))
        .collect();

    if round_cols.is_empty() {
        return Err(ApiError::NoRoundColumns { tab: TAB_ROUNDS.to_string() });
    }

    let records = table
        .rows
        .iter()
        .filter_map(|row| {
            let player = table.cell(row, Some(i_player)).as_text();
            if player.is_empty() {
                return None;
            }

            let mut scores = HashMap::new();
            for (col, round) in &round_cols {
                if let Some(n) = table.cell(row, Some(*col)).as_number() {
                    scores.insert(round.clone(), n);
                }
            }
            Some(RoundRecord { player, scores })
        })
        .collect();

    Ok(records)
}

/// Parse the Zoeira tab. All five columns must resolve; otherwise the
/// tab counts as not configured and the message names the expected
/// header row. Rows missing any required field are dropped silently.
pub fn parse_highlights(table: &SheetTable) -> TabData<Highlights> {
    let cols = (
        table.column(&["Rodada", "Round"]),
        table.column(&["Tipo", "Kind", "Categoria"]),
        table.column(PLAYER_ALIASES),
        table.column(&["Texto", "Text", "Descrição", "Descricao"]),
        table.column(&["Link", "URL"]),
    );
    let (Some(i_round), Some(i_kind), Some(i_player), Some(i_text), Some(i_link)) = cols else {
        return TabData::NotConfigured {
            message: format!(
                "Não consegui ler a aba {TAB_HIGHLIGHTS}. Cabeçalho esperado (linha 1): \
                 Rodada | Tipo | Jogador | Texto | Link"
            ),
        };
    };

    let items: Vec<HighlightItem> = table
        .rows
        .iter()
        .filter_map(|row| {
            let item = HighlightItem {
                round: table.cell(row, Some(i_round)).as_text(),
                kind: table.cell(row, Some(i_kind)).as_text(),
                player: table.cell(row, Some(i_player)).as_text(),
                text: table.cell(row, Some(i_text)).as_text(),
                link: Some(table.cell(row, Some(i_link)).as_text()).filter(|s| !s.is_empty()),
            };
            if item.round.is_empty()
                || item.kind.is_empty()
                || item.player.is_empty()
                || item.text.is_empty()
            {
                return None;
            }
            Some(item)
        })
        .collect();

    let mut rounds: Vec<String> = {
        let mut seen: Vec<String> = Vec::new();
        for item in &items {
            if !seen.contains(&item.round) {
                seen.push(item.round.clone());
            }
        }
        seen
    };
    rounds.sort_by_key(|r| table::round_number(r));

    TabData::Ready(Highlights { items, rounds })
}

/// Parse the CampeoesData tab. Year/Competition/Position/Team/Points
/// headers are required for the tab to count as configured; Player and
/// Link are optional columns.
pub fn parse_champions(table: &SheetTable) -> TabData<ChampionsHistory> {
    let cols = (
        table.column(&["Ano", "Year", "Temporada"]),
        table.column(&["Competicao", "Competição", "Campeonato", "Competition"]),
        table.column(&["Posicao", "Posição", "Pos", "Position", "Colocação"]),
        table.column(&["Time", "Equipe", "Team"]),
        table.column(&["Pontos", "Points", "Pts"]),
    );
    let (Some(i_year), Some(i_comp), Some(i_pos), Some(i_team), Some(i_points)) = cols else {
        return TabData::NotConfigured {
            message: format!(
                "Não consegui ler a aba {TAB_CHAMPIONS}. Cabeçalho esperado (linha 1): \
                 Ano, Competicao, Posicao, Time, Jogador, Pontos, Link"
            ),
        };
    };
    let i_player = table.column(PLAYER_ALIASES);
    let i_link = table.column(&["Link", "URL"]);

    let entries: Vec<ChampionEntry> = table
        .rows
        .iter()
        .filter_map(|row| {
            let year = table.cell(row, Some(i_year)).as_text();
            let competition = table.cell(row, Some(i_comp)).as_text();
            let position_raw = table.cell(row, Some(i_pos));
            let team = table.cell(row, Some(i_team)).as_text();
            if year.is_empty() || competition.is_empty() || position_raw.is_empty() || team.is_empty()
            {
                return None;
            }

            Some(ChampionEntry {
                year,
                competition,
                // Unparsable position sorts last instead of dropping the row.
                position: position_raw.as_number().unwrap_or(999.0),
                team,
                player: Some(table.cell(row, i_player).as_text()).filter(|s| !s.is_empty()),
                points: table.cell(row, Some(i_points)).as_number(),
                link: Some(table.cell(row, i_link).as_text()).filter(|s| !s.is_empty()),
            })
        })
        .collect();

    let mut year_numbers: Vec<i64> = entries
        .iter()
        .filter_map(|e| e.year.trim().parse::<i64>().ok())
        .collect();
    year_numbers.sort_unstable();
    year_numbers.dedup();
    year_numbers.reverse();
    let years = year_numbers.iter().map(|y| y.to_string()).collect();

    TabData::Ready(ChampionsHistory { entries, years })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standings;
    use crate::table::Cell;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn sheet(header: &[&str], rows: Vec<Vec<Cell>>) -> SheetTable {
        SheetTable {
            header: header.iter().map(|s| s.to_string()).collect(),
            rows,
        }
    }

    // -----------------------------------------------------------------------
    // Configuration
    // -----------------------------------------------------------------------

    #[test]
    fn sheet_id_from_bare_id() {
        let id = "1LmQLHOR0DlcT_DwuwGm-4fWZ9ZkB4he6G0FO0X2nnBI";
        assert_eq!(resolve_sheet_id(Some(id)), id);
    }

    #[test]
    fn sheet_id_from_full_url() {
        let url = "https://docs.google.com/spreadsheets/d/abc123_XY-9/edit#gid=0";
        assert_eq!(resolve_sheet_id(Some(url)), "abc123_XY-9");
    }

    #[test]
    fn sheet_id_falls_back_when_empty() {
        assert_eq!(resolve_sheet_id(None), FALLBACK_SHEET_ID);
        assert_eq!(resolve_sheet_id(Some("   ")), FALLBACK_SHEET_ID);
    }

    // -----------------------------------------------------------------------
    // Photo URL normalization
    // -----------------------------------------------------------------------

    #[test]
    fn drive_file_link_becomes_thumbnail() {
        let url = "https://drive.google.com/file/d/FILE_ID-1/view?usp=sharing";
        assert_eq!(
            normalize_photo_url(url),
            "https://drive.google.com/thumbnail?id=FILE_ID-1&sz=w200"
        );
    }

    #[test]
    fn drive_uc_link_becomes_thumbnail() {
        let url = "https://drive.google.com/uc?export=view&id=FILE_ID_2";
        assert_eq!(
            normalize_photo_url(url),
            "https://drive.google.com/thumbnail?id=FILE_ID_2&sz=w200"
        );
    }

    #[test]
    fn non_drive_urls_pass_through() {
        let url = "https://i.imgur.com/abc.png";
        assert_eq!(normalize_photo_url(url), url);
        assert_eq!(normalize_photo_url("  "), "");
    }

    // -----------------------------------------------------------------------
    // Players parser
    // -----------------------------------------------------------------------

    #[test]
    fn players_active_filter() {
        let table = sheet(
            &["Nome", "FotoURL", "Função", "Ativo"],
            vec![
                vec![text("Ana"), Cell::Empty, text("Capitã"), text("Sim")],
                vec![text("Bia"), Cell::Empty, Cell::Empty, text("não")],
                vec![text("Caio"), Cell::Empty, Cell::Empty, Cell::Empty],
                vec![Cell::Empty, text("x.png"), Cell::Empty, text("Sim")],
            ],
        );
        let players = parse_players(&table);
        let names: Vec<&str> = players.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Caio"]);
        assert!(players.iter().all(|p| p.active));
    }

    #[test]
    fn players_active_column_absent_means_all_active() {
        let table = sheet(&["Nome"], vec![vec![text("Ana")], vec![text("Bia")]]);
        assert_eq!(parse_players(&table).len(), 2);
    }

    // -----------------------------------------------------------------------
    // Rounds parser
    // -----------------------------------------------------------------------

    #[test]
    fn rounds_header_spellings_share_one_key() {
        let table = sheet(
            &["Jogador", "R1", "r 2", "Rodada 3", "04"],
            vec![vec![
                text("Ana"),
                Cell::Number(1.0),
                Cell::Number(2.0),
                Cell::Number(3.0),
                Cell::Number(4.0),
            ]],
        );
        let records = parse_rounds(&table).unwrap();
        let rec = &records[0];
        assert_eq!(rec.score("R1"), Some(1.0));
        assert_eq!(rec.score("R2"), Some(2.0));
        assert_eq!(rec.score("R3"), Some(3.0));
        assert_eq!(rec.score("R4"), Some(4.0));
    }

    #[test]
    fn rounds_blank_cells_stay_absent() {
        let table = sheet(
            &["Jogador", "R1", "R2", "R3"],
            vec![vec![text("Ana"), Cell::Number(10.0), Cell::Empty, text("20")]],
        );
        let records = parse_rounds(&table).unwrap();
        assert_eq!(records[0].score("R1"), Some(10.0));
        assert_eq!(records[0].score("R2"), None);
        assert_eq!(records[0].score("R3"), Some(20.0));
    }

    #[test]
    fn rounds_without_round_columns_is_fatal() {
        let table = sheet(&["Jogador", "Time"], vec![vec![text("Ana"), text("X")]]);
        let err = parse_rounds(&table).unwrap_err();
        assert!(matches!(err, ApiError::NoRoundColumns { .. }));
    }

    #[test]
    fn rounds_player_column_defaults_to_first() {
        let table = sheet(
            &["Atleta", "R1"],
            vec![vec![text("Ana"), Cell::Number(5.0)], vec![Cell::Empty, Cell::Number(9.0)]],
        );
        let records = parse_rounds(&table).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].player, "Ana");
    }

    // -----------------------------------------------------------------------
    // Highlights parser
    // -----------------------------------------------------------------------

    #[test]
    fn highlights_missing_header_is_not_configured() {
        let table = sheet(&["Rodada", "Tipo", "Jogador"], vec![]);
        let parsed = parse_highlights(&table);
        match parsed {
            TabData::NotConfigured { message } => {
                assert!(message.contains("Rodada | Tipo | Jogador | Texto | Link"));
            }
            TabData::Ready(_) => panic!("expected NotConfigured"),
        }
    }

    #[test]
    fn highlights_rows_and_rounds() {
        let table = sheet(
            &["Rodada", "Tipo", "Jogador", "Texto", "Link"],
            vec![
                vec![text("R10"), text("Mico"), text("Ana"), text("escalou lesionado"), Cell::Empty],
                vec![text("R2"), text("Ouro"), text("Bia"), text("mitou"), text("https://x")],
                // incomplete row dropped, all-empty row skipped
                vec![text("R3"), Cell::Empty, text("Caio"), text("..."), Cell::Empty],
                vec![Cell::Empty, Cell::Empty, Cell::Empty, Cell::Empty, Cell::Empty],
            ],
        );
        let parsed = parse_highlights(&table);
        let data = parsed.ready().expect("configured");
        assert_eq!(data.items.len(), 2);
        assert_eq!(data.items[0].link, None);
        assert_eq!(data.items[1].link.as_deref(), Some("https://x"));
        // sorted by numeric portion, not lexically
        assert_eq!(data.rounds, vec!["R2", "R10"]);
    }

    // -----------------------------------------------------------------------
    // Champions parser
    // -----------------------------------------------------------------------

    #[test]
    fn champions_missing_header_is_not_configured() {
        let table = sheet(&["Ano", "Time"], vec![]);
        match parse_champions(&table) {
            TabData::NotConfigured { message } => {
                assert!(message.contains("Ano, Competicao, Posicao, Time"));
            }
            TabData::Ready(_) => panic!("expected NotConfigured"),
        }
    }

    #[test]
    fn champions_coercion_and_years() {
        let table = sheet(
            &["Ano", "Competicao", "Posicao", "Time", "Jogador", "Pontos", "Link"],
            vec![
                vec![text("2023"), text("Liga"), text("1"), text("Furacão"), text("Ana"), text("74,25"), Cell::Empty],
                vec![text("2024"), text("Copa"), text("2º"), text("Trovão"), Cell::Empty, text("abc"), text("https://x")],
                vec![text("2024"), text("Liga"), Cell::Empty, text("Raio"), Cell::Empty, Cell::Empty, Cell::Empty],
            ],
        );
        let data = parse_champions(&table);
        let data = data.ready().expect("configured");
        // third row dropped: empty position
        assert_eq!(data.entries.len(), 2);
        assert_eq!(data.entries[0].points, Some(74.25));
        assert_eq!(data.entries[0].player.as_deref(), Some("Ana"));
        // unparsable position sorts last, unparsable points is absent
        assert_eq!(data.entries[1].position, 999.0);
        assert_eq!(data.entries[1].points, None);
        assert_eq!(data.years, vec!["2024", "2023"]);
    }

    // -----------------------------------------------------------------------
    // HTTP-level tests against a mock gviz endpoint
    // -----------------------------------------------------------------------

    fn envelope(table_json: &str) -> String {
        format!(
            "/*O_o*/\ngoogle.visualization.Query.setResponse({{\"version\":\"0.6\",\
             \"reqId\":\"0\",\"status\":\"ok\",\"table\":{table_json}}});"
        )
    }

    #[tokio::test]
    async fn fetch_table_unwraps_envelope() {
        let mut server = mockito::Server::new_async().await;
        let body = envelope(
            r#"{"cols":[{"id":"A","label":"Nome"},{"id":"B","label":"R1"}],
                "rows":[{"c":[{"v":"Ana"},{"v":12.5}]}]}"#,
        );
        let mock = server
            .mock("GET", "/spreadsheets/d/test-sheet/gviz/tq")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let client = SheetsClient::with_base_url(server.url());
        let raw = client.fetch_table("test-sheet", TAB_ROUNDS).await.unwrap();
        mock.assert_async().await;

        assert_eq!(raw.header, vec!["Nome", "R1"]);
        assert_eq!(raw.rows[0][1], Cell::Number(12.5));
    }

    #[tokio::test]
    async fn fetch_table_http_error_fails_fast() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", mockito::Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let client = SheetsClient::with_base_url(server.url());
        let err = client.fetch_table("test-sheet", TAB_PLAYERS).await.unwrap_err();
        assert!(matches!(err, ApiError::Status(code, _) if code.as_u16() == 500));
    }

    #[tokio::test]
    async fn fetch_table_without_json_payload_is_envelope_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", mockito::Matcher::Any)
            .with_status(200)
            .with_body("<!doctype html><title>sign in</title>")
            .create_async()
            .await;

        let client = SheetsClient::with_base_url(server.url());
        let err = client.fetch_table("test-sheet", TAB_PLAYERS).await.unwrap_err();
        assert!(matches!(err, ApiError::Envelope(_)));
    }

    #[tokio::test]
    async fn fetch_table_gviz_error_status_is_query_error() {
        let mut server = mockito::Server::new_async().await;
        let body = "/*O_o*/\ngoogle.visualization.Query.setResponse(\
                    {\"status\":\"error\",\"errors\":[{\"reason\":\"invalid_query\",\
                    \"message\":\"INVALID_QUERY\",\"detailed_message\":\"no such sheet\"}]});";
        server
            .mock("GET", mockito::Matcher::Any)
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let client = SheetsClient::with_base_url(server.url());
        let err = client.fetch_table("test-sheet", TAB_HIGHLIGHTS).await.unwrap_err();
        match err {
            ApiError::Query { tab, detail } => {
                assert_eq!(tab, TAB_HIGHLIGHTS);
                assert_eq!(detail, "no such sheet");
            }
            other => panic!("expected Query error, got {other}"),
        }
    }

    // -----------------------------------------------------------------------
    // End to end: players + rounds through the ranking aggregator
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn ranking_end_to_end_from_mocked_tabs() {
        let mut server = mockito::Server::new_async().await;

        let players_body = envelope(
            r#"{"cols":[{"id":"A","label":"Nome"},{"id":"B","label":"Ativo"}],
                "rows":[{"c":[{"v":"Ana"},{"v":"Sim"}]},
                        {"c":[{"v":"Bia"},{"v":"Não"}]}]}"#,
        );
        let rounds_body = envelope(
            r#"{"cols":[{"id":"A","label":"Jogador"},{"id":"B","label":"R1"},{"id":"C","label":"R2"}],
                "rows":[{"c":[{"v":"Ana"},{"v":12},{"v":8}]}]}"#,
        );

        server
            .mock("GET", "/spreadsheets/d/e2e/gviz/tq")
            .match_query(mockito::Matcher::UrlEncoded("sheet".into(), TAB_PLAYERS.into()))
            .with_body(players_body)
            .create_async()
            .await;
        server
            .mock("GET", "/spreadsheets/d/e2e/gviz/tq")
            .match_query(mockito::Matcher::UrlEncoded("sheet".into(), TAB_ROUNDS.into()))
            .with_body(rounds_body)
            .create_async()
            .await;

        let client = SheetsClient::with_base_url(server.url());
        let players = client.fetch_players("e2e").await.unwrap();
        let rounds = client.fetch_rounds("e2e").await.unwrap();

        let ranking = standings::compute_ranking(&players, &rounds);
        assert_eq!(ranking.len(), 1, "Bia is inactive and must be excluded");
        assert_eq!(ranking[0].name, "Ana");
        assert_eq!(ranking[0].total, 20.0);
        assert_eq!(ranking[0].average, 10.0);
        assert_eq!(ranking[0].rounds_played, 2);
    }
}
