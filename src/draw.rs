use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Tabs};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;
use liga_api::standings::{self, ChampionGroup};
use liga_api::{ChampionEntry, TabData};

static TABS: &[&str; 4] = &["Ranking", "Rodadas", "Zoeira", "Campeões"];

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    terminal
        .draw(|f| {
            layout.update(f.area(), app.settings.full_screen);

            if !app.settings.full_screen {
                draw_tabs(f, layout.tab_bar, app);
            }

            let mut main = layout.main;
            if app.state.show_logs {
                let [top, bottom] =
                    Layout::vertical([Constraint::Fill(1), Constraint::Length(10)]).areas(main);
                main = top;
                draw_logs(f, bottom);
            }

            match app.state.active_tab {
                MenuItem::Ranking => draw_ranking(f, main, app),
                MenuItem::Rounds => draw_rounds(f, main, app),
                MenuItem::Highlights => draw_highlights(f, main, app),
                MenuItem::Champions => draw_champions(f, main, app),
                MenuItem::Help => draw_placeholder(
                    f,
                    main,
                    "q=sair  1=Ranking  2=Rodadas  3=Zoeira  4=Campeões  R=recarregar  h/l=rodada/ano  j/k=rolar  f=tela cheia  \"=logs",
                ),
            }

            if !app.settings.full_screen {
                draw_status_bar(f, layout.status, app);
            }

            draw_loading_spinner(f, f.area(), app, loading);
        })
        .unwrap();
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Ranking => 0,
        MenuItem::Rounds => 1,
        MenuItem::Highlights => 2,
        MenuItem::Champions => 3,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Ajuda: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

fn draw_ranking(f: &mut Frame, area: Rect, app: &App) {
    let title = match app.state.data.latest_round {
        Some(n) => format!(" Ranking Geral — até R{n} "),
        None => " Ranking Geral ".to_string(),
    };
    let block = default_border(Color::White).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if !app.state.data.loaded {
        draw_waiting(f, inner, app);
        return;
    }

    let ranking = &app.state.data.ranking;
    if ranking.is_empty() {
        f.render_widget(
            Paragraph::new("Nenhum jogador ativo na planilha")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let mut lines = vec![
        Line::from(Span::styled(
            format!(
                "{:>3}  {:<20} {:<14} {:>8} {:>8} {:>8}",
                "#", "Jogador", "Função", "Total", "Média", "Rodadas"
            ),
            Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for (i, row) in ranking.iter().enumerate() {
        let style = match i {
            0 => Style::default().fg(Color::Yellow),
            1 | 2 => Style::default().fg(Color::White),
            _ => Style::default().fg(Color::Gray),
        };
        lines.push(Line::from(Span::styled(
            format!(
                "{:>3}  {:<20} {:<14} {:>8} {:>8} {:>8}",
                i + 1,
                clip(&row.name, 20),
                clip(&row.role, 14),
                format_points(row.total),
                format_points(row.average),
                row.rounds_played,
            ),
            style,
        )));
    }

    // Lanterninha of the most recent round, when anyone scored in it.
    if let Some(n) = app.state.data.latest_round {
        let label = format!("R{n}");
        if let Some(low) = standings::round_low(&app.state.data.dashboard.rounds, &label) {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("Lanterninha da {label}: {} ({} pts)", low.player, format_points(low.points)),
                Style::default().fg(Color::Red),
            )));
        }
    }

    let paragraph = Paragraph::new(lines).scroll((app.state.ranking.scroll_offset, 0));
    f.render_widget(paragraph, inner);
}

fn draw_rounds(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Rodadas ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if !app.state.data.loaded {
        draw_waiting(f, inner, app);
        return;
    }

    let Some(label) = app.selected_round_label() else {
        f.render_widget(
            Paragraph::new("Nenhuma rodada pontuada ainda")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    };
    let label = label.to_string();

    let [selector, content] =
        Layout::vertical([Constraint::Length(2), Constraint::Fill(1)]).areas(inner);

    let position = format!(
        "{}/{}",
        app.state.rounds.selected + 1,
        app.state.data.round_labels.len()
    );
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("◄ ", Style::default().fg(Color::DarkGray)),
            Span::styled(label.clone(), Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::styled(" ►", Style::default().fg(Color::DarkGray)),
            Span::styled(format!("   {position}  (h/l troca a rodada)"), Style::default().fg(Color::DarkGray)),
        ]))
        .alignment(Alignment::Center),
        selector,
    );

    let rows = standings::round_standings(&app.state.data.dashboard.rounds, &label);
    if rows.is_empty() {
        f.render_widget(
            Paragraph::new(format!("Ninguém pontuou na {label}"))
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            content,
        );
        return;
    }

    let mut lines = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let style = if i == 0 {
            Style::default().fg(Color::Yellow)
        } else if i + 1 == rows.len() {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Gray)
        };
        lines.push(Line::from(Span::styled(
            format!("{:>3}. {:<24} {:>8}", i + 1, clip(&row.player, 24), format_points(row.points)),
            style,
        )));
    }

    let paragraph = Paragraph::new(lines).scroll((app.state.rounds.scroll_offset, 0));
    f.render_widget(paragraph, content);
}

fn draw_highlights(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Zoeira ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if !app.state.data.loaded {
        draw_waiting(f, inner, app);
        return;
    }

    if let TabData::NotConfigured { message } = &app.state.data.dashboard.highlights {
        draw_not_configured(f, inner, message);
        return;
    }

    let groups = &app.state.data.highlight_groups;
    if groups.is_empty() {
        f.render_widget(
            Paragraph::new("Nenhuma zoeira registrada")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let mut lines = Vec::new();
    for group in groups {
        lines.push(Line::from(Span::styled(
            format!("── {} ", group.round),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
        for item in &group.items {
            lines.push(Line::from(vec![
                Span::styled(format!("  [{}] ", item.kind), Style::default().fg(Color::Cyan)),
                Span::styled(item.player.clone(), Style::default().fg(Color::White)),
                Span::styled(format!(" — {}", item.text), Style::default().fg(Color::Gray)),
            ]));
            if let Some(link) = &item.link {
                lines.push(Line::from(Span::styled(
                    format!("      {link}"),
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }
        lines.push(Line::from(""));
    }

    let paragraph = Paragraph::new(lines).scroll((app.state.highlights.scroll_offset, 0));
    f.render_widget(paragraph, inner);
}

fn draw_champions(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Campeões ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if !app.state.data.loaded {
        draw_waiting(f, inner, app);
        return;
    }

    if let TabData::NotConfigured { message } = &app.state.data.dashboard.champions {
        draw_not_configured(f, inner, message);
        return;
    }

    let [filter_area, content] =
        Layout::vertical([Constraint::Length(2), Constraint::Fill(1)]).areas(inner);

    let years = app.state.data.champion_years();
    let filter_label = match app.state.champions.year_filter {
        Some(i) => years.get(i).map(String::as_str).unwrap_or("Todos"),
        None => "Todos",
    };
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Ano: ", Style::default().fg(Color::Gray)),
            Span::styled(filter_label, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::styled("  (h/l troca o ano)", Style::default().fg(Color::DarkGray)),
        ]))
        .alignment(Alignment::Center),
        filter_area,
    );

    let year_filter = app
        .state
        .champions
        .year_filter
        .and_then(|i| years.get(i).cloned());
    let groups: Vec<&ChampionGroup> = app
        .state
        .data
        .champion_groups
        .iter()
        .filter(|g| year_filter.as_ref().is_none_or(|y| &g.year == y))
        .collect();

    if groups.is_empty() {
        f.render_widget(
            Paragraph::new("Nenhum título registrado")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            content,
        );
        return;
    }

    let mut lines = Vec::new();
    for group in groups {
        lines.push(Line::from(Span::styled(
            format!("── {} · {} ", group.year, group.category.label()),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
        for entry in &group.entries {
            lines.push(champion_line(entry));
        }
        lines.push(Line::from(""));
    }

    let paragraph = Paragraph::new(lines).scroll((app.state.champions.scroll_offset, 0));
    f.render_widget(paragraph, content);
}

fn champion_line(entry: &ChampionEntry) -> Line<'static> {
    let style = if entry.position == 1.0 {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };

    let mut text = format!("  {:>4}  {}", format_position(entry.position), entry.team);
    if let Some(player) = &entry.player {
        if !player.is_empty() {
            text.push_str(&format!(" ({player})"));
        }
    }
    let points = entry
        .points
        .map(format_points)
        .unwrap_or_else(|| "—".to_string());
    text.push_str(&format!(" — {points} pts"));

    Line::from(Span::styled(text, style))
}

fn draw_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let (text, style) = match app.state.last_error.as_deref() {
        Some(err) => (
            format!(" Erro: {err}  (R recarrega)"),
            Style::default().fg(Color::Red),
        ),
        None => (
            " R=recarregar  h/l=navegar  j/k=rolar  ?=ajuda  q=sair".to_string(),
            Style::default().fg(Color::DarkGray),
        ),
    };
    f.render_widget(Paragraph::new(text).style(style), area);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let widget = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style(Style::default().fg(Color::Gray));
    f.render_widget(widget, area);
}

fn draw_waiting(f: &mut Frame, area: Rect, app: &App) {
    let msg = if let Some(err) = app.state.last_error.as_deref() {
        format!("Falha ao carregar a planilha:\n{err}\n\nPressione R para tentar de novo")
    } else {
        "Carregando dados da planilha...".to_string()
    };
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        area,
    );
}

fn draw_not_configured(f: &mut Frame, area: Rect, message: &str) {
    f.render_widget(
        Paragraph::new(message.to_string())
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        area,
    );
}

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    let block = default_border(Color::DarkGray);
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        inner,
    );
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}

fn clip(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

/// pt-BR number rendering: comma decimal separator, at most two decimal
/// places, trailing zeros dropped ("12,5", "7", "0,25").
fn format_position(position: f64) -> String {
    if position >= 999.0 {
        "—".to_string()
    } else if position.fract() == 0.0 {
        format!("{}º", position as i64)
    } else {
        format!("{}º", format_points(position))
    }
}

fn format_points(value: f64) -> String {
    let mut text = format!("{value:.2}");
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }
    text.replace('.', ",")
}
