use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;
use ticker_analyzer::{Criterion, ScoreReport, Tier, Verdict};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Funds,
    Criteria,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Funds => Page::Criteria,
            Page::Criteria => Page::Funds,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Funds => "Fundos",
            Page::Criteria => "Critérios",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    None,
    Strong,
    Moderate,
    Weak,
    Disqualified,
}

impl FilterType {
    fn accepts(&self, report: &ScoreReport) -> bool {
        match self {
            FilterType::None => true,
            FilterType::Strong => !report.disqualified && report.tier() == Tier::Strong,
            FilterType::Moderate => !report.disqualified && report.tier() == Tier::Moderate,
            FilterType::Weak => !report.disqualified && report.tier() == Tier::Weak,
            FilterType::Disqualified => report.disqualified,
        }
    }

    fn label(&self) -> &str {
        match self {
            FilterType::None => "todos",
            FilterType::Strong => ">= 15",
            FilterType::Moderate => "10-14",
            FilterType::Weak => "< 10",
            FilterType::Disqualified => "descartados",
        }
    }
}

pub struct App {
    pub reports: Vec<ScoreReport>,
    pub filtered: Vec<ScoreReport>,
    pub state: TableState,
    pub current_page: Page,
    pub show_detail: bool,
    pub active_filter: FilterType,
}

impl App {
    /// Reports are shown in ranking order
    pub fn new(reports: &[ScoreReport]) -> Self {
        let reports: Vec<ScoreReport> = ticker_analyzer::rank(reports).into_iter().cloned().collect();

        let mut state = TableState::default();
        if !reports.is_empty() {
            state.select(Some(0));
        }

        Self {
            filtered: reports.clone(),
            reports,
            state,
            current_page: Page::Funds,
            show_detail: true,
            active_filter: FilterType::None,
        }
    }

    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail;
    }

    pub fn selected_report(&self) -> Option<&ScoreReport> {
        self.state.selected().and_then(|i| self.filtered.get(i))
    }

    pub fn apply_filter(&mut self, filter: FilterType) {
        self.active_filter = filter;
        self.filtered = self
            .reports
            .iter()
            .filter(|r| filter.accepts(r))
            .cloned()
            .collect();

        if self.filtered.is_empty() {
            self.state.select(None);
        } else {
            self.state.select(Some(0));
        }
    }

    pub fn next(&mut self) {
        let len = self.filtered.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.filtered.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    /// Passes per criterion across all funds
    pub fn criterion_passes(&self, criterion: Criterion) -> usize {
        self.reports
            .iter()
            .filter(|r| r.result(criterion).is_some_and(|res| res.verdict.is_pass()))
            .count()
    }
}

fn verdict_color(verdict: Verdict) -> Color {
    match verdict {
        Verdict::Pass => Color::Green,
        Verdict::Fail => Color::Red,
        Verdict::Neutral => Color::Yellow,
        Verdict::Disqualify => Color::LightRed,
        Verdict::NotApplicable => Color::DarkGray,
    }
}

fn tier_color(report: &ScoreReport) -> Color {
    if report.disqualified {
        return Color::LightRed;
    }
    match report.tier() {
        Tier::Strong => Color::Green,
        Tier::Moderate => Color::Yellow,
        Tier::Weak => Color::Red,
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    restore_on_err(execute!(stdout, EnterAlternateScreen), disable_raw_mode)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = restore_on_err(Terminal::new(backend), || {
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen)
    })?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}

/// Undo terminal setup when a setup step fails; the original error is kept
fn restore_on_err<T>(res: io::Result<T>, cleanup: impl FnOnce() -> io::Result<()>) -> io::Result<T> {
    if res.is_err() {
        let _ = cleanup();
    }
    res
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Ok(()),
                KeyCode::Enter => app.toggle_detail(),
                KeyCode::Tab | KeyCode::BackTab => app.current_page = app.current_page.next(),
                KeyCode::Char('0') => app.apply_filter(FilterType::None),
                KeyCode::Char('1') => app.apply_filter(FilterType::Strong),
                KeyCode::Char('2') => app.apply_filter(FilterType::Moderate),
                KeyCode::Char('3') => app.apply_filter(FilterType::Weak),
                KeyCode::Char('4') => app.apply_filter(FilterType::Disqualified),
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::Home => {
                    if !app.filtered.is_empty() {
                        app.state.select(Some(0));
                    }
                }
                KeyCode::End => {
                    if !app.filtered.is_empty() {
                        app.state.select(Some(app.filtered.len() - 1));
                    }
                }
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    match app.current_page {
        Page::Funds if app.show_detail => {
            let content_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
                .split(chunks[1]);

            render_funds(f, content_chunks[0], app);
            render_detail_panel(f, content_chunks[1], app);
        }
        Page::Funds => render_funds(f, chunks[1], app),
        Page::Criteria => render_criteria(f, chunks[1], app),
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut tab_spans = vec![];
    for (i, page) in [Page::Funds, Page::Criteria].iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title().to_string(), style));
    }

    let disqualified = app.reports.iter().filter(|r| r.disqualified).count();
    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Fundos: {}", app.reports.len()),
        Style::default().fg(Color::White),
    ));
    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Descartados: {}", disqualified),
        Style::default().fg(Color::Red),
    ));

    let header = Paragraph::new(vec![Line::from(tab_spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn render_funds(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["Ticker", "Tipo", "Pontos", "Status"].iter().map(|h| {
        Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    });
    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = app.filtered.iter().map(|report| {
        let color = tier_color(report);
        let status = if report.disqualified { "DESCARTADO" } else { "ok" };

        Row::new(vec![
            Cell::from(report.ticker.clone()),
            Cell::from(report.fund_type.clone()),
            Cell::from(report.score_label()).style(Style::default().fg(color)),
            Cell::from(status).style(Style::default().fg(color)),
        ])
        .height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Length(20),
            Constraint::Length(7),
            Constraint::Length(11),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Ranking "),
    )
    .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_criteria(f: &mut Frame, area: Rect, app: &App) {
    let header_cells = ["#", "Critério", "Aprovados"].iter().map(|h| {
        Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    });
    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let total = app.reports.len();
    let rows = Criterion::ALL.iter().map(|criterion| {
        let passes = app.criterion_passes(*criterion);
        let color = if passes * 2 >= total { Color::Green } else { Color::Red };

        Row::new(vec![
            Cell::from(criterion.code()),
            Cell::from(criterion.description()),
            Cell::from(format!("{}/{}", passes, total)).style(Style::default().fg(color)),
        ])
    });

    let table = Table::new(
        rows,
        [Constraint::Length(4), Constraint::Length(45), Constraint::Length(10)],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Critérios - aprovação entre os fundos "),
    );

    f.render_widget(table, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let selected = app.state.selected().map(|i| i + 1).unwrap_or(0);

    let mut status_spans = vec![Span::styled(
        format!(" Linha: {}/{} ", selected, app.filtered.len()),
        Style::default().fg(Color::Cyan),
    )];

    if app.active_filter != FilterType::None {
        status_spans.push(Span::raw(" | "));
        status_spans.push(Span::styled(
            format!("Filtro: {}", app.active_filter.label()),
            Style::default().fg(Color::Green),
        ));
    }

    status_spans.push(Span::raw(" | "));
    status_spans.push(Span::styled("Enter", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Detalhe | "));
    status_spans.push(Span::styled("Tab", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Página | "));
    status_spans.push(Span::styled("0-4", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Filtro | "));
    status_spans.push(Span::styled("↑/↓", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Nav | "));
    status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Sair"));

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn render_detail_panel(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Detalhe do Fundo ");

    let report = match app.selected_report() {
        Some(r) => r,
        None => {
            f.render_widget(Paragraph::new("Nenhum fundo selecionado").block(block), area);
            return;
        }
    };

    let label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let mut content = vec![
        Line::from(vec![
            Span::styled("  Ticker: ", label),
            Span::raw(report.ticker.clone()),
            Span::raw("   "),
            Span::styled("Tipo: ", label),
            Span::raw(report.fund_type.clone()),
        ]),
        Line::from(vec![
            Span::styled("  Pontuação: ", label),
            Span::styled(report.score_label(), Style::default().fg(tier_color(report))),
        ]),
        Line::from("  ─────────────────────────────────────"),
    ];

    for result in &report.results {
        let raw = result.raw.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string());
        content.push(Line::from(vec![
            Span::styled(
                format!("  {:<4}", result.criterion.code()),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                format!("{:<10}", result.verdict.label()),
                Style::default().fg(verdict_color(result.verdict)).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("{} ", result.criterion.description())),
            Span::styled(format!("({})", raw), Style::default().fg(Color::DarkGray)),
        ]));
    }

    f.render_widget(Paragraph::new(content).block(block), area);
}
