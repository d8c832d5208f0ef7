//! TUI Dashboard using ratatui.

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use insight_core::types::{AnalysisWindow, Asset};
use insight_session::{SessionReport, SessionRequest, StageOutcome};
use insight_signals::{IndicatorKind, IndicatorRequest, Rgb, Signal, Trend};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Cell, Chart, Dataset, GraphType, List,
        ListItem, Paragraph, Row, Table, Tabs, Wrap,
    },
    Frame, Terminal,
};
use std::io;
use std::time::Duration;
use tracing::info;

/// What a key press asks the dashboard to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardAction {
    None,
    Run,
    Quit,
}

/// Dashboard state: the current selection and the last report.
pub struct DashboardState {
    pub symbols: Vec<Asset>,
    pub selected: usize,
    pub indicators: IndicatorRequest,
    pub cursor: usize,
    pub window: AnalysisWindow,
    pub include_sentiment: bool,
    pub report: Option<SessionReport>,
    pub status: String,
}

impl DashboardState {
    pub fn new(symbol: Asset, indicators: IndicatorRequest, window: AnalysisWindow) -> Self {
        let symbols = Asset::all().to_vec();
        let selected = symbols.iter().position(|s| *s == symbol).unwrap_or(0);
        Self {
            symbols,
            selected,
            indicators,
            cursor: 0,
            window,
            include_sentiment: true,
            report: None,
            status: "Press 'r' to run the analysis".to_string(),
        }
    }

    pub fn with_sentiment(mut self, include: bool) -> Self {
        self.include_sentiment = include;
        self
    }

    pub fn symbol(&self) -> Asset {
        self.symbols[self.selected]
    }

    /// Indicator under the cursor.
    pub fn highlighted(&self) -> IndicatorKind {
        IndicatorKind::ALL[self.cursor]
    }

    /// Apply a key press.
    pub fn handle_key(&mut self, code: KeyCode) -> DashboardAction {
        let count = self.symbols.len();
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return DashboardAction::Quit,
            KeyCode::Char('r') | KeyCode::Enter => return DashboardAction::Run,
            KeyCode::Left => self.selected = (self.selected + count - 1) % count,
            KeyCode::Right | KeyCode::Tab => self.selected = (self.selected + 1) % count,
            KeyCode::Up => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down => self.cursor = (self.cursor + 1).min(IndicatorKind::ALL.len() - 1),
            KeyCode::Char(' ') => {
                let kind = self.highlighted();
                let on = self.indicators.toggle(kind);
                self.status = format!("{} {}", kind, if on { "selected" } else { "removed" });
            }
            _ => {}
        }
        DashboardAction::None
    }

    /// Session request for the current selection.
    pub fn request(&self) -> SessionRequest {
        SessionRequest::new(self.symbol().symbol(), self.indicators.clone())
            .with_window(self.window)
            .with_sentiment(self.include_sentiment)
    }

    pub fn set_report(&mut self, report: SessionReport) {
        let failed = [
            report.technical.error().is_some(),
            report.fundamentals.error().is_some(),
            report.sentiment.error().is_some(),
            report.onchain.error().is_some(),
        ]
        .iter()
        .filter(|f| **f)
        .count();
        self.status = match failed {
            0 => format!("Analysis of {} complete", report.symbol),
            n => format!("Analysis of {} complete, {} stage(s) failed", report.symbol, n),
        };
        self.report = Some(report);
    }
}

/// TUI Dashboard.
pub struct Dashboard {
    refresh_ms: u64,
}

impl Dashboard {
    /// Create a new dashboard.
    pub fn new(refresh_ms: u64) -> Self {
        Self { refresh_ms }
    }

    /// Run the dashboard until the user quits. `on_run` executes a session
    /// for the current selection.
    pub fn run<F>(&self, state: &mut DashboardState, mut on_run: F) -> io::Result<()>
    where
        F: FnMut(SessionRequest) -> SessionReport,
    {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let res = self.run_loop(&mut terminal, state, &mut on_run);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        res
    }

    fn run_loop<B, F>(
        &self,
        terminal: &mut Terminal<B>,
        state: &mut DashboardState,
        on_run: &mut F,
    ) -> io::Result<()>
    where
        B: Backend,
        F: FnMut(SessionRequest) -> SessionReport,
    {
        loop {
            terminal.draw(|f| render(f, state))?;

            if !event::poll(Duration::from_millis(self.refresh_ms))? {
                continue;
            }
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match state.handle_key(key.code) {
                DashboardAction::Quit => return Ok(()),
                DashboardAction::Run => {
                    let request = state.request();
                    info!(symbol = %request.symbol, indicators = %request.indicators, "Run requested");
                    state.status = format!("Running analysis for {}...", request.symbol);
                    terminal.draw(|f| render(f, state))?;
                    state.set_report(on_run(request));
                }
                DashboardAction::None => {}
            }
        }
    }
}

/// Draw the whole dashboard.
pub fn render(frame: &mut Frame, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),  // Symbol selector
            Constraint::Min(12),    // Indicators and technical analysis
            Constraint::Length(10), // Fundamentals, sentiment, on-chain
            Constraint::Length(3),  // Status
        ])
        .split(frame.area());

    render_header(frame, chunks[0], state);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(26), Constraint::Min(30)])
        .split(chunks[1]);
    render_indicators(frame, middle[0], state);
    render_technical(frame, middle[1], state);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(35),
            Constraint::Percentage(25),
        ])
        .split(chunks[2]);
    render_fundamentals(frame, bottom[0], state);
    render_sentiment(frame, bottom[1], state);
    render_onchain(frame, bottom[2], state);

    render_status(frame, chunks[3], state);
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

fn block(title: &str) -> Block<'_> {
    Block::default().borders(Borders::ALL).title(title)
}

fn error_text(message: &str) -> Paragraph<'_> {
    Paragraph::new(Line::from(Span::styled(
        format!("Error: {}", message),
        Style::default().fg(Color::Red),
    )))
    .wrap(Wrap { trim: true })
}

fn render_header(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let titles: Vec<String> = state.symbols.iter().map(|s| s.symbol().to_string()).collect();
    let window = match (state.window.start, state.window.end) {
        (None, None) => "last 30 days".to_string(),
        (start, end) => format!(
            "{} to {}",
            start.map_or("...".to_string(), |d| d.to_string()),
            end.map_or("today".to_string(), |d| d.to_string())
        ),
    };

    let tabs = Tabs::new(titles)
        .select(state.selected)
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(block("Crypto Insight").title_bottom(Line::from(format!(" {} ", window))));
    frame.render_widget(tabs, area);
}

fn render_indicators(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let items: Vec<ListItem> = IndicatorKind::ALL
        .iter()
        .enumerate()
        .map(|(i, kind)| {
            let mark = if state.indicators.contains(*kind) { "[x]" } else { "[ ]" };
            let style = if i == state.cursor {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            ListItem::new(format!("{} {}", mark, kind)).style(style)
        })
        .collect();

    frame.render_widget(List::new(items).block(block("Indicators")), area);
}

fn signal_color(signal: &Signal) -> Color {
    match signal {
        Signal::Buy(_) | Signal::Bullish(_) => Color::Green,
        Signal::Sell(_) | Signal::Bearish(_) => Color::Red,
        Signal::Neutral | Signal::Insufficient(_) => Color::Yellow,
    }
}

fn trend_color(trend: Trend) -> Color {
    match trend {
        Trend::Uptrend => Color::Green,
        Trend::Downtrend => Color::Red,
        Trend::Neutral => Color::Yellow,
    }
}

fn render_technical(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(6)])
        .split(area);

    let Some(report) = &state.report else {
        frame.render_widget(Paragraph::new("No analysis yet").block(block("Signal")), chunks[0]);
        frame.render_widget(block("Price"), chunks[1]);
        return;
    };

    let analysis = match &report.technical {
        StageOutcome::Ready(analysis) => analysis,
        StageOutcome::Failed { message } => {
            frame.render_widget(error_text(message).block(block("Signal")), chunks[0]);
            frame.render_widget(block("Price"), chunks[1]);
            return;
        }
        StageOutcome::Skipped => {
            frame.render_widget(Paragraph::new("Skipped").block(block("Signal")), chunks[0]);
            return;
        }
    };

    let summary = Paragraph::new(vec![
        Line::from(vec![
            Span::raw("Signal: "),
            Span::styled(
                analysis.signal.to_string(),
                Style::default()
                    .fg(signal_color(&analysis.signal))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  |  Trend: "),
            Span::styled(
                analysis.trend.to_string(),
                Style::default().fg(trend_color(analysis.trend)),
            ),
        ]),
        Line::from(vec![
            Span::raw("Last Price: "),
            Span::styled(
                format!("${:.2}", analysis.last_price),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  |  {} bars ({})", analysis.bars, analysis.timeframe)),
        ]),
    ])
    .block(block("Signal"));
    frame.render_widget(summary, chunks[0]);

    render_price_chart(frame, chunks[1], analysis);
}

fn render_price_chart(frame: &mut Frame, area: Rect, analysis: &insight_signals::TechnicalAnalysis) {
    let Some(panel) = analysis.figure.price_panel() else {
        frame.render_widget(block("Price"), area);
        return;
    };

    // x is the bar index, so gaps in a series simply have no points
    let points: Vec<Vec<(f64, f64)>> = panel
        .series
        .iter()
        .map(|series| {
            series
                .values
                .iter()
                .enumerate()
                .filter_map(|(i, v)| v.map(|v| (i as f64, v)))
                .collect()
        })
        .collect();

    let datasets: Vec<Dataset> = panel
        .series
        .iter()
        .zip(&points)
        .map(|(series, data)| {
            Dataset::default()
                .name(series.label.clone())
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(color(series.color)))
                .data(data)
        })
        .collect();

    let (y_min, y_max) = panel.y_range().unwrap_or((0.0, 1.0));
    let x_max = analysis.figure.timestamps.len().saturating_sub(1).max(1) as f64;

    let chart = Chart::new(datasets)
        .block(block(&panel.title))
        .x_axis(
            Axis::default()
                .bounds([0.0, x_max])
                .labels(vec![
                    Span::raw(axis_date(analysis.figure.timestamps.first())),
                    Span::raw(axis_date(analysis.figure.timestamps.last())),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(panel.y_label.as_str())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::raw(format!("{:.2}", y_min)),
                    Span::raw(format!("{:.2}", y_max)),
                ]),
        );
    frame.render_widget(chart, area);
}

fn axis_date(ts: Option<&i64>) -> String {
    ts.and_then(|ts| chrono::DateTime::from_timestamp_millis(*ts))
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn render_fundamentals(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let title = "Fundamentals";
    match state.report.as_ref().map(|r| &r.fundamentals) {
        Some(StageOutcome::Ready(fundamentals)) => {
            let header = Row::new(["Metric", "Value"].iter().map(|h| {
                Cell::from(*h).style(Style::default().add_modifier(Modifier::BOLD))
            }));
            let rows = fundamentals.metrics().into_iter().map(|(label, value)| {
                Row::new(vec![Cell::from(label), Cell::from(value.to_string())])
            });
            let table = Table::new(rows, [Constraint::Percentage(55), Constraint::Percentage(45)])
                .header(header)
                .block(block(title));
            frame.render_widget(table, area);
        }
        Some(StageOutcome::Failed { message }) => {
            frame.render_widget(error_text(message).block(block(title)), area);
        }
        _ => frame.render_widget(block(title), area),
    }
}

fn render_sentiment(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let title = "Average Sentiment";
    match state.report.as_ref().map(|r| &r.sentiment) {
        Some(StageOutcome::Ready(data)) => {
            let Some(mean) = data.averages() else {
                frame.render_widget(block(title), area);
                return;
            };
            let bars: Vec<Bar> = [
                ("Pos", mean.pos, Color::Green),
                ("Neg", mean.neg, Color::Red),
                ("Neu", mean.neu, Color::Gray),
            ]
            .into_iter()
            .map(|(label, value, fg)| {
                Bar::default()
                    .label(label.into())
                    .value((value * 100.0).round() as u64)
                    .text_value(format!("{:.2}", value))
                    .style(Style::default().fg(fg))
            })
            .collect();

            let chart = BarChart::default()
                .block(block(title).title_bottom(Line::from(format!(
                    " compound {:+.3}, {} articles ",
                    mean.compound,
                    data.len()
                ))))
                .data(BarGroup::default().bars(&bars))
                .bar_width(6)
                .bar_gap(2)
                .max(100);
            frame.render_widget(chart, area);
        }
        Some(StageOutcome::Failed { message }) => {
            frame.render_widget(error_text(message).block(block(title)), area);
        }
        Some(StageOutcome::Skipped) => {
            frame.render_widget(Paragraph::new("Skipped").block(block(title)), area);
        }
        None => frame.render_widget(block(title), area),
    }
}

fn render_onchain(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let title = "On-chain";
    match state.report.as_ref().map(|r| &r.onchain) {
        Some(StageOutcome::Ready(metrics)) => {
            let lines: Vec<Line> = metrics
                .iter()
                .map(|m| Line::from(format!("{}: {} {}", m.name, m.value, m.unit)))
                .collect();
            frame.render_widget(Paragraph::new(lines).block(block(title)), area);
        }
        Some(StageOutcome::Failed { message }) => {
            frame.render_widget(error_text(message).block(block(title)), area);
        }
        _ => frame.render_widget(block(title), area),
    }
}

fn render_status(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let help = Paragraph::new(Line::from(vec![
        Span::styled(&state.status, Style::default().fg(Color::Cyan)),
        Span::raw(" | ←/→ symbol  ↑/↓ move  space toggle  r run  q quit"),
    ]))
    .block(block("Status"));
    frame.render_widget(help, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use insight_core::error::DataError;
    use insight_core::traits::MarketDataSource;
    use insight_core::types::Bar as PriceBar;
    use insight_core::types::{Article, FetchWindow, Fundamentals, PriceSeries, Sample, Timeframe};
    use insight_sentiment::{SentimentAnalyzer, SentimentDataset};
    use insight_signals::SignalEngine;
    use ratatui::backend::TestBackend;
    use std::sync::Arc;

    fn screen(state: &DashboardState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| render(f, state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn state() -> DashboardState {
        DashboardState::new(Asset::Eth, IndicatorRequest::new(), AnalysisWindow::trailing())
    }

    struct NoSource;

    #[async_trait]
    impl MarketDataSource for NoSource {
        async fn fetch_samples(
            &self,
            _asset: Asset,
            _window: &FetchWindow,
        ) -> Result<Vec<Sample>, DataError> {
            Ok(vec![])
        }

        fn name(&self) -> &str {
            "none"
        }
    }

    fn report() -> SessionReport {
        let samples: Vec<Sample> = (0..60)
            .map(|i| {
                let c = 100.0 + i as f64;
                PriceBar::new(i as i64 * 3_600_000, c, c + 1.0, c - 1.0, c, 1.0).into()
            })
            .collect();
        let series = PriceSeries::from_samples("BTC", Timeframe::Hour1, samples).unwrap();
        let request: IndicatorRequest = [IndicatorKind::Rsi].into_iter().collect();
        let engine = SignalEngine::new(Arc::new(NoSource));
        let analysis = engine.evaluate(Asset::Btc, &series, &request);

        let mut sentiment = SentimentDataset::new();
        sentiment.extend_scored(
            &SentimentAnalyzer::new(),
            Asset::Btc,
            &[Article {
                title: "Bitcoin rally".into(),
                description: "Strong gains".into(),
                published_at: Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()),
            }],
        );

        SessionReport {
            symbol: "BTC".into(),
            technical: StageOutcome::Ready(analysis),
            fundamentals: StageOutcome::Ready(Fundamentals::unavailable(Asset::Btc)),
            sentiment: StageOutcome::Ready(sentiment),
            onchain: StageOutcome::Failed {
                message: "On-chain metrics provider is not configured".into(),
            },
        }
    }

    #[test]
    fn test_key_handling() {
        let mut state = state();
        assert_eq!(state.symbol(), Asset::Eth);

        assert_eq!(state.handle_key(KeyCode::Right), DashboardAction::None);
        assert_eq!(state.symbol(), Asset::Xrp);
        state.handle_key(KeyCode::Right);
        assert_eq!(state.symbol(), Asset::Btc);
        state.handle_key(KeyCode::Left);
        assert_eq!(state.symbol(), Asset::Xrp);

        state.handle_key(KeyCode::Up);
        assert_eq!(state.cursor, 0);
        state.handle_key(KeyCode::Down);
        state.handle_key(KeyCode::Char(' '));
        assert!(state.indicators.contains(IndicatorKind::ALL[1]));
        state.handle_key(KeyCode::Char(' '));
        assert!(state.indicators.is_empty());

        for _ in 0..10 {
            state.handle_key(KeyCode::Down);
        }
        assert_eq!(state.cursor, IndicatorKind::ALL.len() - 1);

        assert_eq!(state.handle_key(KeyCode::Char('r')), DashboardAction::Run);
        assert_eq!(state.handle_key(KeyCode::Esc), DashboardAction::Quit);
    }

    #[test]
    fn test_request_follows_selection() {
        let mut state = state().with_sentiment(false);
        state.handle_key(KeyCode::Char(' '));

        let request = state.request();
        assert_eq!(request.symbol, "ETH");
        assert!(request.indicators.contains(IndicatorKind::ALL[0]));
        assert!(!request.include_sentiment);
    }

    #[test]
    fn test_render_before_run() {
        let text = screen(&state());
        assert!(text.contains("Crypto Insight"));
        assert!(text.contains("No analysis yet"));
        assert!(text.contains("[ ] RSI"));
        assert!(text.contains("last 30 days"));
    }

    #[test]
    fn test_render_report() {
        let mut state = state();
        state.set_report(report());
        assert_eq!(state.status, "Analysis of BTC complete, 1 stage(s) failed");

        let text = screen(&state);
        assert!(text.contains("Sell (Overbought)"));
        assert!(text.contains("Technical Analysis for BTC"));
        assert!(text.contains("Market Cap (USD)"));
        assert!(text.contains("N/A"));
        assert!(text.contains("Average Sentiment"));
        assert!(text.contains("Error: On-chain"));
    }

    #[test]
    fn test_render_failed_technical() {
        let mut state = state();
        let mut report = report();
        report.technical = StageOutcome::Failed {
            message: "No data received for BTC".into(),
        };
        report.sentiment = StageOutcome::Skipped;
        state.set_report(report);

        let text = screen(&state);
        assert!(text.contains("Error: No data received for BTC"));
        assert!(text.contains("Skipped"));
    }
}
