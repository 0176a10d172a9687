//! Terminal rendering and event loop
//!
//! The loop draws, then handles the pending fetch, then polls input. All
//! network work happens through `rt.block_on`, so a slow request simply
//! keeps the loading state on screen; there is no timeout and no retry.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame, Terminal,
};

use super::app::{App, LoginField, Screen};
use crate::dashboard::{
    category_rollup, category_slices, format_currency, income_expense_slices, percent,
    relative_date, totals,
};
use crate::model::TransactionKind;

pub fn run(mut app: App) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    loop {
        terminal.draw(|f| ui(f, &app))?;

        if app.should_quit {
            break;
        }

        if app.needs_login {
            app.needs_login = false;
            app.submit_login(&rt);
        } else if app.needs_fetch {
            app.needs_fetch = false;
            app.fetch_transactions(&rt);
        }

        if event::poll(Duration::from_millis(200))? {
            if let Event::Key(key) = event::read()? {
                handle_key(&mut app, key, &rt);
            }
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent, rt: &tokio::runtime::Runtime) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    match app.screen {
        Screen::Login => handle_key_login(app, key, rt),
        Screen::Dashboard => handle_key_dashboard(app, key, rt),
    }
}

fn handle_key_login(app: &mut App, key: KeyEvent, _rt: &tokio::runtime::Runtime) {
    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Tab | KeyCode::Up | KeyCode::Down => app.next_login_field(),
        KeyCode::Enter => {
            if !app.email.is_empty() && !app.password.is_empty() {
                app.request_login();
            }
        }
        KeyCode::Backspace => {
            app.active_field_mut().pop();
        }
        KeyCode::Char(c) => {
            app.active_field_mut().push(c);
        }
        _ => {}
    }
}

fn handle_key_dashboard(app: &mut App, key: KeyEvent, _rt: &tokio::runtime::Runtime) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Char('r') => {
            app.loading = true;
            app.needs_fetch = true;
        }
        KeyCode::Char('l') => app.logout(),
        _ => {}
    }
}

fn ui(f: &mut Frame, app: &App) {
    let area = f.area();

    let background = Block::default().style(Style::default().bg(app.theme.background()));
    f.render_widget(background, area);

    match app.screen {
        Screen::Login => draw_login(f, app, area),
        Screen::Dashboard => draw_dashboard(f, app, area),
    }
}

// ============================================
// Login screen
// ============================================

fn draw_login(f: &mut Frame, app: &App, area: Rect) {
    let card = centered_rect(50, 14, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Fast Finance ")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(app.theme.text()));
    f.render_widget(block, card);

    let inner = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(1), // subtitle
            Constraint::Length(1),
            Constraint::Length(1), // email
            Constraint::Length(1),
            Constraint::Length(1), // password
            Constraint::Length(1),
            Constraint::Length(1), // submit hint
            Constraint::Min(0),
        ])
        .split(card);

    let muted = Style::default().fg(app.theme.muted());
    let active = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    f.render_widget(
        Paragraph::new("Faça login para continuar")
            .alignment(Alignment::Center)
            .style(muted),
        inner[0],
    );

    let email_style = if app.field == LoginField::Email {
        active
    } else {
        Style::default().fg(app.theme.text())
    };
    f.render_widget(
        Paragraph::new(format!("Email: {}", app.email)).style(email_style),
        inner[2],
    );

    let password_style = if app.field == LoginField::Password {
        active
    } else {
        Style::default().fg(app.theme.text())
    };
    let masked = "•".repeat(app.password.chars().count());
    f.render_widget(
        Paragraph::new(format!("Senha: {}", masked)).style(password_style),
        inner[4],
    );

    let hint = if app.logging_in {
        "Entrando..."
    } else {
        "Tab: alternar campo | Enter: entrar | Esc: sair"
    };
    f.render_widget(
        Paragraph::new(hint).alignment(Alignment::Center).style(muted),
        inner[6],
    );
}

// ============================================
// Dashboard screen
// ============================================

fn draw_dashboard(f: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // header
            Constraint::Length(5),  // stat cards
            Constraint::Length(10), // charts
            Constraint::Min(8),     // recent + category summary
        ])
        .split(area);

    draw_header(f, app, rows[0]);
    draw_stat_cards(f, app, rows[1]);

    let chart_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[2]);
    draw_distribution_chart(f, app, chart_cols[0]);
    draw_category_chart(f, app, chart_cols[1]);

    let bottom_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(66), Constraint::Percentage(34)])
        .split(rows[3]);
    draw_recent_transactions(f, app, bottom_cols[0]);
    draw_category_summary(f, app, bottom_cols[1]);
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            " Fast Finance ",
            Style::default()
                .fg(app.theme.text())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("— Dashboard", Style::default().fg(app.theme.muted())),
    ]);

    let controls = format!(
        " tema: {} | t: tema | r: recarregar | l: sair da conta | q: fechar ",
        app.theme.name()
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_bottom(Line::from(controls).right_aligned())
        .style(Style::default().fg(app.theme.text()));
    f.render_widget(block, area);
}

fn draw_stat_cards(f: &mut Frame, app: &App, area: Rect) {
    let t = totals(&app.transactions);
    let net = t.net();

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let net_color = if net >= rust_decimal::Decimal::ZERO {
        Color::Green
    } else {
        Color::Red
    };

    stat_card(
        f,
        app,
        cards[0],
        "Receita Total",
        &format_currency(t.income),
        "Total de receitas",
        Color::Green,
    );
    stat_card(
        f,
        app,
        cards[1],
        "Despesas",
        &format_currency(t.expense),
        "Total de despesas",
        Color::Red,
    );
    stat_card(
        f,
        app,
        cards[2],
        "Saldo",
        &format_currency(net),
        "Receitas - Despesas",
        net_color,
    );
    stat_card(
        f,
        app,
        cards[3],
        "Total de Transações",
        &app.transactions.len().to_string(),
        "Movimentações registradas",
        app.theme.text(),
    );
}

#[allow(clippy::too_many_arguments)]
fn stat_card(
    f: &mut Frame,
    app: &App,
    area: Rect,
    title: &str,
    value: &str,
    subtitle: &str,
    value_color: Color,
) {
    let lines = vec![
        Line::from(Span::styled(
            value.to_string(),
            Style::default().fg(value_color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            subtitle.to_string(),
            Style::default().fg(app.theme.muted()),
        )),
    ];

    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", title))
            .style(Style::default().fg(app.theme.text())),
    );
    f.render_widget(card, area);
}

fn draw_distribution_chart(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Distribuição Financeira ")
        .style(Style::default().fg(app.theme.text()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.loading {
        f.render_widget(loading_line(app), inner);
        return;
    }

    let t = totals(&app.transactions);
    let slices = income_expense_slices(&t);

    if slices.is_empty() {
        f.render_widget(placeholder(app, "Nenhum dado disponível para exibir"), inner);
        return;
    }

    let grand = t.grand_total();
    let bar_width = inner.width.saturating_sub(2) as usize;
    let mut lines = Vec::new();

    for slice in &slices {
        let share = percent(slice.value, grand);
        lines.push(Line::from(vec![
            Span::styled("● ", Style::default().fg(hex_color(slice.color))),
            Span::styled(
                format!(
                    "{}: {} ({:.1}%)",
                    slice.name,
                    format_currency(slice.value),
                    share
                ),
                Style::default().fg(app.theme.text()),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            meter(bar_width, share),
            Style::default().fg(hex_color(slice.color)),
        )));
        lines.push(Line::default());
    }

    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_category_chart(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Distribuição por Categoria ")
        .style(Style::default().fg(app.theme.text()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.loading {
        f.render_widget(loading_line(app), inner);
        return;
    }

    let rollups = category_rollup(&app.transactions);
    let slices = category_slices(&rollups);

    if slices.is_empty() {
        f.render_widget(placeholder(app, "Nenhum dado disponível para exibir"), inner);
        return;
    }

    let grand = totals(&app.transactions).grand_total();
    let visible = inner.height as usize / 2;
    let mut lines = Vec::new();

    for slice in slices.iter().take(visible.max(1)) {
        let share = percent(slice.value, grand);
        lines.push(Line::from(vec![
            Span::styled("● ", Style::default().fg(hex_color(slice.color))),
            Span::styled(
                format!("{}: {:.1}%", slice.name, share),
                Style::default().fg(app.theme.text()),
            ),
            Span::styled(
                format!(
                    "  +{} -{}",
                    format_currency(slice.income),
                    format_currency(slice.expense)
                ),
                Style::default().fg(app.theme.muted()),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            meter(inner.width.saturating_sub(2) as usize, share),
            Style::default().fg(hex_color(slice.color)),
        )));
    }

    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_recent_transactions(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Transações Recentes ")
        .style(Style::default().fg(app.theme.text()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.loading {
        f.render_widget(loading_line(app), inner);
        return;
    }

    if app.transactions.is_empty() {
        f.render_widget(placeholder(app, "Nenhuma transação encontrada"), inner);
        return;
    }

    let now = chrono::Utc::now();
    let rows: Vec<Row> = app
        .transactions
        .iter()
        .take(6)
        .map(|tx| {
            let (dot, sign, color) = match tx.kind {
                TransactionKind::Receita => ("●", "+", Color::Green),
                TransactionKind::Despesa => ("●", "-", Color::Red),
            };

            Row::new(vec![
                Cell::from(dot).style(Style::default().fg(color)),
                Cell::from(tx.description.clone())
                    .style(Style::default().fg(app.theme.text())),
                Cell::from(format!(
                    "{} • {}",
                    relative_date(tx.date, now),
                    tx.category
                ))
                .style(Style::default().fg(app.theme.muted())),
                Cell::from(format!("{}{}", sign, format_currency(tx.amount())))
                    .style(Style::default().fg(color).add_modifier(Modifier::BOLD)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(1),
        Constraint::Percentage(40),
        Constraint::Percentage(35),
        Constraint::Percentage(25),
    ];

    let mut table_area = inner;
    if app.transactions.len() > 6 && inner.height > 7 {
        table_area.height = inner.height - 1;
        let footer = Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1);
        f.render_widget(
            Paragraph::new(format!(
                "Ver todas as {} transações",
                app.transactions.len()
            ))
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.theme.muted())),
            footer,
        );
    }

    f.render_widget(Table::new(rows, widths), table_area);
}

fn draw_category_summary(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Resumo por Categoria ")
        .style(Style::default().fg(app.theme.text()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.loading {
        f.render_widget(loading_line(app), inner);
        return;
    }

    let rollups = category_rollup(&app.transactions);
    if rollups.is_empty() {
        f.render_widget(placeholder(app, "Nenhuma transação para analisar"), inner);
        return;
    }

    let slices = category_slices(&rollups);
    let grand = totals(&app.transactions).grand_total();
    let bar_width = inner.width.saturating_sub(2) as usize;
    let mut lines = Vec::new();

    for slice in slices.iter().take(5) {
        let share = percent(slice.value, grand);
        lines.push(Line::from(vec![
            Span::styled("● ", Style::default().fg(hex_color(slice.color))),
            Span::styled(
                slice.name.clone(),
                Style::default()
                    .fg(app.theme.text())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {} ({:.1}%)", format_currency(slice.value), share),
                Style::default().fg(app.theme.muted()),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            meter(bar_width, share),
            Style::default().fg(hex_color(slice.color)),
        )));
    }

    if slices.len() > 5 {
        lines.push(Line::from(Span::styled(
            format!("+{} categorias adicionais", slices.len() - 5),
            Style::default().fg(app.theme.muted()),
        )));
    }

    f.render_widget(Paragraph::new(lines), inner);
}

// ============================================
// Helpers
// ============================================

fn loading_line(app: &App) -> Paragraph<'static> {
    Paragraph::new("Carregando...")
        .alignment(Alignment::Center)
        .style(Style::default().fg(app.theme.muted()))
}

fn placeholder(app: &App, text: &str) -> Paragraph<'static> {
    Paragraph::new(text.to_string())
        .alignment(Alignment::Center)
        .style(Style::default().fg(app.theme.muted()))
}

/// Horizontal meter filled proportionally to `share` (0..=100).
fn meter(width: usize, share: f64) -> String {
    if width == 0 {
        return String::new();
    }
    let filled = ((share / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Translate a `#rrggbb` palette entry into a terminal color.
fn hex_color(hex: &str) -> Color {
    let parse = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(0);

    if hex.len() == 7 && hex.starts_with('#') {
        Color::Rgb(parse(1..3), parse(3..5), parse(5..7))
    } else {
        Color::Reset
    }
}

/// Fixed-size rect centered inside `area`.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
