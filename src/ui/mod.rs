//! Frame rendering for the catalog browser.
//!
//! The layout is a header (search text, category, sort), the page list with a
//! detail pane for the highlighted show, and a footer with the page counter and
//! key hints. What the middle area shows depends on [`ViewStatus`].

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph, Wrap},
};

use crate::state::{AppState, ViewStatus};
use crate::theme::{Theme, theme};
use crate::util::{plural, short_date, truncate_to_width};

/// Spinner frames cycled by the tick timer while loading.
pub const SPINNER: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

/// What: Draw a full frame.
///
/// Inputs:
/// - `f`: Frame to draw into
/// - `app`: Application state; `list_state` is updated by the stateful list widget
pub fn ui(f: &mut Frame, app: &mut AppState) {
    let th = theme();
    let area = f.area();
    f.render_widget(Block::default().style(Style::default().bg(th.base)), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(2),
        ])
        .split(area);

    render_header(f, app, chunks[0], &th);
    render_body(f, app, chunks[1], &th);
    render_footer(f, app, chunks[2], &th);
}

fn bordered<'a>(title: impl Into<Line<'a>>, th: &Theme) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(th.overlay1))
}

fn render_header(f: &mut Frame, app: &AppState, area: Rect, th: &Theme) {
    let parts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let params = app.view.params();
    let input = Paragraph::new(Line::from(vec![
        Span::styled("> ", Style::default().fg(th.sapphire)),
        Span::styled(params.query.clone(), Style::default().fg(th.text)),
    ]))
    .block(bordered(
        Span::styled("Search", Style::default().fg(th.mauve)),
        th,
    ));
    f.render_widget(input, parts[0]);

    let category = params.category.map_or_else(
        || "All categories".to_string(),
        |id| {
            app.categories
                .name(id)
                .map_or_else(|| format!("#{id}"), str::to_string)
        },
    );
    let filters = Paragraph::new(Line::from(vec![
        Span::styled("Category: ", Style::default().fg(th.overlay2)),
        Span::styled(category, Style::default().fg(th.sapphire)),
        Span::raw("   "),
        Span::styled("Sort: ", Style::default().fg(th.overlay2)),
        Span::styled(params.sort_key.label(), Style::default().fg(th.mauve)),
    ]))
    .block(bordered(
        Span::styled("Filters", Style::default().fg(th.overlay1)),
        th,
    ));
    f.render_widget(filters, parts[1]);
}

fn render_body(f: &mut Frame, app: &mut AppState, area: Rect, th: &Theme) {
    let message = match app.view.status() {
        ViewStatus::Loading => Some(Line::from(Span::styled(
            format!(
                "{} Loading shows…",
                SPINNER[app.spinner % SPINNER.len()]
            ),
            Style::default().fg(th.yellow),
        ))),
        ViewStatus::Error(msg) => Some(Line::from(Span::styled(
            format!("Could not load shows: {msg}"),
            Style::default().fg(th.red).add_modifier(Modifier::BOLD),
        ))),
        ViewStatus::Empty => Some(Line::from(Span::styled(
            "No shows match the current filters.",
            Style::default().fg(th.overlay2),
        ))),
        ViewStatus::Ready(_) => None,
    };
    if let Some(line) = message {
        let p = Paragraph::new(line)
            .wrap(Wrap { trim: true })
            .block(bordered("Shows", th));
        f.render_widget(p, area);
        return;
    }

    let parts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);
    render_list(f, app, parts[0], th);
    render_details(f, app, parts[1], th);
}

fn render_list(f: &mut Frame, app: &mut AppState, area: Rect, th: &Theme) {
    let title_width = usize::from(area.width).saturating_sub(40).max(12);
    let view = app.view.view();
    let items: Vec<ListItem> = view
        .items
        .iter()
        .map(|r| {
            let labels = app.categories.labels(&r.category_ids);
            let cats = if labels.is_empty() {
                "No categories".to_string()
            } else {
                labels.join(", ")
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{}  ", short_date(&r.last_updated)),
                    Style::default().fg(th.overlay2),
                ),
                Span::styled(
                    truncate_to_width(&r.title, title_width),
                    Style::default().fg(th.text).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}", plural(r.season_count as usize, "season", "seasons")),
                    Style::default().fg(th.green),
                ),
                Span::styled(format!("  {cats}"), Style::default().fg(th.sapphire)),
            ]))
        })
        .collect();
    let title = format!("Shows ({})", view.total_matched);
    let list = List::new(items)
        .style(Style::default().fg(th.text).bg(th.base))
        .block(bordered(
            Span::styled(title, Style::default().fg(th.overlay1)),
            th,
        ))
        .highlight_style(Style::default().bg(th.surface1))
        .highlight_symbol("> ");
    f.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_details(f: &mut Frame, app: &AppState, area: Rect, th: &Theme) {
    let lines = app.selected_record().map_or_else(Vec::new, |r| {
        let mut lines = vec![
            Line::from(Span::styled(
                r.title.clone(),
                Style::default().fg(th.mauve).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("Updated {}", short_date(&r.last_updated)),
                Style::default().fg(th.overlay2),
            )),
            Line::default(),
        ];
        lines.push(Line::from(Span::styled(
            r.description.clone(),
            Style::default().fg(th.text),
        )));
        lines
    });
    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(bordered("Details", th));
    f.render_widget(p, area);
}

/// What: Footer text: page counter plus result count.
///
/// Output:
/// - `"Page X of Y · N shows"` when something matched.
/// - A page-less line while loading, after a failed fetch, or when nothing matched.
#[must_use]
pub fn page_summary(app: &AppState) -> String {
    match app.view.status() {
        ViewStatus::Loading => "Loading…".to_string(),
        ViewStatus::Error(_) => "Catalog unavailable".to_string(),
        ViewStatus::Empty => "No results".to_string(),
        ViewStatus::Ready(view) => format!(
            "Page {} of {} · {}",
            app.view.params().page_index,
            view.total_pages,
            plural(view.total_matched, "show", "shows")
        ),
    }
}

fn render_footer(f: &mut Frame, app: &AppState, area: Rect, th: &Theme) {
    let lines = vec![
        Line::from(Span::styled(
            page_summary(app),
            Style::default().fg(th.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "type to search · Tab category · F2 sort · ←/→ page · Ctrl+R reset · Esc quit",
            Style::default().fg(th.overlay1),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}
