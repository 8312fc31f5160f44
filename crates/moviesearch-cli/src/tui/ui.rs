//! TUI rendering logic for the movie browser.

use moviesearch_api::tmdb::{MovieApi, ResultPage};
use moviesearch_core::present::{DetailView, MovieCard};
use moviesearch_core::screens::DetailScreen;
use moviesearch_core::view::{EmptyStateCopy, View};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};

use super::state::{BrowserState, InputMode};

/// Window title.
const APP_NAME: &str = "Movie Search";
/// Placeholder shown in an empty search box.
const SEARCH_PLACEHOLDER: &str = "Search movies...";
/// Longest overview shown in a list row, in characters.
const OVERVIEW_PREVIEW_CHARS: usize = 120;

/// Draws the browser UI.
#[allow(clippy::indexing_slicing)]
pub fn draw<A>(frame: &mut Frame, state: &mut BrowserState<A>)
where
    A: MovieApi + Send + Sync + 'static,
{
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // search box
            Constraint::Min(5),    // main content
            Constraint::Length(3), // footer
        ])
        .split(frame.area());

    draw_search_box(frame, chunks[0], state);
    if let Some(detail) = state.detail.as_ref() {
        draw_detail(frame, chunks[1], detail, state);
    } else {
        draw_list(frame, chunks[1], state);
    }
    draw_footer(frame, chunks[2], state);
}

/// Draws the search input.
fn draw_search_box<A>(frame: &mut Frame, area: Rect, state: &BrowserState<A>)
where
    A: MovieApi + Send + Sync + 'static,
{
    let editing = state.input_mode == InputMode::Search;
    let input = state.list.input();
    let (text, style) = if input.is_empty() && !editing {
        (SEARCH_PLACEHOLDER, Style::default().fg(Color::DarkGray))
    } else if editing {
        (input, Style::default().fg(Color::Yellow))
    } else {
        (input, Style::default())
    };

    let search = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(format!(" {APP_NAME} ")));
    frame.render_widget(search, area);
}

/// Draws the result list pane.
fn draw_list<A>(frame: &mut Frame, area: Rect, state: &mut BrowserState<A>)
where
    A: MovieApi + Send + Sync + 'static,
{
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", state.list.title()))
        .border_style(Style::default().fg(Color::Cyan));

    let page = match state.list.view() {
        View::Content(page) => page,
        View::Spinner { text } => {
            frame.render_widget(centered(spinner_text(text)).block(block), area);
            return;
        }
        View::Error { message } => {
            frame.render_widget(centered(error_text(message)).block(block), area);
            return;
        }
        View::Empty(copy) => {
            frame.render_widget(centered(empty_text(copy)).block(block), area);
            return;
        }
    };

    let block = block.title_bottom(page_label(page));
    let items: Vec<ListItem> = page
        .items
        .iter()
        .map(|item| card_item(&MovieCard::new(item, &state.images)))
        .collect();

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_stateful_widget(list, area, &mut state.list_state);
}

/// Renders one movie card as a three-line list item.
fn card_item(card: &MovieCard) -> ListItem<'static> {
    let overview: String = if card.overview.chars().count() > OVERVIEW_PREVIEW_CHARS {
        let cut: String = card.overview.chars().take(OVERVIEW_PREVIEW_CHARS).collect();
        format!("{cut}...")
    } else {
        card.overview.clone()
    };
    ListItem::new(Text::from(vec![
        Line::from(vec![
            Span::styled(
                card.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  ({})", card.year)),
        ]),
        Line::from(vec![
            Span::styled(
                format!("\u{2b50} {}", card.rating),
                Style::default().fg(Color::Yellow),
            ),
            Span::styled(
                format!("  ({})", card.votes),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(Span::styled(overview, Style::default().fg(Color::Gray))),
    ]))
}

/// `"Page x / y (n results)"` label for the list border.
fn page_label(page: &ResultPage) -> String {
    format!(
        " Page {} / {} ({} results) ",
        page.page, page.total_pages, page.total_results
    )
}

/// Draws the detail pane.
fn draw_detail<A>(
    frame: &mut Frame,
    area: Rect,
    detail: &DetailScreen<A>,
    state: &BrowserState<A>,
) where
    A: MovieApi + Send + Sync + 'static,
{
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", detail.title()))
        .border_style(Style::default().fg(Color::Cyan));

    let text = match detail.view() {
        View::Content(record) => detail_text(&DetailView::new(record, &state.images)),
        View::Spinner { text } => {
            frame.render_widget(centered(spinner_text(text)).block(block), area);
            return;
        }
        View::Error { message } => {
            frame.render_widget(centered(error_text(message)).block(block), area);
            return;
        }
        View::Empty(copy) => {
            frame.render_widget(centered(empty_text(copy)).block(block), area);
            return;
        }
    };

    let paragraph = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((state.detail_scroll, 0));
    frame.render_widget(paragraph, area);
}

/// Lays out every detail section as text.
fn detail_text(view: &DetailView) -> Text<'static> {
    let heading = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let header = &view.header;

    let mut lines = vec![
        Line::from(Span::styled(
            header.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(
                format!("\u{2b50} {}", header.rating),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw(format!("  ({})", header.votes)),
        ]),
        Line::from(header.year.clone()),
    ];
    if let Some(runtime) = &view.runtime {
        lines.push(Line::from(runtime.clone()));
    }

    if !view.genres.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled("Genres", heading)));
        lines.push(Line::from(view.genres.join(" \u{b7} ")));
    }
    if let Some(overview) = &view.overview {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled("Overview", heading)));
        lines.push(Line::from(overview.clone()));
    }
    if let Some(tagline) = &view.tagline {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled("Tagline", heading)));
        lines.push(Line::from(Span::styled(
            tagline.clone(),
            Style::default().add_modifier(Modifier::ITALIC),
        )));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled("Production Info", heading)));
    for row in &view.production_info {
        let label = format!("{}:", row.label);
        lines.push(Line::from(vec![
            Span::styled(
                format!("{label:<10}"),
                Style::default().fg(Color::DarkGray),
            ),
            Span::raw(row.value.clone()),
        ]));
    }

    if !view.companies.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled("Production Companies", heading)));
        for company in &view.companies {
            lines.push(Line::from(format!("\u{2022} {company}")));
        }
    }

    let links = [
        ("Poster", header.poster_url.as_str()),
        ("Backdrop", header.hero_url.as_str()),
        ("Homepage", view.homepage.as_deref().unwrap_or_default()),
    ];
    if links.iter().any(|(_, url)| !url.is_empty()) {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled("Links", heading)));
        for (label, url) in links.iter().filter(|(_, url)| !url.is_empty()) {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{label:<10}"),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(String::from(*url)),
            ]));
        }
    }

    Text::from(lines)
}

fn spinner_text(text: &str) -> Text<'static> {
    Text::from(format!("\u{23f3} {text}"))
}

fn error_text(message: &str) -> Text<'static> {
    Text::from(vec![
        Line::from(Span::styled(
            String::from(message),
            Style::default().fg(Color::Red),
        )),
        Line::default(),
        Line::from(Span::styled(
            "Press r to retry",
            Style::default().fg(Color::DarkGray),
        )),
    ])
}

fn empty_text(copy: EmptyStateCopy) -> Text<'static> {
    Text::from(vec![
        Line::from(copy.icon),
        Line::from(Span::styled(
            copy.title,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            copy.message,
            Style::default().fg(Color::DarkGray),
        )),
    ])
}

fn centered(text: Text<'static>) -> Paragraph<'static> {
    Paragraph::new(text).alignment(Alignment::Center)
}

/// Draws the footer with key hints.
fn draw_footer<A>(frame: &mut Frame, area: Rect, state: &BrowserState<A>)
where
    A: MovieApi + Send + Sync + 'static,
{
    let help_text = match (state.input_mode, state.detail.is_some()) {
        (InputMode::Search, _) => Line::from("Type to search | Enter: submit | Esc: cancel"),
        (InputMode::Normal, false) => Line::from(vec![Span::raw(
            "\u{2191}\u{2193}/j/k: move  Enter: details  /: search  p: popular  n/N: page  r: retry  o: open  q: quit",
        )]),
        (InputMode::Normal, true) => Line::from(vec![Span::raw(
            "\u{2191}\u{2193}/j/k: scroll  Esc/Backspace: back  r: retry  o: open  q: quit",
        )]),
    };

    let footer = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
