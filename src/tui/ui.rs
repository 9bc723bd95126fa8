//! UI rendering for the TUI.

use ratatui::{
    prelude::*,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::app::{App, Mode};
use crate::target::{format_size, VisibleRow};

/// Render the entire UI.
pub fn render(app: &App, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Tree view
            Constraint::Length(2), // Footer
        ])
        .split(frame.area());

    render_header(app, frame, chunks[0]);
    render_tree_area(app, frame, chunks[1]);
    render_footer(app, frame, chunks[2]);

    match app.mode {
        Mode::Confirm => render_confirm_dialog(app, frame),
        Mode::Help => render_help_overlay(app, frame),
        Mode::Normal => {}
    }
}

/// Drop all styling when colors are disabled.
fn themed(app: &App, style: Style) -> Style {
    if app.color {
        style
    } else {
        Style::default()
    }
}

fn selection_text(app: &App) -> String {
    format!(
        "{} selected, {}",
        app.summary.count,
        humansize::format_size(app.summary.total_size, humansize::BINARY)
    )
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let header_text = format!(" {}  │  {}", app.root.display(), selection_text(app));

    let block = Block::default()
        .title(" Uninstall targets ")
        .borders(Borders::ALL)
        .border_style(themed(app, Style::default().fg(Color::Cyan)));

    let paragraph = Paragraph::new(header_text)
        .block(block)
        .style(themed(app, Style::default().fg(Color::White)));

    frame.render_widget(paragraph, area);
}

fn render_tree_area(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(themed(app, Style::default().fg(Color::Gray)));

    if app.visible_rows.is_empty() {
        let paragraph = Paragraph::new("No data")
            .block(block)
            .alignment(Alignment::Center)
            .style(themed(app, Style::default().fg(Color::DarkGray)));

        frame.render_widget(paragraph, area);
        return;
    }

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let visible_height = inner_area.height as usize;
    let scroll_offset =
        calculate_scroll_offset(app.selected, visible_height, app.visible_rows.len());

    for (i, row) in app
        .visible_rows
        .iter()
        .skip(scroll_offset)
        .take(visible_height)
        .enumerate()
    {
        let y = inner_area.y + i as u16;
        let is_selected = scroll_offset + i == app.selected;
        render_row(app, frame, *row, Rect::new(inner_area.x, y, inner_area.width, 1), is_selected);
    }
}

fn calculate_scroll_offset(selected: usize, visible_height: usize, total: usize) -> usize {
    if total <= visible_height {
        return 0;
    }

    let padding = 3.min(visible_height / 4);

    if selected < padding {
        0
    } else if selected >= total - padding {
        total.saturating_sub(visible_height)
    } else {
        selected
            .saturating_sub(padding)
            .min(total.saturating_sub(visible_height))
    }
}

fn render_row(app: &App, frame: &mut Frame, row: VisibleRow, area: Rect, is_selected: bool) {
    let Some(entry) = app.tree.get(row.id) else {
        return;
    };

    let indent = "  ".repeat(row.depth);
    let marker = if entry.is_dir {
        if entry.expanded {
            "▼ "
        } else {
            "► "
        }
    } else {
        "  "
    };
    let checkbox = if entry.checked { "[x] " } else { "[ ] " };
    let icon = format!("{} ", entry.icon.glyph());

    let size_width = app.size_column as usize;
    let size_str = format!("{:>width$}", format_size(entry.size), width = size_width);

    // Use chars().count() for display width, not byte length
    let prefix_len = indent.chars().count()
        + marker.chars().count()
        + checkbox.chars().count()
        + icon.chars().count();
    let name_width = (area.width as usize).saturating_sub(prefix_len + size_width + 1);

    let name = if entry.is_dir {
        format!("{}/", entry.name)
    } else {
        entry.name.clone()
    };
    let name_char_count = name.chars().count();
    let display_name = if name_char_count > name_width && name_width > 1 {
        let truncated: String = name.chars().take(name_width.saturating_sub(1)).collect();
        format!("{}…", truncated)
    } else {
        name
    };
    let padding = " ".repeat(name_width.saturating_sub(display_name.chars().count()));

    let name_style = match (entry.is_dir, entry.checked) {
        (true, true) => Style::default().fg(Color::Blue).bold(),
        (false, true) => Style::default().fg(Color::White),
        (_, false) => Style::default().fg(Color::DarkGray),
    };
    let checkbox_style = if entry.checked {
        Style::default().fg(Color::Red).bold()
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let error_style = Style::default().fg(Color::Yellow);

    let mut spans = vec![
        Span::raw(format!("{}{}", indent, marker)),
        Span::styled(checkbox, themed(app, checkbox_style)),
        Span::raw(icon),
        Span::styled(display_name, themed(app, name_style)),
        Span::raw(padding),
        Span::raw(" "),
    ];
    if entry.error.is_some() {
        spans.push(Span::styled(size_str, themed(app, error_style)));
    } else {
        spans.push(Span::styled(size_str, themed(app, Style::default().fg(Color::Gray))));
    }

    let mut line = Line::from(spans);
    if is_selected {
        line = line.style(if app.color {
            Style::default().bg(Color::DarkGray)
        } else {
            Style::default().add_modifier(Modifier::REVERSED)
        });
    }

    frame.render_widget(Paragraph::new(line), area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let hints = match app.mode {
        Mode::Normal => {
            "[↑↓] Move  [←→] Collapse/Expand  [Space] Check  [a/u] All/None  [d] Done  [?] Help  [q] Quit"
        }
        Mode::Confirm => "[y] Yes  [n] No",
        Mode::Help => "[Esc] Close",
    };

    // Full path of the highlighted entry, plus its error if any
    let path_line = app
        .selected_entry()
        .map(|e| match &e.error {
            Some(err) => format!("{}  ({})", e.path.display(), err),
            None => e.path.display().to_string(),
        })
        .unwrap_or_default();

    let text = vec![
        Line::from(path_line),
        Line::from(app.status_message.as_deref().unwrap_or(hints).to_string()),
    ];

    let paragraph = Paragraph::new(text)
        .style(themed(app, Style::default().fg(Color::DarkGray)))
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

fn render_confirm_dialog(app: &App, frame: &mut Frame) {
    let area = frame.area();

    let dialog_width = 50u16.min(area.width.saturating_sub(4));
    let dialog_height = 7u16;
    let dialog_area = Rect {
        x: (area.width.saturating_sub(dialog_width)) / 2,
        y: (area.height.saturating_sub(dialog_height)) / 2,
        width: dialog_width,
        height: dialog_height,
    };

    frame.render_widget(Clear, dialog_area);

    let count = app.summary.count;
    let message = format!(
        "Delete {} item{}?\n\nSize: {}\n\n[y]es  [n]o",
        count,
        if count == 1 { "" } else { "s" },
        humansize::format_size(app.summary.total_size, humansize::BINARY)
    );

    let block = Block::default()
        .title(" Confirm ")
        .borders(Borders::ALL)
        .border_style(themed(app, Style::default().fg(Color::Red)));

    let paragraph = Paragraph::new(message)
        .block(block)
        .style(themed(app, Style::default().fg(Color::White)))
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, dialog_area);
}

fn render_help_overlay(app: &App, frame: &mut Frame) {
    let area = frame.area();

    let help_width = 60u16.min(area.width.saturating_sub(8));
    let help_height = 24u16.min(area.height.saturating_sub(4));
    let help_area = Rect {
        x: (area.width.saturating_sub(help_width)) / 2,
        y: (area.height.saturating_sub(help_height)) / 2,
        width: help_width,
        height: help_height,
    };

    frame.render_widget(Clear, help_area);

    let help_text = r#"
 NAVIGATION
 ─────────────────────────────────
 ↑/k ↓/j    Move up / down
 PgUp/PgDn  Move a page
 g / G      Go to top / bottom
 →/l        Expand directory
 ←/h/Bksp   Collapse / Go to parent
 Enter      Toggle expand/collapse
 e / c      Expand all / Collapse all

 SELECTION
 ─────────────────────────────────
 Space      Check / uncheck
 a / u      Check all / Uncheck all
 d          Finish and confirm

 ?          Toggle this help
 q/Esc      Quit without selecting
"#;

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(themed(app, Style::default().fg(Color::Cyan)));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .style(themed(app, Style::default().fg(Color::White)));

    frame.render_widget(paragraph, help_area);
}
