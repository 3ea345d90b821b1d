//! Frame rendering: two panes, a status line and the modal overlays.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use shelf_core::tree::CommandNode;

use super::state::{App, FieldKind, InputForm, Modal};

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.area());

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);

    draw_tree_pane(frame, app, panes[0]);
    draw_details_pane(frame, app, panes[1]);
    draw_status_bar(frame, app, chunks[1]);

    match &app.modal {
        Modal::None => {}
        Modal::Help => draw_help_dialog(frame, chunks[0]),
        Modal::Confirm(dialog) => draw_confirm_dialog(frame, dialog, chunks[0]),
        Modal::Input(form) => draw_input_dialog(frame, form, chunks[0]),
    }
}

fn draw_tree_pane(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();
    for (i, row) in app.visible_rows().iter().enumerate() {
        let Some(node) = app.tree.root().node_at(&row.path) else {
            continue;
        };

        let glyph = if node.is_folder() {
            if node.expanded {
                "▼ "
            } else {
                "▶ "
            }
        } else {
            "• "
        };

        let text = format!("{}{}{}", "  ".repeat(row.depth), glyph, node.name);
        let line = if i == app.cursor {
            Line::styled(text, Style::default().bg(Color::Blue).fg(Color::White))
        } else {
            Line::raw(text)
        };
        lines.push(line);
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            " Commands ",
            Style::default().add_modifier(Modifier::BOLD),
        ));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_details_pane(frame: &mut Frame, app: &App, area: Rect) {
    let lines = match app.selected_node() {
        Some(node) => details_lines(node),
        None => vec![Line::styled(
            "No selection",
            Style::default().fg(Color::DarkGray),
        )],
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            " Details ",
            Style::default().add_modifier(Modifier::BOLD),
        ));
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
        area,
    );
}

fn details_lines(node: &CommandNode) -> Vec<Line<'_>> {
    let mut lines = vec![
        Line::styled(
            node.name.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
    ];

    if node.is_folder() {
        lines.push(Line::styled("FOLDER", Style::default().fg(Color::Yellow)));
        lines.push(Line::raw(format!("└─ {} items", node.children.len())));
        if node.expanded {
            lines.push(Line::styled("Expanded", Style::default().fg(Color::Green)));
        } else {
            lines.push(Line::styled("Collapsed", Style::default().fg(Color::Red)));
        }
    } else {
        lines.push(Line::styled("COMMAND", Style::default().fg(Color::Green)));
        lines.push(Line::raw(""));
        if !node.command.is_empty() {
            lines.push(Line::styled(
                format!("$ {}", node.command),
                Style::default().fg(Color::Cyan),
            ));
        }
        if !node.description.is_empty() {
            lines.push(Line::raw(""));
            lines.push(Line::styled(
                node.description.as_str(),
                Style::default().add_modifier(Modifier::ITALIC),
            ));
        }
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "Press enter to run",
            Style::default().fg(Color::DarkGray),
        ));
    }

    lines
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let text = match &app.modal {
        Modal::Input(_) => "↑/↓ or Tab/Shift+Tab switch fields • Enter when all filled • Esc to go back",
        Modal::Confirm(_) => "←/→ to select • Enter to confirm • Esc to go back",
        Modal::Help => "Keyboard shortcuts • Esc to go back",
        Modal::None => "↑/↓ navigate • Enter/r run • e edit config • ? help • Esc quit",
    };

    let style = Style::default().bg(Color::DarkGray).fg(Color::White);
    frame.render_widget(Paragraph::new(text).style(style), area);
}

/// A fixed-size rect centered inside `area`, clipped to it.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn dialog_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
        .title(Span::styled(
            format!(" {title} "),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center)
}

fn draw_help_dialog(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::styled(
            "shelf - Command Launcher",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::raw("↑/k, ↓/j    move up / down"),
        Line::raw("enter/r     run command or toggle folder"),
        Line::raw("e           edit config file"),
        Line::raw("?           toggle this help"),
        Line::raw("esc         go back / quit"),
        Line::raw("ctrl+c      quit"),
        Line::raw(""),
        Line::styled(
            "Press ? again or Esc to close",
            Style::default().fg(Color::DarkGray),
        ),
    ];

    let rect = centered_rect(46, lines.len() as u16 + 2, area);
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(dialog_block("Help")),
        rect,
    );
}

fn draw_confirm_dialog(frame: &mut Frame, dialog: &super::state::ConfirmDialog, area: Rect) {
    let yes_style = if dialog.yes {
        Style::default().bg(Color::Green).fg(Color::Black)
    } else {
        Style::default().fg(Color::Green)
    };
    let no_style = if dialog.yes {
        Style::default().fg(Color::Red)
    } else {
        Style::default().bg(Color::Red).fg(Color::Black)
    };

    let lines = vec![
        Line::raw(format!("Task: {}", dialog.node_name)),
        Line::raw(""),
        Line::styled(
            format!("$ {}", dialog.command),
            Style::default().fg(Color::Cyan),
        ),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  YES  ", yes_style),
            Span::raw("   "),
            Span::styled("  NO  ", no_style),
        ]),
    ];

    let rect = centered_rect(50, lines.len() as u16 + 2, area);
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(dialog_block("Run Command?")),
        rect,
    );
}

fn draw_input_dialog(frame: &mut Frame, form: &InputForm, area: Rect) {
    let mut lines = vec![
        Line::raw(format!("Command: {}", form.node_name)),
        Line::styled(
            format!("$ {}", form.template),
            Style::default().fg(Color::Cyan),
        ),
        Line::raw(""),
    ];

    for (i, field) in form.fields.iter().enumerate() {
        let current = i == form.cursor;
        lines.push(Line::styled(
            format!("{}:", field.name),
            Style::default().fg(Color::Yellow),
        ));

        match &field.kind {
            FieldKind::Text(buffer) => {
                lines.push(input_line(buffer.value(), buffer.is_focused()));
            }
            FieldKind::Choice(choice) => {
                for (j, option) in choice.options.iter().enumerate() {
                    let mut label = option.label.clone();
                    if option.value == super::state::CUSTOM_OPTION_VALUE
                        && !choice.custom.value().is_empty()
                    {
                        label = format!("Custom: {}", choice.custom.value());
                    }

                    let line = if j == choice.index {
                        let style = if current && !choice.custom_active {
                            Style::default().bg(Color::Cyan).fg(Color::Black)
                        } else {
                            Style::default().fg(Color::Cyan)
                        };
                        Line::styled(format!("● {label}"), style)
                    } else {
                        Line::styled(format!("○ {label}"), Style::default().fg(Color::DarkGray))
                    };
                    lines.push(line);
                }

                if choice.custom_active {
                    lines.push(input_line(choice.custom.value(), choice.custom.is_focused()));
                }
            }
        }
        lines.push(Line::raw(""));
    }

    let rect = centered_rect(56, lines.len() as u16 + 2, area);
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines).block(dialog_block("Enter Parameters")),
        rect,
    );
}

fn input_line(value: &str, focused: bool) -> Line<'static> {
    if focused {
        Line::from(vec![
            Span::raw(format!("> {value}")),
            Span::styled("█", Style::default().fg(Color::White)),
        ])
    } else {
        Line::raw(format!("> {value}"))
    }
}
