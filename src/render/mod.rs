// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! User interface rendering logic.
//!
//! This module handles the translation of the shell state into visual widgets
//! using the `ratatui` framework: the board summary pane, the command output
//! pane, and the command line at the bottom of the screen.
//!
//! The board itself is rendered as a summary of the decoded state codes; full
//! board drawing belongs to the rendering engine, which is outside this
//! crate's scope.

mod commander;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::{App, render::commander::draw_commander};

/// Renders the user interface to the terminal frame.
pub(crate) fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();

    // Outer layout: main content, command line footer
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    // Main layout: board summary, command output
    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(0)])
        .split(outer[0]);

    draw_board(f, main[0], app);
    draw_output(f, main[1], app);

    draw_commander(f, outer[1], app);
}

fn draw_board(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border_colour))
        .title(" Board ")
        .title_style(Style::default().fg(app.theme.accent_colour));

    let text = match &app.shell.game {
        Some(game) if app.shell.show_board => format!(
            "Variant:  {}\nMatch:    {}\nLength:   {}\nJacoby:   {}\nAutos:    {}\nPosition: {}\nState:    {}",
            game.variant.name(),
            game.game_ref.as_deref().unwrap_or("-"),
            game.match_state.length,
            if game.jacoby { "on" } else { "off" },
            if game.auto_doubles { "on" } else { "off" },
            game.position.encode(),
            game.match_state.encode(),
        ),
        _ => "No game in progress.\n\nType :new to start one,\nor :help for commands.".to_string(),
    };

    f.render_widget(
        Paragraph::new(text)
            .style(Style::default().fg(app.theme.text_colour))
            .block(block),
        area,
    );
}

fn draw_output(f: &mut Frame, area: Rect, app: &App) {
    let mut title = String::from(" tavla ");
    if let Some(active) = app.shell.active_module() {
        title = format!(" tavla [{active}] ");
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border_colour))
        .title(title)
        .title_style(Style::default().fg(app.theme.accent_colour));

    f.render_widget(
        Paragraph::new(app.shell.output_text.as_str())
            .style(Style::default().fg(app.theme.text_colour))
            .wrap(Wrap { trim: false })
            .block(block),
        area,
    );
}
